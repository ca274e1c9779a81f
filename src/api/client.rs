/// HTTPクライアント
///
/// Field59 との通信を担当するHTTPクライアント。
/// 全リクエストに Basic 認証ヘッダーと `Accept: application/xml` を付け、
/// レスポンスはJSONではなくテキストとして受け取る。
/// リトライやタイムアウトの上書きは行わない。
use crate::api::auth::Credentials;
use crate::api::error::{self, ApiError, Operation};
use crate::config::APP_CONFIG;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, ApiError>;

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - ベンダーのベースURL（例: "https://api.field59.com"）
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(APP_CONFIG.api.user_agent)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// GETリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - パスプレフィックス以降のパス（例: "/search?limit=50"）
    pub async fn get(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        operation: Operation,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        debug!(%operation, %url, "GET");
        let request = Self::authorize(self.client.get(&url), credentials);

        Self::send(request, operation).await
    }

    /// フォームエンコードのPOSTリクエストを送信
    pub async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
        credentials: &Credentials,
        operation: Operation,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        debug!(%operation, %url, "POST");
        let request = Self::authorize(self.client.post(&url).form(form), credentials);

        Self::send(request, operation).await
    }

    /// DELETEリクエストを送信
    pub async fn delete(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        operation: Operation,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        debug!(%operation, %url, "DELETE");
        let request = Self::authorize(self.client.delete(&url), credentials);

        Self::send(request, operation).await
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, APP_CONFIG.api.path_prefix, endpoint)
    }

    /// 認証ヘッダーとAcceptヘッダーを付与
    fn authorize(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request
            .header(AUTHORIZATION, credentials.basic_auth_header())
            .header(ACCEPT, "application/xml")
    }

    /// リクエストを送信し、レスポンスが得られなければ NetworkError に分類する
    async fn send(request: RequestBuilder, operation: Operation) -> ApiResult<Response> {
        request
            .send()
            .await
            .map_err(|e| error::classify_transport(operation, &e))
    }

    /// レスポンスのステータスを確認してボディをテキストで返す
    ///
    /// # Arguments
    /// * `response` - HTTPレスポンス
    /// * `operation` - 分類に使う操作種別
    /// * `key` - NotFound に載せる動画キー
    pub async fn read_body(response: Response, operation: Operation, key: &str) -> ApiResult<String> {
        let status = response.status();

        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| ApiError::network(format!("Failed to read response body: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(error::classify_status(operation, key, status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://api.field59.com");
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_url_adds_prefix_and_trims_slash() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(
            client.build_url("/video/abc"),
            "http://localhost:8080/v2/video/abc"
        );
    }

    #[tokio::test]
    async fn test_headers_are_attached() {
        let mut server = mockito::Server::new_async().await;
        let credentials = Credentials::new("user", "pass");
        let mock = server
            .mock("GET", "/v2/ping")
            .match_header("authorization", credentials.basic_auth_header().as_str())
            .match_header("accept", "application/xml")
            .with_status(200)
            .with_body("<ok/>")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let response = client
            .get("/ping", &credentials, Operation::List)
            .await
            .unwrap();
        let body = ApiClient::read_body(response, Operation::List, "ping")
            .await
            .unwrap();

        assert_eq!(body, "<ok/>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // ポート1は通常リッスンされていない
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let result = client
            .get("/search", &Credentials::new("u", "p"), Operation::List)
            .await;
        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
