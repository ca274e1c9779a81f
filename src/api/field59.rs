/// Field59 API の4操作
///
/// 認証情報は呼び出しごとに受け取り、保持しない。
/// 各呼び出しは1回のHTTPリクエストで、リトライも重複排除も行わない。
/// 同じ作成リクエストを2回送ればベンダー側に2つの動画ができる。
use crate::api::auth::Credentials;
use crate::api::client::ApiClient;
use crate::api::error::{ApiError, Operation};
use crate::api::types::VendorVideo;
use crate::api::xml;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Field59Api {
    client: ApiClient,
}

impl Field59Api {
    /// # Arguments
    /// * `base_url` - ベンダーのベースURL（パスプレフィックスは含めない）
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(base_url)?,
        })
    }

    /// 動画一覧を取得
    ///
    /// 順序はベンダーの並び（新しい順）のまま。クライアント側では並べ替えない。
    pub async fn list_videos(
        &self,
        credentials: &Credentials,
        limit: u32,
    ) -> Result<Vec<VendorVideo>, ApiError> {
        let endpoint = format!("/search?limit={}", limit);
        let response = self
            .client
            .get(&endpoint, credentials, Operation::List)
            .await?;
        let body = ApiClient::read_body(response, Operation::List, "search").await?;

        Ok(xml::parse_videos(&body))
    }

    /// 動画を1件取得
    ///
    /// # Returns
    /// 存在しない（HTTP 404 または `video` 要素なし）場合は `Ok(None)`
    pub async fn get_video(
        &self,
        credentials: &Credentials,
        key: &str,
    ) -> Result<Option<VendorVideo>, ApiError> {
        let endpoint = format!("/video/{}", key);
        let response = self
            .client
            .get(&endpoint, credentials, Operation::Get)
            .await?;

        match ApiClient::read_body(response, Operation::Get, key).await {
            Ok(body) => Ok(xml::parse_videos(&body).into_iter().next()),
            Err(ApiError::NotFound { .. }) => {
                debug!(key, "video not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// URLを指定して動画を作成
    ///
    /// # Returns
    /// ベンダーが割り当てた動画キー
    ///
    /// # Errors
    /// レスポンスに `key` 要素が無い場合は `ApiError::MissingKey`
    pub async fn create_video_from_url(
        &self,
        credentials: &Credentials,
        source_url: &str,
        title: Option<&str>,
    ) -> Result<String, ApiError> {
        let body = xml::build_create_body(source_url, title.unwrap_or_default());
        let response = self
            .client
            .post_form(
                "/video/create",
                &[("xml", body.as_str())],
                credentials,
                Operation::Create,
            )
            .await?;
        let body = ApiClient::read_body(response, Operation::Create, "create").await?;

        let key = xml::parse_key(&body).ok_or(ApiError::MissingKey)?;
        info!(%key, "video created");
        Ok(key)
    }

    /// 動画を削除
    pub async fn delete_video(&self, credentials: &Credentials, key: &str) -> Result<(), ApiError> {
        let endpoint = format!("/video/{}", key);
        let response = self
            .client
            .delete(&endpoint, credentials, Operation::Delete)
            .await?;
        ApiClient::read_body(response, Operation::Delete, key).await?;

        info!(key, "video deleted");
        Ok(())
    }
}
