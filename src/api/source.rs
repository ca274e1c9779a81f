/// 動画の取得元
///
/// コマンド層はこの型だけを見て、Field59 かモックかを意識しない。
/// Field59 側の認証情報はここで1回の実行の間だけ保持し、各呼び出しに渡す。
use crate::api::auth::Credentials;
use crate::api::error::ApiError;
use crate::api::field59::Field59Api;
use crate::api::mock::MockCatalog;
use crate::api::types::VendorVideo;

#[derive(Debug)]
pub enum VideoSource {
    Field59 {
        api: Field59Api,
        credentials: Credentials,
    },
    Mock(MockCatalog),
}

impl VideoSource {
    pub fn field59(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, ApiError> {
        Ok(Self::Field59 {
            api: Field59Api::new(base_url)?,
            credentials,
        })
    }

    pub fn mock() -> Self {
        Self::Mock(MockCatalog::default())
    }

    /// 出力に載せる取得元の名前
    pub fn label(&self) -> &'static str {
        match self {
            Self::Field59 { .. } => "field59",
            Self::Mock(_) => "mock",
        }
    }

    pub async fn list_videos(&self, limit: u32) -> Result<Vec<VendorVideo>, ApiError> {
        match self {
            Self::Field59 { api, credentials } => api.list_videos(credentials, limit).await,
            Self::Mock(catalog) => catalog.list_videos(limit).await,
        }
    }

    pub async fn get_video(&self, key: &str) -> Result<Option<VendorVideo>, ApiError> {
        match self {
            Self::Field59 { api, credentials } => api.get_video(credentials, key).await,
            Self::Mock(catalog) => catalog.get_video(key).await,
        }
    }

    pub async fn create_video_from_url(
        &self,
        source_url: &str,
        title: Option<&str>,
    ) -> Result<String, ApiError> {
        match self {
            Self::Field59 { api, credentials } => {
                api.create_video_from_url(credentials, source_url, title)
                    .await
            }
            Self::Mock(catalog) => catalog.create_video_from_url(source_url, title).await,
        }
    }

    pub async fn delete_video(&self, key: &str) -> Result<(), ApiError> {
        match self {
            Self::Field59 { api, credentials } => api.delete_video(credentials, key).await,
            Self::Mock(catalog) => catalog.delete_video(key).await,
        }
    }
}
