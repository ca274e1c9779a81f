/// メモリ上のモックカタログ
///
/// ベンダーにアクセスできない環境向けに、同梱のXMLフィクスチャを
/// 本番と同じパーサで読み込んだ動画一覧を提供する。
/// 変更はプロセス内でのみ有効で、終了時に破棄される。
use crate::api::error::ApiError;
use crate::api::types::VendorVideo;
use crate::api::xml;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// 初期データ
const MOCK_DATASET: &str = include_str!("../../assets/mock_videos.xml");

#[derive(Debug)]
pub struct MockCatalog {
    videos: Mutex<Vec<VendorVideo>>,
    next_id: AtomicU64,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::from_xml(MOCK_DATASET)
    }
}

impl MockCatalog {
    /// XMLドキュメントからカタログを作成
    pub fn from_xml(document: &str) -> Self {
        Self {
            videos: Mutex::new(xml::parse_videos(document)),
            next_id: AtomicU64::new(1),
        }
    }

    fn videos(&self) -> MutexGuard<'_, Vec<VendorVideo>> {
        self.videos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn list_videos(&self, limit: u32) -> Result<Vec<VendorVideo>, ApiError> {
        Ok(self
            .videos()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    pub async fn get_video(&self, key: &str) -> Result<Option<VendorVideo>, ApiError> {
        Ok(self.videos().iter().find(|v| v.key == key).cloned())
    }

    /// 動画を追加し、新しいキーを返す
    ///
    /// 新しい動画は一覧の先頭に入る。
    pub async fn create_video_from_url(
        &self,
        source_url: &str,
        title: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut videos = self.videos();
        let key = loop {
            let candidate = format!("mock-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
            if !videos.iter().any(|v| v.key == candidate) {
                break candidate;
            }
        };

        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        videos.insert(
            0,
            VendorVideo {
                key: key.clone(),
                title: title.unwrap_or_default().to_string(),
                url: source_url.to_string(),
                created_date: now.clone(),
                last_modified_date: now,
                ..VendorVideo::default()
            },
        );

        info!(%key, "mock video created");
        Ok(key)
    }

    pub async fn delete_video(&self, key: &str) -> Result<(), ApiError> {
        let mut videos = self.videos();
        let index = videos
            .iter()
            .position(|v| v.key == key)
            .ok_or_else(|| ApiError::not_found(key))?;
        videos.remove(index);

        info!(key, "mock video deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_dataset_is_loaded() {
        let catalog = MockCatalog::default();
        let videos = catalog.list_videos(50).await.unwrap();
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].key, "mock-ocean-timelapse");
        assert_eq!(videos[0].tags, vec!["ocean", "timelapse"]);
        assert!(videos[1].playlists.is_empty());
    }

    #[tokio::test]
    async fn test_limit_is_applied() {
        let catalog = MockCatalog::default();
        assert_eq!(catalog.list_videos(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_get_and_delete() {
        let catalog = MockCatalog::default();

        let key = catalog
            .create_video_from_url("https://example.com/new.mp4", Some("New"))
            .await
            .unwrap();
        let listed = catalog.list_videos(50).await.unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0].key, key);

        let fetched = catalog.get_video(&key).await.unwrap().unwrap();
        assert_eq!(fetched.title, "New");
        assert_eq!(fetched.url, "https://example.com/new.mp4");

        catalog.delete_video(&key).await.unwrap();
        assert!(catalog.get_video(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_repeated_create_makes_distinct_videos() {
        let catalog = MockCatalog::from_xml("<search/>");
        let a = catalog
            .create_video_from_url("https://example.com/a.mp4", None)
            .await
            .unwrap();
        let b = catalog
            .create_video_from_url("https://example.com/a.mp4", None)
            .await
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(catalog.list_videos(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let catalog = MockCatalog::default();
        let result = catalog.delete_video("nope").await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }
}
