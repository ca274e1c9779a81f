use crate::api::source::VideoSource;
use crate::commands::result::{CommandResult, DeleteResult};
use crate::domain::validator;
use anyhow::{Context, Result};

/// 削除コマンドを実行する
///
/// 指定されたキーの動画を取得元から削除します。
/// 確認プロンプトはプレゼンテーション層が呼び出し前に済ませます。
///
/// # 引数
/// * `key` - 削除対象の動画キー
pub async fn execute(source: &VideoSource, key: &str) -> Result<CommandResult> {
    let key = validator::validate_video_key(key).context("Invalid video key")?;

    source
        .delete_video(key)
        .await
        .with_context(|| format!("Failed to delete video {}", key))?;

    Ok(CommandResult::Delete(DeleteResult {
        source: source.label().to_string(),
        key: key.to_string(),
        deleted: true,
    }))
}

/// 確認で取り消された削除の結果
pub fn cancelled(source: &VideoSource, key: &str) -> CommandResult {
    CommandResult::Delete(DeleteResult {
        source: source.label().to_string(),
        key: key.to_string(),
        deleted: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;

    #[tokio::test]
    async fn test_delete_from_mock() {
        let source = VideoSource::mock();
        let result = execute(&source, "mock-city-traffic").await.unwrap();

        match result {
            CommandResult::Delete(delete) => {
                assert!(delete.deleted);
                assert_eq!(delete.key, "mock-city-traffic");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(source.get_video("mock-city-traffic").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let source = VideoSource::mock();
        let error = execute(&source, "unknown").await.unwrap_err();
        assert!(error
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::NotFound { .. }))));
    }

    #[test]
    fn test_cancelled_result() {
        let source = VideoSource::mock();
        match cancelled(&source, "k") {
            CommandResult::Delete(delete) => assert!(!delete.deleted),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
