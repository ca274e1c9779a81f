use crate::api::source::VideoSource;
use crate::commands::result::{CommandResult, ListResult};
use crate::domain::video::{CanonicalVideo, map_to_canonical};
use anyhow::{Context, Result};

/// 一覧コマンドを実行する
///
/// 取得元から最大 `limit` 件の動画を取得し、すべて正規形に変換します。
/// 変換は失敗しないため、取得した動画が落ちることはありません。
///
/// # エラー
/// アプリケーション層としてanyhow::Resultを返し、
/// インフラ層のエラーにコンテキストを付けて返します。
pub async fn execute(source: &VideoSource, limit: u32) -> Result<CommandResult> {
    let videos: Vec<CanonicalVideo> = source
        .list_videos(limit)
        .await
        .context("Failed to fetch videos list")?
        .into_iter()
        .map(map_to_canonical)
        .collect();

    let total_count = videos.len();

    Ok(CommandResult::List(ListResult {
        source: source.label().to_string(),
        videos,
        total_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_from_mock() {
        let source = VideoSource::mock();
        let result = execute(&source, 50).await.unwrap();

        match result {
            CommandResult::List(list) => {
                assert_eq!(list.source, "mock");
                assert_eq!(list.total_count, 3);
                assert_eq!(list.videos[0].id, "mock-ocean-timelapse");
                assert_eq!(list.videos[0].duration, Some(150));
                // url が空なのでアダプティブストリームに落ちる
                assert_eq!(
                    list.videos[1].url,
                    "https://samples.example.com/city-traffic.m3u8"
                );
                assert_eq!(list.videos[2].thumbnail, None);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let source = VideoSource::mock();
        match execute(&source, 1).await.unwrap() {
            CommandResult::List(list) => assert_eq!(list.total_count, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
