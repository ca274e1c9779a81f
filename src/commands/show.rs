use crate::api::error::ApiError;
use crate::api::source::VideoSource;
use crate::commands::result::{CommandResult, ShowResult};
use crate::domain::validator;
use crate::domain::video::map_to_canonical;
use anyhow::{Context, Result};

/// 動画詳細を表示するコマンドを実行する
///
/// # 引数
/// * `key` - 取得する動画のキー
///
/// # エラー
/// 取得元が「存在しない」と返した場合は `ApiError::NotFound` として報告します。
pub async fn execute(source: &VideoSource, key: &str) -> Result<CommandResult> {
    let key = validator::validate_video_key(key).context("Invalid video key")?;

    let video = source
        .get_video(key)
        .await
        .context("Failed to fetch video details")?
        .ok_or_else(|| ApiError::not_found(key))?;

    Ok(CommandResult::Show(ShowResult {
        source: source.label().to_string(),
        video: map_to_canonical(video),
    }))
}
