use crate::api::source::VideoSource;
use crate::commands::result::{CommandResult, CreateResult};
use crate::domain::validator;
use anyhow::{Context, Result};

/// URL取り込みで動画を作成するコマンドを実行する
///
/// # 引数
/// * `source_url` - ベンダーにダウンロードさせる動画のURL
/// * `title` - 動画タイトル（省略可）
///
/// 同じURLで2回実行すると、ベンダー側に別々の動画が2つできます。
pub async fn execute(
    source: &VideoSource,
    source_url: &str,
    title: Option<&str>,
) -> Result<CommandResult> {
    let url = validator::validate_source_url(source_url).context("Invalid source URL")?;
    let title = title.map(str::trim).filter(|t| !t.is_empty());

    let key = source
        .create_video_from_url(url.as_str(), title)
        .await
        .context("Failed to create video")?;

    Ok(CommandResult::Create(CreateResult {
        source: source.label().to_string(),
        key,
        source_url: url.to_string(),
        title: title.map(str::to_string),
    }))
}
