/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読、stderr）または
/// 機械向け（JSON、stdout）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use crate::domain::formatter::{format_duration, format_timestamp};
use crate::domain::video::CanonicalVideo;
use crate::error_severity::ErrorSeverity;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "vam - Video Asset Manager
List, inspect, import and delete Field59 videos from the command line

Usage:
  vam [--machine] [--mock] [--stdin] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases
  --mock           - Use the built-in mock dataset instead of Field59
  --stdin          - Read credentials from standard input
                     Format: line 1 = username, line 2 = password

Credentials:
  FIELD59_USER / FIELD59_PASSWORD are used when set. Otherwise vam asks
  for them interactively. Credentials are never written to disk.

Available commands:
  list [--limit N]             - List videos (newest first)
  show <key>                   - Show detailed information about a video
  create <url> [--title T]     - Import a video from a URL
  delete <key> [--force]       - Delete a video
                                 --force: Skip confirmation prompt
  config [--limit N] [--endpoint URL | --reset-endpoint] [--timezone SECONDS]
                               - Show or update user configuration
  help                         - Display this help message

Error Output:
  Normal mode:   Human-readable error messages to stderr
  --machine:     JSON error object with exit_code and hint fields";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Arguments
/// * `result` - コマンド実行結果
/// * `machine_output` - 機械可読出力フラグ
/// * `timezone_offset_seconds` - 人間向け出力で日時を表示するオフセット
pub fn output_result(
    result: &CommandResult,
    machine_output: bool,
    timezone_offset_seconds: i32,
) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result)?);
    } else {
        output_human_readable(result, timezone_offset_seconds);
    }

    Ok(())
}

/// エラーを出力する
///
/// * `machine_output = false`: エラーチェーンとヒントを stderr へ
/// * `machine_output = true`: JSON のエラーオブジェクトを stdout へ
pub fn output_error(
    error: &anyhow::Error,
    severity: Option<ErrorSeverity>,
    hint: Option<&str>,
    machine_output: bool,
) {
    let exit_code = severity.map_or(1, ErrorSeverity::exit_code);

    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "severity": severity,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        return;
    }

    match severity {
        Some(severity) => eprintln!("Error ({}): {}", severity, error),
        None => eprintln!("Error: {}", error),
    }

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// stdout はパイプライン用に空けておく。
fn output_human_readable(result: &CommandResult, offset: i32) {
    match result {
        CommandResult::List(r) => {
            eprintln!();
            if r.total_count == 0 {
                eprintln!("No videos found.");
                eprintln!("Import your first video with 'vam create <url>'");
                return;
            }

            eprintln!("Found {} video(s) [{}]:", r.total_count, r.source);
            eprintln!();
            for (idx, video) in r.videos.iter().enumerate() {
                eprintln!("---");
                eprintln!("Video #{}", idx + 1);
                print_summary(video, offset);
            }
            eprintln!("---");
        }
        CommandResult::Show(r) => {
            eprintln!();
            eprintln!("Video Details [{}]", r.source);
            eprintln!("=============");
            print_summary(&r.video, offset);
            eprintln!("Format:         {}", r.video.format);

            if let Some(metadata) = &r.video.vendor_metadata {
                eprintln!();
                eprintln!("Field59 Metadata:");
                eprintln!("----------------");
                print_if_present("Category:", &metadata.category);
                if !metadata.tags.is_empty() {
                    eprintln!("Tags:           {}", metadata.tags.join(", "));
                }
                if !metadata.playlists.is_empty() {
                    eprintln!("Playlists:      {}", metadata.playlists.join(", "));
                }
                print_if_present("Stream:", &metadata.adaptive_stream);
                print_if_present("Summary:", &metadata.summary);
                print_if_present("Description:", &metadata.description);
                print_if_present("Owner:", &metadata.owner);
                print_if_present("User:", &metadata.user);
                print_if_present("Modified:", &metadata.last_modified_date);
                print_if_present("Live Date:", &metadata.live_date);
            }
            eprintln!();
        }
        CommandResult::Create(r) => {
            eprintln!();
            eprintln!("✓ Video created [{}]", r.source);
            eprintln!("Key:    {}", r.key);
            eprintln!("Source: {}", r.source_url);
            if let Some(title) = &r.title {
                eprintln!("Title:  {}", title);
            }
            eprintln!();
            eprintln!("Field59 processes the import in the background.");
            eprintln!("Run 'vam show {}' to check the result.", r.key);
        }
        CommandResult::Delete(r) => {
            eprintln!();
            if r.deleted {
                eprintln!("✓ Video deleted successfully!");
                eprintln!("Key: {}", r.key);
            } else {
                eprintln!("Deletion cancelled.");
            }
        }
        CommandResult::Config(r) => {
            eprintln!();
            if r.updated {
                eprintln!("✓ Configuration saved.");
            }
            eprintln!("Config file:   {}", r.path);
            eprintln!("API endpoint:  {}", r.config.endpoint());
            eprintln!("List limit:    {}", r.config.list_limit);
            eprintln!("TZ offset (s): {}", r.config.timezone_offset_seconds);
        }
        CommandResult::Help => {
            eprintln!("{}", HELP_TEXT);
        }
    }
}

fn print_summary(video: &CanonicalVideo, offset: i32) {
    eprintln!("Key:            {}", video.id);
    if !video.title.is_empty() {
        eprintln!("Title:          {}", video.title);
    }
    match video.duration {
        Some(duration) => eprintln!("Duration:       {}", format_duration(duration)),
        None => eprintln!("Duration:       unknown"),
    }
    if !video.url.is_empty() {
        eprintln!("URL:            {}", video.url);
    }
    if let Some(thumbnail) = &video.thumbnail {
        eprintln!("Thumbnail:      {}", thumbnail);
    }
    eprintln!("Created At:     {}", format_timestamp(&video.created_at, offset));
}

fn print_if_present(label: &str, value: &str) {
    if !value.is_empty() {
        eprintln!("{:<15} {}", label, value);
    }
}

/// 機械可読JSONを生成
///
/// `CommandResult` のシリアライズ結果に `success: true` を加える。
fn machine_readable(result: &CommandResult) -> Result<String> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(serde_json::to_string(&json)?)
}
