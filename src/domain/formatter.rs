/// ドメインサービス: 表示用フォーマット
///
/// 正規化済みの日時・再生時間を人間向けの文字列に変換する。
/// タイムゾーンはユーザー設定のオフセットに従う。
use chrono::{DateTime, FixedOffset, Utc};

/// ISO-8601 の日時をユーザー設定のオフセットでフォーマット
///
/// # 引数
/// * `iso` - ISO-8601 / RFC 3339 形式の日時
/// * `offset_seconds` - UTCからのオフセット（秒）
///
/// # 戻り値
/// - UTC: "2024-12-01 14:30:45 UTC"
/// - それ以外: "2024-12-01 23:30:45 +09:00"
///
/// パースできない場合は元の文字列をそのまま返します。
pub fn format_timestamp(iso: &str, offset_seconds: i32) -> String {
    let datetime = match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => return iso.to_string(),
    };

    if offset_seconds == 0 {
        return datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }

    match FixedOffset::east_opt(offset_seconds) {
        Some(offset) => datetime
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
        None => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

/// 秒数を "H:MM:SS" または "M:SS" にフォーマット
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
