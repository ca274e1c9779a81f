/// ドメインモデル: 正規化済みの動画
///
/// ベンダーのスキーマから切り離したアプリケーション内部の動画表現と、
/// `VendorVideo` からの変換（スキーママッパー）を定義する。
/// 変換は全域関数で、壊れたベンダーレコードからも最善の結果を作る。
use crate::api::types::VendorVideo;
use crate::config::APP_CONFIG;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

/// 処理状態
///
/// マッパーからはベンダーの処理状況が見えないため、常に Ready。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Ready,
}

/// 正規形に載らないベンダー固有の項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorMetadata {
    pub key: String,
    pub category: String,
    pub tags: Vec<String>,
    pub adaptive_stream: String,
    pub summary: String,
    pub description: String,
    pub playlists: Vec<String>,
    pub last_modified_date: String,
    pub live_date: String,
    pub owner: String,
    pub user: String,
}

/// アプリケーション内部の動画表現
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalVideo {
    /// ベンダーキーと同一
    pub id: String,
    pub title: String,
    /// 再生URL（直接URL優先、無ければアダプティブストリーム）
    pub url: String,
    /// サムネイル（中サイズ優先、無ければフルサイズ）
    pub thumbnail: Option<String>,
    /// 再生時間（整数秒）。解釈できなければ None
    pub duration: Option<u64>,
    /// 作成日時（ISO-8601）
    pub created_at: String,
    pub format: String,
    pub status: VideoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_metadata: Option<VendorMetadata>,
}

/// ベンダー形式の動画を正規形に変換する
///
/// 作成日時が無い場合は現在時刻を使う。
pub fn map_to_canonical(video: VendorVideo) -> CanonicalVideo {
    map_to_canonical_at(video, Utc::now())
}

/// 現在時刻を指定して変換する
pub fn map_to_canonical_at(video: VendorVideo, now: DateTime<Utc>) -> CanonicalVideo {
    let duration = parse_duration(&video.duration);
    let created_at = normalize_timestamp(&video.created_date).unwrap_or_else(|| to_iso(now));
    let url = non_empty(&video.url)
        .or_else(|| non_empty(&video.adaptive_stream))
        .unwrap_or_default();
    let thumbnail = non_empty(&video.thumbnail_medium).or_else(|| non_empty(&video.thumbnail));

    CanonicalVideo {
        id: video.key.clone(),
        title: video.title,
        url,
        thumbnail,
        duration,
        created_at,
        format: APP_CONFIG.video.output_format.to_string(),
        status: VideoStatus::Ready,
        vendor_metadata: Some(VendorMetadata {
            key: video.key,
            category: video.category,
            tags: video.tags,
            adaptive_stream: video.adaptive_stream,
            summary: video.summary,
            description: video.description,
            playlists: video.playlists,
            last_modified_date: video.last_modified_date,
            live_date: video.live_date,
            owner: video.owner,
            user: video.user,
        }),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// ベンダーの再生時間文字列を整数秒に変換する
///
/// 1. 数字（と小数点）だけの文字列はそのまま秒数
/// 2. `H:M:S` → H*3600 + M*60 + S
/// 3. `M:S` → M*60 + S
///
/// それ以外（空、区切りの数が違う、数値でない部分がある）は None。
/// 小数の秒は四捨五入する。
pub fn parse_duration(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(seconds) = parse_number(trimmed) {
        return Some(seconds.round() as u64);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let total = match parts.as_slice() {
        [h, m, s] => parse_number(h)? * 3600.0 + parse_number(m)? * 60.0 + parse_number(s)?,
        [m, s] => parse_number(m)? * 60.0 + parse_number(s)?,
        _ => return None,
    };
    Some(total.round() as u64)
}

fn parse_number(part: &str) -> Option<f64> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    part.parse::<f64>().ok()
}

/// ベンダーの日時文字列をISO-8601に揃える
///
/// RFC 3339、`YYYY-MM-DD HH:MM:SS`（UTCとみなす）、Unix秒を解釈する。
/// どれにも当てはまらなければ元の文字列をそのまま返す。空なら None。
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .or_else(|| {
            trimmed
                .parse::<i64>()
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        });

    Some(parsed.map(to_iso).unwrap_or_else(|| trimmed.to_string()))
}

fn to_iso(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_parse_duration_shapes() {
        assert_eq!(parse_duration("125"), Some(125));
        assert_eq!(parse_duration("02:05"), Some(125));
        assert_eq!(parse_duration("01:02:05"), Some(3725));
        assert_eq!(parse_duration("12.6"), Some(13));
        assert_eq!(parse_duration(" 60 "), Some(60));
    }

    #[test]
    fn test_parse_duration_unknown_shapes_are_absent() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("bad"), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
        assert_eq!(parse_duration("01::05"), None);
        assert_eq!(parse_duration("-5"), None);
        assert_eq!(parse_duration("1.2.3"), None);
    }

    #[test]
    fn test_mapping_uses_key_as_id() {
        let video = VendorVideo {
            key: "abc123".to_string(),
            ..VendorVideo::default()
        };
        let canonical = map_to_canonical(video);
        assert_eq!(canonical.id, "abc123");
        assert_eq!(canonical.vendor_metadata.unwrap().key, "abc123");
    }

    #[test]
    fn test_mapping_empty_record_is_total() {
        let canonical = map_to_canonical_at(VendorVideo::default(), fixed_now());
        assert_eq!(canonical.id, "");
        assert_eq!(canonical.url, "");
        assert_eq!(canonical.thumbnail, None);
        assert_eq!(canonical.duration, None);
        assert_eq!(canonical.created_at, "2025-01-02T03:04:05.000Z");
        assert_eq!(canonical.format, "mp4");
        assert_eq!(canonical.status, VideoStatus::Ready);
    }

    #[test]
    fn test_url_falls_back_to_adaptive_stream() {
        let video = VendorVideo {
            adaptive_stream: "https://cdn.example.com/v.m3u8".to_string(),
            ..VendorVideo::default()
        };
        assert_eq!(map_to_canonical(video).url, "https://cdn.example.com/v.m3u8");

        let video = VendorVideo {
            url: "https://cdn.example.com/v.mp4".to_string(),
            adaptive_stream: "https://cdn.example.com/v.m3u8".to_string(),
            ..VendorVideo::default()
        };
        assert_eq!(map_to_canonical(video).url, "https://cdn.example.com/v.mp4");
    }

    #[test]
    fn test_thumbnail_prefers_medium_then_full() {
        let video = VendorVideo {
            thumbnail: "full.jpg".to_string(),
            thumbnail_medium: "medium.jpg".to_string(),
            thumbnail_small: "small.jpg".to_string(),
            ..VendorVideo::default()
        };
        assert_eq!(map_to_canonical(video).thumbnail.as_deref(), Some("medium.jpg"));

        let video = VendorVideo {
            thumbnail: "full.jpg".to_string(),
            thumbnail_small: "small.jpg".to_string(),
            ..VendorVideo::default()
        };
        assert_eq!(map_to_canonical(video).thumbnail.as_deref(), Some("full.jpg"));
    }

    #[test]
    fn test_created_at_normalization() {
        assert_eq!(
            normalize_timestamp("2024-03-01 12:30:00").as_deref(),
            Some("2024-03-01T12:30:00.000Z")
        );
        assert_eq!(
            normalize_timestamp("2024-03-01T21:30:00+09:00").as_deref(),
            Some("2024-03-01T12:30:00.000Z")
        );
        assert_eq!(
            normalize_timestamp("1764434950").as_deref(),
            Some("2025-11-29T16:49:10.000Z")
        );
        assert_eq!(
            normalize_timestamp("sometime last week").as_deref(),
            Some("sometime last week")
        );
        assert_eq!(normalize_timestamp("  "), None);
    }

    #[test]
    fn test_vendor_created_date_wins_over_now() {
        let video = VendorVideo {
            created_date: "2024-03-01 12:30:00".to_string(),
            ..VendorVideo::default()
        };
        let canonical = map_to_canonical_at(video, fixed_now());
        assert_eq!(canonical.created_at, "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_metadata_carries_unmapped_fields() {
        let video = VendorVideo {
            key: "k".to_string(),
            category: "News".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            playlists: vec!["p".to_string()],
            owner: "newsroom".to_string(),
            ..VendorVideo::default()
        };
        let metadata = map_to_canonical(video).vendor_metadata.unwrap();
        assert_eq!(metadata.category, "News");
        assert_eq!(metadata.tags, vec!["a", "b"]);
        assert_eq!(metadata.playlists, vec!["p"]);
        assert_eq!(metadata.owner, "newsroom");
    }

    #[test]
    fn test_list_then_map_scenario() {
        let xml = r#"<search>
            <video>
              <key>one</key>
              <url>https://cdn.example.com/one.mp4</url>
              <duration>01:00</duration>
              <thumb>https://cdn.example.com/one.jpg</thumb>
              <thumbMedium>https://cdn.example.com/one_m.jpg</thumbMedium>
            </video>
            <video>
              <key>two</key>
              <url>https://cdn.example.com/two.mp4</url>
              <duration>bad</duration>
            </video>
        </search>"#;

        let videos: Vec<CanonicalVideo> = crate::api::xml::parse_videos(xml)
            .into_iter()
            .map(map_to_canonical)
            .collect();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].duration, Some(60));
        assert_eq!(
            videos[0].thumbnail.as_deref(),
            Some("https://cdn.example.com/one_m.jpg")
        );
        assert_eq!(videos[1].duration, None);
        assert_eq!(videos[1].thumbnail, None);
    }
}
