/// ドメインサービス: 入力バリデーション
///
/// コマンド引数をベンダーに送る前に検証する。
use crate::domain::error::DomainError;
use reqwest::Url;

/// 動画キーを検証する
///
/// キーはURLパスにそのまま埋め込むため、空白・`/`・`?`・`#` を含められない。
pub fn validate_video_key(key: &str) -> Result<&str, DomainError> {
    let trimmed = key.trim();

    if trimmed.is_empty() {
        return Err(DomainError::invalid_key(key, "key cannot be empty"));
    }

    if trimmed.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#') {
        return Err(DomainError::invalid_key(
            key,
            "key cannot contain whitespace, '/', '?' or '#'",
        ));
    }

    Ok(trimmed)
}

/// 取り込み元URLを検証する
///
/// # エラー
/// - URLとして解釈できない
/// - http / https 以外のスキーム
/// - ホストが無い
pub fn validate_source_url(url: &str) -> Result<Url, DomainError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| DomainError::invalid_source_url(url, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DomainError::invalid_source_url(
            url,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::invalid_source_url(url, "missing host"));
    }

    Ok(parsed)
}

/// 取得件数を検証する
pub fn validate_limit(value: &str) -> Result<u32, DomainError> {
    match value.trim().parse::<u32>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(DomainError::InvalidLimit {
            value: value.to_string(),
        }),
    }
}
