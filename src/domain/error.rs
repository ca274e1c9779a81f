/// ドメイン層のエラー定義
///
/// ユーザー入力がドメインの制約を満たさない場合のエラー。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// 動画キーが不正
    #[error("invalid video key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// 取り込み元URLが不正
    #[error("invalid source URL '{url}': {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    /// 取得件数が不正
    #[error("invalid limit '{value}': must be a positive integer")]
    InvalidLimit { value: String },
}

impl DomainError {
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_source_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSourceUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidKey { .. } | Self::InvalidSourceUrl { .. } | Self::InvalidLimit { .. } => {
                ErrorSeverity::UserError
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidKey { .. } => Some("Run 'vam list' to see the available video keys."),
            Self::InvalidSourceUrl { .. } => {
                Some("Pass an absolute http(s) URL that Field59 can download, e.g. https://example.com/clip.mp4")
            }
            Self::InvalidLimit { .. } => Some("Example: vam list --limit 20"),
        }
    }
}
