/// インフラ層のエラー定義とエラー分類
///
/// ベンダーAPIとの通信失敗を、呼び出し元が扱える少数の種類に分類する。
/// 分類はHTTPステータスと通信エラーの有無だけで決め、
/// ベンダー側の本当の失敗理由を推測しない。
use crate::api::xml;
use crate::error_severity::ErrorSeverity;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// トランスポート層が発行する操作の種類
///
/// 404 をどう解釈するかは操作によって異なる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Delete,
}

impl Operation {
    /// 404 を NotFound として報告する操作か
    ///
    /// 一覧取得は 404 にならない前提のため、届いた場合は VendorError 扱い。
    pub fn reports_not_found(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list videos"),
            Self::Get => write!(f, "get video"),
            Self::Create => write!(f, "create video"),
            Self::Delete => write!(f, "delete video"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// 認証情報が拒否された (HTTP 401)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// 対象の動画が存在しない (get/delete の HTTP 404)
    #[error("video not found: {key}")]
    NotFound { key: String },

    /// その他のHTTPエラー
    #[error("vendor error (HTTP {status}): {message}")]
    Vendor { status: u16, message: String },

    /// HTTPレスポンスが得られなかった（接続拒否、DNS失敗、タイムアウト等）
    #[error("network error: {cause}")]
    Network { cause: String },

    /// 作成レスポンスに key 要素が無かった
    #[error("create response did not contain a video key")]
    MissingKey,
}

impl ApiError {
    /// ネットワークエラーを作成
    pub fn network(cause: impl Into<String>) -> Self {
        Self::Network {
            cause: cause.into(),
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCredentials => ErrorSeverity::ConfigError,
            Self::NotFound { .. } => ErrorSeverity::UserError,
            Self::Vendor { .. } | Self::Network { .. } | Self::MissingKey => {
                ErrorSeverity::SystemError
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials => {
                Some("Check FIELD59_USER and FIELD59_PASSWORD and try again.")
            }
            Self::NotFound { .. } => Some("Run 'vam list' to see the available video keys."),
            Self::Network { .. } => {
                Some("Check your network connection or the api_endpoint in config.toml.")
            }
            Self::Vendor { .. } | Self::MissingKey => None,
        }
    }
}

/// HTTPステータスが失敗だったレスポンスを分類する
///
/// # Arguments
/// * `operation` - 失敗した操作
/// * `key` - 対象の動画キー（一覧・作成では操作名を渡す）
/// * `status` - HTTPステータスコード
/// * `body` - レスポンスボディ（読めなかった場合は空文字列）
pub fn classify_status(operation: Operation, key: &str, status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::InvalidCredentials,
        404 if operation.reports_not_found() => ApiError::not_found(key),
        _ => {
            let message = xml::parse_error_message(body)
                .unwrap_or_else(|| format!("{} failed with HTTP {}", operation, status));
            warn!(%operation, status, %message, "vendor returned an error");
            ApiError::Vendor { status, message }
        }
    }
}

/// レスポンス自体が得られなかった失敗を分類する
pub fn classify_transport(operation: Operation, error: &reqwest::Error) -> ApiError {
    let cause = if error.is_timeout() {
        format!("{} timed out", operation)
    } else if error.is_connect() {
        format!("connection failed during {}: {}", operation, error)
    } else {
        format!("{} request failed: {}", operation, error)
    };
    warn!(%operation, %cause, "no response from vendor");
    ApiError::network(cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_invalid_credentials_for_every_operation() {
        for op in [
            Operation::List,
            Operation::Get,
            Operation::Create,
            Operation::Delete,
        ] {
            assert!(matches!(
                classify_status(op, "abc", 401, ""),
                ApiError::InvalidCredentials
            ));
        }
    }

    #[test]
    fn test_404_is_not_found_only_for_get_and_delete() {
        assert!(matches!(
            classify_status(Operation::Get, "abc", 404, ""),
            ApiError::NotFound { ref key } if key == "abc"
        ));
        assert!(matches!(
            classify_status(Operation::Delete, "abc", 404, ""),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            classify_status(Operation::List, "search", 404, ""),
            ApiError::Vendor { status: 404, .. }
        ));
        assert!(matches!(
            classify_status(Operation::Create, "create", 404, ""),
            ApiError::Vendor { status: 404, .. }
        ));
    }

    #[test]
    fn test_vendor_message_taken_from_error_payload() {
        let body = "<error><code>42</code><message><![CDATA[Quota exceeded]]></message></error>";
        match classify_status(Operation::List, "search", 500, body) {
            ApiError::Vendor { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_body_falls_back_to_generic_message() {
        match classify_status(Operation::Create, "create", 502, "<html><body>Bad") {
            ApiError::Vendor { message, .. } => {
                assert_eq!(message, "create video failed with HTTP 502");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(
            ApiError::InvalidCredentials.severity(),
            ErrorSeverity::ConfigError
        );
        assert_eq!(ApiError::not_found("x").severity(), ErrorSeverity::UserError);
        assert_eq!(ApiError::network("x").severity(), ErrorSeverity::SystemError);
        assert_eq!(ApiError::MissingKey.severity(), ErrorSeverity::SystemError);
    }
}
