//! 終了コードの決め方
//!
//! `ApiError` / `DomainError` / `ConfigError` はそれぞれ `severity()` で
//! ここの分類を返し、main.rs がエラーチェーンを辿って終了コードにする。
//! 各層から参照されるため、このモジュール自身は crate 内の何にも依存しない。

use serde::Serialize;
use std::fmt;

/// 失敗の分類
///
/// 誰が直せるか（利用者の入力、設定と認証情報、外部）で分け、
/// それぞれに終了コードを1つ割り当てる。`--machine` では
/// `user_error` / `config_error` / `system_error` として出力される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// 引数が悪い、または指定した動画が無い（exit 1）
    UserError,
    /// 認証情報が拒否された、無い、または config.toml が壊れている（exit 2）
    ConfigError,
    /// Field59 の障害、通信失敗、ローカルのファイル操作の失敗（exit 3）
    SystemError,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

// 人間向けエラー出力の見出しに使う
impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UserError => "invalid request",
            Self::ConfigError => "configuration or credentials",
            Self::SystemError => "vendor or network failure",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::ConfigError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::UserError.to_string(), "invalid request");
        assert_eq!(
            ErrorSeverity::ConfigError.to_string(),
            "configuration or credentials"
        );
        assert_eq!(
            ErrorSeverity::SystemError.to_string(),
            "vendor or network failure"
        );
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_value([
            ErrorSeverity::UserError,
            ErrorSeverity::ConfigError,
            ErrorSeverity::SystemError,
        ])
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!(["user_error", "config_error", "system_error"])
        );
    }
}
