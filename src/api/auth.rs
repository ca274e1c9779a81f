/// 認証情報
///
/// Field59 の HTTP Basic 認証に使う (identifier, secret) の組。
/// 呼び出しごとに渡される値であり、トランスポート層はこれを保持しない。
use base64::{Engine as _, engine::general_purpose};
use std::fmt;

/// 認証情報を読む環境変数
pub const USER_ENV: &str = "FIELD59_USER";
pub const PASSWORD_ENV: &str = "FIELD59_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// 新しい認証情報を作成
    ///
    /// # Arguments
    /// * `identifier` - Field59 のユーザー名
    /// * `secret` - Field59 のパスワード
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// 環境変数から認証情報を読む
    ///
    /// どちらかが未設定または空なら None。
    /// 前後の空白を除くのは identifier だけで、secret は値のまま使う。
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let identifier = lookup(USER_ENV)?.trim().to_string();
        let secret = lookup(PASSWORD_ENV)?;
        if identifier.is_empty() || secret.is_empty() {
            return None;
        }
        Some(Self::new(identifier, secret))
    }

    /// HTTP Basic認証ヘッダーの値を生成
    ///
    /// # Returns
    /// "Basic <base64(identifier:secret)>" 形式の文字列
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.identifier, self.secret);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// identifier をマスキングして表示
    pub fn masked_identifier(&self) -> String {
        let chars: Vec<char> = self.identifier.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }
}

// secret をログやパニックメッセージに出さない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.masked_identifier())
            .field("secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_auth_header_generation() {
        let credentials = Credentials::new("my_user", "my_password");

        let header = credentials.basic_auth_header();
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        let decoded_str = String::from_utf8(decoded).unwrap();

        assert_eq!(decoded_str, "my_user:my_password");
    }

    #[test]
    fn test_identifier_masking() {
        let credentials = Credentials::new("abcdef123456789", "secret");

        let masked = credentials.masked_identifier();
        assert_eq!(masked, "abcd***6789");
        assert!(!masked.contains("ef12345"));
    }

    #[test]
    fn test_short_identifier_masking() {
        let credentials = Credentials::new("short", "secret");
        assert_eq!(credentials.masked_identifier(), "*****");
    }

    #[test]
    fn test_debug_hides_secret() {
        let credentials = Credentials::new("someone@example.com", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("someone@example.com"));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> =
            HashMap::from([(USER_ENV, " editor "), (PASSWORD_ENV, "pw")]);
        let credentials =
            Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(credentials, Credentials::new("editor", "pw"));
    }

    #[test]
    fn test_from_lookup_keeps_secret_verbatim() {
        let env: HashMap<&str, &str> =
            HashMap::from([(USER_ENV, "editor"), (PASSWORD_ENV, " pass word ")]);
        let credentials =
            Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(credentials, Credentials::new("editor", " pass word "));

        let decoded = general_purpose::STANDARD
            .decode(credentials.basic_auth_header().strip_prefix("Basic ").unwrap())
            .unwrap();
        assert_eq!(decoded, b"editor: pass word ");
    }

    #[test]
    fn test_from_lookup_requires_both_values() {
        let env: HashMap<&str, &str> = HashMap::from([(USER_ENV, "editor"), (PASSWORD_ENV, "")]);
        assert!(Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).is_none());
        assert!(Credentials::from_lookup(|_| None).is_none());
    }
}
