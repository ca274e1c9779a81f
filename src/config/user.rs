/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\vam\config.toml
/// macOS:   /Users/<User>/Library/Application Support/vam/config.toml
/// Linux:   /home/<user>/.config/vam/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
/// 認証情報はこのファイルには保存しません。
use crate::config::app::APP_CONFIG;
use crate::config::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの最大値（+18時間 = 64800秒）
const MAX_TIMEZONE_OFFSET: i32 = 64800;

/// タイムゾーンオフセットの最小値（-18時間 = -64800秒）
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// ユーザー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Field59 API のベースURL上書き（開発用プロキシ等）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// `list` の既定取得件数
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    /// タイムゾーンオフセット(秒単位)
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_seconds: i32,
}

// serde用
fn default_list_limit() -> u32 {
    APP_CONFIG.api.default_list_limit
}

fn default_timezone_offset() -> i32 {
    DEFAULT_TIMEZONE_OFFSET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_endpoint: None,
            list_limit: default_list_limit(),
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET,
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("vam").join("config.toml"))
    }

    /// 既定パスからユーザー設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    ///
    /// ファイルが存在しない場合はデフォルトテンプレートから作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// デフォルトTOML設定を生成
    fn default_toml_content() -> String {
        format!(
            r#"# Video Asset Manager - User Configuration
# Credentials are never stored here. Provide them with
# FIELD59_USER / FIELD59_PASSWORD or 'vam --stdin'.

# Override the Field59 API base URL (e.g. a local proxy)
# api_endpoint = "http://localhost:8080"

# Default number of videos fetched by 'vam list'
list_limit = {}

# Timezone offset in seconds
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
timezone_offset_seconds = {}
"#,
            default_list_limit(),
            DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// 指定パスにユーザー設定を保存する
    ///
    /// 保存前に検証し、不正な値はファイルに書き込まない。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - api_endpoint: http(s) の絶対URLであること
    /// - list_limit: 1以上
    /// - timezone_offset_seconds: ±18時間以内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.api_endpoint {
            Self::validate_endpoint(endpoint)?;
        }

        if self.list_limit == 0 {
            return Err(ConfigError::validation_error(
                "list_limit must be greater than 0",
            ));
        }

        Self::validate_timezone_offset(self.timezone_offset_seconds)
    }

    fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
        match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::validation_error(format!(
                "Invalid api_endpoint '{}'. Must be an absolute http(s) URL",
                endpoint
            ))),
        }
    }

    fn validate_timezone_offset(offset: i32) -> Result<(), ConfigError> {
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }
        Ok(())
    }

    /// 実際に使用するAPIベースURL
    ///
    /// 末尾の `/` は取り除く。
    pub fn endpoint(&self) -> String {
        self.api_endpoint
            .as_deref()
            .unwrap_or(APP_CONFIG.api.endpoint)
            .trim_end_matches('/')
            .to_string()
    }
}
