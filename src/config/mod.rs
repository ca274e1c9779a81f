/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// let prefix = APP_CONFIG.api.path_prefix;
///
/// let user_config = UserConfig::load()?;
/// let base_url = user_config.endpoint();
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;
