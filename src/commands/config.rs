/// 設定コマンド
///
/// ユーザー設定を表示し、引数があれば書き換えて保存します。
/// 認証情報はここでは扱いません。
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::user::UserConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// 設定の変更内容
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigUpdate {
    pub list_limit: Option<u32>,
    /// `Some(None)` はエンドポイント上書きの解除
    pub api_endpoint: Option<Option<String>>,
    pub timezone_offset_seconds: Option<i32>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, config: &mut UserConfig) {
        if let Some(limit) = self.list_limit {
            config.list_limit = limit;
        }
        if let Some(endpoint) = self.api_endpoint {
            config.api_endpoint = endpoint;
        }
        if let Some(offset) = self.timezone_offset_seconds {
            config.timezone_offset_seconds = offset;
        }
    }
}

/// 設定コマンドを実行
///
/// # 引数
/// * `path` - 設定ファイルのパス
/// * `update` - 変更内容（空なら表示のみ）
pub fn execute(path: &Path, update: ConfigUpdate) -> Result<CommandResult> {
    let mut config =
        UserConfig::load_from(path).context("Failed to load configuration file")?;

    let updated = !update.is_empty();
    if updated {
        update.apply(&mut config);
        config
            .save_to(path)
            .context("Failed to save configuration file")?;
    }

    Ok(CommandResult::Config(ConfigResult {
        path: path.display().to_string(),
        config,
        updated,
    }))
}
