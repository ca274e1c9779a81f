/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::config::UserConfig;
use crate::domain::video::CanonicalVideo;
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    List(ListResult),
    Show(ShowResult),
    Create(CreateResult),
    Delete(DeleteResult),
    Config(ConfigResult),
    Help,
}

/// 一覧コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    /// 取得元（field59 / mock）
    pub source: String,
    /// ベンダーの並び順のまま
    pub videos: Vec<CanonicalVideo>,
    pub total_count: usize,
}

/// 詳細コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ShowResult {
    pub source: String,
    pub video: CanonicalVideo,
}

/// 作成コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
    pub source: String,
    /// ベンダーが割り当てた動画キー
    pub key: String,
    pub source_url: String,
    pub title: Option<String>,
}

/// 削除コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub source: String,
    pub key: String,
    /// 確認プロンプトで取り消された場合は false
    pub deleted: bool,
}

/// 設定コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub path: String,
    pub config: UserConfig,
    /// 今回の実行で設定を書き換えたか
    pub updated: bool,
}
