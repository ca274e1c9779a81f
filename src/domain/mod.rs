//! ドメイン層
//!
//! - `video`: 正規化済み動画モデルとベンダー形式からの変換
//! - `validator`: コマンド入力の検証
//! - `formatter`: 表示用の日時・再生時間フォーマット
//! - `error`: ドメインエラー

pub mod error;
pub mod formatter;
pub mod validator;
pub mod video;
