/// プレゼンテーション層モジュール
///
/// コマンドの実行結果とユーザーとのやり取りを担当します。
/// プレゼンテーション層はドメイン層・インフラ層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `input`: 認証情報の取得と削除確認
/// - `output`: コマンド結果とエラーの出力（人間向け・機械向け）

pub mod input;
pub mod output;
