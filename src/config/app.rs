/// アプリケーション設定モジュール
///
/// コンパイル時に決まる静的設定を定数として保持します。
/// 実行時に変更したい値（エンドポイントの上書き等）は `UserConfig` 側で扱います。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub video: VideoConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// Field59 API のベースURL
    pub endpoint: &'static str,

    /// 全エンドポイントに共通するパスのプレフィックス
    pub path_prefix: &'static str,

    /// 一覧取得の既定件数
    pub default_list_limit: u32,

    /// User-Agent ヘッダー
    pub user_agent: &'static str,
}

/// 動画モデル関連の設定
#[derive(Debug, Clone, Copy)]
pub struct VideoConfig {
    /// 正規化後の動画に付与する唯一の出力フォーマット
    pub output_format: &'static str,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG が未設定のときに使うフィルタ (trace, debug, info, warn, error)
    pub level: &'static str,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://api.field59.com",
        path_prefix: "/v2",
        default_list_limit: 50,
        user_agent: concat!("vam/", env!("CARGO_PKG_VERSION")),
    },
    video: VideoConfig {
        output_format: "mp4",
    },
    logging: LoggingConfig { level: "warn" },
};
