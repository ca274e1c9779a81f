mod api;
mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod presentation;

use api::error::ApiError;
use config::APP_CONFIG;
use config::error::ConfigError;
use domain::error::DomainError;
use error_severity::ErrorSeverity;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let machine_output = cli::is_machine_output(&args);

    if let Err(e) = cli::run(&args).await {
        handle_error(e, machine_output);
    }
}

/// ログ出力の初期化
///
/// `RUST_LOG` があればそれを使い、無ければ既定のレベル。
/// stdout は結果出力用なのでログは stderr へ。
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let severity = determine_severity(&error);
    let hint = get_error_hint(&error);

    presentation::output::output_error(&error, severity, hint, machine_output);

    std::process::exit(severity.map_or(1, ErrorSeverity::exit_code));
}

/// エラーチェーンから重要度を決定
fn determine_severity(error: &anyhow::Error) -> Option<ErrorSeverity> {
    error.chain().find_map(|cause| {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return Some(domain_err.severity());
        }
        if let Some(api_err) = cause.downcast_ref::<ApiError>() {
            return Some(api_err.severity());
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return Some(config_err.severity());
        }
        None
    })
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<&str> {
    error.chain().find_map(|cause| {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.hint();
        }
        if let Some(api_err) = cause.downcast_ref::<ApiError>() {
            return api_err.hint();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.hint();
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_severity_found_through_context() {
        let error = Err::<(), _>(ApiError::not_found("abc"))
            .context("Failed to fetch video details")
            .context("Show command failed")
            .unwrap_err();

        assert_eq!(determine_severity(&error), Some(ErrorSeverity::UserError));
    }

    #[test]
    fn test_credentials_error_is_config_error() {
        let error = anyhow::Error::from(ConfigError::credentials_missing("none"));
        assert_eq!(determine_severity(&error), Some(ErrorSeverity::ConfigError));
        assert!(get_error_hint(&error).is_some());
    }

    #[test]
    fn test_unknown_error_has_no_severity() {
        let error = anyhow::anyhow!("Unknown command: 'foo'");
        assert_eq!(determine_severity(&error), None);
        assert_eq!(get_error_hint(&error), None);
    }
}
