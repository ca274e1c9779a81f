use crate::api::auth::Credentials;
use crate::api::source::VideoSource;
use crate::commands::{self, CommandResult, config::ConfigUpdate};
use crate::config::error::ConfigError;
use crate::config::UserConfig;
use crate::domain::validator;
use crate::presentation::{input, output};
use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use tracing::debug;

/// 全コマンド共通のフラグ
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlobalOptions {
    pub machine: bool,
    pub mock: bool,
    pub stdin: bool,
}

/// 値を取るフラグ
const VALUE_FLAGS: &[&str] = &["--limit", "--title", "--endpoint", "--timezone"];

/// グローバルフラグを取り除いたコマンド引数
struct CommandArgs<'a> {
    args: &'a [String],
}

impl<'a> CommandArgs<'a> {
    /// フラグとその値を除いた位置引数
    fn positional(&self, index: usize) -> Option<&'a str> {
        let mut positionals = Vec::new();
        let mut iter = self.args.iter();
        while let Some(arg) = iter.next() {
            if VALUE_FLAGS.contains(&arg.as_str()) {
                iter.next();
            } else if !arg.starts_with("--") {
                positionals.push(arg.as_str());
            }
        }
        positionals.get(index).copied()
    }

    fn has_flag(&self, name: &str) -> bool {
        self.args.iter().any(|a| a == name)
    }

    fn value(&self, name: &str) -> Result<Option<&'a str>> {
        match self.args.iter().position(|a| a == name) {
            None => Ok(None),
            Some(i) => match self.args.get(i + 1) {
                Some(v) if !v.starts_with("--") => Ok(Some(v.as_str())),
                _ => bail!("Flag '{}' requires a value", name),
            },
        }
    }

    /// 許可されていないフラグが無いことを確認
    fn ensure_flags(&self, command: &str, allowed: &[&str]) -> Result<()> {
        if let Some(unknown) = self
            .args
            .iter()
            .find(|a| a.starts_with("--") && !allowed.contains(&a.as_str()))
        {
            bail!("Unknown flag '{}' for '{}' command", unknown, command);
        }
        Ok(())
    }
}

/// `--machine` が指定されているか
///
/// エラー出力の形式を決めるため、引数解析より前に参照される。
pub fn is_machine_output(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| a == "--machine")
}

/// グローバルフラグとコマンド引数を分ける
pub fn split_global_flags(args: &[String]) -> (GlobalOptions, Vec<String>) {
    let mut options = GlobalOptions::default();
    let mut rest = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--machine" => options.machine = true,
            "--mock" => options.mock = true,
            "--stdin" => options.stdin = true,
            _ => rest.push(arg.clone()),
        }
    }

    (options, rest)
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
pub async fn run(args: &[String]) -> Result<()> {
    let (options, rest) = split_global_flags(args);

    let Some(command) = rest.first() else {
        output::print_usage();
        return Ok(());
    };
    let command_args = CommandArgs { args: &rest[1..] };

    match command.as_str() {
        "help" => output::output_result(&commands::help::execute(), options.machine, 0),
        "config" => run_config(&command_args, options),
        "list" | "show" | "create" | "delete" => {
            let user_config = UserConfig::load()
                .context("Failed to load user configuration. Please check your config.toml file.")?;
            let result = run_video_command(command, &command_args, options, &user_config).await?;
            output::output_result(&result, options.machine, user_config.timezone_offset_seconds)
        }
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

async fn run_video_command(
    command: &str,
    args: &CommandArgs<'_>,
    options: GlobalOptions,
    user_config: &UserConfig,
) -> Result<CommandResult> {
    match command {
        "list" => {
            args.ensure_flags(command, &["--limit"])?;
            let limit = match args.value("--limit")? {
                Some(value) => validator::validate_limit(value)?,
                None => user_config.list_limit,
            };
            let source = build_source(options, user_config)?;
            commands::list::execute(&source, limit)
                .await
                .context("List command failed")
        }
        "show" => {
            args.ensure_flags(command, &[])?;
            let key = args
                .positional(0)
                .context("Please specify a video key for show command")?;
            let source = build_source(options, user_config)?;
            commands::show::execute(&source, key)
                .await
                .context("Show command failed")
        }
        "create" => {
            args.ensure_flags(command, &["--title"])?;
            let url = args
                .positional(0)
                .context("Please specify a source URL for create command")?;
            let title = args.value("--title")?;
            let source = build_source(options, user_config)?;
            commands::create::execute(&source, url, title)
                .await
                .context("Create command failed")
        }
        "delete" => {
            args.ensure_flags(command, &["--force"])?;
            let key = args
                .positional(0)
                .context("Please specify a video key for delete command")?;
            let source = build_source(options, user_config)?;

            let confirmed =
                args.has_flag("--force") || options.machine || input::confirm_deletion(key)?;
            if !confirmed {
                return Ok(commands::delete::cancelled(&source, key));
            }

            commands::delete::execute(&source, key)
                .await
                .context("Delete command failed")
        }
        _ => bail!("Unknown command: '{}'", command),
    }
}

fn run_config(args: &CommandArgs<'_>, options: GlobalOptions) -> Result<()> {
    args.ensure_flags(
        "config",
        &["--limit", "--endpoint", "--reset-endpoint", "--timezone"],
    )?;

    let update = parse_config_update(args)?;
    let path = UserConfig::config_path()?;
    let result = commands::config::execute(&path, update).context("Config command failed")?;

    let offset = match &result {
        CommandResult::Config(r) => r.config.timezone_offset_seconds,
        _ => 0,
    };
    output::output_result(&result, options.machine, offset)
}

fn parse_config_update(args: &CommandArgs<'_>) -> Result<ConfigUpdate> {
    let list_limit = args
        .value("--limit")?
        .map(validator::validate_limit)
        .transpose()?;

    let api_endpoint = if args.has_flag("--reset-endpoint") {
        Some(None)
    } else {
        args.value("--endpoint")?.map(|e| Some(e.to_string()))
    };

    let timezone_offset_seconds = args
        .value("--timezone")?
        .map(|v| {
            v.parse::<i32>().map_err(|_| {
                ConfigError::validation_error(format!(
                    "Invalid timezone offset '{}'. Must be an integer number of seconds",
                    v
                ))
            })
        })
        .transpose()?;

    Ok(ConfigUpdate {
        list_limit,
        api_endpoint,
        timezone_offset_seconds,
    })
}

/// 取得元を組み立てる
///
/// `--mock` ならモック、それ以外は認証情報を解決して Field59。
fn build_source(options: GlobalOptions, user_config: &UserConfig) -> Result<VideoSource> {
    if options.mock {
        debug!("using built-in mock catalogue");
        return Ok(VideoSource::mock());
    }

    let credentials = resolve_credentials(options)?;
    debug!(
        user = %credentials.masked_identifier(),
        endpoint = %user_config.endpoint(),
        "using Field59 source"
    );
    VideoSource::field59(user_config.endpoint(), credentials)
        .context("Failed to create API client")
}

/// 認証情報を解決する
///
/// 優先順位: `--stdin` → 環境変数 → 対話入力（端末の場合のみ）
fn resolve_credentials(options: GlobalOptions) -> Result<Credentials> {
    if options.stdin {
        return input::read_credentials_from_stdin();
    }

    if let Some(credentials) = Credentials::from_env() {
        return Ok(credentials);
    }

    if io::stdin().is_terminal() {
        return input::read_credentials_interactive();
    }

    Err(ConfigError::credentials_missing(
        "no credentials in the environment and stdin is not a terminal",
    )
    .into())
}
