use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use shortkey::cli::{Cli, Command};
use shortkey::config::StaticConfig;
use shortkey::runtime::modes::{run_cli, run_server};
use shortkey::system::logging::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // CLI 命令的输出走 stdout，控制台日志只保留警告
    let mut logging = config.logging.clone();
    if cli.command() != &Command::Serve && logging.file.is_none() {
        logging.level = "warn".to_string();
    }

    // guard 必须存活到进程结束，保证日志刷新
    let _log_guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command() {
        Command::Serve => run_server(&config).await.map(|_| ExitCode::SUCCESS),
        command => run_cli(command, &config),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
