use clap::Parser;

use tinylink::cli::Cli;
use tinylink::config::init_config;
use tinylink::interfaces::cli::run_cli_command;
use tinylink::runtime::modes::{self, Mode};
use tinylink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match (modes::detect_mode(cli.command.as_ref()), cli.command) {
        (Mode::Cli, Some(cmd)) => {
            if let Err(e) = run_cli_command(cmd, config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        _ => {
            // guard 需要活到进程结束
            let _log_guard = init_logging(&config.logging);
            modes::run_server(config).await
        }
    }
}
