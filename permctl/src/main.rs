mod cli;
mod logger;

use access_core::Config;
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // .env has to be loaded before clap reads env-backed options
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = &cli.catalog {
        config = config.with_catalog_path(path);
    }

    logger::init_logger(&config.log_level);
    tracing::debug!(?config, "permctl starting");

    match cli::run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
