//! Binary entry point for the Helio viewer.

mod window;

use clap::Parser;
use tracing::error;

use helio_config::{CliArgs, Config, default_config_dir};
use helio_log::init_logging;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config ({e}), using defaults");
                Config::default()
            }
        },
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Err(e) = window::run_with_config(config) {
        error!("Event loop terminated with error: {e}");
        std::process::exit(1);
    }
}
