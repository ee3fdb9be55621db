use std::env;
use anyhow::{Context, Result};
use log::{error, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use meteosink::config::{load_config, General};
use meteosink::worker;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {m}{n}";

fn main() {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("METEOSINK_CONFIG").ok())
        .unwrap_or_else(|| "config.toml".to_string());

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Error loading configuration from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.general) {
        println!("Error initializing logging: {:#}", e);
        std::process::exit(1);
    }

    info!("meteosink version: {}", env!("CARGO_PKG_VERSION"));

    // Individual city or source failures are logged inside the sweep and do
    // not surface here; only a failure before any city is processed does.
    if let Err(e) = worker::run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Sets up the log4rs file appender, and optionally a stdout appender, from
/// the general configuration block
///
/// # Arguments
///
/// * 'general' - the general configuration block
fn init_logging(general: &General) -> Result<()> {
    let file_path = format!("{}meteosink.log", general.log_path);

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&file_path)
        .with_context(|| format!("opening log file {}", file_path))?;

    let mut builder = LogConfig::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let log_config = builder
        .build(root.build(general.log_level))
        .context("building log configuration")?;

    log4rs::init_config(log_config).context("installing logger")?;

    Ok(())
}
