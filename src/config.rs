use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct CatalogParameters {
    pub host: String,
    #[serde(default = "default_mysql_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Deserialize)]
pub struct InfluxParameters {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

#[derive(Deserialize)]
pub struct IngestParameters {
    /// When true, provider timestamps are shifted by the executing host's
    /// UTC offset before conversion, matching what the collector has always
    /// written. When false they are read as plain UTC.
    #[serde(default = "default_true")]
    pub use_host_offset: bool,
}

impl Default for IngestParameters {
    fn default() -> Self {
        IngestParameters { use_host_offset: true }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub catalog: CatalogParameters,
    pub influx: InfluxParameters,
    #[serde(default)]
    pub ingest: IngestParameters,
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_true() -> bool {
    true
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}
