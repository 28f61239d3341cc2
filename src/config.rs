use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Process-wide configuration, read once from the environment at startup.
///
/// Required variables are fetched with [`Config::required`], which logs and
/// returns [`ConfigError::Missing`] rather than panicking, so callers can
/// decide how to exit (the server binary exits the process; tests can
/// assert on the error instead).
#[derive(Debug, Clone)]
pub struct Config {
    pub tfl_api_key: String,
    pub rail_marketplace_api_key: String,
    pub static_data_path: PathBuf,
    pub walking_distances_path: PathBuf,
    pub refresh_interval_secs: u64,
    pub rail_pool_size: usize,
    pub max_walk_secs: u32,
    pub max_rounds: usize,
    pub bind_addr: SocketAddr,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for environment variable {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let tfl_api_key = required("TFL_API_KEY")?;
        let rail_marketplace_api_key = required("RAIL_MARKETPLACE_API_KEY")?;
        let static_data_path = PathBuf::from(required("STATIC_DATA_PATH")?);

        let walking_distances_path = env::var("WALKING_DISTANCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| static_data_path.join("walking_distances.json"));

        let refresh_interval_secs = optional_parse("REFRESH_INTERVAL_SECS", 30)?;
        let rail_pool_size = optional_parse("RAIL_POOL_SIZE", 8)?;
        let max_walk_secs = optional_parse("MAX_WALK_SECS", 1800)?;
        let max_rounds = optional_parse("MAX_ROUNDS", 5)?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: env::var("BIND_ADDR").unwrap_or_default(),
            })?;

        Ok(Self {
            tfl_api_key,
            rail_marketplace_api_key,
            static_data_path,
            walking_distances_path,
            refresh_interval_secs,
            rail_pool_size,
            max_walk_secs,
            max_rounds,
            bind_addr,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
