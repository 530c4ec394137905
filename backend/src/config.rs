//! Server configuration read from the environment.

use std::env;
use std::path::PathBuf;

const HOST: &str = "SCHOOL_FORMS_HOST";
const PORT: &str = "SCHOOL_FORMS_PORT";
const UPLOAD_DIR: &str = "SCHOOL_FORMS_UPLOAD_DIR";
const REFERENCE_FILE: &str = "SCHOOL_FORMS_REFERENCE_FILE";
const OPEN_BROWSER: &str = "SCHOOL_FORMS_OPEN_BROWSER";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SCHOOL_FORMS_HOST must not be empty")]
    EmptyHost,
    #[error("invalid SCHOOL_FORMS_PORT `{0}`: expected a number between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid {key} `{value}`: expected true or false")]
    InvalidFlag { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Where uploaded attachments are written and served from.
    pub upload_dir: PathBuf,
    /// Replaces the built-in reference data when set.
    pub reference_file: Option<PathBuf>,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            reference_file: None,
            open_browser: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SCHOOL_FORMS_HOST`: bind address (default `127.0.0.1`)
    /// - `SCHOOL_FORMS_PORT`: bind port (default `8080`)
    /// - `SCHOOL_FORMS_UPLOAD_DIR`: upload directory (default `uploads`)
    /// - `SCHOOL_FORMS_REFERENCE_FILE`: JSON reference data (optional)
    /// - `SCHOOL_FORMS_OPEN_BROWSER`: open the client on start (default `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(host) = lookup(HOST) {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::EmptyHost);
            }
            config.host = host.to_string();
        }

        if let Some(port) = lookup(PORT) {
            config.port = match port.trim().parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(ConfigError::InvalidPort(port)),
            };
        }

        if let Some(dir) = lookup(UPLOAD_DIR).filter(|d| !d.trim().is_empty()) {
            config.upload_dir = PathBuf::from(dir);
        }

        config.reference_file = lookup(REFERENCE_FILE)
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from);

        if let Some(flag) = lookup(OPEN_BROWSER) {
            config.open_browser = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        key: OPEN_BROWSER,
                        value: flag,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
