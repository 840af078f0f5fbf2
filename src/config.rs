use crate::error::StartupError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings read from a JSON file at startup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    pub remote_url: String,
    pub api_username: String,
    pub api_password: String,
    pub api_client_id: String,
    pub lookup_file_name: PathBuf,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_bucket")]
    pub tran_rsp_bucket: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_bucket() -> String {
    "auth_responses".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&data).map_err(|source| StartupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
