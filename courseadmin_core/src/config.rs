use std::path::{Path, PathBuf};

use iroh::SecretKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

static DATA_DIR_NAME: &str = "courseadmin";
static ADMIN_DB_NAME: &str = "courseadmin.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// data_dir_path
// |- courseadmin
//    |- courseadmin.sqlite
//    |- config.json

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory on this platform")]
    NoDataDir,
    #[error("config io failed")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid json")]
    Json(#[from] serde_json::Error),
}

fn default_secret_key() -> SecretKey {
    SecretKey::generate(&mut rand::rng())
}

fn default_log_filter() -> String {
    "info,sea_orm=warn,sqlx=warn".to_string()
}

fn default_live_query_capacity() -> usize {
    256
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdminConfig {
    /// Secret key for the node serving the admin RPC.
    #[serde(default = "default_secret_key")]
    pub(crate) secret_key: SecretKey,

    /// Secret key for the local dashboard client.
    #[serde(default = "default_secret_key")]
    pub(crate) client_secret_key: SecretKey,

    pub(crate) database_path: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Buffered changes per live query before a subscriber is considered lagging.
    #[serde(default = "default_live_query_capacity")]
    pub live_query_capacity: usize,
}

impl AdminConfig {
    fn new(data_dir: &Path) -> Self {
        AdminConfig {
            secret_key: default_secret_key(),
            client_secret_key: default_secret_key(),
            database_path: data_dir.join(ADMIN_DB_NAME),
            log_filter: default_log_filter(),
            live_query_capacity: default_live_query_capacity(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_path.display())
    }
}

/// Loads the config from the platform data directory, creating it on first run.
pub async fn get_or_init() -> Result<AdminConfig, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    get_or_init_in(&data_dir.join(DATA_DIR_NAME)).await
}

/// Loads `config.json` from `dir`, writing a fresh one if it does not exist.
pub async fn get_or_init_in(dir: &Path) -> Result<AdminConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(dir).await?;

    if config_path.exists() {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: AdminConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        let config = AdminConfig::new(dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_run_writes_config() {
        let dir = tempfile::tempdir().unwrap();

        let config = get_or_init_in(dir.path()).await.unwrap();

        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
        assert_eq!(config.database_path(), dir.path().join(ADMIN_DB_NAME));
        assert_eq!(config.live_query_capacity, 256);
    }

    #[tokio::test]
    async fn second_run_reads_same_keys() {
        let dir = tempfile::tempdir().unwrap();

        let first = get_or_init_in(dir.path()).await.unwrap();
        let second = get_or_init_in(dir.path()).await.unwrap();

        assert_eq!(first.secret_key.public(), second.secret_key.public());
        assert_eq!(first.database_path, second.database_path);
    }

    #[tokio::test]
    async fn missing_optional_keys_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("other.sqlite");
        let json = serde_json::json!({ "database_path": db });
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), json.to_string()).unwrap();

        let config = get_or_init_in(dir.path()).await.unwrap();

        assert_eq!(config.database_path(), db);
        assert_eq!(config.log_filter, default_log_filter());
        assert!(config.database_url().starts_with("sqlite://"));
    }

    #[tokio::test]
    async fn corrupt_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();

        let err = get_or_init_in(dir.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
