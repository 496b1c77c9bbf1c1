use std::fs::File;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use self::{
    admin::AdminConfig, api::ApiConfig, app::AppConfig, db::DbConfig, log::LogConfig,
    storage::StorageConfig,
};

pub mod admin;
pub mod api;
pub mod app;
pub mod db;
pub mod log;
pub mod storage;

/// Shortest secret key accepted for signing cookies.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Deserialize)]
pub struct Config {
    app: AppConfig,
    log: LogConfig,
    db: DbConfig,
    api: ApiConfig,
    storage: StorageConfig,
    admin: Option<AdminConfig>,
}

impl Config {
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn admin(&self) -> &Option<AdminConfig> {
        &self.admin
    }

    fn check(self) -> Result<Self> {
        if self.app.secret_key().len() < MIN_SECRET_KEY_LEN {
            bail!("app.secret_key must be at least {MIN_SECRET_KEY_LEN} bytes long");
        }
        Ok(self)
    }
}

pub fn from_path(path: &str) -> Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open config file {path}"))?;
    serde_yaml::from_reader::<_, Config>(file)
        .with_context(|| format!("Failed to parse config file {path}"))?
        .check()
}

pub fn from_str(content: &str) -> Result<Config> {
    serde_yaml::from_str::<Config>(content)
        .context("Failed to parse config")?
        .check()
}
