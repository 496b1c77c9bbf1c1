use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppConfig {
    mode: AppConfigMode,
    secret_key: String,
}

impl AppConfig {
    pub fn mode(&self) -> &AppConfigMode {
        &self.mode
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum AppConfigMode {
    Development,
    Production,
}
