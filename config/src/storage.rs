use serde::Deserialize;

/// Filesystem locations served or written by the application.
#[derive(Deserialize)]
pub struct StorageConfig {
    static_path: String,
    #[serde(default = "default_upload_dir")]
    upload_dir: String,
    resume_path: String,
}

impl StorageConfig {
    /// Directory served under `/static`.
    pub fn static_path(&self) -> &str {
        &self.static_path
    }

    /// Upload directory, relative to `static_path`.
    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    pub fn resume_path(&self) -> &str {
        &self.resume_path
    }
}

fn default_upload_dir() -> String {
    "uploads".to_owned()
}
