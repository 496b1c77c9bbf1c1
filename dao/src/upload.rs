use std::path::{Component, Path, PathBuf};

use pf_error::{Error, Result};
use tokio::fs;
use uuid::Uuid;

/// A file received from a form, held in memory until it is stored.
pub struct UploadedFile {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    pub fn file_name(&self) -> &Option<String> {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Writes uploads below `<base_path>/<upload_dir>`.
///
/// Records keep the path relative to `base_path`, e.g. `uploads/<uuid>_cat.png`.
pub struct UploadStore {
    base_path: PathBuf,
    upload_dir: String,
}

impl UploadStore {
    pub fn new(base_path: impl Into<PathBuf>, upload_dir: &str) -> Self {
        Self {
            base_path: base_path.into(),
            upload_dir: upload_dir.trim_matches('/').to_owned(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn save(&self, file: &UploadedFile) -> Result<String> {
        let dir = self.base_path.join(&self.upload_dir);
        fs::create_dir_all(&dir).await.map_err(Error::internal)?;

        let file_name = format!(
            "{}_{}",
            Uuid::now_v7().simple(),
            sanitize_file_name(file.file_name().as_deref().unwrap_or_default())
        );
        fs::write(dir.join(&file_name), file.bytes())
            .await
            .map_err(Error::internal)?;

        pf_log::info(Some("📁"), format!("[UploadStore] Saved {file_name}"));

        Ok(if self.upload_dir.is_empty() {
            file_name
        } else {
            format!("{}/{}", self.upload_dir, file_name)
        })
    }

    /// Removes a stored file. A file that is already gone is only logged.
    pub async fn remove(&self, relative_path: &str) -> Result<()> {
        let path = self.resolve(relative_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                pf_log::warn(
                    None,
                    format!("[UploadStore] {relative_path} was already removed"),
                );
                Ok(())
            }
            Err(err) => Err(Error::internal(err)),
        }
    }

    /// Maps a stored relative path to its location on disk.
    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf> {
        let relative = Path::new(relative_path);
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(Error::BadRequest(format!(
                "Upload path {relative_path} escapes the upload directory"
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_` from the last path segment.
pub fn sanitize_file_name(file_name: &str) -> String {
    let last = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|ch| if ch == ' ' { '_' } else { ch })
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "file".to_owned()
    } else {
        cleaned.to_owned()
    }
}
