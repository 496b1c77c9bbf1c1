use std::{path::PathBuf, sync::Arc};

use actix_web::cookie::Key;
use pf_dao::{upload::UploadStore, Db};
use pf_hash_argon2::argon2::Argon2Hash;

pub struct ApiRestCtx {
    dao: ApiRestDaoCtx,
    storage: ApiRestStorageCtx,
    hash: ApiRestHashCtx,
    flash_key: Key,
    admin_credential: Option<AdminCredential>,
}

impl ApiRestCtx {
    /// `secret_key` must hold at least 32 bytes; the config loader enforces it.
    pub fn new(
        dao: ApiRestDaoCtx,
        storage: ApiRestStorageCtx,
        hash: ApiRestHashCtx,
        secret_key: &str,
        admin_credential: Option<AdminCredential>,
    ) -> Self {
        Self {
            dao,
            storage,
            hash,
            flash_key: Key::derive_from(secret_key.as_bytes()),
            admin_credential,
        }
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }

    pub fn storage(&self) -> &ApiRestStorageCtx {
        &self.storage
    }

    pub fn hash(&self) -> &ApiRestHashCtx {
        &self.hash
    }

    pub fn flash_key(&self) -> &Key {
        &self.flash_key
    }

    pub fn admin_credential(&self) -> &Option<AdminCredential> {
        &self.admin_credential
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

pub struct ApiRestStorageCtx {
    uploads: UploadStore,
    resume_path: PathBuf,
}

impl ApiRestStorageCtx {
    pub fn new(static_path: &str, upload_dir: &str, resume_path: &str) -> Self {
        Self {
            uploads: UploadStore::new(static_path, upload_dir),
            resume_path: PathBuf::from(resume_path),
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// Directory served under `/static`.
    pub fn static_path(&self) -> &std::path::Path {
        self.uploads.base_path()
    }

    pub fn resume_path(&self) -> &PathBuf {
        &self.resume_path
    }
}

pub struct ApiRestHashCtx {
    argon2: Argon2Hash,
}

impl ApiRestHashCtx {
    pub fn new(argon2: Argon2Hash) -> Self {
        Self { argon2 }
    }

    pub fn argon2(&self) -> &Argon2Hash {
        &self.argon2
    }
}

pub struct AdminCredential {
    username: String,
    password_hash: String,
}

impl AdminCredential {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
