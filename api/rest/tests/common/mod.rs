#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use actix_web::web;
use pf_api_rest::context::{
    AdminCredential, ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx, ApiRestStorageCtx,
};
use pf_dao::Db;
use pf_db_sqlite::db::SqliteDb;
use pf_hash_argon2::argon2::Argon2Hash;
use tempfile::TempDir;

pub const SECRET_KEY: &str = "0123456789abcdef0123456789abcdef";
pub const BOUNDARY: &str = "pf-test-boundary";

/// `admin:secret`
pub const BASIC_OK: &str = "Basic YWRtaW46c2VjcmV0";
/// `admin:wrong`
pub const BASIC_BAD_PASSWORD: &str = "Basic YWRtaW46d3Jvbmc=";
/// `root:secret`
pub const BASIC_BAD_USER: &str = "Basic cm9vdDpzZWNyZXQ=";

pub struct TestEnv {
    pub ctx: web::Data<ApiRestCtx>,
    pub static_path: PathBuf,
    pub resume_path: PathBuf,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new(with_admin: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let static_path = dir.path().join("static");
        std::fs::create_dir_all(&static_path).unwrap();
        let resume_path = dir.path().join("cv.pdf");

        let db_path = dir.path().join("db.sqlite3");
        let db = SqliteDb::new(db_path.to_str().unwrap(), &1).await.unwrap();

        let argon2 = Argon2Hash::default();
        let admin = with_admin
            .then(|| AdminCredential::new("admin", &argon2.hash_password("secret").unwrap()));

        let ctx = ApiRestCtx::new(
            ApiRestDaoCtx::new(Arc::new(Db::SqliteDb(db))),
            ApiRestStorageCtx::new(
                static_path.to_str().unwrap(),
                "uploads",
                resume_path.to_str().unwrap(),
            ),
            ApiRestHashCtx::new(argon2),
            SECRET_KEY,
            admin,
        );

        Self {
            ctx: web::Data::new(ctx),
            static_path,
            resume_path,
            _dir: dir,
        }
    }

    pub fn db(&self) -> &Db {
        self.ctx.dao().db()
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
