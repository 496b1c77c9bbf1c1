use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::service::{admin::admin_api, download::download_api, index::index_api};

pub fn configure(cfg: &mut web::ServiceConfig, static_path: &Path) {
    cfg.configure(index_api)
        .configure(download_api)
        .service(Files::new("/static", static_path))
        .service(web::scope("/admin").configure(admin_api));
}
