use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use pf_api_rest::{
    context::{AdminCredential, ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx, ApiRestStorageCtx},
    ApiRestServer,
};
use pf_dao::Db;
use pf_db_sqlite::db::SqliteDb;
use pf_hash_argon2::argon2::Argon2Hash;
use tokio_util::sync::CancellationToken;

mod cli;
mod config_path;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::Cli::parse().command {
        Some(cli::Command::HashPassword { password }) => match cli::hash_password(password) {
            Ok(phc) => {
                println!("{phc}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err:#}");
                ExitCode::FAILURE
            }
        },
        Some(cli::Command::Serve) | None => {
            serve().await;
            ExitCode::SUCCESS
        }
    }
}

async fn serve() {
    let config_path = config_path::get();
    let config = match pf_config::from_path(&config_path) {
        Ok(config) => config,
        Err(err) => pf_log::panic(None, format!("[Portfolio] Loading config failed: {err:#}")),
    };

    pf_log::init(config.log().display_level(), config.log().level_filter());

    pf_log::info(Some("🚀"), "[Portfolio] Starting");

    let db = match SqliteDb::new(
        config.db().sqlite().path(),
        config.db().sqlite().max_connections(),
    )
    .await
    {
        Ok(db) => Arc::new(Db::SqliteDb(db)),
        Err(err) => pf_log::panic(None, format!("[Portfolio] Opening database failed: {err}")),
    };

    let admin_credential = match config.admin() {
        Some(admin) => Some(AdminCredential::new(admin.username(), admin.password_hash())),
        None => {
            pf_log::warn(
                None,
                "[Portfolio] No admin credential configured, the admin surface is locked",
            );
            None
        }
    };

    let api_rest_server = ApiRestServer::new(
        config.app().mode(),
        config.api().rest().host(),
        config.api().rest().port(),
        ApiRestCtx::new(
            ApiRestDaoCtx::new(db.clone()),
            ApiRestStorageCtx::new(
                config.storage().static_path(),
                config.storage().upload_dir(),
                config.storage().resume_path(),
            ),
            ApiRestHashCtx::new(Argon2Hash::default()),
            config.app().secret_key(),
            admin_credential,
        ),
    );

    let cancel_token = CancellationToken::new();

    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                pf_log::error(None, format!("[Portfolio] Listening for shutdown failed: {err}"));
                return;
            }
            pf_log::info(Some("🛑"), "[Portfolio] Shutdown signal received");
            cancel_token.cancel();
        }
    });

    match api_rest_server.run(cancel_token.clone()).await {
        Ok(_) => pf_log::info(Some("👋"), "[Portfolio] Turned off"),
        Err(err) => {
            cancel_token.cancel();
            pf_log::warn(Some("👋"), format!("[Portfolio] Turned off with error: {err}"));
        }
    }

    match db.as_ref() {
        Db::SqliteDb(db) => db.close().await,
    }
}
