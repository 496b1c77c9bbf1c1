use actix_cors::Cors;
use actix_web::{
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use logger::logger_format;
use pf_config::app::AppConfigMode;
use tokio_util::sync::CancellationToken;

pub mod configure;
pub mod context;
mod csrf;
mod error_handler;
mod flash;
mod logger;
mod model;
mod page;
mod service;
mod util;

pub struct ApiRestServer {
    app_mode: AppConfigMode,
    address: String,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(app_mode: &AppConfigMode, host: &str, port: &u16, ctx: ApiRestCtx) -> Self {
        pf_log::info(Some("⚡"), "[ApiRestServer] Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self {
            app_mode: *app_mode,
            address,
            context,
        }
    }

    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        pf_log::info(Some("💫"), "[ApiRestServer] Running component");

        let app_mode = self.app_mode;
        let context = self.context;

        let server = HttpServer::new(move || {
            let cors = match app_mode {
                AppConfigMode::Development => Cors::permissive(),
                AppConfigMode::Production => Cors::default(),
            };

            App::new()
                .wrap(cors)
                .wrap(Logger::new(logger_format()))
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .app_data(context.clone())
                .configure(|cfg| configure(cfg, context.storage().static_path()))
        })
        .bind(&self.address)?
        .run();

        let handle = server.handle();
        tokio::select! {
            res = server => Ok(res?),
            _ = cancel_token.cancelled() => {
                pf_log::info(Some("⏳"), "[ApiRestServer] Shutting down HTTP server");
                handle.stop(true).await;
                Ok(())
            }
        }
    }
}
