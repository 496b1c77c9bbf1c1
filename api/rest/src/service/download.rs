use std::io::ErrorKind;

use actix_files::NamedFile;
use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpRequest, HttpResponse,
};
use pf_error::Error;

use crate::{context::ApiRestCtx, model::Response};

const DEFAULT_FILE_NAME: &str = "resume.pdf";

pub fn download_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/download", web::get().to(download));
}

async fn download(ctx: web::Data<ApiRestCtx>, req: HttpRequest) -> HttpResponse {
    let path = ctx.storage().resume_path();

    let file = match NamedFile::open_async(path).await {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Response::error(&Error::NotFound("Resume file not found".to_owned()))
        }
        Err(err) => return Response::error(&Error::internal(err)),
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_owned();

    file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file_name)],
    })
    .into_response(&req)
}
