use actix_web::{
    body::{to_bytes, MessageBody},
    dev::ServiceResponse,
    http::header,
    middleware::ErrorHandlerResponse,
    Result,
};
use futures::executor;

use crate::model::Response;

/// Rewraps framework-generated plain-text errors into the JSON envelope.
///
/// JSON and HTML bodies were produced by our own handlers and pass through.
pub fn default_error_handler<B: MessageBody>(
    svc_res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    if let Some(content_type) = svc_res.response().headers().get(header::CONTENT_TYPE) {
        if let Ok(content_type) = content_type.to_str() {
            let content_type = content_type.to_lowercase();
            if content_type.starts_with("application/json") || content_type.starts_with("text/html")
            {
                return Ok(ErrorHandlerResponse::Response(svc_res.map_into_left_body()));
            }
        }
    }

    let (req, res) = svc_res.into_parts();

    let status_code = res.status();
    let body = executor::block_on(async {
        match to_bytes(res.into_body()).await {
            Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(str) => str,
                Err(err) => err.to_string(),
            },
            Err(err) => err.into().to_string(),
        }
    });
    let message = if body.is_empty() {
        status_code.canonical_reason().unwrap_or("Unknown").to_owned()
    } else {
        body
    };

    let res = Response::error_raw(&status_code, &message);

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}
