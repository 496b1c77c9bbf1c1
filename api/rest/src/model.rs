use actix_web::{
    http::{header, StatusCode},
    HttpResponse, HttpResponseBuilder,
};
use pf_error::{Error, FieldError};
use serde::Serialize;

pub mod admin;
pub mod contact;

#[derive(Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    pub fn data<T: Serialize>(
        status_code: &StatusCode,
        pagination: &Option<PaginationRes>,
        data: T,
    ) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(Self {
                error: None,
                pagination: *pagination,
                data: Some(data),
            }),
            Err(err) => Self::error(&Error::internal(err)),
        }
    }

    pub fn error(err: &Error) -> HttpResponse {
        let (status_code, fields) = match err {
            Error::Validation(errors) => (StatusCode::BAD_REQUEST, Some(errors.errors().to_vec())),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, None),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, None),
            Error::Forbidden(_) => (StatusCode::FORBIDDEN, None),
            Error::Store(_) | Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let mut res = Self::build_error(&status_code, &err.to_string(), fields);
        if matches!(err, Error::Unauthorized(_)) {
            res.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Basic realm=\"admin\""),
            );
        }
        res
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        Self::build_error(status_code, message, None)
    }

    fn build_error(
        status_code: &StatusCode,
        message: &str,
        fields: Option<Vec<FieldError>>,
    ) -> HttpResponse {
        if status_code.is_server_error() {
            pf_log::error(None, message);
        } else {
            pf_log::warn(None, message);
        }

        HttpResponseBuilder::new(*status_code).json(Self {
            error: Some(ErrorRes {
                status: match status_code.canonical_reason() {
                    Some(status_code) => status_code.to_owned(),
                    None => "Unknown".to_owned(),
                },
                message: message.to_owned(),
                fields,
            }),
            pagination: None,
            data: None,
        })
    }
}

#[derive(Serialize)]
pub struct ErrorRes {
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

#[derive(Serialize, Clone, Copy)]
pub struct PaginationRes {
    count: usize,
    total: i64,
}

impl PaginationRes {
    pub fn new(count: &usize, total: &i64) -> Self {
        Self {
            count: *count,
            total: *total,
        }
    }
}
