use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use pf_dao::{contact::ContactDao, project::ProjectDao};
use pf_error::Error;

use crate::{
    context::ApiRestCtx,
    csrf,
    flash::{self, Flash, FLASH_COOKIE},
    model::{contact::ContactReqForm, Response},
    page::{self, Notice, NoticeLevel},
};

pub fn index_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing))
        .route("/", web::post().to(submit_contact));
}

async fn landing(ctx: web::Data<ApiRestCtx>, req: HttpRequest) -> HttpResponse {
    let notices: Vec<Notice> = flash::read(&req, ctx.flash_key())
        .iter()
        .map(Flash::notice)
        .collect();

    let mut res = render_landing(&ctx, &req, &ContactReqForm::default(), &notices).await;

    if req.cookie(FLASH_COOKIE).is_some() {
        add_cookie(&mut res, &flash::removal_cookie());
    }

    res
}

async fn submit_contact(
    ctx: web::Data<ApiRestCtx>,
    req: HttpRequest,
    form: web::Form<ContactReqForm>,
) -> HttpResponse {
    let expected_token = csrf::read(&req, ctx.flash_key());

    match form.validate(expected_token.as_deref()) {
        Ok(()) => {}
        Err(Error::Validation(errors)) => {
            let notices = [Notice::new(NoticeLevel::Warning, &errors.to_string())];
            return render_landing(&ctx, &req, &form, &notices).await;
        }
        Err(err) => return Response::error(&err),
    }

    let mut contact = ContactDao::new(form.name(), form.email(), form.message());
    if let Err(err) = contact.db_insert(ctx.dao().db()).await {
        return Response::error(&err);
    }

    pf_log::info(
        Some("✉️"),
        format!("[ApiRestServer] Stored contact message {}", contact.id()),
    );

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(Flash::ContactSent.to_cookie(ctx.flash_key()))
        .finish()
}

/// Renders the page with the visitor's CSRF token, issuing one when absent.
async fn render_landing(
    ctx: &ApiRestCtx,
    req: &HttpRequest,
    form: &ContactReqForm,
    notices: &[Notice],
) -> HttpResponse {
    let projects = match ProjectDao::db_select_many(ctx.dao().db()).await {
        Ok(projects) => projects,
        Err(err) => return Response::error(&err),
    };

    let (csrf_token, csrf_cookie) = csrf::current_or_issue(req, ctx.flash_key());

    let mut res = HttpResponse::build(StatusCode::OK)
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(page::index(&projects, form, &csrf_token, notices));

    if let Some(cookie) = csrf_cookie {
        add_cookie(&mut res, &cookie);
    }

    res
}

fn add_cookie(res: &mut HttpResponse, cookie: &Cookie<'_>) {
    if let Err(err) = res.add_cookie(cookie) {
        pf_log::warn(
            None,
            format!("[ApiRestServer] Failed to set cookie {}: {err}", cookie.name()),
        );
    }
}
