use actix_web::{
    http::{header, StatusCode},
    test, App,
};
use pf_api_rest::configure::configure;
use pf_dao::{contact::ContactDao, project::ProjectDao};

mod common;

use common::TestEnv;

macro_rules! init_app {
    ($env:expr) => {{
        let static_path = $env.static_path.clone();
        test::init_service(
            App::new()
                .app_data($env.ctx.clone())
                .configure(move |cfg| configure(cfg, &static_path)),
        )
        .await
    }};
}

/// Loads the landing page and returns the CSRF cookie plus the token from the form.
macro_rules! csrf_session {
    ($app:expr) => {{
        let res = test::call_service(&$app, test::TestRequest::get().uri("/").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "csrf_token")
            .unwrap()
            .into_owned();
        let html = body_text(&test::read_body(res).await);
        (cookie, hidden_token(&html))
    }};
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn hidden_token(html: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker).unwrap() + marker.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_owned()
}

#[actix_web::test]
async fn landing_lists_every_project_in_id_order() {
    let env = TestEnv::new(false).await;
    for (name, image) in [
        ("First", Some("uploads/first.png".to_owned())),
        ("Second", None),
        ("Third", None),
    ] {
        ProjectDao::new(name, "desc", &image)
            .db_insert(env.db())
            .await
            .unwrap();
    }
    let app = init_app!(env);

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(&test::read_body(res).await);

    let first = html.find("<h3>First</h3>").unwrap();
    let second = html.find("<h3>Second</h3>").unwrap();
    let third = html.find("<h3>Third</h3>").unwrap();
    assert!(first < second && second < third);
    assert!(html.contains("<img src=\"/static/uploads/first.png\""));
    assert_eq!(html.matches("<img").count(), 1);
    assert!(html.contains("Votre nom"));
    assert!(html.contains("Envoyer"));
}

#[actix_web::test]
async fn valid_contact_is_stored_and_redirects_with_flash() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);
    let (csrf_cookie, token) = csrf_session!(app);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(csrf_cookie)
        .set_form([
            ("csrf_token", token.as_str()),
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("message", "Hello there"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    let flash = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "flash")
        .unwrap()
        .into_owned();

    let contacts = ContactDao::db_select_many(env.db()).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name(), "Jane Doe");
    assert_eq!(contacts[0].email(), "jane@example.com");
    assert_eq!(contacts[0].message(), "Hello there");

    let req = test::TestRequest::get().uri("/").cookie(flash).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let removal = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "flash")
        .unwrap()
        .into_owned();
    assert_eq!(removal.value(), "");
    let html = body_text(&test::read_body(res).await);
    assert_eq!(
        html.matches("Votre message a été envoyé avec succès.").count(),
        1
    );
}

#[actix_web::test]
async fn invalid_contact_rerenders_with_every_field_error() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);
    let (csrf_cookie, token) = csrf_session!(app);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(csrf_cookie)
        .set_form([
            ("csrf_token", token.as_str()),
            ("name", ""),
            ("email", "not-an-email"),
            ("message", "Hi"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.response().cookies().next().is_none());
    let html = body_text(&test::read_body(res).await);
    assert_eq!(html.matches("alert-warning").count(), 1);
    assert!(html.contains("name: This field is required."));
    assert!(html.contains("email: Invalid email address."));
    assert!(!html.contains("message: "));
    assert!(!html.contains("csrf_token: "));
    assert!(html.contains("value=\"not-an-email\""));

    assert_eq!(ContactDao::db_count(env.db()).await.unwrap(), 0);
}

#[actix_web::test]
async fn missing_contact_fields_count_as_empty() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);
    let (csrf_cookie, token) = csrf_session!(app);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(csrf_cookie)
        .set_form([("csrf_token", token.as_str()), ("name", "Jane")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(&test::read_body(res).await);
    assert!(html.contains("email: This field is required."));
    assert!(html.contains("message: This field is required."));
    assert_eq!(ContactDao::db_count(env.db()).await.unwrap(), 0);
}

#[actix_web::test]
async fn contact_without_csrf_token_is_rejected() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);

    let req = test::TestRequest::post()
        .uri("/")
        .insert_header((header::ORIGIN, "https://evil.example"))
        .set_form([
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("message", "Hello there"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(&test::read_body(res).await);
    assert_eq!(html.matches("alert-warning").count(), 1);
    assert!(html.contains("csrf_token: The CSRF token is missing."));
    assert!(html.contains("value=\"Jane Doe\""));
    assert_eq!(ContactDao::db_count(env.db()).await.unwrap(), 0);
}

#[actix_web::test]
async fn contact_with_foreign_csrf_token_is_rejected() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);
    let (csrf_cookie, _) = csrf_session!(app);
    let (_, other_token) = csrf_session!(app);

    let req = test::TestRequest::post()
        .uri("/")
        .cookie(csrf_cookie)
        .set_form([
            ("csrf_token", other_token.as_str()),
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("message", "Hello there"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(&test::read_body(res).await);
    assert_eq!(html.matches("alert-warning").count(), 1);
    assert!(html.contains("csrf_token: The CSRF token is invalid."));
    assert_eq!(ContactDao::db_count(env.db()).await.unwrap(), 0);
}

#[actix_web::test]
async fn tampered_flash_cookie_is_ignored() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(actix_web::cookie::Cookie::new("flash", "contact_sent"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(&test::read_body(res).await);
    assert!(!html.contains("alert-success"));
}

#[actix_web::test]
async fn download_serves_resume_bytes_as_attachment() {
    let env = TestEnv::new(false).await;
    let bytes = b"%PDF-1.4 fake resume\x00\xff".to_vec();
    std::fs::write(&env.resume_path, &bytes).unwrap();
    let app = init_app!(env);

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/download").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let disposition = res
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("cv.pdf"));
    assert_eq!(test::read_body(res).await.as_ref(), bytes.as_slice());
}

#[actix_web::test]
async fn download_without_resume_is_not_found() {
    let env = TestEnv::new(false).await;
    let app = init_app!(env);

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/download").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
