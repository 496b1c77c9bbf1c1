use actix_multipart::Multipart;
use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::basic::BasicAuth;
use pf_dao::{
    contact::{ContactDao, CONTACT_DESCRIPTOR},
    entity::{remove_uploads, Entity, EntityDescriptor, UploadChanges},
    project::{ProjectDao, PROJECT_DESCRIPTOR},
};
use pf_error::{Error, Result};

use crate::{
    context::ApiRestCtx,
    model::{
        admin::{AdminRecordIDResJson, AdminRecordReqPath},
        PaginationRes, Response,
    },
    util::multipart::read_field_values,
};

static DESCRIPTORS: [&EntityDescriptor; 2] = [&PROJECT_DESCRIPTOR, &CONTACT_DESCRIPTOR];

pub fn admin_api(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(index))
        .route("/", web::get().to(index))
        .configure(entity_api::<ProjectDao>)
        .configure(entity_api::<ContactDao>);
}

/// Mounts the generic record routes under `/<entity name>`.
fn entity_api<E: Entity + 'static>(cfg: &mut web::ServiceConfig) {
    let collection = format!("/{}", E::descriptor().name());
    let record = format!("{collection}/{{id}}");

    cfg.route(&collection, web::get().to(find_many::<E>))
        .route(&collection, web::post().to(insert_one::<E>))
        .route(&record, web::get().to(find_one::<E>))
        .route(&record, web::patch().to(update_one::<E>))
        .route(&record, web::delete().to(delete_one::<E>));
}

async fn index(ctx: web::Data<ApiRestCtx>, auth: Option<BasicAuth>) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    Response::data(&StatusCode::OK, &None, DESCRIPTORS)
}

async fn find_many<E: Entity>(ctx: web::Data<ApiRestCtx>, auth: Option<BasicAuth>) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    let db = ctx.dao().db();
    let (records, total) = match tokio::try_join!(E::find_all(db), E::count(db)) {
        Ok(data) => data,
        Err(err) => return Response::error(&err),
    };

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&records.len(), &total)),
        &records,
    )
}

async fn find_one<E: Entity>(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BasicAuth>,
    path: web::Path<AdminRecordReqPath>,
) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    match E::find(ctx.dao().db(), path.id()).await {
        Ok(record) => Response::data(&StatusCode::OK, &None, &record),
        Err(err) => Response::error(&err),
    }
}

async fn insert_one<E: Entity>(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BasicAuth>,
    payload: Multipart,
) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    let values = match read_field_values(payload).await {
        Ok(values) => values,
        Err(err) => return Response::error(&err),
    };

    let mut record = match E::from_values(&values) {
        Ok(record) => record,
        Err(err) => return Response::error(&err),
    };

    let store = ctx.storage().uploads();
    let changes = match UploadChanges::stage(&mut record, &values, store).await {
        Ok(changes) => changes,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = record.insert(ctx.dao().db()).await {
        changes.rollback(store).await;
        return Response::error(&err);
    }
    changes.commit(store).await;

    pf_log::info(
        None,
        format!(
            "[ApiRestServer] Created {} {}",
            E::descriptor().name(),
            record.record_id()
        ),
    );

    Response::data(&StatusCode::CREATED, &None, &record)
}

async fn update_one<E: Entity>(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BasicAuth>,
    path: web::Path<AdminRecordReqPath>,
    payload: Multipart,
) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    let values = match read_field_values(payload).await {
        Ok(values) => values,
        Err(err) => return Response::error(&err),
    };

    let mut record = match E::find(ctx.dao().db(), path.id()).await {
        Ok(record) => record,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = record.apply_values(&values) {
        return Response::error(&err);
    }

    let store = ctx.storage().uploads();
    let changes = match UploadChanges::stage(&mut record, &values, store).await {
        Ok(changes) => changes,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = record.update(ctx.dao().db()).await {
        changes.rollback(store).await;
        return Response::error(&err);
    }
    changes.commit(store).await;

    Response::data(&StatusCode::OK, &None, &record)
}

async fn delete_one<E: Entity>(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BasicAuth>,
    path: web::Path<AdminRecordReqPath>,
) -> HttpResponse {
    if let Err(err) = authorize(&ctx, &auth) {
        return Response::error(&err);
    }

    let db = ctx.dao().db();
    let record = match E::find(db, path.id()).await {
        Ok(record) => record,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = E::delete(db, path.id()).await {
        return Response::error(&err);
    }
    remove_uploads(&record, ctx.storage().uploads()).await;

    pf_log::info(
        None,
        format!(
            "[ApiRestServer] Deleted {} {}",
            E::descriptor().name(),
            path.id()
        ),
    );

    Response::data(&StatusCode::OK, &None, &AdminRecordIDResJson::new(path.id()))
}

/// Without a configured credential the admin surface stays closed.
fn authorize(ctx: &ApiRestCtx, auth: &Option<BasicAuth>) -> Result<()> {
    let Some(credential) = ctx.admin_credential() else {
        return Err(Error::Forbidden(
            "Admin access is not configured".to_owned(),
        ));
    };

    let Some(auth) = auth else {
        return Err(Error::Unauthorized(
            "Admin credentials are required".to_owned(),
        ));
    };

    let password = auth.password().unwrap_or_default();
    if auth.user_id() != credential.username()
        || ctx
            .hash()
            .argon2()
            .verify_password(password, credential.password_hash())
            .is_err()
    {
        return Err(Error::Unauthorized("Invalid admin credentials".to_owned()));
    }

    Ok(())
}
