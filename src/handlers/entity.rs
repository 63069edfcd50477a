//! Entity handlers: list, add form/submit, edit form/submit, delete.
//!
//! Service results map to responses as follows: success redirects (303) to the list with a
//! signed notice; validation failure re-renders the form (422); unknown id is the 404 page;
//! store failure re-renders the form, or the list for delete, with the cause (500).

use crate::error::AppError;
use crate::extractors::ResponseFormat;
use crate::flash::{Notice, NoticeQuery};
use crate::model::{EntityDescriptor, FieldValues};
use crate::render::{self, Banner, FormMode, PageContext};
use crate::response::{RecordList, RecordView};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::collections::HashMap;

fn resolve(state: &AppState, path_segment: &str) -> Result<&'static EntityDescriptor, AppError> {
    state
        .registry
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("/{}", path_segment)))
}

/// Ids are integers; anything else cannot name a record.
fn parse_id(entity: &EntityDescriptor, id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("{} {}", entity.name, id_str)))
}

fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

fn not_found(ctx: &PageContext, err: &AppError) -> Response {
    let what = match err {
        AppError::NotFound(what) => what.clone(),
        other => other.to_string(),
    };
    html(StatusCode::NOT_FOUND, render::not_found_page(ctx, &what))
}

/// Underlying cause text for store failures.
fn cause(err: &AppError) -> String {
    match err {
        AppError::Db(e) => e.to_string(),
        other => other.to_string(),
    }
}

fn store_failure(action: &str, entity: &EntityDescriptor, err: &AppError) -> Banner {
    tracing::error!(entity = entity.name, action, error = %err, "store failure");
    Banner::danger(format!(
        "Error {} {}: {}",
        action,
        entity.label.to_lowercase(),
        cause(err)
    ))
}

fn redirect_with_notice(state: &AppState, entity: &EntityDescriptor, notice: Notice) -> Response {
    let token = notice.encode(entity, &state.config.secret_key);
    Redirect::to(&format!("/{}?notice={}", entity.path_segment, token)).into_response()
}

fn form_response(
    ctx: &PageContext,
    status: StatusCode,
    entity: &EntityDescriptor,
    mode: FormMode,
    values: &FieldValues,
    banner: Banner,
) -> Response {
    html(status, render::form_page(ctx, entity, mode, Some(values), Some(&banner)))
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::index_page(&PageContext::now(), &state.registry.entities))
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    format: ResponseFormat,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let ctx = PageContext::now();
    let entity = match resolve(&state, &path_segment) {
        Ok(e) => e,
        Err(err) if format == ResponseFormat::Json => return err.into_response(),
        Err(err) => return not_found(&ctx, &err),
    };
    let rows = match CrudService::list(&state.pool, entity).await {
        Ok(rows) => rows,
        Err(err) if format == ResponseFormat::Json => return err.into_response(),
        Err(err) => {
            let banner = store_failure("listing", entity, &err);
            return html(StatusCode::INTERNAL_SERVER_ERROR, render::error_page(&ctx, &banner.message));
        }
    };
    if format == ResponseFormat::Json {
        return RecordList::new(entity, rows).into_response();
    }
    let banner = query
        .notice
        .as_deref()
        .and_then(|token| Notice::decode(token, entity, &state.config.secret_key))
        .map(|n| Banner::success(n.message(entity)));
    html(StatusCode::OK, render::list_page(&ctx, entity, &rows, banner.as_ref()))
}

pub async fn add_form(State(state): State<AppState>, Path(path_segment): Path<String>) -> Response {
    let ctx = PageContext::now();
    match resolve(&state, &path_segment) {
        Ok(entity) => html(StatusCode::OK, render::form_page(&ctx, entity, FormMode::Add, None, None)),
        Err(err) => not_found(&ctx, &err),
    }
}

pub async fn add_submit(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let ctx = PageContext::now();
    let entity = match resolve(&state, &path_segment) {
        Ok(e) => e,
        Err(err) => return not_found(&ctx, &err),
    };
    let values = entity.extract(&form);
    match CrudService::create(&state.pool, entity, &values).await {
        Ok(_) => redirect_with_notice(&state, entity, Notice::Added),
        Err(AppError::Validation(msg)) => form_response(
            &ctx,
            StatusCode::UNPROCESSABLE_ENTITY,
            entity,
            FormMode::Add,
            &values,
            Banner::danger(msg),
        ),
        Err(err) => {
            let banner = store_failure("adding", entity, &err);
            form_response(&ctx, StatusCode::INTERNAL_SERVER_ERROR, entity, FormMode::Add, &values, banner)
        }
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    format: ResponseFormat,
) -> Response {
    let ctx = PageContext::now();
    let found = match resolve(&state, &path_segment) {
        Ok(entity) => match parse_id(entity, &id_str) {
            Ok(id) => CrudService::get_by_id(&state.pool, entity, id)
                .await
                .map(|record| (entity, record)),
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    };
    match (found, format) {
        (Ok((entity, record)), ResponseFormat::Json) => RecordView::new(entity, record).into_response(),
        (Ok((entity, record)), ResponseFormat::Html) => html(
            StatusCode::OK,
            render::form_page(&ctx, entity, FormMode::Edit(record.id), Some(&record.values), None),
        ),
        (Err(err), ResponseFormat::Json) => err.into_response(),
        (Err(err @ AppError::NotFound(_)), ResponseFormat::Html) => not_found(&ctx, &err),
        (Err(err), ResponseFormat::Html) => {
            tracing::error!(error = %err, "edit form lookup failed");
            html(StatusCode::INTERNAL_SERVER_ERROR, render::error_page(&ctx, &cause(&err)))
        }
    }
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let ctx = PageContext::now();
    let (entity, id) = match resolve(&state, &path_segment).and_then(|e| Ok((e, parse_id(e, &id_str)?))) {
        Ok(found) => found,
        Err(err) => return not_found(&ctx, &err),
    };
    let values = entity.extract(&form);
    match CrudService::update(&state.pool, entity, id, &values).await {
        Ok(_) => redirect_with_notice(&state, entity, Notice::Updated),
        Err(err @ AppError::NotFound(_)) => not_found(&ctx, &err),
        Err(AppError::Validation(msg)) => form_response(
            &ctx,
            StatusCode::UNPROCESSABLE_ENTITY,
            entity,
            FormMode::Edit(id),
            &values,
            Banner::danger(msg),
        ),
        Err(err) => {
            let banner = store_failure("updating", entity, &err);
            form_response(&ctx, StatusCode::INTERNAL_SERVER_ERROR, entity, FormMode::Edit(id), &values, banner)
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Response {
    let ctx = PageContext::now();
    let (entity, id) = match resolve(&state, &path_segment).and_then(|e| Ok((e, parse_id(e, &id_str)?))) {
        Ok(found) => found,
        Err(err) => return not_found(&ctx, &err),
    };
    match CrudService::delete(&state.pool, entity, id).await {
        Ok(()) => redirect_with_notice(&state, entity, Notice::Deleted),
        Err(err @ AppError::NotFound(_)) => not_found(&ctx, &err),
        Err(err) => {
            let banner = store_failure("deleting", entity, &err);
            match CrudService::list(&state.pool, entity).await {
                Ok(rows) => html(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    render::list_page(&ctx, entity, &rows, Some(&banner)),
                ),
                Err(_) => html(StatusCode::INTERNAL_SERVER_ERROR, render::error_page(&ctx, &banner.message)),
            }
        }
    }
}

/// Unmatched paths get the same 404 page as unknown ids.
pub async fn fallback() -> Response {
    let ctx = PageContext::now();
    html(StatusCode::NOT_FOUND, render::not_found_page(&ctx, "page"))
}
