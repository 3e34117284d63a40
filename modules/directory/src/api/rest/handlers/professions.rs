use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use listing_core::{validate_order_by, Page};

use crate::api::rest::dto::{CreateProfessionReq, ProfessionDto, UpdateProfessionReq};
use crate::api::rest::error::{map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

/// Create a new profession
#[utoipa::path(
    post,
    path = "/professions",
    tag = "professions",
    request_body = CreateProfessionReq,
    responses(
        (status = 201, description = "Created profession", body = ProfessionDto),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn create_profession(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateProfessionReq>,
) -> Result<(StatusCode, Json<ProfessionDto>), ProblemResponse> {
    let profession = state
        .service
        .create_profession(req.into())
        .await
        .map_err(|e| map_domain_error(&e, "/professions"))?;
    Ok((StatusCode::CREATED, Json(profession.into())))
}

/// Get a profession by ID
#[utoipa::path(
    get,
    path = "/professions/{id}",
    tag = "professions",
    params(("id" = Uuid, Path, description = "Profession UUID")),
    responses(
        (status = 200, description = "Profession found", body = ProfessionDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_profession(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessionDto>, ProblemResponse> {
    let profession = state
        .service
        .get_profession(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/professions/{id}")))?;
    Ok(Json(profession.into()))
}

/// List professions with sorting and pagination
#[utoipa::path(
    get,
    path = "/professions",
    tag = "professions",
    params(
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)"),
        ("order_by" = Option<Vec<String>>, Query, description = "Repeated +field / -field tokens")
    ),
    responses(
        (status = 200, description = "Page of professions", body = Page<ProfessionDto>),
        (status = 422, description = "Invalid listing parameters", body = Problem)
    )
)]
pub async fn list_professions(
    Extension(state): Extension<Arc<DirectoryState>>,
    params: ListParams,
) -> Result<Json<Page<ProfessionDto>>, ProblemResponse> {
    let tokens = validate_order_by(&params.order_by, state.specs.allowed_fields("profession"))
        .map_err(|e| map_listing_error(&e, "/professions"))?;
    let page = state
        .service
        .list_professions(&tokens, &params.page)
        .await
        .map_err(|e| map_domain_error(&e, "/professions"))?;
    Ok(Json(page.map_items(ProfessionDto::from)))
}

/// Update a profession
#[utoipa::path(
    put,
    path = "/professions/{id}",
    tag = "professions",
    params(("id" = Uuid, Path, description = "Profession UUID")),
    request_body = UpdateProfessionReq,
    responses(
        (status = 200, description = "Updated profession", body = ProfessionDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn update_profession(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfessionReq>,
) -> Result<Json<ProfessionDto>, ProblemResponse> {
    let profession = state
        .service
        .update_profession(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/professions/{id}")))?;
    Ok(Json(profession.into()))
}

/// Delete a profession
#[utoipa::path(
    delete,
    path = "/professions/{id}",
    tag = "professions",
    params(("id" = Uuid, Path, description = "Profession UUID")),
    responses(
        (status = 204, description = "Profession deleted"),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_profession(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_profession(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/professions/{id}")))?;
    Ok(StatusCode::NO_CONTENT)
}
