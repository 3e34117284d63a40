use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use listing_core::{validate_order_by, Page};

use crate::api::rest::dto::{CompanyDto, CreateCompanyReq, PatchCompanyReq, UpdateCompanyReq};
use crate::api::rest::error::{map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

/// Create a new company
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CreateCompanyReq,
    responses(
        (status = 201, description = "Created company", body = CompanyDto),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn create_company(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateCompanyReq>,
) -> Result<(StatusCode, Json<CompanyDto>), ProblemResponse> {
    let company = state
        .service
        .create_company(req.into())
        .await
        .map_err(|e| map_domain_error(&e, "/companies"))?;
    Ok((StatusCode::CREATED, Json(company.into())))
}

/// Get a company by ID
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company UUID")),
    responses(
        (status = 200, description = "Company found", body = CompanyDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_company(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyDto>, ProblemResponse> {
    let company = state
        .service
        .get_company(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/companies/{id}")))?;
    Ok(Json(company.into()))
}

/// List companies with sorting and pagination
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    params(
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)"),
        ("order_by" = Option<Vec<String>>, Query, description = "Repeated +field / -field tokens")
    ),
    responses(
        (status = 200, description = "Page of companies", body = Page<CompanyDto>),
        (status = 422, description = "Invalid listing parameters", body = Problem)
    )
)]
pub async fn list_companies(
    Extension(state): Extension<Arc<DirectoryState>>,
    params: ListParams,
) -> Result<Json<Page<CompanyDto>>, ProblemResponse> {
    let tokens = validate_order_by(&params.order_by, state.specs.allowed_fields("company"))
        .map_err(|e| map_listing_error(&e, "/companies"))?;
    let page = state
        .service
        .list_companies(&tokens, &params.page)
        .await
        .map_err(|e| map_domain_error(&e, "/companies"))?;
    Ok(Json(page.map_items(CompanyDto::from)))
}

/// Update a company
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company UUID")),
    request_body = UpdateCompanyReq,
    responses(
        (status = 200, description = "Updated company", body = CompanyDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn update_company(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCompanyReq>,
) -> Result<Json<CompanyDto>, ProblemResponse> {
    let company = state
        .service
        .update_company(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/companies/{id}")))?;
    Ok(Json(company.into()))
}

/// Partially update a company; at least one field must be provided
#[utoipa::path(
    patch,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company UUID")),
    request_body = PatchCompanyReq,
    responses(
        (status = 200, description = "Patched company", body = CompanyDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn patch_company(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchCompanyReq>,
) -> Result<Json<CompanyDto>, ProblemResponse> {
    let company = state
        .service
        .patch_company(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/companies/{id}")))?;
    Ok(Json(company.into()))
}

/// Delete a company
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Company UUID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_company(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_company(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/companies/{id}")))?;
    Ok(StatusCode::NO_CONTENT)
}
