use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use listing_core::{validate_order_by, Page};

use crate::api::rest::dto::{CreateDocumentReq, DocumentDto, UpdateDocumentReq};
use crate::api::rest::error::{map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

/// Store a new document for a user
#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    request_body = CreateDocumentReq,
    responses(
        (status = 201, description = "Created document", body = DocumentDto),
        (status = 404, description = "Owner not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn create_document(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateDocumentReq>,
) -> Result<(StatusCode, Json<DocumentDto>), ProblemResponse> {
    let document = state
        .service
        .create_document(req.into())
        .await
        .map_err(|e| map_domain_error(&e, "/documents"))?;
    Ok((StatusCode::CREATED, Json(document.into())))
}

/// Get a document by ID
#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = Uuid, Path, description = "Document UUID")),
    responses(
        (status = 200, description = "Document found", body = DocumentDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_document(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDto>, ProblemResponse> {
    let document = state
        .service
        .get_document(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/documents/{id}")))?;
    Ok(Json(document.into()))
}

/// List documents with sorting and pagination
#[utoipa::path(
    get,
    path = "/documents",
    tag = "documents",
    params(
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)"),
        ("order_by" = Option<Vec<String>>, Query, description = "Repeated +field / -field tokens")
    ),
    responses(
        (status = 200, description = "Page of documents", body = Page<DocumentDto>),
        (status = 422, description = "Invalid listing parameters", body = Problem)
    )
)]
pub async fn list_documents(
    Extension(state): Extension<Arc<DirectoryState>>,
    params: ListParams,
) -> Result<Json<Page<DocumentDto>>, ProblemResponse> {
    let tokens = validate_order_by(&params.order_by, state.specs.allowed_fields("document"))
        .map_err(|e| map_listing_error(&e, "/documents"))?;
    let page = state
        .service
        .list_documents(&tokens, &params.page)
        .await
        .map_err(|e| map_domain_error(&e, "/documents"))?;
    Ok(Json(page.map_items(DocumentDto::from)))
}

/// Replace a document's payload
#[utoipa::path(
    put,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = Uuid, Path, description = "Document UUID")),
    request_body = UpdateDocumentReq,
    responses(
        (status = 200, description = "Updated document", body = DocumentDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn update_document(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentReq>,
) -> Result<Json<DocumentDto>, ProblemResponse> {
    let document = state
        .service
        .update_document(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/documents/{id}")))?;
    Ok(Json(document.into()))
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = Uuid, Path, description = "Document UUID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_document(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_document(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/documents/{id}")))?;
    Ok(StatusCode::NO_CONTENT)
}
