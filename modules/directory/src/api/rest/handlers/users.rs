use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use listing_core::{validate_order_by, Page};

use crate::api::rest::dto::{CreateUserReq, PatchUserReq, UpdateUserReq, UserDto};
use crate::api::rest::error::{map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 404, description = "Profession not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn create_user(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    let user = state
        .service
        .create_user(req.into())
        .await
        .map_err(|e| map_domain_error(&e, "/users"))?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_user(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let user = state
        .service
        .get_user(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/users/{id}")))?;
    Ok(Json(user.into()))
}

/// List users with sorting and pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)"),
        ("order_by" = Option<Vec<String>>, Query, description = "Repeated +field / -field tokens")
    ),
    responses(
        (status = 200, description = "Page of users", body = Page<UserDto>),
        (status = 422, description = "Invalid listing parameters", body = Problem)
    )
)]
pub async fn list_users(
    Extension(state): Extension<Arc<DirectoryState>>,
    params: ListParams,
) -> Result<Json<Page<UserDto>>, ProblemResponse> {
    let tokens = validate_order_by(&params.order_by, state.specs.allowed_fields("user"))
        .map_err(|e| map_listing_error(&e, "/users"))?;
    let page = state
        .service
        .list_users(&tokens, &params.page)
        .await
        .map_err(|e| map_domain_error(&e, "/users"))?;
    Ok(Json(page.map_items(UserDto::from)))
}

/// Replace a user's mutable fields
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User UUID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn update_user(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let user = state
        .service
        .update_user(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/users/{id}")))?;
    Ok(Json(user.into()))
}

/// Partially update a user; at least one field must be provided
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User UUID")),
    request_body = PatchUserReq,
    responses(
        (status = 200, description = "Patched user", body = UserDto),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn patch_user(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let user = state
        .service
        .patch_user(id, req.into())
        .await
        .map_err(|e| map_domain_error(&e, &format!("/users/{id}")))?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_user(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_user(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/users/{id}")))?;
    Ok(StatusCode::NO_CONTENT)
}
