use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use listing_core::validate_order_by;

use crate::api::rest::dto::{CreateLinkReq, LinkDto, LinkWithCompanyDto, LinkWithUserDto};
use crate::api::rest::error::{from_parts, map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

const LINKS_PATH: &str = "/user-company-links";

/// Link a user to a company
#[utoipa::path(
    post,
    path = "/user-company-links",
    tag = "user-company-links",
    request_body = CreateLinkReq,
    responses(
        (status = 201, description = "Created link", body = LinkDto),
        (status = 404, description = "User or company not found", body = Problem),
        (status = 409, description = "Link already exists", body = Problem)
    )
)]
pub async fn create_link(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateLinkReq>,
) -> Result<(StatusCode, Json<LinkDto>), ProblemResponse> {
    let link = state
        .service
        .create_link(req.into())
        .await
        .map_err(|e| map_domain_error(&e, LINKS_PATH))?;
    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Unlink a user from a company
#[utoipa::path(
    delete,
    path = "/user-company-links/{user_id}/{company_id}",
    tag = "user-company-links",
    params(
        ("user_id" = Uuid, Path, description = "User UUID"),
        ("company_id" = Uuid, Path, description = "Company UUID")
    ),
    responses(
        (status = 204, description = "Link deleted"),
        (status = 404, description = "User, company or link not found", body = Problem)
    )
)]
pub async fn delete_link(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path((user_id, company_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_link(user_id, company_id)
        .await
        .map_err(|e| {
            map_domain_error(&e, &format!("{LINKS_PATH}/{user_id}/{company_id}"))
        })?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct LinkScopeQuery {
    pub user_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}

/// List links scoped by exactly one of `user_id` / `company_id`
///
/// The item shape depends on the scope: listing a user's links embeds the
/// linked companies, listing a company's links embeds the linked users.
#[utoipa::path(
    get,
    path = "/user-company-links",
    tag = "user-company-links",
    params(
        ("user_id" = Option<Uuid>, Query, description = "List companies linked to this user"),
        ("company_id" = Option<Uuid>, Query, description = "List users linked to this company"),
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)")
    ),
    responses(
        (status = 200, description = "Page of links"),
        (status = 404, description = "Scope entity not found", body = Problem),
        (status = 422, description = "Invalid scope or listing parameters", body = Problem)
    )
)]
pub async fn list_links(
    Extension(state): Extension<Arc<DirectoryState>>,
    Query(scope): Query<LinkScopeQuery>,
    params: ListParams,
) -> Result<Response, ProblemResponse> {
    // Links are not sortable; any order_by token is rejected here.
    validate_order_by(&params.order_by, state.specs.allowed_fields("link"))
        .map_err(|e| map_listing_error(&e, LINKS_PATH))?;

    match (scope.user_id, scope.company_id) {
        (Some(user_id), None) => {
            let page = state
                .service
                .list_links_by_user(user_id, &params.page)
                .await
                .map_err(|e| map_domain_error(&e, LINKS_PATH))?;
            Ok(Json(page.map_items(LinkWithCompanyDto::from)).into_response())
        }
        (None, Some(company_id)) => {
            let page = state
                .service
                .list_links_by_company(company_id, &params.page)
                .await
                .map_err(|e| map_domain_error(&e, LINKS_PATH))?;
            Ok(Json(page.map_items(LinkWithUserDto::from)).into_response())
        }
        _ => Err(from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "LISTING_VALIDATION",
            "Invalid listing parameters",
            "exactly one of user_id or company_id must be provided",
            LINKS_PATH,
        )),
    }
}
