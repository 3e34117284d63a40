use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use listing_core::{validate_order_by, Page};

use crate::api::rest::dto::{CreateOrderReq, OrderDto};
use crate::api::rest::error::{map_domain_error, map_listing_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::query::ListParams;
use crate::DirectoryState;

/// Create a new order between two users
#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderReq,
    responses(
        (status = 201, description = "Created order", body = OrderDto),
        (status = 404, description = "Payer or payee not found", body = Problem),
        (status = 422, description = "Validation error", body = Problem)
    )
)]
pub async fn create_order(
    Extension(state): Extension<Arc<DirectoryState>>,
    Json(req): Json<CreateOrderReq>,
) -> Result<(StatusCode, Json<OrderDto>), ProblemResponse> {
    let order = state
        .service
        .create_order(req.into())
        .await
        .map_err(|e| map_domain_error(&e, "/orders"))?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_order(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDto>, ProblemResponse> {
    let order = state
        .service
        .get_order(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/orders/{id}")))?;
    Ok(Json(order.into()))
}

/// List orders with sorting and pagination
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    params(
        ("limit" = Option<u64>, Query, description = "Page size (1-50, default 10)"),
        ("offset" = Option<u64>, Query, description = "Rows to skip (0-1000, default 0)"),
        ("order_by" = Option<Vec<String>>, Query, description = "Repeated +field / -field tokens")
    ),
    responses(
        (status = 200, description = "Page of orders", body = Page<OrderDto>),
        (status = 422, description = "Invalid listing parameters", body = Problem)
    )
)]
pub async fn list_orders(
    Extension(state): Extension<Arc<DirectoryState>>,
    params: ListParams,
) -> Result<Json<Page<OrderDto>>, ProblemResponse> {
    let tokens = validate_order_by(&params.order_by, state.specs.allowed_fields("order"))
        .map_err(|e| map_listing_error(&e, "/orders"))?;
    let page = state
        .service
        .list_orders(&tokens, &params.page)
        .await
        .map_err(|e| map_domain_error(&e, "/orders"))?;
    Ok(Json(page.map_items(OrderDto::from)))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_order(
    Extension(state): Extension<Arc<DirectoryState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    state
        .service
        .delete_order(id)
        .await
        .map_err(|e| map_domain_error(&e, &format!("/orders/{id}")))?;
    Ok(StatusCode::NO_CONTENT)
}
