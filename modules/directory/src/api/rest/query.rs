use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use listing_core::PageParams;

use crate::api::rest::error::{from_parts, map_listing_error};
use crate::api::rest::problem::ProblemResponse;

/// Extractor for list-endpoint query parameters.
///
/// `order_by` is a repeated parameter (`?order_by=+name&order_by=-created_at`),
/// which the plain serde extractor cannot collect, so the query string is
/// walked directly. Limit/offset are range-checked here; the ordering tokens
/// stay raw because their whitelist depends on the entity being listed.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub order_by: Vec<String>,
    pub page: PageParams,
}

fn parse_int(name: &str, value: &str, instance: &str) -> Result<u64, ProblemResponse> {
    value.parse::<u64>().map_err(|_| {
        from_parts(
            axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            "LISTING_VALIDATION",
            "Invalid listing parameters",
            format!("{name} must be a non-negative integer, got '{value}'"),
            instance,
        )
    })
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl core::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let instance = parts.uri.path().to_string();
            let mut order_by = Vec::new();
            let mut limit = None;
            let mut offset = None;

            if let Some(query) = parts.uri.query() {
                for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                    match key.as_ref() {
                        "order_by" => order_by.push(value.into_owned()),
                        "limit" => limit = Some(parse_int("limit", &value, &instance)?),
                        "offset" => offset = Some(parse_int("offset", &value, &instance)?),
                        _ => {}
                    }
                }
            }

            let page = PageParams::new(limit, offset)
                .map_err(|e| map_listing_error(&e, &instance))?;
            Ok(ListParams { order_by, page })
        }
    }
}
