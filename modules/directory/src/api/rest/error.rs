use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate.
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    ProblemResponse(
        Problem::new(status, title, detail)
            .with_code(code)
            .with_instance(instance),
    )
}

/// Map a domain error to an RFC 9457 response.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::ProfessionNotFound { .. }
        | DomainError::UserNotFound { .. }
        | DomainError::CompanyNotFound { .. }
        | DomainError::OrderNotFound { .. }
        | DomainError::DocumentNotFound { .. }
        | DomainError::LinkNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "DIRECTORY_NOT_FOUND",
            "Not found",
            e.to_string(),
            instance,
        ),
        DomainError::LinkAlreadyExists { .. } => from_parts(
            StatusCode::CONFLICT,
            "DIRECTORY_CONFLICT",
            "Conflict",
            e.to_string(),
            instance,
        ),
        DomainError::Validation { .. }
        | DomainError::AmountOutOfRange { .. }
        | DomainError::PayerPayeeEqual
        | DomainError::EmptyPatch
        | DomainError::EmptyDocument => from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "DIRECTORY_VALIDATION",
            "Validation error",
            e.to_string(),
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internals, keep the response generic.
            tracing::error!(error = %e, "database error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// Map a sort/pagination validation error to an RFC 9457 response.
///
/// Internal-class errors (composer defects) become 500s and never leak the
/// defect details; everything else is client input.
pub fn map_listing_error(e: &listing_core::Error, instance: &str) -> ProblemResponse {
    if e.is_internal() {
        tracing::error!(error = %e, "listing invariant violation");
        from_parts(
            StatusCode::INTERNAL_SERVER_ERROR,
            "LISTING_INTERNAL",
            "Internal error",
            "An internal error occurred while composing the listing",
            instance,
        )
    } else {
        from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "LISTING_VALIDATION",
            "Invalid listing parameters",
            e.to_string(),
            instance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404() {
        let e = DomainError::user_not_found(Uuid::nil());
        assert_eq!(map_domain_error(&e, "/users").0.status, 404);
    }

    #[test]
    fn conflict_maps_to_409() {
        let e = DomainError::LinkAlreadyExists {
            user_id: Uuid::nil(),
            company_id: Uuid::nil(),
        };
        assert_eq!(map_domain_error(&e, "/user-company-links").0.status, 409);
    }

    #[test]
    fn database_details_stay_internal() {
        let e = DomainError::database("connection refused by 10.0.0.5");
        let problem = map_domain_error(&e, "/users").0;
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.contains("10.0.0.5"));
    }

    #[test]
    fn listing_errors_split_by_class() {
        let user = listing_core::Error::UnknownField("ssn".into());
        assert_eq!(map_listing_error(&user, "/users").0.status, 422);

        let internal = listing_core::Error::PageOverflow { items: 5, limit: 2 };
        let problem = map_listing_error(&internal, "/users").0;
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.contains("overflow"));
    }
}
