use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors of the directory module.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Profession not found: {id}")]
    ProfessionNotFound { id: Uuid },

    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("Company not found: {id}")]
    CompanyNotFound { id: Uuid },

    #[error("Order not found: {id}")]
    OrderNotFound { id: Uuid },

    #[error("Document not found: {id}")]
    DocumentNotFound { id: Uuid },

    #[error("User {user_id} is not linked to company {company_id}")]
    LinkNotFound { user_id: Uuid, company_id: Uuid },

    #[error("User {user_id} is already linked to company {company_id}")]
    LinkAlreadyExists { user_id: Uuid, company_id: Uuid },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Order amount out of range: {amount} (must be > 0 and <= 1000000, 2 decimal places)")]
    AmountOutOfRange { amount: Decimal },

    #[error("payer_id and payee_id must be different")]
    PayerPayeeEqual,

    #[error("At least one field must be provided for an update")]
    EmptyPatch,

    #[error("Document payload must be a non-empty JSON object")]
    EmptyDocument,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn profession_not_found(id: Uuid) -> Self {
        Self::ProfessionNotFound { id }
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn company_not_found(id: Uuid) -> Self {
        Self::CompanyNotFound { id }
    }

    pub fn order_not_found(id: Uuid) -> Self {
        Self::OrderNotFound { id }
    }

    pub fn document_not_found(id: Uuid) -> Self {
        Self::DocumentNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
