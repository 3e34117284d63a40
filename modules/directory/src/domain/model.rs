//! Domain models of the directory module.
//!
//! Short forms carry just enough of a related entity to embed in another
//! resource (a user's profession, an order's payer/payee), matching the
//! joined projections the repositories produce.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Profession {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfessionShort {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewProfession {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProfession {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub profession: ProfessionShort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserShort {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub profession_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub profession_id: Uuid,
}

/// Partial update; the service rejects a patch with no fields set.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub profession_id: Option<Uuid>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profession_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyShort {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCompany {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Orders are immutable once created; there is no update flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub amount: Decimal,
    pub payer: UserShort,
    pub payee: UserShort,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub amount: Decimal,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub document: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub document: serde_json::Value,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdateDocument {
    pub document: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserCompanyLink {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserCompanyLink {
    pub user_id: Uuid,
    pub company_id: Uuid,
}

/// Link listing scoped by user: each row embeds the linked company.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkWithCompany {
    pub user_id: Uuid,
    pub company: CompanyShort,
    pub created_at: DateTime<Utc>,
}

/// Link listing scoped by company: each row embeds the linked user.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkWithUser {
    pub company_id: Uuid,
    pub user: UserShort,
    pub created_at: DateTime<Utc>,
}
