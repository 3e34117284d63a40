//! REST DTOs and their conversions to/from the domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::model::{
    Company, CompanyPatch, CompanyShort, Document, LinkWithCompany, LinkWithUser, NewCompany,
    NewDocument, NewOrder, NewProfession, NewUser, NewUserCompanyLink, Order, Profession,
    ProfessionShort, UpdateCompany, UpdateDocument, UpdateProfession, UpdateUser, User,
    UserCompanyLink, UserPatch, UserShort,
};

// --- professions ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfessionDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfessionShortDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProfessionReq {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfessionReq {
    pub name: String,
}

// --- users ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub profession: ProfessionShortDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShortDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub name: String,
    pub profession_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserReq {
    pub name: String,
    pub profession_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatchUserReq {
    pub name: Option<String>,
    pub profession_id: Option<Uuid>,
}

// --- companies ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyShortDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCompanyReq {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCompanyReq {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatchCompanyReq {
    pub name: Option<String>,
}

// --- orders ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    #[schema(value_type = String, example = "150.25")]
    pub amount: Decimal,
    pub payer: UserShortDto,
    pub payee: UserShortDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderReq {
    #[schema(value_type = String, example = "150.25")]
    pub amount: Decimal,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
}

// --- documents ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentDto {
    pub id: Uuid,
    pub document: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDocumentReq {
    pub document: serde_json::Value,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDocumentReq {
    pub document: serde_json::Value,
}

// --- user-company links ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkDto {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLinkReq {
    pub user_id: Uuid,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkWithCompanyDto {
    pub user_id: Uuid,
    pub company: CompanyShortDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkWithUserDto {
    pub company_id: Uuid,
    pub user: UserShortDto,
    pub created_at: DateTime<Utc>,
}

// --- conversions: domain -> DTO ---

impl From<Profession> for ProfessionDto {
    fn from(p: Profession) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
            last_updated_at: p.last_updated_at,
        }
    }
}

impl From<ProfessionShort> for ProfessionShortDto {
    fn from(p: ProfessionShort) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            created_at: u.created_at,
            last_updated_at: u.last_updated_at,
            profession: u.profession.into(),
        }
    }
}

impl From<UserShort> for UserShortDto {
    fn from(u: UserShort) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            last_updated_at: c.last_updated_at,
        }
    }
}

impl From<CompanyShort> for CompanyShortDto {
    fn from(c: CompanyShort) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            amount: o.amount,
            payer: o.payer.into(),
            payee: o.payee.into(),
            created_at: o.created_at,
        }
    }
}

impl From<Document> for DocumentDto {
    fn from(d: Document) -> Self {
        Self {
            id: d.id,
            document: d.document,
            created_at: d.created_at,
            last_updated_at: d.last_updated_at,
            user_id: d.user_id,
        }
    }
}

impl From<UserCompanyLink> for LinkDto {
    fn from(l: UserCompanyLink) -> Self {
        Self {
            user_id: l.user_id,
            company_id: l.company_id,
            created_at: l.created_at,
        }
    }
}

impl From<LinkWithCompany> for LinkWithCompanyDto {
    fn from(l: LinkWithCompany) -> Self {
        Self {
            user_id: l.user_id,
            company: l.company.into(),
            created_at: l.created_at,
        }
    }
}

impl From<LinkWithUser> for LinkWithUserDto {
    fn from(l: LinkWithUser) -> Self {
        Self {
            company_id: l.company_id,
            user: l.user.into(),
            created_at: l.created_at,
        }
    }
}

// --- conversions: request -> domain input ---

impl From<CreateProfessionReq> for NewProfession {
    fn from(req: CreateProfessionReq) -> Self {
        Self { name: req.name }
    }
}

impl From<UpdateProfessionReq> for UpdateProfession {
    fn from(req: UpdateProfessionReq) -> Self {
        Self { name: req.name }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            profession_id: req.profession_id,
        }
    }
}

impl From<UpdateUserReq> for UpdateUser {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            profession_id: req.profession_id,
        }
    }
}

impl From<PatchUserReq> for UserPatch {
    fn from(req: PatchUserReq) -> Self {
        Self {
            name: req.name,
            profession_id: req.profession_id,
        }
    }
}

impl From<CreateCompanyReq> for NewCompany {
    fn from(req: CreateCompanyReq) -> Self {
        Self { name: req.name }
    }
}

impl From<UpdateCompanyReq> for UpdateCompany {
    fn from(req: UpdateCompanyReq) -> Self {
        Self { name: req.name }
    }
}

impl From<PatchCompanyReq> for CompanyPatch {
    fn from(req: PatchCompanyReq) -> Self {
        Self { name: req.name }
    }
}

impl From<CreateOrderReq> for NewOrder {
    fn from(req: CreateOrderReq) -> Self {
        Self {
            amount: req.amount,
            payer_id: req.payer_id,
            payee_id: req.payee_id,
        }
    }
}

impl From<CreateDocumentReq> for NewDocument {
    fn from(req: CreateDocumentReq) -> Self {
        Self {
            document: req.document,
            user_id: req.user_id,
        }
    }
}

impl From<UpdateDocumentReq> for UpdateDocument {
    fn from(req: UpdateDocumentReq) -> Self {
        Self {
            document: req.document,
        }
    }
}

impl From<CreateLinkReq> for NewUserCompanyLink {
    fn from(req: CreateLinkReq) -> Self {
        Self {
            user_id: req.user_id,
            company_id: req.company_id,
        }
    }
}
