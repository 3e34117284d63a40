use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use listing_core::{Page, PageParams, SortToken};

use crate::domain::error::DomainError;
use crate::domain::model::{
    Company, CompanyPatch, Document, LinkWithCompany, LinkWithUser, NewCompany, NewDocument,
    NewOrder, NewProfession, NewUser, NewUserCompanyLink, Order, Profession, UpdateCompany,
    UpdateDocument, UpdateProfession, UpdateUser, User, UserCompanyLink, UserPatch,
};
use crate::domain::repo::{
    CompaniesRepository, DocumentRecord, DocumentsRepository, LinksRepository, OrderRecord,
    OrdersRepository, ProfessionsRepository, UserRecord, UserUpdateRecord, UsersRepository,
};

const MAX_PROFESSION_NAME: usize = 50;
const MAX_USER_NAME: usize = 20;
const MAX_COMPANY_NAME: usize = 50;
const MAX_ORDER_AMOUNT: u32 = 1_000_000;

/// Repository ports the service depends on, one per entity family.
#[derive(Clone)]
pub struct Repositories {
    pub professions: Arc<dyn ProfessionsRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub companies: Arc<dyn CompaniesRepository>,
    pub orders: Arc<dyn OrdersRepository>,
    pub documents: Arc<dyn DocumentsRepository>,
    pub links: Arc<dyn LinksRepository>,
}

/// Domain service with the business rules of the directory module.
/// Depends only on repository ports, not on storage types.
#[derive(Clone)]
pub struct Service {
    repos: Repositories,
}

type Result<T> = std::result::Result<T, DomainError>;

fn db_err(e: anyhow::Error) -> DomainError {
    DomainError::database(e.to_string())
}

/// Trim and bound a display name. The caller decides about case folding.
fn normalize_name(raw: &str, max: usize, field: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Amounts are positive, capped, and carry at most two decimal places.
fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO
        || amount > Decimal::from(MAX_ORDER_AMOUNT)
        || amount.normalize().scale() > 2
    {
        return Err(DomainError::AmountOutOfRange { amount });
    }
    Ok(())
}

fn validate_document_payload(document: &serde_json::Value) -> Result<()> {
    match document {
        serde_json::Value::Object(map) if !map.is_empty() => Ok(()),
        _ => Err(DomainError::EmptyDocument),
    }
}

impl Service {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    // --- professions ---

    #[instrument(name = "directory.service.create_profession", skip(self, input))]
    pub async fn create_profession(&self, input: NewProfession) -> Result<Profession> {
        let name = normalize_name(&input.name, MAX_PROFESSION_NAME, "name")?;
        let profession = Profession {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            last_updated_at: None,
        };
        self.repos
            .professions
            .insert(&profession)
            .await
            .map_err(db_err)?;
        info!(id = %profession.id, "created profession");
        Ok(profession)
    }

    #[instrument(name = "directory.service.get_profession", skip(self), fields(id = %id))]
    pub async fn get_profession(&self, id: Uuid) -> Result<Profession> {
        self.repos
            .professions
            .find_by_id(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::ProfessionNotFound { id })
    }

    #[instrument(name = "directory.service.list_professions", skip(self, tokens, page))]
    pub async fn list_professions(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Page<Profession>> {
        let result = self
            .repos
            .professions
            .list(tokens, page)
            .await
            .map_err(db_err)?;
        debug!(count = result.items_count, "listed professions");
        Ok(result)
    }

    #[instrument(name = "directory.service.update_profession", skip(self, update), fields(id = %id))]
    pub async fn update_profession(&self, id: Uuid, update: UpdateProfession) -> Result<Profession> {
        let name = normalize_name(&update.name, MAX_PROFESSION_NAME, "name")?;
        let existing = self.get_profession(id).await?;
        let now = Utc::now();
        if !self
            .repos
            .professions
            .update(id, &name, now)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::ProfessionNotFound { id });
        }
        Ok(Profession {
            name,
            last_updated_at: Some(now),
            ..existing
        })
    }

    #[instrument(name = "directory.service.delete_profession", skip(self), fields(id = %id))]
    pub async fn delete_profession(&self, id: Uuid) -> Result<()> {
        if !self.repos.professions.delete(id).await.map_err(db_err)? {
            return Err(DomainError::ProfessionNotFound { id });
        }
        info!("deleted profession");
        Ok(())
    }

    // --- users ---

    #[instrument(name = "directory.service.create_user", skip(self, input))]
    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        let name = normalize_name(&input.name, MAX_USER_NAME, "name")?.to_uppercase();
        // The profession must exist before a user can reference it.
        self.get_profession(input.profession_id).await?;

        let record = UserRecord {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            profession_id: input.profession_id,
        };
        self.repos.users.insert(&record).await.map_err(db_err)?;
        info!(id = %record.id, "created user");
        self.get_user(record.id).await
    }

    #[instrument(name = "directory.service.get_user", skip(self), fields(id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.repos
            .users
            .find_by_id(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::UserNotFound { id })
    }

    #[instrument(name = "directory.service.list_users", skip(self, tokens, page))]
    pub async fn list_users(&self, tokens: &[SortToken], page: &PageParams) -> Result<Page<User>> {
        let result = self.repos.users.list(tokens, page).await.map_err(db_err)?;
        debug!(count = result.items_count, "listed users");
        Ok(result)
    }

    #[instrument(name = "directory.service.update_user", skip(self, update), fields(id = %id))]
    pub async fn update_user(&self, id: Uuid, update: UpdateUser) -> Result<User> {
        let name = normalize_name(&update.name, MAX_USER_NAME, "name")?.to_uppercase();
        self.get_user(id).await?;
        self.get_profession(update.profession_id).await?;

        let record = UserUpdateRecord {
            name,
            profession_id: update.profession_id,
            last_updated_at: Utc::now(),
        };
        if !self
            .repos
            .users
            .update(id, &record)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::UserNotFound { id });
        }
        self.get_user(id).await
    }

    #[instrument(name = "directory.service.patch_user", skip(self, patch), fields(id = %id))]
    pub async fn patch_user(&self, id: Uuid, patch: UserPatch) -> Result<User> {
        if patch.is_empty() {
            return Err(DomainError::EmptyPatch);
        }
        let existing = self.get_user(id).await?;

        let name = match patch.name {
            Some(raw) => normalize_name(&raw, MAX_USER_NAME, "name")?.to_uppercase(),
            None => existing.name,
        };
        let profession_id = match patch.profession_id {
            Some(pid) => {
                self.get_profession(pid).await?;
                pid
            }
            None => existing.profession.id,
        };

        let record = UserUpdateRecord {
            name,
            profession_id,
            last_updated_at: Utc::now(),
        };
        if !self
            .repos
            .users
            .update(id, &record)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::UserNotFound { id });
        }
        self.get_user(id).await
    }

    #[instrument(name = "directory.service.delete_user", skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        if !self.repos.users.delete(id).await.map_err(db_err)? {
            return Err(DomainError::UserNotFound { id });
        }
        info!("deleted user");
        Ok(())
    }

    // --- companies ---

    #[instrument(name = "directory.service.create_company", skip(self, input))]
    pub async fn create_company(&self, input: NewCompany) -> Result<Company> {
        let name = normalize_name(&input.name, MAX_COMPANY_NAME, "name")?;
        let company = Company {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            last_updated_at: None,
        };
        self.repos
            .companies
            .insert(&company)
            .await
            .map_err(db_err)?;
        info!(id = %company.id, "created company");
        Ok(company)
    }

    #[instrument(name = "directory.service.get_company", skip(self), fields(id = %id))]
    pub async fn get_company(&self, id: Uuid) -> Result<Company> {
        self.repos
            .companies
            .find_by_id(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::CompanyNotFound { id })
    }

    #[instrument(name = "directory.service.list_companies", skip(self, tokens, page))]
    pub async fn list_companies(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Page<Company>> {
        let result = self
            .repos
            .companies
            .list(tokens, page)
            .await
            .map_err(db_err)?;
        debug!(count = result.items_count, "listed companies");
        Ok(result)
    }

    #[instrument(name = "directory.service.update_company", skip(self, update), fields(id = %id))]
    pub async fn update_company(&self, id: Uuid, update: UpdateCompany) -> Result<Company> {
        let name = normalize_name(&update.name, MAX_COMPANY_NAME, "name")?;
        let existing = self.get_company(id).await?;
        let now = Utc::now();
        if !self
            .repos
            .companies
            .update(id, &name, now)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::CompanyNotFound { id });
        }
        Ok(Company {
            name,
            last_updated_at: Some(now),
            ..existing
        })
    }

    #[instrument(name = "directory.service.patch_company", skip(self, patch), fields(id = %id))]
    pub async fn patch_company(&self, id: Uuid, patch: CompanyPatch) -> Result<Company> {
        if patch.is_empty() {
            return Err(DomainError::EmptyPatch);
        }
        let existing = self.get_company(id).await?;
        let name = match patch.name {
            Some(raw) => normalize_name(&raw, MAX_COMPANY_NAME, "name")?,
            None => existing.name.clone(),
        };
        let now = Utc::now();
        if !self
            .repos
            .companies
            .update(id, &name, now)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::CompanyNotFound { id });
        }
        Ok(Company {
            name,
            last_updated_at: Some(now),
            ..existing
        })
    }

    #[instrument(name = "directory.service.delete_company", skip(self), fields(id = %id))]
    pub async fn delete_company(&self, id: Uuid) -> Result<()> {
        if !self.repos.companies.delete(id).await.map_err(db_err)? {
            return Err(DomainError::CompanyNotFound { id });
        }
        info!("deleted company");
        Ok(())
    }

    // --- orders ---

    #[instrument(name = "directory.service.create_order", skip(self, input))]
    pub async fn create_order(&self, input: NewOrder) -> Result<Order> {
        validate_amount(input.amount)?;
        if input.payer_id == input.payee_id {
            return Err(DomainError::PayerPayeeEqual);
        }
        self.get_user(input.payer_id).await?;
        self.get_user(input.payee_id).await?;

        let record = OrderRecord {
            id: Uuid::new_v4(),
            amount: input.amount,
            payer_id: input.payer_id,
            payee_id: input.payee_id,
            created_at: Utc::now(),
        };
        self.repos.orders.insert(&record).await.map_err(db_err)?;
        info!(id = %record.id, "created order");
        self.get_order(record.id).await
    }

    #[instrument(name = "directory.service.get_order", skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: Uuid) -> Result<Order> {
        self.repos
            .orders
            .find_by_id(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::OrderNotFound { id })
    }

    #[instrument(name = "directory.service.list_orders", skip(self, tokens, page))]
    pub async fn list_orders(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Page<Order>> {
        let result = self.repos.orders.list(tokens, page).await.map_err(db_err)?;
        debug!(count = result.items_count, "listed orders");
        Ok(result)
    }

    #[instrument(name = "directory.service.delete_order", skip(self), fields(id = %id))]
    pub async fn delete_order(&self, id: Uuid) -> Result<()> {
        if !self.repos.orders.delete(id).await.map_err(db_err)? {
            return Err(DomainError::OrderNotFound { id });
        }
        info!("deleted order");
        Ok(())
    }

    // --- documents ---

    #[instrument(name = "directory.service.create_document", skip(self, input))]
    pub async fn create_document(&self, input: NewDocument) -> Result<Document> {
        validate_document_payload(&input.document)?;
        self.get_user(input.user_id).await?;

        let record = DocumentRecord {
            id: Uuid::new_v4(),
            document: input.document,
            created_at: Utc::now(),
            user_id: input.user_id,
        };
        self.repos
            .documents
            .insert(&record)
            .await
            .map_err(db_err)?;
        info!(id = %record.id, "created document");
        Ok(Document {
            id: record.id,
            document: record.document,
            created_at: record.created_at,
            last_updated_at: None,
            user_id: record.user_id,
        })
    }

    #[instrument(name = "directory.service.get_document", skip(self), fields(id = %id))]
    pub async fn get_document(&self, id: Uuid) -> Result<Document> {
        self.repos
            .documents
            .find_by_id(id)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::DocumentNotFound { id })
    }

    #[instrument(name = "directory.service.list_documents", skip(self, tokens, page))]
    pub async fn list_documents(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Page<Document>> {
        let result = self
            .repos
            .documents
            .list(tokens, page)
            .await
            .map_err(db_err)?;
        debug!(count = result.items_count, "listed documents");
        Ok(result)
    }

    #[instrument(name = "directory.service.update_document", skip(self, update), fields(id = %id))]
    pub async fn update_document(&self, id: Uuid, update: UpdateDocument) -> Result<Document> {
        validate_document_payload(&update.document)?;
        let existing = self.get_document(id).await?;
        let now = Utc::now();
        if !self
            .repos
            .documents
            .update(id, &update.document, now)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::DocumentNotFound { id });
        }
        Ok(Document {
            document: update.document,
            last_updated_at: Some(now),
            ..existing
        })
    }

    #[instrument(name = "directory.service.delete_document", skip(self), fields(id = %id))]
    pub async fn delete_document(&self, id: Uuid) -> Result<()> {
        if !self.repos.documents.delete(id).await.map_err(db_err)? {
            return Err(DomainError::DocumentNotFound { id });
        }
        info!("deleted document");
        Ok(())
    }

    // --- user-company links ---

    #[instrument(
        name = "directory.service.create_link",
        skip(self),
        fields(user_id = %input.user_id, company_id = %input.company_id)
    )]
    pub async fn create_link(&self, input: NewUserCompanyLink) -> Result<UserCompanyLink> {
        self.get_user(input.user_id).await?;
        self.get_company(input.company_id).await?;
        if self
            .repos
            .links
            .exists(input.user_id, input.company_id)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::LinkAlreadyExists {
                user_id: input.user_id,
                company_id: input.company_id,
            });
        }

        let link = UserCompanyLink {
            user_id: input.user_id,
            company_id: input.company_id,
            created_at: Utc::now(),
        };
        self.repos.links.insert(&link).await.map_err(db_err)?;
        info!("linked user to company");
        Ok(link)
    }

    #[instrument(
        name = "directory.service.delete_link",
        skip(self),
        fields(user_id = %user_id, company_id = %company_id)
    )]
    pub async fn delete_link(&self, user_id: Uuid, company_id: Uuid) -> Result<()> {
        self.get_user(user_id).await?;
        self.get_company(company_id).await?;
        if !self
            .repos
            .links
            .delete(user_id, company_id)
            .await
            .map_err(db_err)?
        {
            return Err(DomainError::LinkNotFound {
                user_id,
                company_id,
            });
        }
        info!("unlinked user from company");
        Ok(())
    }

    #[instrument(name = "directory.service.list_links_by_user", skip(self, page), fields(user_id = %user_id))]
    pub async fn list_links_by_user(
        &self,
        user_id: Uuid,
        page: &PageParams,
    ) -> Result<Page<LinkWithCompany>> {
        self.get_user(user_id).await?;
        self.repos
            .links
            .list_by_user(user_id, page)
            .await
            .map_err(db_err)
    }

    #[instrument(name = "directory.service.list_links_by_company", skip(self, page), fields(company_id = %company_id))]
    pub async fn list_links_by_company(
        &self,
        company_id: Uuid,
        page: &PageParams,
    ) -> Result<Page<LinkWithUser>> {
        self.get_company(company_id).await?;
        self.repos
            .links
            .list_by_company(company_id, page)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(normalize_name("  smith  ", 20, "name").unwrap(), "smith");
        assert!(normalize_name("   ", 20, "name").is_err());
        assert!(normalize_name(&"x".repeat(21), 20, "name").is_err());
        assert!(normalize_name(&"x".repeat(20), 20, "name").is_ok());
    }

    fn dec(s: &str) -> Decimal {
        use std::str::FromStr;
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn amount_bounds_and_precision() {
        assert!(validate_amount(dec("150.25")).is_ok());
        assert!(validate_amount(dec("1000000")).is_ok());
        assert!(validate_amount(dec("0")).is_err());
        assert!(validate_amount(dec("-1")).is_err());
        assert!(validate_amount(dec("1000000.01")).is_err());
        assert!(validate_amount(dec("10.999")).is_err());
        // trailing zeros beyond two places are not a precision violation
        assert!(validate_amount(dec("10.2500")).is_ok());
    }

    #[test]
    fn document_payload_must_be_nonempty_object() {
        assert!(validate_document_payload(&serde_json::json!({"k": 1})).is_ok());
        assert!(validate_document_payload(&serde_json::json!({})).is_err());
        assert!(validate_document_payload(&serde_json::json!([1, 2])).is_err());
        assert!(validate_document_payload(&serde_json::json!("text")).is_err());
    }
}
