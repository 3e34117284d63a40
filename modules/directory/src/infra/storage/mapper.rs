//! Entity model → domain model conversions.

use crate::domain::model::{Company, Profession, ProfessionShort, User};
use crate::infra::storage::entity::{companies, professions, users};

impl From<professions::Model> for Profession {
    fn from(m: professions::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
            last_updated_at: m.last_updated_at,
        }
    }
}

impl From<professions::Model> for ProfessionShort {
    fn from(m: professions::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<(users::Model, professions::Model)> for User {
    fn from((user, profession): (users::Model, professions::Model)) -> Self {
        Self {
            id: user.id,
            name: user.name,
            created_at: user.created_at,
            last_updated_at: user.last_updated_at,
            profession: profession.into(),
        }
    }
}

impl From<companies::Model> for Company {
    fn from(m: companies::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
            last_updated_at: m.last_updated_at,
        }
    }
}
