//! Typed-select repositories (professions, users).
//!
//! List queries go through the structured composer: whitelisted field names
//! resolve to `Column` values before they touch the query.

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
};
use uuid::Uuid;

use listing_core::{Page, PageParams, SortToken};
use listing_db::{paginate_select, QueryComposer, SelectComposer, SortColumnMap};

use crate::domain::model::{Profession, User};
use crate::domain::repo::{
    ProfessionsRepository, UserRecord, UserUpdateRecord, UsersRepository,
};
use crate::infra::storage::entity::{professions, users};
use crate::infra::storage::sort::{profession_sort_columns, user_sort_columns};

/// Treat "no row matched" as `false` instead of an error.
fn updated<T>(res: Result<T, DbErr>) -> Result<bool, DbErr> {
    match res {
        Ok(_) => Ok(true),
        Err(DbErr::RecordNotUpdated) => Ok(false),
        Err(e) => Err(e),
    }
}

pub struct SeaOrmProfessionsRepository {
    db: DatabaseConnection,
    columns: SortColumnMap<professions::Entity>,
}

impl SeaOrmProfessionsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            columns: profession_sort_columns(),
        }
    }
}

#[async_trait::async_trait]
impl ProfessionsRepository for SeaOrmProfessionsRepository {
    async fn insert(&self, profession: &Profession) -> anyhow::Result<()> {
        let model = professions::ActiveModel {
            id: Set(profession.id),
            name: Set(profession.name.clone()),
            created_at: Set(profession.created_at),
            last_updated_at: Set(profession.last_updated_at),
        };
        model
            .insert(&self.db)
            .await
            .context("insert profession failed")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profession>> {
        let found = professions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profession failed")?;
        Ok(found.map(Into::into))
    }

    async fn list(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> anyhow::Result<Page<Profession>> {
        let result = paginate_select(
            professions::Entity::find(),
            &self.db,
            tokens,
            page,
            &self.columns,
            Profession::from,
        )
        .await
        .context("list professions failed")?;
        Ok(result)
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let model = professions::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            last_updated_at: Set(Some(last_updated_at)),
            ..Default::default()
        };
        Ok(updated(model.update(&self.db).await).context("update profession failed")?)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = professions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profession failed")?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
    columns: SortColumnMap<users::Entity>,
}

impl SeaOrmUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            columns: user_sort_columns(),
        }
    }
}

#[async_trait::async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn insert(&self, user: &UserRecord) -> anyhow::Result<()> {
        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            created_at: Set(user.created_at),
            last_updated_at: Set(None),
            profession_id: Set(user.profession_id),
        };
        model.insert(&self.db).await.context("insert user failed")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = users::Entity::find_by_id(id)
            .find_also_related(professions::Entity)
            .one(&self.db)
            .await
            .context("find user failed")?;
        found
            .map(|(user, profession)| {
                let profession = profession
                    .ok_or_else(|| anyhow!("user {} references a missing profession", user.id))?;
                Ok(User::from((user, profession)))
            })
            .transpose()
    }

    async fn list(&self, tokens: &[SortToken], page: &PageParams) -> anyhow::Result<Page<User>> {
        // Ordering and pagination are composed on the user select before the
        // profession join is attached; the count runs over the bare base.
        let total = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users failed")?;

        let rows = SelectComposer::new(&self.columns)
            .compose(users::Entity::find(), tokens, page)?
            .find_also_related(professions::Entity)
            .all(&self.db)
            .await
            .context("list users failed")?;

        let items = rows
            .into_iter()
            .map(|(user, profession)| {
                let profession = profession
                    .ok_or_else(|| anyhow!("user {} references a missing profession", user.id))?;
                Ok(User::from((user, profession)))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total, page)?)
    }

    async fn update(&self, id: Uuid, update: &UserUpdateRecord) -> anyhow::Result<bool> {
        let model = users::ActiveModel {
            id: Set(id),
            name: Set(update.name.clone()),
            profession_id: Set(update.profession_id),
            last_updated_at: Set(Some(update.last_updated_at)),
            ..Default::default()
        };
        Ok(updated(model.update(&self.db).await).context("update user failed")?)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user failed")?;
        Ok(res.rows_affected > 0)
    }
}
