use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub profession_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professions::Entity",
        from = "Column::ProfessionId",
        to = "super::professions::Column::Id"
    )]
    Profession,
}

impl Related<super::professions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
