use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PayerId",
        to = "super::users::Column::Id"
    )]
    Payer,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PayeeId",
        to = "super::users::Column::Id"
    )]
    Payee,
}

impl ActiveModelBehavior for ActiveModel {}
