use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::infra::storage::entity::{
    companies, documents, orders, professions, user_company_links, users,
};

/// Create all module tables from the entity definitions.
///
/// Tables are created in dependency order so foreign keys resolve; existing
/// tables are left untouched.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(professions::Entity),
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(companies::Entity),
        schema.create_table_from_entity(orders::Entity),
        schema.create_table_from_entity(documents::Entity),
        schema.create_table_from_entity(user_company_links::Entity),
    ];

    for stmt in &mut statements {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }
    Ok(())
}
