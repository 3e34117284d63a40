use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Extension, Router,
};

use crate::api::rest::handlers::{companies, documents, links, orders, professions, users};
use crate::DirectoryState;

/// Assemble the module router. All handlers receive the shared state via
/// an extension layer.
pub fn router(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route(
            "/professions",
            get(professions::list_professions).post(professions::create_profession),
        )
        .route(
            "/professions/{id}",
            get(professions::get_profession)
                .put(professions::update_profession)
                .delete(professions::delete_profession),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .patch(companies::patch_company)
                .delete(companies::delete_company),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route(
            "/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/documents/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route(
            "/user-company-links",
            get(links::list_links).post(links::create_link),
        )
        .route(
            "/user-company-links/{user_id}/{company_id}",
            delete(links::delete_link),
        )
        .layer(Extension(state))
}
