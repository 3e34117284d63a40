use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use uuid::Uuid;

use directory::domain::error::DomainError;
use directory::domain::model::{
    NewCompany, NewDocument, NewOrder, NewProfession, NewUser, NewUserCompanyLink, UserPatch,
};
use directory::{build_state, ensure_schema, DirectoryState};
use listing_core::{validate_order_by, PageParams};

async fn setup() -> Arc<DirectoryState> {
    // One pooled connection, or every pool member gets its own ":memory:".
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect sqlite");
    ensure_schema(&db).await.expect("create schema");
    build_state(db)
}

fn tokens(state: &DirectoryState, entity: &str, raw: &[&str]) -> Vec<listing_core::SortToken> {
    let raw: Vec<String> = raw.iter().map(|t| t.to_string()).collect();
    validate_order_by(&raw, state.specs.allowed_fields(entity)).expect("valid tokens")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn seed_profession(state: &DirectoryState, name: &str) -> Uuid {
    state
        .service
        .create_profession(NewProfession { name: name.into() })
        .await
        .expect("create profession")
        .id
}

async fn seed_user(state: &DirectoryState, name: &str, profession_id: Uuid) -> Uuid {
    state
        .service
        .create_user(NewUser {
            name: name.into(),
            profession_id,
        })
        .await
        .expect("create user")
        .id
}

#[tokio::test]
async fn user_crud_round_trip() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Engineer").await;

    let user = state
        .service
        .create_user(NewUser {
            name: "  alice ".into(),
            profession_id,
        })
        .await
        .unwrap();
    // names are trimmed and uppercased
    assert_eq!(user.name, "ALICE");
    assert_eq!(user.profession.name, "Engineer");
    assert!(user.last_updated_at.is_none());

    let fetched = state.service.get_user(user.id).await.unwrap();
    assert_eq!(fetched, user);

    let patched = state
        .service
        .patch_user(
            user.id,
            UserPatch {
                name: Some("bob".into()),
                profession_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.name, "BOB");
    assert!(patched.last_updated_at.is_some());
    assert_eq!(patched.profession.id, profession_id);

    state.service.delete_user(user.id).await.unwrap();
    assert!(matches!(
        state.service.get_user(user.id).await,
        Err(DomainError::UserNotFound { .. })
    ));
}

#[tokio::test]
async fn create_user_requires_existing_profession() {
    let state = setup().await;
    let err = state
        .service
        .create_user(NewUser {
            name: "alice".into(),
            profession_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProfessionNotFound { .. }));
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Engineer").await;
    let user_id = seed_user(&state, "alice", profession_id).await;

    let err = state
        .service
        .patch_user(user_id, UserPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyPatch));
}

#[tokio::test]
async fn users_list_sorts_through_the_typed_strategy() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Engineer").await;
    for name in ["carol", "alice", "bob"] {
        seed_user(&state, name, profession_id).await;
    }

    let page = state
        .service
        .list_users(
            &tokens(&state, "user", &["+name"]),
            &PageParams::new(Some(2), Some(0)).unwrap(),
        )
        .await
        .unwrap();

    let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["ALICE", "BOB"]);
    assert_eq!(page.items_count, 2);
    assert_eq!(page.total_count, 3);
    assert!(page.has_more());
}

#[tokio::test]
async fn companies_list_sorts_through_the_statement_strategy() {
    let state = setup().await;
    for name in ["Globex", "Acme", "Initech"] {
        state
            .service
            .create_company(NewCompany { name: name.into() })
            .await
            .unwrap();
    }

    let page = state
        .service
        .list_companies(
            &tokens(&state, "company", &["-name"]),
            &PageParams::new(Some(10), Some(0)).unwrap(),
        )
        .await
        .unwrap();

    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Initech", "Globex", "Acme"]);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn nulls_sort_last_when_ordering_companies_by_update_time() {
    let state = setup().await;
    let mut first = None;
    for name in ["Acme", "Globex", "Initech"] {
        let company = state
            .service
            .create_company(NewCompany { name: name.into() })
            .await
            .unwrap();
        first.get_or_insert(company.id);
    }
    // Only one company has a non-null last_updated_at.
    state
        .service
        .patch_company(
            first.unwrap(),
            directory::domain::model::CompanyPatch {
                name: Some("Acme Corp".into()),
            },
        )
        .await
        .unwrap();

    for direction in ["+last_updated_at", "-last_updated_at"] {
        let page = state
            .service
            .list_companies(
                &tokens(&state, "company", &[direction]),
                &PageParams::new(Some(10), Some(0)).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            page.items[0].name, "Acme Corp",
            "non-null update time must lead for {direction}"
        );
        assert!(page.items[1].last_updated_at.is_none());
        assert!(page.items[2].last_updated_at.is_none());
    }
}

#[tokio::test]
async fn orders_flow_through_the_raw_strategy() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Trader").await;
    let payer = seed_user(&state, "alice", profession_id).await;
    let payee = seed_user(&state, "bob", profession_id).await;

    for amount in ["150.25", "12.50", "900"] {
        state
            .service
            .create_order(NewOrder {
                amount: dec(amount),
                payer_id: payer,
                payee_id: payee,
            })
            .await
            .unwrap();
    }

    let page = state
        .service
        .list_orders(
            &tokens(&state, "order", &["-amount"]),
            &PageParams::new(Some(10), Some(0)).unwrap(),
        )
        .await
        .unwrap();

    let amounts: Vec<Decimal> = page.items.iter().map(|o| o.amount).collect();
    assert_eq!(amounts, [dec("900"), dec("150.25"), dec("12.50")]);
    let order = &page.items[0];
    assert_eq!(order.payer.name, "ALICE");
    assert_eq!(order.payee.name, "BOB");

    state.service.delete_order(order.id).await.unwrap();
    assert!(matches!(
        state.service.get_order(order.id).await,
        Err(DomainError::OrderNotFound { .. })
    ));
}

#[tokio::test]
async fn order_validation_rules() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Trader").await;
    let payer = seed_user(&state, "alice", profession_id).await;
    let payee = seed_user(&state, "bob", profession_id).await;

    let same = state
        .service
        .create_order(NewOrder {
            amount: dec("10"),
            payer_id: payer,
            payee_id: payer,
        })
        .await
        .unwrap_err();
    assert!(matches!(same, DomainError::PayerPayeeEqual));

    let negative = state
        .service
        .create_order(NewOrder {
            amount: dec("-5"),
            payer_id: payer,
            payee_id: payee,
        })
        .await
        .unwrap_err();
    assert!(matches!(negative, DomainError::AmountOutOfRange { .. }));

    let missing_payee = state
        .service
        .create_order(NewOrder {
            amount: dec("10"),
            payer_id: payer,
            payee_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(missing_payee, DomainError::UserNotFound { .. }));
}

#[tokio::test]
async fn documents_flow_through_the_raw_strategy() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Archivist").await;
    let owner = seed_user(&state, "alice", profession_id).await;

    let created = state
        .service
        .create_document(NewDocument {
            document: serde_json::json!({"kind": "contract", "pages": 4}),
            user_id: owner,
        })
        .await
        .unwrap();

    let fetched = state.service.get_document(created.id).await.unwrap();
    assert_eq!(fetched.document["kind"], "contract");
    assert_eq!(fetched.user_id, owner);

    let updated = state
        .service
        .update_document(
            created.id,
            directory::domain::model::UpdateDocument {
                document: serde_json::json!({"kind": "invoice"}),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.document["kind"], "invoice");
    assert!(updated.last_updated_at.is_some());

    let page = state
        .service
        .list_documents(
            &tokens(&state, "document", &["-created_at"]),
            &PageParams::new(Some(10), Some(0)).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);

    let empty = state
        .service
        .create_document(NewDocument {
            document: serde_json::json!({}),
            user_id: owner,
        })
        .await
        .unwrap_err();
    assert!(matches!(empty, DomainError::EmptyDocument));
}

#[tokio::test]
async fn link_lifecycle_and_scoped_listings() {
    let state = setup().await;
    let profession_id = seed_profession(&state, "Consultant").await;
    let user = seed_user(&state, "alice", profession_id).await;
    let acme = state
        .service
        .create_company(NewCompany {
            name: "Acme".into(),
        })
        .await
        .unwrap();
    let globex = state
        .service
        .create_company(NewCompany {
            name: "Globex".into(),
        })
        .await
        .unwrap();

    for company in [acme.id, globex.id] {
        state
            .service
            .create_link(NewUserCompanyLink {
                user_id: user,
                company_id: company,
            })
            .await
            .unwrap();
    }

    let duplicate = state
        .service
        .create_link(NewUserCompanyLink {
            user_id: user,
            company_id: acme.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(duplicate, DomainError::LinkAlreadyExists { .. }));

    let by_user = state
        .service
        .list_links_by_user(user, &PageParams::new(Some(10), Some(0)).unwrap())
        .await
        .unwrap();
    assert_eq!(by_user.total_count, 2);
    let mut names: Vec<&str> = by_user
        .items
        .iter()
        .map(|l| l.company.name.as_str())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["Acme", "Globex"]);

    let by_company = state
        .service
        .list_links_by_company(acme.id, &PageParams::new(Some(10), Some(0)).unwrap())
        .await
        .unwrap();
    assert_eq!(by_company.total_count, 1);
    assert_eq!(by_company.items[0].user.name, "ALICE");

    state.service.delete_link(user, acme.id).await.unwrap();
    let gone = state.service.delete_link(user, acme.id).await.unwrap_err();
    assert!(matches!(gone, DomainError::LinkNotFound { .. }));
}

#[tokio::test]
async fn pagination_is_applied_without_ordering() {
    let state = setup().await;
    for i in 0..5 {
        state
            .service
            .create_company(NewCompany {
                name: format!("Company {i}"),
            })
            .await
            .unwrap();
    }

    let page = state
        .service
        .list_companies(&[], &PageParams::new(Some(2), Some(4)).unwrap())
        .await
        .unwrap();
    assert_eq!(page.items_count, 1);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.limit, 2);
    assert_eq!(page.offset, 4);
    assert!(!page.has_more());
}
