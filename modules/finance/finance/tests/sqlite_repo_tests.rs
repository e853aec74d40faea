//! Finance storage and service against an in-memory `SQLite` database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use finance::{
    CatalogRepository, FinanceConfig, FinanceError, FinancialTransaction, LocalClient, Migrator,
    NewCategory, NewFund, NewTransaction, SeaOrmCatalogRepository, SeaOrmTransactionRepository, Service,
    TransactionPatch, TransactionRepository, TransactionStatus, TransactionType, TransactionsApi,
};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use steward_security::SecurityContext;
use uuid::Uuid;

async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn ctx(tenant_id: Uuid) -> SecurityContext {
    SecurityContext::builder()
        .tenant_id(tenant_id)
        .subject_id(Uuid::new_v4())
        .build()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn income(description: &str, day: u32, amount: Decimal) -> NewTransaction {
    NewTransaction {
        transaction_type: TransactionType::Income,
        transaction_date: date(day),
        description: description.to_owned(),
        amount,
        category_id: None,
        fund_id: None,
    }
}

struct Harness {
    db: DatabaseConnection,
    service: Arc<Service>,
}

impl Harness {
    async fn new() -> Self {
        let db = setup_db().await;
        let service = Arc::new(Service::new(
            Arc::new(SeaOrmTransactionRepository::new(db.clone())),
            Arc::new(SeaOrmCatalogRepository::new(db.clone())),
            &FinanceConfig::default(),
        ));
        Self { db, service }
    }

    fn catalog(&self) -> SeaOrmCatalogRepository {
        SeaOrmCatalogRepository::new(self.db.clone())
    }

    fn transactions(&self) -> SeaOrmTransactionRepository {
        SeaOrmTransactionRepository::new(self.db.clone())
    }
}

#[tokio::test]
async fn transaction_round_trips_through_storage() {
    // Arrange
    let h = Harness::new().await;
    let ctx = ctx(Uuid::new_v4());
    let amount = Decimal::new(123_456, 2);

    // Act
    let created = h
        .service
        .create_transaction(&ctx, income("Sunday offering", 5, amount))
        .await
        .unwrap();
    let stored = h
        .transactions()
        .find_by_id(ctx.tenant_id(), created.id)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(stored.transaction_number, "TX-000001");
    assert_eq!(stored.amount, amount);
    assert_eq!(stored.transaction_date, date(5));
    assert_eq!(stored.status, TransactionStatus::Draft);
    assert_eq!(stored.transaction_type, TransactionType::Income);
}

#[tokio::test]
async fn list_is_newest_first_and_tenant_scoped() {
    let h = Harness::new().await;
    let tenant = ctx(Uuid::new_v4());
    let other = ctx(Uuid::new_v4());

    h.service
        .create_transaction(&tenant, income("Early", 1, Decimal::ONE))
        .await
        .unwrap();
    h.service
        .create_transaction(&tenant, income("Late", 20, Decimal::ONE))
        .await
        .unwrap();
    h.service
        .create_transaction(&other, income("Other tenant", 10, Decimal::ONE))
        .await
        .unwrap();

    let list = h.service.list_transactions(&tenant).await.unwrap();

    let descriptions: Vec<_> = list
        .iter()
        .map(|t| t.transaction.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Late", "Early"]);
}

#[tokio::test]
async fn same_day_transactions_list_latest_created_first() {
    // Arrange
    let h = Harness::new().await;
    let tenant_id = Uuid::new_v4();
    let actor_id = Uuid::new_v4();
    let earlier = Utc::now();
    let row = |number: &str, created_at| FinancialTransaction {
        id: Uuid::new_v4(),
        tenant_id,
        transaction_number: number.to_owned(),
        transaction_type: TransactionType::Income,
        transaction_date: date(12),
        description: number.to_owned(),
        amount: Decimal::ONE,
        category_id: None,
        fund_id: None,
        status: TransactionStatus::Draft,
        created_by: actor_id,
        updated_by: actor_id,
        created_at,
        updated_at: created_at,
    };
    let repo = h.transactions();
    repo.create(&row("TX-999999", earlier)).await.unwrap();
    repo.create(&row("TX-1000000", earlier + Duration::seconds(1)))
        .await
        .unwrap();

    // Act
    let listed = repo.find_all(tenant_id).await.unwrap();

    // Assert
    let numbers: Vec<_> = listed
        .iter()
        .map(|t| t.transaction_number.as_str())
        .collect();
    assert_eq!(numbers, ["TX-1000000", "TX-999999"]);
}

#[tokio::test]
async fn numbering_continues_after_soft_delete() {
    let h = Harness::new().await;
    let ctx = ctx(Uuid::new_v4());
    let first = h
        .service
        .create_transaction(&ctx, income("First", 1, Decimal::ONE))
        .await
        .unwrap();

    h.service.delete_transaction(&ctx, first.id).await.unwrap();
    let second = h
        .service
        .create_transaction(&ctx, income("Second", 2, Decimal::ONE))
        .await
        .unwrap();

    assert_eq!(second.transaction_number, "TX-000002");
    assert!(
        h.transactions()
            .find_by_id(ctx.tenant_id(), first.id)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(h.service.list_transactions(&ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn lifecycle_is_persisted() {
    let h = Harness::new().await;
    let ctx = ctx(Uuid::new_v4());
    let tx = h
        .service
        .create_transaction(&ctx, income("Pledge", 3, Decimal::TEN))
        .await
        .unwrap();

    h.service.submit_transaction(&ctx, tx.id).await.unwrap();
    h.service.approve_transaction(&ctx, tx.id).await.unwrap();
    let posted = h.service.post_transaction(&ctx, tx.id).await.unwrap();

    assert_eq!(posted.status, TransactionStatus::Posted);
    assert_eq!(posted.updated_by, ctx.subject_id());
    let listed = h.service.list_transactions(&ctx).await.unwrap();
    assert_eq!(listed[0].transaction.status, TransactionStatus::Posted);
}

#[tokio::test]
async fn update_persists_and_clears_references() {
    let h = Harness::new().await;
    let ctx = ctx(Uuid::new_v4());
    let fund = h
        .catalog()
        .insert_fund(&NewFund {
            tenant_id: ctx.tenant_id(),
            actor_id: ctx.subject_id(),
            code: "general".to_owned(),
            name: "General Fund".to_owned(),
            description: String::new(),
            is_system: true,
            is_active: true,
        })
        .await
        .unwrap();
    let tx = h
        .service
        .create_transaction(
            &ctx,
            NewTransaction {
                fund_id: Some(fund.id),
                ..income("Offering", 4, Decimal::ONE)
            },
        )
        .await
        .unwrap();

    let updated = h
        .service
        .update_transaction(
            &ctx,
            tx.id,
            TransactionPatch {
                amount: Some(Decimal::new(7_500, 2)),
                fund_id: Some(None),
                ..TransactionPatch::default()
            },
        )
        .await
        .unwrap();
    let stored = h
        .transactions()
        .find_by_id(ctx.tenant_id(), tx.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.amount, Decimal::new(7_500, 2));
    assert_eq!(stored.amount, Decimal::new(7_500, 2));
    assert!(stored.fund_id.is_none());
}

#[tokio::test]
async fn list_and_get_are_enriched_from_catalog() {
    let h = Harness::new().await;
    let ctx = ctx(Uuid::new_v4());
    let catalog = h.catalog();
    let fund = catalog
        .insert_fund(&NewFund {
            tenant_id: ctx.tenant_id(),
            actor_id: ctx.subject_id(),
            code: "missions".to_owned(),
            name: "Missions Fund".to_owned(),
            description: "Outreach".to_owned(),
            is_system: true,
            is_active: true,
        })
        .await
        .unwrap();
    let category = catalog
        .insert_category(&NewCategory {
            tenant_id: ctx.tenant_id(),
            actor_id: ctx.subject_id(),
            code: "donations".to_owned(),
            name: "Donations".to_owned(),
            category_type: TransactionType::Income,
            is_system: true,
            is_active: true,
        })
        .await
        .unwrap();

    let tx = h
        .service
        .create_transaction(
            &ctx,
            NewTransaction {
                category_id: Some(category.id),
                fund_id: Some(fund.id),
                ..income("Mission gift", 9, Decimal::ONE_HUNDRED)
            },
        )
        .await
        .unwrap();

    let list = h.service.list_transactions(&ctx).await.unwrap();
    let single = h.service.get_transaction(&ctx, tx.id).await.unwrap();

    assert_eq!(list[0].fund_name.as_deref(), Some("Missions Fund"));
    assert_eq!(list[0].category_code.as_deref(), Some("donations"));
    assert_eq!(single, list[0]);
}

#[tokio::test]
async fn catalog_lookup_by_code() {
    let h = Harness::new().await;
    let tenant_id = Uuid::new_v4();
    let catalog = h.catalog();
    catalog
        .insert_category(&NewCategory {
            tenant_id,
            actor_id: Uuid::new_v4(),
            code: "utilities".to_owned(),
            name: "Utilities".to_owned(),
            category_type: TransactionType::Expense,
            is_system: true,
            is_active: true,
        })
        .await
        .unwrap();

    let found = catalog
        .find_category_by_code(tenant_id, "utilities")
        .await
        .unwrap()
        .unwrap();
    let other_tenant = catalog
        .find_category_by_code(Uuid::new_v4(), "utilities")
        .await
        .unwrap();
    let missing_fund = catalog.find_fund_by_code(tenant_id, "general").await.unwrap();

    assert_eq!(found.category_type, TransactionType::Expense);
    assert!(other_tenant.is_none());
    assert!(missing_fund.is_none());
}

#[tokio::test]
async fn local_client_maps_errors_to_sdk() {
    let h = Harness::new().await;
    let client = LocalClient::new(h.service.clone());
    let ctx = ctx(Uuid::new_v4());
    let tx = client
        .create_transaction(&ctx, income("Tithe", 6, Decimal::ONE))
        .await
        .unwrap();

    let missing = client.get_transaction(&ctx, Uuid::new_v4()).await;
    let bad_transition = client.post_transaction(&ctx, tx.id).await;
    let listed = client.list_transactions(&ctx).await.unwrap();

    assert!(matches!(missing, Err(FinanceError::NotFound { .. })));
    assert_eq!(
        bad_transition,
        Err(FinanceError::invalid_transition(
            TransactionStatus::Draft,
            TransactionStatus::Posted
        ))
    );
    assert_eq!(listed.len(), 1);
    assert!(listed[0].transaction.created_at <= Utc::now());
}
