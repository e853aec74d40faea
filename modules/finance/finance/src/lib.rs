//! Finance Module
//!
//! Financial transactions, funds and income/expense categories of a tenant.
//!
//! ## Architecture
//!
//! - **Service**: transaction lifecycle (`draft -> submitted -> approved ->
//!   posted`, `voided`) and enriched reads
//! - **Cache**: the enriched transaction list of each tenant is kept in a TTL
//!   cache; every successful mutation invalidates the tenant's entry
//! - **Storage**: repository traits with a `sea-orm` implementation and
//!   migrations
//! - **Local client**: implements [`finance_sdk::TransactionsApi`] over the
//!   service

pub use finance_sdk::*;

pub mod config;
pub mod domain;
pub mod infra;

pub use config::FinanceConfig;
pub use domain::{
    CacheStats, CatalogRepository, DomainError, LocalClient, NewCategory, NewFund, Service,
    TenantCache, TransactionRepository,
};
pub use infra::storage::migrations::Migrator;
pub use infra::storage::sea_orm_repo::{SeaOrmCatalogRepository, SeaOrmTransactionRepository};
