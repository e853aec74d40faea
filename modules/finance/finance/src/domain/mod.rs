//! Domain layer for the finance module.

pub mod cache;
pub mod enrichment;
pub mod error;
pub mod local_client;
pub mod repo;
pub mod service;


pub use cache::{CacheStats, TenantCache};
pub use error::DomainError;
pub use local_client::LocalClient;
pub use repo::{CatalogRepository, NewCategory, NewFund, TransactionRepository};
pub use service::Service;
