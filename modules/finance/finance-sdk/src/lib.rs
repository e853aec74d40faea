//! Finance SDK
//!
//! Public contract of the `finance` module:
//!
//! - [`TransactionsApi`] - transaction reads and lifecycle operations
//! - transaction, fund and category models
//! - [`FinanceError`] - error types
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::TransactionsApi;
pub use error::FinanceError;
pub use models::{
    Category, EnrichedTransaction, FinancialTransaction, Fund, NewTransaction, TransactionPatch,
    TransactionQuery, TransactionStatus, TransactionType,
};
