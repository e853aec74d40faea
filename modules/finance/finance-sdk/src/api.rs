//! Public API trait for financial transactions.

use async_trait::async_trait;
use steward_security::SecurityContext;
use uuid::Uuid;

use crate::error::FinanceError;
use crate::models::{
    EnrichedTransaction, FinancialTransaction, NewTransaction, TransactionPatch, TransactionQuery,
};

/// Transaction reads and lifecycle operations, scoped to the tenant of `ctx`.
///
/// Mutations take effect immediately for subsequent reads of the same tenant.
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// All live transactions of the tenant, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant scope is missing or storage fails.
    async fn list_transactions(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<EnrichedTransaction>, FinanceError>;

    /// Transactions matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant scope is missing or storage fails.
    async fn search_transactions(
        &self,
        ctx: &SecurityContext,
        query: &TransactionQuery,
    ) -> Result<Vec<EnrichedTransaction>, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::NotFound`] if no live transaction has `id`.
    async fn get_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<EnrichedTransaction, FinanceError>;

    /// Create a draft transaction.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::Validation`] for a non-positive amount or an
    /// empty description.
    async fn create_transaction(
        &self,
        ctx: &SecurityContext,
        new: NewTransaction,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::Validation`] if the transaction is not a draft.
    async fn update_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::InvalidTransition`] unless the transaction is a draft.
    async fn submit_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::InvalidTransition`] unless the transaction is submitted.
    async fn approve_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::InvalidTransition`] unless the transaction is approved.
    async fn post_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// # Errors
    ///
    /// Returns [`FinanceError::InvalidTransition`] for drafts and voided transactions.
    async fn void_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError>;

    /// Soft-delete a draft transaction.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::Validation`] if the transaction is not a draft.
    async fn delete_transaction(&self, ctx: &SecurityContext, id: Uuid)
    -> Result<(), FinanceError>;
}
