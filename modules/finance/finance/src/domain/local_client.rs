//! Local client implementation of the transactions API.

use std::sync::Arc;

use async_trait::async_trait;
use finance_sdk::{
    EnrichedTransaction, FinanceError, FinancialTransaction, NewTransaction, TransactionPatch,
    TransactionQuery, TransactionsApi,
};
use steward_security::SecurityContext;
use uuid::Uuid;

use super::service::Service;

/// Adapter exposing the domain service through [`TransactionsApi`].
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TransactionsApi for LocalClient {
    async fn list_transactions(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<EnrichedTransaction>, FinanceError> {
        let list = self.service.list_transactions(ctx).await?;
        Ok(list.as_ref().clone())
    }

    async fn search_transactions(
        &self,
        ctx: &SecurityContext,
        query: &TransactionQuery,
    ) -> Result<Vec<EnrichedTransaction>, FinanceError> {
        self.service
            .search_transactions(ctx, query)
            .await
            .map_err(Into::into)
    }

    async fn get_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<EnrichedTransaction, FinanceError> {
        self.service
            .get_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn create_transaction(
        &self,
        ctx: &SecurityContext,
        new: NewTransaction,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .create_transaction(ctx, new)
            .await
            .map_err(Into::into)
    }

    async fn update_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .update_transaction(ctx, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn submit_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .submit_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn approve_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .approve_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn post_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .post_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn void_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, FinanceError> {
        self.service
            .void_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }

    async fn delete_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<(), FinanceError> {
        self.service
            .delete_transaction(ctx, id)
            .await
            .map_err(Into::into)
    }
}
