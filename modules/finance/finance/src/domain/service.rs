//! Domain service for financial transactions.
//!
//! Reads of the enriched transaction list go through the tenant cache;
//! every successful mutation invalidates the tenant's entry before returning.

use std::sync::Arc;

use chrono::Utc;
use finance_sdk::{
    EnrichedTransaction, FinancialTransaction, NewTransaction, TransactionPatch,
    TransactionQuery, TransactionStatus, TransactionType,
};
use rust_decimal::Decimal;
use steward_security::SecurityContext;
use tracing::{debug, info};
use uuid::Uuid;

use super::cache::TenantCache;
use super::enrichment::CatalogIndex;
use super::error::DomainError;
use super::repo::{CatalogRepository, TransactionRepository};
use crate::config::FinanceConfig;

/// Cached value: all live transactions of a tenant, enriched, newest first.
pub type TransactionList = Vec<EnrichedTransaction>;

/// Finance service.
pub struct Service {
    transactions: Arc<dyn TransactionRepository>,
    catalog: Arc<dyn CatalogRepository>,
    cache: Arc<TenantCache<TransactionList>>,
    cache_enabled: bool,
}

impl Service {
    #[must_use]
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        catalog: Arc<dyn CatalogRepository>,
        config: &FinanceConfig,
    ) -> Self {
        Self {
            transactions,
            catalog,
            cache: Arc::new(TenantCache::new(config.transactions_cache_ttl)),
            cache_enabled: config.transactions_cache_enabled,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<TenantCache<TransactionList>> {
        &self.cache
    }

    /// All live transactions of the tenant, enriched with category and fund.
    ///
    /// # Errors
    ///
    /// Returns an error if the context has no tenant or storage fails.
    #[tracing::instrument(skip_all, fields(tenant_id = %ctx.tenant_id()))]
    pub async fn list_transactions(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Arc<TransactionList>, DomainError> {
        let tenant_id = ctx.require_tenant()?;

        if self.cache_enabled
            && let Some(cached) = self.cache.get(tenant_id)
        {
            debug!(count = cached.len(), "Transaction cache hit");
            return Ok(cached);
        }

        let generation = self.cache.generation(tenant_id);
        let list = self.load_enriched(tenant_id).await?;
        debug!(count = list.len(), "Loaded transactions from storage");

        if self.cache_enabled {
            Ok(self.cache.set_if_generation(tenant_id, generation, list))
        } else {
            Ok(Arc::new(list))
        }
    }

    /// Cached transactions matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the context has no tenant or storage fails.
    pub async fn search_transactions(
        &self,
        ctx: &SecurityContext,
        query: &TransactionQuery,
    ) -> Result<Vec<EnrichedTransaction>, DomainError> {
        let all = self.list_transactions(ctx).await?;
        Ok(all.iter().filter(|t| query.matches(t)).cloned().collect())
    }

    /// Reads one transaction from storage, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if no live transaction has `id`.
    #[tracing::instrument(skip_all, fields(tenant_id = %ctx.tenant_id(), transaction_id = %id))]
    pub async fn get_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<EnrichedTransaction, DomainError> {
        let tenant_id = ctx.require_tenant()?;
        let transaction = self.load(tenant_id, id).await?;

        let funds = self.catalog.list_funds(tenant_id).await?;
        let categories = self.catalog.list_categories(tenant_id).await?;
        Ok(CatalogIndex::new(&funds, &categories).enrich(transaction))
    }

    /// Create a draft transaction with the next per-tenant number.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for invalid input or unknown
    /// category or fund references.
    #[tracing::instrument(skip_all, fields(tenant_id = %ctx.tenant_id()))]
    pub async fn create_transaction(
        &self,
        ctx: &SecurityContext,
        new: NewTransaction,
    ) -> Result<FinancialTransaction, DomainError> {
        let tenant_id = ctx.require_tenant()?;
        let actor_id = ctx.require_subject()?;

        validate_amount(new.amount)?;
        let description = validate_description(&new.description)?;
        self.validate_references(tenant_id, new.transaction_type, new.category_id, new.fund_id)
            .await?;

        let sequence = self.transactions.next_sequence(tenant_id).await?;
        let now = Utc::now();
        let transaction = FinancialTransaction {
            id: Uuid::new_v4(),
            tenant_id,
            transaction_number: format_transaction_number(sequence),
            transaction_type: new.transaction_type,
            transaction_date: new.transaction_date,
            description,
            amount: new.amount,
            category_id: new.category_id,
            fund_id: new.fund_id,
            status: TransactionStatus::Draft,
            created_by: actor_id,
            updated_by: actor_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.transactions.create(&transaction).await?;
        self.invalidate(tenant_id);

        info!(
            transaction_id = %created.id,
            transaction_number = %created.transaction_number,
            "Created transaction"
        );
        Ok(created)
    }

    /// Apply `patch` to a draft transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotEditable`] unless the transaction is a draft.
    #[tracing::instrument(skip_all, fields(tenant_id = %ctx.tenant_id(), transaction_id = %id))]
    pub async fn update_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<FinancialTransaction, DomainError> {
        let tenant_id = ctx.require_tenant()?;
        let actor_id = ctx.require_subject()?;

        let mut transaction = self.load(tenant_id, id).await?;
        ensure_editable(&transaction)?;
        if patch.is_empty() {
            return Ok(transaction);
        }

        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            transaction.amount = amount;
        }
        if let Some(description) = &patch.description {
            transaction.description = validate_description(description)?;
        }
        if let Some(date) = patch.transaction_date {
            transaction.transaction_date = date;
        }
        if let Some(category_id) = patch.category_id {
            transaction.category_id = category_id;
        }
        if let Some(fund_id) = patch.fund_id {
            transaction.fund_id = fund_id;
        }
        self.validate_references(
            tenant_id,
            transaction.transaction_type,
            patch.category_id.flatten(),
            patch.fund_id.flatten(),
        )
        .await?;

        transaction.updated_by = actor_id;
        transaction.updated_at = Utc::now();

        let updated = self.transactions.update(&transaction).await?;
        self.invalidate(tenant_id);

        info!("Updated transaction");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the transaction is a draft.
    pub async fn submit_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, DomainError> {
        self.transition(ctx, id, TransactionStatus::Submitted).await
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the transaction is submitted.
    pub async fn approve_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, DomainError> {
        self.transition(ctx, id, TransactionStatus::Approved).await
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the transaction is approved.
    pub async fn post_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, DomainError> {
        self.transition(ctx, id, TransactionStatus::Posted).await
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] for drafts and voided transactions.
    pub async fn void_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<FinancialTransaction, DomainError> {
        self.transition(ctx, id, TransactionStatus::Voided).await
    }

    /// Soft-delete a draft transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotEditable`] unless the transaction is a draft.
    #[tracing::instrument(skip_all, fields(tenant_id = %ctx.tenant_id(), transaction_id = %id))]
    pub async fn delete_transaction(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let tenant_id = ctx.require_tenant()?;
        let actor_id = ctx.require_subject()?;

        let transaction = self.load(tenant_id, id).await?;
        ensure_editable(&transaction)?;

        if !self
            .transactions
            .soft_delete(tenant_id, id, actor_id, Utc::now())
            .await?
        {
            return Err(DomainError::NotFound(id));
        }
        self.invalidate(tenant_id);

        info!("Deleted transaction");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(
        tenant_id = %ctx.tenant_id(),
        transaction_id = %id,
        to = %to
    ))]
    async fn transition(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        to: TransactionStatus,
    ) -> Result<FinancialTransaction, DomainError> {
        let tenant_id = ctx.require_tenant()?;
        let actor_id = ctx.require_subject()?;

        let current = self.load(tenant_id, id).await?;
        if !current.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let updated = self
            .transactions
            .set_status(tenant_id, id, to, actor_id, Utc::now())
            .await?
            .ok_or(DomainError::NotFound(id))?;
        self.invalidate(tenant_id);

        info!(from = %current.status, "Transaction status changed");
        Ok(updated)
    }

    async fn load(&self, tenant_id: Uuid, id: Uuid) -> Result<FinancialTransaction, DomainError> {
        self.transactions
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(DomainError::NotFound(id))
    }

    async fn load_enriched(&self, tenant_id: Uuid) -> Result<TransactionList, DomainError> {
        let transactions = self.transactions.find_all(tenant_id).await?;
        let funds = self.catalog.list_funds(tenant_id).await?;
        let categories = self.catalog.list_categories(tenant_id).await?;
        Ok(CatalogIndex::new(&funds, &categories).enrich_all(transactions))
    }

    async fn validate_references(
        &self,
        tenant_id: Uuid,
        transaction_type: TransactionType,
        category_id: Option<Uuid>,
        fund_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        if let Some(category_id) = category_id {
            let categories = self.catalog.list_categories(tenant_id).await?;
            let category = categories
                .iter()
                .find(|c| c.id == category_id)
                .ok_or_else(|| DomainError::validation(format!("unknown category {category_id}")))?;
            if category.category_type != transaction_type {
                return Err(DomainError::validation(format!(
                    "category '{}' is for {} transactions",
                    category.code, category.category_type
                )));
            }
        }
        if let Some(fund_id) = fund_id {
            let funds = self.catalog.list_funds(tenant_id).await?;
            if !funds.iter().any(|f| f.id == fund_id) {
                return Err(DomainError::validation(format!("unknown fund {fund_id}")));
            }
        }
        Ok(())
    }

    fn invalidate(&self, tenant_id: Uuid) {
        self.cache.invalidate(tenant_id);
    }
}

/// `TX-000042` for sequence 42.
#[must_use]
pub fn format_transaction_number(sequence: u32) -> String {
    format!("TX-{sequence:06}")
}

fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation("amount must be greater than zero"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<String, DomainError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("description must not be empty"));
    }
    Ok(trimmed.to_owned())
}

fn ensure_editable(transaction: &FinancialTransaction) -> Result<(), DomainError> {
    if transaction.status.is_editable() {
        Ok(())
    } else {
        Err(DomainError::NotEditable {
            id: transaction.id,
            status: transaction.status,
        })
    }
}
