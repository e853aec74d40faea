use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finance_sdk::{Category, FinancialTransaction, Fund, TransactionStatus, TransactionType};
use uuid::Uuid;

/// Transaction storage. Every call is scoped to one tenant.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Live (not soft-deleted) transactions, newest first.
    async fn find_all(&self, tenant_id: Uuid) -> anyhow::Result<Vec<FinancialTransaction>>;

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<FinancialTransaction>>;

    async fn create(&self, tx: &FinancialTransaction) -> anyhow::Result<FinancialTransaction>;

    /// Overwrite the editable fields of a live transaction.
    async fn update(&self, tx: &FinancialTransaction) -> anyhow::Result<FinancialTransaction>;

    /// `None` when no live transaction has `id`.
    async fn set_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: TransactionStatus,
        actor_id: Uuid,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<FinancialTransaction>>;

    /// Returns `false` when no live transaction has `id`.
    async fn soft_delete(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        actor_id: Uuid,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// Next transaction sequence number of the tenant, starting at 1.
    ///
    /// Soft-deleted transactions keep their number.
    async fn next_sequence(&self, tenant_id: Uuid) -> anyhow::Result<u32>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFund {
    pub tenant_id: Uuid,
    pub actor_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub tenant_id: Uuid,
    pub actor_id: Uuid,
    pub code: String,
    pub name: String,
    pub category_type: TransactionType,
    pub is_system: bool,
    pub is_active: bool,
}

/// Funds and categories of a tenant. Lookups only see live rows.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_funds(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Fund>>;

    async fn list_categories(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Category>>;

    async fn find_fund_by_code(&self, tenant_id: Uuid, code: &str) -> anyhow::Result<Option<Fund>>;

    async fn find_category_by_code(
        &self,
        tenant_id: Uuid,
        code: &str,
    ) -> anyhow::Result<Option<Category>>;

    async fn insert_fund(&self, fund: &NewFund) -> anyhow::Result<Fund>;

    async fn insert_category(&self, category: &NewCategory) -> anyhow::Result<Category>;
}
