use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finance_sdk::{Category, FinancialTransaction, Fund, TransactionStatus};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::domain::repo::{CatalogRepository, NewCategory, NewFund, TransactionRepository};

use super::entity::{category, financial_transaction, fund};

impl TryFrom<financial_transaction::Model> for FinancialTransaction {
    type Error = anyhow::Error;

    fn try_from(m: financial_transaction::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            tenant_id: m.tenant_id,
            transaction_number: m.transaction_number,
            transaction_type: m.transaction_type.parse().map_err(anyhow::Error::msg)?,
            transaction_date: m.transaction_date,
            description: m.description,
            amount: Decimal::from_str(&m.amount)?,
            category_id: m.category_id,
            fund_id: m.fund_id,
            status: m.status.parse().map_err(anyhow::Error::msg)?,
            created_by: m.created_by,
            updated_by: m.updated_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

impl From<fund::Model> for Fund {
    fn from(m: fund::Model) -> Self {
        Self {
            id: m.id,
            tenant_id: m.tenant_id,
            code: m.code,
            name: m.name,
            description: m.description,
            is_system: m.is_system,
            is_active: m.is_active,
        }
    }
}

impl TryFrom<category::Model> for Category {
    type Error = anyhow::Error;

    fn try_from(m: category::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            tenant_id: m.tenant_id,
            code: m.code,
            name: m.name,
            category_type: m.category_type.parse().map_err(anyhow::Error::msg)?,
            is_system: m.is_system,
            is_active: m.is_active,
        })
    }
}

fn live_transaction(tenant_id: Uuid, id: Uuid) -> sea_orm::Condition {
    sea_orm::Condition::all()
        .add(financial_transaction::Column::TenantId.eq(tenant_id))
        .add(financial_transaction::Column::Id.eq(id))
        .add(financial_transaction::Column::DeletedAt.is_null())
}

pub struct SeaOrmTransactionRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransactionRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionRepository for SeaOrmTransactionRepository {
    async fn find_all(&self, tenant_id: Uuid) -> anyhow::Result<Vec<FinancialTransaction>> {
        financial_transaction::Entity::find()
            .filter(financial_transaction::Column::TenantId.eq(tenant_id))
            .filter(financial_transaction::Column::DeletedAt.is_null())
            .order_by_desc(financial_transaction::Column::TransactionDate)
            .order_by_desc(financial_transaction::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<FinancialTransaction>> {
        financial_transaction::Entity::find()
            .filter(live_transaction(tenant_id, id))
            .one(&self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn create(&self, tx: &FinancialTransaction) -> anyhow::Result<FinancialTransaction> {
        let active_model = financial_transaction::ActiveModel {
            id: ActiveValue::Set(tx.id),
            tenant_id: ActiveValue::Set(tx.tenant_id),
            transaction_number: ActiveValue::Set(tx.transaction_number.clone()),
            transaction_type: ActiveValue::Set(tx.transaction_type.as_str().to_owned()),
            transaction_date: ActiveValue::Set(tx.transaction_date),
            description: ActiveValue::Set(tx.description.clone()),
            amount: ActiveValue::Set(tx.amount.to_string()),
            category_id: ActiveValue::Set(tx.category_id),
            fund_id: ActiveValue::Set(tx.fund_id),
            status: ActiveValue::Set(tx.status.as_str().to_owned()),
            created_by: ActiveValue::Set(tx.created_by),
            updated_by: ActiveValue::Set(tx.updated_by),
            created_at: ActiveValue::Set(tx.created_at),
            updated_at: ActiveValue::Set(tx.updated_at),
            deleted_at: ActiveValue::Set(None),
            deleted_by: ActiveValue::Set(None),
        };
        financial_transaction::Entity::insert(active_model)
            .exec(&self.db)
            .await?;
        Ok(tx.clone())
    }

    async fn update(&self, tx: &FinancialTransaction) -> anyhow::Result<FinancialTransaction> {
        let result = financial_transaction::Entity::update_many()
            .col_expr(
                financial_transaction::Column::TransactionDate,
                Expr::value(tx.transaction_date),
            )
            .col_expr(
                financial_transaction::Column::Description,
                Expr::value(tx.description.clone()),
            )
            .col_expr(
                financial_transaction::Column::Amount,
                Expr::value(tx.amount.to_string()),
            )
            .col_expr(
                financial_transaction::Column::CategoryId,
                Expr::value(tx.category_id),
            )
            .col_expr(financial_transaction::Column::FundId, Expr::value(tx.fund_id))
            .col_expr(
                financial_transaction::Column::UpdatedBy,
                Expr::value(tx.updated_by),
            )
            .col_expr(
                financial_transaction::Column::UpdatedAt,
                Expr::value(tx.updated_at),
            )
            .filter(live_transaction(tx.tenant_id, tx.id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            anyhow::bail!("transaction {} no longer exists", tx.id);
        }
        Ok(tx.clone())
    }

    async fn set_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: TransactionStatus,
        actor_id: Uuid,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<FinancialTransaction>> {
        let result = financial_transaction::Entity::update_many()
            .col_expr(
                financial_transaction::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(financial_transaction::Column::UpdatedBy, Expr::value(actor_id))
            .col_expr(financial_transaction::Column::UpdatedAt, Expr::value(at))
            .filter(live_transaction(tenant_id, id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(tenant_id, id).await
    }

    async fn soft_delete(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        actor_id: Uuid,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let result = financial_transaction::Entity::update_many()
            .col_expr(financial_transaction::Column::DeletedAt, Expr::value(at))
            .col_expr(
                financial_transaction::Column::DeletedBy,
                Expr::value(actor_id),
            )
            .filter(live_transaction(tenant_id, id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn next_sequence(&self, tenant_id: Uuid) -> anyhow::Result<u32> {
        let count = financial_transaction::Entity::find()
            .filter(financial_transaction::Column::TenantId.eq(tenant_id))
            .count(&self.db)
            .await?;
        Ok(u32::try_from(count)? + 1)
    }
}

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_funds(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Fund>> {
        let funds = fund::Entity::find()
            .filter(fund::Column::TenantId.eq(tenant_id))
            .filter(fund::Column::DeletedAt.is_null())
            .order_by_asc(fund::Column::Code)
            .all(&self.db)
            .await?;
        Ok(funds.into_iter().map(Into::into).collect())
    }

    async fn list_categories(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Category>> {
        category::Entity::find()
            .filter(category::Column::TenantId.eq(tenant_id))
            .filter(category::Column::DeletedAt.is_null())
            .order_by_asc(category::Column::CategoryType)
            .order_by_asc(category::Column::Code)
            .all(&self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn find_fund_by_code(&self, tenant_id: Uuid, code: &str) -> anyhow::Result<Option<Fund>> {
        let fund = fund::Entity::find()
            .filter(fund::Column::TenantId.eq(tenant_id))
            .filter(fund::Column::Code.eq(code))
            .filter(fund::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(fund.map(Into::into))
    }

    async fn find_category_by_code(
        &self,
        tenant_id: Uuid,
        code: &str,
    ) -> anyhow::Result<Option<Category>> {
        category::Entity::find()
            .filter(category::Column::TenantId.eq(tenant_id))
            .filter(category::Column::Code.eq(code))
            .filter(category::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn insert_fund(&self, new: &NewFund) -> anyhow::Result<Fund> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let active_model = fund::ActiveModel {
            id: ActiveValue::Set(id),
            tenant_id: ActiveValue::Set(new.tenant_id),
            code: ActiveValue::Set(new.code.clone()),
            name: ActiveValue::Set(new.name.clone()),
            description: ActiveValue::Set(new.description.clone()),
            is_system: ActiveValue::Set(new.is_system),
            is_active: ActiveValue::Set(new.is_active),
            created_by: ActiveValue::Set(new.actor_id),
            updated_by: ActiveValue::Set(new.actor_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        fund::Entity::insert(active_model).exec(&self.db).await?;
        Ok(Fund {
            id,
            tenant_id: new.tenant_id,
            code: new.code.clone(),
            name: new.name.clone(),
            description: new.description.clone(),
            is_system: new.is_system,
            is_active: new.is_active,
        })
    }

    async fn insert_category(&self, new: &NewCategory) -> anyhow::Result<Category> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let active_model = category::ActiveModel {
            id: ActiveValue::Set(id),
            tenant_id: ActiveValue::Set(new.tenant_id),
            code: ActiveValue::Set(new.code.clone()),
            name: ActiveValue::Set(new.name.clone()),
            category_type: ActiveValue::Set(new.category_type.as_str().to_owned()),
            is_system: ActiveValue::Set(new.is_system),
            is_active: ActiveValue::Set(new.is_active),
            created_by: ActiveValue::Set(new.actor_id),
            updated_by: ActiveValue::Set(new.actor_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        category::Entity::insert(active_model).exec(&self.db).await?;
        Ok(Category {
            id,
            tenant_id: new.tenant_id,
            code: new.code.clone(),
            name: new.name.clone(),
            category_type: new.category_type,
            is_system: new.is_system,
            is_active: new.is_active,
        })
    }
}
