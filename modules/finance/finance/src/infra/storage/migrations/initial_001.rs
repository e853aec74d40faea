use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_funds(manager).await?;
        create_categories(manager).await?;
        create_transactions(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Funds::Table).to_owned())
            .await
    }
}

async fn create_funds(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Funds::Table)
                .if_not_exists()
                .col(ColumnDef::new(Funds::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Funds::TenantId).uuid().not_null())
                .col(ColumnDef::new(Funds::Code).string().not_null())
                .col(ColumnDef::new(Funds::Name).string().not_null())
                .col(ColumnDef::new(Funds::Description).string().not_null())
                .col(ColumnDef::new(Funds::IsSystem).boolean().not_null())
                .col(ColumnDef::new(Funds::IsActive).boolean().not_null())
                .col(ColumnDef::new(Funds::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Funds::UpdatedBy).uuid().not_null())
                .col(
                    ColumnDef::new(Funds::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Funds::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(Funds::DeletedAt).timestamp_with_time_zone())
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_funds_tenant_code")
                .table(Funds::Table)
                .col(Funds::TenantId)
                .col(Funds::Code)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

async fn create_categories(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(TransactionCategories::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(TransactionCategories::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(TransactionCategories::TenantId).uuid().not_null())
                .col(ColumnDef::new(TransactionCategories::Code).string().not_null())
                .col(ColumnDef::new(TransactionCategories::Name).string().not_null())
                .col(
                    ColumnDef::new(TransactionCategories::CategoryType)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(TransactionCategories::IsSystem)
                        .boolean()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(TransactionCategories::IsActive)
                        .boolean()
                        .not_null(),
                )
                .col(ColumnDef::new(TransactionCategories::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(TransactionCategories::UpdatedBy).uuid().not_null())
                .col(
                    ColumnDef::new(TransactionCategories::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(TransactionCategories::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(TransactionCategories::DeletedAt).timestamp_with_time_zone())
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_transaction_categories_tenant_code")
                .table(TransactionCategories::Table)
                .col(TransactionCategories::TenantId)
                .col(TransactionCategories::Code)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

async fn create_transactions(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(FinancialTransactions::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(FinancialTransactions::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(FinancialTransactions::TenantId).uuid().not_null())
                .col(
                    ColumnDef::new(FinancialTransactions::TransactionNumber)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(FinancialTransactions::TransactionType)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(FinancialTransactions::TransactionDate)
                        .date()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(FinancialTransactions::Description)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(FinancialTransactions::Amount).string().not_null())
                .col(ColumnDef::new(FinancialTransactions::CategoryId).uuid())
                .col(ColumnDef::new(FinancialTransactions::FundId).uuid())
                .col(ColumnDef::new(FinancialTransactions::Status).string().not_null())
                .col(ColumnDef::new(FinancialTransactions::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(FinancialTransactions::UpdatedBy).uuid().not_null())
                .col(
                    ColumnDef::new(FinancialTransactions::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(FinancialTransactions::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(FinancialTransactions::DeletedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(FinancialTransactions::DeletedBy).uuid())
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_financial_transactions_tenant_number")
                .table(FinancialTransactions::Table)
                .col(FinancialTransactions::TenantId)
                .col(FinancialTransactions::TransactionNumber)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_financial_transactions_tenant_date")
                .table(FinancialTransactions::Table)
                .col(FinancialTransactions::TenantId)
                .col(FinancialTransactions::TransactionDate)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[derive(DeriveIden)]
enum Funds {
    Table,
    Id,
    TenantId,
    Code,
    Name,
    Description,
    IsSystem,
    IsActive,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum TransactionCategories {
    Table,
    Id,
    TenantId,
    Code,
    Name,
    CategoryType,
    IsSystem,
    IsActive,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum FinancialTransactions {
    Table,
    Id,
    TenantId,
    TransactionNumber,
    TransactionType,
    TransactionDate,
    Description,
    Amount,
    CategoryId,
    FundId,
    Status,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    DeletedBy,
}
