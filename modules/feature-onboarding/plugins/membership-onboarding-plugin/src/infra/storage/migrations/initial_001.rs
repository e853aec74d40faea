use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in CATALOG_TABLES {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(table))
                        .if_not_exists()
                        .col(ColumnDef::new(Catalog::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Catalog::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Catalog::Code).string().not_null())
                        .col(ColumnDef::new(Catalog::Name).string().not_null())
                        .col(ColumnDef::new(Catalog::Description).string().not_null())
                        .col(ColumnDef::new(Catalog::SortOrder).integer().not_null())
                        .col(ColumnDef::new(Catalog::IsSystem).boolean().not_null())
                        .col(ColumnDef::new(Catalog::IsActive).boolean().not_null())
                        .col(ColumnDef::new(Catalog::CreatedBy).uuid().not_null())
                        .col(ColumnDef::new(Catalog::UpdatedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(Catalog::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Catalog::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Catalog::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_tenant_code"))
                        .table(Alias::new(table))
                        .col(Catalog::TenantId)
                        .col(Catalog::Code)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in CATALOG_TABLES {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

const CATALOG_TABLES: [&str; 3] = [
    "membership_types",
    "membership_stages",
    "discipleship_pathways",
];

#[derive(DeriveIden)]
enum Catalog {
    Id,
    TenantId,
    Code,
    Name,
    Description,
    SortOrder,
    IsSystem,
    IsActive,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
