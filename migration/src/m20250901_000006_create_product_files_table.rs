use sea_orm_migration::prelude::*;

use super::m20250901_000005_create_products_table::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductFiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductFiles::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductFiles::Url).text().not_null())
                    .col(
                        ColumnDef::new(ProductFiles::IsVideo)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ProductFiles::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductFiles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_files_product_id")
                            .from(ProductFiles::Table, ProductFiles::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_files_product_id")
                    .table(ProductFiles::Table)
                    .col(ProductFiles::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductFiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductFiles {
    Table,
    Id,
    ProductId,
    Url,
    IsVideo,
    OrderIndex,
    CreatedAt,
}
