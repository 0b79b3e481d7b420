use sea_orm_migration::prelude::*;

use super::m20250901_000003_create_category_tables::{Categories, Subcategories};
use super::m20250901_000004_create_reference_tables::{Countries, Units};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::NameRu).string().not_null())
                    .col(ColumnDef::new(Products::NameEn).string().not_null())
                    .col(ColumnDef::new(Products::NameUz).string().not_null())
                    .col(ColumnDef::new(Products::NameKz).string().not_null())
                    .col(ColumnDef::new(Products::DescriptionRu).text().not_null())
                    .col(ColumnDef::new(Products::DescriptionEn).text().not_null())
                    .col(ColumnDef::new(Products::DescriptionUz).text().not_null())
                    .col(ColumnDef::new(Products::DescriptionKz).text().not_null())
                    .col(ColumnDef::new(Products::StructureRu).text().not_null())
                    .col(ColumnDef::new(Products::StructureEn).text().not_null())
                    .col(ColumnDef::new(Products::StructureUz).text().not_null())
                    .col(ColumnDef::new(Products::StructureKz).text().not_null())
                    .col(ColumnDef::new(Products::Price).double().not_null())
                    .col(ColumnDef::new(Products::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(Products::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Products::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Products::SubcategoryId).integer().not_null())
                    .col(ColumnDef::new(Products::CountryId).integer().not_null())
                    .col(ColumnDef::new(Products::UnitId).integer().not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category_id")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_subcategory_id")
                            .from(Products::Table, Products::SubcategoryId)
                            .to(Subcategories::Table, Subcategories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_country_id")
                            .from(Products::Table, Products::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_unit_id")
                            .from(Products::Table, Products::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_is_deleted")
                    .table(Products::Table)
                    .col(Products::IsDeleted)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    NameRu,
    NameEn,
    NameUz,
    NameKz,
    DescriptionRu,
    DescriptionEn,
    DescriptionUz,
    DescriptionKz,
    StructureRu,
    StructureEn,
    StructureUz,
    StructureKz,
    Price,
    Quantity,
    ViewCount,
    IsDeleted,
    CategoryId,
    SubcategoryId,
    CountryId,
    UnitId,
    CreatedAt,
    UpdatedAt,
}
