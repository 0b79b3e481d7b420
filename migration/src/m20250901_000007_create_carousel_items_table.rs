use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarouselItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CarouselItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CarouselItems::File).text().not_null())
                    .col(
                        ColumnDef::new(CarouselItems::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarouselItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CarouselItems {
    Table,
    Id,
    File,
    CreatedAt,
}
