use sea_orm_migration::prelude::*;

use super::m20250901_000001_create_admins_table::Admins;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::AdminId).integer())
                    .col(ColumnDef::new(AuditLogs::Action).string_len(20).not_null())
                    .col(ColumnDef::new(AuditLogs::Entity).string_len(20).not_null())
                    .col(ColumnDef::new(AuditLogs::OldData).text())
                    .col(ColumnDef::new(AuditLogs::NewData).text())
                    .col(
                        ColumnDef::new(AuditLogs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audit_logs_admin_id")
                            .from(AuditLogs::Table, AuditLogs::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_created_at")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    AdminId,
    Action,
    Entity,
    OldData,
    NewData,
    CreatedAt,
}
