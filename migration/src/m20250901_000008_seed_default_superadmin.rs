use sea_orm_migration::prelude::*;

use super::m20250901_000001_create_admins_table::Admins;

const DEFAULT_USERNAME: &str = "superadmin";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bootstrap account; the password must be rotated after first login.
        let password_hash = bcrypt::hash("admin123", 10)
            .map_err(|e| DbErr::Migration(format!("failed to hash seed password: {e}")))?;

        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Admins::Table)
                    .columns([
                        Admins::Name,
                        Admins::Username,
                        Admins::PasswordHash,
                        Admins::IsSuperadmin,
                    ])
                    .values_panic([
                        "Super Admin".into(),
                        DEFAULT_USERNAME.into(),
                        password_hash.into(),
                        true.into(),
                    ])
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Admins::Table)
                    .and_where(Expr::col(Admins::Username).eq(DEFAULT_USERNAME))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
