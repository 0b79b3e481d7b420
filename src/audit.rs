//! # Audit log
//!
//! Appends a redacted before/after record for every mutating operation and
//! trims the table to the most recent entries. Recording must never abort
//! the business operation it accompanies: every failure in here is logged
//! and swallowed.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use serde_json::Value;

use entity::{AuditLogs, audit_logs};

use crate::error::Result;

/// Entries retained after a trim.
pub const AUDIT_KEEP: u64 = 250;
/// Trim only runs once the table grows past this count.
pub const AUDIT_TRIM_THRESHOLD: u64 = 200;

const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntity {
    Admin,
    Category,
    Subcategory,
    Product,
    Country,
    Unit,
    Carousel,
}

impl AuditEntity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Category => "CATEGORY",
            Self::Subcategory => "SUBCATEGORY",
            Self::Product => "PRODUCT",
            Self::Country => "COUNTRY",
            Self::Unit => "UNIT",
            Self::Carousel => "CAROUSEL",
        }
    }
}

/// Admin fields embedded in a log listing.
#[derive(Debug, Serialize)]
pub struct AuditActor {
    pub id: i32,
    pub name: String,
    pub username: String,
    #[serde(rename = "isSuperadmin")]
    pub is_superadmin: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    #[serde(flatten)]
    pub entry: audit_logs::Model,
    pub admin: Option<AuditActor>,
}

#[derive(Clone)]
pub struct AuditLog {
    db: Arc<DatabaseConnection>,
}

impl AuditLog {
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a redacted before/after record. Failures are swallowed after
    /// a warning so the primary operation is never aborted.
    pub async fn record(
        &self,
        admin_id: i32,
        action: AuditAction,
        entity: AuditEntity,
        old_data: Option<Value>,
        new_data: Option<Value>,
    ) {
        if let Err(e) = self.try_record(admin_id, action, entity, old_data, new_data).await {
            tracing::warn!(
                action = action.as_str(),
                entity = entity.as_str(),
                error = %e,
                "audit logging failed, continuing without it"
            );
        }
    }

    async fn try_record(
        &self,
        admin_id: i32,
        action: AuditAction,
        entity: AuditEntity,
        old_data: Option<Value>,
        new_data: Option<Value>,
    ) -> Result<()> {
        let entry = audit_logs::ActiveModel {
            admin_id: Set(Some(admin_id)),
            action: Set(action.as_str().to_string()),
            entity: Set(entity.as_str().to_string()),
            old_data: Set(old_data.map(redacted_json)),
            new_data: Set(new_data.map(redacted_json)),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        entry.insert(self.db.as_ref()).await?;

        self.trim().await;
        Ok(())
    }

    /// Keep only the newest [`AUDIT_KEEP`] entries once the table exceeds
    /// [`AUDIT_TRIM_THRESHOLD`]. Cleanup failures are non-fatal.
    async fn trim(&self) {
        if let Err(e) = self.try_trim().await {
            tracing::warn!(error = %e, "audit log cleanup failed");
        }
    }

    async fn try_trim(&self) -> Result<()> {
        let total = AuditLogs::find().count(self.db.as_ref()).await?;
        if total <= AUDIT_TRIM_THRESHOLD {
            return Ok(());
        }

        let ids_to_keep: Vec<i32> = AuditLogs::find()
            .select_only()
            .column(audit_logs::Column::Id)
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id)
            .limit(AUDIT_KEEP)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        AuditLogs::delete_many()
            .filter(Condition::all().add(audit_logs::Column::Id.is_not_in(ids_to_keep)))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    /// All entries, newest first, with a minimal joined admin record.
    pub async fn list(&self) -> Result<Vec<AuditEntryResponse>> {
        let entries = AuditLogs::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id)
            .find_also_related(entity::Admins)
            .all(self.db.as_ref())
            .await?;

        Ok(entries
            .into_iter()
            .map(|(entry, admin)| AuditEntryResponse {
                entry,
                admin: admin.map(|a| AuditActor {
                    id: a.id,
                    name: a.name,
                    username: a.username,
                    is_superadmin: a.is_superadmin,
                }),
            })
            .collect())
    }
}

/// Redact password material before a snapshot is serialized. Only
/// top-level keys are inspected; snapshots are flat entity records.
fn redacted_json(mut value: Value) -> String {
    if let Value::Object(map) = &mut value {
        for key in ["password", "password_hash"] {
            if let Some(field) = map.get_mut(key) {
                *field = Value::String(REDACTED.to_string());
            }
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_fields_are_redacted() {
        let raw = json!({
            "id": 1,
            "username": "a",
            "password_hash": "$2b$10$secret",
        });
        let stored = redacted_json(raw);
        assert!(!stored.contains("secret"));
        assert!(stored.contains(REDACTED));
        assert!(stored.contains("\"username\":\"a\""));
    }

    #[test]
    fn non_password_snapshots_unchanged() {
        let raw = json!({"id": 3, "name": "Wheat"});
        let stored = redacted_json(raw);
        assert!(!stored.contains(REDACTED));
    }
}
