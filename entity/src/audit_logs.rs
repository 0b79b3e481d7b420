//! # Audit log entity
//!
//! Before/after records of mutating operations. `old_data` and `new_data`
//! hold redacted JSON snapshots; the table is trimmed to the newest 250
//! entries by the audit service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub admin_id: Option<i32>,
    /// CREATE | UPDATE | DELETE
    pub action: String,
    /// ADMIN | CATEGORY | SUBCATEGORY | PRODUCT | COUNTRY | UNIT | CAROUSEL
    pub entity: String,
    pub old_data: Option<String>,
    pub new_data: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admins::Entity",
        from = "Column::AdminId",
        to = "super::admins::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Admin,
}

impl Related<super::admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
