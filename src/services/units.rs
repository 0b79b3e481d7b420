//! # Measurement unit service

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

use entity::{Units, units};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;

#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUnitRequest {
    pub name: Option<String>,
}

pub struct UnitService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
}

impl UnitService {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        request: CreateUnitRequest,
    ) -> Result<units::Model> {
        let now = Utc::now().naive_utc();
        let created = units::ActiveModel {
            name: Set(request.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Create,
                AuditEntity::Unit,
                None,
                snapshot(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<units::Model>> {
        let units = Units::find()
            .order_by_asc(units::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(units)
    }

    pub async fn get(&self, id: i32) -> Result<units::Model> {
        self.find_model(id).await
    }

    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateUnitRequest,
    ) -> Result<units::Model> {
        let old = self.find_model(id).await?;

        let mut active: units::ActiveModel = old.clone().into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Unit,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;
        Ok(updated)
    }

    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<units::Model> {
        let old = self.find_model(id).await?;
        Units::delete_by_id(id).exec(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Unit,
                snapshot(&old),
                snapshot(&old),
            )
            .await;
        Ok(old)
    }

    async fn find_model(&self, id: i32) -> Result<units::Model> {
        Units::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Unit with ID {id} not found")))
    }
}
