//! # Country of origin service

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

use entity::{Countries, countries};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;

#[derive(Debug, Deserialize)]
pub struct CreateCountryRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCountryRequest {
    pub name: Option<String>,
}

pub struct CountryService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
}

impl CountryService {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        request: CreateCountryRequest,
    ) -> Result<countries::Model> {
        let now = Utc::now().naive_utc();
        let created = countries::ActiveModel {
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
                AuditEntity::Country,
                None,
                snapshot(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<countries::Model>> {
        let countries = Countries::find()
            .order_by_asc(countries::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(countries)
    }

    pub async fn get(&self, id: i32) -> Result<countries::Model> {
        self.find_model(id).await
    }

    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateCountryRequest,
    ) -> Result<countries::Model> {
        let old = self.find_model(id).await?;

        let mut active: countries::ActiveModel = old.clone().into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Country,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;
        Ok(updated)
    }

    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<countries::Model> {
        let old = self.find_model(id).await?;
        Countries::delete_by_id(id).exec(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Country,
                snapshot(&old),
                snapshot(&old),
            )
            .await;
        Ok(old)
    }

    async fn find_model(&self, id: i32) -> Result<countries::Model> {
        Countries::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Country with ID {id} not found")))
    }
}
