//! # Carousel banner service
//!
//! Banner items are a file URL and nothing else: upload on create, blob
//! deleted on removal. There is no update path.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use entity::{CarouselItems, carousel_items};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;
use crate::storage::{ObjectStorage, UploadFile};

pub struct CarouselService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
    storage: Arc<dyn ObjectStorage>,
}

impl CarouselService {
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        audit: AuditLog,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self { db, audit, storage }
    }

    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        file: UploadFile,
    ) -> Result<carousel_items::Model> {
        let url = self.storage.upload("carousel", &file).await?;

        let created = carousel_items::ActiveModel {
            file: Set(url),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Create,
                AuditEntity::Carousel,
                None,
                snapshot(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<carousel_items::Model>> {
        let items = CarouselItems::find()
            .order_by_asc(carousel_items::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(items)
    }

    pub async fn get(&self, id: i32) -> Result<carousel_items::Model> {
        self.find_model(id).await
    }

    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<carousel_items::Model> {
        let old = self.find_model(id).await?;

        self.storage.delete(&old.file).await?;
        CarouselItems::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Carousel,
                snapshot(&old),
                snapshot(&old),
            )
            .await;
        Ok(old)
    }

    async fn find_model(&self, id: i32) -> Result<carousel_items::Model> {
        CarouselItems::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Carousel item with ID {id} not found")))
    }
}
