//! # Category service
//!
//! Categories carry an image in object storage: required on create,
//! replaced (old blob deleted) on update, deleted on removal.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use entity::{Categories, Products, Subcategories, categories, products, subcategories};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;
use crate::storage::{ObjectStorage, UploadFile};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name_ru: String,
    pub name_en: String,
    pub name_uz: String,
    pub name_kz: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name_ru: Option<String>,
    pub name_en: Option<String>,
    pub name_uz: Option<String>,
    pub name_kz: Option<String>,
}

/// Category with its subcategories; detail reads also embed the products.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    #[serde(flatten)]
    pub category: categories::Model,
    pub subcategories: Vec<subcategories::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<products::Model>>,
}

pub struct CategoryService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
    storage: Arc<dyn ObjectStorage>,
}

impl CategoryService {
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        audit: AuditLog,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self { db, audit, storage }
    }

    /// The image is mandatory; handlers reject the request before calling
    /// this when the multipart body carries no file.
    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        request: CreateCategoryRequest,
        image: UploadFile,
    ) -> Result<categories::Model> {
        let image_url = self.storage.upload("categories", &image).await?;
        let now = Utc::now().naive_utc();

        let created = categories::ActiveModel {
            name_ru: Set(request.name_ru),
            name_en: Set(request.name_en),
            name_uz: Set(request.name_uz),
            name_kz: Set(request.name_kz),
            image: Set(image_url),
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
                AuditEntity::Category,
                None,
                snapshot(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponse>> {
        let with_subcategories = Categories::find()
            .find_with_related(Subcategories)
            .order_by_asc(categories::Column::Id)
            .order_by_asc(subcategories::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(with_subcategories
            .into_iter()
            .map(|(category, subcategories)| CategoryResponse {
                category,
                subcategories,
                products: None,
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<CategoryResponse> {
        let category = self.find_model(id).await?;
        let subcategories = Subcategories::find()
            .filter(subcategories::Column::CategoryId.eq(id))
            .order_by_asc(subcategories::Column::Id)
            .all(self.db.as_ref())
            .await?;
        let products = Products::find()
            .filter(products::Column::CategoryId.eq(id))
            .filter(products::Column::IsDeleted.eq(false))
            .order_by_asc(products::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(CategoryResponse {
            category,
            subcategories,
            products: Some(products),
        })
    }

    /// A new image replaces the stored one; the old blob is deleted after
    /// the upload succeeds.
    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateCategoryRequest,
        image: Option<UploadFile>,
    ) -> Result<categories::Model> {
        let old = self.find_model(id).await?;

        let mut active: categories::ActiveModel = old.clone().into();
        if let Some(name_ru) = request.name_ru {
            active.name_ru = Set(name_ru);
        }
        if let Some(name_en) = request.name_en {
            active.name_en = Set(name_en);
        }
        if let Some(name_uz) = request.name_uz {
            active.name_uz = Set(name_uz);
        }
        if let Some(name_kz) = request.name_kz {
            active.name_kz = Set(name_kz);
        }
        if let Some(image) = image {
            let new_url = self.storage.upload("categories", &image).await?;
            self.storage.delete(&old.image).await?;
            active.image = Set(new_url);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Category,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;
        Ok(updated)
    }

    /// Hard delete; subcategories cascade at the database level and the
    /// image blob is removed from storage.
    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<categories::Model> {
        let old = self.find_model(id).await?;

        self.storage.delete(&old.image).await?;
        Categories::delete_by_id(id).exec(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Category,
                snapshot(&old),
                snapshot(&old),
            )
            .await;
        Ok(old)
    }

    async fn find_model(&self, id: i32) -> Result<categories::Model> {
        Categories::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Category with ID {id} not found")))
    }
}
