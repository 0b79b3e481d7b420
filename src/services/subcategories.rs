//! # Subcategory service

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use entity::{Categories, Subcategories, categories, subcategories};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;

#[derive(Debug, Deserialize)]
pub struct CreateSubcategoryRequest {
    pub name_ru: String,
    pub name_en: String,
    pub name_uz: String,
    pub name_kz: String,
    #[serde(rename = "categoryId")]
    pub category_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubcategoryRequest {
    pub name_ru: Option<String>,
    pub name_en: Option<String>,
    pub name_uz: Option<String>,
    pub name_kz: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SubcategoryResponse {
    #[serde(flatten)]
    pub subcategory: subcategories::Model,
    pub category: Option<categories::Model>,
}

pub struct SubcategoryService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
}

impl SubcategoryService {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        request: CreateSubcategoryRequest,
    ) -> Result<subcategories::Model> {
        // Reject dangling parents up front instead of surfacing an FK error.
        self.require_category(request.category_id).await?;
        let now = Utc::now().naive_utc();

        let created = subcategories::ActiveModel {
            name_ru: Set(request.name_ru),
            name_en: Set(request.name_en),
            name_uz: Set(request.name_uz),
            name_kz: Set(request.name_kz),
            category_id: Set(request.category_id),
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
                AuditEntity::Subcategory,
                None,
                snapshot(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<SubcategoryResponse>> {
        let with_category = Subcategories::find()
            .order_by_asc(subcategories::Column::Id)
            .find_also_related(Categories)
            .all(self.db.as_ref())
            .await?;

        Ok(with_category
            .into_iter()
            .map(|(subcategory, category)| SubcategoryResponse {
                subcategory,
                category,
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<SubcategoryResponse> {
        let subcategory = self.find_model(id).await?;
        let category = Categories::find_by_id(subcategory.category_id)
            .one(self.db.as_ref())
            .await?;
        Ok(SubcategoryResponse {
            subcategory,
            category,
        })
    }

    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateSubcategoryRequest,
    ) -> Result<subcategories::Model> {
        let old = self.find_model(id).await?;

        if let Some(category_id) = request.category_id {
            self.require_category(category_id).await?;
        }

        let mut active: subcategories::ActiveModel = old.clone().into();
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
        if let Some(category_id) = request.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Subcategory,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;
        Ok(updated)
    }

    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<subcategories::Model> {
        let old = self.find_model(id).await?;
        Subcategories::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Subcategory,
                snapshot(&old),
                snapshot(&old),
            )
            .await;
        Ok(old)
    }

    async fn find_model(&self, id: i32) -> Result<subcategories::Model> {
        Subcategories::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Subcategory with ID {id} not found")))
    }

    async fn require_category(&self, category_id: i32) -> Result<()> {
        Categories::find_by_id(category_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!("Category with ID {category_id} not found"))
            })?;
        Ok(())
    }
}
