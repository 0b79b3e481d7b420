//! # Product service
//!
//! Catalog products with localized fields, soft deletion, a view counter
//! and the ordered file list. File order is a dense 0..N-1 permutation per
//! product: additions append at max+1, removals re-sequence the remainder
//! inside one transaction, and bulk reorder applies caller-supplied values
//! verbatim (the client sends a full set; ownership of each file is the
//! only thing checked).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use entity::{
    Categories, Countries, ProductFiles, Products, Subcategories, Units, categories, countries,
    product_files, products, subcategories, units,
};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::error::{ApiError, Result};
use crate::services::snapshot;
use crate::storage::{ObjectStorage, UploadFile};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name_ru: String,
    pub name_en: String,
    pub name_uz: String,
    pub name_kz: String,
    pub description_ru: String,
    pub description_en: String,
    pub description_uz: String,
    pub description_kz: String,
    pub structure_ru: String,
    pub structure_en: String,
    pub structure_uz: String,
    pub structure_kz: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(rename = "categoryId")]
    pub category_id: i32,
    #[serde(rename = "subcategoryId")]
    pub subcategory_id: i32,
    #[serde(rename = "countryId")]
    pub country_id: i32,
    #[serde(rename = "unitId")]
    pub unit_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name_ru: Option<String>,
    pub name_en: Option<String>,
    pub name_uz: Option<String>,
    pub name_kz: Option<String>,
    pub description_ru: Option<String>,
    pub description_en: Option<String>,
    pub description_uz: Option<String>,
    pub description_kz: Option<String>,
    pub structure_ru: Option<String>,
    pub structure_en: Option<String>,
    pub structure_uz: Option<String>,
    pub structure_kz: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i32>,
    #[serde(rename = "subcategoryId")]
    pub subcategory_id: Option<i32>,
    #[serde(rename = "countryId")]
    pub country_id: Option<i32>,
    #[serde(rename = "unitId")]
    pub unit_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct FileOrderUpdate {
    #[serde(rename = "fileId")]
    pub file_id: i32,
    pub order: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFileOrderRequest {
    pub files: Vec<FileOrderUpdate>,
}

/// Product with its related records and ordered files embedded.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: products::Model,
    pub category: Option<categories::Model>,
    pub subcategory: Option<subcategories::Model>,
    pub country: Option<countries::Model>,
    pub unit: Option<units::Model>,
    pub files: Vec<product_files::Model>,
}

pub struct ProductService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
    storage: Arc<dyn ObjectStorage>,
}

impl ProductService {
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
        request: CreateProductRequest,
    ) -> Result<ProductResponse> {
        let now = Utc::now().naive_utc();
        let created = products::ActiveModel {
            name_ru: Set(request.name_ru),
            name_en: Set(request.name_en),
            name_uz: Set(request.name_uz),
            name_kz: Set(request.name_kz),
            description_ru: Set(request.description_ru),
            description_en: Set(request.description_en),
            description_uz: Set(request.description_uz),
            description_kz: Set(request.description_kz),
            structure_ru: Set(request.structure_ru),
            structure_en: Set(request.structure_en),
            structure_uz: Set(request.structure_uz),
            structure_kz: Set(request.structure_kz),
            price: Set(request.price),
            quantity: Set(request.quantity),
            view_count: Set(0),
            is_deleted: Set(false),
            category_id: Set(request.category_id),
            subcategory_id: Set(request.subcategory_id),
            country_id: Set(request.country_id),
            unit_id: Set(request.unit_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        let response = self.response_for(created).await?;
        self.audit
            .record(
                actor.id,
                AuditAction::Create,
                AuditEntity::Product,
                None,
                snapshot(&response),
            )
            .await;
        Ok(response)
    }

    /// Non-deleted products with related records, files ordered ascending.
    pub async fn list(&self) -> Result<Vec<ProductResponse>> {
        let with_files = Products::find()
            .filter(products::Column::IsDeleted.eq(false))
            .find_with_related(ProductFiles)
            .order_by_asc(products::Column::Id)
            .order_by_asc(product_files::Column::OrderIndex)
            .all(self.db.as_ref())
            .await?;

        let categories = index_by_id(Categories::find().all(self.db.as_ref()).await?, |c| c.id);
        let subcategories =
            index_by_id(Subcategories::find().all(self.db.as_ref()).await?, |s| s.id);
        let countries = index_by_id(Countries::find().all(self.db.as_ref()).await?, |c| c.id);
        let units = index_by_id(Units::find().all(self.db.as_ref()).await?, |u| u.id);

        Ok(with_files
            .into_iter()
            .map(|(product, files)| ProductResponse {
                category: categories.get(&product.category_id).cloned(),
                subcategory: subcategories.get(&product.subcategory_id).cloned(),
                country: countries.get(&product.country_id).cloned(),
                unit: units.get(&product.unit_id).cloned(),
                files,
                product,
            })
            .collect())
    }

    /// Single product read; bumps the view counter as a side effect.
    /// The counter is incremented in the database, never read-modify-write;
    /// the response carries the pre-read value.
    pub async fn get(&self, id: i32) -> Result<ProductResponse> {
        let product = self.find_active(id).await?;

        Products::update_many()
            .col_expr(
                products::Column::ViewCount,
                Expr::col(products::Column::ViewCount).add(1),
            )
            .filter(products::Column::Id.eq(product.id))
            .exec(self.db.as_ref())
            .await?;

        self.response_for(product).await
    }

    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse> {
        let old = self.find_any(id).await?;
        let old_snapshot = self.snapshot_product(&old).await;

        let mut active: products::ActiveModel = old.into();
        macro_rules! patch {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = request.$field {
                    active.$field = Set(value);
                })+
            };
        }
        patch!(
            name_ru,
            name_en,
            name_uz,
            name_kz,
            description_ru,
            description_en,
            description_uz,
            description_kz,
            structure_ru,
            structure_en,
            structure_uz,
            structure_kz,
            price,
            quantity,
            category_id,
            subcategory_id,
            country_id,
            unit_id,
        );
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(self.db.as_ref()).await?;
        let response = self.response_for(updated).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Product,
                old_snapshot,
                snapshot(&response),
            )
            .await;
        Ok(response)
    }

    /// Soft delete: the row stays, all normal reads exclude it.
    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<ProductResponse> {
        let old = self.find_any(id).await?;
        let old_snapshot = self.snapshot_product(&old).await;

        let mut active: products::ActiveModel = old.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().naive_utc());
        let deleted = active.update(self.db.as_ref()).await?;

        let response = self.response_for(deleted).await?;
        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Product,
                old_snapshot,
                snapshot(&response),
            )
            .await;
        Ok(response)
    }

    /// Attach a file at the end of the product's ordering. The blob is
    /// uploaded before the record is written, so a failed upload leaves no
    /// orphan row; a failed insert after a completed upload can orphan the
    /// blob (known gap, no compensating delete).
    pub async fn add_file(
        &self,
        actor: &CurrentAdmin,
        product_id: i32,
        file: UploadFile,
        is_video: bool,
    ) -> Result<product_files::Model> {
        let product = self.find_active(product_id).await?;
        let old_snapshot = self.snapshot_product(&product).await;

        let next_order = ProductFiles::find()
            .filter(product_files::Column::ProductId.eq(product_id))
            .order_by_desc(product_files::Column::OrderIndex)
            .one(self.db.as_ref())
            .await?
            .map_or(0, |f| f.order_index + 1);

        let url = self.storage.upload("products", &file).await?;

        let created = product_files::ActiveModel {
            product_id: Set(product_id),
            url: Set(url),
            is_video: Set(is_video),
            order_index: Set(next_order),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        let new_snapshot = self.snapshot_product(&product).await;
        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Product,
                old_snapshot,
                new_snapshot,
            )
            .await;
        Ok(created)
    }

    /// Remove a file and close the gap it leaves: delete blob and row,
    /// then rewrite `order_index` for every remaining file whose position
    /// no longer matches its stored value. One transaction end to end.
    pub async fn remove_file(
        &self,
        actor: &CurrentAdmin,
        product_id: i32,
        file_id: i32,
    ) -> Result<()> {
        let product = self.find_active(product_id).await?;
        let old_snapshot = self.snapshot_product(&product).await;

        let file = ProductFiles::find_by_id(file_id)
            .filter(product_files::Column::ProductId.eq(product_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "File with ID {file_id} not found for product {product_id}"
                ))
            })?;

        let txn = self.db.begin().await?;

        self.storage.delete(&file.url).await?;
        ProductFiles::delete_by_id(file.id).exec(&txn).await?;

        let remaining = ProductFiles::find()
            .filter(product_files::Column::ProductId.eq(product_id))
            .order_by_asc(product_files::Column::OrderIndex)
            .all(&txn)
            .await?;

        for (index, remaining_file) in remaining.into_iter().enumerate() {
            let index = index as i32;
            if remaining_file.order_index != index {
                let mut active: product_files::ActiveModel = remaining_file.into();
                active.order_index = Set(index);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;

        let new_snapshot = self.snapshot_product(&product).await;
        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Product,
                old_snapshot,
                new_snapshot,
            )
            .await;
        Ok(())
    }

    /// Apply an explicit (fileId, order) assignment in one transaction.
    /// Values are trusted verbatim; only product ownership is enforced.
    pub async fn reorder_files(
        &self,
        actor: &CurrentAdmin,
        product_id: i32,
        request: UpdateFileOrderRequest,
    ) -> Result<()> {
        let product = self.find_active(product_id).await?;
        let old_snapshot = self.snapshot_product(&product).await;

        let txn = self.db.begin().await?;
        for entry in request.files {
            let file = ProductFiles::find_by_id(entry.file_id)
                .filter(product_files::Column::ProductId.eq(product_id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!(
                        "File with ID {} not found for product {product_id}",
                        entry.file_id
                    ))
                })?;

            let mut active: product_files::ActiveModel = file.into();
            active.order_index = Set(entry.order);
            active.update(&txn).await?;
        }
        txn.commit().await?;

        let new_snapshot = self.snapshot_product(&product).await;
        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Product,
                old_snapshot,
                new_snapshot,
            )
            .await;
        Ok(())
    }

    async fn find_active(&self, id: i32) -> Result<products::Model> {
        Products::find_by_id(id)
            .filter(products::Column::IsDeleted.eq(false))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Product with ID {id} not found")))
    }

    /// Lookup without the soft-delete filter (update/remove paths).
    async fn find_any(&self, id: i32) -> Result<products::Model> {
        Products::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Product with ID {id} not found")))
    }

    async fn response_for(&self, product: products::Model) -> Result<ProductResponse> {
        let files = ProductFiles::find()
            .filter(product_files::Column::ProductId.eq(product.id))
            .order_by_asc(product_files::Column::OrderIndex)
            .all(self.db.as_ref())
            .await?;

        let category = Categories::find_by_id(product.category_id)
            .one(self.db.as_ref())
            .await?;
        let subcategory = Subcategories::find_by_id(product.subcategory_id)
            .one(self.db.as_ref())
            .await?;
        let country = Countries::find_by_id(product.country_id)
            .one(self.db.as_ref())
            .await?;
        let unit = Units::find_by_id(product.unit_id).one(self.db.as_ref()).await?;

        Ok(ProductResponse {
            category,
            subcategory,
            country,
            unit,
            files,
            product,
        })
    }

    /// Audit snapshot of the product in its current stored state; best
    /// effort, `None` when it cannot be built.
    async fn snapshot_product(&self, product: &products::Model) -> Option<Value> {
        let current = Products::find_by_id(product.id)
            .one(self.db.as_ref())
            .await
            .ok()??;
        let response = self.response_for(current).await.ok()?;
        snapshot(&response)
    }
}

fn index_by_id<T: Clone>(items: Vec<T>, id: impl Fn(&T) -> i32) -> HashMap<i32, T> {
    items.into_iter().map(|item| (id(&item), item)).collect()
}
