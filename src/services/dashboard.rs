//! # Dashboard summary
//!
//! Read-only aggregates for the admin landing page. Soft-deleted products
//! are excluded from every product statistic.

use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use serde::Serialize;

use entity::{Categories, Products, products};

use crate::error::Result;

/// Products with stock below this quantity count as low stock.
const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    #[serde(rename = "totalProducts")]
    pub total_products: u64,
    #[serde(rename = "totalCategories")]
    pub total_categories: u64,
    #[serde(rename = "totalViews")]
    pub total_views: i64,
    #[serde(rename = "lowStockProducts")]
    pub low_stock_products: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    /// Reserved for a recent-activity feed; always empty for now.
    pub activities: Vec<serde_json::Value>,
}

pub struct DashboardService {
    db: Arc<DatabaseConnection>,
}

impl DashboardService {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        let total_products = Products::find()
            .filter(products::Column::IsDeleted.eq(false))
            .count(self.db.as_ref())
            .await?;

        let total_categories = Categories::find().count(self.db.as_ref()).await?;

        let total_views: Option<i64> = Products::find()
            .select_only()
            .column_as(products::Column::ViewCount.sum(), "total_views")
            .filter(products::Column::IsDeleted.eq(false))
            .into_tuple()
            .one(self.db.as_ref())
            .await?
            .flatten();

        let low_stock_products = Products::find()
            .filter(products::Column::IsDeleted.eq(false))
            .filter(products::Column::Quantity.lt(LOW_STOCK_THRESHOLD))
            .count(self.db.as_ref())
            .await?;

        Ok(DashboardSummary {
            stats: DashboardStats {
                total_products,
                total_categories,
                total_views: total_views.unwrap_or(0),
                low_stock_products,
            },
            activities: Vec::new(),
        })
    }
}
