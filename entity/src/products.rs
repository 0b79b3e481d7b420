//! # Product entity
//!
//! Core catalog entity with localized name/description/structure fields
//! (ru/en/uz/kz). Products are soft-deleted: `is_deleted` rows stay in the
//! table but are excluded from all normal reads.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
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
    pub view_count: i32,
    pub is_deleted: bool,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub country_id: i32,
    pub unit_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::subcategories::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategories::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subcategory,
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::units::Entity",
        from = "Column::UnitId",
        to = "super::units::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Unit,
    #[sea_orm(has_many = "super::product_files::Entity")]
    ProductFiles,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::product_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
