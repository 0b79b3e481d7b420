//! Shared fixtures: in-memory database with migrations applied, app state
//! backed by in-memory object storage, and catalog seed helpers.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, EntityTrait, QueryFilter, Set};

use agro_catalog::auth::middleware::CurrentAdmin;
use agro_catalog::auth::password::hash_password;
use agro_catalog::config::AppConfig;
use agro_catalog::server::AppState;
use agro_catalog::storage::{MemoryStorage, UploadFile};

pub async fn test_state() -> (AppState, Arc<MemoryStorage>) {
    // Single connection: every pooled connection to `sqlite::memory:`
    // would otherwise get its own empty database.
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    let mut config = AppConfig::default();
    config.auth.jwt_secret = "test-secret".to_string();

    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::new(config, db, storage.clone(), reqwest::Client::new());
    (state, storage)
}

/// The superadmin created by the seed migration.
pub async fn seeded_superadmin(state: &AppState) -> CurrentAdmin {
    entity::Admins::find()
        .filter(entity::admins::Column::Username.eq("superadmin"))
        .one(state.db.as_ref())
        .await
        .expect("query admins")
        .expect("seeded superadmin")
        .into()
}

/// Insert a plain (non-super) admin and return it as a request actor.
pub async fn plain_admin(state: &AppState, username: &str, password: &str) -> CurrentAdmin {
    let now = Utc::now().naive_utc();
    entity::admins::ActiveModel {
        name: Set(format!("Admin {username}")),
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password).expect("hash")),
        is_superadmin: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert admin")
    .into()
}

pub fn upload(filename: &str) -> UploadFile {
    UploadFile {
        filename: filename.to_string(),
        content_type: "image/png".to_string(),
        data: Bytes::from_static(b"\x89PNG test bytes"),
    }
}

/// Category, subcategory, country and unit rows a product can reference.
pub struct CatalogRefs {
    pub category_id: i32,
    pub subcategory_id: i32,
    pub country_id: i32,
    pub unit_id: i32,
}

pub async fn seed_catalog_refs(state: &AppState) -> CatalogRefs {
    let now = Utc::now().naive_utc();

    let category = entity::categories::ActiveModel {
        name_ru: Set("Зерновые".to_string()),
        name_en: Set("Grains".to_string()),
        name_uz: Set("Donlar".to_string()),
        name_kz: Set("Дәнді".to_string()),
        image: Set("memory://categories/seed.png".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert category");

    let subcategory = entity::subcategories::ActiveModel {
        name_ru: Set("Пшеница".to_string()),
        name_en: Set("Wheat".to_string()),
        name_uz: Set("Bug'doy".to_string()),
        name_kz: Set("Бидай".to_string()),
        category_id: Set(category.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert subcategory");

    let country = entity::countries::ActiveModel {
        name: Set("Uzbekistan".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert country");

    let unit = entity::units::ActiveModel {
        name: Set("kg".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert unit");

    CatalogRefs {
        category_id: category.id,
        subcategory_id: subcategory.id,
        country_id: country.id,
        unit_id: unit.id,
    }
}

pub async fn seed_product(state: &AppState, refs: &CatalogRefs, name: &str) -> i32 {
    let now = Utc::now().naive_utc();
    entity::products::ActiveModel {
        name_ru: Set(name.to_string()),
        name_en: Set(name.to_string()),
        name_uz: Set(name.to_string()),
        name_kz: Set(name.to_string()),
        description_ru: Set("desc".to_string()),
        description_en: Set("desc".to_string()),
        description_uz: Set("desc".to_string()),
        description_kz: Set("desc".to_string()),
        structure_ru: Set("struct".to_string()),
        structure_en: Set("struct".to_string()),
        structure_uz: Set("struct".to_string()),
        structure_kz: Set("struct".to_string()),
        price: Set(10.0),
        quantity: Set(100),
        view_count: Set(0),
        is_deleted: Set(false),
        category_id: Set(refs.category_id),
        subcategory_id: Set(refs.subcategory_id),
        country_id: Set(refs.country_id),
        unit_id: Set(refs.unit_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await
    .expect("insert product")
    .id
}
