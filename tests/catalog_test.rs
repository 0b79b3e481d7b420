//! Catalog behavior: product soft delete and view counting, category
//! image lifecycle, and the dashboard aggregates.

mod common;

use pretty_assertions::assert_eq;
use sea_orm::EntityTrait;

use agro_catalog::services::categories::{
    CategoryService, CreateCategoryRequest, UpdateCategoryRequest,
};
use agro_catalog::services::dashboard::DashboardService;
use agro_catalog::services::products::{ProductService, UpdateProductRequest};

#[tokio::test]
async fn soft_deleted_products_disappear_from_reads() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Wheat").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    assert_eq!(service.list().await.expect("list").len(), 1);

    service.remove(&actor, product_id).await.expect("soft delete");

    assert!(service.list().await.expect("list").is_empty());
    assert!(service.get(product_id).await.is_err());

    // The row itself survives.
    let row = entity::Products::find_by_id(product_id)
        .one(state.db.as_ref())
        .await
        .expect("query")
        .expect("row kept");
    assert!(row.is_deleted);
}

#[tokio::test]
async fn single_reads_bump_the_view_counter() {
    let (state, _storage) = common::test_state().await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Barley").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    service.get(product_id).await.expect("read 1");
    service.get(product_id).await.expect("read 2");
    let third = service.get(product_id).await.expect("read 3");

    // The response reflects the state before its own increment.
    assert_eq!(third.product.view_count, 2);

    // The stored counter has all three reads.
    let stored = entity::Products::find_by_id(product_id)
        .one(state.db.as_ref())
        .await
        .expect("query")
        .expect("row");
    assert_eq!(stored.view_count, 3);
}

#[tokio::test]
async fn overlapping_reads_do_not_lose_view_counts() {
    let (state, _storage) = common::test_state().await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Sorghum").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    let (a, b) = tokio::join!(service.get(product_id), service.get(product_id));
    a.expect("first read");
    b.expect("second read");

    let stored = entity::Products::find_by_id(product_id)
        .one(state.db.as_ref())
        .await
        .expect("query")
        .expect("row");
    assert_eq!(stored.view_count, 2);
}

#[tokio::test]
async fn product_updates_patch_only_supplied_fields() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Corn").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    let updated = service
        .update(
            &actor,
            product_id,
            UpdateProductRequest {
                price: Some(25.5),
                quantity: Some(7),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.product.price, 25.5);
    assert_eq!(updated.product.quantity, 7);
    assert_eq!(updated.product.name_en, "Corn");
    assert!(updated.category.is_some());
    assert!(updated.unit.is_some());
}

#[tokio::test]
async fn category_image_is_replaced_on_update_and_deleted_on_remove() {
    let (state, storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let service =
        CategoryService::new(state.db.clone(), state.audit.clone(), state.storage.clone());

    let created = service
        .create(
            &actor,
            CreateCategoryRequest {
                name_ru: "Овощи".to_string(),
                name_en: "Vegetables".to_string(),
                name_uz: "Sabzavotlar".to_string(),
                name_kz: "Көкөністер".to_string(),
            },
            common::upload("original.png"),
        )
        .await
        .expect("create");
    assert_eq!(storage.len(), 1);
    assert!(storage.contains(&created.image));

    let updated = service
        .update(
            &actor,
            created.id,
            UpdateCategoryRequest::default(),
            Some(common::upload("replacement.png")),
        )
        .await
        .expect("update with new image");
    assert_eq!(storage.len(), 1);
    assert!(!storage.contains(&created.image));
    assert!(storage.contains(&updated.image));

    service.remove(&actor, created.id).await.expect("remove");
    assert!(storage.is_empty());
}

#[tokio::test]
async fn dashboard_counts_exclude_soft_deleted_products() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;

    let product_service =
        ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());

    let kept = common::seed_product(&state, &refs, "Kept").await;
    let deleted = common::seed_product(&state, &refs, "Deleted").await;

    // Low stock and two views on the surviving product.
    product_service
        .update(
            &actor,
            kept,
            UpdateProductRequest {
                quantity: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("update quantity");
    product_service.get(kept).await.expect("view 1");
    product_service.get(kept).await.expect("view 2");

    product_service.get(deleted).await.expect("view deleted");
    product_service
        .remove(&actor, deleted)
        .await
        .expect("soft delete");

    let summary = DashboardService::new(state.db.clone())
        .summary()
        .await
        .expect("summary");
    assert_eq!(summary.stats.total_products, 1);
    assert_eq!(summary.stats.total_categories, 1);
    assert_eq!(summary.stats.total_views, 2);
    assert_eq!(summary.stats.low_stock_products, 1);
    assert!(summary.activities.is_empty());
}
