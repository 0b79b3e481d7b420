//! File-list maintenance: dense ordering across add/remove sequences,
//! verbatim bulk reorder, and blob cleanup.

mod common;

use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use agro_catalog::error::ApiError;
use agro_catalog::services::products::{
    FileOrderUpdate, ProductService, UpdateFileOrderRequest,
};

async fn file_orders(state: &agro_catalog::AppState, product_id: i32) -> Vec<(i32, i32)> {
    entity::ProductFiles::find()
        .filter(entity::product_files::Column::ProductId.eq(product_id))
        .order_by_asc(entity::product_files::Column::OrderIndex)
        .all(state.db.as_ref())
        .await
        .expect("query files")
        .into_iter()
        .map(|f| (f.id, f.order_index))
        .collect()
}

#[tokio::test]
async fn added_files_get_sequential_orders() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Wheat").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());

    let a = service
        .add_file(&actor, product_id, common::upload("a.png"), false)
        .await
        .expect("add a");
    let b = service
        .add_file(&actor, product_id, common::upload("b.png"), false)
        .await
        .expect("add b");
    let c = service
        .add_file(&actor, product_id, common::upload("c.mp4"), true)
        .await
        .expect("add c");

    assert_eq!(a.order_index, 0);
    assert_eq!(b.order_index, 1);
    assert_eq!(c.order_index, 2);
    assert!(c.is_video);
}

#[tokio::test]
async fn removal_re_sequences_remaining_files() {
    let (state, storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Barley").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());

    let a = service
        .add_file(&actor, product_id, common::upload("a.png"), false)
        .await
        .expect("add a");
    let b = service
        .add_file(&actor, product_id, common::upload("b.png"), false)
        .await
        .expect("add b");
    let c = service
        .add_file(&actor, product_id, common::upload("c.png"), false)
        .await
        .expect("add c");
    assert_eq!(storage.len(), 3);

    service
        .remove_file(&actor, product_id, b.id)
        .await
        .expect("remove middle file");

    // The gap at position 1 is closed and the blob is gone.
    assert_eq!(file_orders(&state, product_id).await, vec![(a.id, 0), (c.id, 1)]);
    assert!(!storage.contains(&b.url));
    assert_eq!(storage.len(), 2);

    // A new file lands after the compacted tail.
    let d = service
        .add_file(&actor, product_id, common::upload("d.png"), false)
        .await
        .expect("add d");
    assert_eq!(d.order_index, 2);
}

#[tokio::test]
async fn removing_unknown_file_is_not_found() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Corn").await;
    let other_id = common::seed_product(&state, &refs, "Rye").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    let file = service
        .add_file(&actor, other_id, common::upload("other.png"), false)
        .await
        .expect("add file");

    // File belongs to a different product.
    let err = service
        .remove_file(&actor, product_id, file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn bulk_reorder_applies_supplied_values_verbatim() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Oats").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    let a = service
        .add_file(&actor, product_id, common::upload("a.png"), false)
        .await
        .expect("add a");
    let b = service
        .add_file(&actor, product_id, common::upload("b.png"), false)
        .await
        .expect("add b");
    let c = service
        .add_file(&actor, product_id, common::upload("c.png"), false)
        .await
        .expect("add c");

    service
        .reorder_files(
            &actor,
            product_id,
            UpdateFileOrderRequest {
                files: vec![
                    FileOrderUpdate { file_id: a.id, order: 2 },
                    FileOrderUpdate { file_id: b.id, order: 0 },
                    FileOrderUpdate { file_id: c.id, order: 1 },
                ],
            },
        )
        .await
        .expect("reorder");

    assert_eq!(
        file_orders(&state, product_id).await,
        vec![(b.id, 0), (c.id, 1), (a.id, 2)]
    );
}

#[tokio::test]
async fn bulk_reorder_with_foreign_file_rolls_back() {
    let (state, _storage) = common::test_state().await;
    let actor = common::seeded_superadmin(&state).await;
    let refs = common::seed_catalog_refs(&state).await;
    let product_id = common::seed_product(&state, &refs, "Millet").await;
    let other_id = common::seed_product(&state, &refs, "Rice").await;

    let service = ProductService::new(state.db.clone(), state.audit.clone(), state.storage.clone());
    let mine = service
        .add_file(&actor, product_id, common::upload("mine.png"), false)
        .await
        .expect("add mine");
    let foreign = service
        .add_file(&actor, other_id, common::upload("foreign.png"), false)
        .await
        .expect("add foreign");

    let err = service
        .reorder_files(
            &actor,
            product_id,
            UpdateFileOrderRequest {
                files: vec![
                    FileOrderUpdate { file_id: mine.id, order: 5 },
                    FileOrderUpdate { file_id: foreign.id, order: 0 },
                ],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // Nothing from the failed batch was committed.
    assert_eq!(file_orders(&state, product_id).await, vec![(mine.id, 0)]);
}
