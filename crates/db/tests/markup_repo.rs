use annotater_core::error::StoreError;
use annotater_core::repository::{MarkupRepository, MarkupTypeRepository};
use annotater_core::test_support::{markup_type_with_id, valid_markup, TEST_BASIC_ID};
use annotater_db::repositories::{MarkupRepo, MarkupTypeRepo};
use assert_matches::assert_matches;
use sqlx::PgPool;

async fn seed_type(pool: &PgPool, id: u64) {
    MarkupTypeRepo::new(pool.clone())
        .add(&markup_type_with_id(id))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_assigns_id_and_round_trips(pool: PgPool) {
    seed_type(&pool, 1).await;
    let repo = MarkupRepo::new(pool);
    let markup = valid_markup();

    let id = repo.add(&markup).await.unwrap();
    assert!(id > 0);

    let found = repo.get_by_id(id).await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.creator_id, markup.creator_id);
    assert_eq!(found.class_label, markup.class_label);
    assert_eq!(found.error_bb, markup.error_bb);
    assert_eq!(found.page_data, markup.page_data);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_class_label_violates_key(pool: PgPool) {
    let repo = MarkupRepo::new(pool);
    let result = repo.add(&valid_markup()).await;
    assert_matches!(result, Err(StoreError::ViolatingKey));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_referenced_type_cannot_be_deleted(pool: PgPool) {
    seed_type(&pool, 1).await;
    MarkupRepo::new(pool.clone())
        .add(&valid_markup())
        .await
        .unwrap();

    let result = MarkupTypeRepo::new(pool).delete_by_id(1).await;
    assert_matches!(result, Err(StoreError::ViolatingKey));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_creator_id_filters(pool: PgPool) {
    seed_type(&pool, 1).await;
    let repo = MarkupRepo::new(pool);
    let first = repo.add(&valid_markup()).await.unwrap();
    let mut other = valid_markup();
    other.creator_id = 99;
    repo.add(&other).await.unwrap();

    let mine = repo.get_by_creator_id(TEST_BASIC_ID).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first);

    assert_eq!(repo.get_all().await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_get_is_not_found(pool: PgPool) {
    seed_type(&pool, 1).await;
    let repo = MarkupRepo::new(pool);
    let id = repo.add(&valid_markup()).await.unwrap();

    repo.delete_by_id(id).await.unwrap();
    assert_matches!(repo.get_by_id(id).await, Err(StoreError::NotFound));
    assert_matches!(repo.delete_by_id(id).await, Err(StoreError::NotFound));
}
