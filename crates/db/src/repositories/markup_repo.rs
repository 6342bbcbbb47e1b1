//! Repository for the `markups` table.

use annotater_core::error::StoreError;
use annotater_core::markup::Markup;
use annotater_core::repository::MarkupRepository;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{from_db_id, map_sqlx_error, to_db_id};
use crate::models::markup::{CreateMarkup, MarkupRow};

/// Column list for markups queries.
const COLUMNS: &str = "id, page_data, class_label, creator_id, error_bb";

/// Provides CRUD operations for individual annotation records.
#[derive(Clone)]
pub struct MarkupRepo {
    pool: PgPool,
}

impl MarkupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_domain(rows: Vec<MarkupRow>) -> Result<Vec<Markup>, StoreError> {
        rows.into_iter().map(Markup::try_from).collect()
    }
}

#[async_trait]
impl MarkupRepository for MarkupRepo {
    async fn add(&self, markup: &Markup) -> Result<u64, StoreError> {
        let input = CreateMarkup::from_domain(markup)?;
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO markups (page_data, class_label, creator_id, error_bb)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.page_data)
        .bind(input.class_label)
        .bind(input.creator_id)
        .bind(&input.error_bb)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        from_db_id(id)
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM markups WHERE id = $1")
            .bind(to_db_id(id)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> Result<Markup, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM markups WHERE id = $1");
        let row = sqlx::query_as::<_, MarkupRow>(&query)
            .bind(to_db_id(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;
        Markup::try_from(row)
    }

    async fn get_by_creator_id(&self, creator_id: u64) -> Result<Vec<Markup>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM markups
             WHERE creator_id = $1
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, MarkupRow>(&query)
            .bind(to_db_id(creator_id)?)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Self::into_domain(rows)
    }

    async fn get_all(&self) -> Result<Vec<Markup>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM markups ORDER BY id ASC");
        let rows = sqlx::query_as::<_, MarkupRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Self::into_domain(rows)
    }
}
