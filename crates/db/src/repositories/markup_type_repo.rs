//! Repository for the `markup_types` table.

use annotater_core::error::StoreError;
use annotater_core::markup::MarkupType;
use annotater_core::repository::MarkupTypeRepository;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{map_sqlx_error, to_db_id};
use crate::models::markup::MarkupTypeRow;

/// Column list for markup_types queries.
const COLUMNS: &str = "id, description, creator_id, class_name";

/// Provides CRUD operations for the markup-type catalog.
#[derive(Clone)]
pub struct MarkupTypeRepo {
    pool: PgPool,
}

impl MarkupTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_domain(rows: Vec<MarkupTypeRow>) -> Result<Vec<MarkupType>, StoreError> {
        rows.into_iter().map(MarkupType::try_from).collect()
    }
}

#[async_trait]
impl MarkupTypeRepository for MarkupTypeRepo {
    async fn add(&self, markup_type: &MarkupType) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO markup_types (id, description, creator_id, class_name)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(to_db_id(markup_type.id)?)
        .bind(&markup_type.description)
        .bind(markup_type.creator_id)
        .bind(&markup_type.class_name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM markup_types WHERE id = $1")
            .bind(to_db_id(id)?)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> Result<MarkupType, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM markup_types WHERE id = $1");
        let row = sqlx::query_as::<_, MarkupTypeRow>(&query)
            .bind(to_db_id(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;
        MarkupType::try_from(row)
    }

    async fn get_by_creator_id(&self, creator_id: i64) -> Result<Vec<MarkupType>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM markup_types
             WHERE creator_id = $1
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, MarkupTypeRow>(&query)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Self::into_domain(rows)
    }

    async fn get_all(&self) -> Result<Vec<MarkupType>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM markup_types ORDER BY id ASC");
        let rows = sqlx::query_as::<_, MarkupTypeRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Self::into_domain(rows)
    }

    async fn get_by_ids(&self, ids: &[u64]) -> Result<Vec<MarkupType>, StoreError> {
        let ids = ids
            .iter()
            .map(|id| to_db_id(*id))
            .collect::<Result<Vec<i64>, _>>()?;
        let query = format!(
            "SELECT {COLUMNS} FROM markup_types
             WHERE id = ANY($1)
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, MarkupTypeRow>(&query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Self::into_domain(rows)
    }
}
