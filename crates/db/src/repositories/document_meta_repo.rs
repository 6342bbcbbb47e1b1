//! Repository for the `documents` table.

use annotater_core::document::DocumentMetaData;
use annotater_core::error::StoreError;
use annotater_core::repository::DocumentMetaRepository;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_sqlx_error, to_db_id};
use crate::models::document::DocumentRow;

/// Column list for documents queries.
const COLUMNS: &str = "id, page_count, document_name, checks_count, creator_id, creation_time";

/// Provides persistence for document metadata.
#[derive(Clone)]
pub struct DocumentMetaRepo {
    pool: PgPool,
}

impl DocumentMetaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentMetaRepository for DocumentMetaRepo {
    /// Upsert keyed by id. A repeated load of the same document keeps the
    /// original creator and creation time and counts one more check.
    ///
    /// An id already owned by another creator is left untouched and
    /// reported as [`StoreError::Duplicate`].
    async fn add(&self, meta: &DocumentMetaData) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO documents
                (id, page_count, document_name, checks_count, creator_id, creation_time)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                page_count = EXCLUDED.page_count,
                document_name = EXCLUDED.document_name,
                checks_count = documents.checks_count + 1
             WHERE documents.creator_id = EXCLUDED.creator_id",
        )
        .bind(meta.id)
        .bind(meta.page_count)
        .bind(&meta.document_name)
        .bind(meta.checks_count)
        .bind(to_db_id(meta.creator_id)?)
        .bind(meta.creation_time)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<DocumentMetaData, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;
        DocumentMetaData::try_from(row)
    }

    async fn get_by_creator_id(
        &self,
        creator_id: u64,
    ) -> Result<Vec<DocumentMetaData>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE creator_id = $1
             ORDER BY creation_time ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(to_db_id(creator_id)?)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.into_iter().map(DocumentMetaData::try_from).collect()
    }
}
