//! Row struct for the `documents` table.

use annotater_core::document::DocumentMetaData;
use annotater_core::error::StoreError;
use annotater_core::types::Timestamp;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::from_db_id;

#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub page_count: i32,
    pub document_name: String,
    pub checks_count: i32,
    pub creator_id: i64,
    pub creation_time: Timestamp,
}

impl TryFrom<DocumentRow> for DocumentMetaData {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(DocumentMetaData {
            id: row.id,
            creator_id: from_db_id(row.creator_id)?,
            document_name: row.document_name,
            page_count: row.page_count,
            checks_count: row.checks_count,
            creation_time: row.creation_time,
        })
    }
}
