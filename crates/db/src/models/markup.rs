//! Row structs for the `markups` and `markup_types` tables.

use annotater_core::error::StoreError;
use annotater_core::markup::{Markup, MarkupType};
use sqlx::FromRow;

use crate::error::{from_db_id, to_db_id};

/// A row from the `markups` table.
#[derive(Debug, Clone, FromRow)]
pub struct MarkupRow {
    pub id: i64,
    pub page_data: Vec<u8>,
    pub class_label: i64,
    pub creator_id: i64,
    pub error_bb: Vec<f32>,
}

impl TryFrom<MarkupRow> for Markup {
    type Error = StoreError;

    fn try_from(row: MarkupRow) -> Result<Self, Self::Error> {
        let error_bb = <[f32; 4]>::try_from(row.error_bb.as_slice()).map_err(|_| {
            StoreError::Backend(format!(
                "markup {} has a {}-component bounding box",
                row.id,
                row.error_bb.len()
            ))
        })?;
        Ok(Markup {
            id: from_db_id(row.id)?,
            creator_id: from_db_id(row.creator_id)?,
            page_data: row.page_data,
            error_bb,
            class_label: from_db_id(row.class_label)?,
        })
    }
}

/// Insert DTO for the `markups` table; `id` is assigned by the database.
#[derive(Debug)]
pub struct CreateMarkup<'a> {
    pub page_data: &'a [u8],
    pub class_label: i64,
    pub creator_id: i64,
    pub error_bb: Vec<f32>,
}

impl<'a> CreateMarkup<'a> {
    pub fn from_domain(markup: &'a Markup) -> Result<Self, StoreError> {
        Ok(Self {
            page_data: &markup.page_data,
            class_label: to_db_id(markup.class_label)?,
            creator_id: to_db_id(markup.creator_id)?,
            error_bb: markup.error_bb.to_vec(),
        })
    }
}

/// A row from the `markup_types` table.
#[derive(Debug, Clone, FromRow)]
pub struct MarkupTypeRow {
    pub id: i64,
    pub description: String,
    pub creator_id: i64,
    pub class_name: String,
}

impl TryFrom<MarkupTypeRow> for MarkupType {
    type Error = StoreError;

    fn try_from(row: MarkupTypeRow) -> Result<Self, Self::Error> {
        Ok(MarkupType {
            id: from_db_id(row.id)?,
            description: row.description,
            creator_id: row.creator_id,
            class_name: row.class_name,
        })
    }
}
