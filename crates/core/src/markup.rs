//! Markups (defect regions) and the markup-type catalog they reference.

use serde::{Deserialize, Serialize};

use crate::types::BoundingBox;

/// One detected or manually created defect region on a document page.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    pub id: u64,
    pub creator_id: u64,
    /// PNG-encoded page the region was found on.
    pub page_data: Vec<u8>,
    pub error_bb: BoundingBox,
    pub class_label: u64,
}

impl Markup {
    /// Id of the [`MarkupType`] this markup is classified as.
    pub fn type_id(&self) -> u64 {
        self.class_label
    }
}

/// A classification catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupType {
    pub id: u64,
    pub description: String,
    pub creator_id: i64,
    pub class_name: String,
}
