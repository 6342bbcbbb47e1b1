//! Fixtures shared by the workspace test suites.
//!
//! Compiled for this crate's own tests and for downstream crates that
//! enable the `test-support` feature.

use std::io::Cursor;

use chrono::TimeZone;
use image::{ImageFormat, Rgba, RgbaImage};
use lopdf::{dictionary, Document, Object};
use uuid::Uuid;

use crate::document::{DocumentData, DocumentMetaData, ErrorReport};
use crate::markup::{Markup, MarkupType};
use crate::types::{BoundingBox, Timestamp};

pub const TEST_BASIC_ID: u64 = 20;
pub const TEST_DEFAULT_DOCUMENT_NAME: &str = "default_doc";
pub const TEST_DEFAULT_PAGE_COUNT: i32 = 12;
pub const VALID_BBS: BoundingBox = [1.0, 1.0, 0.0, 1.0];
pub const INVALID_BBS: BoundingBox = [-1.0, 1.0, 0.0, 1.0];

pub fn test_uuid() -> Uuid {
    Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440000)
}

pub fn test_creation_time() -> Timestamp {
    chrono::Utc
        .with_ymd_and_hms(2023, 10, 1, 15, 0, 0)
        .single()
        .expect("fixed timestamp is unambiguous")
}

/// A PNG of the given size filled with opaque white.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    buf.into_inner()
}

/// A structurally valid PDF with `pages` empty A4 pages.
pub fn pdf_bytes(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ],
            };
            Object::Reference(doc.add_object(page))
        })
        .collect();
    let count = i64::try_from(kids.len()).expect("page count fits i64");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("writing a PDF to memory cannot fail");
    buf
}

pub fn default_document_meta() -> DocumentMetaData {
    DocumentMetaData {
        id: test_uuid(),
        creator_id: TEST_BASIC_ID,
        document_name: TEST_DEFAULT_DOCUMENT_NAME.to_string(),
        page_count: TEST_DEFAULT_PAGE_COUNT,
        checks_count: 0,
        creation_time: test_creation_time(),
    }
}

pub fn document_meta_with_name(name: &str) -> DocumentMetaData {
    DocumentMetaData {
        document_name: name.to_string(),
        ..default_document_meta()
    }
}

pub fn default_document_data() -> DocumentData {
    DocumentData {
        id: test_uuid(),
        document_bytes: pdf_bytes(1),
    }
}

pub fn invalid_document_data() -> DocumentData {
    DocumentData {
        id: test_uuid(),
        document_bytes: vec![1],
    }
}

pub fn default_error_report() -> ErrorReport {
    ErrorReport {
        document_id: test_uuid(),
        report_data: pdf_bytes(1),
    }
}

pub fn markup_type_with_id(id: u64) -> MarkupType {
    MarkupType {
        id,
        description: "default description".to_string(),
        creator_id: TEST_BASIC_ID as i64,
        class_name: "default".to_string(),
    }
}

/// Builder for [`Markup`] values; starts from an all-zero markup.
#[derive(Debug, Clone)]
pub struct MarkupBuilder {
    markup: Markup,
}

impl Default for MarkupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self {
            markup: Markup {
                id: 0,
                creator_id: 0,
                page_data: Vec::new(),
                error_bb: [0.0; 4],
                class_label: 0,
            },
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.markup.id = id;
        self
    }

    pub fn with_creator_id(mut self, creator_id: u64) -> Self {
        self.markup.creator_id = creator_id;
        self
    }

    pub fn with_error_bb(mut self, error_bb: BoundingBox) -> Self {
        self.markup.error_bb = error_bb;
        self
    }

    pub fn with_page_data(mut self, page_data: Vec<u8>) -> Self {
        self.markup.page_data = page_data;
        self
    }

    pub fn with_class_label(mut self, class_label: u64) -> Self {
        self.markup.class_label = class_label;
        self
    }

    pub fn build(self) -> Markup {
        self.markup
    }
}

/// A markup that passes every validation check.
pub fn valid_markup() -> Markup {
    MarkupBuilder::new()
        .with_creator_id(TEST_BASIC_ID)
        .with_error_bb(VALID_BBS)
        .with_class_label(1)
        .with_page_data(png_bytes(100, 100))
        .build()
}
