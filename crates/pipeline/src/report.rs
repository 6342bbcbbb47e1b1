//! PDF rendering of error reports.
//!
//! Layout: one or more summary pages listing every markup, then one page
//! per markup that carries a page image, with the defect box stroked in red
//! over the image, then every page of the checked document itself.
//! Everything is built in memory with `lopdf`; nothing in the output depends
//! on the clock, so identical inputs give identical bytes.

use std::collections::HashMap;

use annotater_core::document::{DocumentData, ErrorReport};
use annotater_core::markup::{Markup, MarkupType};
use annotater_core::report::{RenderError, ReportCreator};
use image::ImageFormat;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use uuid::Uuid;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 14.0;
const SUMMARY_LINES_PER_PAGE: usize = 50;
/// Vertical room kept under a page image for its caption.
const CAPTION_BAND: f32 = 40.0;
/// Page attributes a page may take from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];
/// Deepest page tree walked when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 32;

/// [`ReportCreator`] producing a PDF report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportCreator;

impl PdfReportCreator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportCreator for PdfReportCreator {
    fn create_report(
        &self,
        document_id: Uuid,
        document: &DocumentData,
        markups: &[Markup],
        types: &[MarkupType],
    ) -> Result<ErrorReport, RenderError> {
        let types_by_id: HashMap<u64, &MarkupType> = types.iter().map(|t| (t.id, t)).collect();
        let entries = markups
            .iter()
            .map(|markup| {
                types_by_id
                    .get(&markup.type_id())
                    .map(|markup_type| (markup, *markup_type))
                    .ok_or_else(|| {
                        RenderError(format!(
                            "markup {} references unknown markup type {}",
                            markup.id,
                            markup.type_id()
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let source = Document::load_mem(&document.document_bytes).map_err(|e| {
            RenderError(format!("document {document_id} is not a readable PDF: {e}"))
        })?;

        let mut builder = ReportBuilder::new();
        builder.summary_pages(document_id, source.get_pages().len(), &entries)?;
        for (index, (markup, markup_type)) in entries.iter().enumerate() {
            if !markup.page_data.is_empty() {
                builder.markup_page(index + 1, markup, markup_type)?;
            }
        }
        builder.append_document(source)?;
        let report_data = builder.finish()?;

        Ok(ErrorReport {
            document_id,
            report_data,
        })
    }
}

/// Accumulates pages into a single-font PDF document.
struct ReportBuilder {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    kids: Vec<Object>,
}

impl ReportBuilder {
    fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        Self {
            doc,
            pages_id,
            font_id,
            kids: Vec::new(),
        }
    }

    fn summary_pages(
        &mut self,
        document_id: Uuid,
        source_pages: usize,
        entries: &[(&Markup, &MarkupType)],
    ) -> Result<(), RenderError> {
        let mut lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(index, (markup, markup_type))| {
                format!(
                    "#{} {} ({}) box {}",
                    index + 1,
                    markup_type.class_name,
                    markup_type.description,
                    format_box(markup)
                )
            })
            .collect();
        if lines.is_empty() {
            lines.push("No defects were found.".to_string());
        }

        for (page_index, chunk) in lines.chunks(SUMMARY_LINES_PER_PAGE).enumerate() {
            let mut ops = Vec::new();
            let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;
            if page_index == 0 {
                text(&mut ops, TITLE_SIZE, MARGIN, y, &format!("Error report for document {document_id}"));
                y -= LINE_HEIGHT * 1.5;
                text(&mut ops, BODY_SIZE, MARGIN, y, &format!("Document pages: {source_pages}"));
                y -= LINE_HEIGHT;
                text(&mut ops, BODY_SIZE, MARGIN, y, &format!("Markups found: {}", entries.len()));
                y -= LINE_HEIGHT * 2.0;
            }
            for line in chunk {
                text(&mut ops, BODY_SIZE, MARGIN, y, line);
                y -= LINE_HEIGHT;
            }
            self.push_page(ops, None)?;
        }
        Ok(())
    }

    fn markup_page(
        &mut self,
        number: usize,
        markup: &Markup,
        markup_type: &MarkupType,
    ) -> Result<(), RenderError> {
        let page = image::load_from_memory_with_format(&markup.page_data, ImageFormat::Png)
            .map_err(|e| RenderError(format!("markup {} has undecodable page data: {e}", markup.id)))?
            .to_rgb8();
        let (px_width, px_height) = page.dimensions();

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(px_width),
                "Height" => i64::from(px_height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            page.into_raw(),
        ));

        // Fit the image into the area above the caption band, keeping aspect.
        let avail_w = PAGE_WIDTH - 2.0 * MARGIN;
        let avail_h = PAGE_HEIGHT - 2.0 * MARGIN - CAPTION_BAND;
        let scale = (avail_w / px_width as f32).min(avail_h / px_height as f32);
        let (w, h) = (px_width as f32 * scale, px_height as f32 * scale);
        let x = MARGIN;
        let y = PAGE_HEIGHT - MARGIN - h;

        let mut ops = vec![
            Operation::new("q", vec![]),
            Operation::new("cm", vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), y.into()]),
            Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
            Operation::new("Q", vec![]),
        ];

        // Boxes are [x_min, x_max, y_min, y_max] with y growing downwards.
        let [x_min, x_max, y_min, y_max] = markup.error_bb;
        let (left, right) = (x_min.min(x_max), x_min.max(x_max));
        let (top, bottom) = (y_min.min(y_max), y_min.max(y_max));
        ops.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", vec![1.into(), 0.into(), 0.into()]),
            Operation::new("w", vec![2.into()]),
            Operation::new(
                "re",
                vec![
                    (x + left * w).into(),
                    (y + (1.0 - bottom) * h).into(),
                    ((right - left) * w).into(),
                    ((bottom - top) * h).into(),
                ],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);

        let caption = format!(
            "#{number} {}: {} box {}",
            markup_type.class_name,
            markup_type.description,
            format_box(markup)
        );
        text(&mut ops, BODY_SIZE, MARGIN, y - LINE_HEIGHT * 1.5, &caption);

        self.push_page(ops, Some(image_id))
    }

    fn push_page(&mut self, ops: Vec<Operation>, image: Option<ObjectId>) -> Result<(), RenderError> {
        let content = Content { operations: ops }
            .encode()
            .map_err(|e| RenderError(format!("encoding page content: {e}")))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => self.font_id },
        };
        if let Some(image_id) = image {
            resources.set("XObject", dictionary! { "Im1" => image_id });
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.kids.push(page_id.into());
        Ok(())
    }

    /// Move every page of `source` to the end of the report.
    ///
    /// Pages keep their own content and resources; attributes they inherited
    /// from the source page tree are copied onto the page itself.
    fn append_document(&mut self, mut source: Document) -> Result<(), RenderError> {
        source.renumber_objects_with(self.doc.max_id + 1);
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        for page_id in page_ids {
            let mut page = source
                .get_dictionary(page_id)
                .map_err(|e| RenderError(format!("reading document page {page_id:?}: {e}")))?
                .clone();
            let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
            for _ in 0..MAX_TREE_DEPTH {
                let Some(parent_id) = parent else { break };
                let Ok(node) = source.get_dictionary(parent_id) else { break };
                for key in INHERITABLE {
                    if !page.has(key) {
                        if let Ok(value) = node.get(key) {
                            page.set(key, value.clone());
                        }
                    }
                }
                parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            }
            page.set("Parent", self.pages_id);
            source.objects.insert(page_id, Object::Dictionary(page));
            self.kids.push(page_id.into());
        }

        // The report supplies its own catalog and page tree.
        source.objects.retain(|_, object| {
            !matches!(
                object.as_dict().and_then(|d| d.get(b"Type")).and_then(Object::as_name),
                Ok(b"Catalog" | b"Pages")
            )
        });
        self.doc.max_id = self.doc.max_id.max(source.max_id);
        self.doc.objects.extend(source.objects);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let count = i64::try_from(self.kids.len())
            .map_err(|_| RenderError("too many report pages".into()))?;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| RenderError(format!("writing report: {e}")))?;
        Ok(buf)
    }
}

fn text(ops: &mut Vec<Operation>, size: f32, x: f32, y: f32, line: &str) {
    ops.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(line)]),
        Operation::new("ET", vec![]),
    ]);
}

fn format_box(markup: &Markup) -> String {
    let [x_min, x_max, y_min, y_max] = markup.error_bb;
    format!("[{x_min:.3}, {x_max:.3}, {y_min:.3}, {y_max:.3}]")
}
