//! Services that drive documents and annotations through the core ports,
//! plus the PDF report renderer.

pub mod annotation_service;
pub mod document_service;
pub mod markup_type_service;
pub mod report;

pub use annotation_service::AnnotationService;
pub use document_service::DocumentService;
pub use markup_type_service::MarkupTypeService;
pub use report::PdfReportCreator;
