//! Runs the document pipeline over the in-memory blob stores and the real
//! PDF renderer; only the relational side and the model are stubbed.

use std::sync::Arc;

use annotater_core::detection::{Detector, PredictionError};
use annotater_core::document::DocumentData;
use annotater_core::markup::Markup;
use annotater_core::repository::{MockDocumentMetaRepository, MockMarkupTypeRepository};
use annotater_core::test_support::{
    default_document_data, default_document_meta, markup_type_with_id, test_uuid, valid_markup,
};
use annotater_pipeline::{DocumentService, PdfReportCreator};
use annotater_storage::{DocumentDataRepo, MemoryFileStore, ReportDataRepo};
use async_trait::async_trait;
use tracing::Span;
use uuid::Uuid;

struct FixedDetector(Vec<Markup>);

#[async_trait]
impl Detector for FixedDetector {
    async fn predict(&self, _document: &DocumentData) -> Result<Vec<Markup>, PredictionError> {
        Ok(self.0.clone())
    }
}

fn service(store: Arc<MemoryFileStore>, detections: Vec<Markup>) -> DocumentService {
    let mut meta = MockDocumentMetaRepository::new();
    meta.expect_add().returning(|_| Ok(()));
    meta.expect_delete_by_id().returning(|_| Ok(()));
    let mut types = MockMarkupTypeRepository::new();
    types
        .expect_get_by_ids()
        .returning(|_| Ok(vec![markup_type_with_id(1)]));

    DocumentService::new(
        Arc::new(DocumentDataRepo::new(store.clone(), "/data/documents", ".pdf")),
        Arc::new(meta),
        Arc::new(types),
        Arc::new(ReportDataRepo::new(store, "/data/reports", ".pdf")),
        Arc::new(FixedDetector(detections)),
        Arc::new(PdfReportCreator::new()),
        Span::none(),
    )
}

#[tokio::test]
async fn test_report_is_rendered_and_stored() {
    let store = Arc::new(MemoryFileStore::new());
    let service = service(store.clone(), vec![valid_markup()]);

    let report = service
        .load_document(default_document_meta(), default_document_data())
        .await
        .unwrap();

    let pages = lopdf::Document::load_mem(&report.report_data)
        .unwrap()
        .get_pages()
        .len();
    assert_eq!(pages, 3);
    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(service.get_report_by_id(test_uuid()).await.unwrap(), report);
    assert_eq!(
        service.get_document_by_id(test_uuid()).await.unwrap(),
        default_document_data()
    );
}

#[tokio::test]
async fn test_rerun_overwrites_blobs() {
    let store = Arc::new(MemoryFileStore::new());
    let service = service(store.clone(), vec![]);

    let first = service
        .load_document(default_document_meta(), default_document_data())
        .await
        .unwrap();
    let second = service
        .load_document(default_document_meta(), default_document_data())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len().unwrap(), 2);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let store = Arc::new(MemoryFileStore::new());
    let service = service(store.clone(), vec![]);
    service
        .load_document(default_document_meta(), default_document_data())
        .await
        .unwrap();

    service.delete_document_by_id(test_uuid()).await.unwrap();

    assert!(store.is_empty().unwrap());
    assert!(service
        .get_document_by_id(test_uuid())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_document_is_stored_under_metadata_id() {
    let store = Arc::new(MemoryFileStore::new());
    let service = service(store.clone(), vec![]);
    let mut data = default_document_data();
    data.id = Uuid::from_u128(7);

    service
        .load_document(default_document_meta(), data.clone())
        .await
        .unwrap();

    let stored = service.get_document_by_id(test_uuid()).await.unwrap();
    assert_eq!(stored.document_bytes, data.document_bytes);
    assert!(service
        .get_document_by_id(Uuid::from_u128(7))
        .await
        .unwrap_err()
        .is_not_found());
}
