use std::sync::Arc;

use annotater_core::detection::Detector;
use annotater_core::file_store::FileStore;
use annotater_db::repositories::{DocumentMetaRepo, MarkupRepo, MarkupTypeRepo};
use annotater_pipeline::{AnnotationService, DocumentService, MarkupTypeService, PdfReportCreator};
use annotater_storage::{DocumentDataRepo, ReportDataRepo};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: annotater_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub documents: Arc<DocumentService>,
    pub annotations: Arc<AnnotationService>,
    pub markup_types: Arc<MarkupTypeService>,
}

impl AppState {
    /// Wire the services over the Postgres repositories, the given blob
    /// store and detector.
    pub fn new(
        pool: annotater_db::DbPool,
        config: ServerConfig,
        file_store: Arc<dyn FileStore>,
        detector: Arc<dyn Detector>,
    ) -> Self {
        let storage = &config.storage;
        let markup_types = Arc::new(MarkupTypeRepo::new(pool.clone()));

        let documents = DocumentService::new(
            Arc::new(DocumentDataRepo::new(
                Arc::clone(&file_store),
                storage.document_root.clone(),
                storage.document_ext.clone(),
            )),
            Arc::new(DocumentMetaRepo::new(pool.clone())),
            markup_types.clone(),
            Arc::new(ReportDataRepo::new(
                file_store,
                storage.report_root.clone(),
                storage.report_ext.clone(),
            )),
            detector,
            Arc::new(PdfReportCreator::new()),
            tracing::info_span!("document_service"),
        );
        let annotations = AnnotationService::new(
            Arc::new(MarkupRepo::new(pool.clone())),
            tracing::info_span!("annotation_service"),
        );
        let markup_type_service =
            MarkupTypeService::new(markup_types, tracing::info_span!("markup_type_service"));

        Self {
            pool,
            config: Arc::new(config),
            documents: Arc::new(documents),
            annotations: Arc::new(annotations),
            markup_types: Arc::new(markup_type_service),
        }
    }
}
