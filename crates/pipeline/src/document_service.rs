//! Document pipeline orchestration.

use std::collections::BTreeSet;
use std::sync::Arc;

use annotater_core::detection::Detector;
use annotater_core::document::{DocumentData, DocumentMetaData, ErrorReport};
use annotater_core::error::{CoreError, PipelineStage, StoreError};
use annotater_core::markup::{Markup, MarkupType};
use annotater_core::report::ReportCreator;
use annotater_core::repository::{
    DocumentDataRepository, DocumentMetaRepository, MarkupTypeRepository, ReportDataRepository,
};
use annotater_core::validation::check_pdf_file;
use tracing::Span;
use uuid::Uuid;

/// Runs uploaded documents through validation, storage, detection and
/// report rendering.
///
/// Steps run strictly in order on the calling task. Nothing is rolled back
/// when a later step fails; re-running with the same id overwrites the blobs
/// and upserts the metadata.
pub struct DocumentService {
    document_data: Arc<dyn DocumentDataRepository>,
    document_meta: Arc<dyn DocumentMetaRepository>,
    markup_types: Arc<dyn MarkupTypeRepository>,
    reports: Arc<dyn ReportDataRepository>,
    detector: Arc<dyn Detector>,
    report_creator: Arc<dyn ReportCreator>,
    span: Span,
}

impl DocumentService {
    pub fn new(
        document_data: Arc<dyn DocumentDataRepository>,
        document_meta: Arc<dyn DocumentMetaRepository>,
        markup_types: Arc<dyn MarkupTypeRepository>,
        reports: Arc<dyn ReportDataRepository>,
        detector: Arc<dyn Detector>,
        report_creator: Arc<dyn ReportCreator>,
        span: Span,
    ) -> Self {
        Self {
            document_data,
            document_meta,
            markup_types,
            reports,
            detector,
            report_creator,
            span,
        }
    }

    /// Validate, persist, analyse and report on one document.
    ///
    /// A buffer that is not a PDF fails with [`CoreError::DocumentFormat`]
    /// before any store is touched. Later failures come back as
    /// [`CoreError::Pipeline`] naming the failed stage.
    pub async fn load_document(
        &self,
        meta: DocumentMetaData,
        data: DocumentData,
    ) -> Result<ErrorReport, CoreError> {
        let id = meta.id;
        // Every store is keyed by the metadata id.
        let data = DocumentData { id, ..data };
        let page_count = match check_pdf_file(&data.document_bytes) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(
                    parent: &self.span,
                    document_id = %id,
                    document_name = %meta.document_name,
                    error = %e,
                    "Rejected non-PDF upload",
                );
                return Err(CoreError::DocumentFormat {
                    name: meta.document_name,
                });
            }
        };
        let meta = DocumentMetaData {
            page_count: i32::try_from(page_count).map_err(|_| {
                CoreError::Validation(format!("document {id} has too many pages"))
            })?,
            ..meta
        };

        self.document_data
            .add(&data)
            .await
            .map_err(|e| CoreError::storage("saving document data", e))
            .map_err(|e| e.in_stage(PipelineStage::StoreDocument, id))?;

        self.document_meta
            .add(&meta)
            .await
            .map_err(|e| CoreError::storage("saving document metadata", e))
            .map_err(|e| e.in_stage(PipelineStage::StoreMetadata, id))?;

        let markups = self
            .detector
            .predict(&data)
            .await
            .map_err(|e| CoreError::from(e).in_stage(PipelineStage::Detect, id))?;
        tracing::debug!(
            parent: &self.span,
            document_id = %id,
            markups = markups.len(),
            "Detection finished",
        );

        let (markups, types) = self
            .resolve_markup_types(id, markups)
            .await
            .map_err(|e| e.in_stage(PipelineStage::ResolveMarkupTypes, id))?;

        let report = self
            .report_creator
            .create_report(id, &data, &markups, &types)
            .map_err(|e| CoreError::from(e).in_stage(PipelineStage::RenderReport, id))?;

        self.reports
            .add(&report)
            .await
            .map_err(|e| CoreError::storage("saving report", e))
            .map_err(|e| e.in_stage(PipelineStage::StoreReport, id))?;

        tracing::info!(
            parent: &self.span,
            document_id = %id,
            page_count = meta.page_count,
            markups = markups.len(),
            "Document processed",
        );
        Ok(report)
    }

    /// Fetch the types of every detected markup and drop markups whose type
    /// is unknown.
    async fn resolve_markup_types(
        &self,
        document_id: Uuid,
        markups: Vec<Markup>,
    ) -> Result<(Vec<Markup>, Vec<MarkupType>), CoreError> {
        let wanted: Vec<u64> = markups
            .iter()
            .map(Markup::type_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if wanted.is_empty() {
            return Ok((markups, Vec::new()));
        }

        let types = self
            .markup_types
            .get_by_ids(&wanted)
            .await
            .map_err(|e| CoreError::storage("fetching markup types", e))?;

        let known: BTreeSet<u64> = types.iter().map(|t| t.id).collect();
        let missing: Vec<u64> = wanted.into_iter().filter(|id| !known.contains(id)).collect();
        if !missing.is_empty() {
            tracing::warn!(
                parent: &self.span,
                %document_id,
                missing_type_ids = ?missing,
                "Dropping markups with unknown markup types",
            );
        }

        let markups = markups
            .into_iter()
            .filter(|m| known.contains(&m.type_id()))
            .collect();
        Ok((markups, types))
    }

    pub async fn get_documents_by_creator_id(
        &self,
        creator_id: u64,
    ) -> Result<Vec<DocumentMetaData>, CoreError> {
        self.document_meta
            .get_by_creator_id(creator_id)
            .await
            .map_err(|e| CoreError::storage(format!("listing documents of creator {creator_id}"), e))
    }

    pub async fn get_document_by_id(&self, id: Uuid) -> Result<DocumentData, CoreError> {
        self.document_data
            .get_by_id(id)
            .await
            .map_err(|e| lookup_error("DocumentData", id, e))
    }

    pub async fn get_document_meta_by_id(&self, id: Uuid) -> Result<DocumentMetaData, CoreError> {
        self.document_meta
            .get_by_id(id)
            .await
            .map_err(|e| lookup_error("DocumentMetaData", id, e))
    }

    pub async fn get_report_by_id(&self, id: Uuid) -> Result<ErrorReport, CoreError> {
        self.reports
            .get_by_id(id)
            .await
            .map_err(|e| lookup_error("ErrorReport", id, e))
    }

    /// Remove metadata, stored bytes and report of a document.
    ///
    /// Unknown metadata fails with `NotFound` before anything is deleted. A
    /// missing report is tolerated since it may never have been rendered.
    pub async fn delete_document_by_id(&self, id: Uuid) -> Result<(), CoreError> {
        self.document_meta
            .delete_by_id(id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => CoreError::not_found("DocumentMetaData", id),
                other => CoreError::storage("deleting document metadata", other)
                    .in_stage(PipelineStage::DeleteMetadata, id),
            })?;

        self.document_data
            .delete_by_id(id)
            .await
            .map_err(|e| lookup_error("DocumentData", id, e).in_stage(PipelineStage::DeleteDocument, id))?;

        match self.reports.delete_by_id(id).await {
            Ok(()) => {}
            Err(StoreError::NotFound) => {
                tracing::debug!(parent: &self.span, document_id = %id, "No report to delete");
            }
            Err(e) => {
                return Err(CoreError::storage("deleting report", e)
                    .in_stage(PipelineStage::DeleteReport, id));
            }
        }

        tracing::info!(parent: &self.span, document_id = %id, "Document deleted");
        Ok(())
    }
}

fn lookup_error(entity: &'static str, id: Uuid, err: StoreError) -> CoreError {
    match err {
        StoreError::NotFound => CoreError::not_found(entity, id),
        other => CoreError::storage(format!("accessing {entity} {id}"), other),
    }
}
