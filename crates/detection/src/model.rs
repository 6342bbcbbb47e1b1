use annotater_core::detection::{Detector, PredictionError};
use annotater_core::document::DocumentData;
use annotater_core::markup::Markup;
use annotater_core::types::BoundingBox;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::handler::{ModelHandler, RawPrediction};

/// [`Detector`] backed by an inference model.
///
/// Each raw prediction maps to exactly one markup whose `id` is its
/// `class_label`, so the markup's id names the markup type it belongs to.
pub struct DetectionModel<H> {
    handler: H,
}

impl<H: ModelHandler> DetectionModel<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    fn to_markup(raw: RawPrediction) -> Result<Markup, PredictionError> {
        let error_bb = BoundingBox::try_from(raw.error_bb.as_slice()).map_err(|_| {
            PredictionError::new(format!(
                "prediction for class {} has {} box components, expected 4",
                raw.class_label,
                raw.error_bb.len()
            ))
        })?;
        let page_data = match raw.page_data {
            Some(encoded) => STANDARD.decode(encoded).map_err(PredictionError::new)?,
            None => Vec::new(),
        };
        Ok(Markup {
            id: raw.class_label,
            creator_id: 0,
            page_data,
            error_bb,
            class_label: raw.class_label,
        })
    }
}

#[async_trait]
impl<H: ModelHandler> Detector for DetectionModel<H> {
    async fn predict(&self, document: &DocumentData) -> Result<Vec<Markup>, PredictionError> {
        let raw = self
            .handler
            .get_model_resp(document)
            .await
            .map_err(PredictionError::new)?;
        raw.into_iter().map(Self::to_markup).collect()
    }
}
