//! Client for the inference model's HTTP API.

use annotater_core::document::DocumentData;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ModelConfig;

/// One detection as reported by the model, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPrediction {
    pub error_bb: Vec<f32>,
    pub class_label: u64,
    /// Base64-encoded PNG of the page the defect was found on.
    #[serde(default)]
    pub page_data: Option<String>,
}

/// Body returned by `POST /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub markups: Vec<RawPrediction>,
}

/// Errors from the model transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model returned a non-2xx status code.
    #[error("Model API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelHandler: Send + Sync {
    /// Submit a document and return the model's raw predictions.
    async fn get_model_resp(&self, document: &DocumentData)
        -> Result<Vec<RawPrediction>, ModelError>;
}

/// HTTP client for a single model instance.
pub struct HttpModelHandler {
    client: reqwest::Client,
    model_url: String,
}

impl HttpModelHandler {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config.model_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, model_url: String) -> Self {
        Self { client, model_url }
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ModelError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ModelError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ModelHandler for HttpModelHandler {
    /// Sends `POST {model_url}/predict` with the raw document bytes.
    async fn get_model_resp(
        &self,
        document: &DocumentData,
    ) -> Result<Vec<RawPrediction>, ModelError> {
        let response = self
            .client
            .post(format!("{}/predict", self.model_url))
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(document.document_bytes.clone())
            .send()
            .await?;

        let parsed: PredictResponse = Self::parse_response(response).await?;
        tracing::debug!(
            document_id = %document.id,
            predictions = parsed.markups.len(),
            "Model responded",
        );
        Ok(parsed.markups)
    }
}
