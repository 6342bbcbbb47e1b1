//! Detection adapter: turns an external inference model's output into
//! domain [`Markup`](annotater_core::markup::Markup)s.
//!
//! The model itself sits behind [`ModelHandler`]; [`HttpModelHandler`] talks
//! to it over HTTP. [`DetectionModel`] implements the core `Detector` port on
//! top of any handler and collapses every failure into `PredictionError`.

pub mod config;
pub mod handler;
pub mod model;

pub use config::ModelConfig;
pub use handler::{HttpModelHandler, ModelError, ModelHandler, RawPrediction};
pub use model::DetectionModel;
