//! Domain core for the annotater pipeline.
//!
//! Models, the error taxonomy, pure validation helpers and the port traits
//! that storage, detection and rendering adapters implement. Nothing in this
//! crate performs I/O.

pub mod config;
pub mod detection;
pub mod document;
pub mod error;
pub mod file_store;
pub mod markup;
pub mod report;
pub mod repository;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
