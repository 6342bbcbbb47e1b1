//! File-backed blob storage for document bytes and rendered reports.
//!
//! Blobs live at `<root>/<id><ext>`. The [`FileStore`] port decides where
//! bytes physically go: [`LocalFileStore`] uses the local filesystem,
//! [`MemoryFileStore`] keeps everything in a map for tests and ephemeral
//! deployments.
//!
//! [`FileStore`]: annotater_core::file_store::FileStore

mod blob;
pub mod config;
pub mod document_data;
pub mod local;
pub mod memory;
pub mod report_data;

pub use config::StorageConfig;
pub use document_data::DocumentDataRepo;
pub use local::LocalFileStore;
pub use memory::MemoryFileStore;
pub use report_data::ReportDataRepo;
