pub mod document_meta_repo;
pub mod markup_repo;
pub mod markup_type_repo;

pub use document_meta_repo::DocumentMetaRepo;
pub use markup_repo::MarkupRepo;
pub use markup_type_repo::MarkupTypeRepo;
