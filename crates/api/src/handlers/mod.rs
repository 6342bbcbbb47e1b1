pub mod annotation_types;
pub mod annotations;
pub mod documents;
