//! Row structs and insert DTOs.
//!
//! Rows carry the database representation (`BIGINT` ids, `REAL[]` boxes);
//! `TryFrom` impls convert them into `annotater_core` domain values.

pub mod document;
pub mod markup;
