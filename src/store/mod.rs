//! Persistence layer for Linkshelf.
//!
//! The whole store is one JSON document rewritten in full on every mutation.
//! See [`document_file::DocumentFile`].

pub mod document_file;

pub use document_file::DocumentFile;
