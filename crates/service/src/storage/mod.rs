//! Storage abstractions for service layer
//!
//! File-backed stores that need no external database.

pub mod json_document_store;
