//! Shared building blocks for the items service crates: wire types used by
//! every HTTP surface and the tracing subscriber setup.

pub mod types;
pub mod utils;
