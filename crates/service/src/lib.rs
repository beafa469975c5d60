//! Service layer for the item resource.
//! - `item`: record store contract, its Postgres and JSON-file backends, and the service façade.
//! - `storage`: reusable file-backed document collection.

pub mod errors;
pub mod item;
pub mod storage;
#[cfg(test)]
pub mod test_support;
