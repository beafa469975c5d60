/// Wire shape of items, no database needed
pub mod item_wire_tests;

/// CRUD helpers against Postgres
pub mod item_crud_tests;
