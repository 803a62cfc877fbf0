//! Integration tests - exercise the public API end to end
//!
//! Schema in, query in, SQL text and binds out. No database is involved.

mod common;
mod property_tests;
mod scenario_tests;
