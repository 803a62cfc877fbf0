pub mod config;
pub mod entity_schema;
pub mod errors;
pub mod schema_graph;

// Re-export commonly used types
pub use entity_schema::{EntityDef, Reference, Schema};
pub use errors::SchemaError;
pub use schema_graph::SchemaTree;
