//! sqltree - SQL statement planning over tree-shaped entity schemas
//!
//! This crate turns a declarative query into one parameterized SQL statement
//! per requested entity:
//! - Schema validation: entity references must form a tree
//! - Join path resolution between entities
//! - Filter tree validation and compilation to positional binds
//! - Statement assembly (CTE prologue, projection, correlated subquery filter)
//!
//! It never executes SQL; the output is SQL text plus ordered bind values.
//!
//! ```
//! use sqltree::graph_catalog::{EntityDef, Reference, Schema};
//! use sqltree::query_planner::filter::{ComparisonOp, FilterNode, Operand};
//! use sqltree::{Query, SqlBuilder};
//!
//! let schema = Schema::new()
//!     .with_entity("User", EntityDef::new(["name"], ["id"], "U"))
//!     .with_entity(
//!         "Post",
//!         EntityDef::new(["title"], ["id"], "P")
//!             .with_reference("User", Reference::new(["authorId"], ["id"])),
//!     );
//! let builder = SqlBuilder::new(schema).unwrap();
//!
//! let query = Query::new().select("Post", ["title"]).filter(FilterNode::compare(
//!     ComparisonOp::Eq,
//!     Operand::attr("User", "name"),
//!     "Alice",
//! ));
//! let statements = builder.build_sql(&query).unwrap();
//! assert!(statements["Post"].sql.ends_with("WHERE \"User\".\"name\" = :1)"));
//! ```

pub mod config;
pub mod graph_catalog;
pub mod query_cache;
pub mod query_planner;
pub mod render_plan;
pub mod sql_builder;
pub mod utils;

pub use config::BuilderConfig;
pub use graph_catalog::{Schema, SchemaError, SchemaTree};
pub use query_planner::errors::QueryError;
pub use query_planner::query::Query;
pub use render_plan::{CompiledStatement, InternalError, SqlBuildError};
pub use sql_builder::SqlBuilder;
