use thiserror::Error;

use crate::query_planner::errors::QueryError;

/// Broken invariants of a validated schema tree. These point at a bug in path
/// resolution, never at bad user input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InternalError {
    #[error("Entities `{from}` and `{to}` are not adjacent in the schema tree. This is an internal join planning error.")]
    NotAdjacent { from: String, to: String },

    #[error("No path from `{from}` to `{to}` in a connected schema tree. This is an internal join planning error.")]
    NoPath { from: String, to: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SqlBuildError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}
