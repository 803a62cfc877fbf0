//! JOIN clauses for the filter subquery.
//!
//! Every hop of a resolved join segment is between tree-adjacent entities, so
//! each hop maps onto exactly one declared reference. A hop without one means
//! path resolution produced something other than a tree path.

use super::errors::InternalError;
use super::{Join, JoinCondition, JoinItems};
use crate::graph_catalog::SchemaTree;
use crate::query_planner::path_resolver::JoinSegment;

/// Equate the foreign-key columns with the referenced identifier columns,
/// pair by pair in declared order. `left` stays on the left of each `=`.
pub fn adjacent_join_conditions(
    tree: &SchemaTree,
    left: &str,
    right: &str,
) -> Result<Vec<JoinCondition>, InternalError> {
    let (referencing, _, reference) =
        tree.edge(left, right)
            .ok_or_else(|| InternalError::NotAdjacent {
                from: left.to_string(),
                to: right.to_string(),
            })?;

    let left_references_right = referencing == left;
    let conditions = reference
        .column_pairs()
        .map(|(local, foreign)| {
            let (left_column, right_column) = if left_references_right {
                (local, foreign)
            } else {
                (foreign, local)
            };
            JoinCondition {
                left_entity: left.to_string(),
                left_column: left_column.to_string(),
                right_entity: right.to_string(),
                right_column: right_column.to_string(),
            }
        })
        .collect();
    Ok(conditions)
}

/// One `JOIN` per hop, segment by segment.
pub fn build_join_items(
    tree: &SchemaTree,
    segments: &[JoinSegment],
) -> Result<JoinItems, InternalError> {
    let mut joins = Vec::new();
    for segment in segments {
        for (left, right) in segment.hops() {
            joins.push(Join {
                entity: right.to_string(),
                conditions: adjacent_join_conditions(tree, left, right)?,
            });
        }
    }
    Ok(JoinItems(joins))
}
