//! Join path resolution over a `SchemaTree`.
//!
//! In a tree the first depth-first hit on the target is the only simple path,
//! so no backtracking or shortest-path search is needed.

use indexmap::IndexSet;

use crate::graph_catalog::SchemaTree;
use crate::query_planner::errors::QueryError;
use crate::render_plan::errors::{InternalError, SqlBuildError};

/// Path from `from` to `to`, both endpoints included.
pub fn path_between(tree: &SchemaTree, from: &str, to: &str) -> Result<Vec<String>, SqlBuildError> {
    for endpoint in [from, to] {
        if !tree.contains(endpoint) {
            return Err(QueryError::unknown_entity(endpoint).into());
        }
    }

    // Each frame carries the path taken to reach it.
    let mut stack: Vec<Vec<&str>> = vec![vec![from]];
    let mut visited: IndexSet<&str> = IndexSet::new();

    while let Some(path) = stack.pop() {
        let Some(&node) = path.last() else {
            continue;
        };
        if node == to {
            return Ok(path.into_iter().map(str::to_string).collect());
        }
        if !visited.insert(node) {
            continue;
        }
        for next in tree.neighbors(node) {
            if visited.contains(next) {
                continue;
            }
            let mut extended = path.clone();
            extended.push(next);
            stack.push(extended);
        }
    }

    Err(InternalError::NoPath {
        from: from.to_string(),
        to: to.to_string(),
    }
    .into())
}

/// A run of entities to join, attached to an entity joined earlier.
///
/// `entities[0]` is tree-adjacent to `anchor`, and each following entity is
/// adjacent to the one before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSegment {
    pub anchor: String,
    pub entities: Vec<String>,
}

impl JoinSegment {
    /// Adjacent `(left, right)` pairs in join order, starting at the anchor
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once(self.anchor.as_str())
            .chain(self.entities.iter().map(String::as_str))
            .zip(self.entities.iter().map(String::as_str))
    }
}

/// Minimal join subtree rooted at `source` covering every target.
///
/// Targets are processed in the given order. Each target's path from `source`
/// has its already-joined prefix dropped; the last dropped entity becomes the
/// segment's anchor. Targets already covered contribute no segment.
pub fn resolve_join_order(
    tree: &SchemaTree,
    source: &str,
    targets: &[String],
) -> Result<Vec<JoinSegment>, SqlBuildError> {
    if !tree.contains(source) {
        return Err(QueryError::unknown_entity(source).into());
    }

    let mut joined: IndexSet<String> = IndexSet::new();
    joined.insert(source.to_string());
    let mut segments = Vec::new();

    for target in targets {
        let path = path_between(tree, source, target)?;
        let first_new = path
            .iter()
            .position(|entity| !joined.contains(entity))
            .unwrap_or(path.len());
        if first_new == path.len() {
            continue;
        }

        // path[0] is always `source`, which starts out joined
        let anchor = path[first_new - 1].clone();
        let entities: Vec<String> = path[first_new..].to_vec();
        joined.extend(entities.iter().cloned());

        log::debug!(
            "Join segment for `{}` from `{}`: {} -> {:?}",
            target,
            source,
            anchor,
            entities
        );
        segments.push(JoinSegment { anchor, entities });
    }

    Ok(segments)
}

/// `source` followed by every entity the segments join, in join order.
pub fn joined_entities(source: &str, segments: &[JoinSegment]) -> Vec<String> {
    std::iter::once(source.to_string())
        .chain(segments.iter().flat_map(|segment| segment.entities.iter().cloned()))
        .collect()
}
