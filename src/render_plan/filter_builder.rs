use super::errors::InternalError;
use super::join_builder::build_join_items;
use super::KeyInSubquery;
use crate::graph_catalog::EntityDef;
use crate::graph_catalog::SchemaTree;
use crate::query_planner::filter::CompiledFilter;
use crate::query_planner::path_resolver::JoinSegment;

/// Correlate `entity` with the compiled filter through a key-membership
/// subquery that joins every entity the filter mentions.
pub fn build_key_in_subquery(
    tree: &SchemaTree,
    entity: &str,
    def: &EntityDef,
    segments: &[JoinSegment],
    filter: &CompiledFilter,
) -> Result<KeyInSubquery, InternalError> {
    Ok(KeyInSubquery {
        entity: entity.to_string(),
        key_columns: def.identifier.clone(),
        joins: build_join_items(tree, segments)?,
        predicate: filter.sql.clone(),
    })
}
