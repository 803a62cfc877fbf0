use super::CteItems;
use crate::graph_catalog::SchemaTree;
use crate::query_planner::errors::QueryError;

/// CTE bodies for every entity the statement touches, in join order.
pub fn build_cte_items(tree: &SchemaTree, entities: &[String]) -> Result<CteItems, QueryError> {
    entities
        .iter()
        .map(|name| {
            tree.entity(name)
                .map(|def| def.cte.clone())
                .ok_or_else(|| QueryError::unknown_entity(name))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CteItems)
}
