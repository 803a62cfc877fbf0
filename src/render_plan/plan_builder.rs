use super::cte_builder::build_cte_items;
use super::errors::SqlBuildError;
use super::filter_builder::build_key_in_subquery;
use super::select_builder::build_select_items;
use super::{FromTableItem, RenderPlan};
use crate::config::BuilderConfig;
use crate::graph_catalog::SchemaTree;
use crate::query_planner::errors::QueryError;
use crate::query_planner::filter::CompiledFilter;
use crate::query_planner::path_resolver::{joined_entities, resolve_join_order};
use crate::query_planner::query::Query;

/// The query's filter, compiled once and shared by every selected entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterContext {
    pub compiled: CompiledFilter,
    /// Entities named by the filter, first-encounter order
    pub referenced: Vec<String>,
}

/// Plan the statement for one selected entity. Without a filter the plan has
/// a single CTE, no joins and no WHERE clause.
pub fn build_render_plan(
    tree: &SchemaTree,
    config: &BuilderConfig,
    entity: &str,
    query: &Query,
    filter: Option<&FilterContext>,
) -> Result<RenderPlan, SqlBuildError> {
    let def = tree
        .entity(entity)
        .ok_or_else(|| QueryError::unknown_entity(entity))?;
    let attributes = query
        .select
        .get(entity)
        .ok_or_else(|| QueryError::unknown_entity(entity))?;

    let referenced = filter.map(|f| f.referenced.as_slice()).unwrap_or(&[]);
    let segments = resolve_join_order(tree, entity, referenced)?;
    let ctes = build_cte_items(tree, &joined_entities(entity, &segments))?;
    let select = build_select_items(config, entity, def, attributes, query);

    let (filter, binds) = match filter {
        Some(ctx) => (
            Some(build_key_in_subquery(tree, entity, def, &segments, &ctx.compiled)?),
            ctx.compiled.binds.clone(),
        ),
        None => (None, Vec::new()),
    };

    log::debug!(
        "Planned `{}`: {} CTEs, {} join segments, {} binds",
        entity,
        ctes.0.len(),
        segments.len(),
        binds.len()
    );

    Ok(RenderPlan {
        ctes,
        select,
        from: FromTableItem(entity.to_string()),
        filter,
        binds,
    })
}
