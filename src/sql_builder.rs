//! Entry point: a validated schema plus configuration, turning queries into
//! one parameterized statement per selected entity.

use indexmap::IndexMap;

use crate::config::BuilderConfig;
use crate::graph_catalog::{Schema, SchemaError, SchemaTree};
use crate::query_cache::{CacheMetrics, MemoizeOne};
use crate::query_planner::errors::QueryError;
use crate::query_planner::filter::{collect_referenced_entities, compile_filter, CompiledFilter, FilterNode};
use crate::query_planner::query::Query;
use crate::render_plan::plan_builder::FilterContext;
use crate::render_plan::{build_render_plan, CompiledStatement, SqlBuildError};

/// Placeholders are 1-based positions into the bind list.
const FIRST_BIND_INDEX: usize = 1;

/// Compiles queries against one immutable, validated schema.
///
/// `SqlBuilder` is `Sync`: one instance can serve concurrent callers.
pub struct SqlBuilder {
    tree: SchemaTree,
    config: BuilderConfig,
    filter_cache: Option<MemoizeOne<FilterNode, CompiledFilter>>,
}

impl SqlBuilder {
    /// Validate `schema` with the default configuration
    pub fn new(schema: Schema) -> Result<Self, SchemaError> {
        Self::with_config(schema, BuilderConfig::default())
    }

    pub fn with_config(schema: Schema, config: BuilderConfig) -> Result<Self, SchemaError> {
        let tree = SchemaTree::build(schema)?;
        let filter_cache = config.cache_enabled.then(MemoizeOne::new);
        Ok(SqlBuilder {
            tree,
            config,
            filter_cache,
        })
    }

    pub fn schema(&self) -> &Schema {
        self.tree.schema()
    }

    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Hit/miss counters of the filter cache, if enabled
    pub fn cache_metrics(&self) -> Option<CacheMetrics> {
        self.filter_cache.as_ref().map(MemoizeOne::metrics)
    }

    /// Build one statement per entity in `query.select`, in select order.
    ///
    /// The whole query is validated first; an invalid query yields an error
    /// and no statements at all.
    pub fn build_sql(
        &self,
        query: &Query,
    ) -> Result<IndexMap<String, CompiledStatement>, SqlBuildError> {
        if let Err(err) = query.validate(self.schema()) {
            log::warn!("Rejected query: {}", err);
            return Err(err.into());
        }

        let filter = query
            .filter
            .as_ref()
            .map(|root| self.prepare_filter(root))
            .transpose()?;

        let mut statements = IndexMap::with_capacity(query.select.len());
        for entity in query.select.keys() {
            let plan = build_render_plan(&self.tree, &self.config, entity, query, filter.as_ref())?;
            let statement = plan.into_statement();
            log::debug!("SQL for `{}`: {}", entity, statement.sql);
            statements.insert(entity.clone(), statement);
        }
        Ok(statements)
    }

    fn prepare_filter(&self, root: &FilterNode) -> Result<FilterContext, QueryError> {
        let compiled = match &self.filter_cache {
            Some(cache) => {
                cache.get_or_try_compute(root, |node| compile_filter(node, FIRST_BIND_INDEX))?
            }
            None => compile_filter(root, FIRST_BIND_INDEX)?,
        };
        Ok(FilterContext {
            compiled,
            referenced: collect_referenced_entities(root),
        })
    }
}
