use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::errors::QueryError;
use super::filter::{validate_filter, FilterNode};
use crate::graph_catalog::Schema;

/// Attributes requested for one entity, in request order.
///
/// On the wire either a list of names or an `attribute -> bool` object where
/// only `true` entries are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionSpec", into = "Vec<String>")]
pub struct AttributeSelection(IndexSet<String>);

impl AttributeSelection {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSelection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        AttributeSelection(iter.into_iter().map(Into::into).collect())
    }
}

impl From<AttributeSelection> for Vec<String> {
    fn from(selection: AttributeSelection) -> Self {
        selection.0.into_iter().collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectionSpec {
    Names(Vec<String>),
    Flags(IndexMap<String, bool>),
}

impl From<SelectionSpec> for AttributeSelection {
    fn from(spec: SelectionSpec) -> Self {
        match spec {
            SelectionSpec::Names(names) => names.into_iter().collect(),
            SelectionSpec::Flags(flags) => flags
                .into_iter()
                .filter_map(|(name, selected)| selected.then_some(name))
                .collect(),
        }
    }
}

/// Entity projections plus an optional filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub select: IndexMap<String, AttributeSelection>,
    #[serde(default)]
    pub filter: Option<FilterNode>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, entity: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select
            .insert(entity.into(), attributes.into_iter().collect());
        self
    }

    pub fn filter(mut self, filter: FilterNode) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn is_selected(&self, entity: &str) -> bool {
        self.select.contains_key(entity)
    }

    /// Check selected entities and attributes, then the filter, against `schema`.
    pub fn validate(&self, schema: &Schema) -> Result<(), QueryError> {
        for (entity, attributes) in &self.select {
            let def = schema
                .entity(entity)
                .ok_or_else(|| QueryError::unknown_entity(entity))?;
            if let Some(missing) = attributes.iter().find(|attr| !def.has_attribute(attr)) {
                return Err(QueryError::unknown_attribute(entity, missing));
            }
        }
        if let Some(filter) = &self.filter {
            validate_filter(schema, filter)?;
        }
        Ok(())
    }
}
