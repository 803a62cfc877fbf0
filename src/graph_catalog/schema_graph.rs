//! Undirected view of entity references.
//!
//! `SchemaTree::build` is the only place a schema's shape is checked. Every
//! component downstream relies on the invariant established here: the
//! reference edges form a tree, so between any two entities there is exactly
//! one simple path.

use indexmap::{IndexMap, IndexSet};

use super::entity_schema::{EntityDef, Reference, Schema};
use super::errors::SchemaError;

/// A schema whose references have been verified to form a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaTree {
    schema: Schema,
    adjacency: IndexMap<String, IndexSet<String>>,
}

impl SchemaTree {
    /// Validate `schema` and fold its references into an undirected adjacency map.
    pub fn build(schema: Schema) -> Result<Self, SchemaError> {
        check_entities(&schema)?;
        let adjacency = undirected_adjacency(&schema)?;
        check_connected_acyclic(&adjacency)?;

        log::info!(
            "Accepted schema tree with {} entities and {} reference edges",
            adjacency.len(),
            adjacency.values().map(IndexSet::len).sum::<usize>() / 2
        );

        Ok(SchemaTree { schema, adjacency })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.schema.entity(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Tree neighbours of `name` in declaration order; empty for unknown entities.
    pub fn neighbors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .map(|set| set.contains(b))
            .unwrap_or(false)
    }

    /// The reference joining two adjacent entities, oriented as
    /// `(referencing entity, referenced entity, reference)`.
    pub fn edge<'a>(&'a self, a: &'a str, b: &'a str) -> Option<(&'a str, &'a str, &'a Reference)> {
        if let Some(reference) = self.schema.entity(a).and_then(|def| def.reference_to(b)) {
            return Some((a, b, reference));
        }
        self.schema
            .entity(b)
            .and_then(|def| def.reference_to(a))
            .map(|reference| (b, a, reference))
    }
}

/// Per-entity checks: references resolve, are not self-edges, and pair their
/// local columns with the referenced entity's identifier.
fn check_entities(schema: &Schema) -> Result<(), SchemaError> {
    for (name, def) in schema.entities() {
        if def.identifier.is_empty() {
            return Err(SchemaError::EmptyIdentifier {
                entity: name.to_string(),
            });
        }

        for (referenced, reference) in &def.references {
            let Some(target) = schema.entity(referenced) else {
                log::warn!("Entity `{}` references undefined `{}`", name, referenced);
                return Err(SchemaError::DanglingReference {
                    entity: name.to_string(),
                    referenced: referenced.clone(),
                });
            };
            if referenced == name {
                return Err(SchemaError::Cyclic {
                    entity: name.to_string(),
                });
            }
            if reference.local.is_empty() {
                return Err(SchemaError::malformed_reference(
                    name,
                    referenced,
                    "no foreign-key columns declared",
                ));
            }
            if reference.local.len() != reference.foreign.len() {
                return Err(SchemaError::malformed_reference(
                    name,
                    referenced,
                    format!(
                        "{} local columns but {} foreign columns",
                        reference.local.len(),
                        reference.foreign.len()
                    ),
                ));
            }
            if reference.foreign != target.identifier {
                return Err(SchemaError::malformed_reference(
                    name,
                    referenced,
                    format!(
                        "foreign columns {:?} do not match the identifier {:?} of `{}`",
                        reference.foreign, target.identifier, referenced
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn undirected_adjacency(
    schema: &Schema,
) -> Result<IndexMap<String, IndexSet<String>>, SchemaError> {
    let mut adjacency: IndexMap<String, IndexSet<String>> = schema
        .entity_names()
        .map(|name| (name.to_string(), IndexSet::new()))
        .collect();

    for (name, def) in schema.entities() {
        for referenced in def.references.keys() {
            let declared_back = schema
                .entity(referenced)
                .map(|other| other.references.contains_key(name))
                .unwrap_or(false);
            if declared_back {
                log::warn!(
                    "Entities `{}` and `{}` reference each other",
                    name,
                    referenced
                );
                return Err(SchemaError::ConflictingReference {
                    entity: name.to_string(),
                    referenced: referenced.clone(),
                });
            }
            if let Some(set) = adjacency.get_mut(name) {
                set.insert(referenced.clone());
            }
            if let Some(set) = adjacency.get_mut(referenced.as_str()) {
                set.insert(name.to_string());
            }
        }
    }
    Ok(adjacency)
}

/// One depth-first walk from the first entity. In a tree every entity is pushed
/// exactly once, so popping an already-visited entity means a second path to it.
fn check_connected_acyclic(
    adjacency: &IndexMap<String, IndexSet<String>>,
) -> Result<(), SchemaError> {
    let Some(root) = adjacency.keys().next() else {
        return Ok(());
    };

    let mut visited: IndexSet<&str> = IndexSet::with_capacity(adjacency.len());
    let mut stack: Vec<(&str, Option<&str>)> = vec![(root.as_str(), None)];

    while let Some((node, came_from)) = stack.pop() {
        if !visited.insert(node) {
            log::warn!("Schema references form a cycle through `{}`", node);
            return Err(SchemaError::Cyclic {
                entity: node.to_string(),
            });
        }
        for next in adjacency.get(node).into_iter().flatten() {
            if Some(next.as_str()) == came_from {
                continue;
            }
            stack.push((next.as_str(), Some(node)));
        }
    }

    if visited.len() != adjacency.len() {
        let unreachable: Vec<String> = adjacency
            .keys()
            .filter(|name| !visited.contains(name.as_str()))
            .cloned()
            .collect();
        log::warn!("Schema is disconnected, unreachable: {:?}", unreachable);
        return Err(SchemaError::Disconnected {
            root: root.clone(),
            unreachable,
        });
    }
    Ok(())
}
