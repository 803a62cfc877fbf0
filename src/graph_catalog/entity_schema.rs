use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Foreign-key columns on the referencing entity and the identifier columns
/// they point at on the referenced entity, paired by position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    /// Columns on the referencing entity (e.g. `["authorId"]`)
    pub local: Vec<String>,
    /// Identifier columns on the referenced entity (e.g. `["id"]`)
    pub foreign: Vec<String>,
}

impl Reference {
    pub fn new<L, F>(local: L, foreign: F) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Reference {
            local: local.into_iter().map(Into::into).collect(),
            foreign: foreign.into_iter().map(Into::into).collect(),
        }
    }

    /// `(local, foreign)` column pairs in declared order
    pub fn column_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.local
            .iter()
            .map(String::as_str)
            .zip(self.foreign.iter().map(String::as_str))
    }
}

/// Definition of one entity, keyed by name in `Schema`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityDef {
    /// Attributes a query may select or filter on
    #[serde(default)]
    pub attributes: IndexSet<String>,
    /// Ordered key columns; order matters for composite-key joins
    pub identifier: Vec<String>,
    /// Referenced entity name -> foreign-key columns
    #[serde(default)]
    pub references: IndexMap<String, Reference>,
    /// Pre-rendered CTE body, emitted verbatim in the `WITH` prologue
    pub cte: String,
}

impl EntityDef {
    pub fn new<A, I>(attributes: A, identifier: I, cte: impl Into<String>) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        EntityDef {
            attributes: attributes.into_iter().map(Into::into).collect(),
            identifier: identifier.into_iter().map(Into::into).collect(),
            references: IndexMap::new(),
            cte: cte.into(),
        }
    }

    /// Builder-style helper to declare a reference to `entity`
    pub fn with_reference(mut self, entity: impl Into<String>, reference: Reference) -> Self {
        self.references.insert(entity.into(), reference);
        self
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    pub fn reference_to(&self, entity: &str) -> Option<&Reference> {
        self.references.get(entity)
    }
}

/// Entity name -> definition, in declaration order.
///
/// A `Schema` on its own is only a description. It becomes usable for query
/// compilation once `SchemaTree::build` has accepted it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Schema {
    entities: IndexMap<String, EntityDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, name: impl Into<String>, entity: EntityDef) -> Self {
        self.insert(name, entity);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, entity: EntityDef) -> Option<EntityDef> {
        self.entities.insert(name.into(), entity)
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = (&str, &EntityDef)> {
        self.entities.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<(String, EntityDef)> for Schema {
    fn from_iter<T: IntoIterator<Item = (String, EntityDef)>>(iter: T) -> Self {
        Schema {
            entities: iter.into_iter().collect(),
        }
    }
}
