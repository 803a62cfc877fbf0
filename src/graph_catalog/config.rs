/// Schema document loading.
///
/// A schema can be written as YAML or JSON with one top-level key per entity:
///
/// ```yaml
/// User:
///   attributes: [name]
///   identifier: [id]
///   cte: '"User" AS (SELECT id AS "__ID__", name FROM users)'
/// Post:
///   attributes: [title]
///   identifier: [id]
///   references:
///     User: { local: [authorId], foreign: [id] }
///   cte: '"Post" AS (SELECT id AS "__ID__", title, authorId FROM posts)'
/// ```
///
/// Loading only parses the document. Shape validation happens when the
/// schema is handed to `SchemaTree::build`.
use std::fs;
use std::path::Path;

use super::entity_schema::Schema;
use super::errors::SchemaError;

impl Schema {
    /// Load a schema from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| SchemaError::ConfigRead {
            error: format!("{}: {}", path.display(), e),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Parse a schema from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(yaml).map_err(|e| SchemaError::ConfigParse {
            error: e.to_string(),
        })
    }

    /// Parse a schema from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::ConfigParse {
            error: e.to_string(),
        })
    }
}
