use thiserror::Error;

/// Call-time rejection of a query. The schema stays usable; the caller can
/// retry with a corrected query.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("Unknown entity `{entity}`")]
    UnknownEntity { entity: String },

    #[error("Unknown attribute `{attribute}` on entity `{entity}`")]
    UnknownAttribute { entity: String, attribute: String },

    #[error("Malformed filter at operator `{operator}`: {reason}")]
    MalformedFilter { operator: String, reason: String },
}

impl QueryError {
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        QueryError::UnknownEntity {
            entity: entity.into(),
        }
    }

    pub fn unknown_attribute(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        QueryError::UnknownAttribute {
            entity: entity.into(),
            attribute: attribute.into(),
        }
    }

    pub fn malformed_filter(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::MalformedFilter {
            operator: operator.into(),
            reason: reason.into(),
        }
    }
}
