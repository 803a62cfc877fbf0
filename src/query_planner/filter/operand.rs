use serde::{Deserialize, Serialize};

/// A literal value. Literals never appear in SQL text; they become binds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

/// Floats compare by bit pattern: `0.0` and `-0.0` bind different values, and
/// `NaN` equals itself.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Integer(a), Literal::Integer(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::Null, Literal::Null) => true,
            _ => false,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

/// `{entity, attribute}` column reference inside a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeRef {
    pub entity: String,
    pub attribute: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Attribute(AttributeRef),
    Literal(Literal),
}

impl Operand {
    pub fn attr(entity: impl Into<String>, attribute: impl Into<String>) -> Self {
        Operand::Attribute(AttributeRef {
            entity: entity.into(),
            attribute: attribute.into(),
        })
    }

    pub fn null() -> Self {
        Operand::Literal(Literal::Null)
    }

    pub fn as_attribute(&self) -> Option<&AttributeRef> {
        match self {
            Operand::Attribute(attr) => Some(attr),
            Operand::Literal(_) => None,
        }
    }
}

impl From<Literal> for Operand {
    fn from(value: Literal) -> Self {
        Operand::Literal(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Literal(value.into())
    }
}
