//! Filter operators, grouped by family.
//!
//! Each family knows its own arity and SQL spelling. Logical operators count
//! nested filters, the other families count operands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query_planner::errors::QueryError;

/// How many children (logical) or operands (everything else) a node takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    /// Arity over nested filters
    pub fn arity(self) -> Arity {
        match self {
            LogicalOp::Not => Arity::Exactly(1),
            LogicalOp::And | LogicalOp::Or => Arity::AtLeast(2),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::Not => "NOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
    Like,
    NotLike,
    Is,
    IsNot,
}

impl ComparisonOp {
    pub fn arity(self) -> Arity {
        Arity::Exactly(2)
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Like => "LIKE",
            ComparisonOp::NotLike => "NOT LIKE",
            ComparisonOp::Is => "IS",
            ComparisonOp::IsNot => "IS NOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeOp {
    Between,
    NotBetween,
}

impl RangeOp {
    pub fn arity(self) -> Arity {
        Arity::Exactly(3)
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            RangeOp::Between => "BETWEEN",
            RangeOp::NotBetween => "NOT BETWEEN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipOp {
    In,
    NotIn,
}

impl MembershipOp {
    /// The tested operand plus at least one candidate
    pub fn arity(self) -> Arity {
        Arity::AtLeast(2)
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            MembershipOp::In => "IN",
            MembershipOp::NotIn => "NOT IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Logical(LogicalOp),
    Comparison(ComparisonOp),
    Range(RangeOp),
    Membership(MembershipOp),
}

impl Operator {
    pub fn arity(self) -> Arity {
        match self {
            Operator::Logical(op) => op.arity(),
            Operator::Comparison(op) => op.arity(),
            Operator::Range(op) => op.arity(),
            Operator::Membership(op) => op.arity(),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Logical(op) => op.as_sql(),
            Operator::Comparison(op) => op.as_sql(),
            Operator::Range(op) => op.as_sql(),
            Operator::Membership(op) => op.as_sql(),
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, Operator::Logical(_))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    /// Case-insensitive; runs of whitespace between keywords collapse to one space.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        let op = match normalized.as_str() {
            "AND" => Operator::Logical(LogicalOp::And),
            "OR" => Operator::Logical(LogicalOp::Or),
            "NOT" => Operator::Logical(LogicalOp::Not),
            "=" => Operator::Comparison(ComparisonOp::Eq),
            "<" => Operator::Comparison(ComparisonOp::Lt),
            ">" => Operator::Comparison(ComparisonOp::Gt),
            "<=" => Operator::Comparison(ComparisonOp::Le),
            ">=" => Operator::Comparison(ComparisonOp::Ge),
            "!=" => Operator::Comparison(ComparisonOp::Ne),
            "LIKE" => Operator::Comparison(ComparisonOp::Like),
            "NOT LIKE" => Operator::Comparison(ComparisonOp::NotLike),
            "IS" => Operator::Comparison(ComparisonOp::Is),
            "IS NOT" => Operator::Comparison(ComparisonOp::IsNot),
            "BETWEEN" => Operator::Range(RangeOp::Between),
            "NOT BETWEEN" => Operator::Range(RangeOp::NotBetween),
            "IN" => Operator::Membership(MembershipOp::In),
            "NOT IN" => Operator::Membership(MembershipOp::NotIn),
            _ => {
                return Err(QueryError::malformed_filter(token, "unknown operator"));
            }
        };
        Ok(op)
    }
}
