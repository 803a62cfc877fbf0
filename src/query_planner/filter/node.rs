use serde::{Deserialize, Serialize};

use super::operand::Operand;
use super::operator::{ComparisonOp, LogicalOp, MembershipOp, Operator, RangeOp};
use crate::query_planner::errors::QueryError;

/// Boolean filter tree.
///
/// Operands are stored per family, so comparison and range nodes cannot carry
/// the wrong operand count. Logical and membership nodes hold vectors whose
/// lengths are checked by `check_shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterSpec", into = "FilterSpec")]
pub enum FilterNode {
    Logical {
        op: LogicalOp,
        filters: Vec<FilterNode>,
    },
    Comparison {
        op: ComparisonOp,
        lhs: Operand,
        rhs: Operand,
    },
    Range {
        op: RangeOp,
        subject: Operand,
        low: Operand,
        high: Operand,
    },
    Membership {
        op: MembershipOp,
        subject: Operand,
        candidates: Vec<Operand>,
    },
}

impl FilterNode {
    pub fn and(filters: Vec<FilterNode>) -> Self {
        FilterNode::Logical {
            op: LogicalOp::And,
            filters,
        }
    }

    pub fn or(filters: Vec<FilterNode>) -> Self {
        FilterNode::Logical {
            op: LogicalOp::Or,
            filters,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: FilterNode) -> Self {
        FilterNode::Logical {
            op: LogicalOp::Not,
            filters: vec![filter],
        }
    }

    pub fn compare(op: ComparisonOp, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        FilterNode::Comparison {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn range(
        op: RangeOp,
        subject: impl Into<Operand>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        FilterNode::Range {
            op,
            subject: subject.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn membership(
        op: MembershipOp,
        subject: impl Into<Operand>,
        candidates: impl IntoIterator<Item = Operand>,
    ) -> Self {
        FilterNode::Membership {
            op,
            subject: subject.into(),
            candidates: candidates.into_iter().collect(),
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            FilterNode::Logical { op, .. } => Operator::Logical(*op),
            FilterNode::Comparison { op, .. } => Operator::Comparison(*op),
            FilterNode::Range { op, .. } => Operator::Range(*op),
            FilterNode::Membership { op, .. } => Operator::Membership(*op),
        }
    }

    /// Nested filters; empty for leaf nodes
    pub fn children(&self) -> &[FilterNode] {
        match self {
            FilterNode::Logical { filters, .. } => filters,
            _ => &[],
        }
    }

    /// Operands in evaluation order; empty for logical nodes
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            FilterNode::Logical { .. } => Vec::new(),
            FilterNode::Comparison { lhs, rhs, .. } => vec![lhs, rhs],
            FilterNode::Range {
                subject, low, high, ..
            } => vec![subject, low, high],
            FilterNode::Membership {
                subject,
                candidates,
                ..
            } => std::iter::once(subject).chain(candidates.iter()).collect(),
        }
    }

    /// Arity check for this node only (children are not visited).
    pub fn check_shape(&self) -> Result<(), QueryError> {
        let operator = self.operator();
        let count = match self {
            FilterNode::Logical { filters, .. } => filters.len(),
            _ => self.operands().len(),
        };
        check_arity(operator, count)
    }
}

fn check_arity(operator: Operator, count: usize) -> Result<(), QueryError> {
    let arity = operator.arity();
    if arity.admits(count) {
        return Ok(());
    }
    let unit = if operator.is_logical() {
        "nested filters"
    } else {
        "variables"
    };
    Err(QueryError::malformed_filter(
        operator.as_sql(),
        format!("expects {} {}, got {}", arity, unit, count),
    ))
}

/// Wire form of a filter node: `{"op": "...", "filters": [...]}` for logical
/// operators, `{"op": "...", "variables": [...]}` for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Operand>>,
}

impl TryFrom<FilterSpec> for FilterNode {
    type Error = QueryError;

    fn try_from(spec: FilterSpec) -> Result<Self, Self::Error> {
        let operator: Operator = spec.op.parse()?;
        let FilterSpec {
            op: token,
            filters,
            variables,
        } = spec;

        if let Operator::Logical(op) = operator {
            if variables.is_some() {
                return Err(QueryError::malformed_filter(
                    &token,
                    "logical operators take nested filters, not variables",
                ));
            }
            let children = filters.unwrap_or_default();
            check_arity(operator, children.len())?;
            let filters = children
                .into_iter()
                .map(FilterNode::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(FilterNode::Logical { op, filters });
        }

        if filters.is_some() {
            return Err(QueryError::malformed_filter(
                &token,
                "only logical operators take nested filters",
            ));
        }
        let variables = variables.unwrap_or_default();
        check_arity(operator, variables.len())?;
        leaf_from_operands(operator, &token, variables)
    }
}

/// Build a comparison, range or membership node from its arity-checked operands.
fn leaf_from_operands(
    operator: Operator,
    token: &str,
    variables: Vec<Operand>,
) -> Result<FilterNode, QueryError> {
    let mut operands = variables.into_iter();
    match operator {
        Operator::Logical(_) => Err(QueryError::malformed_filter(
            token,
            "logical operators take nested filters, not variables",
        )),
        Operator::Comparison(op) => Ok(FilterNode::Comparison {
            op,
            lhs: take_operand(&mut operands, token)?,
            rhs: take_operand(&mut operands, token)?,
        }),
        Operator::Range(op) => Ok(FilterNode::Range {
            op,
            subject: take_operand(&mut operands, token)?,
            low: take_operand(&mut operands, token)?,
            high: take_operand(&mut operands, token)?,
        }),
        Operator::Membership(op) => Ok(FilterNode::Membership {
            op,
            subject: take_operand(&mut operands, token)?,
            candidates: operands.collect(),
        }),
    }
}

fn take_operand(
    operands: &mut impl Iterator<Item = Operand>,
    op: &str,
) -> Result<Operand, QueryError> {
    operands
        .next()
        .ok_or_else(|| QueryError::malformed_filter(op, "missing variable"))
}

impl From<FilterNode> for FilterSpec {
    fn from(node: FilterNode) -> Self {
        let op = node.operator().as_sql().to_string();
        match node {
            FilterNode::Logical { filters, .. } => FilterSpec {
                op,
                filters: Some(filters.into_iter().map(FilterSpec::from).collect()),
                variables: None,
            },
            FilterNode::Comparison { lhs, rhs, .. } => FilterSpec {
                op,
                filters: None,
                variables: Some(vec![lhs, rhs]),
            },
            FilterNode::Range {
                subject, low, high, ..
            } => FilterSpec {
                op,
                filters: None,
                variables: Some(vec![subject, low, high]),
            },
            FilterNode::Membership {
                subject,
                candidates,
                ..
            } => FilterSpec {
                op,
                filters: None,
                variables: Some(std::iter::once(subject).chain(candidates).collect()),
            },
        }
    }
}
