use serde::Serialize;

use super::node::FilterNode;
use super::operand::{Literal, Operand};
use super::operator::LogicalOp;
use crate::query_planner::errors::QueryError;
use crate::utils::sql_naming::qualified_column;

/// A filter rendered as one SQL boolean expression plus its binds.
///
/// Placeholder `:n` refers to `binds[n - first_bind_index]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledFilter {
    pub sql: String,
    pub binds: Vec<Literal>,
}

/// Compile `root` bottom-up. Literal operands become `:n` placeholders numbered
/// from `first_bind_index` in left-to-right evaluation order across the whole
/// tree; attribute operands become quoted `"Entity"."attribute"` columns.
///
/// The input is only read. Each node's arity is re-checked while compiling, so
/// a malformed tree is rejected even if it was never validated. The walk uses
/// an explicit stack, so nesting depth is bounded by memory only.
pub fn compile_filter(
    root: &FilterNode,
    first_bind_index: usize,
) -> Result<CompiledFilter, QueryError> {
    root.check_shape()?;

    let mut binder = Binder::new(first_bind_index);
    let mut stack = vec![Frame::new(root)];

    while let Some(frame) = stack.last_mut() {
        let node: &FilterNode = frame.node;
        if let Some(child) = node.children().get(frame.next_child) {
            frame.next_child += 1;
            child.check_shape()?;
            stack.push(Frame::new(child));
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        let sql = match done.node {
            FilterNode::Logical { op, .. } => render_logical(*op, &done.parts),
            leaf => binder.render_leaf(leaf),
        };
        match stack.last_mut() {
            Some(parent) => parent.parts.push(format!("({})", sql)),
            None => {
                return Ok(CompiledFilter {
                    sql,
                    binds: binder.binds,
                })
            }
        }
    }

    Ok(CompiledFilter {
        sql: String::new(),
        binds: binder.binds,
    })
}

/// A node whose children are being compiled, with their finished SQL so far.
struct Frame<'a> {
    node: &'a FilterNode,
    next_child: usize,
    parts: Vec<String>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a FilterNode) -> Self {
        Frame {
            node,
            next_child: 0,
            parts: Vec::with_capacity(node.children().len()),
        }
    }
}

fn render_logical(op: LogicalOp, parts: &[String]) -> String {
    match op {
        LogicalOp::Not => format!("NOT {}", parts.join(" ")),
        LogicalOp::And | LogicalOp::Or => parts.join(&format!(" {} ", op.as_sql())),
    }
}

/// Hands out placeholders in visiting order across the whole tree.
struct Binder {
    next_index: usize,
    binds: Vec<Literal>,
}

impl Binder {
    fn new(first_index: usize) -> Self {
        Binder {
            next_index: first_index,
            binds: Vec::new(),
        }
    }

    fn render(&mut self, operand: &Operand) -> String {
        match operand {
            Operand::Attribute(attr) => qualified_column(&attr.entity, &attr.attribute),
            Operand::Literal(literal) => {
                let placeholder = format!(":{}", self.next_index);
                self.next_index += 1;
                self.binds.push(literal.clone());
                placeholder
            }
        }
    }

    /// Comparison, range and membership nodes; logical nodes render nothing here.
    fn render_leaf(&mut self, node: &FilterNode) -> String {
        match node {
            FilterNode::Logical { .. } => String::new(),
            FilterNode::Comparison { op, lhs, rhs } => {
                let lhs = self.render(lhs);
                let rhs = self.render(rhs);
                format!("{} {} {}", lhs, op.as_sql(), rhs)
            }
            FilterNode::Range {
                op,
                subject,
                low,
                high,
            } => {
                let subject = self.render(subject);
                let low = self.render(low);
                let high = self.render(high);
                format!("{} {} {} AND {}", subject, op.as_sql(), low, high)
            }
            FilterNode::Membership {
                op,
                subject,
                candidates,
            } => {
                let subject = self.render(subject);
                let candidates: Vec<String> = candidates.iter().map(|c| self.render(c)).collect();
                format!("{} {} ({})", subject, op.as_sql(), candidates.join(", "))
            }
        }
    }
}
