use indexmap::IndexSet;

use super::node::FilterNode;
use super::operand::Operand;
use crate::graph_catalog::Schema;
use crate::query_planner::errors::QueryError;

/// Check every node's arity and every attribute operand against `schema`.
/// The first violation found rejects the whole filter.
pub fn validate_filter(schema: &Schema, root: &FilterNode) -> Result<(), QueryError> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        node.check_shape()?;
        for operand in node.operands() {
            validate_operand(schema, operand)?;
        }
        stack.extend(node.children().iter().rev());
    }
    Ok(())
}

/// `validate_filter` reduced to a yes/no answer.
pub fn is_valid_filter(schema: &Schema, root: &FilterNode) -> bool {
    validate_filter(schema, root).is_ok()
}

fn validate_operand(schema: &Schema, operand: &Operand) -> Result<(), QueryError> {
    let Some(attr) = operand.as_attribute() else {
        return Ok(());
    };
    let entity = schema
        .entity(&attr.entity)
        .ok_or_else(|| QueryError::unknown_entity(&attr.entity))?;
    if !entity.has_attribute(&attr.attribute) {
        return Err(QueryError::unknown_attribute(&attr.entity, &attr.attribute));
    }
    Ok(())
}

/// Distinct entities named by attribute operands, in first-encounter order
/// of a left-to-right pre-order walk.
pub fn collect_referenced_entities(root: &FilterNode) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for attr in node.operands().into_iter().filter_map(Operand::as_attribute) {
            seen.insert(attr.entity.as_str());
        }
        stack.extend(node.children().iter().rev());
    }
    seen.into_iter().map(str::to_string).collect()
}
