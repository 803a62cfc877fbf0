//! Filter trees: the operator families, the node model and its wire form,
//! schema validation, referenced-entity discovery and SQL compilation.

pub mod compile;
pub mod node;
pub mod operand;
pub mod operator;
pub mod validate;

pub use compile::{compile_filter, CompiledFilter};
pub use node::{FilterNode, FilterSpec};
pub use operand::{AttributeRef, Literal, Operand};
pub use operator::{Arity, ComparisonOp, LogicalOp, MembershipOp, Operator, RangeOp};
pub use validate::{collect_referenced_entities, is_valid_filter, validate_filter};
