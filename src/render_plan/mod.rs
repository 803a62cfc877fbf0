//! Statement assembly.
//!
//! A `RenderPlan` holds the clauses of one per-entity statement as typed items;
//! `ToSql` turns each item into text and the plan concatenates the fragments
//! with single spaces.

pub mod cte_builder;
pub mod errors;
pub mod filter_builder;
pub mod join_builder;
pub mod plan_builder;
pub mod select_builder;

use serde::Serialize;

use crate::query_planner::filter::Literal;
use crate::utils::sql_naming::{key_expression, qualified_column, qualified_column_list, quote_identifier};

pub use errors::{InternalError, SqlBuildError};
pub use plan_builder::build_render_plan;

pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// Final output for one selected entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledStatement {
    pub sql: String,
    pub binds: Vec<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub ctes: CteItems,
    pub select: SelectItems,
    pub from: FromTableItem,
    pub filter: Option<KeyInSubquery>,
    pub binds: Vec<Literal>,
}

impl ToSql for RenderPlan {
    fn to_sql(&self) -> String {
        let mut fragments = vec![self.ctes.to_sql(), self.select.to_sql(), self.from.to_sql()];
        if let Some(filter) = &self.filter {
            fragments.push(filter.to_sql());
        }
        fragments.retain(|fragment| !fragment.is_empty());
        fragments.join(" ")
    }
}

impl RenderPlan {
    pub fn into_statement(self) -> CompiledStatement {
        CompiledStatement {
            sql: self.to_sql(),
            binds: self.binds,
        }
    }
}

/// Opaque CTE bodies in emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CteItems(pub Vec<String>);

impl ToSql for CteItems {
    fn to_sql(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        format!("WITH {}", self.0.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub entity: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectItems(pub Vec<SelectItem>);

impl ToSql for SelectItems {
    fn to_sql(&self) -> String {
        let columns: Vec<String> = self
            .0
            .iter()
            .map(|item| qualified_column(&item.entity, &item.column))
            .collect();
        format!("SELECT {}", columns.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromTableItem(pub String);

impl ToSql for FromTableItem {
    fn to_sql(&self) -> String {
        format!("FROM {}", quote_identifier(&self.0))
    }
}

/// `"left_entity"."left_column" = "right_entity"."right_column"`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCondition {
    pub left_entity: String,
    pub left_column: String,
    pub right_entity: String,
    pub right_column: String,
}

impl ToSql for JoinCondition {
    fn to_sql(&self) -> String {
        format!(
            "{} = {}",
            qualified_column(&self.left_entity, &self.left_column),
            qualified_column(&self.right_entity, &self.right_column)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub entity: String,
    pub conditions: Vec<JoinCondition>,
}

impl ToSql for Join {
    fn to_sql(&self) -> String {
        let conditions: Vec<String> = self.conditions.iter().map(ToSql::to_sql).collect();
        format!(
            "JOIN {} ON {}",
            quote_identifier(&self.entity),
            conditions.join(" AND ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinItems(pub Vec<Join>);

impl ToSql for JoinItems {
    fn to_sql(&self) -> String {
        self.0.iter().map(ToSql::to_sql).collect::<Vec<_>>().join(" ")
    }
}

/// `WHERE <key> IN (SELECT <key columns> FROM "entity" <joins> WHERE <predicate>)`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInSubquery {
    pub entity: String,
    pub key_columns: Vec<String>,
    pub joins: JoinItems,
    pub predicate: String,
}

impl ToSql for KeyInSubquery {
    fn to_sql(&self) -> String {
        let mut from = quote_identifier(&self.entity);
        let joins = self.joins.to_sql();
        if !joins.is_empty() {
            from.push(' ');
            from.push_str(&joins);
        }
        format!(
            "WHERE {} IN (SELECT {} FROM {} WHERE {})",
            key_expression(&self.entity, &self.key_columns),
            qualified_column_list(&self.entity, self.key_columns.iter().map(String::as_str)),
            from,
            self.predicate
        )
    }
}
