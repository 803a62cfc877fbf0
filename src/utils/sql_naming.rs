//! Identifier rendering shared by the filter compiler and the statement builders.
//!
//! All entity and attribute names are emitted as double-quoted identifiers.
//! An embedded `"` is doubled, so any name is safe to splice into SQL text.
//!
//! Examples:
//! - `User` → `"User"`
//! - `("User", "name")` → `"User"."name"`
//! - `say "hi"` → `"say ""hi"""`

/// Quote a single identifier.
///
/// # Examples
/// ```
/// use sqltree::utils::sql_naming::quote_identifier;
///
/// assert_eq!(quote_identifier("Post"), "\"Post\"");
/// assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an entity-qualified column.
///
/// # Examples
/// ```
/// use sqltree::utils::sql_naming::qualified_column;
///
/// assert_eq!(qualified_column("User", "name"), "\"User\".\"name\"");
/// ```
pub fn qualified_column(entity: &str, column: &str) -> String {
    format!("{}.{}", quote_identifier(entity), quote_identifier(column))
}

/// Qualified columns joined with `", "`, in the given order.
pub fn qualified_column_list<'a>(entity: &str, columns: impl IntoIterator<Item = &'a str>) -> String {
    columns
        .into_iter()
        .map(|column| qualified_column(entity, column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Row-value form of a key: a bare column for single keys, a parenthesized
/// tuple for composite ones.
pub fn key_expression(entity: &str, columns: &[String]) -> String {
    let list = qualified_column_list(entity, columns.iter().map(String::as_str));
    if columns.len() == 1 {
        list
    } else {
        format!("({})", list)
    }
}
