//! Shared fixtures for integration tests

use sqltree::graph_catalog::{EntityDef, Reference, Schema};

/// `Post -> User`
pub fn blog_schema() -> Schema {
    Schema::new()
        .with_entity("User", EntityDef::new(["name"], ["id"], "\"User\" AS (SELECT * FROM users)"))
        .with_entity(
            "Post",
            EntityDef::new(["title"], ["id"], "\"Post\" AS (SELECT * FROM posts)")
                .with_reference("User", Reference::new(["authorId"], ["id"])),
        )
}

/// ```text
///   Org <- User <- Post <- Comment
///            ^        ^
///          Team      Tag
/// ```
pub fn workspace_schema() -> Schema {
    let fk = |entity: &str| Reference::new([format!("{}Id", entity.to_lowercase())], ["id"]);
    Schema::new()
        .with_entity("Org", EntityDef::new(["name"], ["id"], "ORG"))
        .with_entity(
            "User",
            EntityDef::new(["name", "age"], ["id"], "USR").with_reference("Org", fk("Org")),
        )
        .with_entity(
            "Team",
            EntityDef::new(["name"], ["id"], "TEAM").with_reference("User", fk("User")),
        )
        .with_entity(
            "Post",
            EntityDef::new(["title", "score"], ["id"], "POST").with_reference("User", fk("User")),
        )
        .with_entity(
            "Comment",
            EntityDef::new(["body"], ["id"], "CMT").with_reference("Post", fk("Post")),
        )
        .with_entity(
            "Tag",
            EntityDef::new(["label"], ["id"], "TAG").with_reference("Post", fk("Post")),
        )
}

/// Count non-overlapping occurrences of `needle` in `haystack`
pub fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
