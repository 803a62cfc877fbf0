//! End-to-end scenarios over the blog schema (`Post -> User`)

#[cfg(test)]
mod scenario_tests {
    use sqltree::graph_catalog::{EntityDef, Reference, Schema};
    use sqltree::query_planner::filter::{
        ComparisonOp, FilterNode, Literal, MembershipOp, Operand, RangeOp,
    };
    use sqltree::{Query, QueryError, SchemaError, SqlBuildError, SqlBuilder};

    use super::super::common::blog_schema;

    #[test]
    fn test_select_without_filter_has_no_where_clause() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query: Query =
            serde_json::from_str(r#"{"select": {"Post": {"title": true}}, "filter": null}"#)
                .unwrap();

        let statements = builder.build_sql(&query).unwrap();
        assert_eq!(statements.len(), 1);

        let post = &statements["Post"];
        assert_eq!(
            post.sql,
            "WITH \"Post\" AS (SELECT * FROM posts) SELECT \"Post\".\"title\", \"Post\".\"__ID__\" FROM \"Post\""
        );
        assert!(!post.sql.contains("WHERE"));
        assert!(post.binds.is_empty());
    }

    #[test]
    fn test_filter_on_referenced_entity_joins_through_subquery() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query: Query = serde_json::from_str(
            r#"{
                "select": {"Post": {"title": true}},
                "filter": {"op": "=", "variables": [{"entity": "User", "attribute": "name"}, "Alice"]}
            }"#,
        )
        .unwrap();

        let statements = builder.build_sql(&query).unwrap();
        let post = &statements["Post"];
        assert_eq!(
            post.sql,
            "WITH \"Post\" AS (SELECT * FROM posts), \"User\" AS (SELECT * FROM users) \
             SELECT \"Post\".\"title\", \"Post\".\"__ID__\" FROM \"Post\" \
             WHERE \"Post\".\"id\" IN (SELECT \"Post\".\"id\" FROM \"Post\" \
             JOIN \"User\" ON \"Post\".\"authorId\" = \"User\".\"id\" \
             WHERE \"User\".\"name\" = :1)"
        );
        assert_eq!(post.binds, vec![Literal::from("Alice")]);
    }

    #[test]
    fn test_unknown_selected_entity_fails_whole_call() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query = Query::new().select("Post", ["title"]).select("Comment", ["body"]);

        assert_eq!(
            builder.build_sql(&query).unwrap_err(),
            SqlBuildError::Query(QueryError::UnknownEntity {
                entity: "Comment".to_string()
            })
        );
    }

    #[test]
    fn test_mutual_references_rejected_at_construction() {
        let schema = Schema::new()
            .with_entity(
                "A",
                EntityDef::new(["x"], ["id"], "A").with_reference("B", Reference::new(["bId"], ["id"])),
            )
            .with_entity(
                "B",
                EntityDef::new(["y"], ["id"], "B").with_reference("A", Reference::new(["aId"], ["id"])),
            );

        let err = SqlBuilder::new(schema).err().unwrap();
        assert!(matches!(err, SchemaError::ConflictingReference { .. }));
    }

    #[test]
    fn test_both_entities_selected_get_stitching_column() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query = Query::new()
            .select("Post", ["title"])
            .select("User", ["name"])
            .filter(FilterNode::compare(
                ComparisonOp::Like,
                Operand::attr("Post", "title"),
                "Rust%",
            ));

        let statements = builder.build_sql(&query).unwrap();
        let order: Vec<_> = statements.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Post", "User"]);

        assert!(statements["Post"]
            .sql
            .contains("SELECT \"Post\".\"title\", \"Post\".\"__ID__\", \"Post\".\"__REF__User\" FROM"));
        // User declares no references, so no stitching column
        assert!(statements["User"]
            .sql
            .contains("SELECT \"User\".\"name\", \"User\".\"__ID__\" FROM"));

        // The filter is joined from User's side, identifier first
        assert_eq!(
            statements["User"].sql,
            "WITH \"User\" AS (SELECT * FROM users), \"Post\" AS (SELECT * FROM posts) \
             SELECT \"User\".\"name\", \"User\".\"__ID__\" FROM \"User\" \
             WHERE \"User\".\"id\" IN (SELECT \"User\".\"id\" FROM \"User\" \
             JOIN \"Post\" ON \"User\".\"id\" = \"Post\".\"authorId\" \
             WHERE \"Post\".\"title\" LIKE :1)"
        );
        assert_eq!(statements["User"].binds, statements["Post"].binds);
    }

    #[test]
    fn test_filter_on_own_attributes_needs_no_join() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query = Query::new().select("User", ["name"]).filter(FilterNode::membership(
            MembershipOp::NotIn,
            Operand::attr("User", "name"),
            vec![Operand::from("root"), Operand::from("admin")],
        ));

        let user = &builder.build_sql(&query).unwrap()["User"];
        assert_eq!(
            user.sql,
            "WITH \"User\" AS (SELECT * FROM users) SELECT \"User\".\"name\", \"User\".\"__ID__\" FROM \"User\" \
             WHERE \"User\".\"id\" IN (SELECT \"User\".\"id\" FROM \"User\" WHERE \"User\".\"name\" NOT IN (:1, :2))"
        );
        assert_eq!(user.binds, vec![Literal::from("root"), Literal::from("admin")]);
    }

    #[test]
    fn test_malformed_filter_reported_before_any_output() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let query = Query::new().select("Post", ["title"]).filter(FilterNode::and(vec![
            FilterNode::range(RangeOp::Between, Operand::attr("User", "name"), "a", "m"),
        ]));

        assert!(matches!(
            builder.build_sql(&query),
            Err(SqlBuildError::Query(QueryError::MalformedFilter { .. }))
        ));
    }

    #[test]
    fn test_builder_recovers_after_bad_query() {
        let builder = SqlBuilder::new(blog_schema()).unwrap();
        let bad = Query::new().select("Post", ["missing"]);
        assert!(builder.build_sql(&bad).is_err());

        let good = Query::new().select("Post", ["title"]);
        assert!(builder.build_sql(&good).is_ok());
    }
}
