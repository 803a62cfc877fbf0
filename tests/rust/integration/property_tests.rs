//! Properties that must hold for any accepted schema and any filter

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use sqltree::graph_catalog::{EntityDef, Reference, Schema, SchemaTree};
    use sqltree::query_planner::filter::{
        compile_filter, ComparisonOp, FilterNode, Literal, MembershipOp, Operand, RangeOp,
    };
    use sqltree::query_planner::path_resolver::{joined_entities, path_between, resolve_join_order};
    use sqltree::{Query, SchemaError, SqlBuilder};

    use super::super::common::{occurrences, workspace_schema};

    fn mixed_filter() -> FilterNode {
        FilterNode::or(vec![
            FilterNode::and(vec![
                FilterNode::compare(ComparisonOp::Eq, Operand::attr("Team", "name"), "core"),
                FilterNode::range(RangeOp::Between, Operand::attr("Post", "score"), 10i64, 20i64),
                FilterNode::compare(
                    ComparisonOp::Ne,
                    Operand::attr("User", "name"),
                    Operand::attr("Org", "name"),
                ),
            ]),
            FilterNode::not(FilterNode::membership(
                MembershipOp::In,
                Operand::attr("Tag", "label"),
                vec![Operand::from("a"), Operand::from("b"), Operand::from(3.5f64)],
            )),
            FilterNode::compare(ComparisonOp::Is, Operand::attr("Comment", "body"), Operand::null()),
        ])
    }

    fn literal_count(node: &FilterNode) -> usize {
        let own = node
            .operands()
            .into_iter()
            .filter(|operand| operand.as_attribute().is_none())
            .count();
        own + node.children().iter().map(literal_count).sum::<usize>()
    }

    #[test]
    fn test_every_pair_has_exactly_one_simple_path() {
        let tree = SchemaTree::build(workspace_schema()).unwrap();
        let names: Vec<String> = tree.schema().entity_names().map(str::to_string).collect();

        for a in &names {
            for b in &names {
                let path = path_between(&tree, a, b).unwrap();
                assert_eq!(path.first(), Some(a));
                assert_eq!(path.last(), Some(b));

                let distinct: HashSet<_> = path.iter().collect();
                assert_eq!(distinct.len(), path.len(), "path {:?} repeats an entity", path);
                for pair in path.windows(2) {
                    assert!(tree.are_adjacent(&pair[0], &pair[1]));
                }

                // Same path walked backwards
                let mut reverse = path_between(&tree, b, a).unwrap();
                reverse.reverse();
                assert_eq!(reverse, path);
            }
        }
    }

    #[test]
    fn test_placeholders_are_sequential_and_unique() {
        let filter = mixed_filter();
        let compiled = compile_filter(&filter, 1).unwrap();

        let n = literal_count(&filter);
        assert_eq!(n, 7);
        assert_eq!(compiled.binds.len(), n);

        let mut last_position = 0;
        for i in 1..=n {
            let placeholder = format!(":{}", i);
            let found: Vec<_> = compiled
                .sql
                .match_indices(&placeholder)
                .filter(|(pos, _)| {
                    // ":1" must not match the prefix of ":10"
                    !compiled.sql[pos + placeholder.len()..]
                        .starts_with(|c: char| c.is_ascii_digit())
                })
                .collect();
            assert_eq!(found.len(), 1, "{} appears {} times", placeholder, found.len());
            assert!(found[0].0 > last_position || i == 1);
            last_position = found[0].0;
        }
        assert!(!compiled.sql.contains(&format!(":{}", n + 1)));
        assert_eq!(
            compiled.binds,
            vec![
                Literal::from("core"),
                Literal::from(10i64),
                Literal::from(20i64),
                Literal::from("a"),
                Literal::from("b"),
                Literal::from(3.5f64),
                Literal::Null,
            ]
        );
    }

    #[test]
    fn test_overlapping_paths_join_each_entity_once() {
        let tree = SchemaTree::build(workspace_schema()).unwrap();
        let targets: Vec<String> = ["Team", "Org", "Tag", "Comment"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let segments = resolve_join_order(&tree, "Comment", &targets).unwrap();
        let joined = joined_entities("Comment", &segments);

        let mut expected: HashSet<String> = HashSet::new();
        for target in &targets {
            expected.extend(path_between(&tree, "Comment", target).unwrap());
        }
        let actual: HashSet<String> = joined.iter().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(joined.len(), actual.len(), "an entity was joined twice: {:?}", joined);
    }

    #[test]
    fn test_statement_joins_each_entity_once() {
        let builder = SqlBuilder::new(workspace_schema()).unwrap();
        let query = Query::new().select("Comment", ["body"]).filter(mixed_filter());

        let sql = &builder.build_sql(&query).unwrap()["Comment"].sql;
        for entity in ["Post", "User", "Team", "Org", "Tag"] {
            assert_eq!(occurrences(sql, &format!("JOIN \"{}\"", entity)), 1, "{}", sql);
        }
        assert_eq!(occurrences(sql, "JOIN \"Comment\""), 0);
        assert!(sql.starts_with("WITH CMT, POST, USR, TEAM, ORG, TAG SELECT"));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let query = Query::new()
            .select("Tag", ["label"])
            .select("Post", ["title", "score"])
            .select("User", ["name"])
            .filter(mixed_filter());

        let first = SqlBuilder::new(workspace_schema()).unwrap().build_sql(&query).unwrap();
        let second = SqlBuilder::new(workspace_schema()).unwrap().build_sql(&query).unwrap();
        assert_eq!(first, second);

        let builder = SqlBuilder::new(workspace_schema()).unwrap();
        assert_eq!(builder.build_sql(&query).unwrap(), builder.build_sql(&query).unwrap());
    }

    #[test]
    fn test_query_object_is_not_altered() {
        let builder = SqlBuilder::new(workspace_schema()).unwrap();
        let query = Query::new().select("Team", ["name"]).filter(mixed_filter());
        let snapshot = query.clone();
        builder.build_sql(&query).unwrap();
        assert_eq!(query, snapshot);
    }

    fn linked(edges: &[(&str, &str)], entities: &[&str]) -> Schema {
        entities
            .iter()
            .map(|name| {
                let def = edges
                    .iter()
                    .filter(|(from, _)| from == name)
                    .fold(EntityDef::new(["v"], ["id"], *name), |def, (_, to)| {
                        def.with_reference(*to, Reference::new([format!("{}Id", to)], ["id"]))
                    });
                (name.to_string(), def)
            })
            .collect()
    }

    #[test]
    fn test_invalid_shapes_map_to_their_errors() {
        let cyclic = linked(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "B")], &["A", "B", "C", "D"]);
        assert!(matches!(
            SqlBuilder::new(cyclic).err(),
            Some(SchemaError::Cyclic { .. })
        ));

        let disconnected = linked(&[("A", "B")], &["A", "B", "C"]);
        assert!(matches!(
            SqlBuilder::new(disconnected).err(),
            Some(SchemaError::Disconnected { .. })
        ));

        let dangling = linked(&[("A", "Z")], &["A"]);
        assert!(matches!(
            SqlBuilder::new(dangling).err(),
            Some(SchemaError::DanglingReference { .. })
        ));

        let conflicting = linked(&[("A", "B"), ("B", "A")], &["A", "B"]);
        assert!(matches!(
            SqlBuilder::new(conflicting).err(),
            Some(SchemaError::ConflictingReference { .. })
        ));

        let chain = linked(&[("A", "B"), ("B", "C")], &["A", "B", "C"]);
        assert!(SqlBuilder::new(chain).is_ok());
    }
}
