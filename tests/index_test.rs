//! Tests for TreeIndex queries

use rstest::{fixture, rstest};

use treestore::domain::{ParentRef, Record, TreeIndex, TreeItem};
use treestore::util::testing;

fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<i64> {
    records.into_iter().map(|r| r.id).collect()
}

//        1
//      /   \
//     2     3
//   / | \
//  4  5  6
// / \
// 7  8
#[fixture]
fn records() -> Vec<Record> {
    testing::init_test_setup();
    vec![
        Record::root(1),
        Record::child_of(2, 1).with_field("type", "test"),
        Record::child_of(3, 1).with_field("type", "test"),
        Record::child_of(4, 2).with_field("type", "test"),
        Record::child_of(5, 2).with_field("type", "test"),
        Record::child_of(6, 2).with_field("type", "test"),
        Record::child_of(7, 4).with_field("type", serde_json::Value::Null),
        Record::child_of(8, 4).with_field("type", serde_json::Value::Null),
    ]
}

#[fixture]
fn index(records: Vec<Record>) -> TreeIndex<Record> {
    TreeIndex::new(records)
}

// ============================================================
// Reference scenario
// ============================================================

#[rstest]
fn given_reference_tree_when_getting_item_then_returns_record_with_payload(
    index: TreeIndex<Record>,
) {
    let item = index.get_item(&7).expect("item 7");
    assert_eq!(item.id, 7);
    assert_eq!(item.parent, ParentRef::ChildOf(4));
    assert_eq!(item.field("type"), Some(&serde_json::Value::Null));
}

#[rstest]
#[case(4, vec![7, 8])]
#[case(2, vec![4, 5, 6])]
#[case(1, vec![2, 3])]
#[case(5, vec![])]
#[case(42, vec![])]
fn given_reference_tree_when_getting_children_then_returns_them_in_input_order(
    index: TreeIndex<Record>,
    #[case] id: i64,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(ids(index.get_children(&id)), expected);
}

#[rstest]
#[case(7, vec![4, 2, 1])]
#[case(3, vec![1])]
#[case(1, vec![])]
#[case(42, vec![])]
fn given_reference_tree_when_getting_all_parents_then_returns_nearest_first(
    index: TreeIndex<Record>,
    #[case] id: i64,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(ids(index.get_all_parents(&id)), expected);
}

#[rstest]
fn given_reference_tree_when_getting_all_then_returns_input_unchanged(
    records: Vec<Record>,
) {
    let index = TreeIndex::new(records.clone());
    assert_eq!(index.get_all(), records.as_slice());
    assert_eq!(index.len(), 8);
}

// ============================================================
// Properties over the reference tree
// ============================================================

#[rstest]
fn given_any_item_when_looking_up_its_id_then_finds_it(index: TreeIndex<Record>) {
    for item in index.get_all() {
        assert_eq!(index.get_item(item.id()), Some(item));
    }
    assert!(index.get_item(&0).is_none());
    assert!(!index.contains(&9));
}

#[rstest]
fn given_any_item_when_listing_its_parents_children_then_appears_exactly_once(
    index: TreeIndex<Record>,
) {
    for item in index.get_all() {
        let siblings = index.children_of(item.parent());
        assert_eq!(siblings.iter().filter(|s| s.id == item.id).count(), 1);
        assert!(siblings.iter().all(|s| s.parent == item.parent));
    }
}

#[rstest]
fn given_reference_tree_when_walking_ancestors_then_ends_at_a_root(index: TreeIndex<Record>) {
    for item in index.get_all() {
        let parents = index.get_all_parents(item.id());
        assert!(parents.iter().all(|p| p.id != item.id));
        match parents.last() {
            Some(top) => assert!(top.parent.is_root()),
            None => assert!(item.parent.is_root()),
        }
    }
}

// ============================================================
// Malformed input
// ============================================================

#[test]
fn given_duplicate_ids_when_getting_item_then_last_one_wins() {
    let index = TreeIndex::new(vec![
        Record::root(1).with_field("v", "first"),
        Record::root(1).with_field("v", "second"),
    ]);

    assert_eq!(
        index.get_item(&1).and_then(|r| r.field("v")),
        Some(&serde_json::json!("second"))
    );
    assert_eq!(index.get_roots().len(), 2);
    assert_eq!(index.get_all().len(), 2);
}

#[test]
fn given_dangling_parent_when_getting_all_parents_then_stops_at_gap() {
    let index = TreeIndex::new(vec![
        Record::root(1),
        Record::child_of(2, 99),
        Record::child_of(3, 2),
    ]);

    assert_eq!(ids(index.get_all_parents(&3)), vec![2]);
    assert!(index.get_all_parents(&2).is_empty());
    assert_eq!(ids(index.get_children(&99)), vec![2]);
}

#[test]
fn given_parent_listed_after_child_when_indexing_then_links_are_resolved() {
    let index = TreeIndex::new(vec![
        Record::child_of(3, 2),
        Record::child_of(2, 1),
        Record::root(1),
    ]);

    assert_eq!(ids(index.get_all_parents(&3)), vec![2, 1]);
    assert_eq!(ids(index.get_roots()), vec![1]);
}

#[test]
fn given_cycle_below_root_when_getting_all_parents_then_terminates() {
    let index = TreeIndex::new(vec![
        Record::child_of(1, 3),
        Record::child_of(2, 1),
        Record::child_of(3, 2),
    ]);

    assert_eq!(ids(index.get_all_parents(&1)), vec![3, 2]);
    assert!(index.get_roots().is_empty());
    assert_eq!(index.depth(), 0);
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_reference_tree_when_iterating_then_visits_in_preorder(index: TreeIndex<Record>) {
    let visited: Vec<(usize, i64)> = index.iter().map(|(level, r)| (level, r.id)).collect();
    assert_eq!(
        visited,
        vec![(1, 1), (2, 2), (3, 4), (4, 7), (4, 8), (3, 5), (3, 6), (2, 3)]
    );
}

#[rstest]
fn given_reference_tree_when_measuring_then_reports_depth_and_leaves(index: TreeIndex<Record>) {
    assert_eq!(index.depth(), 4);
    assert_eq!(ids(index.leaves()), vec![7, 8, 5, 6, 3]);
}

#[rstest]
fn given_reference_tree_when_using_ancestor_iterator_then_is_lazy(index: TreeIndex<Record>) {
    let nearest = index.ancestors(&8).next().map(|r| r.id);
    assert_eq!(nearest, Some(4));
}

#[test]
fn given_generic_item_when_indexing_then_works_with_string_ids() {
    struct Dir {
        name: String,
        parent: ParentRef<String>,
    }

    impl TreeItem for Dir {
        type Id = String;

        fn id(&self) -> &String {
            &self.name
        }

        fn parent(&self) -> &ParentRef<String> {
            &self.parent
        }
    }

    let index: TreeIndex<Dir> = vec![
        Dir { name: "usr".into(), parent: ParentRef::Root },
        Dir { name: "lib".into(), parent: ParentRef::ChildOf("usr".into()) },
        Dir { name: "rust".into(), parent: ParentRef::ChildOf("lib".into()) },
    ]
    .into_iter()
    .collect();

    let chain: Vec<&str> = index
        .get_all_parents(&"rust".to_string())
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(chain, vec!["lib", "usr"]);
}
