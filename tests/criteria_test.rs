//! Tests for the criteria evaluator

use rstest::{fixture, rstest};

use proptree::util::testing::init_test_setup;
use proptree::{
    by_name, values, Criteria, CriteriaError, Criterion, PropertyTree, PropertyValue,
};

fn node_with_children(children: Vec<PropertyTree>) -> PropertyTree {
    PropertyTree::node_of("offer", None, values![], children)
}

#[fixture]
fn interval_node() -> PropertyTree {
    init_test_setup();
    node_with_children(vec![
        PropertyTree::leaf("ageStart", values![18]),
        PropertyTree::leaf("ageEnd", values![65]),
    ])
}

// ============================================================
// Exclusion
// ============================================================

#[test]
fn given_matching_exclude_marker_when_evaluating_then_node_is_excluded() {
    let node = node_with_children(vec![PropertyTree::leaf("colorExclude", values!["red"])]);
    let criteria = Criteria::new([Criterion::of("color", "red")]);
    assert!(!criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_non_matching_exclude_marker_when_evaluating_then_node_passes() {
    let node = node_with_children(vec![PropertyTree::leaf("colorExclude", values!["red"])]);
    let criteria = Criteria::new([Criterion::of("color", "blue")]);
    assert!(criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_multiple_exclude_markers_when_evaluating_then_bags_are_unioned() {
    let node = node_with_children(vec![
        PropertyTree::leaf("colorExclude", values!["red"]),
        PropertyTree::leaf("colorExclude", values!["blue"]),
    ]);
    let criteria = Criteria::new([Criterion::of("color", "blue")]);
    assert!(!criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_include_and_exclude_for_same_value_when_evaluating_then_exclusion_wins() {
    let node = node_with_children(vec![
        PropertyTree::leaf("colorInclude", values!["red"]),
        PropertyTree::leaf("colorExclude", values!["red"]),
    ]);
    let criteria = Criteria::new([Criterion::of("color", "red")]);
    assert!(!criteria.satisfied_by(&node).unwrap());
}

// ============================================================
// Inclusion
// ============================================================

#[test]
fn given_no_include_marker_when_evaluating_then_inclusion_is_vacuously_true() {
    let node = node_with_children(vec![PropertyTree::leaf("price", values![10])]);
    let criteria = Criteria::new([Criterion::of("region", "EU")]);
    assert!(criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_include_marker_without_intersection_when_evaluating_then_node_fails() {
    let node = node_with_children(vec![PropertyTree::leaf("regionInclude", values!["US"])]);
    let criteria = Criteria::new([Criterion::of("region", "EU")]);
    assert!(!criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_multiple_include_markers_when_evaluating_then_union_must_intersect() {
    let node = node_with_children(vec![
        PropertyTree::leaf("regionInclude", values!["US"]),
        PropertyTree::leaf("regionInclude", values!["EU"]),
    ]);
    let criteria = Criteria::new([Criterion::of("region", "EU")]);
    assert!(criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_multiple_criteria_when_evaluating_then_inclusion_is_a_conjunction() {
    let node = node_with_children(vec![
        PropertyTree::leaf("regionInclude", values!["EU"]),
        PropertyTree::leaf("tierInclude", values!["gold"]),
    ]);
    let passing = Criteria::new([
        Criterion::of("region", "EU"),
        Criterion::of("tier", "gold"),
    ]);
    let failing = Criteria::new([
        Criterion::of("region", "EU"),
        Criterion::of("tier", "silver"),
    ]);
    assert!(passing.satisfied_by(&node).unwrap());
    assert!(!failing.satisfied_by(&node).unwrap());
}

// ============================================================
// Interval
// ============================================================

#[rstest]
fn given_value_inside_closed_range_when_evaluating_then_passes(interval_node: PropertyTree) {
    let criteria = Criteria::new([Criterion::of("age", 30)]);
    assert!(criteria.satisfied_by(&interval_node).unwrap());
}

#[rstest]
fn given_value_outside_closed_range_when_evaluating_then_fails(interval_node: PropertyTree) {
    let above = Criteria::new([Criterion::of("age", 70)]);
    let below = Criteria::new([Criterion::of("age", 10)]);
    assert!(!above.satisfied_by(&interval_node).unwrap());
    assert!(!below.satisfied_by(&interval_node).unwrap());
}

#[rstest]
fn given_range_bounds_when_evaluating_then_range_is_closed(interval_node: PropertyTree) {
    let at_start = Criteria::new([Criterion::of("age", 18)]);
    let at_end = Criteria::new([Criterion::of("age", 65)]);
    assert!(at_start.satisfied_by(&interval_node).unwrap());
    assert!(at_end.satisfied_by(&interval_node).unwrap());
}

#[test]
fn given_start_without_end_when_evaluating_then_range_is_unbounded_above() {
    let node = node_with_children(vec![PropertyTree::leaf("ageStart", values![18])]);
    let criteria = Criteria::new([Criterion::of("age", 1000)]);
    assert!(criteria.satisfied_by(&node).unwrap());

    let below = Criteria::new([Criterion::of("age", 17)]);
    assert!(!below.satisfied_by(&node).unwrap());
}

#[test]
fn given_no_interval_markers_when_evaluating_then_interval_is_vacuously_true() {
    let node = node_with_children(vec![]);
    let criteria = Criteria::new([Criterion::of("age", 30)]);
    assert!(criteria.satisfied_by(&node).unwrap());
}

#[test]
fn given_start_marker_with_non_singleton_bag_when_evaluating_then_treated_as_absent() {
    let node = node_with_children(vec![PropertyTree::leaf("ageStart", values![18, 21])]);
    let criteria = Criteria::new([Criterion::of("age", 1)]);
    assert!(criteria.satisfied_by(&node).unwrap());
}

#[rstest]
fn given_cross_type_criterion_value_when_evaluating_then_fails_hard(
    interval_node: PropertyTree,
) {
    let criteria = Criteria::new([Criterion::of("age", "thirty")]);
    let result = criteria.satisfied_by(&interval_node);
    assert!(matches!(
        result,
        Err(CriteriaError::IncomparableTypes { .. })
    ));
}

#[rstest]
fn given_non_comparable_criterion_value_when_evaluating_then_fails_hard(
    interval_node: PropertyTree,
) {
    let object = PropertyValue::Object(Default::default());
    let criteria = Criteria::new([Criterion::of("age", object)]);
    let result = criteria.satisfied_by(&interval_node);
    assert!(matches!(result, Err(CriteriaError::NotComparable { .. })));
}

#[test]
fn given_long_bounds_when_evaluating_int_value_then_families_do_not_mix() {
    let node = node_with_children(vec![PropertyTree::leaf("ageStart", values![18i64])]);
    let criteria = Criteria::new([Criterion::of("age", 30)]);
    assert!(matches!(
        criteria.satisfied_by(&node),
        Err(CriteriaError::IncomparableTypes { .. })
    ));
}

#[test]
fn given_excluded_node_with_bad_interval_value_when_evaluating_then_error_still_surfaces() {
    // All three sub-checks are computed eagerly, so the configuration
    // error is reported even though exclusion alone already fails the node.
    let node = node_with_children(vec![
        PropertyTree::leaf("colorExclude", values!["red"]),
        PropertyTree::leaf("ageStart", values![18]),
    ]);
    let criteria = Criteria::new([
        Criterion::of("color", "red"),
        Criterion::of("age", "thirty"),
    ]);
    assert!(criteria.satisfied_by(&node).is_err());
}

// ============================================================
// Whole-tree filtering
// ============================================================

#[test]
fn given_criteria_when_filtering_tree_then_non_matching_subtrees_are_pruned() {
    let tree = PropertyTree::node_of(
        "catalog",
        None,
        values![],
        [
            PropertyTree::node_of(
                "eu_offer",
                None,
                values![],
                [PropertyTree::leaf("regionInclude", values!["EU"])],
            ),
            PropertyTree::node_of(
                "us_offer",
                None,
                values![],
                [PropertyTree::leaf("regionInclude", values!["US"])],
            ),
        ],
    );

    let criteria = Criteria::new([Criterion::of("region", "EU")]);
    let filtered = criteria.filter_tree(&tree).unwrap();

    assert!(filtered.find(by_name("eu_offer")).is_not_empty());
    assert!(filtered.find(by_name("us_offer")).is_empty());
}

#[test]
fn given_non_matching_root_when_filtering_tree_then_yields_empty() {
    let tree = node_with_children(vec![PropertyTree::leaf("colorExclude", values!["red"])]);
    let criteria = Criteria::new([Criterion::of("color", "red")]);
    let filtered = criteria.filter_tree(&tree).unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn given_bad_criterion_when_filtering_tree_then_error_propagates() {
    let tree = node_with_children(vec![PropertyTree::leaf("ageStart", values![18])]);
    let criteria = Criteria::new([Criterion::of("age", "thirty")]);
    assert!(criteria.filter_tree(&tree).is_err());
}
