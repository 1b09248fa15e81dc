use sigfind_model::LowType;

use crate::equations::{Equations, bound_types};

fn int() -> LowType {
    LowType::identity(&["int"])
}

fn string() -> LowType {
    LowType::identity(&["string"])
}

#[test]
fn equality_membership_ignores_orientation() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    assert!(equations.try_add_equality(&a, &int()));
    // The reversed pair is the same normalized pair.
    assert!(equations.try_add_equality(&int(), &a));
    assert_eq!(equations.equalities().count(), 1);
}

#[test]
fn self_equality_is_dropped() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    assert!(equations.try_add_equality(&a, &a));
    assert_eq!(equations.equalities().count(), 0);
}

#[test]
fn inequality_blocks_direct_equality() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    let b = LowType::query_variable("b");
    assert!(equations.try_add_inequality(&a, &b));
    assert!(!equations.try_add_equality(&a, &b));
}

#[test]
fn inequality_blocks_equality_through_closure() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    let b = LowType::query_variable("b");
    assert!(equations.try_add_inequality(&a, &b));
    assert!(equations.try_add_equality(&a, &int()));
    // b joining a's class through int would connect the inequality.
    assert!(!equations.try_add_equality(&b, &int()));
}

#[test]
fn adding_inequality_over_existing_equality_contradicts() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    assert!(equations.try_add_equality(&a, &int()));
    assert!(!equations.try_add_inequality(&int(), &a));
}

#[test]
fn bound_types_walks_variable_chains() {
    let mut equations = Equations::new();
    let a = LowType::query_variable("a");
    let b = LowType::target_variable("b");
    assert!(equations.try_add_equality(&a, &b));
    assert!(equations.try_add_equality(&b, &int()));
    assert!(equations.try_add_equality(&a, &string()));

    let mut reachable = bound_types(&equations, &a);
    reachable.sort();
    let mut expected = vec![int(), string()];
    expected.sort();
    assert_eq!(reachable, expected);
}
