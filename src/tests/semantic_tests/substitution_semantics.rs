use super::*;
use std::collections::HashSet;

// =============================================================================
// SUBSTITUTION SEMANTICS
// =============================================================================

#[test]
fn application_follows_chains() {
    let mut s = Substitution::empty();
    s.bind(Var::new("x"), v("y")).unwrap();
    s.bind(Var::new("y"), f("f", vec![v("z")])).unwrap();
    s.bind(Var::new("z"), c("A")).unwrap();
    assert_eq!(
        s.apply_to_term(&f("g", vec![v("x")])),
        f("g", vec![f("f", vec![c("A")])])
    );
}

#[test]
fn ground_terms_are_fixed_points() {
    let mut s = Substitution::empty();
    s.bind(Var::new("x"), c("A")).unwrap();
    let ground = f("h", vec![c("B"), f("k", vec![c("C")])]);
    assert_eq!(s.apply_to_term(&ground), ground);
}

#[test]
fn unbound_variables_are_left_alone() {
    let mut s = Substitution::empty();
    s.bind(Var::new("x"), c("A")).unwrap();
    assert_eq!(s.apply_to_term(&v("w")), v("w"));
}

#[test]
fn bind_is_occurs_checked() {
    let mut s = Substitution::empty();
    s.bind(Var::new("x"), f("f", vec![v("y")])).unwrap();
    // y := g(x) would make x = f(g(x))
    assert!(s.bind(Var::new("y"), f("g", vec![v("x")])).is_err());
}

#[test]
fn binding_a_bound_variable_must_agree() {
    let mut s = Substitution::empty();
    s.bind(Var::new("x"), c("A")).unwrap();
    assert!(s.bind(Var::new("x"), c("A")).is_ok());
    assert!(s.bind(Var::new("x"), c("B")).is_err());
}

#[test]
fn resolved_view_is_sorted_and_complete() {
    let sigma = mgu(
        &f("f", vec![v("y"), v("x")]),
        &f("f", vec![f("g", vec![v("x")]), c("A")]),
    );
    let resolved = sigma.resolved();
    assert_eq!(
        resolved,
        vec![
            (Var::new("x"), c("A")),
            (Var::new("y"), f("g", vec![c("A")])),
        ]
    );
}

#[test]
fn restriction_keeps_only_requested_variables() {
    let sigma = mgu(
        &f("f", vec![v("x"), v("y")]),
        &f("f", vec![c("A"), v("x")]),
    );
    let only_y: HashSet<Var> = [Var::new("y")].into_iter().collect();
    let restricted = sigma.restrict(&only_y);
    assert_eq!(restricted.len(), 1);
    assert_eq!(restricted.apply_to_term(&v("y")), c("A"));
}
