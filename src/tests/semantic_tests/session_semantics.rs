use super::*;

// =============================================================================
// SESSION / END-TO-END API SEMANTICS
// =============================================================================

use crate::chain::ChainOutcome;
use crate::parser::Statement;
use crate::resolution::RefutationOutcome;
use crate::session::{ExecResult, Session, SessionError};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("folog_{}_{}_{}", tag, std::process::id(), nanos));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn session_executes_fact_statement() {
    let mut session = Session::new();
    let fact = atom("Missile", vec![c("M1")]);
    let result = session
        .execute_statement(Statement::Fact(fact.clone()))
        .expect("execute_statement failed");
    assert!(matches!(result, ExecResult::FactAdded { new: true, .. }));
    assert_eq!(session.knowledge_base().facts(), &[fact]);
}

#[test]
fn session_query_derives_facts_into_the_knowledge_base() {
    let mut session = Session::new();
    let results = session
        .execute_source("Missile(M1). Missile(x) => Weapon(x). ?- Weapon(y).")
        .unwrap();
    match &results[2] {
        ExecResult::Chained { report, .. } => {
            assert_eq!(report.outcome, ChainOutcome::Entailed);
            assert_eq!(report.witness, Some(atom("Weapon", vec![c("M1")])));
        }
        other => panic!("expected chain result, got {:?}", other),
    }
    assert!(session.knowledge_base().contains(&atom("Weapon", vec![c("M1")])));
}

#[test]
fn session_loads_files_relative_to_the_including_file() {
    let dir = temp_dir("load");
    fs::create_dir_all(dir.join("lib")).unwrap();
    fs::write(dir.join("lib/facts.fol"), "Alive(Anil).\n").unwrap();
    fs::write(
        dir.join("main.fol"),
        ":load \"lib/facts.fol\".\nAlive(x) => NotKilled(x).\n?- NotKilled(Anil).\n",
    )
    .unwrap();

    let mut session = Session::new();
    let result = session
        .load_file(dir.join("main.fol").to_str().unwrap())
        .expect("load failed");
    match &result {
        ExecResult::Loaded { results, .. } => {
            assert_eq!(results.len(), 3);
            assert!(matches!(&results[0], ExecResult::Loaded { .. }));
            assert!(
                matches!(&results[2], ExecResult::Chained { report, .. } if report.is_entailed())
            );
        }
        other => panic!("expected Loaded, got {:?}", other),
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn session_rejects_recursive_load() {
    let dir = temp_dir("cycle");
    let path = dir.join("loop.fol");
    fs::write(&path, ":load \"loop.fol\".\n").unwrap();
    let mut session = Session::new();
    let err = session.load_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, SessionError::RecursiveLoad(_)));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn parse_failure_executes_nothing() {
    let mut session = Session::new();
    assert!(session.execute_source("P(A). Q(").is_err());
    assert!(session.knowledge_base().is_empty());
}

#[test]
fn refute_directive_uses_the_clause_set() {
    let mut session = Session::new();
    let results = session
        .execute_source(
            "clause Alive_Anil.\n\
             clause -Alive_Anil ∨ NotKilled_Anil.\n\
             clause -NotKilled_Anil.\n\
             :refute.",
        )
        .unwrap();
    match &results[3] {
        ExecResult::Refuted { report } => {
            assert_eq!(report.outcome, RefutationOutcome::Contradiction);
            assert_eq!(report.clauses[..3], session.clauses()[..]);
        }
        other => panic!("expected refutation, got {:?}", other),
    }
}

#[test]
fn results_serialize_to_json() {
    let mut session = Session::new();
    let results = session
        .execute_source("P(A). P(x) => Q(x). ?- Q(A). :unify f(x) = f(A).")
        .unwrap();
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["kind"], "fact_added");
    assert_eq!(json[2]["kind"], "chained");
    assert_eq!(json[2]["report"]["outcome"], "Entailed");
    assert_eq!(json[3]["kind"], "unified");
    assert!(json[3]["error"].is_null());
}
