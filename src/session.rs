//! Session: end-to-end API for loading programs and running the engines.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::chain::{ChainConfig, ChainReport, KnowledgeBase, GIVEN};
use crate::parser::{parse_program_with, Directive, ParseError, Setting, Statement};
use crate::resolution::{derivation_table, prove, refute, RefutationConfig, RefutationReport};
use crate::syntax::{ArityError, Atom, Clause, Literal, Rule, Signature, Term, Var};
use crate::unify::{unify_traced, Substitution, UnifyResult};

/// Result of executing a statement.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecResult {
    FactAdded { fact: Atom, new: bool },
    RuleAdded { rule: Rule },
    ClauseAdded { clause: Clause },
    /// A query or `:chain`; `log` holds the derivation log lines of this run.
    Chained {
        query: Option<Atom>,
        report: ChainReport,
        log: Vec<String>,
    },
    Refuted { report: RefutationReport },
    Unified(UnifyReport),
    Shown {
        facts: Vec<Atom>,
        rules: Vec<Rule>,
        clauses: Vec<Clause>,
    },
    SettingApplied { key: String, value: String },
    Loaded {
        path: String,
        results: Vec<ExecResult>,
    },
    Quit,
}

/// Outcome of a `:unify` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifyReport {
    pub left: Term,
    pub right: Term,
    /// Fully resolved bindings, sorted by variable; `None` on failure.
    pub unifier: Option<Vec<(Var, Term)>>,
    pub error: Option<String>,
    pub trace: Vec<String>,
}

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Arity(#[from] ArityError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{0} is already being loaded")]
    RecursiveLoad(String),
    #[error("{0}")]
    InvalidSetting(String),
}

/// A session holds the knowledge base, the clause set and the engine
/// configuration.
#[derive(Debug, Default)]
pub struct Session {
    kb: KnowledgeBase,
    clauses: Vec<Clause>,
    chain_config: ChainConfig,
    refutation_config: RefutationConfig,
    signature: Signature,
    trace: bool,
    /// Files currently being loaded, innermost last.
    loading: Vec<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_config(chain_config: ChainConfig, refutation_config: RefutationConfig) -> Self {
        Session {
            chain_config,
            refutation_config,
            ..Session::default()
        }
    }

    /// Parse and execute program text, statement by statement.
    ///
    /// Execution stops at the first `:quit`, which is included in the
    /// results. Nothing is executed if the text does not parse.
    pub fn execute_source(&mut self, source: &str) -> Result<Vec<ExecResult>, SessionError> {
        let mut signature = self.signature.clone();
        let statements = parse_program_with(source, &mut signature)?;
        let mut results = Vec::new();
        for stmt in statements {
            let result = self.execute_statement(stmt)?;
            let quit = matches!(result, ExecResult::Quit);
            results.push(result);
            if quit {
                break;
            }
        }
        Ok(results)
    }

    /// Execute a parsed statement.
    pub fn execute_statement(&mut self, stmt: Statement) -> Result<ExecResult, SessionError> {
        match stmt {
            Statement::Fact(fact) => {
                self.signature.check_atom(&fact)?;
                let new = self.kb.add_fact(fact.clone(), GIVEN);
                Ok(ExecResult::FactAdded { fact, new })
            }
            Statement::Rule(rule) => {
                self.signature.check_rule(&rule)?;
                self.kb.add_rule(rule.clone());
                Ok(ExecResult::RuleAdded { rule })
            }
            Statement::Clause(clause) => {
                self.signature.check_clause(&clause)?;
                self.clauses.push(clause.clone());
                Ok(ExecResult::ClauseAdded { clause })
            }
            Statement::Query(query) => {
                self.signature.check_atom(&query)?;
                Ok(self.chain(Some(query)))
            }
            Statement::Directive(directive) => self.apply_directive(directive),
        }
    }

    /// Apply a directive.
    pub fn apply_directive(&mut self, directive: Directive) -> Result<ExecResult, SessionError> {
        match directive {
            Directive::Load(path) => self.load_file(&path),
            Directive::Set(setting) => Ok(self.apply_setting(setting)),
            Directive::Chain => Ok(self.chain(None)),
            Directive::Refute => {
                let report = refute(&self.clause_set(), &self.refutation_config);
                Ok(ExecResult::Refuted { report })
            }
            Directive::Prove(goal) => {
                self.signature.check_atom(&goal)?;
                let report = prove(&self.clause_set(), &goal, &self.refutation_config);
                Ok(ExecResult::Refuted { report })
            }
            Directive::Unify(left, right) => Ok(ExecResult::Unified(unify_report(left, right))),
            Directive::Show => Ok(ExecResult::Shown {
                facts: self.kb.facts().to_vec(),
                rules: self.kb.rules().to_vec(),
                clauses: self.clauses.clone(),
            }),
            Directive::Quit => Ok(ExecResult::Quit),
        }
    }

    /// Read a program file and execute it.
    ///
    /// Relative paths inside a loaded file resolve against that file's
    /// directory.
    pub fn load_file(&mut self, path: &str) -> Result<ExecResult, SessionError> {
        let resolved = match self.loading.last().and_then(|p| p.parent()) {
            Some(dir) if Path::new(path).is_relative() => dir.join(path),
            _ => PathBuf::from(path),
        };
        if self.loading.contains(&resolved) {
            return Err(SessionError::RecursiveLoad(resolved.display().to_string()));
        }
        let source = std::fs::read_to_string(&resolved).map_err(|source| SessionError::Io {
            path: resolved.display().to_string(),
            source,
        })?;
        info!("Loading {}", resolved.display());

        self.loading.push(resolved);
        let results = self.execute_source(&source);
        self.loading.pop();
        Ok(ExecResult::Loaded {
            path: path.to_string(),
            results: results?,
        })
    }

    /// Update the configuration from a key/value pair.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<ExecResult, SessionError> {
        let setting =
            Setting::from_key_value(key, value).map_err(SessionError::InvalidSetting)?;
        Ok(self.apply_setting(setting))
    }

    fn apply_setting(&mut self, setting: Setting) -> ExecResult {
        debug!("Setting {} = {}", setting.key(), setting.value());
        let (key, value) = (setting.key().to_string(), setting.value());
        match setting {
            Setting::MaxIterations(n) => self.chain_config.max_iterations = n,
            Setting::MaxSteps(n) => self.refutation_config.max_steps = n,
            Setting::Trace(on) => self.trace = on,
        }
        ExecResult::SettingApplied { key, value }
    }

    fn chain(&mut self, query: Option<Atom>) -> ExecResult {
        let seen = self.kb.log().len();
        let report = self.kb.forward_chain(query.as_ref(), &self.chain_config);
        let log = self.kb.log()[seen..].to_vec();
        ExecResult::Chained { query, report, log }
    }

    /// Clauses handed to resolution: the explicit clauses, then every rule
    /// and fact of the knowledge base in clause form.
    pub fn clause_set(&self) -> Vec<Clause> {
        let rules = self.kb.rules().iter().map(Rule::to_clause);
        let facts = self
            .kb
            .facts()
            .iter()
            .map(|f| Clause::new(vec![Literal::positive(f.clone())]));
        self.clauses.iter().cloned().chain(rules).chain(facts).collect()
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain_config
    }

    pub fn refutation_config(&self) -> &RefutationConfig {
        &self.refutation_config
    }

    /// Predicate arities declared so far.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether results are rendered with their full logs and traces.
    pub fn trace(&self) -> bool {
        self.trace
    }
}

fn unify_report(left: Term, right: Term) -> UnifyReport {
    let (result, trace) = unify_traced(&left, &right, &Substitution::empty());
    let (unifier, error) = match result {
        UnifyResult::Success(subst) => (Some(subst.resolved()), None),
        UnifyResult::Failure(err) => (None, Some(err.to_string())),
    };
    UnifyReport {
        left,
        right,
        unifier,
        error,
        trace: trace.lines(),
    }
}

impl ExecResult {
    /// Human-readable rendering; `verbose` adds derivation logs and traces.
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_to(&mut out, verbose);
        out.trim_end().to_string()
    }

    fn write_to(&self, out: &mut String, verbose: bool) -> std::fmt::Result {
        match self {
            ExecResult::FactAdded { fact, new: true } => writeln!(out, "Added fact {}.", fact),
            ExecResult::FactAdded { fact, new: false } => {
                writeln!(out, "Fact {} is already known.", fact)
            }
            ExecResult::RuleAdded { rule } => writeln!(out, "Added rule {}.", rule),
            ExecResult::ClauseAdded { clause } => writeln!(out, "Added clause {}.", clause),
            ExecResult::Chained { query, report, log } => {
                if verbose {
                    for line in log {
                        writeln!(out, "{}", line)?;
                    }
                } else {
                    for fact in &report.derived {
                        writeln!(out, "Derived {}", fact)?;
                    }
                }
                write_chain_summary(out, query.as_ref(), report)
            }
            ExecResult::Refuted { report } => {
                if verbose {
                    return writeln!(out, "{}", report);
                }
                let proof: Vec<_> = report.proof().into_iter().cloned().collect();
                if !proof.is_empty() {
                    write!(out, "{}", derivation_table(&proof))?;
                }
                writeln!(
                    out,
                    "Result: {} ({} steps, {} rounds)",
                    report.outcome, report.steps, report.rounds
                )
            }
            ExecResult::Unified(report) => {
                if verbose {
                    for line in &report.trace {
                        writeln!(out, "{}", line)?;
                    }
                }
                match (&report.unifier, &report.error) {
                    (Some(bindings), _) if bindings.is_empty() => {
                        writeln!(out, "Unifiable with the empty substitution.")
                    }
                    (Some(bindings), _) => {
                        let shown: Vec<String> = bindings
                            .iter()
                            .map(|(v, t)| format!("{} ↦ {}", v, t))
                            .collect();
                        writeln!(out, "Unifier: {{{}}}", shown.join(", "))
                    }
                    (None, Some(err)) => writeln!(out, "Not unifiable: {}", err),
                    (None, None) => writeln!(out, "Not unifiable."),
                }
            }
            ExecResult::Shown {
                facts,
                rules,
                clauses,
            } => {
                writeln!(out, "Facts ({}):", facts.len())?;
                for fact in facts {
                    writeln!(out, "  {}", fact)?;
                }
                writeln!(out, "Rules ({}):", rules.len())?;
                for rule in rules {
                    writeln!(out, "  {}", rule)?;
                }
                writeln!(out, "Clauses ({}):", clauses.len())?;
                for clause in clauses {
                    writeln!(out, "  {}", clause)?;
                }
                Ok(())
            }
            ExecResult::SettingApplied { key, value } => writeln!(out, "{} = {}", key, value),
            ExecResult::Loaded { path, results } => {
                for result in results {
                    result.write_to(out, verbose)?;
                }
                writeln!(out, "Loaded {} ({} statements).", path, results.len())
            }
            ExecResult::Quit => Ok(()),
        }
    }
}

fn write_chain_summary(
    out: &mut String,
    query: Option<&Atom>,
    report: &ChainReport,
) -> std::fmt::Result {
    let budget = if report.budget_exhausted {
        ", iteration budget exhausted"
    } else {
        ""
    };
    match (query, &report.witness) {
        (Some(q), Some(w)) => writeln!(
            out,
            "Yes: {} is entailed by {} ({} rounds).",
            q, w, report.rounds
        ),
        (Some(q), None) => writeln!(
            out,
            "No: {} is not entailed ({} rounds{}).",
            q, report.rounds, budget
        ),
        (None, _) => writeln!(
            out,
            "Derived {} new facts in {} rounds{}.",
            report.derived.len(),
            report.rounds,
            budget
        ),
    }
}
