//! Parsed statements.

use crate::syntax::{Atom, Clause, Rule, Term};

/// A statement in a program file or REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A ground or partially ground fact: `Missile(M1).`
    Fact(Atom),
    /// A Horn rule: `Missile(x) => Weapon(x).`
    Rule(Rule),
    /// A clause for refutation: `clause -Food(x) ∨ Likes(John, x).`
    Clause(Clause),
    /// A forward-chaining query: `?- Criminal(Robert).`
    Query(Atom),
    Directive(Directive),
}

/// A directive: `:name args.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Read and execute another program file.
    Load(String),
    /// Set a configuration option.
    Set(Setting),
    /// Forward-chain the knowledge base to a fixed point.
    Chain,
    /// Run resolution refutation over the clause set.
    Refute,
    /// Refute the clause set together with the negated atom.
    Prove(Atom),
    /// Unify two terms and show the trace.
    Unify(Term, Term),
    /// List facts, rules and clauses.
    Show,
    Quit,
}

/// Configuration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    MaxIterations(usize),
    MaxSteps(usize),
    /// Print unifier traces and derivation logs after each command.
    Trace(bool),
}

impl Setting {
    /// Interpret `:set key value`; the error is a message for the user.
    pub fn from_key_value(key: &str, value: &str) -> Result<Setting, String> {
        let invalid = || format!("invalid {} value: {}", key, value);
        match key {
            "max_iterations" => value
                .parse()
                .map(Setting::MaxIterations)
                .map_err(|_| invalid()),
            "max_steps" => value.parse().map(Setting::MaxSteps).map_err(|_| invalid()),
            "trace" => match value {
                "on" | "true" => Ok(Setting::Trace(true)),
                "off" | "false" => Ok(Setting::Trace(false)),
                _ => Err(invalid()),
            },
            _ => Err(format!("unknown setting: {}", key)),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Setting::MaxIterations(_) => "max_iterations",
            Setting::MaxSteps(_) => "max_steps",
            Setting::Trace(_) => "trace",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Setting::MaxIterations(n) | Setting::MaxSteps(n) => n.to_string(),
            Setting::Trace(on) => (if *on { "on" } else { "off" }).to_string(),
        }
    }
}
