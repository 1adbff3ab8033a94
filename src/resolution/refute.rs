//! Saturation-style resolution refutation.

use log::{debug, info, trace};
use serde::Serialize;

use super::registry::{ClauseId, ClauseRegistry};
use super::resolve::{negate_goal, resolve};
use crate::syntax::{Atom, Clause, Literal};

/// Limits for a refutation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefutationConfig {
    /// Candidate resolvents examined before the run gives up.
    pub max_steps: usize,
}

impl Default for RefutationConfig {
    fn default() -> Self {
        RefutationConfig { max_steps: 10_000 }
    }
}

/// How a refutation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefutationOutcome {
    /// The empty clause was derived; the input set is unsatisfiable.
    Contradiction,
    /// A full round produced no new clause; no contradiction exists among
    /// the clauses reachable by this procedure.
    Saturated,
    /// The step budget ran out first.
    Inconclusive,
}

/// One newly registered clause and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationRow {
    pub derived: ClauseId,
    pub left: ClauseId,
    pub right: ClauseId,
    /// Literal of `left` that was resolved away.
    pub resolved: Literal,
    pub clause: Clause,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefutationReport {
    pub outcome: RefutationOutcome,
    /// Candidate resolvents examined.
    pub steps: usize,
    pub rounds: usize,
    /// Every registered clause in id order, inputs first.
    pub clauses: Vec<Clause>,
    pub derivations: Vec<DerivationRow>,
    pub log: Vec<String>,
}

impl RefutationReport {
    pub fn is_contradiction(&self) -> bool {
        self.outcome == RefutationOutcome::Contradiction
    }

    pub fn clause(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(id.index())
    }

    /// The derivations the empty clause depends on, in derivation order.
    ///
    /// Empty unless the run found a contradiction.
    pub fn proof(&self) -> Vec<&DerivationRow> {
        let mut needed = Vec::new();
        let mut stack: Vec<ClauseId> = self
            .derivations
            .iter()
            .find(|row| row.clause.is_empty())
            .map(|row| vec![row.derived])
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            if needed.contains(&id) {
                continue;
            }
            if let Some(row) = self.derivations.iter().find(|row| row.derived == id) {
                needed.push(id);
                stack.push(row.left);
                stack.push(row.right);
            }
        }
        self.derivations
            .iter()
            .filter(|row| needed.contains(&row.derived))
            .collect()
    }
}

/// State of one refutation run.
struct Saturation {
    registry: ClauseRegistry,
    derivations: Vec<DerivationRow>,
    log: Vec<String>,
    steps: usize,
    rounds: usize,
}

impl Saturation {
    fn finish(self, outcome: RefutationOutcome) -> RefutationReport {
        info!(
            "Refutation finished: {:?} after {} steps in {} rounds",
            outcome, self.steps, self.rounds
        );
        RefutationReport {
            outcome,
            steps: self.steps,
            rounds: self.rounds,
            clauses: self.registry.into_clauses(),
            derivations: self.derivations,
            log: self.log,
        }
    }

    /// Resolve one pair and register what is new.
    ///
    /// Returns `Some(outcome)` when the run must stop.
    fn resolve_pair(
        &mut self,
        left: ClauseId,
        right: ClauseId,
        config: &RefutationConfig,
        productive: &mut bool,
    ) -> Option<RefutationOutcome> {
        let (a, b) = match (self.registry.get(left), self.registry.get(right)) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => return None,
        };
        for resolvent in resolve(&a, &b) {
            if self.steps >= config.max_steps {
                self.log.push(format!(
                    "Step budget of {} exhausted without a contradiction",
                    config.max_steps
                ));
                return Some(RefutationOutcome::Inconclusive);
            }
            self.steps += 1;

            if resolvent.clause.is_tautology() {
                trace!("Dropping tautology {}", resolvent.clause);
                continue;
            }
            let clause = resolvent.clause.canonical();
            let (derived, new) = self.registry.register(clause.clone());
            if !new {
                trace!("{} is already {}", clause, derived);
                continue;
            }
            *productive = true;

            self.log.push(format!(
                "Step {}: resolve {} and {} on {}",
                self.steps, left, right, resolvent.pivot
            ));
            self.log.push(format!("  derived {}: {}", derived, clause));
            debug!("{} = resolve({}, {}) = {}", derived, left, right, clause);

            let empty = clause.is_empty();
            self.derivations.push(DerivationRow {
                derived,
                left,
                right,
                resolved: resolvent.pivot,
                clause,
            });
            if empty {
                self.log
                    .push("Contradiction found: derived the empty clause".to_string());
                return Some(RefutationOutcome::Contradiction);
            }
        }
        None
    }
}

/// Search for the empty clause by repeated pairwise resolution.
///
/// The input clauses are registered as `C1`, `C2`, ... in order. Each round
/// takes a snapshot of the registry and resolves every unordered pair of
/// distinct snapshot clauses, skipping pairs in which both clauses were
/// already present in the previous round's snapshot. Every candidate
/// resolvent costs one step. Tautologies and clauses already registered
/// (up to variable renaming) are dropped; anything else is registered and
/// logged. The run stops at the first empty clause, after a round that
/// registers nothing, or when the step budget is spent.
pub fn refute(clauses: &[Clause], config: &RefutationConfig) -> RefutationReport {
    let mut run = Saturation {
        registry: ClauseRegistry::new(),
        derivations: Vec::new(),
        log: Vec::new(),
        steps: 0,
        rounds: 0,
    };
    for clause in clauses {
        let (id, new) = run.registry.register(clause.clone());
        if new {
            debug!("Input {}: {}", id, clause);
        }
    }
    if run.registry.iter().any(|(_, c)| c.is_empty()) {
        run.log
            .push("Input already contains the empty clause".to_string());
        return run.finish(RefutationOutcome::Contradiction);
    }

    // Pairs of clauses below this index were resolved in an earlier round.
    let mut settled = 0;
    loop {
        run.rounds += 1;
        let snapshot = run.registry.len();
        let mut productive = false;
        debug!("Resolution round {} over {} clauses", run.rounds, snapshot);

        for i in 0..snapshot {
            for j in (i + 1)..snapshot {
                if j < settled {
                    continue;
                }
                if let Some(outcome) =
                    run.resolve_pair(ClauseId(i), ClauseId(j), config, &mut productive)
                {
                    return run.finish(outcome);
                }
            }
        }

        settled = snapshot;
        if !productive {
            let line = format!(
                "Saturated after {} rounds: no new clauses, no contradiction",
                run.rounds
            );
            run.log.push(line);
            return run.finish(RefutationOutcome::Saturated);
        }
    }
}

/// Refute `axioms` together with the negation of `goal`.
///
/// A contradiction means `goal` follows from the axioms.
pub fn prove(axioms: &[Clause], goal: &Atom, config: &RefutationConfig) -> RefutationReport {
    let mut clauses = axioms.to_vec();
    clauses.push(negate_goal(goal));
    refute(&clauses, config)
}
