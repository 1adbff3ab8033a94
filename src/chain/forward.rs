//! Forward chaining to a fixed point.

use std::collections::{HashMap, HashSet};

use log::{debug, info, trace};
use serde::Serialize;

use super::knowledge_base::match_query;
use super::KnowledgeBase;
use crate::syntax::{Atom, Rule, Var};
use crate::unify::{unify_atoms, Substitution, UnifyResult};

/// Configuration for forward chaining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainConfig {
    /// Maximum number of rounds over the rule list.
    pub max_iterations: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            max_iterations: 1000,
        }
    }
}

/// How a forward-chaining run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainOutcome {
    /// Some fact unifies with the query.
    Entailed,
    /// No fact unifies with the query. If the round budget ran out this only
    /// means "not proven yet".
    NotEntailed,
    /// No query was given and a round added nothing.
    FixedPoint,
    /// No query was given and the round budget ran out first.
    BudgetExhausted,
}

/// Summary of one forward-chaining run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub outcome: ChainOutcome,
    /// Rounds started during this run.
    pub rounds: usize,
    /// Facts added during this run, in order.
    pub derived: Vec<Atom>,
    /// The fact that answered the query, if any.
    pub witness: Option<Atom>,
    /// True if the run stopped because `max_iterations` was reached.
    pub budget_exhausted: bool,
}

impl ChainReport {
    pub fn is_entailed(&self) -> bool {
        self.outcome == ChainOutcome::Entailed
    }
}

/// One way of satisfying every antecedent of a rule.
struct Firing {
    subst: Substitution,
    premises: Vec<usize>,
}

impl KnowledgeBase {
    /// Apply the rules until nothing new follows, the query is answered, or
    /// the round budget is spent.
    ///
    /// Each round renames every rule apart, matches its antecedents against
    /// the facts with the same predicate and arity, and adds the instantiated
    /// consequent of every full match. Consequent variables that no
    /// antecedent binds get fresh generations on every firing. Facts added by
    /// one rule are visible to the rules after it in the same round.
    pub fn forward_chain(&mut self, query: Option<&Atom>, config: &ChainConfig) -> ChainReport {
        info!(
            "Forward chaining over {} facts and {} rules{}",
            self.facts.len(),
            self.rules.len(),
            query.map(|q| format!(", query {}", q)).unwrap_or_default()
        );
        let start = self.facts.len();

        if let Some(q) = query {
            if let Some(witness) = self.find_match(q).cloned() {
                debug!("Query {} already answered by {}", q, witness);
                return self.report(ChainOutcome::Entailed, 0, start, Some(witness), false);
            }
        }

        let mut rounds = 0;
        let mut fixed_point = false;
        while rounds < config.max_iterations {
            rounds += 1;
            let mut productive = false;

            for rule_index in 0..self.rules.len() {
                let renamed = self.renamer.rename_rule(&self.rules[rule_index]);
                let existential = renamed.existential_variables();
                for firing in self.match_rule(&renamed) {
                    let inferred = renamed.consequent.apply_subst(&firing.subst);
                    let inferred = self.freshen(&inferred, &existential);
                    let source = self.describe_firing(rule_index, &firing);
                    if !self.add_fact(inferred.clone(), source) {
                        continue;
                    }
                    productive = true;
                    if let Some(q) = query {
                        if match_query(&inferred, q).is_some() {
                            info!("Query {} entailed in round {}", q, rounds);
                            return self.report(
                                ChainOutcome::Entailed,
                                rounds,
                                start,
                                Some(inferred),
                                false,
                            );
                        }
                    }
                }
            }

            debug!("Round {} done, {} facts", rounds, self.facts.len());
            if !productive {
                fixed_point = true;
                break;
            }
        }

        let budget_exhausted = !fixed_point;
        let (outcome, witness) = match query {
            Some(q) => match self.find_match(q).cloned() {
                Some(w) => (ChainOutcome::Entailed, Some(w)),
                None => (ChainOutcome::NotEntailed, None),
            },
            None if fixed_point => (ChainOutcome::FixedPoint, None),
            None => (ChainOutcome::BudgetExhausted, None),
        };
        info!(
            "Forward chaining stopped after {} rounds: {:?}",
            rounds, outcome
        );
        self.report(outcome, rounds, start, witness, budget_exhausted)
    }

    /// All combinations of facts that satisfy the antecedents of an already
    /// renamed rule, in lexicographic order of the per-antecedent candidate
    /// lists.
    ///
    /// The candidate lists are fixed before matching starts, so facts added
    /// while this rule fires wait for the next rule or round.
    fn match_rule(&self, rule: &Rule) -> Vec<Firing> {
        let candidates: Vec<Vec<usize>> = rule
            .antecedents
            .iter()
            .map(|ant| self.candidates(ant))
            .collect();
        if candidates.iter().any(Vec::is_empty) {
            return Vec::new();
        }

        let mut firings = Vec::new();
        let mut chosen = Vec::with_capacity(candidates.len());
        self.extend_match(
            &rule.antecedents,
            &candidates,
            Substitution::empty(),
            &mut chosen,
            &mut firings,
        );
        firings
    }

    /// Depth-first walk of the candidate product. A pair that fails to unify
    /// prunes every combination sharing that prefix.
    fn extend_match(
        &self,
        antecedents: &[Atom],
        candidates: &[Vec<usize>],
        subst: Substitution,
        chosen: &mut Vec<usize>,
        firings: &mut Vec<Firing>,
    ) {
        let depth = chosen.len();
        if depth == antecedents.len() {
            firings.push(Firing {
                subst,
                premises: chosen.clone(),
            });
            return;
        }
        for &index in &candidates[depth] {
            match unify_atoms(&antecedents[depth], &self.facts[index], &subst) {
                UnifyResult::Success(next) => {
                    chosen.push(index);
                    self.extend_match(antecedents, candidates, next, chosen, firings);
                    chosen.pop();
                }
                UnifyResult::Failure(err) => {
                    trace!(
                        "{} does not match {}: {}",
                        antecedents[depth],
                        self.facts[index],
                        err
                    );
                }
            }
        }
    }

    /// Give each of `vars` occurring in `atom` a fresh generation.
    fn freshen(&mut self, atom: &Atom, vars: &HashSet<Var>) -> Atom {
        if vars.is_empty() {
            return atom.clone();
        }
        let renamer = &mut self.renamer;
        let mut mapping: HashMap<Var, Var> = HashMap::new();
        atom.map_vars(&mut |v| {
            if !vars.contains(v) {
                return v.clone();
            }
            mapping
                .entry(v.clone())
                .or_insert_with(|| renamer.fresh(v))
                .clone()
        })
    }

    fn describe_firing(&self, rule_index: usize, firing: &Firing) -> String {
        let premises: Vec<String> = firing
            .premises
            .iter()
            .map(|&i| self.facts[i].to_string())
            .collect();
        format!(
            "from rule {} using {}",
            self.rules[rule_index],
            premises.join(", ")
        )
    }

    fn report(
        &self,
        outcome: ChainOutcome,
        rounds: usize,
        start: usize,
        witness: Option<Atom>,
        budget_exhausted: bool,
    ) -> ChainReport {
        ChainReport {
            outcome,
            rounds,
            derived: self.facts[start..].to_vec(),
            witness,
            budget_exhausted,
        }
    }
}
