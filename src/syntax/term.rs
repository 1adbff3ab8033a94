//! First-order terms: variables, constants and function applications.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::unify::Substitution;

/// A variable in first-order logic.
///
/// In the surface syntax variables are lowercase-led names (`x`, `p`, `t1`).
/// The parser decides variable-ness once; afterwards a `Var` is identified by
/// its name together with a generation. Variables written by the user have
/// generation 0, variables minted by a [`Renamer`](crate::unify::Renamer)
/// carry a fresh non-zero generation, so renamed copies never collide with
/// user variables of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Var {
    name: String,
    generation: u32,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var {
            name: name.into(),
            generation: 0,
        }
    }

    /// A variable with an explicit generation, as produced by renaming.
    pub fn with_generation(name: impl Into<String>, generation: u32) -> Self {
        Var {
            name: name.into(),
            generation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// True for variables that came from a renaming rather than user input.
    pub fn is_renamed(&self) -> bool {
        self.generation != 0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}_{}", self.name, self.generation)
        }
    }
}

/// An atomic symbol, equal only to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Constant {
    name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A function symbol with its arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FnSym {
    pub name: String,
    pub arity: usize,
}

impl FnSym {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FnSym {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for FnSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A first-order term.
///
/// In prefix-functional syntax:
/// - Variables: `x`, `p`, `t1` (lowercase-led)
/// - Constants: `Robert`, `A`, `America`
/// - Applications: `f(x, g(y))`, `mother(John)`
///
/// A zero-argument application `f()` is a compound term and is distinct from
/// the constant `f`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Term {
    /// A variable
    Var(Var),
    /// An atomic constant
    Const(Constant),
    /// Function application: f(t1, ..., tn)
    App(FnSym, Vec<Term>),
}

impl Term {
    /// Create a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(Var::new(name))
    }

    /// Create a constant term.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Const(Constant::new(name))
    }

    /// Create a function application term.
    pub fn app(name: impl Into<String>, args: Vec<Term>) -> Self {
        let arity = args.len();
        Term::App(FnSym::new(name, arity), args)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Collect all variables occurring in this term.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        self.collect_variables(&mut set);
        set
    }

    pub(crate) fn collect_variables(&self, set: &mut HashSet<Var>) {
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            match term {
                Term::Var(var) => {
                    set.insert(var.clone());
                }
                Term::Const(_) => {}
                Term::App(_, args) => stack.extend(args.iter()),
            }
        }
    }

    /// Check if this term contains no variables (is ground).
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::App(_, args) => args.iter().all(|arg| arg.is_ground()),
        }
    }

    /// Apply a substitution to this term.
    pub fn apply_subst(&self, subst: &Substitution) -> Term {
        subst.apply_to_term(self)
    }

    /// Get the root symbol of this term (function name or constant name).
    /// Returns None for variables.
    pub fn root_symbol(&self) -> Option<&str> {
        match self {
            Term::Var(_) => None,
            Term::Const(c) => Some(c.name()),
            Term::App(fn_sym, _) => Some(&fn_sym.name),
        }
    }

    /// Check if a variable occurs syntactically in this term.
    ///
    /// This does not look through any bindings; see
    /// [`Substitution::occurs`] for the dereferencing check used by unification.
    pub fn occurs(&self, var: &Var) -> bool {
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            match term {
                Term::Var(v) if v == var => return true,
                Term::Var(_) | Term::Const(_) => {}
                Term::App(_, args) => stack.extend(args.iter()),
            }
        }
        false
    }

    /// Rename every variable in this term through `rename`.
    pub(crate) fn map_vars(&self, rename: &mut impl FnMut(&Var) -> Var) -> Term {
        match self {
            Term::Var(v) => Term::Var(rename(v)),
            Term::Const(_) => self.clone(),
            Term::App(sym, args) => {
                Term::App(sym.clone(), args.iter().map(|a| a.map_vars(rename)).collect())
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => write!(f, "{}", var),
            Term::Const(c) => write!(f, "{}", c),
            Term::App(fn_sym, args) => {
                write!(f, "{}(", fn_sym.name)?;
                write_args(f, args)?;
                write!(f, ")")
            }
        }
    }
}

/// Write a comma-separated argument list.
pub(crate) fn write_args(f: &mut fmt::Formatter<'_>, args: &[Term]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}
