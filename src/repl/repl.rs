//! REPL implementation.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::session::{ExecResult, Session, SessionError};

const HELP: &str = "\
Statements end with '.':
  P(A).                          add a fact
  P(x) ∧ Q(x) => R(x).           add a rule
  clause ¬P(x) ∨ Q(x).           add a clause
  ?- R(A).                       forward-chain until R(A) is known
Directives:
  :chain.                        forward-chain to a fixed point
  :refute.                       resolution refutation over all clauses
  :prove R(A).                   refute the clauses plus ¬R(A)
  :unify f(x, A) = f(B, y).      unify two terms
  :set max_iterations|max_steps N.   :set trace on|off.
  :load \"file\".  :show.  :quit.";

/// REPL error.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interactive REPL over a [`Session`].
///
/// Input is buffered until it ends with `.`, so a statement may span
/// several lines.
#[derive(Debug, Default)]
pub struct Repl {
    session: Session,
    pending: String,
    done: bool,
}

impl Repl {
    pub fn new() -> Self {
        Repl::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether `:quit` has been executed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Process a line of input.
    ///
    /// Returns the rendered results of every statement the line completed,
    /// or an empty string while a statement is still incomplete.
    pub fn process_line(&mut self, line: &str) -> Result<String, ReplError> {
        let trimmed = line.trim();
        if self.pending.is_empty() && (trimmed == ":help" || trimmed == ":help.") {
            return Ok(HELP.to_string());
        }

        self.pending.push_str(line);
        self.pending.push('\n');
        if !statement_complete(&self.pending) {
            return Ok(String::new());
        }

        let source = std::mem::take(&mut self.pending);
        let results = self.session.execute_source(&source)?;
        if results.iter().any(|r| matches!(r, ExecResult::Quit)) {
            self.done = true;
        }
        Ok(self.render(&results))
    }

    /// Run the REPL interactively.
    pub fn run(&mut self) -> Result<(), ReplError> {
        self.run_with(std::io::stdin().lock(), std::io::stdout())
    }

    /// Run against arbitrary input and output streams.
    ///
    /// Statement errors are reported on the output and do not end the loop.
    pub fn run_with(&mut self, input: impl BufRead, mut output: impl Write) -> Result<(), ReplError> {
        write_prompt(&mut output, self.pending.is_empty())?;
        for line in input.lines() {
            let line = line?;
            match self.process_line(&line) {
                Ok(text) if !text.is_empty() => writeln!(output, "{}", text)?,
                Ok(_) => {}
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
            if self.done {
                return Ok(());
            }
            write_prompt(&mut output, self.pending.is_empty())?;
        }
        Ok(())
    }

    fn render(&self, results: &[ExecResult]) -> String {
        results
            .iter()
            .map(|r| r.render(self.session.trace()))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn write_prompt(output: &mut impl Write, fresh: bool) -> std::io::Result<()> {
    write!(output, "{}", if fresh { "?> " } else { ".. " })?;
    output.flush()
}

/// Whether the buffered input ends with a statement terminator, ignoring
/// trailing whitespace and `//` comments.
fn statement_complete(buffer: &str) -> bool {
    buffer
        .lines()
        .map(|line| match line.find("//") {
            Some(i) => &line[..i],
            None => line,
        })
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .last()
        .map_or(false, |line| line.ends_with('.'))
}
