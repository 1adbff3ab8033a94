//! Recursive-descent parser for programs, statements and terms.

use thiserror::Error;

use super::ast::{Directive, Setting, Statement};
use super::lexer::{LexError, Lexer, Spanned, Token};
use crate::syntax::{ArityError, Atom, Clause, Literal, Rule, Signature, Term};

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    /// A predicate was used with two different arities.
    #[error("{line}:{column}: {source}")]
    Arity {
        source: ArityError,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::Arity { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { column, .. } | ParseError::Arity { column, .. } => *column,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Syntax {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// Parser state over a fully lexed input.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Parser { tokens, pos: 0 })
    }

    fn spanned(&self) -> &Spanned {
        // tokenize() always ends with Eof and advance() never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current(&self) -> &Token {
        &self.spanned().token
    }

    fn peek(&self) -> &Token {
        let next = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[next].token
    }

    fn position(&self) -> (usize, usize) {
        let s = self.spanned();
        (s.line, s.column)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token != Token::Eof {
            self.pos += 1;
        }
        token
    }

    fn at(&self, token: &Token) -> bool {
        self.current() == token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ParseError> {
        if self.at(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected {}, found {}", what, describe(self.current()))))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("expected {}, found {}", what, describe(other)))),
        }
    }

    fn error(&self, message: String) -> ParseError {
        let (line, column) = self.position();
        ParseError::Syntax {
            message,
            line,
            column,
        }
    }

    /// Accept an optional final `.` and require end of input.
    fn finish(&mut self) -> Result<(), ParseError> {
        if self.at(&Token::Dot) {
            self.advance();
        }
        if self.at(&Token::Eof) {
            Ok(())
        } else {
            Err(self.error(format!("unexpected {}", describe(self.current()))))
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Identifier(name) => format!("'{}'", name),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::Not => "negation".to_string(),
        Token::And => "'∧'".to_string(),
        Token::Or => "'∨'".to_string(),
        Token::Implies => "'=>'".to_string(),
        Token::Bottom => "'⊥'".to_string(),
        Token::Equals => "'='".to_string(),
        Token::Query => "'?-'".to_string(),
        Token::Colon => "':'".to_string(),
        Token::StringLit(s) => format!("\"{}\"", s),
        Token::Eof => "end of input".to_string(),
    }
}

/// Whether a bare name denotes a variable: it starts with a lowercase letter
/// or an underscore.
pub fn is_variable_name(name: &str) -> bool {
    name.chars()
        .next()
        .map_or(false, |c| c.is_lowercase() || c == '_')
}

/// Parse a program, checking that every predicate keeps a single arity.
pub fn parse_program(source: &str) -> Result<Vec<Statement>, ParseError> {
    parse_program_with(source, &mut Signature::empty())
}

/// Parse a program against an existing signature, extending it.
pub fn parse_program_with(
    source: &str,
    signature: &mut Signature,
) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::new(source)?;
    let mut statements = Vec::new();

    while !parser.at(&Token::Eof) {
        let (line, column) = parser.position();
        let stmt = parse_statement(&mut parser)?;
        check_arity(&stmt, signature).map_err(|source| ParseError::Arity {
            source,
            line,
            column,
        })?;
        statements.push(stmt);
    }

    Ok(statements)
}

fn check_arity(stmt: &Statement, signature: &mut Signature) -> Result<(), ArityError> {
    match stmt {
        Statement::Fact(atom) | Statement::Query(atom) => signature.check_atom(atom),
        Statement::Rule(rule) => signature.check_rule(rule),
        Statement::Clause(clause) => signature.check_clause(clause),
        Statement::Directive(Directive::Prove(atom)) => signature.check_atom(atom),
        Statement::Directive(_) => Ok(()),
    }
}

/// Parse a term such as `f(x, g(y))`.
pub fn parse_term(source: &str) -> Result<Term, ParseError> {
    let mut parser = Parser::new(source)?;
    let term = parse_term_inner(&mut parser)?;
    parser.finish()?;
    Ok(term)
}

/// Parse an atom such as `Owns(A, t1)` or `Alive_Anil`.
pub fn parse_atom(source: &str) -> Result<Atom, ParseError> {
    let mut parser = Parser::new(source)?;
    let atom = parse_atom_inner(&mut parser)?;
    parser.finish()?;
    Ok(atom)
}

/// Parse a rule such as `Missile(x) ∧ Owns(A, x) => Sells(Robert, x, A)`.
pub fn parse_rule(source: &str) -> Result<Rule, ParseError> {
    let mut parser = Parser::new(source)?;
    let (line, column) = parser.position();
    let rule = match parse_fact_or_rule(&mut parser)? {
        Statement::Rule(rule) => rule,
        _ => {
            return Err(ParseError::Syntax {
                message: "expected a rule with '=>'".to_string(),
                line,
                column,
            })
        }
    };
    parser.finish()?;
    Ok(rule)
}

/// Parse a clause body such as `¬Food(x) ∨ Likes(John, x)` or `⊥`.
pub fn parse_clause(source: &str) -> Result<Clause, ParseError> {
    let mut parser = Parser::new(source)?;
    let clause = parse_clause_body(&mut parser)?;
    parser.finish()?;
    Ok(clause)
}

fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let stmt = match parser.current() {
        Token::Colon => parse_directive(parser)?,
        Token::Query => {
            parser.advance();
            Statement::Query(parse_atom_inner(parser)?)
        }
        Token::Identifier(s) if s == "clause" && starts_clause_body(parser.peek()) => {
            parser.advance();
            Statement::Clause(parse_clause_body(parser)?)
        }
        _ => parse_fact_or_rule(parser)?,
    };
    parser.expect(Token::Dot, "'.' at end of statement")?;
    Ok(stmt)
}

/// `clause` is a keyword only where it cannot be a predicate name.
fn starts_clause_body(next: &Token) -> bool {
    matches!(next, Token::Identifier(_) | Token::Not | Token::Bottom)
}

fn parse_directive(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(Token::Colon, "':'")?;
    let name = parser.expect_identifier("directive name after ':'")?;

    let directive = match name.as_str() {
        "load" => match parser.current() {
            Token::StringLit(path) => {
                let path = path.clone();
                parser.advance();
                Directive::Load(path)
            }
            _ => return Err(parser.error("expected string literal after :load".to_string())),
        },
        "set" => Directive::Set(parse_setting(parser)?),
        "chain" => Directive::Chain,
        "refute" => Directive::Refute,
        "prove" => Directive::Prove(parse_atom_inner(parser)?),
        "unify" => {
            let left = parse_term_inner(parser)?;
            parser.expect(Token::Equals, "'=' between the terms to unify")?;
            let right = parse_term_inner(parser)?;
            Directive::Unify(left, right)
        }
        "show" => Directive::Show,
        "quit" => Directive::Quit,
        _ => return Err(parser.error(format!("unknown directive: {}", name))),
    };
    Ok(Statement::Directive(directive))
}

fn parse_setting(parser: &mut Parser) -> Result<Setting, ParseError> {
    let key = parser.expect_identifier("setting name after :set")?;
    let (line, column) = parser.position();
    let value = parser.expect_identifier("setting value after setting name")?;
    Setting::from_key_value(&key, &value).map_err(|message| ParseError::Syntax {
        message,
        line,
        column,
    })
}

/// A fact `A.` or a rule `A1 ∧ ... ∧ An => C.`
fn parse_fact_or_rule(parser: &mut Parser) -> Result<Statement, ParseError> {
    let mut atoms = vec![parse_atom_inner(parser)?];
    while parser.at(&Token::And) {
        parser.advance();
        atoms.push(parse_atom_inner(parser)?);
    }

    if parser.at(&Token::Implies) {
        parser.advance();
        let consequent = parse_atom_inner(parser)?;
        return Ok(Statement::Rule(Rule::new(atoms, consequent)));
    }

    match atoms.pop() {
        Some(atom) if atoms.is_empty() => Ok(Statement::Fact(atom)),
        _ => Err(parser.error(
            "expected '=>' after a conjunction; state facts separately".to_string(),
        )),
    }
}

fn parse_clause_body(parser: &mut Parser) -> Result<Clause, ParseError> {
    if parser.at(&Token::Bottom) {
        parser.advance();
        return Ok(Clause::empty());
    }

    let mut literals = vec![parse_literal(parser)?];
    while parser.at(&Token::Or) {
        parser.advance();
        literals.push(parse_literal(parser)?);
    }
    Ok(Clause::new(literals))
}

fn parse_literal(parser: &mut Parser) -> Result<Literal, ParseError> {
    let mut positive = true;
    while parser.at(&Token::Not) {
        parser.advance();
        positive = !positive;
    }

    let atom = parse_atom_inner(parser)?;
    if positive {
        Ok(Literal::positive(atom))
    } else {
        Ok(Literal::negative(atom))
    }
}

fn parse_atom_inner(parser: &mut Parser) -> Result<Atom, ParseError> {
    let predicate = parser.expect_identifier("predicate name")?;
    let args = if parser.at(&Token::LParen) {
        parse_arguments(parser)?
    } else {
        Vec::new()
    };
    Ok(Atom::new(predicate, args))
}

/// `( t1, ..., tn )`, possibly empty.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Term>, ParseError> {
    parser.expect(Token::LParen, "'('")?;
    let mut args = Vec::new();
    if parser.at(&Token::RParen) {
        parser.advance();
        return Ok(args);
    }

    loop {
        args.push(parse_term_inner(parser)?);
        match parser.current() {
            Token::Comma => {
                parser.advance();
            }
            Token::RParen => {
                parser.advance();
                return Ok(args);
            }
            other => {
                return Err(parser.error(format!("expected ',' or ')', found {}", describe(other))))
            }
        }
    }
}

fn parse_term_inner(parser: &mut Parser) -> Result<Term, ParseError> {
    let name = parser.expect_identifier("term")?;
    if parser.at(&Token::LParen) {
        let args = parse_arguments(parser)?;
        Ok(Term::app(name, args))
    } else if is_variable_name(&name) {
        Ok(Term::var(name))
    } else {
        Ok(Term::constant(name))
    }
}
