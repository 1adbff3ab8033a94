//! Lexer for the program syntax.

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Any name: predicate, functor, constant or variable. The parser decides
    /// which from case and context.
    Identifier(String),

    // Delimiters
    LParen, // (
    RParen, // )
    Comma,  // ,
    Dot,    // .

    // Logic operators (Unicode and ASCII)
    Not,     // ¬ ~ -
    And,     // ∧ &
    Or,      // ∨ |
    Implies, // → -> =>
    Bottom,  // ⊥
    Equals,  // =

    // Query
    Query, // ?-

    // Directive
    Colon, // :

    StringLit(String),

    Eof,
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Lex the whole input; the last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace_and_comments();
        let (line, column) = (self.line, self.column);
        let token = self.lex_token()?;
        Ok(Spanned {
            token,
            line,
            column,
        })
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn lex_token(&mut self) -> Result<Token, LexError> {
        let remaining = &self.input[self.position..];
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(Token::Eof),
        };

        let (token, len) = match ch {
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            ',' => (Token::Comma, 1),
            '.' => (Token::Dot, 1),
            ':' => (Token::Colon, 1),
            '¬' | '∧' | '∨' | '→' | '⊥' => {
                let token = match ch {
                    '¬' => Token::Not,
                    '∧' => Token::And,
                    '∨' => Token::Or,
                    '→' => Token::Implies,
                    _ => Token::Bottom,
                };
                (token, ch.len_utf8())
            }
            '~' => (Token::Not, 1),
            '&' => (Token::And, 1),
            '|' => (Token::Or, 1),
            '-' if remaining.starts_with("->") => (Token::Implies, 2),
            '-' => (Token::Not, 1),
            '=' if remaining.starts_with("=>") => (Token::Implies, 2),
            '=' => (Token::Equals, 1),
            '?' if remaining.starts_with("?-") => (Token::Query, 2),
            '"' => return self.lex_string(),
            c if c.is_alphanumeric() || c == '_' => return Ok(self.lex_identifier()),
            _ => {
                return Err(LexError {
                    message: format!("unexpected character: '{}'", ch),
                    line: self.line,
                    column: self.column,
                })
            }
        };
        self.advance(len);
        Ok(token)
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.input[self.position..self.position + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else if self.input[self.position..].starts_with("//") {
                // Skip to end of line
                while let Some(c) = self.peek_char() {
                    self.advance(c.len_utf8());
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
        Token::Identifier(self.input[start..self.position].to_string())
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let (line, column) = (self.line, self.column);
        // Skip opening quote
        self.advance(1);
        let start = self.position;

        while let Some(ch) = self.peek_char() {
            match ch {
                '"' => {
                    let content = self.input[start..self.position].to_string();
                    self.advance(1);
                    return Ok(Token::StringLit(content));
                }
                '\n' => break,
                _ => self.advance(ch.len_utf8()),
            }
        }

        Err(LexError {
            message: "unterminated string literal".to_string(),
            line,
            column,
        })
    }
}

/// Lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
