//! Ref filter queries.
//!
//! ```text
//! query  := and ("OR" and)*
//! and    := clause ("AND" clause)*
//! clause := "NOT" clause | field op value
//! field  := name | type
//! op     := = | != | GLOB | CONTAINS
//! ```
//!
//! Values are bare words or double-quoted strings. Keywords are case-insensitive.

use std::fmt;

use globset::{Glob, GlobMatcher};

use crate::ref_view::{DisplayRow, RowKind, RowPredicate};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterError {
    /// Byte offset into the query.
    pub position: usize,
    pub message: String,
}

impl FilterError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

pub trait FilterCompiler: Send + Sync {
    fn compile(&self, query: &str) -> Result<Box<dyn RowPredicate>, Vec<FilterError>>;
}

/// Compiles the query language above into a [`RefFilter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryCompiler;

impl FilterCompiler for QueryCompiler {
    fn compile(&self, query: &str) -> Result<Box<dyn RowPredicate>, Vec<FilterError>> {
        RefFilter::compile(query).map(|filter| Box::new(filter) as Box<dyn RowPredicate>)
    }
}

#[derive(Debug)]
pub struct RefFilter {
    expr: Expr,
}

impl RefFilter {
    pub fn compile(query: &str) -> Result<Self, Vec<FilterError>> {
        let tokens = lex(query)?;
        if tokens.is_empty() {
            return Err(vec![FilterError::new(0, "empty filter query")]);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            end: query.len(),
            errors: Vec::new(),
        };
        let expr = parser.parse_or();
        if let Some(tok) = parser.peek() {
            let position = tok.position;
            parser
                .errors
                .push(FilterError::new(position, "unexpected trailing input"));
        }

        match expr {
            Some(expr) if parser.errors.is_empty() => Ok(Self { expr }),
            _ => Err(parser.errors),
        }
    }

    pub fn matches_filter(&self, row: &DisplayRow) -> bool {
        self.expr.eval(row)
    }
}

impl RowPredicate for RefFilter {
    fn matches(&self, row: &DisplayRow) -> bool {
        self.matches_filter(row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Type,
}

impl Field {
    fn value(self, row: &DisplayRow) -> &str {
        match self {
            Field::Name => row.name(),
            Field::Type => match row.kind {
                RowKind::LocalBranch => "branch",
                RowKind::RemoteBranch => "remote",
                RowKind::Tag => "tag",
                _ => "",
            },
        }
    }
}

const TYPE_VALUES: [&str; 3] = ["branch", "remote", "tag"];

#[derive(Debug)]
enum Matcher {
    Eq(String),
    Ne(String),
    Contains(String),
    Glob(GlobMatcher),
}

#[derive(Debug)]
enum Expr {
    Compare { field: Field, matcher: Matcher },
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    fn eval(&self, row: &DisplayRow) -> bool {
        match self {
            Expr::Compare { field, matcher } => {
                let value = field.value(row);
                match matcher {
                    Matcher::Eq(v) => value == v,
                    Matcher::Ne(v) => value != v,
                    Matcher::Contains(v) => value.to_lowercase().contains(v.as_str()),
                    Matcher::Glob(glob) => glob.is_match(value),
                }
            }
            Expr::Not(inner) => !inner.eval(row),
            Expr::And(terms) => terms.iter().all(|t| t.eval(row)),
            Expr::Or(terms) => terms.iter().any(|t| t.eval(row)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum TokenKind {
    Word(String),
    Str(String),
    Eq,
    Ne,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    position: usize,
}

impl Token {
    fn keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    fn is_connective(&self) -> bool {
        self.keyword("AND") || self.keyword("OR")
    }
}

fn lex(query: &str) -> Result<Vec<Token>, Vec<FilterError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut chars = query.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '=' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Eq,
                    position,
                });
            }
            '!' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == '=').is_some() {
                    tokens.push(Token {
                        kind: TokenKind::Ne,
                        position,
                    });
                } else {
                    errors.push(FilterError::new(position, "expected '=' after '!'"));
                }
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        c => value.push(c),
                    }
                }
                if !closed {
                    errors.push(FilterError::new(position, "unterminated string"));
                }
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    position,
                });
            }
            _ => {
                let mut word = String::new();
                while let Some((_, c)) =
                    chars.next_if(|&(_, c)| !c.is_whitespace() && !matches!(c, '=' | '!' | '"'))
                {
                    word.push(c);
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    position,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
    errors: Vec<FilterError>,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn current_position(&self) -> usize {
        self.peek().map(|t| t.position).unwrap_or(self.end)
    }

    /// Skips to the next AND/OR so later clauses still get checked.
    fn recover(&mut self) {
        while self.peek().is_some_and(|t| !t.is_connective()) {
            self.pos += 1;
        }
    }

    fn fail(&mut self, position: usize, message: impl Into<String>) -> Option<Expr> {
        self.errors.push(FilterError::new(position, message));
        self.recover();
        None
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut terms = vec![self.parse_and()];
        while self.eat_keyword("OR") {
            terms.push(self.parse_and());
        }
        let mut terms: Vec<Expr> = terms.into_iter().collect::<Option<_>>()?;
        if terms.len() == 1 {
            terms.pop()
        } else {
            Some(Expr::Or(terms))
        }
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut terms = vec![self.parse_clause()];
        while self.eat_keyword("AND") {
            terms.push(self.parse_clause());
        }
        let mut terms: Vec<Expr> = terms.into_iter().collect::<Option<_>>()?;
        if terms.len() == 1 {
            terms.pop()
        } else {
            Some(Expr::And(terms))
        }
    }

    fn parse_clause(&mut self) -> Option<Expr> {
        if self.eat_keyword("NOT") {
            return self.parse_clause().map(|e| Expr::Not(Box::new(e)));
        }

        let position = self.current_position();
        let field = match self.next() {
            Some(Token {
                kind: TokenKind::Word(w),
                ..
            }) if w.eq_ignore_ascii_case("name") => Field::Name,
            Some(Token {
                kind: TokenKind::Word(w),
                ..
            }) if w.eq_ignore_ascii_case("type") => Field::Type,
            Some(Token {
                kind: TokenKind::Word(w) | TokenKind::Str(w),
                ..
            }) => return self.fail(position, format!("unknown field '{}'", w)),
            Some(_) => return self.fail(position, "expected field name"),
            None => return self.fail(position, "expected field name"),
        };

        let position = self.current_position();
        let op = match self.next() {
            Some(Token {
                kind: TokenKind::Eq,
                ..
            }) => "=",
            Some(Token {
                kind: TokenKind::Ne,
                ..
            }) => "!=",
            Some(t) if t.keyword("GLOB") => "GLOB",
            Some(t) if t.keyword("CONTAINS") => "CONTAINS",
            _ => return self.fail(position, "expected operator (=, !=, GLOB, CONTAINS)"),
        };

        let position = self.current_position();
        let value = match self.next() {
            Some(Token {
                kind: TokenKind::Str(v),
                ..
            }) => v,
            Some(t) if t.is_connective() || t.keyword("NOT") => {
                self.pos -= 1;
                return self.fail(position, "expected value");
            }
            Some(Token {
                kind: TokenKind::Word(v),
                ..
            }) => v,
            _ => return self.fail(position, "expected value"),
        };

        if field == Field::Type
            && matches!(op, "=" | "!=")
            && !TYPE_VALUES.contains(&value.as_str())
        {
            return self.fail(
                position,
                format!("unknown type '{}' (expected branch, remote or tag)", value),
            );
        }

        let matcher = match op {
            "=" => Matcher::Eq(value),
            "!=" => Matcher::Ne(value),
            "CONTAINS" => Matcher::Contains(value.to_lowercase()),
            _ => match Glob::new(&value) {
                Ok(glob) => Matcher::Glob(glob.compile_matcher()),
                Err(err) => return self.fail(position, format!("invalid glob: {}", err)),
            },
        };

        Some(Expr::Compare { field, matcher })
    }
}

#[cfg(test)]
#[path = "tests/ref_filter_tests.rs"]
mod tests;
