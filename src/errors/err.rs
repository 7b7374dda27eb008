use std::fmt;

use thiserror::Error;

use crate::syntax::tokens::Category;

/// Where a diagnostic points: a position in the lexed token list, or the
/// offending text itself when no single position describes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Index(usize),
    Text(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Index(i) => write!(f, "#{}", i),
            Location::Text(s) => write!(f, "`{}`", s),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    // lexical
    #[error("unrecognized characters")]
    UnrecognizedChars,
    #[error("unrecognized characters at the end of the expression")]
    TrailingChars,

    // parentheses
    #[error("unmatched `)`")]
    UnmatchedRParen,
    #[error("unmatched `(`")]
    UnmatchedLParen,

    // operator sequencing
    #[error("expression ends with an operator")]
    EndsWithOperator,
    #[error("consecutive sign operators")]
    ConsecutiveSigns,
    #[error("expression starts with `!`")]
    StartsWithFactorial,
    #[error("`!` must follow a number, a constant or `)`")]
    DanglingFactorial,
    #[error("expression starts with a binary operator")]
    StartsWithBinaryOperator,
    #[error("binary operator follows a sign operator")]
    OperatorAfterSign,

    // numeric literals
    #[error("consecutive numbers")]
    ConsecutiveNumbers,
    #[error("malformed scientific notation")]
    MalformedExponent,
    #[error("malformed binary literal")]
    MalformedBinary,
    #[error("malformed octal literal")]
    MalformedOctal,
    #[error("malformed hexadecimal literal")]
    MalformedHexadecimal,

    // functions
    #[error("function name is not followed by `(`")]
    FunctionWithoutParen,

    // stack effect
    #[error("operator is missing an operand")]
    MissingOperand,
    #[error("{0} operands are left without an operator")]
    DanglingOperands(usize),
    #[error("empty expression")]
    EmptyExpression,
    #[error("unknown token")]
    UnknownToken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn at(index: usize, kind: DiagnosticKind) -> Self {
        Self {
            location: Location::Index(index),
            kind,
        }
    }

    pub fn on(text: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            location: Location::Text(text.into()),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.location, self.kind)
    }
}

/// Everything known about an expression that failed to build: how each lexed
/// token was classified, followed by every diagnostic collected along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub listing: Vec<(Category, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .listing
            .iter()
            .map(|(category, text)| format!("[{}] {}", category, text))
            .chain(self.diagnostics.iter().map(ToString::to_string))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for Report {}
