use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{Diagnostic, DiagnosticKind},
    syntax::{literals, operators::Operator, operators::OPERATORS},
};

pub use crate::source_pos::{Span, Spanned};

pub type SpannedText<'a> = Spanned<&'a str>;

pub const BINARY_PATTERN: &str = r"0b[01]+(?:\.[01]*)?";
pub const OCTAL_PATTERN: &str = r"0o[0-7]+(?:\.[0-7]*)?";
pub const HEXADECIMAL_PATTERN: &str = r"0x[0-9A-Fa-f]+(?:\.[0-9A-Fa-f]*)?";
pub const DECIMAL_PATTERN: &str = r"(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?";
pub const CONSTANT_PATTERN: &str = r"PI|E|PHI";
pub const NORMAL_PATTERN: &str = r"[-+*/^()!%]";
pub const FUNCTION_PATTERN: &str = "sin|cos|tan|cot|sec|csc|\
                                    arcsin|arccos|arctan|arccot|arcsec|arccsc|\
                                    ln|lg|deg|rad|sqrt|cbrt";
// Never produced by the lexer, only by sign disambiguation.
pub const SIGNAL_PATTERN: &str = r"pos|neg";

fn whole(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", pattern)).expect("token pattern must compile")
}

pub static BINARY: Lazy<Regex> = Lazy::new(|| whole(BINARY_PATTERN));
pub static OCTAL: Lazy<Regex> = Lazy::new(|| whole(OCTAL_PATTERN));
pub static HEXADECIMAL: Lazy<Regex> = Lazy::new(|| whole(HEXADECIMAL_PATTERN));
pub static DECIMAL: Lazy<Regex> = Lazy::new(|| whole(DECIMAL_PATTERN));
static NORMAL: Lazy<Regex> = Lazy::new(|| whole(NORMAL_PATTERN));
static CONSTANT: Lazy<Regex> = Lazy::new(|| whole(CONSTANT_PATTERN));
static FUNCTION: Lazy<Regex> = Lazy::new(|| whole(FUNCTION_PATTERN));
static SIGNAL: Lazy<Regex> = Lazy::new(|| whole(SIGNAL_PATTERN));

/// Lexical category of a token's text. The discriminants are one-byte codes
/// grouped by their high nibble, so group membership is a bitwise test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    Invalid = 0x00,
    Constant = 0x11,
    Binary = 0x12,
    Octal = 0x13,
    Hexadecimal = 0x14,
    Decimal = 0x15,
    Signal = 0x21,
    Normal = 0x22,
    Function = 0x23,
}

impl Category {
    pub const NUMBER_GROUP: u8 = 0x10;
    pub const OPERATOR_GROUP: u8 = 0x20;

    /// Classifies a token's full text. The order of the checks matters:
    /// radix literals come before decimals so `0x1A` is never read as `0`.
    pub fn of(text: &str) -> Category {
        if BINARY.is_match(text) {
            Category::Binary
        } else if OCTAL.is_match(text) {
            Category::Octal
        } else if HEXADECIMAL.is_match(text) {
            Category::Hexadecimal
        } else if DECIMAL.is_match(text) {
            Category::Decimal
        } else if NORMAL.is_match(text) {
            Category::Normal
        } else if CONSTANT.is_match(text) {
            Category::Constant
        } else if FUNCTION.is_match(text) {
            Category::Function
        } else if SIGNAL.is_match(text) {
            Category::Signal
        } else {
            Category::Invalid
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_number(self) -> bool {
        self.code() & Self::NUMBER_GROUP != 0
    }

    pub fn is_operator(self) -> bool {
        self.code() & Self::OPERATOR_GROUP != 0
    }

    pub fn radix(self) -> Option<u32> {
        match self {
            Category::Binary => Some(2),
            Category::Octal => Some(8),
            Category::Hexadecimal => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Invalid => "invalid",
            Category::Constant => "constant",
            Category::Binary => "binary number",
            Category::Octal => "octal number",
            Category::Hexadecimal => "hexadecimal number",
            Category::Decimal => "decimal number",
            Category::Signal => "sign",
            Category::Normal => "operator",
            Category::Function => "function",
        };
        write!(f, "{:#04x} {}", self.code(), name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(&'static Operator),
}

impl<'a> TryFrom<&'a str> for Token {
    type Error = Diagnostic;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let category = Category::of(value);
        if category.is_number() {
            if let Some(n) = literals::parse(value, category) {
                return Ok(Token::Number(n));
            }
        } else if category.is_operator() {
            if let Some(op) = OPERATORS.get(value) {
                return Ok(Token::Operator(op));
            }
        }
        Err(Diagnostic::on(value, DiagnosticKind::UnknownToken))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op.sym),
        }
    }
}
