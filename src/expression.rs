use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    errors::{EvalError, Report},
    eval,
    syntax::{
        lexer::Lexer,
        shunting_yard::to_postfix,
        tokens::{Category, Token},
        validator::validate,
    },
};

/// A validated expression with its infix and postfix token sequences.
///
/// Only [`Expression::new`] builds one, and only when every stage of the
/// pipeline succeeded, so both sequences are always consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    infix: Vec<Token>,
    postfix: Vec<Token>,
}

impl Expression {
    pub fn new(source: &str) -> Result<Self, Report> {
        let lexed = Lexer::new(source).tokenize();
        let texts = lexed.texts();
        let mut report = Report {
            listing: listing(&texts),
            diagnostics: lexed.diagnostics,
        };
        if !report.is_clean() {
            return Err(report);
        }

        report.diagnostics = validate(&texts);
        if !report.is_clean() {
            return Err(report);
        }

        let infix = match texts
            .iter()
            .map(|&t| Token::try_from(t))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(infix) => infix,
            Err(diagnostic) => {
                report.diagnostics.push(diagnostic);
                return Err(report);
            }
        };
        let postfix = to_postfix(&infix);
        report.diagnostics = eval::stack_effect(&postfix);
        if !report.is_clean() {
            return Err(report);
        }

        let expression = Self { infix, postfix };
        debug!("{:?} built, postfix: {}", source, expression.postfix_expression());
        Ok(expression)
    }

    /// Classification listing and diagnostics for any input, the same text a
    /// failed [`Expression::new`] reports.
    pub fn analyse(source: &str) -> Report {
        match Self::new(source) {
            Ok(_) => Report {
                listing: listing(&Lexer::new(source).tokenize().texts()),
                diagnostics: vec![],
            },
            Err(report) => report,
        }
    }

    pub fn infix(&self) -> &[Token] {
        &self.infix
    }

    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    pub fn infix_expression(&self) -> String {
        render(&self.infix)
    }

    pub fn postfix_expression(&self) -> String {
        render(&self.postfix)
    }

    pub fn evaluate_from_postfix(&self) -> Result<f64, EvalError> {
        eval::evaluate_postfix(&self.postfix)
    }

    pub fn evaluate_from_infix(&self) -> Result<f64, EvalError> {
        eval::evaluate_infix(&self.infix)
    }
}

fn listing(texts: &[&str]) -> Vec<(Category, String)> {
    texts
        .iter()
        .map(|t| (Category::of(t), t.to_string()))
        .collect()
}

fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Expression {
    type Err = Report;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.infix_expression())
    }
}
