//! Structural checks over the lexed, sign-disambiguated token text.
//!
//! The four passes are independent and always all run, so one input can
//! surface several unrelated problems at once.

use log::debug;

use crate::{
    errors::{Diagnostic, DiagnosticKind},
    syntax::tokens::{Category, BINARY, DECIMAL, HEXADECIMAL, OCTAL},
};

pub fn validate(tokens: &[&str]) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    check_parentheses(tokens, &mut diagnostics);
    check_operator_sequence(tokens, &mut diagnostics);
    check_number_format(tokens, &mut diagnostics);
    check_function_usage(tokens, &mut diagnostics);
    debug!(
        "validated {} tokens: {} diagnostics",
        tokens.len(),
        diagnostics.len()
    );
    diagnostics
}

pub fn check_parentheses(tokens: &[&str], diagnostics: &mut Vec<Diagnostic>) {
    let mut open = vec![];
    for (i, &tok) in tokens.iter().enumerate() {
        match tok {
            "(" => open.push(i),
            ")" => {
                if open.pop().is_none() {
                    diagnostics.push(Diagnostic::at(i, DiagnosticKind::UnmatchedRParen));
                }
            }
            _ => (),
        }
    }
    while let Some(i) = open.pop() {
        diagnostics.push(Diagnostic::at(i, DiagnosticKind::UnmatchedLParen));
    }
}

pub fn check_operator_sequence(tokens: &[&str], diagnostics: &mut Vec<Diagnostic>) {
    let last = tokens.len().saturating_sub(1);
    for (i, &tok) in tokens.iter().enumerate() {
        let category = Category::of(tok);
        let prev = if i == 0 { None } else { Some(tokens[i - 1]) };
        let prev_is_sign = prev.map_or(false, |p| Category::of(p) == Category::Signal);
        let kind = if category == Category::Signal {
            if i == last {
                Some(DiagnosticKind::EndsWithOperator)
            } else if prev_is_sign {
                Some(DiagnosticKind::ConsecutiveSigns)
            } else {
                None
            }
        } else if tok == "!" {
            match prev {
                None => Some(DiagnosticKind::StartsWithFactorial),
                Some(p) if !(Category::of(p).is_number() || p == ")") => {
                    Some(DiagnosticKind::DanglingFactorial)
                }
                _ => None,
            }
        } else if category == Category::Normal && tok != "(" && tok != ")" {
            if i == 0 {
                Some(DiagnosticKind::StartsWithBinaryOperator)
            } else if i == last {
                Some(DiagnosticKind::EndsWithOperator)
            } else if prev_is_sign {
                Some(DiagnosticKind::OperatorAfterSign)
            } else {
                None
            }
        } else {
            None
        };
        if let Some(kind) = kind {
            diagnostics.push(Diagnostic::at(i, kind));
        }
    }
}

pub fn check_number_format(tokens: &[&str], diagnostics: &mut Vec<Diagnostic>) {
    for (i, &tok) in tokens.iter().enumerate() {
        let category = Category::of(tok);
        if category.is_number() && i > 0 && Category::of(tokens[i - 1]).is_number() {
            diagnostics.push(Diagnostic::on(
                format!("{}{}", tokens[i - 1], tok),
                DiagnosticKind::ConsecutiveNumbers,
            ));
            continue;
        }
        if category == Category::Constant || !looks_numeric(tok) {
            continue;
        }
        let radix_prefixed = ["0b", "0o", "0x"].iter().any(|p| tok.starts_with(*p));
        let has_exponent = tok.contains(|c: char| c == 'e' || c == 'E');
        if has_exponent && !radix_prefixed && !DECIMAL.is_match(tok) {
            diagnostics.push(Diagnostic::on(tok, DiagnosticKind::MalformedExponent));
        }
        let malformed = if tok.starts_with("0b") && !BINARY.is_match(tok) {
            Some(DiagnosticKind::MalformedBinary)
        } else if tok.starts_with("0o") && !OCTAL.is_match(tok) {
            Some(DiagnosticKind::MalformedOctal)
        } else if tok.starts_with("0x") && !HEXADECIMAL.is_match(tok) {
            Some(DiagnosticKind::MalformedHexadecimal)
        } else {
            None
        };
        if let Some(kind) = malformed {
            diagnostics.push(Diagnostic::on(tok, kind));
        }
    }
}

pub fn check_function_usage(tokens: &[&str], diagnostics: &mut Vec<Diagnostic>) {
    for (i, &tok) in tokens.iter().enumerate() {
        if Category::of(tok) == Category::Function && tokens.get(i + 1) != Some(&"(") {
            diagnostics.push(Diagnostic::on(tok, DiagnosticKind::FunctionWithoutParen));
        }
    }
}

fn looks_numeric(tok: &str) -> bool {
    tok.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}
