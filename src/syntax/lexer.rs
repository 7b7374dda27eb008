use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{Diagnostic, DiagnosticKind},
    syntax::tokens::*,
};

/// Union of every pattern the lexer can produce, tried in this order at each
/// position. Sign markers are deliberately absent: `pos`/`neg` in the input
/// are unrecognized text.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    let union = [
        BINARY_PATTERN,
        OCTAL_PATTERN,
        HEXADECIMAL_PATTERN,
        DECIMAL_PATTERN,
        CONSTANT_PATTERN,
        NORMAL_PATTERN,
        FUNCTION_PATTERN,
    ]
    .iter()
    .map(|p| format!("(?:{})", p))
    .collect::<Vec<_>>()
    .join("|");
    Regex::new(&union).expect("lexer pattern must compile")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Lexed<'a> {
    pub tokens: Vec<SpannedText<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexed<'a> {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn texts(&self) -> Vec<&'a str> {
        self.tokens.iter().map(|t| t.elem).collect()
    }
}

pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Slices the whole source. Unknown fragments are recorded and skipped, so
    /// a single pass reports all of them.
    pub fn tokenize(self) -> Lexed<'a> {
        let mut tokens = vec![];
        let mut diagnostics = vec![];
        let mut pos = 0;
        for m in TOKEN.find_iter(self.source) {
            if m.start() > pos {
                self.gap(pos..m.start(), DiagnosticKind::UnrecognizedChars, &mut diagnostics);
            }
            tokens.push(Spanned::new(m.as_str(), m.range()));
            pos = m.end();
        }
        if pos < self.source.len() {
            self.gap(pos..self.source.len(), DiagnosticKind::TrailingChars, &mut diagnostics);
        }
        let tokens = disambiguate_signs(tokens);
        debug!(
            "lexed {:?} into {} tokens, {} diagnostics",
            self.source,
            tokens.len(),
            diagnostics.len()
        );
        Lexed {
            tokens,
            diagnostics,
        }
    }

    fn gap(&self, span: Span, kind: DiagnosticKind, diagnostics: &mut Vec<Diagnostic>) {
        let text = &self.source[span.clone()];
        if !text.chars().all(char::is_whitespace) {
            debug!("unrecognized {:?} at {:?}", text, span);
            diagnostics.push(Diagnostic::on(text, kind));
        }
    }
}

/// Rewrites `+`/`-` into the `pos`/`neg` markers wherever no left operand can
/// precede them: at the start, after an operator other than `)` or `!`, or
/// after a function name.
pub fn disambiguate_signs(tokens: Vec<SpannedText<'_>>) -> Vec<SpannedText<'_>> {
    let mut prev: Option<&str> = None;
    tokens
        .into_iter()
        .map(|tok| {
            let raw = tok.elem;
            let tok = match raw {
                "+" | "-" if is_sign_position(prev) => {
                    let marker = if raw == "+" { "pos" } else { "neg" };
                    trace!("{} at {:?} is a sign, rewritten to {}", raw, tok.span, marker);
                    tok.map(|_| marker)
                }
                _ => tok,
            };
            prev = Some(raw);
            tok
        })
        .collect()
}

fn is_sign_position(prev: Option<&str>) -> bool {
    match prev {
        None => true,
        Some(p) => {
            let category = Category::of(p);
            (category.is_operator() && p != ")" && p != "!") || category == Category::Function
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Location;
    use pretty_assertions::assert_eq;

    fn texts(source: &str) -> Vec<&str> {
        Lexer::new(source).tokenize().texts()
    }

    #[test]
    fn slices_mixed_input() {
        assert_eq!(
            texts("sin(0x1F + 2.5e3) * PHI"),
            vec!["sin", "(", "0x1F", "+", "2.5e3", ")", "*", "PHI"]
        );
        assert_eq!(texts("0b1010+0o17"), vec!["0b1010", "+", "0o17"]);
        assert_eq!(texts("arccos(.5)%3!"), vec!["arccos", "(", ".5", ")", "%", "3", "!"]);
    }

    #[test]
    fn records_spans() {
        let lexed = Lexer::new(" 12 +PI").tokenize();
        let spans: Vec<Span> = lexed.tokens.iter().map(|t| t.span.clone()).collect();
        assert_eq!(spans, vec![1..3, 4..5, 5..7]);
    }

    #[test]
    fn unknown_fragments_do_not_stop_lexing() {
        let lexed = Lexer::new("2 & 3 $$ 4 @").tokenize();
        assert!(!lexed.is_ok());
        assert_eq!(lexed.texts(), vec!["2", "3", "4"]);
        assert_eq!(
            lexed.diagnostics,
            vec![
                Diagnostic::on(" & ", DiagnosticKind::UnrecognizedChars),
                Diagnostic::on(" $$ ", DiagnosticKind::UnrecognizedChars),
                Diagnostic::on(" @", DiagnosticKind::TrailingChars),
            ]
        );
        assert_eq!(lexed.diagnostics[0].location, Location::Text(" & ".into()));
    }

    #[test]
    fn whitespace_is_not_an_error() {
        let lexed = Lexer::new("  1 \t+\n 2  ").tokenize();
        assert!(lexed.is_ok());
        assert_eq!(lexed.texts(), vec!["1", "+", "2"]);
    }

    #[test]
    fn sign_markers_are_not_input() {
        let lexed = Lexer::new("neg 2").tokenize();
        assert_eq!(
            lexed.diagnostics,
            vec![Diagnostic::on("neg ", DiagnosticKind::UnrecognizedChars)]
        );
    }

    #[test]
    fn disambiguates_signs() {
        assert_eq!(texts("-(3+4)"), vec!["neg", "(", "3", "+", "4", ")"]);
        assert_eq!(texts("2*-3"), vec!["2", "*", "neg", "3"]);
        assert_eq!(texts("2++3"), vec!["2", "+", "pos", "3"]);
        assert_eq!(texts("2+++3"), vec!["2", "+", "pos", "pos", "3"]);
        assert_eq!(texts("(1)-2"), vec!["(", "1", ")", "-", "2"]);
        assert_eq!(texts("3!-1"), vec!["3", "!", "-", "1"]);
        assert_eq!(texts("PI-1"), vec!["PI", "-", "1"]);
        assert_eq!(texts("sin-1"), vec!["sin", "neg", "1"]);
    }

    #[test]
    fn disambiguation_runs_on_failed_lexing() {
        let lexed = Lexer::new("-2 # 3").tokenize();
        assert!(!lexed.is_ok());
        assert_eq!(lexed.texts(), vec!["neg", "2", "3"]);
    }
}
