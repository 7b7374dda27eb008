use std::convert::Infallible;

use log::trace;

use crate::syntax::{operators::Operator, tokens::Token};

/// Receives what the shunting-yard resolves, in postfix order.
pub trait Sink {
    type Error;
    fn operand(&mut self, value: f64);
    fn operator(&mut self, op: &'static Operator) -> Result<(), Self::Error>;
}

/// Collecting the resolved tokens gives the postfix sequence.
impl Sink for Vec<Token> {
    type Error = Infallible;
    fn operand(&mut self, value: f64) {
        self.push(Token::Number(value));
    }
    fn operator(&mut self, op: &'static Operator) -> Result<(), Infallible> {
        self.push(Token::Operator(op));
        Ok(())
    }
}

/// Runs the shunting-yard over an infix sequence that already has balanced
/// parentheses. An incoming operator resolves every held operator of greater
/// *or equal* precedence first, whatever the operator: `2^3^2` is `(2^3)^2`.
pub fn shunt<S: Sink>(infix: &[Token], sink: &mut S) -> Result<(), S::Error> {
    let mut held: Vec<&'static Operator> = vec![];
    for tok in infix {
        match *tok {
            Token::Number(n) => sink.operand(n),
            Token::Operator(op) if op.is_open_paren() => held.push(op),
            Token::Operator(op) if op.is_close_paren() => {
                while let Some(top) = held.pop() {
                    if top.is_open_paren() {
                        break;
                    }
                    sink.operator(top)?;
                }
            }
            Token::Operator(op) => {
                while let Some(&top) = held.last() {
                    if !top.has_bigger_prec(op) {
                        break;
                    }
                    trace!("`{}` resolves `{}` before it", op.sym, top.sym);
                    held.pop();
                    sink.operator(top)?;
                }
                held.push(op);
            }
        }
    }
    while let Some(top) = held.pop() {
        sink.operator(top)?;
    }
    Ok(())
}

pub fn to_postfix(infix: &[Token]) -> Vec<Token> {
    let mut postfix = Vec::with_capacity(infix.len());
    match shunt(infix, &mut postfix) {
        Ok(()) => postfix,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lexer::Lexer, tokens::Token};
    use pretty_assertions::assert_eq;

    fn postfix(source: &str) -> String {
        let infix = Lexer::new(source)
            .tokenize()
            .texts()
            .into_iter()
            .map(|t| Token::try_from(t).unwrap())
            .collect::<Vec<_>>();
        to_postfix(&infix)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn precedence() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("2*3+4"), "2 3 * 4 +");
        assert_eq!(postfix("1+2%3*4"), "1 2 3 4 * % +");
    }

    #[test]
    fn parentheses_are_dropped() {
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("((1))"), "1");
    }

    #[test]
    fn ties_resolve_left_to_right() {
        assert_eq!(postfix("8-3-2"), "8 3 - 2 -");
        assert_eq!(postfix("2^3^2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn unary_and_functions() {
        assert_eq!(postfix("-(3+4)"), "3 4 + neg");
        assert_eq!(postfix("-2^2"), "2 2 ^ neg");
        assert_eq!(postfix("sin(PI/2)+1"), "3.1415926535898 2 / sin 1 +");
        assert_eq!(postfix("3!*2"), "3 ! 2 *");
        assert_eq!(postfix("2^3!"), "2 3 ! ^");
    }
}
