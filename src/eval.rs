use log::debug;

use crate::{
    errors::{Diagnostic, DiagnosticKind, EvalError},
    syntax::{
        operators::{Arity, Operator},
        shunting_yard::{shunt, Sink},
        tokens::Token,
    },
};

/// Pops the operator's operands, pushes its result. For binary operators the
/// right operand is on top: `a b -` is `a - b`.
pub fn apply(operands: &mut Vec<f64>, op: &Operator) -> Result<(), EvalError> {
    let mut pop = || operands.pop().ok_or(EvalError::StackUnderflow(op.sym));
    let result = match op.arity {
        Arity::Grouping => return Err(EvalError::NotApplicable(op.sym)),
        Arity::Unary => op.apply(pop()?, 0.0),
        Arity::Binary => {
            let b = pop()?;
            let a = pop()?;
            op.apply(a, b)
        }
    };
    operands.push(result);
    Ok(())
}

/// Applying operators as the shunting-yard resolves them evaluates the infix
/// sequence directly.
impl Sink for Vec<f64> {
    type Error = EvalError;
    fn operand(&mut self, value: f64) {
        self.push(value);
    }
    fn operator(&mut self, op: &'static Operator) -> Result<(), EvalError> {
        apply(self, op)
    }
}

pub fn evaluate_postfix(postfix: &[Token]) -> Result<f64, EvalError> {
    let mut operands = vec![];
    for tok in postfix {
        match *tok {
            Token::Number(n) => operands.push(n),
            Token::Operator(op) => apply(&mut operands, op)?,
        }
    }
    let result = single(operands)?;
    debug!("postfix evaluation: {}", result);
    Ok(result)
}

pub fn evaluate_infix(infix: &[Token]) -> Result<f64, EvalError> {
    let mut operands: Vec<f64> = vec![];
    shunt(infix, &mut operands)?;
    let result = single(operands)?;
    debug!("infix evaluation: {}", result);
    Ok(result)
}

fn single(operands: Vec<f64>) -> Result<f64, EvalError> {
    match operands.as_slice() {
        [value] => Ok(*value),
        rest => Err(EvalError::Unbalanced(rest.len())),
    }
}

/// Runs the postfix sequence on operand counts instead of values, reporting
/// every operator that would underflow and anything but a single final
/// operand.
pub fn stack_effect(postfix: &[Token]) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    let mut depth = 0usize;
    for tok in postfix {
        match tok {
            Token::Number(_) => depth += 1,
            Token::Operator(op) => {
                let needed = op.arity.operands();
                if depth < needed {
                    diagnostics.push(Diagnostic::on(op.sym, DiagnosticKind::MissingOperand));
                    depth = needed;
                }
                depth = depth - needed + 1;
            }
        }
    }
    match depth {
        0 => diagnostics.push(Diagnostic::at(0, DiagnosticKind::EmptyExpression)),
        1 => (),
        n => {
            let rendered = postfix
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            diagnostics.push(Diagnostic::on(rendered, DiagnosticKind::DanglingOperands(n)))
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::operators::OPERATORS;
    use pretty_assertions::assert_eq;

    fn op(sym: &str) -> Token {
        Token::Operator(OPERATORS.get(sym).unwrap())
    }

    fn num(n: f64) -> Token {
        Token::Number(n)
    }

    #[test]
    fn operand_order() {
        let mut stack = vec![10.0, 4.0];
        apply(&mut stack, OPERATORS.get("-").unwrap()).unwrap();
        assert_eq!(stack, vec![6.0]);
        let mut stack = vec![2.0, 3.0];
        apply(&mut stack, OPERATORS.get("^").unwrap()).unwrap();
        assert_eq!(stack, vec![8.0]);
    }

    #[test]
    fn unary_leaves_the_rest() {
        let mut stack = vec![1.0, 2.0];
        apply(&mut stack, OPERATORS.get("neg").unwrap()).unwrap();
        assert_eq!(stack, vec![1.0, -2.0]);
    }

    #[test]
    fn apply_invariant_violations() {
        let mut stack = vec![1.0];
        assert_eq!(
            apply(&mut stack, OPERATORS.get("*").unwrap()),
            Err(EvalError::StackUnderflow("*"))
        );
        assert_eq!(
            apply(&mut vec![1.0], OPERATORS.get("(").unwrap()),
            Err(EvalError::NotApplicable("("))
        );
    }

    #[test]
    fn postfix_sequences() {
        let postfix = [num(2.0), num(3.0), num(4.0), op("*"), op("+")];
        assert_eq!(evaluate_postfix(&postfix), Ok(14.0));
        assert_eq!(
            evaluate_postfix(&[num(1.0), num(2.0)]),
            Err(EvalError::Unbalanced(2))
        );
        assert_eq!(evaluate_postfix(&[]), Err(EvalError::Unbalanced(0)));
    }

    #[test]
    fn infix_sequences() {
        let infix = [
            op("("),
            num(2.0),
            op("+"),
            num(3.0),
            op(")"),
            op("*"),
            num(4.0),
        ];
        assert_eq!(evaluate_infix(&infix), Ok(20.0));
        assert_eq!(
            evaluate_infix(&[num(2.0), op("^"), op("neg"), num(2.0)]),
            Err(EvalError::StackUnderflow("^"))
        );
    }

    #[test]
    fn stack_effect_accepts_balanced_sequences() {
        let postfix = [num(1.0), op("neg"), num(2.0), op("+")];
        assert_eq!(stack_effect(&postfix), Vec::<Diagnostic>::new());
    }

    #[test]
    fn stack_effect_reports_imbalance() {
        assert_eq!(
            stack_effect(&[op("neg")]),
            vec![Diagnostic::on("neg", DiagnosticKind::MissingOperand)]
        );
        assert_eq!(
            stack_effect(&[]),
            vec![Diagnostic::at(0, DiagnosticKind::EmptyExpression)]
        );
        assert_eq!(
            stack_effect(&[num(2.0), num(3.0)]),
            vec![Diagnostic::on("2 3", DiagnosticKind::DanglingOperands(2))]
        );
        assert_eq!(
            stack_effect(&[num(2.0), op("^"), num(2.0), op("neg")]),
            vec![
                Diagnostic::on("^", DiagnosticKind::MissingOperand),
                Diagnostic::on("2 ^ 2 neg", DiagnosticKind::DanglingOperands(2)),
            ]
        );
    }
}
