use thiserror::Error;

/// Evaluator invariant violations. A successfully constructed expression
/// never produces one of these; seeing one means the converter or the
/// operator table is wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("operand stack underflow while applying `{0}`")]
    StackUnderflow(&'static str),
    #[error("grouping symbol `{0}` reached the evaluator")]
    NotApplicable(&'static str),
    #[error("evaluation ended with {0} operands on the stack instead of 1")]
    Unbalanced(usize),
}
