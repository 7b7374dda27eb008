pub mod err;
pub mod eval_err;

pub use err::{Diagnostic, DiagnosticKind, Location, Report};
pub use eval_err::EvalError;
