//! Arithmetic expression engine: lexing, validation with aggregated
//! diagnostics, infix to postfix conversion, and two evaluation strategies
//! that must agree.
//!
//! ```
//! use exprcalc::Expression;
//!
//! let expr = Expression::new("2+3*4").unwrap();
//! assert_eq!(expr.postfix_expression(), "2 3 4 * +");
//! assert_eq!(expr.evaluate_from_postfix(), Ok(14.0));
//! assert_eq!(expr.evaluate_from_infix(), Ok(14.0));
//! ```

pub mod errors;
pub mod eval;
pub mod expression;
pub mod source_pos;
pub mod syntax;

pub use errors::{Diagnostic, DiagnosticKind, EvalError, Location, Report};
pub use expression::Expression;
