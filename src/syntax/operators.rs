use std::fmt;

use phf::phf_map;

use super::literals::CONSTANT_PI;

/// Precedence shared by every named function, above every symbol.
pub const PRIORITY_FUNCTION: u8 = 0xFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Parentheses. Drive grouping, never applied.
    Grouping,
    Unary,
    Binary,
}

impl Arity {
    pub fn operands(self) -> usize {
        match self {
            Arity::Grouping => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// An entry of the operator table. `rule` is pure; unary rules ignore their
/// second argument.
#[derive(Clone, Copy)]
pub struct Operator {
    pub sym: &'static str,
    pub arity: Arity,
    pub prec: u8,
    pub rule: fn(f64, f64) -> f64,
}

impl Operator {
    /// Whether `self`, sitting on the hold stack, must be resolved before
    /// `incoming` is pushed. Ties resolve left to right for every operator,
    /// `^` included.
    pub fn has_bigger_prec(&self, incoming: &Operator) -> bool {
        self.prec >= incoming.prec
    }

    pub fn is_open_paren(&self) -> bool {
        self.sym == "("
    }

    pub fn is_close_paren(&self) -> bool {
        self.sym == ")"
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        (self.rule)(a, b)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.sym == other.sym
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("sym", &self.sym)
            .field("arity", &self.arity)
            .field("prec", &self.prec)
            .finish()
    }
}

fn inert(_: f64, _: f64) -> f64 {
    0.0
}
fn add(a: f64, b: f64) -> f64 {
    a + b
}
fn sub(a: f64, b: f64) -> f64 {
    a - b
}
fn rem(a: f64, b: f64) -> f64 {
    a % b
}
fn mul(a: f64, b: f64) -> f64 {
    a * b
}
fn div(a: f64, b: f64) -> f64 {
    a / b
}
fn pow(a: f64, b: f64) -> f64 {
    a.powf(b)
}
fn pos(a: f64, _: f64) -> f64 {
    a
}
fn neg(a: f64, _: f64) -> f64 {
    -a
}
fn factorial(a: f64, _: f64) -> f64 {
    libm::tgamma(a + 1.0)
}
fn sin(a: f64, _: f64) -> f64 {
    a.sin()
}
fn cos(a: f64, _: f64) -> f64 {
    a.cos()
}
fn tan(a: f64, _: f64) -> f64 {
    a.tan()
}
fn cot(a: f64, _: f64) -> f64 {
    1.0 / a.tan()
}
fn sec(a: f64, _: f64) -> f64 {
    1.0 / a.cos()
}
fn csc(a: f64, _: f64) -> f64 {
    1.0 / a.sin()
}
fn arcsin(a: f64, _: f64) -> f64 {
    a.asin()
}
fn arccos(a: f64, _: f64) -> f64 {
    a.acos()
}
fn arctan(a: f64, _: f64) -> f64 {
    a.atan()
}
fn arccot(a: f64, _: f64) -> f64 {
    (1.0 / a).atan()
}
fn arcsec(a: f64, _: f64) -> f64 {
    (1.0 / a).acos()
}
fn arccsc(a: f64, _: f64) -> f64 {
    (1.0 / a).asin()
}
fn lg(a: f64, _: f64) -> f64 {
    a.log10()
}
fn ln(a: f64, _: f64) -> f64 {
    a.ln()
}
fn sqrt(a: f64, _: f64) -> f64 {
    a.sqrt()
}
fn cbrt(a: f64, _: f64) -> f64 {
    a.cbrt()
}
fn deg(a: f64, _: f64) -> f64 {
    a / CONSTANT_PI * 180.0
}
fn rad(a: f64, _: f64) -> f64 {
    a / 180.0 * CONSTANT_PI
}

macro_rules! op {
    ($sym: literal, $arity: ident, $prec: expr, $rule: expr) => {
        Operator {
            sym: $sym,
            arity: Arity::$arity,
            prec: $prec,
            rule: $rule,
        }
    };
}

pub static OPERATORS: phf::Map<&'static str, Operator> = phf_map! {
    "(" => op!("(", Grouping, 0, inert),
    ")" => op!(")", Grouping, 0, inert),
    "+" => op!("+", Binary, 1, add),
    "-" => op!("-", Binary, 1, sub),
    "%" => op!("%", Binary, 2, rem),
    "*" => op!("*", Binary, 3, mul),
    "/" => op!("/", Binary, 3, div),
    "pos" => op!("pos", Unary, 4, pos),
    "neg" => op!("neg", Unary, 4, neg),
    "^" => op!("^", Binary, 5, pow),
    "!" => op!("!", Unary, 6, factorial),
    "sin" => op!("sin", Unary, PRIORITY_FUNCTION, sin),
    "cos" => op!("cos", Unary, PRIORITY_FUNCTION, cos),
    "tan" => op!("tan", Unary, PRIORITY_FUNCTION, tan),
    "cot" => op!("cot", Unary, PRIORITY_FUNCTION, cot),
    "sec" => op!("sec", Unary, PRIORITY_FUNCTION, sec),
    "csc" => op!("csc", Unary, PRIORITY_FUNCTION, csc),
    "arcsin" => op!("arcsin", Unary, PRIORITY_FUNCTION, arcsin),
    "arccos" => op!("arccos", Unary, PRIORITY_FUNCTION, arccos),
    "arctan" => op!("arctan", Unary, PRIORITY_FUNCTION, arctan),
    "arccot" => op!("arccot", Unary, PRIORITY_FUNCTION, arccot),
    "arcsec" => op!("arcsec", Unary, PRIORITY_FUNCTION, arcsec),
    "arccsc" => op!("arccsc", Unary, PRIORITY_FUNCTION, arccsc),
    "lg" => op!("lg", Unary, PRIORITY_FUNCTION, lg),
    "ln" => op!("ln", Unary, PRIORITY_FUNCTION, ln),
    "sqrt" => op!("sqrt", Unary, PRIORITY_FUNCTION, sqrt),
    "cbrt" => op!("cbrt", Unary, PRIORITY_FUNCTION, cbrt),
    "deg" => op!("deg", Unary, PRIORITY_FUNCTION, deg),
    "rad" => op!("rad", Unary, PRIORITY_FUNCTION, rad),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::{Category, FUNCTION_PATTERN};
    use pretty_assertions::assert_eq;

    fn op(sym: &str) -> &'static Operator {
        OPERATORS.get(sym).unwrap()
    }

    #[test]
    fn precedence_ladder() {
        let ladder = ["(", "+", "%", "*", "pos", "^", "!", "sin"];
        for pair in ladder.windows(2) {
            assert!(op(pair[0]).prec < op(pair[1]).prec, "{:?}", pair);
        }
        assert_eq!(op("-").prec, op("+").prec);
        assert_eq!(op("/").prec, op("*").prec);
        assert_eq!(op("neg").prec, op("pos").prec);
        assert_eq!(op(")").prec, 0);
    }

    #[test]
    fn every_function_is_registered_unary() {
        for name in FUNCTION_PATTERN.split('|') {
            let f = op(name);
            assert_eq!(Category::of(name), Category::Function);
            assert_eq!(f.arity, Arity::Unary);
            assert_eq!(f.prec, PRIORITY_FUNCTION);
        }
    }

    #[test]
    fn ties_pop_uniformly() {
        assert!(op("^").has_bigger_prec(op("^")));
        assert!(op("-").has_bigger_prec(op("+")));
        assert!(!op("(").has_bigger_prec(op("+")));
        assert!(!op("+").has_bigger_prec(op("*")));
    }

    #[test]
    fn rules() {
        assert_eq!(op("-").apply(7.0, 2.0), 5.0);
        assert_eq!(op("/").apply(1.0, 4.0), 0.25);
        assert_eq!(op("%").apply(-7.0, 3.0), -1.0);
        assert_eq!(op("^").apply(2.0, 10.0), 1024.0);
        assert_eq!(op("neg").apply(3.0, 0.0), -3.0);
        assert_eq!(op("pos").apply(3.0, 99.0), 3.0);
        assert!((op("lg").apply(1000.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((op("cbrt").apply(27.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((op("!").apply(5.0, 0.0) - 120.0).abs() < 1e-9);
        assert!((op("!").apply(0.5, 0.0) - 0.886_226_925_452_758).abs() < 1e-9);
        assert!((op("deg").apply(CONSTANT_PI, 0.0) - 180.0).abs() < 1e-9);
        assert!((op("rad").apply(90.0, 0.0) - CONSTANT_PI / 2.0).abs() < 1e-9);
        assert!((op("arccot").apply(1.0, 0.0) - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn domain_errors_are_ieee() {
        assert!(op("/").apply(1.0, 0.0).is_infinite());
        assert!(op("arcsin").apply(2.0, 0.0).is_nan());
        assert_eq!(op("ln").apply(0.0, 0.0), f64::NEG_INFINITY);
        assert!(op("ln").apply(-1.0, 0.0).is_nan());
        assert!(op("sqrt").apply(-4.0, 0.0).is_nan());
    }
}
