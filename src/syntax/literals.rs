use crate::syntax::tokens::Category;

pub const CONSTANT_E: f64 = 2.718281828459;
pub const CONSTANT_PI: f64 = 3.1415926535898;
pub const CONSTANT_PHI: f64 = 0.61803398875;

/// Value of a numeric token of the given category, `None` if the text
/// doesn't belong to it.
pub fn parse(text: &str, category: Category) -> Option<f64> {
    match category {
        Category::Decimal => text.parse().ok(),
        Category::Constant => constant(text),
        Category::Binary | Category::Octal | Category::Hexadecimal => {
            radix(text.get(2..)?, category.radix()?)
        }
        _ => None,
    }
}

pub fn constant(name: &str) -> Option<f64> {
    Some(match name {
        "E" => CONSTANT_E,
        "PI" => CONSTANT_PI,
        "PHI" => CONSTANT_PHI,
        _ => return None,
    })
}

/// Digits after the prefix, with an optional `.` splitting off the fraction.
fn radix(digits: &str, base: u32) -> Option<f64> {
    let (integer, fraction) = match digits.find('.') {
        Some(dot) => (&digits[..dot], &digits[dot + 1..]),
        None => (digits, ""),
    };
    let b = f64::from(base);
    let mut value = 0.0;
    for (k, c) in integer.chars().rev().enumerate() {
        value += f64::from(c.to_digit(base)?) * b.powi(k as i32);
    }
    for (k, c) in fraction.chars().enumerate() {
        value += f64::from(c.to_digit(base)?) * b.powi(-(k as i32 + 1));
    }
    Some(value)
}
