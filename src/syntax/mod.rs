pub mod lexer;

pub mod literals;

pub mod operators;

pub mod shunting_yard;

pub mod tokens;

pub mod validator;

pub use lexer::*;
pub use operators::*;
pub use tokens::*;
