pub mod engine;
pub mod error;
pub mod lexer;
pub mod operators;
pub mod printer;
pub mod scanner;
pub mod source;
pub mod style;
pub mod value;

pub use error::Error;
pub use value::{Tag, Value};

pub type Result<T> = std::result::Result<T, Error>;
