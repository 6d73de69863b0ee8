pub mod reporting;

use super::source::Location;
use thiserror::Error;

/// The error taxonomy of the core: what went wrong, not where. The
/// location lives in the surrounding [`Detail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Unrecognised or control code point, unterminated string,
    /// malformed numeric literal.
    Lexical,
    /// Unexpected or mismatched bracket, operator without an operand,
    /// unterminated expression.
    Structural,
    /// A key-value fold met an entry that is not a cons pair.
    Fold,
}

impl Kind {
    pub fn code(&self) -> &'static str {
        match self {
            Kind::Lexical => "E101",
            Kind::Structural => "E201",
            Kind::Fold => "E301",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Detail {
    pub kind: Kind,
    pub message: String,
    pub location: Location,
}

/// Recoverable-error sink shared by the scanner and the engine.
///
/// The tokenizer and engine never abort; everything they detect lands
/// here while parsing continues best-effort. The driver decides whether
/// a non-zero count is fatal.
#[derive(Debug, Default)]
pub struct Errors {
    details: Vec<Detail>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: Kind, message: impl Into<String>, location: Location) {
        let message = message.into();
        log::warn!("{}: {} at {:?}", kind.code(), message, location.span);
        self.details.push(Detail {
            kind,
            message,
            location,
        });
    }

    pub fn count(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    pub fn into_details(self) -> Vec<Detail> {
        self.details
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{} error(s) while parsing", .0.len())]
    Syntax(Vec<Detail>),
    /// The value sink refused a completed statement; parsing stops.
    #[error("consumer rejected value: {0}")]
    Rejected(String),
}

impl Error {
    pub fn details(&self) -> &[Detail] {
        match self {
            Error::Syntax(details) => details,
            _ => &[],
        }
    }
}
