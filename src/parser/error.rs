use std::error::Error;
use std::fmt::{self, Display};

/// A syntactic failure from [`parse`](super::parse). Position info, if
/// any, lives only here — the semantic core itself stays free of
/// source coordinates.
#[derive(Debug)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(super) fn new(message: String) -> Self {
        Self { message }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ParseError {}
