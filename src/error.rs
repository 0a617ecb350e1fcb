use std::fmt::{Display, Formatter};

/// The three ways a call to [`parse`](crate::parse) can fail.
///
/// No variant attempts recovery: [`Invalid`](Error::Invalid) means the caller must
/// [`reset`](crate::Parser::reset) and retry from scratch, [`NoMemory`](Error::NoMemory) means
/// retry with a larger token array (or size first in counting mode), and [`Part`](Error::Part)
/// means the parser state is still good and the caller may extend the buffer and call again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Token capacity exhausted mid-parse. Carries the index at which allocation failed, which
    /// is always equal to the capacity that was passed in.
    NoMemory(usize),
    /// Ungrammatical input. Carries the byte offset of the offending byte, or — for a string or
    /// primitive that failed inside its own sub-parser — the offset where that element started.
    Invalid(usize),
    /// Input exhausted mid-element or with containers still open. Carries the byte offset of
    /// the start of the in-progress element, or the input length if no element was in progress.
    Part(usize),
}

impl Error {
    /// The byte offset associated with this error, per the contract documented on each variant.
    pub fn pos(&self) -> usize {
        match *self {
            Error::NoMemory(pos) | Error::Invalid(pos) | Error::Part(pos) => pos,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoMemory(at) => write!(f, "NoMemory: token capacity exhausted at {}", at),
            Error::Invalid(pos) => write!(f, "Invalid: ungrammatical input at byte {}", pos),
            Error::Part(pos) => write!(f, "Part: input truncated at byte {}", pos),
        }
    }
}

impl std::error::Error for Error {}
