//! `jscan` is a minimal, allocation-free JSON tokenizer. Given a byte buffer holding a JSON
//! document and a caller-provided [`Token`] array, it parses the input in a single forward pass
//! and populates the array with descriptors that locate each element (object, array, string,
//! primitive) by its byte offsets, together with parent/child structural information. It does
//! not allocate, does not copy input bytes, and does not decode escape sequences or interpret
//! numbers: it only delimits and classifies.
//!
//! # Design
//!
//! Two collaborating pieces do the work: [`Parser`], a small state record holding the current
//! byte offset, the next unused token index, the index of the currently open container, and a
//! bit-set of grammatically expected token kinds; and [`parse`], the top-level byte dispatcher
//! that consumes whitespace and structural characters and invokes a string or primitive
//! sub-parser as needed. The driver uses the caller's token slice both as output and as the only
//! structure for tracking the container stack — via a chain of parent indices
//! (`parent_links`, the default) or a backward scan of the array when that feature is disabled.
//!
//! Two dialects share one code path: [`Dialect::Strict`] is RFC 8259-aligned;
//! [`Dialect::Permissive`] relaxes the root, object keys, missing commas, and multiple top-level
//! values, as described on [`Dialect`].
//!
//! # Example
//!
//! ```
//! use jscan::{parse, Dialect, Parser, Token, TokenKind};
//!
//! let mut parser = Parser::new(Dialect::Strict);
//! let input = br#"{"a":10,"b":true}"#;
//! let mut tokens = [Token::default(); 8];
//!
//! let count = parse(&mut parser, input, Some(&mut tokens)).unwrap();
//! assert_eq!(count, 5);
//! assert!(tokens[0].kind.kind_is(TokenKind::OBJECT | TokenKind::VALUE));
//! assert_eq!(tokens[0].size, 4);
//! ```
//!
//! Counting mode sizes the token array without allocating one first:
//!
//! ```
//! use jscan::{parse, Dialect, Parser};
//!
//! let mut parser = Parser::new(Dialect::Strict);
//! let input = br#"{"a":10,"b":true}"#;
//! let needed = parse(&mut parser, input, None).unwrap();
//! assert_eq!(needed, 5);
//! ```

mod code;
mod container;
mod driver;
mod error;
mod kind;
mod parser;
mod pool;
mod primitive;
mod string;
mod token;
mod trace;

pub use code::{Code, Position};
pub use driver::parse;
pub use error::Error;
pub use kind::TokenKind;
pub use parser::{Dialect, Parser};
pub use token::{Token, TokenIndex, NONE};
