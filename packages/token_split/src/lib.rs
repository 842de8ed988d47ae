#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Utilities for parsing and emitting delimiter-separated token strings with
//! double-quote grouping.
//!
//! Example token string (with `,` as the delimiter): `alpha,"b,c",gamma`
//!
//! # Format
//!
//! The value is a list of tokens separated by a single delimiter character,
//! where each token is either:
//!
//! * a bare run of characters not containing the delimiter (e.g. `alpha`)
//! * a double-quoted run that may contain the delimiter (e.g. `"b,c"`)
//!
//! Quotes carry no escape sequences, so a token containing the quote
//! character itself cannot be emitted. A closing quote must be followed by
//! the delimiter or the end of input. Zero-width tokens (a leading or
//! trailing delimiter, or two delimiters in a row) are malformed; an
//! explicitly quoted empty token (`""`) is valid. An empty string is valid
//! input and contains no tokens.
//!
//! # Example
//!
//! Basic conversion from/to strings:
//!
//! ```
//! let tokens = token_split::parse("alpha,\"b,c\",gamma", ',').unwrap();
//! assert_eq!(tokens, vec!["alpha", "b,c", "gamma"]);
//!
//! let emitted = token_split::emit(&tokens, ',').unwrap();
//! assert_eq!(emitted, "alpha,\"b,c\",gamma");
//! ```

mod emit;
mod error;
mod parse;

pub use emit::*;
pub use error::*;
pub use parse::*;

/// The quote character used for grouping. Not configurable.
pub(crate) const QUOTE: char = '"';
