use thiserror::Error;

/// Errors that can occur when parsing or emitting token strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A quote opened in the input is never closed.
    #[error("unmatched quote: the quote opened at byte {position} is never closed")]
    UnmatchedQuote {
        /// Byte offset of the opening quote in the input.
        position: usize,
    },

    /// The input contains a zero-width token: a leading or trailing
    /// delimiter, or two delimiters in a row.
    #[error("empty token at byte {position}: delimiters must separate non-empty tokens")]
    EmptyToken {
        /// Byte offset at which a token was expected.
        position: usize,
    },

    /// Data follows a closing quote without an intervening delimiter.
    #[error(
        "trailing data at byte {position}: a closing quote must be followed by \
         a delimiter or the end of input"
    )]
    TrailingData {
        /// Byte offset of the first character after the closing quote.
        position: usize,
    },

    /// The token contains the quote character, which the format cannot
    /// represent (quotes carry no escape sequences).
    #[error("token '{token}' contains a quote character and cannot be emitted")]
    UnrepresentableToken {
        /// The token that could not be emitted.
        token: String,
    },
}

/// A specialized `Result` type for token string operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
