use itertools::Itertools;

use crate::{Error, QUOTE};

/// Emits tokens as a [token string][crate] that [`parse()`][crate::parse]
/// round-trips back to the same tokens.
///
/// Tokens containing the delimiter, and empty tokens, are wrapped in quotes.
/// A token containing the quote character itself is not representable and is
/// rejected.
///
/// # Panics
///
/// Panics if `delimiter` is the quote character - the format cannot
/// distinguish the two roles.
///
/// # Example
///
/// ```
/// let emitted = token_split::emit(["a", "b,c"], ',').unwrap();
///
/// assert_eq!(emitted, "a,\"b,c\"");
/// ```
pub fn emit<I, S>(tokens: I, delimiter: char) -> crate::Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    assert!(
        delimiter != QUOTE,
        "the delimiter must not be the quote character"
    );

    let parts: crate::Result<Vec<String>> = tokens
        .into_iter()
        .map(|token| emit_token(token.as_ref(), delimiter))
        .collect();

    parts.map(|parts| parts.iter().join(&delimiter.to_string()))
}

fn emit_token(token: &str, delimiter: char) -> crate::Result<String> {
    if token.contains(QUOTE) {
        return Err(Error::UnrepresentableToken {
            token: token.to_string(),
        });
    }

    if token.is_empty() || token.contains(delimiter) {
        Ok(format!("{QUOTE}{token}{QUOTE}"))
    } else {
        Ok(token.to_string())
    }
}
