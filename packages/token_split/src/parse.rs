use crate::{Error, QUOTE};

/// Parses a [token string][crate] into its tokens, in input order.
///
/// An empty string is valid input and returns an empty result.
///
/// See [package-level documentation][crate] for the format.
///
/// # Panics
///
/// Panics if `delimiter` is the quote character - the format cannot
/// distinguish the two roles.
pub fn parse(input: &str, delimiter: char) -> crate::Result<Vec<String>> {
    assert!(
        delimiter != QUOTE,
        "the delimiter must not be the quote character"
    );

    let mut tokens = Vec::new();

    if input.is_empty() {
        return Ok(tokens);
    }

    let mut chars = input.char_indices().peekable();

    // At the start of the input and after every delimiter, one token must
    // follow. The flag goes false only when a token ends at end of input.
    let mut expecting_token = true;

    while expecting_token {
        let position = chars.peek().map_or(input.len(), |(position, _)| *position);

        match chars.peek().map(|(_, c)| *c) {
            // A trailing delimiter, a leading delimiter or two delimiters in
            // a row all leave a zero-width token here.
            None => return Err(Error::EmptyToken { position }),
            Some(c) if c == delimiter => return Err(Error::EmptyToken { position }),
            Some(QUOTE) => {
                _ = chars.next();

                let mut token = String::new();
                let mut closed = false;

                for (_, c) in chars.by_ref() {
                    if c == QUOTE {
                        closed = true;
                        break;
                    }

                    token.push(c);
                }

                if !closed {
                    return Err(Error::UnmatchedQuote { position });
                }

                match chars.next() {
                    None => expecting_token = false,
                    Some((_, c)) if c == delimiter => {}
                    Some((trailing_position, _)) => {
                        return Err(Error::TrailingData {
                            position: trailing_position,
                        });
                    }
                }

                tokens.push(token);
            }
            Some(_) => {
                let mut token = String::new();

                loop {
                    match chars.next() {
                        None => {
                            expecting_token = false;
                            break;
                        }
                        Some((_, c)) if c == delimiter => break,
                        Some((_, c)) => token.push(c),
                    }
                }

                tokens.push(token);
            }
        }
    }

    Ok(tokens)
}
