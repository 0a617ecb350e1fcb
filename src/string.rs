use crate::container::{current_container_is_object, link_sibling};
use crate::error::Error;
use crate::kind::TokenKind;
use crate::parser::{Dialect, Parser};
use crate::pool::{self, register_child};
use crate::token::Token;
use crate::trace::trace_token;

/// Parses a quoted string starting at `input[parser.pos] == b'"'`.
///
/// On success, leaves `parser.pos` one past the closing quote and returns the kind the new token
/// was given (`STRING` plus `KEY` or `VALUE`), so the driver can decide the next `expected` set
/// without re-deriving the dialect's key/value rule.
pub(crate) fn parse(
    parser: &mut Parser,
    input: &[u8],
    tokens: &mut Option<&mut [Token]>,
) -> Result<TokenKind, Error> {
    let start = parser.pos;
    let mut pos = start + 1;

    loop {
        let Some(&byte) = input.get(pos) else {
            parser.pos = start;
            return Err(Error::Part(start));
        };

        match byte {
            b'"' => {
                parser.pos = pos + 1;
                break;
            }
            b'\\' if pos + 1 < input.len() => {
                pos += 1;
                match input[pos] {
                    b'"' | b'/' | b'\\' | b'b' | b'f' | b'r' | b'n' | b't' => {}
                    b'u' => {
                        pos += 1;
                        for _ in 0..4 {
                            match input.get(pos) {
                                Some(&h) if h.is_ascii_hexdigit() => pos += 1,
                                Some(_) => {
                                    parser.pos = start;
                                    return Err(Error::Invalid(start));
                                }
                                None => {
                                    parser.pos = start;
                                    return Err(Error::Part(start));
                                }
                            }
                        }
                        pos -= 1;
                    }
                    _ => {
                        parser.pos = start;
                        return Err(Error::Invalid(start));
                    }
                }
            }
            _ => {}
        }
        pos += 1;
    }

    let kind = key_or_value(parser, tokens.as_deref());
    let idx = pool::alloc(parser, tokens)?;
    register_child(parser, tokens, idx);
    link_sibling(parser, tokens, idx);
    pool::fill(tokens, idx, kind, start + 1, parser.pos - 1);
    parser.last_kind = kind;
    trace_token("string", start + 1, parser.pos - 1);
    Ok(kind)
}

/// Strict mode: the new string is a KEY if the enclosing container is an OBJECT and the previous
/// token was that object's opening brace or a VALUE (i.e. we're in key position, not mid-value of
/// a preceding key). Permissive mode flags every string VALUE unconditionally at creation; a
/// string occupying an object's key slot only loses VALUE and gains KEY retroactively, when `:`
/// is actually observed (driver::dispatch_colon) — see DESIGN.md.
///
/// Reads `parser.last_kind` rather than indexing `tokens[toknext - 1]`, and
/// `current_container_is_object` rather than resolving the container straight off the array, so
/// this runs identically in counting mode (`tokens == None`), where there is no array to index —
/// see DESIGN.md.
fn key_or_value(parser: &Parser, tokens: Option<&[Token]>) -> TokenKind {
    match parser.dialect() {
        Dialect::Strict => {
            let in_object = current_container_is_object(parser, tokens);
            let previous_opens_key_position = parser.last_kind.kind_has_any(TokenKind::OBJECT)
                || parser.last_kind.kind_has_any(TokenKind::VALUE);
            if in_object && previous_opens_key_position {
                TokenKind::STRING | TokenKind::KEY
            } else {
                TokenKind::STRING | TokenKind::VALUE
            }
        }
        Dialect::Permissive => TokenKind::STRING | TokenKind::VALUE,
    }
}
