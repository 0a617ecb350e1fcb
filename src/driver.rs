use crate::container;
use crate::error::Error;
use crate::kind::TokenKind;
use crate::parser::{Dialect, Parser};
use crate::token::{Token, NONE};
use crate::trace::trace_byte;

/// Parses `input` in a single forward pass, filling `tokens` (or, in counting mode, filling
/// nothing and only counting) and returning the number of tokens emitted, or the first error
/// encountered.
///
/// `tokens: None` is counting mode (§4.1): the full grammar still runs so errors are still
/// reported, but no token is written and capacity exhaustion can't occur. `parser` may be reused
/// across calls: a `Part` error preserves `pos`/`toknext`/`toksuper`/`expected` so the caller can
/// extend `input` (never shorten it) and call again.
pub fn parse(parser: &mut Parser, input: &[u8], tokens: Option<&mut [Token]>) -> Result<usize, Error> {
    let mut tokens = tokens;

    while parser.pos < input.len() {
        let byte = input[parser.pos];
        trace_byte(parser.pos, byte);

        match byte {
            b'{' | b'[' => dispatch_open(parser, &mut tokens, byte)?,
            b'}' | b']' => dispatch_close(parser, &mut tokens, byte)?,
            b'"' => dispatch_string(parser, input, &mut tokens)?,
            b':' => dispatch_colon(parser, &mut tokens)?,
            b',' => dispatch_comma(parser, &mut tokens)?,
            b' ' | b'\t' | b'\n' | b'\r' => {
                parser.pos += 1;
                continue;
            }
            b'-' | b'0'..=b'9' | b't' | b'f' | b'n' if parser.dialect() == Dialect::Strict => {
                dispatch_primitive(parser, input, &mut tokens)?
            }
            _ if parser.dialect() == Dialect::Permissive => dispatch_primitive(parser, input, &mut tokens)?,
            _ => return Err(Error::Invalid(parser.pos)),
        }
    }

    if let Some(slice) = tokens.as_deref() {
        let mut i = parser.toknext;
        while i > 0 {
            i -= 1;
            if slice[i].start != NONE && slice[i].end == NONE {
                return Err(Error::Part(slice[i].start));
            }
        }
    } else if parser.toksuper != NONE {
        return Err(Error::Part(input.len()));
    }

    Ok(parser.toknext)
}

fn dispatch_open(parser: &mut Parser, tokens: &mut Option<&mut [Token]>, byte: u8) -> Result<(), Error> {
    let kind = if byte == b'{' { TokenKind::OBJECT } else { TokenKind::ARRAY };
    if !parser.expected.kind_has_any(kind) {
        return Err(Error::Invalid(parser.pos));
    }
    container::open(parser, tokens, kind)?;
    parser.expected = match (parser.dialect(), kind) {
        (Dialect::Strict, TokenKind::OBJECT) => TokenKind::STRING | TokenKind::CLOSE,
        (Dialect::Strict, _) => TokenKind::ANY_TYPE | TokenKind::CLOSE,
        (Dialect::Permissive, _) => TokenKind::ANY_TYPE | TokenKind::CLOSE,
    };
    parser.pos += 1;
    Ok(())
}

fn dispatch_close(parser: &mut Parser, tokens: &mut Option<&mut [Token]>, byte: u8) -> Result<(), Error> {
    if !parser.expected.kind_has_any(TokenKind::CLOSE) {
        return Err(Error::Invalid(parser.pos));
    }
    let kind = if byte == b'}' { TokenKind::OBJECT } else { TokenKind::ARRAY };
    container::close(parser, tokens, kind)?;
    set_post_close_expected(parser, tokens, kind);
    parser.pos += 1;
    Ok(())
}

fn set_post_close_expected(parser: &mut Parser, _tokens: &mut Option<&mut [Token]>, _closed_kind: TokenKind) {
    if parser.toksuper == NONE {
        // The closed container already carries VALUE from `container::open` in both dialects.
        // Strict mode's root must be a single container (expected=CONTAINER only at pos 0), so
        // closing back to the top level here means the one permitted root has just finished;
        // `expected` goes empty so any further non-whitespace byte is INVAL (I5, "terminal
        // success"), matching the "multiple top-level values: INVAL" rule in strict mode.
        parser.expected = match parser.dialect() {
            Dialect::Strict => TokenKind::empty(),
            Dialect::Permissive => TokenKind::ANY_TYPE,
        };
    } else {
        parser.expected = TokenKind::DELIMITER | TokenKind::CLOSE;
    }
}

fn dispatch_string(parser: &mut Parser, input: &[u8], tokens: &mut Option<&mut [Token]>) -> Result<(), Error> {
    if !parser.expected.kind_has_any(TokenKind::STRING) {
        return Err(Error::Invalid(parser.pos));
    }
    let kind = crate::string::parse(parser, input, tokens)?;
    parser.expected = match parser.dialect() {
        Dialect::Strict if kind.kind_has_any(TokenKind::KEY) => TokenKind::DELIMITER,
        Dialect::Strict => TokenKind::DELIMITER | TokenKind::CLOSE,
        Dialect::Permissive => TokenKind::ANY_TYPE | TokenKind::DELIMITER | TokenKind::CLOSE,
    };
    Ok(())
}

fn dispatch_colon(parser: &mut Parser, tokens: &mut Option<&mut [Token]>) -> Result<(), Error> {
    if !parser.expected.kind_has_any(TokenKind::DELIMITER) {
        return Err(Error::Invalid(parser.pos));
    }
    if parser.dialect() == Dialect::Strict {
        // Reads `parser.last_kind` rather than indexing `tokens[toknext - 1]`, so this grammar
        // check runs the same way with or without a real array — see DESIGN.md.
        if !parser.last_kind.kind_has_any(TokenKind::KEY) {
            return Err(Error::Invalid(parser.pos));
        }
    } else {
        // Permissive mode defers KEY-ness until `:` is actually observed (spec.md §4.2/§6): the
        // token immediately preceding this colon becomes the KEY now, losing the VALUE it was
        // given by default at creation (string.rs/primitive.rs) — see DESIGN.md. Flipped on
        // `last_kind` unconditionally, and on the stored token too when a real array backs it.
        parser.last_kind |= TokenKind::KEY;
        parser.last_kind &= !TokenKind::VALUE;
        if let Some(slice) = tokens.as_deref_mut() {
            if let Some(previous) = parser.toknext.checked_sub(1) {
                slice[previous].kind |= TokenKind::KEY;
                slice[previous].kind &= !TokenKind::VALUE;
            }
        }
    }
    if parser.toknext > 0 {
        parser.toksuper = parser.toknext - 1;
    }
    parser.expected = TokenKind::ANY_TYPE;
    parser.pos += 1;
    Ok(())
}

fn dispatch_comma(parser: &mut Parser, tokens: &mut Option<&mut [Token]>) -> Result<(), Error> {
    if !parser.expected.kind_has_any(TokenKind::DELIMITER) {
        return Err(Error::Invalid(parser.pos));
    }

    if parser.dialect() == Dialect::Strict {
        // Reads `parser.last_kind` rather than indexing `tokens[toknext - 1]`, so this grammar
        // check runs the same way with or without a real array — see DESIGN.md.
        if parser.last_kind.kind_has_any(TokenKind::KEY) {
            return Err(Error::Invalid(parser.pos));
        }
    } else {
        parser.last_kind |= TokenKind::VALUE;
        if let Some(slice) = tokens.as_deref_mut() {
            if let Some(last) = parser.toknext.checked_sub(1) {
                slice[last].kind |= TokenKind::VALUE;
            }
        }
    }

    if let Some(slice) = tokens.as_deref_mut() {
        // Repair quirk (spec.md §9): `:` leaves `toksuper` pointing at the key; if nothing has
        // reset it since, resolve it back to the enclosing container before using it to decide
        // the next `expected` set.
        if parser.toksuper != NONE && !slice[parser.toksuper].is_container() {
            parser.toksuper = parser.container_of(slice);
        }
    }

    // `current_container_is_object` reads the real array (via `toksuper`) when one is present, or
    // `parser.open_stack` in counting mode, so the "inside an object, next key must be a string"
    // restriction applies in both modes — see DESIGN.md.
    parser.expected = match parser.dialect() {
        Dialect::Strict => {
            if container::current_container_is_object(parser, tokens.as_deref()) {
                TokenKind::STRING
            } else {
                TokenKind::ANY_TYPE
            }
        }
        Dialect::Permissive => TokenKind::ANY_TYPE,
    };

    parser.pos += 1;
    Ok(())
}

fn dispatch_primitive(parser: &mut Parser, input: &[u8], tokens: &mut Option<&mut [Token]>) -> Result<(), Error> {
    if !parser.expected.kind_has_any(TokenKind::PRIMITIVE) {
        return Err(Error::Invalid(parser.pos));
    }
    crate::primitive::parse(parser, input, tokens)?;
    parser.expected = match parser.dialect() {
        Dialect::Strict => TokenKind::DELIMITER | TokenKind::CLOSE,
        // Permissive mode tolerates a missing comma (spec.md §6): another value may follow a
        // primitive directly, matching dispatch_string's already-unconditional ANY_TYPE here.
        Dialect::Permissive => TokenKind::ANY_TYPE | TokenKind::DELIMITER | TokenKind::CLOSE,
    };
    Ok(())
}
