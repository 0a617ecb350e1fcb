use crate::error::Error;
use crate::kind::TokenKind;
use crate::parser::Parser;
use crate::pool::{self, register_child};
use crate::token::{Token, TokenIndex, NONE};
use crate::trace::trace_token;

/// Handles `{` or `[`: allocates the container token, registers it as a child of whatever was
/// open before it, links it into the sibling chain, and opens it as the new `toksuper`.
///
/// In counting mode (`tokens == None`) there is no array to hold the container's kind for a
/// later close-bracket check, so `parser.open_stack` shadows it: a tiny stack of
/// `(pseudo-index, kind)` pairs, pushed here and popped in `close`'s counting-mode path.
pub(crate) fn open(
    parser: &mut Parser,
    tokens: &mut Option<&mut [Token]>,
    kind: TokenKind,
) -> Result<(), Error> {
    let idx = pool::alloc(parser, tokens)?;
    register_child(parser, tokens, idx);
    link_sibling(parser, tokens, idx);
    pool::fill(tokens, idx, kind | TokenKind::VALUE, parser.pos, NONE);
    parser.last_kind = kind | TokenKind::VALUE;
    if tokens.is_none() {
        parser.open_stack.push((idx, kind));
    }
    parser.toksuper = idx;
    trace_token("open", parser.pos, parser.pos + 1);
    Ok(())
}

/// Handles `}` or `]`: locates the nearest still-open container, checks its kind matches the
/// closing brace, closes it, and re-opens the next still-open ancestor (or none) as `toksuper`.
pub(crate) fn close(
    parser: &mut Parser,
    tokens: &mut Option<&mut [Token]>,
    expected_kind: TokenKind,
) -> Result<(), Error> {
    let Some(slice) = tokens.as_deref_mut() else {
        return close_counting(parser, expected_kind);
    };

    let Some(found) = find_open_container(parser, slice) else {
        return Err(Error::Invalid(parser.pos));
    };

    if !slice[found].kind.kind_has_any(expected_kind) {
        return Err(Error::Invalid(parser.pos));
    }

    slice[found].end = parser.pos + 1;
    trace_token("close", slice[found].start, slice[found].end);

    #[cfg(feature = "parent_links")]
    {
        parser.toksuper = slice[found].parent;
    }
    #[cfg(not(feature = "parent_links"))]
    {
        parser.toksuper = find_open_container(parser, slice).unwrap_or(NONE);
    }

    Ok(())
}

/// Counting mode's mirror of `close`: no token array exists to scan, so the grammar check reads
/// `parser.open_stack` instead — same "is anything open" and "does its kind match" checks the
/// real-array path makes, just against the shadow stack (§4.1: counting mode keeps "the full
/// state machine, including grammar validation" running, only the writes are skipped).
fn close_counting(parser: &mut Parser, expected_kind: TokenKind) -> Result<(), Error> {
    let Some(&(_, open_kind)) = parser.open_stack.last() else {
        return Err(Error::Invalid(parser.pos));
    };
    if !open_kind.kind_has_any(expected_kind) {
        return Err(Error::Invalid(parser.pos));
    }
    parser.open_stack.pop();
    parser.toksuper = parser.open_stack.last().map_or(NONE, |&(idx, _)| idx);
    Ok(())
}

/// Whether the container currently accumulating children is an OBJECT.
///
/// With a real array, resolves `toksuper` to its enclosing container (§4.4: `:` may have left
/// `toksuper` pointing at a key) and reads that token's kind directly. In counting mode there is
/// no array to resolve through, but `parser.open_stack` already tracks exactly this — pushed by
/// `open` and popped by `close_counting` — so it's read straight from the top of that shadow
/// stack instead, with no dependency on `toksuper`'s counting-mode value (which `:` still nudges,
/// harmlessly, since nothing else in counting mode reads it).
pub(crate) fn current_container_is_object(parser: &Parser, tokens: Option<&[Token]>) -> bool {
    match tokens {
        Some(slice) => {
            let container = parser.container_of(slice);
            container != NONE && slice[container].kind.kind_has_any(TokenKind::OBJECT)
        }
        None => parser
            .open_stack
            .last()
            .map_or(false, |&(_, kind)| kind.kind_has_any(TokenKind::OBJECT)),
    }
}

/// Locates the nearest still-open container token (`start` set, `end` unset).
///
/// With `parent_links` this is `Parser::container_of` resolving `toksuper` directly — O(1), per
/// spec.md §9's preference for parent-link walks over array rescans whenever the feature allows
/// it. Without it, the only recourse is the backward scan over the whole array.
#[cfg(feature = "parent_links")]
fn find_open_container(parser: &Parser, slice: &[Token]) -> Option<TokenIndex> {
    match parser.container_of(slice) {
        NONE => None,
        found => Some(found),
    }
}

#[cfg(not(feature = "parent_links"))]
fn find_open_container(parser: &Parser, slice: &[Token]) -> Option<TokenIndex> {
    let mut i = parser.toknext;
    while i > 0 {
        i -= 1;
        if slice[i].start != NONE && slice[i].end == NONE {
            return Some(i);
        }
    }
    None
}

/// Links `child` into its parent's sibling chain. Only compiled when `next_sibling` is enabled;
/// a no-op otherwise. The first child of a container is never linked explicitly — it is always
/// discoverable as `parent + 1` — so this only has work to do from the second child onward.
#[cfg(feature = "next_sibling")]
pub(crate) fn link_sibling(parser: &Parser, tokens: &mut Option<&mut [Token]>, child: TokenIndex) {
    let Some(slice) = tokens else { return };
    let parent = parser.container_of(slice);
    if parent == NONE {
        return;
    }
    let first_child = parent + 1;
    if first_child == child {
        return;
    }
    let mut cursor = first_child;
    loop {
        let next = slice[cursor].next_sibling;
        if next == NONE {
            slice[cursor].next_sibling = child;
            break;
        }
        cursor = next;
    }
}

#[cfg(not(feature = "next_sibling"))]
pub(crate) fn link_sibling(_parser: &Parser, _tokens: &mut Option<&mut [Token]>, _child: TokenIndex) {}
