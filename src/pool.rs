use crate::error::Error;
use crate::kind::TokenKind;
use crate::parser::Parser;
use crate::token::{Token, TokenIndex};

/// Allocates the next token from the pool by bumping `toknext`.
///
/// In counting mode (`tokens` is `None`) this never fails: only `toknext` is tracked, matching
/// the source's "null buffer" behavior of running the full grammar without emission. With a real
/// slice, allocation fails with [`Error::NoMemory`] once `toknext` reaches its length.
pub(crate) fn alloc(parser: &mut Parser, tokens: &mut Option<&mut [Token]>) -> Result<TokenIndex, Error> {
    match tokens {
        None => {
            let idx = parser.toknext;
            parser.toknext += 1;
            Ok(idx)
        }
        Some(slice) => {
            if parser.toknext >= slice.len() {
                return Err(Error::NoMemory(parser.toknext));
            }
            let idx = parser.toknext;
            slice[idx] = Token::undefined();
            parser.toknext += 1;
            Ok(idx)
        }
    }
}

/// Whether the next [`alloc`] call would fail. Used by the primitive sub-parser to decide, for
/// an EOF-without-terminator run in strict mode, whether to report `NoMemory` (capacity was
/// already gone) ahead of `Part` (the run's own content was merely truncated) — see DESIGN.md.
pub(crate) fn capacity_exhausted(parser: &Parser, tokens: &Option<&mut [Token]>) -> bool {
    matches!(tokens, Some(slice) if parser.toknext >= slice.len())
}

/// Overwrites `kind`/`start`/`end` on an already-allocated token; `size` (and `parent`/
/// `next_sibling` where enabled) are left untouched. A no-op in counting mode.
pub(crate) fn fill(
    tokens: &mut Option<&mut [Token]>,
    idx: TokenIndex,
    kind: TokenKind,
    start: usize,
    end: usize,
) {
    if let Some(slice) = tokens {
        slice[idx].kind = kind;
        slice[idx].start = start;
        slice[idx].end = end;
    }
}

/// Registers a newly completed element as a child of the nearest enclosing container: sets its
/// `parent` (when `parent_links` is enabled) and increments that container's `size`. A no-op when
/// there is no open container (the element is a top-level value).
pub(crate) fn register_child(parser: &Parser, tokens: &mut Option<&mut [Token]>, child: TokenIndex) {
    if let Some(slice) = tokens {
        let container = parser.container_of(slice);
        if container != crate::token::NONE {
            slice[container].size += 1;
            #[cfg(feature = "parent_links")]
            {
                slice[child].parent = container;
            }
        }
    }
}
