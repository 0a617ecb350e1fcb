use once_cell::unsync::OnceCell;
use std::fmt::{Display, Formatter};

/// A 1-based line and column pair, as reported by [`Code::position_of`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A caller-side convenience wrapping an input buffer to translate the byte offsets an
/// [`Error`](crate::Error) carries into human-readable line/column positions.
///
/// Kept entirely separate from [`Parser`](crate::Parser): the parser itself only ever stores a
/// raw `usize`, so the allocation-free core never depends on this lazily-built index.
pub struct Code<'c> {
    pub value: &'c [u8],
    line_breaks: OnceCell<Vec<usize>>,
}

impl<'c> From<&'c [u8]> for Code<'c> {
    fn from(value: &'c [u8]) -> Self {
        Code::new(value)
    }
}

impl<'c> From<&'c str> for Code<'c> {
    fn from(value: &'c str) -> Self {
        Code::new(value.as_bytes())
    }
}

impl<'c> Code<'c> {
    pub fn new(value: &'c [u8]) -> Self {
        Self {
            value,
            line_breaks: OnceCell::new(),
        }
    }

    fn obtain_line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .iter()
                .enumerate()
                .filter_map(|(index, b)| if *b == b'\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Line/column of byte offset `pointer`, built from a line-break index that's computed once
    /// and cached for the life of this `Code`.
    ///
    /// The column is a byte count within the line, not a char count: `jscan`'s own non-goal is
    /// "no UTF-8 validation inside strings beyond `\uXXXX`" (spec.md §1), so `value` may contain
    /// bytes that aren't valid UTF-8 at all, and a `str`-based column count isn't available to ask
    /// for in the first place. Counting bytes directly also sidesteps ever decoding `value` as
    /// `str`, checked or not.
    pub fn position_of(&self, pointer: usize) -> Position {
        let line_breaks = self.obtain_line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };

        if index == 0 {
            Position::new(1, pointer + 1)
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position::new(index + 1, pointer - break_point + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_position() {
        let code = Code::new(b"{\"a\":1}");
        assert_eq!(code.position_of(1), Position::new(1, 2));
    }

    #[test]
    fn position_after_line_break() {
        let code = Code::new(b"{\n  \"a\":1\n}");
        let pos = code.position_of(6);
        assert_eq!(pos.line, 2);
    }

    /// jscan never validates UTF-8 inside strings beyond `\uXXXX` (spec.md §1), so a byte offset
    /// handed to `position_of` may sit after invalid UTF-8 bytes. Must not panic or misbehave.
    #[test]
    fn position_of_tolerates_invalid_utf8_in_value() {
        let input: &[u8] = &[b'{', b'"', 0x80, 0xff, b'"', b'}'];
        let code = Code::new(input);
        assert_eq!(code.position_of(4), Position::new(1, 5));
    }
}
