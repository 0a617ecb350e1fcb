use crate::kind::TokenKind;
use crate::token::{Token, TokenIndex, NONE};

/// Which grammar the driver enforces. See the module-level documentation on [`parse`](crate::parse)
/// for the full strict/permissive comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// RFC 8259-aligned acceptance: object keys must be strings, the root must be an object or
    /// array, a single top-level value, no tolerance for missing commas.
    Strict,
    /// A relaxed acceptance admitting unquoted keys, unquoted values, missing commas, and
    /// non-container roots.
    Permissive,
}

/// Parser state: the current input byte offset, the next unused token index, the index of the
/// currently open container, and the set of token kinds grammatically expected next.
///
/// Deliberately small and `Copy`-free but cheap to move: a caller keeps one of these per logical
/// parse, resuming across calls on [`Part`](crate::Error::Part) by reusing the same `Parser` and
/// an extended buffer.
#[derive(Debug, Clone)]
pub struct Parser {
    pub(crate) dialect: Dialect,
    pub(crate) pos: usize,
    pub(crate) toknext: TokenIndex,
    pub(crate) toksuper: TokenIndex,
    pub(crate) expected: TokenKind,
    /// The kind most recently assigned to a token (by `container::open`, `string::parse`, or
    /// `primitive::parse`), regardless of whether a real token array backs this parse.
    ///
    /// Strict-mode grammar checks that need to know "was the last token a KEY" (the colon's
    /// "preceding token must be a key" check, the comma's "no KEY immediately before a comma"
    /// check, a string's "am I in key position" check) read this instead of indexing
    /// `tokens[toknext - 1]`, so they run identically in counting mode (`tokens == None`), where
    /// there is no array to index — see DESIGN.md. Strict mode never retroactively changes a
    /// token's kind after creation, so this field needs no correction once set; permissive mode's
    /// retroactive KEY/VALUE flips (on `:`/`,`) update it alongside the real array for the same
    /// reason, even though no strict check currently reads it after such a flip.
    pub(crate) last_kind: TokenKind,
    /// Counting-mode-only shadow of the open-container stack: `(pseudo-index, kind)` pairs,
    /// pushed by `container::open` and popped by `container::close` when `tokens == None`, where
    /// there is no real array to scan for the close-bracket grammar check, or to answer "is the
    /// currently open container an OBJECT" (see `container::current_container_is_object`). Stays
    /// empty (no allocation) whenever a real token array is in use. This is the one piece of
    /// parser state that still allocates in counting mode — see DESIGN.md's "counting mode and
    /// the no-allocation promise" note.
    pub(crate) open_stack: Vec<(TokenIndex, TokenKind)>,
}

impl Parser {
    /// Equivalent to the source's `init`: a freshly reset parser for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        let mut parser = Self {
            dialect,
            pos: 0,
            toknext: 0,
            toksuper: NONE,
            expected: TokenKind::empty(),
            last_kind: TokenKind::empty(),
            open_stack: Vec::new(),
        };
        parser.reset();
        parser
    }

    /// Re-initializes an existing record in place: `pos = 0`, `toknext = 0`, `toksuper = NONE`,
    /// and `expected` reset to what the dialect accepts at the start of input.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.toknext = 0;
        self.toksuper = NONE;
        self.last_kind = TokenKind::empty();
        self.open_stack.clear();
        self.expected = match self.dialect {
            Dialect::Strict => TokenKind::CONTAINER,
            Dialect::Permissive => TokenKind::ANY_TYPE,
        };
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Resolves `toksuper` to the nearest enclosing container.
    ///
    /// `toksuper` normally already points at a container, but `:` (§4.4) transiently advances it
    /// to the preceding key so that a stray comma can be repaired; anything registering a child
    /// (assigning `parent`, incrementing `size`) must see the container, not the key, or the
    /// value would be registered as the key's child instead of the object's — see DESIGN.md.
    /// One step of resolution always suffices: `:` only ever advances `toksuper` one token below
    /// its enclosing container.
    pub(crate) fn container_of(&self, tokens: &[Token]) -> TokenIndex {
        if self.toksuper == NONE {
            return NONE;
        }
        let current = &tokens[self.toksuper];
        if current.is_container() {
            return self.toksuper;
        }
        #[cfg(feature = "parent_links")]
        {
            current.parent
        }
        #[cfg(not(feature = "parent_links"))]
        {
            let mut i = self.toksuper;
            while i > 0 {
                i -= 1;
                if tokens[i].start != NONE && tokens[i].end == NONE {
                    return i;
                }
            }
            NONE
        }
    }
}
