use bitflags::bitflags;

bitflags! {
    /// The grammatical kind of a [`Token`](crate::Token), and (reused as the same type) the
    /// set of kinds grammatically expected at the current byte.
    ///
    /// Flags are independent and combinable: a finished string key carries both
    /// [`STRING`](TokenKind::STRING) and [`KEY`](TokenKind::KEY); the `expected` set at a given
    /// byte is typically several flags ORed together.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenKind: u8 {
        /// `{...}` container.
        const OBJECT    = 0b0000_0001;
        /// `[...]` container.
        const ARRAY     = 0b0000_0010;
        /// A quoted string.
        const STRING    = 0b0000_0100;
        /// An unquoted run: number, `true`/`false`/`null` (strict), or any unquoted text
        /// (permissive).
        const PRIMITIVE = 0b0000_1000;
        /// The token occupies a key position in an object.
        const KEY       = 0b0001_0000;
        /// The token occupies a value position.
        const VALUE     = 0b0010_0000;
        /// `}` or `]` is grammatically expected next.
        const CLOSE     = 0b0100_0000;
        /// `:` or `,` is grammatically expected next.
        const DELIMITER = 0b1000_0000;

        /// Either container kind.
        const CONTAINER = Self::OBJECT.bits() | Self::ARRAY.bits();
        /// Any of the four element kinds (object, array, string, primitive).
        const ANY_TYPE = Self::OBJECT.bits() | Self::ARRAY.bits() | Self::STRING.bits() | Self::PRIMITIVE.bits();
    }
}

impl TokenKind {
    /// Bitwise AND of `self` with `mask`. The raw result is rarely useful on its own; it backs
    /// [`kind_is`](Self::kind_is) and [`kind_has_any`](Self::kind_has_any), which are the two
    /// comparisons actually wanted at call sites.
    pub fn kind_masked(self, mask: TokenKind) -> TokenKind {
        self & mask
    }

    /// "Is exactly this combination of flags" — strict equality against `mask`, not a subset
    /// test. Use this to distinguish e.g. a plain `VALUE` string from a `STRING | KEY`.
    pub fn kind_is(self, mask: TokenKind) -> bool {
        self == mask
    }

    /// "Has any of these flags" — a non-empty intersection with `mask`. Use this for checks
    /// like "is this a container of some kind" (`kind_has_any(TokenKind::CONTAINER)`).
    pub fn kind_has_any(self, mask: TokenKind) -> bool {
        self.intersects(mask)
    }
}
