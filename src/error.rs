//! Error types for parsing and component construction.

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the character.
    UnexpectedChar,
    /// Invalid IP literal address.
    ///
    /// The error index points to the preceding left square bracket "[".
    InvalidIpLiteral,
    /// Port text that is not a valid decimal `u32` number.
    ///
    /// The error index points to the first character of the port.
    InvalidPort,
    /// Input ended where the grammar required more.
    ///
    /// The error index points past the last character of the input.
    UnexpectedEnd,
}

/// An error occurred when parsing URI references.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> ParseError {
        ParseError { index, kind }
    }

    /// Returns the byte index of the input where the error occurred.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl std::error::Error for ParseError {}

/// Detailed cause of a [`BuildError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// A scheme name that is empty, does not start with a letter, or contains
    /// a character outside `ALPHA / DIGIT / "+" / "-" / "."`.
    InvalidSchemeName,
    /// Host text that is not a dotted-quad IPv4 address.
    InvalidIpv4,
    /// Host text that is not an IPv6 address.
    InvalidIpv6,
}

/// An error occurred when constructing a component from raw text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildError {
    pub(crate) kind: BuildErrorKind,
}

impl BuildError {
    pub(crate) fn new(kind: BuildErrorKind) -> BuildError {
        BuildError { kind }
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }
}

impl std::error::Error for BuildError {}
