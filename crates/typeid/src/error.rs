use crate::Base32Error;

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `typeid` can produce.
///
/// Every variant is a deterministic validation failure of the input. Nothing
/// here is transient, so retrying with the same input always fails the same
/// way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The prefix contains a character outside `a`-`z`, or is longer than
    /// [`MAX_PREFIX_LEN`](crate::MAX_PREFIX_LEN).
    #[error("invalid prefix {prefix:?}: must be at most 63 ascii letters [a-z]")]
    InvalidPrefix { prefix: String },

    /// The suffix is not exactly [`SUFFIX_LEN`](crate::SUFFIX_LEN) bytes long.
    #[error("invalid suffix length: expected 26 characters, got {len}")]
    InvalidSuffixLength { len: usize },

    /// The suffix contains a byte outside the base32 alphabet.
    #[error("invalid suffix character '{}' at index {index}", .byte.escape_ascii())]
    InvalidCharacter { byte: u8, index: usize },

    /// The suffix encodes a value wider than 128 bits.
    #[error("suffix overflows 128 bits: first character must be in 0-7")]
    Overflow,

    /// The canonical text is not `suffix` or `prefix_suffix`.
    #[error("invalid typeid {input:?}")]
    InvalidFormat { input: String },

    /// The standard UUID text could not be parsed.
    #[error("invalid uuid text: {0}")]
    InvalidUuidText(#[from] uuid::Error),

    /// A typed identifier was built from an identifier with another prefix.
    #[error("invalid type, expected {expected:?} but got {actual:?}")]
    PrefixMismatch {
        expected: &'static str,
        actual: String,
    },
}

impl From<Base32Error> for Error {
    fn from(err: Base32Error) -> Self {
        match err {
            Base32Error::InvalidLength { len } => Self::InvalidSuffixLength { len },
            Base32Error::InvalidCharacter { byte, index } => Self::InvalidCharacter { byte, index },
            Base32Error::Overflow => Self::Overflow,
        }
    }
}

impl Error {
    /// Returns `true` if the error was caused by the type prefix.
    #[must_use]
    pub const fn is_prefix_error(&self) -> bool {
        matches!(self, Self::InvalidPrefix { .. } | Self::PrefixMismatch { .. })
    }

    /// Returns `true` if the error was caused by the encoded suffix.
    #[must_use]
    pub const fn is_suffix_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSuffixLength { .. } | Self::InvalidCharacter { .. } | Self::Overflow
        )
    }
}
