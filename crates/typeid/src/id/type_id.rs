use core::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;
use uuid::Uuid;

use crate::{
    DEFAULT_GENERATOR, RandSource, RawValue, Result, SEPARATOR, SUFFIX_LEN, TimeSource,
    UuidV7Generator, decode, encode_to_buf, timestamp_of, validate_prefix,
};

/// A type-safe, K-sortable, globally unique identifier.
///
/// A `TypeId` is an optional lowercase type prefix joined to a 26-character
/// base32 suffix that encodes a 128-bit value, usually a UUIDv7:
///
/// ```text
///   user_01h2e8kqvbfwea724h75qc655w
///   └──┘ └────────────────────────┘
///  prefix   suffix (uuidv7, base32)
/// ```
///
/// Values are immutable. Every constructor validates its input, so the
/// accessors never fail.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId {
    prefix: String,
    suffix: [u8; SUFFIX_LEN],
    raw: RawValue,
}

impl TypeId {
    /// Creates an identifier with a fresh UUIDv7 suffix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the
    /// prefix is not valid.
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::TypeId;
    ///
    /// let id = TypeId::new("user").unwrap();
    /// assert_eq!(id.prefix(), "user");
    /// assert_eq!(id.suffix().len(), 26);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn new(prefix: &str) -> Result<Self> {
        Self::with_generator(prefix, &DEFAULT_GENERATOR)
    }

    /// Creates an identifier whose suffix comes from `generator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the
    /// prefix is not valid.
    pub fn with_generator<T, R>(prefix: &str, generator: &UuidV7Generator<T, R>) -> Result<Self>
    where
        T: TimeSource<u64>,
        R: RandSource<u128>,
    {
        validate_prefix(prefix)?;
        Ok(Self::from_validated(prefix, generator.next_raw()))
    }

    /// Creates an identifier from a prefix and an already encoded suffix.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the prefix
    ///   is not valid
    /// - [`Error::InvalidSuffixLength`](crate::Error::InvalidSuffixLength) if
    ///   the suffix is not 26 characters
    /// - [`Error::InvalidCharacter`](crate::Error::InvalidCharacter) or
    ///   [`Error::Overflow`](crate::Error::Overflow) if it does not decode
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::{Error, TypeId};
    ///
    /// let id = TypeId::from_parts("test", "00041061050r3gg28a1c60t3gf").unwrap();
    /// assert_eq!(id.to_string(), "test_00041061050r3gg28a1c60t3gf");
    ///
    /// assert_eq!(
    ///     TypeId::from_parts("test", "abc"),
    ///     Err(Error::InvalidSuffixLength { len: 3 })
    /// );
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn from_parts(prefix: &str, suffix: &str) -> Result<Self> {
        validate_prefix(prefix)?;
        let raw = decode(suffix)?;
        Ok(Self::from_validated(prefix, raw))
    }

    /// Creates an identifier from a prefix and 16 raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the
    /// prefix is not valid.
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::TypeId;
    ///
    /// let bytes = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
    /// let id = TypeId::from_bytes("", bytes).unwrap();
    /// assert_eq!(id.suffix(), "00041061050r3gg28a1c60t3gf");
    /// ```
    pub fn from_bytes(prefix: &str, raw: RawValue) -> Result<Self> {
        validate_prefix(prefix)?;
        Ok(Self::from_validated(prefix, raw))
    }

    /// Creates an identifier from a prefix and a [`Uuid`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the
    /// prefix is not valid.
    pub fn from_uuid(prefix: &str, uuid: Uuid) -> Result<Self> {
        Self::from_bytes(prefix, uuid.into_bytes())
    }

    /// Creates an identifier from a prefix and UUID text such as
    /// `01889c89-df6b-7f1c-a388-91396ec314bc`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUuidText`](crate::Error::InvalidUuidText) if the
    ///   text is not a UUID
    /// - [`Error::InvalidPrefix`](crate::Error::InvalidPrefix) if the prefix
    ///   is not valid
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::TypeId;
    ///
    /// let id = TypeId::from_uuid_str("prefix", "01889c89-df6b-7f1c-a388-91396ec314bc").unwrap();
    /// assert_eq!(id.to_string(), "prefix_01h2e8kqvbfwea724h75qc655w");
    /// ```
    pub fn from_uuid_str(prefix: &str, uuid: &str) -> Result<Self> {
        let uuid = Uuid::try_parse(uuid)?;
        Self::from_uuid(prefix, uuid)
    }

    /// The nil identifier: no prefix, all-zero value.
    #[must_use]
    pub fn nil() -> Self {
        Self::from_validated("", [0; 16])
    }

    /// Returns `true` for an all-zero value, whatever the prefix.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.raw == [0; 16]
    }

    /// Builds the value from parts that are already known to be valid.
    pub(crate) fn from_validated(prefix: &str, raw: RawValue) -> Self {
        let mut suffix = [0; SUFFIX_LEN];
        encode_to_buf(&raw, &mut suffix);
        Self {
            prefix: prefix.to_owned(),
            suffix,
            raw,
        }
    }

    /// The type prefix. Empty when the identifier has no type.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The 26-character base32 suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        // SAFETY: `self.suffix` is only ever written by `encode_to_buf`, which
        // emits bytes from the ASCII alphabet.
        unsafe { core::str::from_utf8_unchecked(&self.suffix) }
    }

    /// The 16 raw bytes the suffix encodes.
    #[must_use]
    pub const fn to_bytes(&self) -> RawValue {
        self.raw
    }

    /// The raw value as a [`Uuid`].
    #[must_use]
    pub const fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.raw)
    }

    /// The raw value as hyphenated UUID text.
    ///
    /// ```
    /// use typeid::TypeId;
    ///
    /// let id: TypeId = "prefix_01h2e8kqvbfwea724h75qc655w".parse().unwrap();
    /// assert_eq!(id.to_uuid_string(), "01889c89-df6b-7f1c-a388-91396ec314bc");
    /// ```
    #[must_use]
    pub fn to_uuid_string(&self) -> String {
        self.to_uuid().hyphenated().to_string()
    }

    /// Milliseconds since the Unix epoch stored in the high 48 bits.
    ///
    /// Only meaningful for time-ordered values such as those produced by
    /// [`TypeId::new`].
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        timestamp_of(&self.raw)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.prefix.is_empty() {
            f.write_str(&self.prefix)?;
            fmt::Write::write_char(f, SEPARATOR)?;
        }
        f.write_str(self.suffix())
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeId")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl From<TypeId> for Uuid {
    fn from(id: TypeId) -> Self {
        id.to_uuid()
    }
}

impl From<&TypeId> for String {
    fn from(id: &TypeId) -> Self {
        id.to_string()
    }
}

impl From<TypeId> for String {
    fn from(id: TypeId) -> Self {
        id.to_string()
    }
}
