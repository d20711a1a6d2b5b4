use core::str::FromStr;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, Result, SEPARATOR, TypeId};

impl TypeId {
    /// Parses canonical text: either a bare `suffix` or `prefix_suffix`.
    ///
    /// The format is strict. Text with more than one separator is rejected
    /// rather than split on the first or last one, and a separator must be
    /// preceded by a non-empty prefix.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] for more than one separator, or a separator
    ///   with nothing before it
    /// - any error of [`TypeId::from_parts`] for the prefix and suffix
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::{Error, TypeId};
    ///
    /// let id = TypeId::parse("user_01h2e8kqvbfwea724h75qc655w").unwrap();
    /// assert_eq!(id.prefix(), "user");
    ///
    /// let bare = TypeId::parse("00041061050r3gg28a1c60t3gf").unwrap();
    /// assert_eq!(bare.prefix(), "");
    ///
    /// assert!(matches!(TypeId::parse("a_b_c"), Err(Error::InvalidFormat { .. })));
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn parse(text: &str) -> Result<Self> {
        match text.split_once(SEPARATOR) {
            None => Self::from_parts("", text),
            Some((prefix, suffix)) if prefix.is_empty() || suffix.contains(SEPARATOR) => {
                Err(Error::InvalidFormat {
                    input: text.to_owned(),
                })
            }
            Some((prefix, suffix)) => Self::from_parts(prefix, suffix),
        }
    }

    /// Parses the `(prefix,uuid)` tuple form used to store identifiers in SQL
    /// composite columns.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if the text is not a parenthesized pair
    /// - any error of [`TypeId::from_uuid_str`] for the pair
    ///
    /// # Example
    ///
    /// ```
    /// use typeid::TypeId;
    ///
    /// let id = TypeId::from_tuple_str("(user,01889c89-df6b-7f1c-a388-91396ec314bc)").unwrap();
    /// assert_eq!(id.to_string(), "user_01h2e8kqvbfwea724h75qc655w");
    /// ```
    pub fn from_tuple_str(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat {
            input: text.to_owned(),
        };
        let inner = text
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (prefix, uuid) = inner.split_once(',').ok_or_else(invalid)?;
        if uuid.contains(',') {
            return Err(invalid());
        }
        Self::from_uuid_str(prefix, uuid)
    }

    /// Formats the `(prefix,uuid)` tuple form read by
    /// [`TypeId::from_tuple_str`].
    #[must_use]
    pub fn to_tuple_string(&self) -> String {
        format!("({},{})", self.prefix(), self.to_uuid().hyphenated())
    }
}

impl FromStr for TypeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TypeId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl PartialEq<str> for TypeId {
    fn eq(&self, other: &str) -> bool {
        match other.split_once(SEPARATOR) {
            None => self.prefix().is_empty() && self.suffix() == other,
            Some((prefix, suffix)) => {
                !prefix.is_empty() && self.prefix() == prefix && self.suffix() == suffix
            }
        }
    }
}

impl PartialEq<&str> for TypeId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<TypeId> for &str {
    fn eq(&self, other: &TypeId) -> bool {
        other == *self
    }
}
