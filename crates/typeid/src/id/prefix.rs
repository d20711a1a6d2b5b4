use crate::{Error, Result};

/// Maximum number of characters in a type prefix.
pub const MAX_PREFIX_LEN: usize = 63;

/// Separator between the prefix and the suffix in canonical text.
pub const SEPARATOR: char = '_';

/// Returns `true` if `prefix` is empty, or at most [`MAX_PREFIX_LEN`]
/// characters of `a`-`z`.
///
/// Usable in const contexts, which lets [`define_typeid!`](crate::define_typeid)
/// reject a bad prefix at compile time.
#[must_use]
pub const fn is_valid_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    if bytes.len() > MAX_PREFIX_LEN {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

/// Validates a type prefix.
///
/// # Errors
///
/// Returns [`Error::InvalidPrefix`] if the prefix is too long or contains
/// anything other than lowercase ASCII letters.
///
/// # Example
///
/// ```
/// use typeid::validate_prefix;
///
/// assert!(validate_prefix("user").is_ok());
/// assert!(validate_prefix("").is_ok());
/// assert!(validate_prefix("User").is_err());
/// ```
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if is_valid_prefix(prefix) {
        Ok(())
    } else {
        Err(Error::InvalidPrefix {
            prefix: prefix.to_owned(),
        })
    }
}
