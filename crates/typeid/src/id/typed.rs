use core::{cmp::Ordering, fmt, hash, marker::PhantomData, str::FromStr};

use uuid::Uuid;

use crate::{
    DEFAULT_GENERATOR, Error, RandSource, RawValue, Result, TimeSource, TypeId, UuidV7Generator,
    decode, is_valid_prefix,
};

/// Binds a Rust type to a fixed identifier prefix.
///
/// Usually implemented through [`define_typeid!`](crate::define_typeid),
/// which also checks the prefix at compile time.
pub trait TypePrefix {
    /// The prefix every identifier of this type carries.
    const PREFIX: &'static str;
}

/// A [`TypeId`] whose prefix is fixed by `P`.
///
/// Different prefixes are different Rust types, so a `TypedId<User>` cannot
/// be passed where a `TypedId<Org>` is expected.
///
/// # Example
///
/// ```
/// use typeid::{Error, TypedId, define_typeid};
///
/// define_typeid!(pub User = "user");
/// define_typeid!(pub Org = "org");
///
/// type UserId = TypedId<User>;
///
/// let id = UserId::new();
/// assert!(id.to_string().starts_with("user_"));
///
/// let parsed: UserId = id.to_string().parse().unwrap();
/// assert_eq!(parsed, id);
///
/// assert!(matches!(
///     TypedId::<Org>::parse(&id.to_string()),
///     Err(Error::PrefixMismatch { expected: "org", .. })
/// ));
/// ```
pub struct TypedId<P: TypePrefix> {
    id: TypeId,
    _prefix: PhantomData<fn() -> P>,
}

impl<P: TypePrefix> TypedId<P> {
    const PREFIX_IS_VALID: () = assert!(is_valid_prefix(P::PREFIX), "invalid typeid prefix");

    fn wrap(id: TypeId) -> Self {
        Self {
            id,
            _prefix: PhantomData,
        }
    }

    fn from_validated(raw: RawValue) -> Self {
        let () = Self::PREFIX_IS_VALID;
        Self::wrap(TypeId::from_validated(P::PREFIX, raw))
    }

    /// Creates an identifier with a fresh UUIDv7 suffix.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_generator(&DEFAULT_GENERATOR)
    }

    /// Creates an identifier whose suffix comes from `generator`.
    #[must_use]
    pub fn with_generator<T, R>(generator: &UuidV7Generator<T, R>) -> Self
    where
        T: TimeSource<u64>,
        R: RandSource<u128>,
    {
        Self::from_validated(generator.next_raw())
    }

    /// Creates an identifier from an encoded suffix.
    ///
    /// # Errors
    ///
    /// Returns the suffix errors of [`TypeId::from_parts`].
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        Ok(Self::from_validated(decode(suffix)?))
    }

    /// Creates an identifier from 16 raw bytes.
    #[must_use]
    pub fn from_bytes(raw: RawValue) -> Self {
        Self::from_validated(raw)
    }

    /// Creates an identifier from a [`Uuid`].
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self::from_validated(uuid.into_bytes())
    }

    /// Creates an identifier from UUID text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUuidText`] if the text is not a UUID.
    pub fn from_uuid_str(uuid: &str) -> Result<Self> {
        Ok(Self::from_uuid(Uuid::try_parse(uuid)?))
    }

    /// Parses canonical text and checks its prefix.
    ///
    /// # Errors
    ///
    /// - any error of [`TypeId::parse`]
    /// - [`Error::PrefixMismatch`] if the prefix is not `P::PREFIX`
    pub fn parse(text: &str) -> Result<Self> {
        TypeId::parse(text)?.try_into()
    }

    /// The prefix shared by every identifier of this type.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        P::PREFIX
    }

    /// The 26-character base32 suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.id.suffix()
    }

    /// The 16 raw bytes the suffix encodes.
    #[must_use]
    pub const fn to_bytes(&self) -> RawValue {
        self.id.to_bytes()
    }

    /// The raw value as a [`Uuid`].
    #[must_use]
    pub const fn to_uuid(&self) -> Uuid {
        self.id.to_uuid()
    }

    /// Milliseconds since the Unix epoch stored in the high 48 bits.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.id.timestamp_ms()
    }

    /// Borrows the untyped identifier.
    #[must_use]
    pub const fn as_type_id(&self) -> &TypeId {
        &self.id
    }

    /// Returns the untyped identifier.
    #[must_use]
    pub fn into_inner(self) -> TypeId {
        self.id
    }
}

impl<P: TypePrefix> TryFrom<TypeId> for TypedId<P> {
    type Error = Error;

    fn try_from(id: TypeId) -> Result<Self> {
        if id.prefix() == P::PREFIX {
            Ok(Self::wrap(id))
        } else {
            Err(Error::PrefixMismatch {
                expected: P::PREFIX,
                actual: id.prefix().to_owned(),
            })
        }
    }
}

impl<P: TypePrefix> From<TypedId<P>> for TypeId {
    fn from(id: TypedId<P>) -> Self {
        id.id
    }
}

impl<P: TypePrefix> AsRef<TypeId> for TypedId<P> {
    fn as_ref(&self) -> &TypeId {
        &self.id
    }
}

impl<P: TypePrefix> FromStr for TypedId<P> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<P: TypePrefix> fmt::Display for TypedId<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl<P: TypePrefix> fmt::Debug for TypedId<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedId")
            .field(&format_args!("{}", self.id))
            .finish()
    }
}

// Manual impls: derives would needlessly require `P` itself to implement
// these traits.
impl<P: TypePrefix> Clone for TypedId<P> {
    fn clone(&self) -> Self {
        Self::wrap(self.id.clone())
    }
}

impl<P: TypePrefix> PartialEq for TypedId<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P: TypePrefix> Eq for TypedId<P> {}

impl<P: TypePrefix> PartialOrd for TypedId<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: TypePrefix> Ord for TypedId<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<P: TypePrefix> hash::Hash for TypedId<P> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Declares a marker type implementing [`TypePrefix`].
///
/// The prefix is validated at compile time:
///
/// ```compile_fail
/// typeid::define_typeid!(Bad = "Bad_Prefix");
/// ```
///
/// # Example
///
/// ```
/// use typeid::{TypePrefix, TypedId, define_typeid};
///
/// define_typeid!(
///     /// Accounts.
///     pub Account = "account"
/// );
///
/// assert_eq!(Account::PREFIX, "account");
/// let id = TypedId::<Account>::new();
/// assert_eq!(id.prefix(), "account");
/// ```
#[macro_export]
macro_rules! define_typeid {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        $vis struct $name;

        const _: () = {
            // Compile-time check: the prefix must be lowercase ascii letters
            // and at most 63 characters long.
            assert!(
                $crate::is_valid_prefix($prefix),
                concat!("invalid typeid prefix: ", $prefix)
            );
        };

        impl $crate::TypePrefix for $name {
            const PREFIX: &'static str = $prefix;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    crate::define_typeid!(User = "user");
    crate::define_typeid!(Org = "org");
    crate::define_typeid!(Untyped = "");

    const SUFFIX: &str = "01h2e8kqvbfwea724h75qc655w";

    #[test]
    fn new_carries_the_type_prefix() {
        let id = TypedId::<User>::new();
        assert_eq!(id.prefix(), "user");
        assert_eq!(id.as_type_id().prefix(), "user");
        assert_eq!(decode(id.suffix()), Ok(id.to_bytes()));
    }

    #[test]
    fn parse_checks_prefix() {
        let text = format!("user_{SUFFIX}");
        let id: TypedId<User> = text.parse().unwrap();
        assert_eq!(id.to_string(), text);
        assert_eq!(id.suffix(), SUFFIX);

        assert_eq!(
            TypedId::<Org>::parse(&text),
            Err(Error::PrefixMismatch {
                expected: "org",
                actual: "user".into(),
            })
        );
        assert_eq!(
            TypedId::<User>::parse(SUFFIX),
            Err(Error::PrefixMismatch {
                expected: "user",
                actual: String::new(),
            })
        );
        assert!(matches!(
            TypedId::<User>::parse("user_abc"),
            Err(Error::InvalidSuffixLength { len: 3 })
        ));
    }

    #[test]
    fn empty_prefix_type() {
        let id: TypedId<Untyped> = SUFFIX.parse().unwrap();
        assert_eq!(id.to_string(), SUFFIX);
    }

    #[test]
    fn conversions() {
        let untyped = TypeId::from_uuid_str("user", "01889c89-df6b-7f1c-a388-91396ec314bc").unwrap();
        let typed = TypedId::<User>::try_from(untyped.clone()).unwrap();
        assert_eq!(typed.as_ref(), &untyped);
        assert_eq!(TypeId::from(typed.clone()), untyped);
        assert_eq!(typed.clone().into_inner(), untyped);

        assert_eq!(TypedId::<User>::from_bytes(untyped.to_bytes()), typed);
        assert_eq!(TypedId::<User>::from_uuid(untyped.to_uuid()), typed);
        assert_eq!(
            TypedId::<User>::from_uuid_str("01889c89-df6b-7f1c-a388-91396ec314bc"),
            Ok(typed.clone())
        );
        assert_eq!(TypedId::<User>::from_suffix(SUFFIX), Ok(typed.clone()));
        assert_eq!(format!("{typed:?}"), format!("TypedId(user_{SUFFIX})"));
    }

    #[test]
    fn works_as_a_set_key() {
        let ids: HashSet<TypedId<User>> = (0..100).map(|_| TypedId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn marker_does_not_need_traits() {
        struct Bare;
        impl TypePrefix for Bare {
            const PREFIX: &'static str = "bare";
        }
        fn assert_send_sync<T: Send + Sync + Clone + Eq + hash::Hash>() {}
        assert_send_sync::<TypedId<Bare>>();
        assert_eq!(TypedId::<Bare>::new().prefix(), "bare");
    }
}
