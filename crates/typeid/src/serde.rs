//! Serde support: identifiers serialize as their canonical text.

use core::{fmt, marker::PhantomData};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{TypeId, TypePrefix, TypedId};

impl Serialize for TypeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<P: TypePrefix> Serialize for TypedId<P> {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

struct TypeIdVisitor<T>(PhantomData<T>);

impl<T> de::Visitor<'_> for TypeIdVisitor<T>
where
    T: core::str::FromStr<Err = crate::Error>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a typeid string such as `user_01h2e8kqvbfwea724h75qc655w`")
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TypeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(TypeIdVisitor(PhantomData))
    }
}

impl<'de, P: TypePrefix> Deserialize<'de> for TypedId<P> {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(TypeIdVisitor(PhantomData))
    }
}
