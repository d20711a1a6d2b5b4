#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{RandSource, RawValue, SystemClock, ThreadRandom, TimeSource};

/// Bit layout of a version 7 UUID, MSB first:
///
/// ```text
///  Bit Index:  127           80 79  76 75     64 63 62 61           0
///              +---------------+------+---------+-----+-------------+
///  Field:      | unix_ms (48)  | ver  | rand_a  | var | rand_b (62) |
///              |               | 0111 |  (12)   | 10  |             |
///              +---------------+------+---------+-----+-------------+
///              |<------------------ MSB -- 128 bits -- LSB -------->|
/// ```
pub const TIMESTAMP_BITS: u32 = 48;
pub const RAND_A_BITS: u32 = 12;
pub const RAND_B_BITS: u32 = 62;

pub const RAND_B_SHIFT: u32 = 0;
pub const VARIANT_SHIFT: u32 = RAND_B_SHIFT + RAND_B_BITS;
pub const RAND_A_SHIFT: u32 = VARIANT_SHIFT + 2;
pub const VERSION_SHIFT: u32 = RAND_A_SHIFT + RAND_A_BITS;
pub const TIMESTAMP_SHIFT: u32 = VERSION_SHIFT + 4;

pub const TIMESTAMP_MASK: u128 = (1 << TIMESTAMP_BITS) - 1;
pub const RAND_A_MASK: u128 = (1 << RAND_A_BITS) - 1;
pub const RAND_B_MASK: u128 = (1 << RAND_B_BITS) - 1;

pub const VERSION: u128 = 0b0111;
pub const VARIANT: u128 = 0b10;

const _: () = {
    assert!(
        TIMESTAMP_SHIFT + TIMESTAMP_BITS == u128::BITS,
        "Layout must match underlying type width"
    );
};

/// Packs a millisecond timestamp and random bits into a version 7 UUID.
///
/// Only the low 48 bits of `timestamp` and the low 74 bits of `random` are
/// used. The version and variant bits are always set.
#[must_use]
pub const fn compose_v7(timestamp: u64, random: u128) -> RawValue {
    let ts = (timestamp as u128 & TIMESTAMP_MASK) << TIMESTAMP_SHIFT;
    let rand_a = ((random >> RAND_B_BITS) & RAND_A_MASK) << RAND_A_SHIFT;
    let rand_b = (random & RAND_B_MASK) << RAND_B_SHIFT;
    let raw = ts | (VERSION << VERSION_SHIFT) | rand_a | (VARIANT << VARIANT_SHIFT) | rand_b;
    raw.to_be_bytes()
}

/// Extracts the 48-bit millisecond timestamp from a version 7 value.
#[must_use]
pub const fn timestamp_of(raw: &RawValue) -> u64 {
    ((u128::from_be_bytes(*raw) >> TIMESTAMP_SHIFT) & TIMESTAMP_MASK) as u64
}

/// A *non-monotonic* UUIDv7 generator.
///
/// Every call reads the clock and the random source; nothing is cached. Values
/// from strictly increasing milliseconds are strictly increasing, while values
/// within the same millisecond are ordered randomly. The 74 random bits make a
/// same-millisecond collision negligible in practice.
///
/// ## Features
/// - ✅ Thread-safe when `T` and `R` are (the defaults are)
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered across milliseconds
#[derive(Clone, Debug)]
pub struct UuidV7Generator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u128>,
{
    time: T,
    rng: R,
}

impl<T, R> UuidV7Generator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u128>,
{
    /// Creates a new [`UuidV7Generator`] with the provided time source and
    /// RNG.
    ///
    /// # Example
    /// ```
    /// use typeid::{SystemClock, ThreadRandom, UuidV7Generator};
    ///
    /// let generator = UuidV7Generator::new(SystemClock, ThreadRandom);
    /// let raw = generator.next_raw();
    /// assert_eq!(raw[6] >> 4, 0b0111);
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates a fresh 128-bit value.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_raw(&self) -> RawValue {
        compose_v7(self.time.current_millis(), self.rng.rand())
    }
}

impl Default for UuidV7Generator<SystemClock, ThreadRandom> {
    fn default() -> Self {
        DEFAULT_GENERATOR
    }
}

/// The generator used when an identifier is created without a value.
pub const DEFAULT_GENERATOR: UuidV7Generator<SystemClock, ThreadRandom> =
    UuidV7Generator::new(SystemClock, ThreadRandom);

/// Generates a fresh UUIDv7 with the wall clock and the thread-local RNG.
///
/// # Example
/// ```
/// let a = typeid::uuid_v7();
/// let b = typeid::uuid_v7();
/// assert_ne!(a, b);
/// ```
#[must_use]
pub fn uuid_v7() -> RawValue {
    DEFAULT_GENERATOR.next_raw()
}
