#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The unit is expected to be **milliseconds** since the Unix epoch.
///
/// # Example
///
/// ```
/// use typeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

/// Reads `SystemTime::now()` on every call.
///
/// A clock set before the Unix epoch reads as `0`. Wall-clock adjustments
/// (NTP steps, manual changes) are visible, so two successive readings are not
/// guaranteed to be ordered.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}
