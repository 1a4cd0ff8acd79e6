//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources,
//! allowing production code to use real system time while tests can use
//! controllable mock time. The [`UserDirectory`](crate::UserDirectory)
//! takes a clock at construction and stamps user records with it.
//!
//! # Example
//!
//! ```
//! use roster::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now_utc();
//! let millis = clock.now_millis();
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for getting current timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Returns the current time as milliseconds since the Unix epoch.
    ///
    /// Convenience for the BIGINT column representation used by the
    /// directory schema.
    fn now_millis(&self) -> i64 {
        self.now_utc().timestamp_millis()
    }
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock returning a manually controlled time.
///
/// The clock stays at its configured value until moved with [`advance`]
/// or [`set`], so tests get stable, predictable timestamps.
///
/// [`advance`]: FixedClock::advance
/// [`set`]: FixedClock::set
///
/// # Example
///
/// ```
/// use roster::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_704_067_200_000);
/// let t1 = clock.now_millis();
/// clock.advance(1_000);
/// assert_eq!(clock.now_millis(), t1 + 1_000);
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    millis: Mutex<i64>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a new fixed clock at the given time in milliseconds since
    /// the Unix epoch.
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Mutex::new(millis),
        }
    }

    /// Advance the clock by the given number of milliseconds.
    pub fn advance(&self, ms: i64) {
        *self.millis.lock().unwrap() += ms;
    }

    /// Set the clock to a specific time in milliseconds.
    pub fn set(&self, ms: i64) {
        *self.millis.lock().unwrap() = ms;
    }

    /// Get the current time without any conversion.
    pub fn get(&self) -> i64 {
        *self.millis.lock().unwrap()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1_704_067_200_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.get()).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
