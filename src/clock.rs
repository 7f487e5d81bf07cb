//! # Wall Clock
//!
//! The only environment call the issuer makes. [`SystemClock`] reads the
//! process clock; tests and firmware with their own time source implement
//! [`Clock`] directly.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::{SECONDS_PER_MINUTE, UNIX_TIME_NOV_13_2017};
use crate::error::SasTokenError;

/// Source of wall-clock time in Unix seconds.
///
/// A clock that reports a time but was never synchronized cannot be detected
/// here; [`Clock::is_synchronized`] is only a plausibility check.
pub trait Clock {
    fn now(&self) -> Result<u64, SasTokenError>;

    /// True when the clock reads past [`UNIX_TIME_NOV_13_2017`].
    fn is_synchronized(&self) -> bool {
        self.now().map(is_synchronized).unwrap_or(false)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Result<u64, SasTokenError> {
        (**self).now()
    }
}

/// The process system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, SasTokenError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| SasTokenError::Clock(format!("system time before Unix epoch: {e}")))
    }
}

/// A clock reading that could only come from a synchronized clock.
#[inline]
pub const fn is_synchronized(now: u64) -> bool {
    now > UNIX_TIME_NOV_13_2017
}

/// Absolute expiry `minutes` from `now`.
///
/// # Errors
///
/// - [`SasTokenError::Clock`] - the sum does not fit in `u64`.
pub fn expiration_from_minutes(now: u64, minutes: u32) -> Result<u64, SasTokenError> {
    now.checked_add(u64::from(minutes) * SECONDS_PER_MINUTE)
        .ok_or_else(|| SasTokenError::Clock("expiry time overflows u64".into()))
}
