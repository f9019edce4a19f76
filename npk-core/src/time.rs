//! Timestamps
//!
//! A [`Timestamp`] counts nanoseconds from 2000-01-01T00:00:00Z. It is
//! converted to the native representation only at the OS boundary.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Nanoseconds between the Unix epoch and 2000-01-01
const UNIX_TO_Y2K_NANOS: i64 = 946_684_800 * NANOS_PER_SEC;

/// FILETIME ticks (100 ns) between 1601-01-01 and 2000-01-01
const FILETIME_TO_Y2K_TICKS: u64 = 125_911_584_000_000_000;

const NANOS_PER_FILETIME_TICK: i64 = 100;

/// Earliest timestamp whose Unix seconds fit in an `i32`
const MIN_UNIX32: i64 = i32::MIN as i64 * NANOS_PER_SEC - UNIX_TO_Y2K_NANOS;

/// First timestamp past the 32-bit Unix range (2038-01-19T03:14:08Z)
const MAX_UNIX32: i64 = (i32::MAX as i64 + 1) * NANOS_PER_SEC - UNIX_TO_Y2K_NANOS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const Y2K: Timestamp = Timestamp(0);

    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    pub fn as_nanos(self) -> i64 {
        self.0
    }

    /// Whole Unix seconds, clamped to the 32-bit range.
    pub fn to_unix_time(self) -> i32 {
        if self.0 < MIN_UNIX32 {
            return i32::MIN;
        }
        if self.0 >= MAX_UNIX32 {
            return i32::MAX;
        }
        ((self.0 + UNIX_TO_Y2K_NANOS).div_euclid(NANOS_PER_SEC)) as i32
    }

    pub fn from_unix_time(secs: i32) -> Self {
        Timestamp(i64::from(secs) * NANOS_PER_SEC - UNIX_TO_Y2K_NANOS)
    }

    /// From a Windows FILETIME value (100 ns ticks since 1601).
    pub fn from_win_filetime(ticks: u64) -> Self {
        let y2k = ticks as i128 - FILETIME_TO_Y2K_TICKS as i128;
        let nanos = y2k * NANOS_PER_FILETIME_TICK as i128;
        Timestamp(nanos.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    pub fn to_win_filetime(self) -> u64 {
        let ticks = self.0.div_euclid(NANOS_PER_FILETIME_TICK) as i128 + FILETIME_TO_Y2K_TICKS as i128;
        ticks.clamp(0, u64::MAX as i128) as u64
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        let unix_nanos = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i128::try_from(after.as_nanos()).unwrap_or(i128::MAX),
            Err(before) => -i128::try_from(before.duration().as_nanos()).unwrap_or(i128::MAX),
        };
        Self::from_unix_nanos(unix_nanos)
    }

    /// From the seconds and nanoseconds fields of a `struct stat` time.
    pub fn from_unix_parts(secs: i64, nanos: i64) -> Self {
        Self::from_unix_nanos(i128::from(secs) * i128::from(NANOS_PER_SEC) + i128::from(nanos))
    }

    fn from_unix_nanos(unix_nanos: i128) -> Self {
        let y2k = unix_nanos - i128::from(UNIX_TO_Y2K_NANOS);
        Timestamp(y2k.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    pub fn to_system_time(self) -> SystemTime {
        let unix_nanos = i128::from(self.0) + i128::from(UNIX_TO_Y2K_NANOS);
        let magnitude = Duration::from_nanos(unix_nanos.unsigned_abs() as u64);
        if unix_nanos >= 0 {
            UNIX_EPOCH + magnitude
        } else {
            UNIX_EPOCH - magnitude
        }
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from(self.to_system_time())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}
