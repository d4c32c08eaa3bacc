//! Rule Thresholds and Mask Limits

use super::timing::{NO_MANS_LAND_TIMEOUT_MS, SCAN_PERIOD_MS, STUCK_SENSOR_TIMEOUT_MS};

/// Multiple of the finger threshold above which a signal is a hyper event.
///
/// A real finger produces a delta a little above FT. Twice FT usually means
/// the baseline collapsed and raw counts then recovered, which looks like a
/// huge touch.
pub const HYPER_EVENT_MULTIPLIER: u32 = 2;

/// Consecutive touched scans tolerated before a sensor is reported stuck.
///
/// 6000 ms / 10 ms = 600 scans. Truncating division.
pub const STUCK_SENSOR_COUNT: u32 = STUCK_SENSOR_TIMEOUT_MS / SCAN_PERIOD_MS;

/// In-band scans tolerated before a sensor is reported in no man's land.
///
/// 3000 ms / 10 ms = 300 scans. Truncating division.
pub const NO_MANS_LAND_COUNT: u32 = NO_MANS_LAND_TIMEOUT_MS / SCAN_PERIOD_MS;

/// Width of a [`crate::SensorMask`].
pub const MAX_SENSORS: usize = 32;

/// Selector value that checks every configured sensor.
pub const ALL_SENSORS: u32 = 0xFFFF_FFFF;
