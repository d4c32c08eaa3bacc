//! Timing Constants
//!
//! The health checks count scans, not milliseconds. Timeouts are given in
//! milliseconds here and converted to scan counts by dividing by the scan
//! period (see [`crate::constants::thresholds`]).

use fugit::MillisDurationU32;

/// Estimated duration of one complete sensing cycle (ms).
///
/// Must match the real time between two `check` calls, otherwise the
/// timeouts below lose their meaning.
pub const SCAN_PERIOD_MS: u32 = 10;

/// How long a sensor may report "touched" before it is considered stuck (ms).
///
/// A deliberate press rarely lasts six seconds on a button or slider.
pub const STUCK_SENSOR_TIMEOUT_MS: u32 = 6000;

/// How long a signal may sit between NT and FT+HYST before it is flagged (ms).
pub const NO_MANS_LAND_TIMEOUT_MS: u32 = 3000;

/// [`SCAN_PERIOD_MS`] as a duration.
pub const SCAN_PERIOD: MillisDurationU32 = MillisDurationU32::millis(SCAN_PERIOD_MS);

/// [`STUCK_SENSOR_TIMEOUT_MS`] as a duration.
pub const STUCK_SENSOR_TIMEOUT: MillisDurationU32 =
    MillisDurationU32::millis(STUCK_SENSOR_TIMEOUT_MS);

/// [`NO_MANS_LAND_TIMEOUT_MS`] as a duration.
pub const NO_MANS_LAND_TIMEOUT: MillisDurationU32 =
    MillisDurationU32::millis(NO_MANS_LAND_TIMEOUT_MS);
