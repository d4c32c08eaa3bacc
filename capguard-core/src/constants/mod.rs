//! Constants for CapGuard Core
//!
//! Default values for the sensor health checks, grouped by domain:
//! - **Timing**: scan period and the two anomaly timeouts
//! - **Thresholds**: hyper-event multiplier, derived scan counts and mask limits
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include the unit in the name (`_MS`, `_SCANS`)
//! 3. Derived values are computed here, at build time, from the timing constants
//! 4. Keep the scan period in step with the real sensing cycle time

/// Scan period and anomaly timeouts.
pub mod timing;

/// Rule thresholds and sensor mask limits.
pub mod thresholds;

// Re-export commonly used constants for convenience
pub use timing::{
    SCAN_PERIOD_MS, STUCK_SENSOR_TIMEOUT_MS, NO_MANS_LAND_TIMEOUT_MS,
};

pub use thresholds::{
    HYPER_EVENT_MULTIPLIER, STUCK_SENSOR_COUNT, NO_MANS_LAND_COUNT,
    MAX_SENSORS, ALL_SENSORS,
};
