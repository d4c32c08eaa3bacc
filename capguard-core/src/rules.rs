//! Sensor classification rules
//!
//! Three independent checks run on every selected sensor:
//!
//! | Rule          | Condition                       | Trips                          |
//! |---------------|---------------------------------|--------------------------------|
//! | Hyper event   | `delta > multiplier * FT`       | immediately                    |
//! | No man's land | `NT < delta < FT + HYST`        | counter goes above its limit   |
//! | Stuck         | touch status set                | counter goes above its limit   |
//!
//! The predicates here are pure. Counting lives in
//! [`crate::SensorHealthMonitor`].
//!
//! All comparisons are done in `u32` so `multiplier * FT` and `FT + HYST`
//! cannot wrap for 16-bit thresholds.

use crate::traits::{SensorState, WidgetThresholds};

/// Which check flagged a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rule {
    /// Delta far above the finger threshold
    HyperEvent,
    /// Delta stuck between noise threshold and touch band
    NoMansLand,
    /// Touch status held too long
    Stuck,
}

impl Rule {
    /// Short name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Rule::HyperEvent => "hyper-event",
            Rule::NoMansLand => "no-man's-land",
            Rule::Stuck => "stuck",
        }
    }
}

/// Signal is larger than any real touch should produce.
///
/// Usually a collapsed baseline followed by raw counts returning to normal.
pub fn is_hyper_event(state: &SensorState, thresholds: &WidgetThresholds, multiplier: u32) -> bool {
    let limit = multiplier.saturating_mul(thresholds.finger_threshold as u32);
    state.signal_delta as u32 > limit
}

/// Signal is above the noise floor but below FT + HYST. Both edges exclusive.
pub fn in_no_mans_land(state: &SensorState, thresholds: &WidgetThresholds) -> bool {
    let delta = state.signal_delta as u32;
    delta > thresholds.noise_threshold as u32 && delta < thresholds.touch_band_limit()
}

/// Sensing service currently reports the sensor as touched
pub fn is_touched(state: &SensorState) -> bool {
    state.touched
}
