//! Monitor configuration
//!
//! The two counting rules are configured in time, not scans:
//!
//! ```text
//! count = timeout_ms / scan_period_ms      (truncating)
//! ```
//!
//! A scan-count threshold can also be set directly, which replaces the
//! derived value for that rule.
//!
//! ```rust
//! use capguard_core::MonitorConfig;
//!
//! // 20 ms sensing cycle, stuck after 5 s
//! let config = MonitorConfig::default()
//!     .with_scan_period_ms(20)
//!     .with_stuck_timeout_ms(5000);
//!
//! assert_eq!(config.stuck_count(), 250);
//! assert_eq!(config.no_mans_land_count(), 150);
//! assert!(config.validate().is_ok());
//! ```

use fugit::MillisDurationU32;

use crate::constants::{
    timing::{NO_MANS_LAND_TIMEOUT, SCAN_PERIOD, STUCK_SENSOR_TIMEOUT},
    HYPER_EVENT_MULTIPLIER,
};
use crate::errors::{ConfigError, ConfigResult};

/// Timing and threshold settings for [`crate::SensorHealthMonitor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Time between two consecutive checks
    pub scan_period: MillisDurationU32,

    /// Continuous touch duration before a sensor is stuck
    pub stuck_timeout: MillisDurationU32,

    /// In-band duration before a sensor is in no man's land
    pub no_mans_land_timeout: MillisDurationU32,

    /// Signal above `multiplier * FT` is a hyper event
    pub hyper_event_multiplier: u32,

    /// Overrides the derived stuck scan count
    pub stuck_count_override: Option<u32>,

    /// Overrides the derived no-man's-land scan count
    pub no_mans_land_count_override: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scan_period: SCAN_PERIOD,
            stuck_timeout: STUCK_SENSOR_TIMEOUT,
            no_mans_land_timeout: NO_MANS_LAND_TIMEOUT,
            hyper_event_multiplier: HYPER_EVENT_MULTIPLIER,
            stuck_count_override: None,
            no_mans_land_count_override: None,
        }
    }
}

impl MonitorConfig {
    /// Set the scan period
    pub fn with_scan_period(mut self, period: MillisDurationU32) -> Self {
        self.scan_period = period;
        self
    }

    /// Set the scan period in milliseconds
    pub fn with_scan_period_ms(self, ms: u32) -> Self {
        self.with_scan_period(MillisDurationU32::millis(ms))
    }

    /// Set the stuck-sensor timeout in milliseconds
    pub fn with_stuck_timeout_ms(mut self, ms: u32) -> Self {
        self.stuck_timeout = MillisDurationU32::millis(ms);
        self
    }

    /// Set the no-man's-land timeout in milliseconds
    pub fn with_no_mans_land_timeout_ms(mut self, ms: u32) -> Self {
        self.no_mans_land_timeout = MillisDurationU32::millis(ms);
        self
    }

    /// Set the hyper-event multiplier
    pub fn with_hyper_event_multiplier(mut self, multiplier: u32) -> Self {
        self.hyper_event_multiplier = multiplier;
        self
    }

    /// Use a fixed stuck scan count instead of deriving it
    pub fn with_stuck_count(mut self, scans: u32) -> Self {
        self.stuck_count_override = Some(scans);
        self
    }

    /// Use a fixed no-man's-land scan count instead of deriving it
    pub fn with_no_mans_land_count(mut self, scans: u32) -> Self {
        self.no_mans_land_count_override = Some(scans);
        self
    }

    /// Scans a sensor may stay touched before being flagged.
    ///
    /// The sensor is flagged on the scan where its counter goes *above* this.
    pub fn stuck_count(&self) -> u32 {
        self.stuck_count_override
            .unwrap_or_else(|| scans_for(self.stuck_timeout, self.scan_period))
    }

    /// Scans a sensor may stay in the band before being flagged
    pub fn no_mans_land_count(&self) -> u32 {
        self.no_mans_land_count_override
            .unwrap_or_else(|| scans_for(self.no_mans_land_timeout, self.scan_period))
    }

    /// Reject settings that would make the checks meaningless
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scan_period.ticks() == 0 {
            return Err(ConfigError::ZeroScanPeriod);
        }

        if self.hyper_event_multiplier == 0 {
            return Err(ConfigError::ZeroMultiplier);
        }

        if self.stuck_count() == 0 {
            return Err(ConfigError::ZeroScanCount { rule: "stuck" });
        }

        if self.no_mans_land_count() == 0 {
            return Err(ConfigError::ZeroScanCount { rule: "no-man's-land" });
        }

        Ok(())
    }
}

/// Whole scans in `timeout`. Zero when the period is zero.
fn scans_for(timeout: MillisDurationU32, period: MillisDurationU32) -> u32 {
    timeout
        .to_millis()
        .checked_div(period.to_millis())
        .unwrap_or(0)
}
