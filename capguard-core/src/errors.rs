//! Configuration Error Types
//!
//! ## Design Philosophy
//!
//! A detected anomaly is not an error. It is the output of the monitor and is
//! reported through [`crate::SensorMask`] bits. The errors here only describe
//! configurations that would make the checks meaningless:
//!
//! 1. **Small Size**: every variant is a few bytes and the enum is `Copy`.
//! 2. **No Heap Allocation**: no `String`, only integers and `&'static str`.
//! 3. **Raised Once**: configuration is validated at start-up, never in the
//!    per-scan path. [`crate::SensorHealthMonitor::check`] cannot fail.
//!
//! ## Error Categories
//!
//! ### Timing
//! - `ZeroScanPeriod`: timeouts cannot be converted to scan counts
//! - `ZeroScanCount`: a timeout shorter than one scan would flag every sensor
//!
//! ### Thresholds
//! - `ZeroMultiplier`: any positive delta would count as a hyper event
//!
//! ### Layout
//! - `LayoutMismatch`: the backend exposes a different number of sensors than
//!   the monitor was built for
//! - `WidgetOutOfRange` / `SensorOutOfRange`: a widget or sensor address that
//!   does not exist in the layout
//! - `LayoutFull`: the in-memory backend cannot hold another widget or sensor
//!
//! ```rust
//! use capguard_core::{ConfigError, MonitorConfig};
//!
//! let config = MonitorConfig::default().with_scan_period_ms(0);
//! assert_eq!(config.validate(), Err(ConfigError::ZeroScanPeriod));
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Scan period of zero milliseconds
    #[error("Scan period must be at least 1 ms")]
    ZeroScanPeriod,

    /// Hyper-event multiplier of zero
    #[error("Hyper-event multiplier must be at least 1")]
    ZeroMultiplier,

    /// A timeout shorter than one scan period
    #[error("{rule} threshold derives to zero scans")]
    ZeroScanCount {
        /// Name of the rule whose threshold is zero
        rule: &'static str,
    },

    /// Backend sensor count does not match the monitor capacity
    #[error("Layout has {found} sensors, monitor expects {expected}")]
    LayoutMismatch {
        /// Sensor count the monitor was built for
        expected: usize,
        /// Sensor count reported by the backend
        found: usize,
    },

    /// Widget index beyond the configured widgets
    #[error("Widget {widget} out of range ({count} widgets)")]
    WidgetOutOfRange {
        /// Requested widget
        widget: usize,
        /// Configured widget count
        count: usize,
    },

    /// Sensor index beyond the widget's sensor count
    #[error("Sensor {sensor} out of range for widget {widget}")]
    SensorOutOfRange {
        /// Widget that was addressed
        widget: usize,
        /// Requested sensor within the widget
        sensor: usize,
    },

    /// Fixed-capacity layout storage is exhausted
    #[error("Layout storage full")]
    LayoutFull,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroScanPeriod =>
                defmt::write!(fmt, "Scan period is zero"),
            Self::ZeroMultiplier =>
                defmt::write!(fmt, "Hyper-event multiplier is zero"),
            Self::ZeroScanCount { rule } =>
                defmt::write!(fmt, "{} threshold is zero scans", rule),
            Self::LayoutMismatch { expected, found } =>
                defmt::write!(fmt, "Layout has {} sensors, expected {}", found, expected),
            Self::WidgetOutOfRange { widget, count } =>
                defmt::write!(fmt, "Widget {} out of range ({})", widget, count),
            Self::SensorOutOfRange { widget, sensor } =>
                defmt::write!(fmt, "Sensor {} out of range for widget {}", sensor, widget),
            Self::LayoutFull =>
                defmt::write!(fmt, "Layout storage full"),
        }
    }
}
