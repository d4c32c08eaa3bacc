//! Core health monitor for CapGuard
//!
//! Watches capacitive touch sensors for three failure patterns and
//! optionally asks the sensing service to re-anchor their baselines:
//! - **Stuck**: touch reported for too long
//! - **No man's land**: signal parked between NT and FT + HYST
//! - **Hyper event**: signal far above any real touch
//!
//! Key constraints:
//! - Runs inside the sensing loop, once per scan
//! - No heap allocation, counters live in the monitor
//! - At most 32 sensors (one bit each in [`SensorMask`])
//!
//! ```no_run
//! use capguard_core::{SensorHealthMonitor, SensorMask};
//! use capguard_core::backend::MemoryBackend;
//!
//! let mut backend = MemoryBackend::new();
//! let mut monitor = SensorHealthMonitor::<8>::default();
//!
//! // Call once per completed scan
//! let flagged = monitor.check(&mut backend, SensorMask::ALL, true);
//! if !flagged.is_empty() {
//!     // Sensors in `flagged` had their baselines reset
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mask;
pub mod monitor;
pub mod rules;
pub mod traits;

// Public API
pub use config::MonitorConfig;
pub use errors::{ConfigError, ConfigResult};
pub use mask::SensorMask;
pub use monitor::{CheckReport, SensorHealthMonitor};
pub use rules::Rule;
pub use traits::{SensingBackend, SensorState, WidgetThresholds};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
