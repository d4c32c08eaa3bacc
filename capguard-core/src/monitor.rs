//! Capacitive Sensor Health Monitor
//!
//! ## Overview
//!
//! [`SensorHealthMonitor`] is called once per sensing scan. It walks every
//! widget and every sensor of the [`SensingBackend`] in configuration order,
//! runs the three [`rules`](crate::rules) on each selected sensor and reports
//! the sensors that tripped as a [`SensorMask`].
//!
//! ```text
//!   scheduler tick
//!        │
//!        ▼
//!   check(selector, reset) ──► for widget ──► for sensor (flat index i)
//!                                                │
//!                                  i not in selector? ── skip entirely
//!                                                │
//!                              ┌─────────────────┼──────────────────┐
//!                              ▼                 ▼                  ▼
//!                         hyper event      no man's land          stuck
//!                         (immediate)     (counter > limit)  (counter > limit)
//!                              └─────────────────┼──────────────────┘
//!                                                ▼
//!                                  tripped? ── reset baseline (once) ── set bit i
//! ```
//!
//! ## Counters
//!
//! Each sensor has a no-man's-land counter and a stuck counter. They only
//! move while their condition holds and only return to zero when they go
//! above their limit. A sensor that leaves the band (or is released) keeps
//! its partial count, so intermittent in-band or touched scans still add up.
//!
//! ## Capacity
//!
//! The const parameter `N` is the number of configured sensors. It sizes the
//! counter arrays and may not exceed 32, the width of [`SensorMask`]; larger
//! values fail to compile.
//!
//! ## Usage Example
//!
//! ```rust
//! use capguard_core::{MonitorConfig, SensorHealthMonitor, SensorMask};
//! use capguard_core::backend::MemoryBackend;
//! use capguard_core::traits::{SensorState, WidgetThresholds};
//!
//! let mut backend = MemoryBackend::new();
//! let button = backend.add_widget(WidgetThresholds::new(100, 20, 10), 1)?;
//! backend.add_widget(WidgetThresholds::new(200, 50, 20), 1)?;
//!
//! let mut monitor = SensorHealthMonitor::<2>::new(MonitorConfig::default())?;
//! monitor.verify_layout(&backend)?;
//!
//! // 250 > 2 * FT: flagged on the spot
//! backend.set_state(button, 0, SensorState::touched(250))?;
//! let flagged = monitor.check(&mut backend, SensorMask::ALL, false);
//! assert_eq!(flagged.bits(), 0b01);
//! # Ok::<(), capguard_core::ConfigError>(())
//! ```

use crate::config::MonitorConfig;
use crate::constants::MAX_SENSORS;
use crate::errors::{ConfigError, ConfigResult};
use crate::mask::SensorMask;
use crate::rules::{self, Rule};
use crate::traits::{SensingBackend, SensorState, WidgetId, WidgetThresholds};

// Macros for optional logging
#[cfg(feature = "defmt")]
macro_rules! log_debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "defmt")]
macro_rules! log_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Outcome of one check, split by rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckReport {
    /// Sensors whose delta exceeded `multiplier * FT`
    pub hyper_event: SensorMask,

    /// Sensors whose no-man's-land counter went above its limit
    pub no_mans_land: SensorMask,

    /// Sensors whose stuck counter went above its limit
    pub stuck: SensorMask,

    /// Sensors whose baseline was reset during this check
    pub reset: SensorMask,
}

impl CheckReport {
    /// Sensors flagged by any rule
    pub fn flagged(&self) -> SensorMask {
        self.hyper_event | self.no_mans_land | self.stuck
    }

    /// True when no sensor was flagged
    pub fn is_clean(&self) -> bool {
        self.flagged().is_empty()
    }

    /// Sensors flagged by `rule`
    pub fn for_rule(&self, rule: Rule) -> SensorMask {
        match rule {
            Rule::HyperEvent => self.hyper_event,
            Rule::NoMansLand => self.no_mans_land,
            Rule::Stuck => self.stuck,
        }
    }

    /// Whether sensor `index` was flagged by `rule`
    pub fn tripped(&self, index: usize, rule: Rule) -> bool {
        self.for_rule(rule).contains(index)
    }

    fn record(&mut self, rule: Rule, index: usize) {
        match rule {
            Rule::HyperEvent => self.hyper_event.insert(index),
            Rule::NoMansLand => self.no_mans_land.insert(index),
            Rule::Stuck => self.stuck.insert(index),
        }
    }
}

/// Per-sensor anomaly detector for capacitive touch sensing
#[derive(Debug, Clone)]
pub struct SensorHealthMonitor<const N: usize> {
    config: MonitorConfig,

    /// Cached from `config` so the scan path does no division
    no_mans_land_limit: u32,
    stuck_limit: u32,

    no_mans_land: [u32; N],
    stuck: [u32; N],
}

impl<const N: usize> SensorHealthMonitor<N> {
    const FITS_MASK: () = assert!(N <= MAX_SENSORS, "sensor count exceeds SensorMask width");

    /// Selector covering exactly the `N` configured sensors
    pub const SELECT_ALL: SensorMask = SensorMask::first(N);

    /// Create a monitor with zeroed counters
    pub fn new(config: MonitorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: MonitorConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS_MASK;

        Self {
            no_mans_land_limit: config.no_mans_land_count(),
            stuck_limit: config.stuck_count(),
            config,
            no_mans_land: [0; N],
            stuck: [0; N],
        }
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Number of sensors this monitor tracks
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Confirm the backend exposes exactly `N` sensors
    pub fn verify_layout<B: SensingBackend + ?Sized>(&self, backend: &B) -> ConfigResult<()> {
        let found = backend.total_sensors();
        if found != N {
            return Err(ConfigError::LayoutMismatch { expected: N, found });
        }
        Ok(())
    }

    /// Run all checks on the selected sensors and return the flagged ones.
    ///
    /// With `reset_on_anomaly` set, every flagged sensor gets its baseline
    /// reset through the backend. Unselected sensors are neither read nor
    /// counted. Zero means everything checked is within bounds.
    pub fn check<B: SensingBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        selector: SensorMask,
        reset_on_anomaly: bool,
    ) -> SensorMask {
        self.check_detailed(backend, selector, reset_on_anomaly).flagged()
    }

    /// Same as [`check`](Self::check), reporting which rule flagged each sensor
    pub fn check_detailed<B: SensingBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        selector: SensorMask,
        reset_on_anomaly: bool,
    ) -> CheckReport {
        let mut report = CheckReport::default();
        let mut index = 0usize;

        for widget in 0..backend.widget_count() {
            let thresholds = backend.thresholds(widget);

            for sensor in 0..backend.sensor_count(widget) {
                if index >= N {
                    log_warn!("Backend has more than {} sensors, rest not checked", N);
                    return report;
                }

                if selector.contains(index) {
                    let state = backend.sensor_state(widget, sensor);
                    if self.evaluate(index, widget, &state, &thresholds, &mut report) && reset_on_anomaly {
                        backend.reset_baseline(widget, sensor);
                        report.reset.insert(index);
                        log_debug!("Baseline reset: widget {} sensor {}", widget, sensor);
                    }
                }

                index += 1;
            }
        }

        report
    }

    /// Apply every rule to one sensor. Returns true if any tripped.
    fn evaluate(
        &mut self,
        index: usize,
        widget: WidgetId,
        state: &SensorState,
        thresholds: &WidgetThresholds,
        report: &mut CheckReport,
    ) -> bool {
        let mut tripped = false;

        if rules::is_hyper_event(state, thresholds, self.config.hyper_event_multiplier) {
            tripped |= Self::trip(report, Rule::HyperEvent, index, widget, state);
        }

        if rules::in_no_mans_land(state, thresholds)
            && Self::advance(&mut self.no_mans_land[index], self.no_mans_land_limit)
        {
            tripped |= Self::trip(report, Rule::NoMansLand, index, widget, state);
        }

        if rules::is_touched(state) && Self::advance(&mut self.stuck[index], self.stuck_limit) {
            tripped |= Self::trip(report, Rule::Stuck, index, widget, state);
        }

        tripped
    }

    /// Count one more scan. Past `limit` the counter restarts and true is returned.
    fn advance(counter: &mut u32, limit: u32) -> bool {
        *counter = counter.saturating_add(1);
        if *counter > limit {
            *counter = 0;
            return true;
        }
        false
    }

    fn trip(
        report: &mut CheckReport,
        rule: Rule,
        index: usize,
        widget: WidgetId,
        state: &SensorState,
    ) -> bool {
        log_warn!(
            "Sensor {} (widget {}) flagged {}: delta {}",
            index,
            widget,
            rule.name(),
            state.signal_delta
        );
        report.record(rule, index);
        true
    }

    /// Current no-man's-land count for sensor `index`
    pub fn no_mans_land_count(&self, index: usize) -> Option<u32> {
        self.no_mans_land.get(index).copied()
    }

    /// Current stuck count for sensor `index`
    pub fn stuck_count(&self, index: usize) -> Option<u32> {
        self.stuck.get(index).copied()
    }

    /// Zero both counters of one sensor
    pub fn clear_sensor(&mut self, index: usize) {
        if let Some(c) = self.no_mans_land.get_mut(index) {
            *c = 0;
        }
        if let Some(c) = self.stuck.get_mut(index) {
            *c = 0;
        }
    }

    /// Zero every counter
    pub fn clear_counters(&mut self) {
        self.no_mans_land = [0; N];
        self.stuck = [0; N];
    }
}

impl<const N: usize> Default for SensorHealthMonitor<N> {
    fn default() -> Self {
        Self::from_valid(MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    const BUTTON: WidgetThresholds = WidgetThresholds::new(100, 20, 10);

    fn single_button() -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        backend.add_widget(BUTTON, 1).unwrap();
        backend
    }

    fn short_config() -> MonitorConfig {
        MonitorConfig::default()
            .with_no_mans_land_count(3)
            .with_stuck_count(4)
    }

    #[test]
    fn idle_sensor_is_clean() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::default();

        backend.set_delta(0, 0, 5).unwrap();
        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, true);

        assert!(report.is_clean());
        assert_eq!(report.reset, SensorMask::NONE);
        assert_eq!(monitor.no_mans_land_count(0), Some(0));
        assert_eq!(monitor.stuck_count(0), Some(0));
    }

    #[test]
    fn hyper_event_trips_on_first_scan() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::default();

        backend.set_delta(0, 0, 201).unwrap();
        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, false);

        assert!(report.tripped(0, Rule::HyperEvent));
        assert_eq!(report.flagged(), SensorMask::single(0));
        assert_eq!(backend.total_resets(), 0);
    }

    #[test]
    fn no_mans_land_trips_after_limit() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::new(short_config()).unwrap();
        backend.set_delta(0, 0, 50).unwrap();

        for scan in 1..=3 {
            assert!(monitor.check(&mut backend, SensorMask::ALL, false).is_empty());
            assert_eq!(monitor.no_mans_land_count(0), Some(scan));
        }

        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, false);
        assert!(report.tripped(0, Rule::NoMansLand));
        assert_eq!(monitor.no_mans_land_count(0), Some(0));
    }

    #[test]
    fn stuck_trips_after_limit() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::new(short_config()).unwrap();
        backend.set_state(0, 0, SensorState::touched(150)).unwrap();

        for _ in 0..4 {
            assert!(monitor.check(&mut backend, SensorMask::ALL, false).is_empty());
        }

        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, false);
        assert!(report.tripped(0, Rule::Stuck));
        assert!(!report.tripped(0, Rule::NoMansLand));
        assert_eq!(monitor.stuck_count(0), Some(0));
    }

    #[test]
    fn counters_keep_progress_when_condition_stops() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::new(short_config()).unwrap();

        backend.set_state(0, 0, SensorState::touched(50)).unwrap();
        monitor.check(&mut backend, SensorMask::ALL, false);
        monitor.check(&mut backend, SensorMask::ALL, false);

        backend.set_state(0, 0, SensorState::idle(0)).unwrap();
        monitor.check(&mut backend, SensorMask::ALL, false);

        assert_eq!(monitor.no_mans_land_count(0), Some(2));
        assert_eq!(monitor.stuck_count(0), Some(2));
    }

    #[test]
    fn reset_happens_once_for_multiple_trips() {
        let mut backend = MemoryBackend::new();
        // NT above FT: a hyper-event delta also lands in the band
        backend.add_widget(WidgetThresholds::new(10, 5, 100), 1).unwrap();
        let mut monitor = SensorHealthMonitor::<1>::new(
            MonitorConfig::default().with_no_mans_land_count(1),
        )
        .unwrap();

        backend.set_delta(0, 0, 50).unwrap();
        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, true);
        assert!(report.tripped(0, Rule::HyperEvent));
        assert!(!report.tripped(0, Rule::NoMansLand));
        assert_eq!(backend.total_resets(), 1);

        backend.set_delta(0, 0, 50).unwrap();
        let report = monitor.check_detailed(&mut backend, SensorMask::ALL, true);

        assert!(report.tripped(0, Rule::HyperEvent));
        assert!(report.tripped(0, Rule::NoMansLand));
        assert_eq!(report.flagged(), SensorMask::single(0));
        assert_eq!(report.reset, SensorMask::single(0));
        assert_eq!(backend.reset_count(0, 0), Ok(2));
    }

    #[test]
    fn unselected_sensor_is_untouched() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::new(short_config()).unwrap();
        backend.set_state(0, 0, SensorState::touched(500)).unwrap();

        let flagged = monitor.check(&mut backend, SensorMask::NONE, true);

        assert!(flagged.is_empty());
        assert_eq!(monitor.stuck_count(0), Some(0));
        assert_eq!(backend.total_resets(), 0);
    }

    #[test]
    fn extra_backend_sensors_are_ignored() {
        let mut backend = MemoryBackend::new();
        backend.add_widget(BUTTON, 3).unwrap();
        for sensor in 0..3 {
            backend.set_delta(0, sensor, 400).unwrap();
        }

        let mut monitor = SensorHealthMonitor::<2>::default();
        assert_eq!(
            monitor.verify_layout(&backend),
            Err(ConfigError::LayoutMismatch { expected: 2, found: 3 })
        );

        let flagged = monitor.check(&mut backend, SensorMask::ALL, false);
        assert_eq!(flagged.bits(), 0b011);
    }

    #[test]
    fn clearing_counters() {
        let mut backend = single_button();
        let mut monitor = SensorHealthMonitor::<1>::new(short_config()).unwrap();
        backend.set_state(0, 0, SensorState::touched(50)).unwrap();
        monitor.check(&mut backend, SensorMask::ALL, false);

        monitor.clear_sensor(0);
        assert_eq!(monitor.stuck_count(0), Some(0));

        monitor.check(&mut backend, SensorMask::ALL, false);
        monitor.clear_counters();
        assert_eq!(monitor.no_mans_land_count(0), Some(0));
        assert_eq!(monitor.stuck_count(0), Some(0));
        assert_eq!(monitor.stuck_count(1), None);
    }

    #[test]
    fn select_all_covers_capacity() {
        assert_eq!(SensorHealthMonitor::<3>::SELECT_ALL.bits(), 0b111);
        assert_eq!(SensorHealthMonitor::<32>::SELECT_ALL, SensorMask::ALL);
    }
}
