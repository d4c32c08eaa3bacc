//! Core traits for sensing backends
//!
//! The monitor never touches sensing hardware or library internals. Everything
//! it needs goes through [`SensingBackend`]: the widget layout, per-widget
//! thresholds, per-sensor signal state, and one corrective action.
//! Keep it narrow - a backend for a new sensing library should be a thin
//! adapter over that library's data structures.

/// Widget index in configuration order
pub type WidgetId = usize;

/// Per-widget tuning values read by the health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetThresholds {
    /// Finger threshold (FT): delta above which a touch is reported
    pub finger_threshold: u16,

    /// Noise threshold (NT): delta below which the sensor is idle
    pub noise_threshold: u16,

    /// Hysteresis (HYST) added above FT
    pub hysteresis: u16,
}

impl WidgetThresholds {
    /// Create thresholds from FT, NT and HYST
    pub const fn new(finger_threshold: u16, noise_threshold: u16, hysteresis: u16) -> Self {
        Self {
            finger_threshold,
            noise_threshold,
            hysteresis,
        }
    }

    /// Upper edge of the no-man's-land band (FT + HYST), widened to avoid overflow
    pub const fn touch_band_limit(&self) -> u32 {
        self.finger_threshold as u32 + self.hysteresis as u32
    }
}

/// Signal state of one sensor for the current scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorState {
    /// Difference between raw counts and baseline
    pub signal_delta: u16,

    /// Touch status as currently decided by the sensing service
    pub touched: bool,
}

impl SensorState {
    /// Idle sensor with the given delta
    pub const fn idle(signal_delta: u16) -> Self {
        Self { signal_delta, touched: false }
    }

    /// Touched sensor with the given delta
    pub const fn touched(signal_delta: u16) -> Self {
        Self { signal_delta, touched: true }
    }
}

/// Read accessors and the baseline-reset action of a sensing service.
///
/// Widgets and their sensors must be enumerated in the same order on every
/// call; the monitor derives flat sensor indices (and therefore mask bits)
/// from that order.
///
/// ## Example Implementation
///
/// ```rust
/// use capguard_core::traits::{SensingBackend, SensorState, WidgetId, WidgetThresholds};
///
/// struct SingleButton {
///     delta: u16,
///     resets: u32,
/// }
///
/// impl SensingBackend for SingleButton {
///     fn widget_count(&self) -> usize { 1 }
///     fn sensor_count(&self, _widget: WidgetId) -> usize { 1 }
///     fn thresholds(&self, _widget: WidgetId) -> WidgetThresholds {
///         WidgetThresholds::new(100, 20, 10)
///     }
///     fn sensor_state(&self, _widget: WidgetId, _sensor: usize) -> SensorState {
///         SensorState::idle(self.delta)
///     }
///     fn reset_baseline(&mut self, _widget: WidgetId, _sensor: usize) {
///         self.resets += 1;
///     }
/// }
/// ```
pub trait SensingBackend {
    /// Number of configured widgets
    fn widget_count(&self) -> usize;

    /// Number of sensors belonging to `widget`
    fn sensor_count(&self, widget: WidgetId) -> usize;

    /// FT / NT / HYST for `widget`
    fn thresholds(&self, widget: WidgetId) -> WidgetThresholds;

    /// Current delta and touch status of sensor `sensor` within `widget`
    fn sensor_state(&self, widget: WidgetId, sensor: usize) -> SensorState;

    /// Re-initialize the baseline of one sensor.
    ///
    /// Fire-and-forget: the monitor does not check the outcome. A reset that
    /// did not take simply leads to the sensor being flagged again later.
    fn reset_baseline(&mut self, widget: WidgetId, sensor: usize);

    /// Total sensors across all widgets
    fn total_sensors(&self) -> usize {
        (0..self.widget_count()).map(|w| self.sensor_count(w)).sum()
    }

    /// Flat index of sensor `sensor` in `widget`, or `None` if it does not exist.
    ///
    /// Use this to build a selector for specific sensors instead of counting
    /// positions by hand.
    fn sensor_position(&self, widget: WidgetId, sensor: usize) -> Option<usize> {
        if widget >= self.widget_count() || sensor >= self.sensor_count(widget) {
            return None;
        }
        let before: usize = (0..widget).map(|w| self.sensor_count(w)).sum();
        Some(before + sensor)
    }
}

impl<B: SensingBackend + ?Sized> SensingBackend for &mut B {
    fn widget_count(&self) -> usize {
        (**self).widget_count()
    }

    fn sensor_count(&self, widget: WidgetId) -> usize {
        (**self).sensor_count(widget)
    }

    fn thresholds(&self, widget: WidgetId) -> WidgetThresholds {
        (**self).thresholds(widget)
    }

    fn sensor_state(&self, widget: WidgetId, sensor: usize) -> SensorState {
        (**self).sensor_state(widget, sensor)
    }

    fn reset_baseline(&mut self, widget: WidgetId, sensor: usize) {
        (**self).reset_baseline(widget, sensor)
    }
}
