//! In-memory sensing backend for testing and simulation
//!
//! This module provides a [`SensingBackend`] whose signal state is written by
//! the caller instead of read from hardware. Useful for:
//! - Unit and integration testing of the health checks
//! - Replaying recorded delta / status sequences
//! - Running the monitor on a host during bring-up
//!
//! Storage is fixed-capacity (`heapless::Vec`), so it also works without an
//! allocator.
//!
//! A baseline reset behaves like a freshly re-anchored baseline: the sensor's
//! delta drops to zero and its touch status clears until the caller writes
//! new state.
//!
//! ## Example
//!
//! ```rust
//! use capguard_core::backend::MemoryBackend;
//! use capguard_core::traits::{SensingBackend, SensorState, WidgetThresholds};
//!
//! let mut backend = MemoryBackend::new();
//! let button = backend.add_widget(WidgetThresholds::new(100, 20, 10), 1)?;
//! let slider = backend.add_widget(WidgetThresholds::new(200, 50, 20), 5)?;
//!
//! backend.set_state(slider, 2, SensorState::touched(230))?;
//!
//! assert_eq!(backend.total_sensors(), 6);
//! assert_eq!(backend.sensor_position(slider, 2), Some(3));
//! assert_eq!(backend.sensor_state(button, 0), SensorState::idle(0));
//! # Ok::<(), capguard_core::ConfigError>(())
//! ```

use heapless::Vec;

use crate::constants::MAX_SENSORS;
use crate::errors::{ConfigError, ConfigResult};
use crate::traits::{SensingBackend, SensorState, WidgetId, WidgetThresholds};

/// Maximum widgets a [`MemoryBackend`] can hold
pub const MAX_WIDGETS: usize = MAX_SENSORS;

#[derive(Debug, Clone, Copy)]
struct WidgetSlot {
    thresholds: WidgetThresholds,
    /// Flat index of the widget's first sensor
    first: usize,
    count: usize,
}

/// Sensing backend backed by plain memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    widgets: Vec<WidgetSlot, MAX_WIDGETS>,
    sensors: Vec<SensorState, MAX_SENSORS>,
    resets: Vec<u32, MAX_SENSORS>,
}

impl MemoryBackend {
    /// Empty backend with no widgets
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget with `sensor_count` idle sensors and return its id
    pub fn add_widget(
        &mut self,
        thresholds: WidgetThresholds,
        sensor_count: usize,
    ) -> ConfigResult<WidgetId> {
        if self.sensors.len() + sensor_count > MAX_SENSORS {
            return Err(ConfigError::LayoutFull);
        }

        let id = self.widgets.len();
        self.widgets
            .push(WidgetSlot {
                thresholds,
                first: self.sensors.len(),
                count: sensor_count,
            })
            .map_err(|_| ConfigError::LayoutFull)?;

        for _ in 0..sensor_count {
            self.sensors
                .push(SensorState::default())
                .map_err(|_| ConfigError::LayoutFull)?;
            self.resets.push(0).map_err(|_| ConfigError::LayoutFull)?;
        }

        Ok(id)
    }

    /// Replace the thresholds of an existing widget
    pub fn set_thresholds(
        &mut self,
        widget: WidgetId,
        thresholds: WidgetThresholds,
    ) -> ConfigResult<()> {
        let count = self.widgets.len();
        let slot = self
            .widgets
            .get_mut(widget)
            .ok_or(ConfigError::WidgetOutOfRange { widget, count })?;
        slot.thresholds = thresholds;
        Ok(())
    }

    /// Write the signal state of one sensor
    pub fn set_state(&mut self, widget: WidgetId, sensor: usize, state: SensorState) -> ConfigResult<()> {
        let index = self.flat_index(widget, sensor)?;
        self.sensors[index] = state;
        Ok(())
    }

    /// Write only the delta, keeping the touch status
    pub fn set_delta(&mut self, widget: WidgetId, sensor: usize, delta: u16) -> ConfigResult<()> {
        let index = self.flat_index(widget, sensor)?;
        self.sensors[index].signal_delta = delta;
        Ok(())
    }

    /// Write only the touch status, keeping the delta
    pub fn set_touched(&mut self, widget: WidgetId, sensor: usize, touched: bool) -> ConfigResult<()> {
        let index = self.flat_index(widget, sensor)?;
        self.sensors[index].touched = touched;
        Ok(())
    }

    /// Baseline resets requested for one sensor so far
    pub fn reset_count(&self, widget: WidgetId, sensor: usize) -> ConfigResult<u32> {
        let index = self.flat_index(widget, sensor)?;
        Ok(self.resets[index])
    }

    /// Baseline resets requested across all sensors
    pub fn total_resets(&self) -> u32 {
        self.resets.iter().sum()
    }

    /// Forget recorded resets
    pub fn clear_resets(&mut self) {
        self.resets.iter_mut().for_each(|r| *r = 0);
    }

    fn flat_index(&self, widget: WidgetId, sensor: usize) -> ConfigResult<usize> {
        let slot = self.widgets.get(widget).ok_or(ConfigError::WidgetOutOfRange {
            widget,
            count: self.widgets.len(),
        })?;

        if sensor >= slot.count {
            return Err(ConfigError::SensorOutOfRange { widget, sensor });
        }

        Ok(slot.first + sensor)
    }
}

impl SensingBackend for MemoryBackend {
    fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    fn sensor_count(&self, widget: WidgetId) -> usize {
        self.widgets.get(widget).map_or(0, |slot| slot.count)
    }

    fn thresholds(&self, widget: WidgetId) -> WidgetThresholds {
        self.widgets
            .get(widget)
            .map(|slot| slot.thresholds)
            .unwrap_or_default()
    }

    fn sensor_state(&self, widget: WidgetId, sensor: usize) -> SensorState {
        self.flat_index(widget, sensor)
            .map(|index| self.sensors[index])
            .unwrap_or_default()
    }

    fn reset_baseline(&mut self, widget: WidgetId, sensor: usize) {
        if let Ok(index) = self.flat_index(widget, sensor) {
            self.sensors[index] = SensorState::default();
            self.resets[index] = self.resets[index].saturating_add(1);
        }
    }

    fn total_sensors(&self) -> usize {
        self.sensors.len()
    }
}
