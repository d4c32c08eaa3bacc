//! Common fixtures for integration tests
//!
//! This module provides:
//! - Backend layouts used across tests (button + slider panels)
//! - A scan driver that feeds a fixed signal for N consecutive checks

#![allow(dead_code)]

use capguard_core::{
    backend::MemoryBackend,
    SensorHealthMonitor, SensorMask, SensorState, WidgetThresholds,
};

/// Widget A of the two-widget panel
pub const WIDGET_A: WidgetThresholds = WidgetThresholds::new(100, 20, 10);

/// Widget B of the two-widget panel
pub const WIDGET_B: WidgetThresholds = WidgetThresholds::new(200, 50, 20);

/// Two widgets with one sensor each: A at index 0, B at index 1
pub fn two_button_panel() -> MemoryBackend {
    let mut backend = MemoryBackend::new();
    backend.add_widget(WIDGET_A, 1).expect("widget A");
    backend.add_widget(WIDGET_B, 1).expect("widget B");
    backend
}

/// Button, 4-segment slider and a second button (6 sensors)
pub fn mixed_panel() -> MemoryBackend {
    let mut backend = MemoryBackend::new();
    backend.add_widget(WIDGET_A, 1).expect("button");
    backend.add_widget(WIDGET_B, 4).expect("slider");
    backend.add_widget(WIDGET_A, 1).expect("button");
    backend
}

/// Hold `state` on one sensor and run `scans` checks, returning every result
pub fn hold<const N: usize>(
    monitor: &mut SensorHealthMonitor<N>,
    backend: &mut MemoryBackend,
    widget: usize,
    sensor: usize,
    state: SensorState,
    scans: u32,
    reset_on_anomaly: bool,
) -> Vec<SensorMask> {
    (0..scans)
        .map(|_| {
            backend.set_state(widget, sensor, state).expect("sensor exists");
            monitor.check(&mut *backend, SensorMask::ALL, reset_on_anomaly)
        })
        .collect()
}
