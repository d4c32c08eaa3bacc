//! Property tests for sensor selection and the hyper-event rule

mod common;

use capguard_core::{
    MonitorConfig, SensorHealthMonitor, SensorMask, SensorState, WidgetThresholds,
    backend::MemoryBackend,
};
use proptest::prelude::*;

use common::two_button_panel;

fn scan_state() -> impl Strategy<Value = SensorState> {
    (0u16..600, any::<bool>()).prop_map(|(signal_delta, touched)| SensorState {
        signal_delta,
        touched,
    })
}

fn short_monitor() -> SensorHealthMonitor<2> {
    let config = MonitorConfig::default()
        .with_no_mans_land_count(4)
        .with_stuck_count(6);
    SensorHealthMonitor::new(config).unwrap()
}

proptest! {
    #[test]
    fn unselected_sensor_never_changes(
        scans in prop::collection::vec((scan_state(), scan_state(), 0u32..4), 1..80)
    ) {
        let mut backend = two_button_panel();
        let mut monitor = short_monitor();

        for (a, b, bits) in scans {
            backend.set_state(0, 0, a).unwrap();
            backend.set_state(1, 0, b).unwrap();
            let selector = SensorMask::from_bits(bits);

            let before = [
                (monitor.no_mans_land_count(0), monitor.stuck_count(0)),
                (monitor.no_mans_land_count(1), monitor.stuck_count(1)),
            ];
            let report = monitor.check_detailed(&mut backend, selector, true);

            for index in 0..2 {
                if !selector.contains(index) {
                    prop_assert!(!report.flagged().contains(index));
                    prop_assert!(!report.reset.contains(index));
                    prop_assert_eq!(
                        (monitor.no_mans_land_count(index), monitor.stuck_count(index)),
                        before[index]
                    );
                }
            }
            prop_assert_eq!(report.flagged() & !selector, SensorMask::NONE);
        }
    }

    #[test]
    fn excluded_calls_do_not_affect_outcome(
        scans in prop::collection::vec((scan_state(), any::<bool>()), 1..80)
    ) {
        // Same sensor-0 history; `interleaved` also sees calls with sensor 0 excluded
        let mut direct_backend = two_button_panel();
        let mut interleaved_backend = two_button_panel();
        let mut direct = short_monitor();
        let mut interleaved = short_monitor();

        for (state, extra_call) in scans {
            if extra_call {
                interleaved_backend.set_state(0, 0, SensorState::touched(u16::MAX)).unwrap();
                interleaved.check(&mut interleaved_backend, SensorMask::single(1), false);
            }

            direct_backend.set_state(0, 0, state).unwrap();
            interleaved_backend.set_state(0, 0, state).unwrap();

            let a = direct.check(&mut direct_backend, SensorMask::single(0), false);
            let b = interleaved.check(&mut interleaved_backend, SensorMask::single(0), false);

            prop_assert_eq!(a, b);
            prop_assert_eq!(direct.no_mans_land_count(0), interleaved.no_mans_land_count(0));
            prop_assert_eq!(direct.stuck_count(0), interleaved.stuck_count(0));
        }
    }

    #[test]
    fn hyper_event_flags_immediately(
        finger in 1u16..2000,
        multiplier in 1u32..4,
        excess in 1u32..1000,
        warmup in 0u32..20,
    ) {
        let limit = multiplier * finger as u32;
        prop_assume!(limit + excess <= u16::MAX as u32);
        let delta = (limit + excess) as u16;

        let mut backend = MemoryBackend::new();
        backend.add_widget(WidgetThresholds::new(finger, finger / 5, finger / 10), 1).unwrap();
        let config = MonitorConfig::default().with_hyper_event_multiplier(multiplier);
        let mut monitor = SensorHealthMonitor::<1>::new(config).unwrap();

        // Arbitrary prior counter state
        backend.set_state(0, 0, SensorState::touched(finger)).unwrap();
        for _ in 0..warmup {
            monitor.check(&mut backend, SensorMask::ALL, false);
        }

        backend.set_state(0, 0, SensorState::idle(delta)).unwrap();
        let flagged = monitor.check(&mut backend, SensorMask::ALL, false);
        prop_assert_eq!(flagged, SensorMask::single(0));
    }
}
