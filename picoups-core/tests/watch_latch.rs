//! Pulse/watch state machine driven over whole cycles

mod common;

use common::{ClockDelay, CountingShutdown, FakeGpio};
use embedded_hal_mock::eh1::delay::NoopDelay;
use picoups_core::config::PulseTiming;
use picoups_core::watch::{PulseOutcome, PulseWatch, WatchPins, WatchState};
use picoups_hal::{Level, Pin};

const PULSE: Pin = Pin(22);
const WATCH: Pin = Pin(27);

type Machine = PulseWatch<FakeGpio, ClockDelay, CountingShutdown>;

fn machine(readings: &[u16], watch: Option<Pin>) -> Machine {
    PulseWatch::new(
        FakeGpio::with_watch(WATCH, readings),
        ClockDelay::default(),
        CountingShutdown::default(),
        WatchPins {
            pulse: PULSE,
            watch,
        },
        PulseTiming::default(),
    )
}

fn pulsed(machine: &mut Machine) -> bool {
    machine.cycle().pulse == Some(PulseOutcome::Sent)
}

#[test]
fn high_high_low_fires_once_and_clears_latch() {
    let mut watch = machine(&[1, 1, 0, 1], Some(WATCH));

    let first = watch.cycle();
    assert_eq!(first.reading, Some(Level::High));
    assert_eq!(first.pulse, Some(PulseOutcome::Sent));
    assert_eq!(first.state, WatchState::Active);

    let second = watch.cycle();
    assert_eq!(second.pulse, Some(PulseOutcome::Sent));
    assert!(!second.shutdown_fired);

    // The falling edge: the cycle's pulse goes out before the edge is handled
    let third = watch.cycle();
    assert_eq!(third.reading, Some(Level::Low));
    assert_eq!(third.pulse, Some(PulseOutcome::Sent));
    assert!(third.shutdown_fired);
    assert_eq!(third.state, WatchState::AwaitingFirstSignal);
    assert_eq!(watch.shutdown_action().calls, 1);

    // HIGH again re-arms the pulse train
    let fourth = watch.cycle();
    assert_eq!(fourth.state, WatchState::Active);
    assert_eq!(fourth.pulse, Some(PulseOutcome::Sent));
    assert_eq!(watch.shutdown_action().calls, 1);
}

#[test]
fn latch_cleared_after_shutdown_stops_pulses() {
    let mut watch = machine(&[1, 0, 0, 0], Some(WATCH));

    assert!(pulsed(&mut watch));
    assert!(watch.cycle().shutdown_fired);
    assert!(!pulsed(&mut watch));
    assert!(!pulsed(&mut watch));
    assert_eq!(watch.shutdown_action().calls, 1);
}

#[test]
fn initial_pulse_is_unconditional() {
    let mut watch = machine(&[0, 0], Some(WATCH));

    let first = watch.cycle();
    assert_eq!(first.reading, Some(Level::Low));
    assert_eq!(first.pulse, Some(PulseOutcome::Sent));
    assert!(!first.shutdown_fired);

    let second = watch.cycle();
    assert_eq!(second.pulse, None);
    assert_eq!(second.state, WatchState::AwaitingFirstSignal);

    assert_eq!(watch.gpio().writes, vec![(PULSE, 1), (PULSE, 0)]);
    assert_eq!(watch.shutdown_action().calls, 0);
}

#[test]
fn disabled_watch_always_pulses_and_never_fires() {
    // The watch line would read LOW if it were sampled
    let mut watch = machine(&[0, 0, 0, 0, 0], None);

    for _ in 0..5 {
        let report = watch.cycle();
        assert_eq!(report.reading, Some(Level::High));
        assert_eq!(report.pulse, Some(PulseOutcome::Sent));
        assert!(!report.shutdown_fired);
    }

    assert_eq!(watch.shutdown_action().calls, 0);
    assert_eq!(watch.gpio().writes.len(), 10);
    assert!(watch.gpio().writes.iter().all(|(pin, _)| *pin == PULSE));
}

#[test]
fn failed_watch_reads_neither_arm_nor_fire() {
    // Script runs out after the first HIGH; later reads fail
    let mut watch = machine(&[1], Some(WATCH));

    watch.cycle();
    for _ in 0..3 {
        let report = watch.cycle();
        assert_eq!(report.reading, None);
        assert_eq!(report.state, WatchState::Active);
        assert_eq!(report.pulse, Some(PulseOutcome::Sent));
    }
    assert_eq!(watch.shutdown_action().calls, 0);
}

#[test]
fn every_cycle_lasts_one_period() {
    let mut watch = machine(&[0, 0, 1, 0, 0], Some(WATCH));

    for _ in 0..5 {
        watch.cycle();
    }

    // Pulsing and idle cycles alike
    assert_eq!(watch.gpio().writes.len(), 6);
    assert_eq!(watch.delay().elapsed_us, 5 * 500_000);
}

#[test]
fn repeated_power_loss_fires_once_per_arming() {
    // Timing plays no part here
    let mut watch = PulseWatch::new(
        FakeGpio::with_watch(WATCH, &[1, 0, 0, 1, 1, 0, 0]),
        NoopDelay::new(),
        CountingShutdown::default(),
        WatchPins {
            pulse: PULSE,
            watch: Some(WATCH),
        },
        PulseTiming::default(),
    );

    let fired: Vec<bool> = (0..7).map(|_| watch.cycle().shutdown_fired).collect();

    assert_eq!(fired, [false, true, false, false, false, true, false]);
    assert_eq!(watch.shutdown_action().calls, 2);
}
