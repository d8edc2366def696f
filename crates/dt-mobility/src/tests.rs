//! Unit tests for the animator advance.

use dt_agent::AnimatorState;

use crate::{tick, TickOutcome};

fn state(direction: (f32, f32)) -> AnimatorState {
    let mut s = AnimatorState::default();
    s.speed_kmh = 18.0; // 5 m/s at grid_unit_m = 1.0
    s.grid_unit_m = 1.0;
    s.direction = direction;
    s.is_running = true;
    s
}

#[test]
fn idle_tick_is_noop() {
    let mut s = AnimatorState::default();
    assert!(!s.is_running);
    let outcome = tick(&mut s, 0.1);
    assert_eq!(outcome, TickOutcome::Idle);
}

#[test]
fn start_delay_is_honored_before_moving() {
    let mut s = state((1.0, 0.0));
    s.start_delay_sec = 0.5;
    let outcome = tick(&mut s, 0.2);
    assert_eq!(outcome, TickOutcome::Running);
    assert_eq!(s.disp_dx, 0.0);
}

#[test]
fn advances_toward_direction_without_overshoot() {
    let mut s = state((1.0, 0.0));
    // 5 cells/sec * 0.1s = 0.5 cell.
    let outcome = tick(&mut s, 0.1);
    assert_eq!(outcome, TickOutcome::Running);
    assert!((s.disp_dx - 0.5).abs() < 1e-5);
    assert_eq!(s.disp_dy, 0.0);
}

#[test]
fn arrival_resets_displacement_and_clears_running() {
    let mut s = state((1.0, 0.0));
    // A full second covers more than one cell at 5 cells/sec — must clamp.
    let outcome = tick(&mut s, 1.0);
    assert_eq!(outcome, TickOutcome::Arrived);
    assert_eq!(s.disp_dx, 0.0);
    assert_eq!(s.disp_dy, 0.0);
    assert!(!s.is_running);
    assert!(s.goal_cell.is_none());
}

#[test]
fn diagonal_direction_arrives_on_both_axes() {
    let mut s = state((1.0, 1.0));
    let outcome = tick(&mut s, 1.0);
    assert_eq!(outcome, TickOutcome::Arrived);
}

#[test]
fn multiple_small_ticks_eventually_arrive() {
    let mut s = state((1.0, 0.0));
    let mut last = TickOutcome::Running;
    for _ in 0..100 {
        last = tick(&mut s, 0.01);
        if last == TickOutcome::Arrived {
            break;
        }
    }
    assert_eq!(last, TickOutcome::Arrived);
}

#[test]
fn zero_speed_never_arrives_in_one_tick() {
    let mut s = state((1.0, 0.0));
    s.speed_kmh = 0.0;
    let outcome = tick(&mut s, 10.0);
    assert_eq!(outcome, TickOutcome::Running);
    assert_eq!(s.disp_dx, 0.0);
}

#[test]
fn interval_msec_matches_speed() {
    // speed 18 km/h, grid_unit_m 1.0 -> 5 cells/sec -> 200ms/cell.
    let s = state((1.0, 0.0));
    assert_eq!(s.interval_msec(), 200);
}
