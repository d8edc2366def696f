//! Per-step animator advance.
//!
//! The state being advanced ([`dt_agent::AnimatorState`]) lives in
//! `dt-agent`, next to the rest of `Agent`; the advance function lives here
//! so the animator-engine worker pool (`dt-schedule`) depends on this crate
//! for "how to tick an animator" without `dt-agent` needing to know about
//! ticking at all.

use dt_agent::AnimatorState;

/// The outcome of one [`tick`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still interpolating; nothing committed yet.
    Running,
    /// Was idle; `tick` is a no-op.
    Idle,
    /// The step just completed — `start_delay_sec` has already elapsed and
    /// both displacement components reached the target this call.
    Arrived,
}

/// A small fraction of a cell — once `disp_dx`/`disp_dy` are within this of
/// `direction`, the step is considered complete rather than requiring an
/// exact floating-point match.
const ARRIVAL_EPSILON: f32 = 1e-4;

/// Advance `state` by `dt` seconds of simulated time.
///
/// Steps:
/// 1. If `total_elapsed < start_delay_sec`, accumulate and return (per-agent
///    motion lag).
/// 2. Otherwise advance `disp_dx`/`disp_dy` toward `direction` at
///    `cells_per_second()`, clamped so it never overshoots.
/// 3. When both components reach the target, the step is complete: reset
///    displacement to zero, clear `is_running`, and report [`TickOutcome::Arrived`].
pub fn tick(state: &mut AnimatorState, dt: f64) -> TickOutcome {
    if !state.is_running {
        return TickOutcome::Idle;
    }

    state.total_elapsed += dt;
    if state.total_elapsed < state.start_delay_sec {
        return TickOutcome::Running;
    }

    let speed = state.cells_per_second();
    let step = (speed * dt) as f32;

    state.disp_dx = advance_component(state.disp_dx, state.direction.0, step);
    state.disp_dy = advance_component(state.disp_dy, state.direction.1, step);

    let arrived = (state.disp_dx - state.direction.0).abs() <= ARRIVAL_EPSILON
        && (state.disp_dy - state.direction.1).abs() <= ARRIVAL_EPSILON;

    if arrived {
        state.disp_dx = 0.0;
        state.disp_dy = 0.0;
        state.is_running = false;
        state.goal_cell = None;
        state.total_elapsed = 0.0;
        TickOutcome::Arrived
    } else {
        TickOutcome::Running
    }
}

/// Move `current` toward `target` by at most `step`, never overshooting.
fn advance_component(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else if current > target {
        (current - step).max(target)
    } else {
        current
    }
}
