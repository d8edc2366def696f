//! Per-agent cell-to-cell interpolation state.
//!
//! This is pure state — the tick logic that advances it lives in
//! `dt-mobility`, which drives the thread-pool-dispatched animation tasks.
//! Keeping the state here (next to the rest of `Agent`) and the behaviour
//! there (next to the scheduler) keeps storage and engine in different
//! crates, joined only by `&mut` access.

use dt_core::Coord;

/// `(disp_dx, disp_dy) ∈ [-1, 1]²` — the agent's sub-cell offset while
/// animating a step from one cell to its goal-direction neighbour.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatorState {
    /// The neighbour cell this step is animating toward, `None` when idle.
    pub goal_cell: Option<Coord>,
    /// Unit-ish direction in cell space toward `goal_cell`, set by `start`.
    pub direction: (f32, f32),
    pub disp_dx: f32,
    pub disp_dy: f32,
    pub is_running: bool,
    /// Seconds elapsed since `start()`, including the `start_delay_sec` lag.
    pub total_elapsed: f64,
    /// Per-agent motion lag before displacement begins moving, for smoother
    /// visuals when many agents start a step in the same tick.
    pub start_delay_sec: f64,
    pub speed_kmh: f64,
    pub grid_unit_m: f64,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            goal_cell: None,
            direction: (0.0, 0.0),
            disp_dx: 0.0,
            disp_dy: 0.0,
            is_running: false,
            total_elapsed: 0.0,
            start_delay_sec: 0.0,
            speed_kmh: 5.0,
            grid_unit_m: 1.0,
        }
    }
}

impl AnimatorState {
    /// Cells covered per second at the configured speed and grid scale.
    pub fn cells_per_second(&self) -> f64 {
        self.speed_kmh * 1000.0 / 3600.0 / self.grid_unit_m
    }

    /// `⌈grid_unit_m / (speed_kmh·1000/3600) · 1000⌉` milliseconds; `+∞`
    /// (represented as `u64::MAX`) at zero speed.
    pub fn interval_msec(&self) -> u64 {
        let cps = self.cells_per_second();
        if cps <= 0.0 {
            return u64::MAX;
        }
        (1000.0 / cps).ceil() as u64
    }

    /// Begin animating one step toward `goal`, in the direction `direction`
    /// (e.g. `(1.0, 0.0)` for an eastward step).
    pub fn start(&mut self, goal: Coord, direction: (f32, f32)) {
        self.goal_cell = Some(goal);
        self.direction = direction;
        self.disp_dx = 0.0;
        self.disp_dy = 0.0;
        self.is_running = true;
        self.total_elapsed = 0.0;
    }
}
