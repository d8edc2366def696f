//! Sliding-window direction-change detector.
//!
//! Keeps the last `H` unit direction vectors, and flags a "turn" once the
//! current step's direction diverges from their (non-renormalised) mean by
//! more than a threshold angle. Used by the world to decide whether a
//! viewport move should switch from halo loading to forward prefetch.

use std::collections::VecDeque;

use dt_core::Coord;

/// Vectors shorter than this are treated as "no movement" and ignored.
const STILLNESS_EPSILON: f64 = 1e-5;

/// Tracks the last few step directions and reports when the agent has
/// turned enough to be considered "off the previous line of travel".
pub struct RouteChangeDetector {
    history: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl RouteChangeDetector {
    /// `history_size` is the window `H`; spec's default is 5.
    pub fn new(history_size: usize) -> Self {
        Self { history: VecDeque::with_capacity(history_size), capacity: history_size.max(1) }
    }

    /// `true` until at least 2 direction samples have accumulated — the
    /// detector never reports a change on too little history.
    pub fn is_warm(&self) -> bool {
        self.history.len() >= 2
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// `true` iff the step `from → to` diverges from the recent average
    /// direction by more than `threshold_deg`. Stationary steps (magnitude
    /// below [`STILLNESS_EPSILON`]) never register and never report a
    /// change.
    pub fn has_changed(&mut self, from: Coord, to: Coord, threshold_deg: f64) -> bool {
        let vx = (to.x - from.x) as f64;
        let vy = (to.y - from.y) as f64;
        let mag = (vx * vx + vy * vy).sqrt();
        if mag < STILLNESS_EPSILON {
            return false;
        }
        let curr = (vx / mag, vy / mag);

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(curr);

        if self.history.len() < 2 {
            return false;
        }

        let (sx, sy) = self
            .history
            .iter()
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let n = self.history.len() as f64;
        let avg = (sx / n, sy / n);

        let dot = (avg.0 * curr.0 + avg.1 * curr.1).clamp(-1.0, 1.0);
        let angle_deg = dot.acos().to_degrees();
        angle_deg > threshold_deg
    }
}

impl Default for RouteChangeDetector {
    fn default() -> Self {
        Self::new(5)
    }
}
