//! Grid geometry: bounds, connectivity, and the blocked-coordinate predicate
//! shared by every route finder.
//!
//! `Map` knows nothing about cell contents (terrain, agents, items — that's
//! [`dt_sim`]'s `Cell`). It only answers "is this coordinate in bounds?",
//! "what are its neighbours?", and "is it blocked?".

use dt_core::Coord;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// How a coordinate's neighbours are enumerated.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighbourMode {
    /// Von Neumann neighbourhood: N, E, S, W.
    Four,
    /// Moore neighbourhood: N, NE, E, SE, S, SW, W, NW.
    #[default]
    Eight,
}

const DIRS4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIRS8: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A predicate deciding whether a coordinate is impassable, beyond the
/// map's static `blocked` set — e.g. "is an agent currently standing here
/// and this finder can't path through agents".
pub type BlockedPredicate = Arc<dyn Fn(Coord) -> bool + Send + Sync>;

/// The grid's static geometry.
///
/// `width`/`height` of `0` mean "unbounded in that axis" — `is_inside`
/// always returns `true` for that axis. This lets the block-paged world
/// (which has no fixed extent) and a bounded test map share the same type.
#[derive(Clone, Default)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    pub neighbour_mode: NeighbourMode,
    blocked: FxHashSet<Coord>,
    predicate: Option<BlockedPredicate>,
}

impl Map {
    pub fn new(width: u32, height: u32, neighbour_mode: NeighbourMode) -> Self {
        Self {
            width,
            height,
            neighbour_mode,
            blocked: FxHashSet::default(),
            predicate: None,
        }
    }

    /// An unbounded map (`width == height == 0`) using 8-connectivity.
    pub fn unbounded() -> Self {
        Self::new(0, 0, NeighbourMode::Eight)
    }

    pub fn is_inside(&self, c: Coord) -> bool {
        let x_ok = self.width == 0 || (0..self.width as i32).contains(&c.x);
        let y_ok = self.height == 0 || (0..self.height as i32).contains(&c.y);
        x_ok && y_ok
    }

    pub fn set_blocked(&mut self, c: Coord, blocked: bool) {
        if blocked {
            self.blocked.insert(c);
        } else {
            self.blocked.remove(&c);
        }
    }

    pub fn is_statically_blocked(&self, c: Coord) -> bool {
        self.blocked.contains(&c)
    }

    /// Install (or clear, with `None`) a dynamic blocking predicate layered
    /// on top of the static `blocked` set.
    pub fn set_blocked_predicate(&mut self, predicate: Option<BlockedPredicate>) {
        self.predicate = predicate;
    }

    /// `true` if `c` cannot be entered: out of bounds, statically blocked,
    /// or rejected by the installed predicate.
    pub fn is_blocked(&self, c: Coord) -> bool {
        !self.is_inside(c)
            || self.blocked.contains(&c)
            || self.predicate.as_ref().is_some_and(|p| p(c))
    }

    fn dirs(&self) -> &'static [(i32, i32)] {
        match self.neighbour_mode {
            NeighbourMode::Four => &DIRS4,
            NeighbourMode::Eight => &DIRS8,
        }
    }

    /// Passable neighbours of `c` under the map's connectivity mode.
    pub fn neighbours(&self, c: Coord) -> Vec<Coord> {
        self.dirs()
            .iter()
            .map(|&(dx, dy)| Coord::new(c.x + dx, c.y + dy))
            .filter(|&n| !self.is_blocked(n))
            .collect()
    }

    /// All coordinates within `radius` (Chebyshev distance) of `c`,
    /// excluding `c` itself, in connectivity order then ring order.
    pub fn neighbours_range(&self, c: Coord, radius: u32) -> Vec<Coord> {
        let r = radius as i32;
        let mut out = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = Coord::new(c.x + dx, c.y + dy);
                if !self.is_blocked(n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// The neighbour (of the map's connectivity mode) whose direction from
    /// `c` is closest to `angle_deg` (0 along +x, increasing CCW).
    pub fn neighbour_at_angle(&self, c: Coord, angle_deg: f32) -> Option<Coord> {
        let target = ((angle_deg % 360.0) + 360.0) % 360.0;
        self.dirs()
            .iter()
            .map(|&(dx, dy)| Coord::new(c.x + dx, c.y + dy))
            .min_by(|a, b| {
                let da = angular_distance(c.angle_to(*a), target);
                let db = angular_distance(c.angle_to(*b), target);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Passable coordinates within `radius` of `center` whose direction from
    /// `center` falls inside `[theta_start, theta_end]` degrees, measured
    /// relative to the `center → goal` direction (so `0` always points at
    /// `goal`, regardless of the map's absolute orientation).
    pub fn neighbours_in_sector(
        &self,
        center: Coord,
        goal: Coord,
        theta_start: f32,
        theta_end: f32,
        radius: u32,
    ) -> Vec<Coord> {
        let base = center.angle_to(goal);
        self.neighbours_range(center, radius)
            .into_iter()
            .filter(|&n| {
                let rel = wrap_360(center.angle_to(n) - base);
                angle_in_range(rel, wrap_360(theta_start), wrap_360(theta_end))
            })
            .collect()
    }
}

/// Normalise an angle in degrees to `[0, 360)`.
fn wrap_360(deg: f32) -> f32 {
    let d = deg % 360.0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// `true` iff `angle` (already normalised to `[0, 360)`) falls within
/// `[start, end]`, accounting for ranges that wrap past the 0/360 seam.
fn angle_in_range(angle: f32, start: f32, end: f32) -> bool {
    if start <= end {
        (start..=end).contains(&angle)
    } else {
        angle >= start || angle <= end
    }
}

/// Smallest absolute difference between two angles in degrees, wrapping
/// correctly around the 0/360 seam.
fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}
