//! A min-heap over `f64` cost, keyed by [`Coord`], with amortised O(1)
//! "contains" and "current cost" queries via a side index.
//!
//! Used by the weighted/best-first static finders (Dijkstra, A*, Weighted
//! A*, SMA*) in place of a plain `BinaryHeap<(cost, Coord)>` so they can
//! answer "is this coordinate already open, and at what cost?" without a
//! linear scan, and — for SMA* — trim the worst leaves once the open set
//! grows past its memory bound.

use dt_core::Coord;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Copy, Clone, Debug)]
struct Entry {
    cost: f64,
    coord: Coord,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.coord == other.coord
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    /// Reversed so `BinaryHeap` (a max-heap) behaves as a min-heap on cost.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.coord.cmp(&other.coord))
    }
}

/// A float-keyed priority queue over grid coordinates.
///
/// Stale heap entries left behind by [`FloatPriorityQueue::update_cost`] are
/// filtered out lazily on [`FloatPriorityQueue::pop`] by comparing against
/// the side index, the same lazy-deletion discipline the D* Lite frontier
/// uses.
#[derive(Default)]
pub struct FloatPriorityQueue {
    heap: BinaryHeap<Entry>,
    /// Current authoritative cost per coordinate, or `None` once popped.
    best: FxHashMap<Coord, f64>,
}

impl FloatPriorityQueue {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), best: FxHashMap::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.best.contains_key(&coord)
    }

    pub fn cost_of(&self, coord: Coord) -> Option<f64> {
        self.best.get(&coord).copied()
    }

    /// Push `coord` at `cost`, or update it in place if a cheaper/costlier
    /// value is supplied — the side index always wins, the heap entry is
    /// just a hint that gets re-validated on pop.
    pub fn update_cost(&mut self, coord: Coord, cost: f64) {
        self.best.insert(coord, cost);
        self.heap.push(Entry { cost, coord });
    }

    /// Pop the coordinate with the lowest current cost.
    pub fn pop(&mut self) -> Option<(Coord, f64)> {
        while let Some(Entry { cost, coord }) = self.heap.pop() {
            match self.best.get(&coord) {
                Some(&current) if current == cost => {
                    self.best.remove(&coord);
                    return Some((coord, cost));
                }
                // Stale entry: a cheaper cost has since been pushed for this
                // coordinate, or it was removed outright. Skip it.
                _ => continue,
            }
        }
        None
    }

    pub fn remove(&mut self, coord: Coord) -> Option<f64> {
        self.best.remove(&coord)
    }

    /// Drop the `n` currently-worst (highest-cost) entries still live in the
    /// side index. Used by SMA* to stay within a bounded open list.
    ///
    /// Returns the dropped `(Coord, cost)` pairs so the caller can propagate
    /// the eviction to its parent-pointer table.
    pub fn trim_worst_n(&mut self, n: usize) -> Vec<(Coord, f64)> {
        if n == 0 || self.best.is_empty() {
            return Vec::new();
        }
        let mut live: Vec<(Coord, f64)> =
            self.best.iter().map(|(&c, &cost)| (c, cost)).collect();
        live.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let drop_count = n.min(live.len());
        let dropped = live[..drop_count].to_vec();
        for (coord, _) in &dropped {
            self.best.remove(coord);
        }
        dropped
    }
}
