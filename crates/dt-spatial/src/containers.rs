//! Coordinate-keyed containers used throughout the planners.
//!
//! Both types wrap standard collections; they exist to give the rest of the
//! crate one name for "a coordinate-keyed map" and "an ordered coordinate
//! sequence" with the exact insert/set/replace semantics the planners need,
//! rather than re-deriving those semantics at every call site.

use dt_core::Coord;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

// ── CoordHash ─────────────────────────────────────────────────────────────────

/// A coordinate-keyed map with distinct insert/set/replace semantics.
#[derive(Clone, Debug, Default)]
pub struct CoordHash<V> {
    map: FxHashMap<Coord, V>,
}

impl<V> CoordHash<V> {
    pub fn new() -> Self {
        Self { map: FxHashMap::default() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { map: FxHashMap::with_capacity_and_hasher(cap, Default::default()) }
    }

    /// Insert `value` at `key` only if `key` is absent.
    /// Returns `true` if the insert happened.
    pub fn insert(&mut self, key: Coord, value: V) -> bool {
        if self.map.contains_key(&key) {
            false
        } else {
            self.map.insert(key, value);
            true
        }
    }

    /// Upsert: write `value` at `key` unconditionally, returning the prior
    /// value if one existed.
    pub fn set(&mut self, key: Coord, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Overwrite the value at `key` only if `key` is already present.
    /// Returns `true` if the replace happened.
    pub fn replace(&mut self, key: Coord, value: V) -> bool {
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            true
        } else {
            false
        }
    }

    pub fn get(&self, key: Coord) -> Option<&V> {
        self.map.get(&key)
    }

    pub fn get_mut(&mut self, key: Coord) -> Option<&mut V> {
        self.map.get_mut(&key)
    }

    pub fn contains(&self, key: Coord) -> bool {
        self.map.contains_key(&key)
    }

    pub fn remove(&mut self, key: Coord) -> Option<V> {
        self.map.remove(&key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = Coord> + '_ {
        self.map.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.map.values_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &V)> {
        self.map.iter().map(|(k, v)| (*k, v))
    }

    pub fn foreach(&self, mut f: impl FnMut(Coord, &V)) {
        for (k, v) in &self.map {
            f(*k, v);
        }
    }

    pub fn foreach_mut(&mut self, mut f: impl FnMut(Coord, &mut V)) {
        for (k, v) in self.map.iter_mut() {
            f(*k, v);
        }
    }

    /// `true` if both maps hold exactly the same set of keys, ignoring values.
    pub fn keys_equal<W>(&self, other: &CoordHash<W>) -> bool {
        self.map.len() == other.map.len()
            && self.map.keys().all(|k| other.map.contains_key(k))
    }
}

impl<V: PartialEq> PartialEq for CoordHash<V> {
    fn eq(&self, other: &Self) -> bool {
        self.map.len() == other.map.len()
            && self
                .map
                .iter()
                .all(|(k, v)| other.map.get(k).is_some_and(|ov| ov == v))
    }
}

impl<V> FromIterator<(Coord, V)> for CoordHash<V> {
    fn from_iter<I: IntoIterator<Item = (Coord, V)>>(iter: I) -> Self {
        Self { map: iter.into_iter().collect() }
    }
}

// ── CoordList ─────────────────────────────────────────────────────────────────

/// An ordered sequence of coordinates — a reconstructed route, a queue of
/// pending goals, etc.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordList {
    items: VecDeque<Coord>,
}

impl CoordList {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn from_vec(v: Vec<Coord>) -> Self {
        Self { items: v.into() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push_back(&mut self, c: Coord) {
        self.items.push_back(c);
    }

    pub fn push_front(&mut self, c: Coord) {
        self.items.push_front(c);
    }

    pub fn pop_back(&mut self) -> Option<Coord> {
        self.items.pop_back()
    }

    pub fn pop_front(&mut self) -> Option<Coord> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<Coord> {
        self.items.front().copied()
    }

    pub fn back(&self) -> Option<Coord> {
        self.items.back().copied()
    }

    pub fn get(&self, index: usize) -> Option<Coord> {
        self.items.get(index).copied()
    }

    pub fn set(&mut self, index: usize, c: Coord) -> bool {
        if let Some(slot) = self.items.get_mut(index) {
            *slot = c;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.items.contains(&c)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.items.iter().copied()
    }

    pub fn as_vec(&self) -> Vec<Coord> {
        self.items.iter().copied().collect()
    }

    /// Append `coords`, skipping any that are already present anywhere in
    /// the list (used to grow a goal queue without creating duplicate stops).
    pub fn append_nodup(&mut self, coords: impl IntoIterator<Item = Coord>) {
        for c in coords {
            if !self.contains(c) {
                self.items.push_back(c);
            }
        }
    }

    /// Append `other` to this list. When `nodup` is true, each element
    /// already present (per `contains`) is skipped rather than duplicated.
    pub fn append(&mut self, other: impl IntoIterator<Item = Coord>, nodup: bool) {
        if nodup {
            self.append_nodup(other);
        } else {
            self.items.extend(other);
        }
    }
}

impl From<Vec<Coord>> for CoordList {
    fn from(v: Vec<Coord>) -> Self {
        Self::from_vec(v)
    }
}

impl From<CoordList> for Vec<Coord> {
    fn from(list: CoordList) -> Self {
        list.items.into_iter().collect()
    }
}
