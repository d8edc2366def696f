//! The resident-block cache: insertion-order LRU capped at `max_blocks`,
//! with a `protect_key` guard so a block that just finished loading can
//! never evict itself.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use dt_core::Coord;

use crate::block::Block;

/// Fired once per evicted block, before its cells are released.
pub type BeforeEvictHook = Box<dyn FnMut(Coord, &Block) + Send>;

pub struct BlockCache {
    max_blocks: usize,
    map: FxHashMap<Coord, Block>,
    /// Oldest-first insertion order; the front is the next eviction
    /// candidate (skipping `protect_key`).
    order: VecDeque<Coord>,
    before_evict: Option<BeforeEvictHook>,
}

impl BlockCache {
    pub fn new(max_blocks: usize) -> Self {
        Self { max_blocks: max_blocks.max(1), map: FxHashMap::default(), order: VecDeque::new(), before_evict: None }
    }

    pub fn set_before_evict(&mut self, hook: BeforeEvictHook) {
        self.before_evict = Some(hook);
    }

    pub fn contains(&self, key: Coord) -> bool {
        self.map.contains_key(&key)
    }

    pub fn get(&self, key: Coord) -> Option<&Block> {
        self.map.get(&key)
    }

    pub fn get_mut(&mut self, key: Coord) -> Option<&mut Block> {
        self.map.get_mut(&key)
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

    /// Insert `block` under `key`, evicting the least-recently-inserted
    /// resident block (never `protect_key`, which is always `key` itself —
    /// the block currently completing its load) until under `max_blocks`.
    ///
    /// A duplicate completion for an already-resident `key` is discarded:
    /// the first writer keeps its block.
    pub fn insert(&mut self, key: Coord, block: Block) {
        if self.map.contains_key(&key) {
            return;
        }
        while self.map.len() >= self.max_blocks {
            let Some(pos) = self.order.iter().position(|k| *k != key) else {
                break; // only the protected key is resident; can't evict further
            };
            let evicted = self.order.remove(pos).expect("position just found");
            if let Some(evicted_block) = self.map.remove(&evicted) {
                if let Some(hook) = self.before_evict.as_mut() {
                    hook(evicted, &evicted_block);
                }
            }
        }
        self.order.push_back(key);
        self.map.insert(key, block);
    }

    /// Drop every resident block, firing the before-evict hook for each.
    pub fn clear(&mut self) {
        while let Some(key) = self.order.pop_front() {
            if let Some(block) = self.map.remove(&key) {
                if let Some(hook) = self.before_evict.as_mut() {
                    hook(key, &block);
                }
            }
        }
        self.map.clear();
    }
}
