//! Blocks: the unit of I/O, caching, and eviction for the block-paged
//! world.

use std::sync::Arc;

use dt_core::Coord;

use crate::cell::Cell;

/// `origin(x, y) = (⌊x/B⌋·B, ⌊y/B⌋·B)` — floor division, so it behaves
/// correctly for negative coordinates too.
pub fn origin_of(c: Coord, block_size: u32) -> Coord {
    let b = block_size as i32;
    Coord::new(c.x.div_euclid(b) * b, c.y.div_euclid(b) * b)
}

/// A pluggable per-cell factory, invoked once per coordinate when a block
/// is first materialised.
pub type MakeCell = Arc<dyn Fn(Coord) -> Cell + Send + Sync>;

/// A dense `block_size × block_size` table of cells, anchored at `origin`.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub origin: Coord,
    pub block_size: u32,
    cells: Vec<Cell>,
}

impl Block {
    /// Materialise every cell in the block via `make_cell`.
    pub fn load(origin: Coord, block_size: u32, make_cell: &MakeCell) -> Self {
        let n = (block_size * block_size) as usize;
        let mut cells = Vec::with_capacity(n);
        for dy in 0..block_size as i32 {
            for dx in 0..block_size as i32 {
                cells.push(make_cell(Coord::new(origin.x + dx, origin.y + dy)));
            }
        }
        Self { origin, block_size, cells }
    }

    fn index_of(&self, c: Coord) -> Option<usize> {
        let dx = c.x - self.origin.x;
        let dy = c.y - self.origin.y;
        let b = self.block_size as i32;
        if (0..b).contains(&dx) && (0..b).contains(&dy) {
            Some((dy * b + dx) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, c: Coord) -> Option<&Cell> {
        self.index_of(c).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        self.index_of(c).map(|i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
