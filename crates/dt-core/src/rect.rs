//! An axis-aligned rectangle of grid coordinates — the viewport/query
//! shape used throughout the external command/query interfaces.

use crate::coord::Coord;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A `radius`-cell square centred on `center`.
    pub fn centered(center: Coord, radius: u32) -> Self {
        let side = radius * 2 + 1;
        Self { x: center.x - radius as i32, y: center.y - radius as i32, w: side, h: side }
    }

    pub fn contains(&self, c: Coord) -> bool {
        (self.x..self.x + self.w as i32).contains(&c.x) && (self.y..self.y + self.h as i32).contains(&c.y)
    }

    pub fn expanded(&self, by: u32) -> Self {
        let by = by as i32;
        Self { x: self.x - by, y: self.y - by, w: self.w + 2 * by as u32, h: self.h + 2 * by as u32 }
    }

    /// Every coordinate inside the rect, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.y..self.y + self.h as i32)
            .flat_map(move |y| (self.x..self.x + self.w as i32).map(move |x| Coord::new(x, y)))
    }
}
