//! Terrain tags and movable-terrain sets.
//!
//! [`Terrain`] is the small closed set a [`crate::coord`]-addressed cell can
//! be tagged with; [`TerrainSet`] is the bitflag set an agent carries to say
//! which of those tags it can enter.

use bitflags::bitflags;

/// A cell's terrain tag. `Forbidden` is always impassable, to every agent,
/// regardless of its [`TerrainSet`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Normal,
    Water,
    Mountain,
    Forest,
    Forbidden,
}

impl Terrain {
    pub fn as_flag(self) -> TerrainSet {
        match self {
            Terrain::Normal => TerrainSet::NORMAL,
            Terrain::Water => TerrainSet::WATER,
            Terrain::Mountain => TerrainSet::MOUNTAIN,
            Terrain::Forest => TerrainSet::FOREST,
            Terrain::Forbidden => TerrainSet::empty(),
        }
    }
}

bitflags! {
    /// The subset of [`Terrain`] tags an agent may pass through.
    ///
    /// `Forbidden` has no corresponding bit: it is impassable to everyone,
    /// it is never a member of any `TerrainSet`.
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TerrainSet: u8 {
        const NORMAL   = 0b0001;
        const WATER    = 0b0010;
        const MOUNTAIN = 0b0100;
        const FOREST   = 0b1000;
    }
}

impl TerrainSet {
    /// `Normal` only — the default an agent starts with.
    pub fn native() -> Self {
        TerrainSet::NORMAL
    }

    /// Every terrain tag except `Forbidden`.
    pub fn all_passable() -> Self {
        TerrainSet::NORMAL | TerrainSet::WATER | TerrainSet::MOUNTAIN | TerrainSet::FOREST
    }

    /// `true` if this set permits entering a cell tagged `terrain`.
    pub fn allows(&self, terrain: Terrain) -> bool {
        if terrain == Terrain::Forbidden {
            return false;
        }
        self.contains(terrain.as_flag())
    }
}
