//! Per-region generation data.
//!
//! Providers fill facets for a region; rasterizers read them to place
//! blocks. [`BooleanFieldFacet2D`] holds one flag per column,
//! [`DefenceFieldFacet`] one flag per block.

use glam::{IVec2, IVec3};
use rustc_hash::FxHashMap;

use super::Region;

/// One boolean per `(x, z)` column of a region, addressed in world
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanFieldFacet2D {
    min: IVec2,
    max: IVec2,
    data: Vec<bool>,
}

impl BooleanFieldFacet2D {
    pub fn new(region: &Region) -> Self {
        let min = IVec2::new(region.min.x, region.min.z);
        let max = IVec2::new(region.max.x, region.max.z);
        let size = (max - min + IVec2::ONE).max(IVec2::ZERO);
        BooleanFieldFacet2D {
            min,
            max,
            data: vec![false; (size.x * size.y) as usize],
        }
    }

    /// Inclusive world-space corners of the facet.
    pub fn world_region(&self) -> (IVec2, IVec2) {
        (self.min, self.max)
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < self.min.x || x > self.max.x || z < self.min.y || z > self.max.y {
            return None;
        }
        let width = self.max.x - self.min.x + 1;
        Some(((z - self.min.y) * width + (x - self.min.x)) as usize)
    }

    /// Set a column. Returns false if it lies outside the facet.
    pub fn set_world(&mut self, x: i32, z: i32, value: bool) -> bool {
        match self.index(x, z) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Value of a column; columns outside the facet read as false.
    pub fn get_world(&self, x: i32, z: i32) -> bool {
        self.index(x, z).is_some_and(|i| self.data[i])
    }

    /// World coordinates of every set column.
    pub fn set_columns(&self) -> impl Iterator<Item = IVec2> + '_ {
        let width = self.max.x - self.min.x + 1;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(i, _)| {
                let i = i as i32;
                IVec2::new(self.min.x + i % width, self.min.y + i / width)
            })
    }
}

/// Blocks of the dome for a region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefenceFieldFacet {
    entries: FxHashMap<IVec3, bool>,
}

impl DefenceFieldFacet {
    pub fn set_world(&mut self, pos: IVec3, value: bool) {
        self.entries.insert(pos, value);
    }

    pub fn get_world(&self, pos: IVec3) -> bool {
        self.entries.get(&pos).copied().unwrap_or(false)
    }

    pub fn world_entries(&self) -> impl Iterator<Item = (IVec3, bool)> + '_ {
        self.entries.iter().map(|(pos, value)| (*pos, *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
