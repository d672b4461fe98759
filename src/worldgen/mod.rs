//! World generation for the defence field.
//!
//! Generation runs in two stages per region, mirroring the host's pipeline:
//! providers compute facets (what should be where) and rasterizers turn
//! facets into blocks on a chunk.
//!
//! - [`providers::DefenceFieldProvider`] – dome shell and entrance hoods
//! - [`providers::RandomFillingProvider`] – filler blocks scattered inside the dome
//! - [`rasterizers`] – place dome, filler and shrine blocks
//!
//! The host's chunk storage is reached only through [`ChunkView`];
//! [`MemoryChunk`] is a plain in-memory implementation.

use glam::{IVec2, IVec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::defencefield::DefenceField;

pub mod facet;
pub mod noise;
pub mod providers;
pub mod rasterizers;

use providers::{DefenceFieldProvider, RandomFillingProvider};
use rasterizers::{DefenceFieldRasterizer, RandomFillingRasterizer, ShrineRasterizer};

/// Inclusive axis-aligned box of block positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min: IVec3,
    pub max: IVec3,
}

impl Region {
    /// Box spanning both corners, in any order.
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Region {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The chunk at `chunk` (in chunk coordinates) of the given size.
    pub fn from_chunk(chunk: IVec3, size: IVec3) -> Self {
        let min = chunk * size;
        Region {
            min,
            max: min + size - IVec3::ONE,
        }
    }

    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    /// Every `(x, z)` column.
    pub fn columns(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (min, max) = (self.min, self.max);
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| IVec2::new(x, z)))
    }

    /// Every block position, y-major.
    pub fn positions(&self) -> impl Iterator<Item = IVec3> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| {
            (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}

/// Blocks this module places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    WorldBlock,
    AltWorldBlock,
    FillingBlock,
    ShrineBlock,
}

impl BlockKind {
    /// Block identifier as registered with the host.
    pub fn uri(&self) -> &'static str {
        match self {
            BlockKind::WorldBlock => "GooeyDefence:WorldBlock",
            BlockKind::AltWorldBlock => "GooeyDefence:AltWorldBlock",
            BlockKind::FillingBlock => "GooeyDefence:FillingBlock",
            BlockKind::ShrineBlock => "GooeyDefence:ShrineBlock",
        }
    }
}

/// Write access to one chunk of the host's world.
pub trait ChunkView {
    fn region(&self) -> Region;

    /// Place `block` at world position `pos`. Positions outside the chunk
    /// are ignored and return false.
    fn set_block(&mut self, pos: IVec3, block: BlockKind) -> bool;
}

/// Chunk kept in a hash map.
#[derive(Debug, Clone)]
pub struct MemoryChunk {
    region: Region,
    blocks: FxHashMap<IVec3, BlockKind>,
}

impl MemoryChunk {
    pub fn new(region: Region) -> Self {
        MemoryChunk {
            region,
            blocks: FxHashMap::default(),
        }
    }

    pub fn block(&self, pos: IVec3) -> Option<BlockKind> {
        self.blocks.get(&pos).copied()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (IVec3, BlockKind)> + '_ {
        self.blocks.iter().map(|(pos, block)| (*pos, *block))
    }

    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.values().filter(|b| **b == kind).count()
    }
}

impl ChunkView for MemoryChunk {
    fn region(&self) -> Region {
        self.region
    }

    fn set_block(&mut self, pos: IVec3, block: BlockKind) -> bool {
        if !self.region.contains(pos) {
            return false;
        }
        self.blocks.insert(pos, block);
        true
    }
}

/// All providers and rasterizers wired together for one field.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    field_provider: DefenceFieldProvider,
    filling_provider: RandomFillingProvider,
    field_rasterizer: DefenceFieldRasterizer,
    filling_rasterizer: RandomFillingRasterizer,
    shrine_rasterizer: ShrineRasterizer,
}

impl WorldGenerator {
    pub fn new(field: &DefenceField, seed: u64, fill_threshold: f64) -> Self {
        let mut filling_provider = RandomFillingProvider::new(field.clone(), fill_threshold);
        filling_provider.set_seed(seed);
        WorldGenerator {
            field_provider: DefenceFieldProvider::new(field.clone()),
            filling_provider,
            field_rasterizer: DefenceFieldRasterizer::new(field.clone()),
            filling_rasterizer: RandomFillingRasterizer,
            shrine_rasterizer: ShrineRasterizer::new(field.clone()),
        }
    }

    /// Run every stage for the chunk's region.
    pub fn generate_chunk(&self, chunk: &mut impl ChunkView) {
        let region = chunk.region();
        let field_facet = self.field_provider.process(&region);
        let filling_facet = self.filling_provider.process(&region);
        self.filling_rasterizer.generate_chunk(chunk, &filling_facet);
        self.field_rasterizer.generate_chunk(chunk, &field_facet);
        self.shrine_rasterizer.generate_chunk(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_orders_corners() {
        let region = Region::new(IVec3::new(3, 2, 1), IVec3::new(-1, 0, 5));
        assert_eq!(region.min, IVec3::new(-1, 0, 1));
        assert_eq!(region.max, IVec3::new(3, 2, 5));
        assert!(region.contains(IVec3::new(0, 1, 3)));
        assert!(!region.contains(IVec3::new(4, 1, 3)));
    }

    #[test]
    fn chunk_region_and_iteration() {
        let region = Region::from_chunk(IVec3::new(-1, 0, 2), IVec3::new(4, 2, 4));
        assert_eq!(region.min, IVec3::new(-4, 0, 8));
        assert_eq!(region.max, IVec3::new(-1, 1, 11));
        assert_eq!(region.columns().count(), 16);
        assert_eq!(region.positions().count(), 32);
    }

    #[test]
    fn memory_chunk_ignores_outside_writes() {
        let mut chunk = MemoryChunk::new(Region::new(IVec3::ZERO, IVec3::splat(3)));
        assert!(chunk.set_block(IVec3::ONE, BlockKind::WorldBlock));
        assert!(!chunk.set_block(IVec3::splat(4), BlockKind::WorldBlock));
        assert_eq!(chunk.block(IVec3::ONE), Some(BlockKind::WorldBlock));
        assert_eq!(chunk.count(BlockKind::WorldBlock), 1);
    }
}
