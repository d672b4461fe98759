//! Rasterizers: turn facets into blocks on a chunk.
//!
//! Dome blocks close to an entrance, the entrance hoods included, use
//! [`BlockKind::AltWorldBlock`] so the openings stand out from the rest of
//! the wall.

use glam::IVec3;

use super::facet::{BooleanFieldFacet2D, DefenceFieldFacet};
use super::{BlockKind, ChunkView};
use crate::resources::defencefield::DefenceField;

/// Height filler blocks are placed at.
pub const FILLING_LEVEL: i32 = 0;

#[derive(Debug, Clone)]
pub struct DefenceFieldRasterizer {
    field: DefenceField,
}

impl DefenceFieldRasterizer {
    pub fn new(field: DefenceField) -> Self {
        DefenceFieldRasterizer { field }
    }

    /// Block used for a dome position.
    pub fn block_for(&self, pos: IVec3) -> BlockKind {
        let distance = self.field.distance_to_nearest_entrance(pos) as i32;
        if distance < self.field.entrance_ring_size() + 2 {
            BlockKind::AltWorldBlock
        } else {
            BlockKind::WorldBlock
        }
    }

    pub fn generate_chunk(&self, chunk: &mut impl ChunkView, facet: &DefenceFieldFacet) {
        for (pos, set) in facet.world_entries() {
            if set {
                chunk.set_block(pos, self.block_for(pos));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFillingRasterizer;

impl RandomFillingRasterizer {
    pub fn generate_chunk(&self, chunk: &mut impl ChunkView, facet: &BooleanFieldFacet2D) {
        for column in facet.set_columns() {
            chunk.set_block(
                IVec3::new(column.x, FILLING_LEVEL, column.y),
                BlockKind::FillingBlock,
            );
        }
    }
}

/// Places the shrine at the centre of the field.
#[derive(Debug, Clone)]
pub struct ShrineRasterizer {
    field: DefenceField,
}

impl ShrineRasterizer {
    pub fn new(field: DefenceField) -> Self {
        ShrineRasterizer { field }
    }

    pub fn generate_chunk(&self, chunk: &mut impl ChunkView) {
        let centre = self.field.field_centre();
        for offset in self.field.shrine() {
            chunk.set_block(centre + *offset, BlockKind::ShrineBlock);
        }
    }
}
