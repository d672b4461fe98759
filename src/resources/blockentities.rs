//! Block position to entity lookup.
//!
//! Stands in for the host's block-entity registry: whoever places a block
//! that carries an entity (the shrine, tower blocks) records it here so
//! gameplay code can go from a world position back to the entity.

use bevy_ecs::prelude::*;
use glam::IVec3;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Clone, Default)]
pub struct BlockEntities {
    blocks: FxHashMap<IVec3, Entity>,
}

impl BlockEntities {
    /// Record `entity` at `pos`, returning the entity previously there.
    pub fn insert(&mut self, pos: IVec3, entity: Entity) -> Option<Entity> {
        self.blocks.insert(pos, entity)
    }

    pub fn get(&self, pos: IVec3) -> Option<Entity> {
        self.blocks.get(&pos).copied()
    }
}
