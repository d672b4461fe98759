//! Tower composition.
//!
//! A tower is an entity that owns a set of block entities: targeters pick
//! enemies, effectors apply something to whatever was picked. Each block
//! points back at its tower with [`TowerBlock`].

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

#[derive(Component, Clone, Debug)]
pub struct Tower {
    pub targeters: SmallVec<[Entity; 2]>,
    pub effectors: SmallVec<[Entity; 4]>,
    /// Scales every effect the tower applies.
    pub multiplier: f32,
}

impl Default for Tower {
    fn default() -> Self {
        Tower {
            targeters: SmallVec::new(),
            effectors: SmallVec::new(),
            multiplier: 1.0,
        }
    }
}

impl Tower {
    pub fn with_multiplier(multiplier: f32) -> Self {
        Tower {
            multiplier,
            ..Default::default()
        }
    }
}

/// Back-reference from a tower block to its tower.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerBlock {
    pub tower: Entity,
}
