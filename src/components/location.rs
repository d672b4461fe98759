use bevy_ecs::prelude::Component;
use glam::{IVec3, Vec3};

/// World-space position of an entity, in blocks.
///
/// Enemies move continuously, so this is a float position. Tower blocks and
/// the shrine sit on the integer corner of the block they occupy (see
/// [`Location::of_block`]), which is also where enemy waypoints lie.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub pos: Vec3,
}

impl Location {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Location {
            pos: Vec3::new(x, y, z),
        }
    }

    pub fn of_block(block: IVec3) -> Self {
        Location {
            pos: block.as_vec3(),
        }
    }

    pub fn distance(&self, other: Vec3) -> f32 {
        self.pos.distance(other)
    }
}
