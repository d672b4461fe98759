//! Static geometry of the defended field plus its activation latch.
//!
//! The field is a dome of radius [`DefenceField::outer_ring_size`] centred on
//! the origin. A shrine sits in the middle inside a clear zone of radius
//! [`DefenceField::shrine_ring_size`], and a fixed number of entrances are
//! spread evenly around the rim, each with its own clear zone of radius
//! [`DefenceField::entrance_ring_size`].
//!
//! Everything here is computed once when the resource is built. The only
//! mutable state is the one-way "field activated" flag and the cached shrine
//! entity.
//!
//! # Related
//!
//! - [`crate::worldgen`] – consumes the geometry to gate block placement
//! - [`crate::resources::blockentities::BlockEntities`] – used to resolve the shrine entity
//! - [`crate::events::field`] – the activation event and observer

use std::f64::consts::PI;

use bevy_ecs::prelude::*;
use glam::IVec3;

use crate::error::DefenceError;
use crate::resources::blockentities::BlockEntities;

pub const DEFAULT_SHRINE_RING: i32 = 5;
pub const DEFAULT_OUTER_RING: i32 = 60;
pub const DEFAULT_ENTRANCE_RING: i32 = 4;
pub const DEFAULT_ENTRANCE_COUNT: usize = 3;

/// Shrine occupancy, indexed `[y][x][z]`. A 1 places a block.
const SHRINE_SHAPE: [[[u8; 3]; 3]; 6] = [
    [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
    [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
    [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
    [[1, 1, 1], [1, 1, 1], [1, 1, 1]],
    [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
    [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
];

/// Geometry and activation state of the defence field.
#[derive(Resource, Debug, Clone)]
pub struct DefenceField {
    outer_ring: i32,
    shrine_ring: i32,
    entrance_ring: i32,
    entrances: Vec<IVec3>,
    shrine: Vec<IVec3>,
    activated: bool,
    shrine_entity: Option<Entity>,
}

impl Default for DefenceField {
    fn default() -> Self {
        Self::new()
    }
}

impl DefenceField {
    /// Field with the stock dimensions.
    pub fn new() -> Self {
        Self::build(
            DEFAULT_OUTER_RING,
            DEFAULT_SHRINE_RING,
            DEFAULT_ENTRANCE_RING,
            DEFAULT_ENTRANCE_COUNT,
        )
    }

    /// Field with custom dimensions.
    ///
    /// The shrine clear zone must fit strictly inside the dome and no radius
    /// may be negative. Zero entrances is allowed; such a field simply has
    /// no way in.
    pub fn with_geometry(
        outer_ring: i32,
        shrine_ring: i32,
        entrance_ring: i32,
        entrance_count: usize,
    ) -> Result<Self, DefenceError> {
        if outer_ring <= 0 {
            return Err(DefenceError::InvalidGeometry(format!(
                "outer ring must be positive, got {outer_ring}"
            )));
        }
        if shrine_ring < 0 || entrance_ring < 0 {
            return Err(DefenceError::InvalidGeometry(format!(
                "ring sizes must not be negative (shrine {shrine_ring}, entrance {entrance_ring})"
            )));
        }
        if shrine_ring >= outer_ring {
            return Err(DefenceError::InvalidGeometry(format!(
                "shrine ring {shrine_ring} does not fit inside outer ring {outer_ring}"
            )));
        }
        Ok(Self::build(
            outer_ring,
            shrine_ring,
            entrance_ring,
            entrance_count,
        ))
    }

    fn build(outer_ring: i32, shrine_ring: i32, entrance_ring: i32, entrance_count: usize) -> Self {
        Self {
            outer_ring,
            shrine_ring,
            entrance_ring,
            entrances: calculate_entrances(entrance_count, outer_ring),
            shrine: shrine_positions(&SHRINE_SHAPE),
            activated: false,
            shrine_entity: None,
        }
    }

    /// Position of a block belonging to the shrine.
    ///
    /// Always the same block for the same shrine shape.
    pub fn shrine_block(&self) -> Option<IVec3> {
        self.shrine.first().copied()
    }

    pub fn shrine(&self) -> &[IVec3] {
        &self.shrine
    }

    pub fn entrance_count(&self) -> usize {
        self.entrances.len()
    }

    pub fn entrances(&self) -> &[IVec3] {
        &self.entrances
    }

    pub fn field_centre(&self) -> IVec3 {
        IVec3::ZERO
    }

    /// Radius, in blocks, of the clear zone around the shrine.
    pub fn shrine_ring_size(&self) -> i32 {
        self.shrine_ring
    }

    /// Radius, in blocks, of the dome wall.
    pub fn outer_ring_size(&self) -> i32 {
        self.outer_ring
    }

    /// Radius, in blocks, of the clear zone around each entrance.
    pub fn entrance_ring_size(&self) -> i32 {
        self.entrance_ring
    }

    /// Position of entrance `id`, or the origin for an unknown id.
    pub fn entrance_pos(&self, id: i32) -> IVec3 {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.entrances.get(i).copied())
            .unwrap_or(IVec3::ZERO)
    }

    /// True if `pos` lies inside the clear zone of any entrance.
    pub fn in_range_of_entrance(&self, pos: IVec3) -> bool {
        let distance = self.distance_to_nearest_entrance(pos);
        distance >= 0.0 && distance < f64::from(self.entrance_ring)
    }

    /// Euclidean distance from `pos` to the closest entrance, or `-1.0` when
    /// the field has no entrances.
    pub fn distance_to_nearest_entrance(&self, pos: IVec3) -> f64 {
        let pos = pos.as_dvec3();
        self.entrances
            .iter()
            .map(|entrance| pos.distance(entrance.as_dvec3()))
            .min_by(f64::total_cmp)
            .unwrap_or(-1.0)
    }

    pub fn is_field_activated(&self) -> bool {
        self.activated
    }

    /// Latch the field as active. There is deliberately no way back.
    pub fn set_field_activated(&mut self) {
        self.activated = true;
    }

    /// Entity occupying the shrine block.
    ///
    /// The result is cached and only looked up again in `registry` once the
    /// cached entity stops being alive according to `is_alive`.
    pub fn shrine_entity(
        &mut self,
        registry: &BlockEntities,
        is_alive: impl Fn(Entity) -> bool,
    ) -> Option<Entity> {
        if self.shrine_entity.is_none_or(|entity| !is_alive(entity)) {
            self.shrine_entity = self
                .shrine_block()
                .and_then(|pos| registry.get(pos))
                .filter(|entity| is_alive(*entity));
        }
        self.shrine_entity
    }
}

/// Evenly spaced points on the dome rim, truncated toward zero.
fn calculate_entrances(count: usize, outer_ring: i32) -> Vec<IVec3> {
    if count == 0 {
        return Vec::new();
    }
    let step = (2.0 * PI) / count as f64;
    let radius = f64::from(outer_ring);
    (0..count)
        .map(|i| {
            let angle = step * i as f64;
            IVec3::new(
                (angle.cos() * radius) as i32,
                0,
                (angle.sin() * radius) as i32,
            )
        })
        .collect()
}

/// Flattens the occupancy grid into offsets, y-major then x then z.
fn shrine_positions<const X: usize, const Z: usize>(shape: &[[[u8; Z]; X]]) -> Vec<IVec3> {
    let mut positions = Vec::new();
    for (y, layer) in shape.iter().enumerate() {
        for (x, row) in layer.iter().enumerate() {
            for (z, cell) in row.iter().enumerate() {
                if *cell == 1 {
                    positions.push(IVec3::new(x as i32, y as i32, z as i32));
                }
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions() {
        let field = DefenceField::new();
        assert_eq!(field.shrine_ring_size(), 5);
        assert_eq!(field.outer_ring_size(), 60);
        assert_eq!(field.entrance_ring_size(), 4);
        assert_eq!(field.entrance_count(), 3);
        assert_eq!(field.field_centre(), IVec3::ZERO);
    }

    #[test]
    fn entrances_are_truncated_points_on_the_rim() {
        let field = DefenceField::new();
        // cos(2pi/3) * 60 = -29.99.., sin(2pi/3) * 60 = 51.96..
        assert_eq!(field.entrance_pos(0), IVec3::new(60, 0, 0));
        assert_eq!(field.entrance_pos(1), IVec3::new(-29, 0, 51));
        assert_eq!(field.entrance_pos(2), IVec3::new(-30, 0, -51));
    }

    #[test]
    fn unknown_entrance_is_origin() {
        let field = DefenceField::new();
        assert_eq!(field.entrance_pos(-1), IVec3::ZERO);
        assert_eq!(field.entrance_pos(3), IVec3::ZERO);
    }

    #[test]
    fn shrine_shape_order_and_count() {
        let field = DefenceField::new();
        // 1 + 1 + 5 + 9 + 5 + 1
        assert_eq!(field.shrine().len(), 22);
        assert_eq!(field.shrine_block(), Some(IVec3::new(1, 0, 1)));
        assert_eq!(field.shrine()[2], IVec3::new(0, 2, 1));
        assert_eq!(field.shrine().last(), Some(&IVec3::new(1, 5, 1)));
    }

    #[test]
    fn distance_and_range_of_entrance() {
        let field = DefenceField::new();
        let entrance = field.entrance_pos(0);
        assert_eq!(field.distance_to_nearest_entrance(entrance), 0.0);
        assert!(field.in_range_of_entrance(entrance + IVec3::new(-3, 0, 0)));
        // Strictly less than the ring size.
        assert!(!field.in_range_of_entrance(entrance + IVec3::new(-4, 0, 0)));
        assert!(!field.in_range_of_entrance(IVec3::ZERO));
    }

    #[test]
    fn no_entrances_means_no_distance() {
        let field = DefenceField::with_geometry(20, 3, 2, 0).unwrap();
        assert_eq!(field.distance_to_nearest_entrance(IVec3::ZERO), -1.0);
        assert!(!field.in_range_of_entrance(IVec3::ZERO));
    }

    #[test]
    fn rejects_shrine_outside_dome() {
        assert!(DefenceField::with_geometry(10, 10, 2, 3).is_err());
        assert!(DefenceField::with_geometry(0, 0, 2, 3).is_err());
        assert!(DefenceField::with_geometry(10, 2, -1, 3).is_err());
    }

    #[test]
    fn activation_is_a_latch() {
        let mut field = DefenceField::new();
        assert!(!field.is_field_activated());
        field.set_field_activated();
        field.set_field_activated();
        assert!(field.is_field_activated());
    }

    #[test]
    fn shrine_entity_is_cached_until_dead() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut field = DefenceField::new();
        let block = field.shrine_block().unwrap();
        let mut registry = BlockEntities::default();
        registry.insert(block, first);

        assert_eq!(field.shrine_entity(&registry, |_| true), Some(first));

        // Still alive: the registry is not consulted again.
        registry.insert(block, second);
        assert_eq!(field.shrine_entity(&registry, |_| true), Some(first));

        // Dead: looked up again.
        assert_eq!(field.shrine_entity(&registry, |e| e != first), Some(second));
    }
}
