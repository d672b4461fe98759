//! Enemy spawning and movement.
//!
//! Enemies enter through one of the field's entrances and walk a straight
//! line of whole-block waypoints towards the centre, stopping at the edge of
//! the shrine's clear zone. An enemy that finishes its path hurts the shrine
//! and is removed.

use bevy_ecs::prelude::*;
use glam::{IVec3, Vec3};
use log::{debug, warn};

use crate::components::enemy::{Enemy, PathFollower};
use crate::components::health::Health;
use crate::components::location::Location;
use crate::components::shrine::Shrine;
use crate::components::status::Slowed;
use crate::events::health::DamageEntityEvent;
use crate::resources::blockentities::BlockEntities;
use crate::resources::defencefield::DefenceField;
use crate::resources::worldtime::WorldTime;

/// Shrine damage dealt by each enemy that reaches it.
pub const SHRINE_DAMAGE: i32 = 1;

/// Waypoints from `entrance` towards the field centre, one block apart,
/// ending on the first point inside `stop_radius`.
pub fn path_to_shrine(entrance: IVec3, stop_radius: i32) -> Vec<Vec3> {
    let start = entrance.as_vec3();
    let length = start.length();
    if length <= f32::EPSILON {
        return vec![start];
    }
    let direction = -start / length;
    let stop = stop_radius.max(0) as f32;
    let mut path = vec![start];
    let mut travelled = 1.0;
    while travelled <= length {
        let point = (start + direction * travelled).round();
        path.push(point);
        if point.length() <= stop {
            break;
        }
        travelled += 1.0;
    }
    path
}

/// Components for a fresh enemy standing on entrance `entrance`.
pub fn enemy_bundle(
    field: &DefenceField,
    entrance: i32,
    health: i32,
    speed: f32,
) -> (Enemy, Location, Health, PathFollower) {
    let start = field.entrance_pos(entrance);
    let path = path_to_shrine(start, field.shrine_ring_size());
    (
        Enemy,
        Location::of_block(start),
        Health::new(health),
        PathFollower::new(path, speed),
    )
}

pub fn move_enemies(
    world_time: Res<WorldTime>,
    mut field: ResMut<DefenceField>,
    registry: Res<BlockEntities>,
    shrines: Query<(), With<Shrine>>,
    mut enemies: Query<(Entity, &mut Location, &mut PathFollower, Option<&Slowed>), With<Enemy>>,
    mut commands: Commands,
) {
    for (entity, mut location, mut follower, slowed) in enemies.iter_mut() {
        let speed = follower.speed * slowed.map_or(1.0, Slowed::multiplier);
        follower.advance(speed * world_time.delta);
        location.pos = follower.position();

        if !follower.finished() {
            continue;
        }
        match field.shrine_entity(&registry, |e| shrines.contains(e)) {
            Some(shrine) => {
                debug!("Enemy {:?} reached the shrine", entity);
                commands.trigger(DamageEntityEvent {
                    entity: shrine,
                    damage: SHRINE_DAMAGE,
                    source: Some(entity),
                });
            }
            None => warn!("Enemy {:?} reached an empty shrine", entity),
        }
        commands.entity(entity).try_despawn();
    }
}
