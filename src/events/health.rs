//! Damage delivery.
//!
//! [`DamageEntityEvent`] is the single entry point for hurting anything.
//! [`observe_damage`] subtracts the damage from [`Health`], and when an
//! entity drops to zero it triggers [`EntityDiedEvent`]. Dead enemies are
//! despawned; any other dead entity (the shrine) is left for the host to
//! deal with.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::enemy::Enemy;
use crate::components::health::Health;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEntityEvent {
    pub entity: Entity,
    pub damage: i32,
    /// Block or enemy that caused the damage, if known.
    pub source: Option<Entity>,
}

/// Fired once when an entity's health reaches zero.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDiedEvent {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

pub fn observe_damage(
    trigger: On<DamageEntityEvent>,
    mut healths: Query<&mut Health>,
    enemies: Query<(), With<Enemy>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(mut health) = healths.get_mut(event.entity) else {
        debug!("Damage sent to {:?}, which has no health", event.entity);
        return;
    };
    if health.is_dead() {
        return;
    }
    if !health.damage(event.damage) {
        return;
    }
    commands.trigger(EntityDiedEvent {
        entity: event.entity,
        killer: event.source,
    });
    if enemies.contains(event.entity) {
        commands.entity(event.entity).try_despawn();
    } else {
        info!("{:?} was destroyed", event.entity);
    }
}
