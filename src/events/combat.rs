//! Effect application events and the effector observers.
//!
//! When a targeter fires, the targeting system triggers one
//! [`ApplyEffectEvent`] per effector block of the tower. Every effector kind
//! has its own global observer here; each one looks up its component on
//! [`ApplyEffectEvent::effector`] and returns early when the block is of a
//! different kind, so adding an effector means adding a component and an
//! observer.
//!
//! # Related
//!
//! - [`crate::systems::targeting`] – emits these events
//! - [`crate::events::health::DamageEntityEvent`] – damage is forwarded there
//! - [`crate::systems::effects`] – ticks the statuses inserted here

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::effector::{
    DamageEffector, EffectDuration, FireEffector, IceEffector, TowerEffect,
};
use crate::components::status::{OnFire, Slowed};
use crate::events::health::DamageEntityEvent;

/// Extra seconds a lasting effect survives past the next expected shot.
pub const LASTING_GRACE: f32 = 0.25;

/// Apply the effect of `effector` to `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ApplyEffectEvent {
    /// The effector block whose effect is applied.
    pub effector: Entity,
    /// The enemy being targeted.
    pub target: Entity,
    /// Tower-wide scale for the effect strength.
    pub multiplier: f32,
    /// Seconds until the targeter fires again.
    pub shot_interval: f32,
}

/// Forwards scaled damage to the target.
pub fn observe_damage_effector(
    trigger: On<ApplyEffectEvent>,
    effectors: Query<&DamageEffector>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(effector) = effectors.get(event.effector) else {
        return;
    };
    let damage = scaled(effector.damage, event.multiplier);
    commands.trigger(DamageEntityEvent {
        entity: event.target,
        damage,
        source: Some(event.effector),
    });
}

/// How long an effect applied now lingers on its target, in seconds.
///
/// `Instant` effects leave nothing behind. `Lasting` ones live until just
/// after the next expected shot, so they end soon after the targeter stops
/// shooting. `Permanent` ones run their own course.
pub fn effect_lifetime(
    duration: EffectDuration,
    shot_interval: f32,
    own_duration: f32,
) -> Option<f32> {
    match duration {
        EffectDuration::Instant => None,
        EffectDuration::Lasting => Some(shot_interval + LASTING_GRACE),
        EffectDuration::Permanent => Some(own_duration),
    }
}

/// Slows the target while this effector keeps shooting at it.
///
/// Overlapping ice from several effectors applies the strongest slow, each
/// one expiring on its own.
pub fn observe_ice_effector(
    trigger: On<ApplyEffectEvent>,
    effectors: Query<&IceEffector>,
    mut slowed: Query<&mut Slowed>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(effector) = effectors.get(event.effector) else {
        return;
    };
    let lifetime = effect_lifetime(effector.effect_duration(), event.shot_interval, 0.0);
    let Some(remaining) = lifetime else {
        return;
    };
    debug!(
        "Slowing {:?} to {:.2} for {:.2}s",
        event.target, effector.slow, remaining
    );
    match slowed.get_mut(event.target) {
        Ok(mut current) => current.apply(event.effector, effector.slow, remaining),
        Err(_) => {
            commands
                .entity(event.target)
                .try_insert(Slowed::new(event.effector, effector.slow, remaining));
        }
    }
}

/// Sets the target on fire, or re-lights this effector's fire on it.
pub fn observe_fire_effector(
    trigger: On<ApplyEffectEvent>,
    effectors: Query<&FireEffector>,
    mut burning: Query<&mut OnFire>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(effector) = effectors.get(event.effector) else {
        return;
    };
    let own = effector.fire_duration as f32 / 1000.0;
    let lifetime = effect_lifetime(effector.effect_duration(), event.shot_interval, own);
    let Some(seconds) = lifetime else {
        return;
    };
    let dps = effector.damage as f32 * event.multiplier;
    match burning.get_mut(event.target) {
        Ok(mut fire) => fire.apply(event.effector, dps, seconds),
        Err(_) => {
            commands
                .entity(event.target)
                .try_insert(OnFire::new(event.effector, dps, seconds));
        }
    }
}

fn scaled(amount: i32, multiplier: f32) -> i32 {
    (amount as f32 * multiplier).round() as i32
}
