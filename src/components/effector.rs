//! Effector tower blocks.
//!
//! An effector does nothing on its own. When a targeter of the same tower
//! fires, an [`ApplyEffectEvent`](crate::events::combat::ApplyEffectEvent)
//! is triggered for every effector, and the observer matching the
//! effector's component applies the effect to the target.
//!
//! Each effector declares how often it acts ([`EffectCount`]) and how long
//! its effect lingers ([`EffectDuration`]).

use bevy_ecs::prelude::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectCount {
    /// Once per targeter shot.
    PerShot,
    /// Every shot keeps the effect going while the enemy stays targeted.
    Continuous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectDuration {
    /// Applied and done.
    Instant,
    /// Lasts while the enemy keeps being targeted.
    Lasting,
    /// Runs its own course once applied.
    Permanent,
}

pub trait TowerEffect {
    fn effect_count(&self) -> EffectCount;
    fn effect_duration(&self) -> EffectDuration;
}

/// Plain damage.
#[derive(Component, Clone, Copy, Debug)]
pub struct DamageEffector {
    pub damage: i32,
}

impl TowerEffect for DamageEffector {
    fn effect_count(&self) -> EffectCount {
        EffectCount::PerShot
    }

    fn effect_duration(&self) -> EffectDuration {
        EffectDuration::Instant
    }
}

/// Slows the enemy without hurting it.
#[derive(Component, Clone, Copy, Debug)]
pub struct IceEffector {
    /// Speed multiplier; 0.9 leaves the enemy at 90% of its speed.
    pub slow: f32,
}

impl TowerEffect for IceEffector {
    fn effect_count(&self) -> EffectCount {
        EffectCount::Continuous
    }

    fn effect_duration(&self) -> EffectDuration {
        EffectDuration::Lasting
    }
}

/// Damage over time.
#[derive(Component, Clone, Copy, Debug)]
pub struct FireEffector {
    /// Damage per second while burning.
    pub damage: i32,
    /// How long the enemy burns, in milliseconds.
    pub fire_duration: u64,
}

impl TowerEffect for FireEffector {
    fn effect_count(&self) -> EffectCount {
        EffectCount::Continuous
    }

    fn effect_duration(&self) -> EffectDuration {
        EffectDuration::Permanent
    }
}
