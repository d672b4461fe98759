//! Status effects left on enemies by effectors.
//!
//! Each effector that hits an enemy keeps its own entry, keyed by the
//! effector block, with its own countdown in world-time seconds. Re-applying
//! from the same effector refreshes only that entry, so one tower can never
//! extend what another tower applied. The strongest live entry wins; the
//! component is removed by [`crate::systems::effects`] once every entry has
//! run out.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

/// One effector's slow on an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowSource {
    pub effector: Entity,
    pub multiplier: f32,
    pub remaining: f32,
}

/// Movement speed is multiplied by the strongest live slow.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Slowed {
    pub sources: SmallVec<[SlowSource; 2]>,
}

impl Slowed {
    pub fn new(effector: Entity, multiplier: f32, remaining: f32) -> Self {
        let mut slowed = Slowed {
            sources: SmallVec::new(),
        };
        slowed.apply(effector, multiplier, remaining);
        slowed
    }

    /// Add or refresh the slow coming from `effector`.
    pub fn apply(&mut self, effector: Entity, multiplier: f32, remaining: f32) {
        match self.sources.iter_mut().find(|s| s.effector == effector) {
            Some(source) => {
                source.multiplier = multiplier;
                source.remaining = remaining;
            }
            None => self.sources.push(SlowSource {
                effector,
                multiplier,
                remaining,
            }),
        }
    }

    /// Speed multiplier currently in effect; 1.0 once every slow expired.
    pub fn multiplier(&self) -> f32 {
        self.sources
            .iter()
            .map(|s| s.multiplier)
            .reduce(f32::min)
            .unwrap_or(1.0)
    }

    /// Count every slow down by `dt` and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for source in &mut self.sources {
            source.remaining -= dt;
        }
        self.sources.retain(|s| s.remaining > 0.0);
    }

    pub fn is_expired(&self) -> bool {
        self.sources.is_empty()
    }
}

/// One effector's fire on an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireSource {
    pub effector: Entity,
    pub damage_per_second: f32,
    pub remaining: f32,
}

/// Burns with the hottest live fire. Fires don't stack.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OnFire {
    pub sources: SmallVec<[FireSource; 2]>,
    /// Fractional damage not yet dealt.
    pub pending: f32,
}

impl OnFire {
    pub fn new(effector: Entity, damage_per_second: f32, seconds: f32) -> Self {
        let mut fire = OnFire {
            sources: SmallVec::new(),
            pending: 0.0,
        };
        fire.apply(effector, damage_per_second, seconds);
        fire
    }

    /// Light or re-light the fire coming from `effector`.
    ///
    /// A re-light never shortens what that effector's fire has left.
    pub fn apply(&mut self, effector: Entity, damage_per_second: f32, seconds: f32) {
        match self.sources.iter_mut().find(|s| s.effector == effector) {
            Some(source) => {
                source.damage_per_second = damage_per_second;
                source.remaining = source.remaining.max(seconds);
            }
            None => self.sources.push(FireSource {
                effector,
                damage_per_second,
                remaining: seconds,
            }),
        }
    }

    /// Damage per second of the hottest live fire.
    pub fn damage_per_second(&self) -> f32 {
        self.sources
            .iter()
            .map(|s| s.damage_per_second)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    /// Burn for `dt` seconds and return the whole damage points to deal now.
    ///
    /// When a hotter fire goes out partway through `dt`, the rest of the
    /// tick burns at the next hottest one.
    pub fn burn(&mut self, dt: f32) -> i32 {
        let dt = dt.max(0.0);
        let mut from = 0.0;
        let mut dealt = 0.0;
        while from < dt {
            let Some(dps) = self
                .sources
                .iter()
                .filter(|s| s.remaining > from)
                .map(|s| s.damage_per_second)
                .reduce(f32::max)
            else {
                break;
            };
            let until = self
                .sources
                .iter()
                .map(|s| s.remaining)
                .filter(|r| *r > from)
                .fold(dt, f32::min);
            dealt += dps * (until - from);
            from = until;
        }
        for source in &mut self.sources {
            source.remaining -= dt;
        }
        self.sources.retain(|s| s.remaining > 0.0);

        self.pending += dealt;
        let whole = self.pending.floor();
        self.pending -= whole;
        whole as i32
    }

    pub fn is_out(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effectors() -> (Entity, Entity) {
        let mut world = bevy_ecs::world::World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn burn_accumulates_fractions() {
        let (a, _) = effectors();
        let mut fire = OnFire::new(a, 3.0, 2.0);
        assert_eq!(fire.burn(0.25), 0);
        assert_eq!(fire.burn(0.25), 1);
        assert_eq!(fire.burn(1.0), 3);
        assert!((fire.sources[0].remaining - 0.5).abs() < 1e-6);
    }

    #[test]
    fn burn_never_outlasts_duration() {
        let (a, _) = effectors();
        let mut fire = OnFire::new(a, 4.0, 0.5);
        assert_eq!(fire.burn(10.0), 2);
        assert!(fire.is_out());
    }

    #[test]
    fn hot_short_fire_falls_back_to_the_long_one() {
        let (hot, long) = effectors();
        let mut fire = OnFire::new(hot, 10.0, 0.5);
        fire.apply(long, 2.0, 3.0);
        assert!((fire.damage_per_second() - 10.0).abs() < 1e-6);

        // 0.5s at 10 then 0.5s at 2.
        assert_eq!(fire.burn(1.0), 6);
        assert!((fire.damage_per_second() - 2.0).abs() < 1e-6);
        assert_eq!(fire.sources.len(), 1);
        assert!((fire.sources[0].remaining - 2.0).abs() < 1e-6);
    }

    #[test]
    fn relighting_only_extends_its_own_fire() {
        let (hot, long) = effectors();
        let mut fire = OnFire::new(hot, 10.0, 0.5);
        fire.apply(long, 2.0, 3.0);
        fire.apply(long, 2.0, 3.0);
        let hot_left = fire.sources.iter().find(|s| s.effector == hot).unwrap();
        assert!((hot_left.remaining - 0.5).abs() < 1e-6);
    }

    #[test]
    fn strongest_slow_lasts_only_its_own_time() {
        let (strong, weak) = effectors();
        let mut slowed = Slowed::new(strong, 0.2, 0.5);
        slowed.apply(weak, 0.9, 0.5);
        assert!((slowed.multiplier() - 0.2).abs() < 1e-6);

        slowed.tick(0.3);
        slowed.apply(weak, 0.9, 0.5);
        slowed.tick(0.3);
        assert!((slowed.multiplier() - 0.9).abs() < 1e-6);
        assert!(!slowed.is_expired());

        slowed.tick(0.5);
        assert!(slowed.is_expired());
        assert!((slowed.multiplier() - 1.0).abs() < 1e-6);
    }
}
