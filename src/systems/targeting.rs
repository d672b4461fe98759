//! Tower targeting.
//!
//! Each tick, every targeter whose cooldown has elapsed decides what to shoot
//! and asks the effectors of its tower to act on it.
//!
//! # Target choice
//!
//! A single-target targeter first tries to keep the enemy it hit last
//! ([`can_use_target`]): the enemy must still exist and be strictly inside
//! the range. Otherwise every enemy in range becomes a [`Candidate`] and
//! [`select_target`] picks one with the targeter's [`SelectionMethod`].
//! A multi-target targeter hits every enemy in range and remembers nothing.
//!
//! # System Flow
//!
//! 1. `tower_targeting_system` skips targeters still cooling down
//! 2. Picks targets as above and stores the new `last_target`
//! 3. Triggers one [`ApplyEffectEvent`] per (target, effector) pair
//! 4. Starts the cooldown only if something was shot at

use std::cmp::Reverse;

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec3;
use log::{debug, warn};

use crate::components::enemy::{Enemy, PathFollower};
use crate::components::health::Health;
use crate::components::location::Location;
use crate::components::targeter::{SelectionMethod, TargetKind, Targeter};
use crate::components::tower::{Tower, TowerBlock};
use crate::error::DefenceError;
use crate::events::combat::ApplyEffectEvent;
use crate::resources::targetrng::TargetRng;
use crate::resources::worldtime::WorldTime;

/// An enemy in range, with what the selection methods compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub entity: Entity,
    /// Current health, when the enemy has a [`Health`] component.
    pub health: Option<i32>,
    /// Waypoints left before the shrine, when the enemy follows a path.
    pub steps_remaining: Option<usize>,
}

/// Read-only view over live enemies.
#[derive(SystemParam)]
pub struct EnemyQuery<'w, 's> {
    enemies: Query<
        'w,
        's,
        (
            Entity,
            &'static Location,
            Option<&'static Health>,
            Option<&'static PathFollower>,
        ),
        With<Enemy>,
    >,
}

impl EnemyQuery<'_, '_> {
    /// Every enemy strictly closer than `range` to `pos`.
    pub fn in_range(&self, pos: Vec3, range: f32) -> Vec<Candidate> {
        self.enemies
            .iter()
            .filter(|(_, location, _, _)| location.distance(pos) < range)
            .map(|(entity, _, health, path)| Candidate {
                entity,
                health: health.map(|h| h.health),
                steps_remaining: path.map(|p| p.path.len().saturating_sub(p.step + 1)),
            })
            .collect()
    }

    /// Position of a live enemy.
    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.enemies.get(entity).ok().map(|(_, location, _, _)| location.pos)
    }
}

/// Pick one enemy out of `candidates`.
///
/// Ties go to the earliest candidate. Fails when the method compares a
/// component some candidate lacks.
pub fn select_target(
    candidates: &[Candidate],
    method: SelectionMethod,
    rng: &mut fastrand::Rng,
) -> Result<Option<Entity>, DefenceError> {
    if candidates.is_empty() {
        return Ok(None);
    }
    let chosen = match method {
        SelectionMethod::Random => Some(candidates[rng.usize(..candidates.len())].entity),
        SelectionMethod::Weak => min_by(candidates, |c| health_of(c).map(i64::from))?,
        SelectionMethod::Strong => min_by(candidates, |c| health_of(c).map(|h| Reverse(i64::from(h))))?,
        SelectionMethod::First => min_by(candidates, steps_of)?,
    };
    Ok(chosen)
}

fn min_by<K: Ord>(
    candidates: &[Candidate],
    key: impl Fn(&Candidate) -> Result<K, DefenceError>,
) -> Result<Option<Entity>, DefenceError> {
    let keyed = candidates
        .iter()
        .map(|c| key(c).map(|k| (k, c.entity)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(keyed.into_iter().min_by(|a, b| a.0.cmp(&b.0)).map(|(_, entity)| entity))
}

fn health_of(candidate: &Candidate) -> Result<i32, DefenceError> {
    candidate.health.ok_or_else(|| missing(candidate, "Health"))
}

fn steps_of(candidate: &Candidate) -> Result<usize, DefenceError> {
    candidate
        .steps_remaining
        .ok_or_else(|| missing(candidate, "PathFollower"))
}

fn missing(candidate: &Candidate, component: &'static str) -> DefenceError {
    DefenceError::MissingComponent {
        entity: format!("{:?}", candidate.entity),
        component,
    }
}

/// Whether last round's target can be shot at again.
///
/// `target_pos` is `None` when the target no longer exists.
pub fn can_use_target(target_pos: Option<Vec3>, targeter_pos: Vec3, range: f32) -> bool {
    target_pos.is_some_and(|pos| pos.distance(targeter_pos) < range)
}

/// Single target for a targeter at `targeter_pos`: last round's target when
/// still usable, otherwise a fresh pick among enemies in range.
pub fn get_target(
    targeter: &Targeter,
    targeter_pos: Vec3,
    enemies: &EnemyQuery,
    rng: &mut fastrand::Rng,
) -> Result<Option<Entity>, DefenceError> {
    if let Some(last) = targeter.last_target {
        if can_use_target(enemies.position(last), targeter_pos, targeter.range) {
            return Ok(Some(last));
        }
    }
    let in_range = enemies.in_range(targeter_pos, targeter.range);
    select_target(&in_range, targeter.selection, rng)
}

pub fn tower_targeting_system(
    time: Res<WorldTime>,
    mut rng: ResMut<TargetRng>,
    mut targeters: Query<(Entity, &Location, &mut Targeter, &TowerBlock)>,
    towers: Query<&Tower>,
    enemies: EnemyQuery,
    mut commands: Commands,
) {
    let now = time.elapsed_ms();
    for (entity, location, mut targeter, block) in targeters.iter_mut() {
        if !targeter.ready(now) {
            continue;
        }
        let Ok(tower) = towers.get(block.tower) else {
            warn!("Targeter {:?} belongs to missing tower {:?}", entity, block.tower);
            continue;
        };

        let targets = match targeter.kind {
            TargetKind::Single => {
                match get_target(&targeter, location.pos, &enemies, &mut rng.0) {
                    Ok(target) => {
                        if target != targeter.last_target {
                            debug!("Targeter {:?} switched to {:?}", entity, target);
                        }
                        targeter.last_target = target;
                        target.into_iter().collect::<Vec<_>>()
                    }
                    Err(e) => {
                        warn!("Targeter {:?} could not select a target: {}", entity, e);
                        targeter.last_target = None;
                        Vec::new()
                    }
                }
            }
            TargetKind::Multi => enemies
                .in_range(location.pos, targeter.range)
                .into_iter()
                .map(|c| c.entity)
                .collect(),
        };

        if targets.is_empty() {
            continue;
        }
        targeter.last_shot = Some(now);

        let shot_interval = targeter.attack_speed as f32 / 1000.0;
        for target in targets {
            for effector in &tower.effectors {
                commands.trigger(ApplyEffectEvent {
                    effector: *effector,
                    target,
                    multiplier: tower.multiplier,
                    shot_interval,
                });
            }
        }
    }
}
