//! Targeter tower blocks.
//!
//! A targeter watches a sphere of radius `range` around its block. Every
//! `attack_speed` milliseconds it picks targets and hands them to the
//! effectors of its tower.
//!
//! # Target reuse
//!
//! A single-target targeter remembers the enemy it hit last. On the next
//! shot that enemy is kept as long as it still exists and is strictly inside
//! the range; only otherwise is a new one selected with `selection`.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// How a targeter chooses between several enemies in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Any enemy, uniformly.
    Random,
    /// Lowest current health.
    Weak,
    /// Furthest along its path.
    #[default]
    First,
    /// Highest current health.
    Strong,
}

/// Whether a targeter hits one enemy or everything in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Single,
    Multi,
}

#[derive(Component, Clone, Debug)]
pub struct Targeter {
    /// Radius, in blocks. Enemies must be strictly closer than this.
    pub range: f32,
    /// Milliseconds between shots.
    pub attack_speed: u64,
    pub selection: SelectionMethod,
    pub kind: TargetKind,
    /// Enemy hit by the previous single-target shot.
    pub last_target: Option<Entity>,
    /// World time, in milliseconds, of the previous shot.
    pub last_shot: Option<u64>,
}

impl Targeter {
    pub fn single(range: f32, attack_speed: u64, selection: SelectionMethod) -> Self {
        Targeter {
            range,
            attack_speed,
            selection,
            kind: TargetKind::Single,
            last_target: None,
            last_shot: None,
        }
    }

    pub fn multi(range: f32, attack_speed: u64) -> Self {
        Targeter {
            kind: TargetKind::Multi,
            ..Self::single(range, attack_speed, SelectionMethod::default())
        }
    }

    /// True if enough time has passed since the last shot.
    pub fn ready(&self, now_ms: u64) -> bool {
        self.last_shot
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.attack_speed)
    }
}
