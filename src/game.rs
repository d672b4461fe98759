//! World and schedule assembly.
//!
//! A host that just wants the stock game calls [`build_world`] and
//! [`build_schedule`], spawns towers with [`spawn_tower`], then calls
//! [`tick`] once per frame. Tower layouts can be described in JSON as a
//! [`Scenario`]:
//!
//! ```json
//! {
//!   "towers": [
//!     {
//!       "position": [10, 0, 0],
//!       "multiplier": 1.0,
//!       "targeters": [{ "range": 8.0, "attack_speed": 500, "selection": "first" }],
//!       "effectors": [{ "type": "damage", "damage": 2 }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::IVec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::effector::{DamageEffector, FireEffector, IceEffector};
use crate::components::location::Location;
use crate::components::targeter::{SelectionMethod, TargetKind, Targeter};
use crate::components::tower::{Tower, TowerBlock};
use crate::error::DefenceError;
use crate::events::register_observers;
use crate::resources::blockentities::BlockEntities;
use crate::resources::defenceconfig::DefenceConfig;
use crate::resources::targetrng::TargetRng;
use crate::resources::wavestate::WaveState;
use crate::resources::worldtime::WorldTime;
use crate::systems::effects::{burn_system, slow_expiry_system};
use crate::systems::enemies::move_enemies;
use crate::systems::field::{field_is_active, setup_shrine};
use crate::systems::targeting::tower_targeting_system;
use crate::systems::time::update_world_time;
use crate::systems::waves::spawn_wave_system;

/// Layout used when no scenario file is given.
pub const DEFAULT_SCENARIO: &str = r#"{
  "towers": [
    {
      "position": [20, 0, 0],
      "targeters": [{ "range": 10.0, "attack_speed": 400, "selection": "first" }],
      "effectors": [{ "type": "damage", "damage": 2 }]
    },
    {
      "position": [-10, 0, 17],
      "targeters": [{ "range": 9.0, "attack_speed": 250, "selection": "weak" }],
      "effectors": [{ "type": "ice", "slow": 0.5 }, { "type": "damage", "damage": 1 }]
    },
    {
      "position": [-10, 0, -17],
      "multiplier": 1.5,
      "targeters": [{ "range": 7.0, "attack_speed": 1000, "kind": "multi" }],
      "effectors": [{ "type": "fire", "damage": 2, "fire_duration": 3000 }]
    }
  ]
}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub towers: Vec<TowerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    /// Block the tower stands on; blocks stack upwards from here.
    pub position: [i32; 3],
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
    pub targeters: Vec<TargeterSpec>,
    pub effectors: Vec<EffectorSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargeterSpec {
    pub range: f32,
    /// Milliseconds between shots.
    pub attack_speed: u64,
    #[serde(default)]
    pub selection: SelectionMethod,
    #[serde(default)]
    pub kind: TargetKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectorSpec {
    Damage { damage: i32 },
    Ice { slow: f32 },
    Fire { damage: i32, fire_duration: u64 },
}

fn default_multiplier() -> f32 {
    1.0
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, DefenceError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefenceError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Spawn a tower and its blocks, registering every block position.
///
/// Targeters are stacked first, effectors on top of them.
pub fn spawn_tower(world: &mut World, spec: &TowerSpec) -> Entity {
    let base = IVec3::from_array(spec.position);
    let tower = world.spawn(Tower::with_multiplier(spec.multiplier)).id();
    let mut height = 0;
    let mut next_block = |world: &mut World| {
        let pos = base + IVec3::new(0, height, 0);
        height += 1;
        let block = world.spawn((TowerBlock { tower }, Location::of_block(pos))).id();
        world.resource_mut::<BlockEntities>().insert(pos, block);
        block
    };

    let mut targeters = Vec::with_capacity(spec.targeters.len());
    for t in &spec.targeters {
        let block = next_block(world);
        let targeter = match t.kind {
            TargetKind::Single => Targeter::single(t.range, t.attack_speed, t.selection),
            TargetKind::Multi => Targeter::multi(t.range, t.attack_speed),
        };
        world.entity_mut(block).insert(targeter);
        targeters.push(block);
    }

    let mut effectors = Vec::with_capacity(spec.effectors.len());
    for e in &spec.effectors {
        let block = next_block(world);
        let mut entity = world.entity_mut(block);
        match *e {
            EffectorSpec::Damage { damage } => entity.insert(DamageEffector { damage }),
            EffectorSpec::Ice { slow } => entity.insert(IceEffector { slow }),
            EffectorSpec::Fire {
                damage,
                fire_duration,
            } => entity.insert(FireEffector {
                damage,
                fire_duration,
            }),
        };
        effectors.push(block);
    }

    if let Some(mut component) = world.get_mut::<Tower>(tower) {
        component.targeters.extend(targeters);
        component.effectors.extend(effectors);
    }
    tower
}

/// World with every resource and observer the module needs, and the shrine
/// already placed.
pub fn build_world(config: &DefenceConfig) -> Result<World, DefenceError> {
    config.validate()?;
    let field = config.build_field()?;
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(config.clone());
    world.insert_resource(field);
    world.insert_resource(BlockEntities::default());
    world.insert_resource(TargetRng::with_seed(config.seed));
    world.insert_resource(WaveState::default());
    register_observers(&mut world);

    let mut setup = Schedule::default();
    setup.add_systems(setup_shrine);
    setup.run(&mut world);

    info!("Defence world ready (seed {})", config.seed);
    Ok(world)
}

/// Per-tick gameplay systems, in order.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            spawn_wave_system.run_if(field_is_active),
            move_enemies,
            tower_targeting_system,
            burn_system,
            slow_expiry_system,
        )
            .chain(),
    );
    schedule
}

/// Advance the clock by `dt` seconds and run one tick.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_parses() {
        let scenario = Scenario::from_json(DEFAULT_SCENARIO).unwrap();
        assert_eq!(scenario.towers.len(), 3);
        assert_eq!(scenario.towers[0].multiplier, 1.0);
        assert_eq!(scenario.towers[1].targeters[0].selection, SelectionMethod::Weak);
        assert_eq!(scenario.towers[2].targeters[0].kind, TargetKind::Multi);
        assert_eq!(
            scenario.towers[2].effectors[0],
            EffectorSpec::Fire {
                damage: 2,
                fire_duration: 3000
            }
        );
    }

    #[test]
    fn bad_scenario_is_an_error() {
        assert!(matches!(
            Scenario::from_json("{\"towers\": 3}"),
            Err(DefenceError::Scenario(_))
        ));
    }
}
