//! Defence configuration resource.
//!
//! Tunables for the field, world generation and enemy waves, loaded from an
//! INI file. Every key is optional: anything missing keeps its default, so a
//! host can ship an empty file and override only what it needs.
//!
//! # Configuration File Format
//!
//! ```ini
//! [field]
//! outer_ring = 60
//! shrine_ring = 5
//! entrance_ring = 4
//! entrances = 3
//!
//! [world]
//! seed = 0
//! fill_threshold = 0.3
//!
//! [waves]
//! spawn_interval = 2.0
//! enemy_health = 10
//! enemy_speed = 2.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::DefenceError;
use crate::resources::defencefield::{
    DEFAULT_ENTRANCE_COUNT, DEFAULT_ENTRANCE_RING, DEFAULT_OUTER_RING, DEFAULT_SHRINE_RING,
    DefenceField,
};

const DEFAULT_SEED: u64 = 0;
const DEFAULT_FILL_THRESHOLD: f64 = 0.3;
const DEFAULT_SPAWN_INTERVAL: f32 = 2.0;
const DEFAULT_ENEMY_HEALTH: i32 = 10;
const DEFAULT_ENEMY_SPEED: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./defence.ini";

/// Shortest allowed time between enemy spawns, in seconds.
pub const MIN_SPAWN_INTERVAL: f32 = 0.05;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DefenceConfig {
    /// Dome radius in blocks.
    pub outer_ring: i32,
    /// Clear zone radius around the shrine.
    pub shrine_ring: i32,
    /// Clear zone radius around each entrance.
    pub entrance_ring: i32,
    pub entrances: usize,
    /// World generation seed.
    pub seed: u64,
    /// Fraction of eligible columns that receive a filling block.
    pub fill_threshold: f64,
    /// Seconds between enemy spawns while the field is active.
    pub spawn_interval: f32,
    pub enemy_health: i32,
    /// Blocks per second.
    pub enemy_speed: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for DefenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DefenceConfig {
    pub fn new() -> Self {
        Self {
            outer_ring: DEFAULT_OUTER_RING,
            shrine_ring: DEFAULT_SHRINE_RING,
            entrance_ring: DEFAULT_ENTRANCE_RING,
            entrances: DEFAULT_ENTRANCE_COUNT,
            seed: DEFAULT_SEED,
            fill_threshold: DEFAULT_FILL_THRESHOLD,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            enemy_health: DEFAULT_ENEMY_HEALTH,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), DefenceError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| self.config_error(reason))?;
        self.apply(&config)?;

        info!(
            "Loaded defence config: outer={}, shrine={}, entrance={}x{}, seed={}, fill={}",
            self.outer_ring,
            self.shrine_ring,
            self.entrance_ring,
            self.entrances,
            self.seed,
            self.fill_threshold
        );
        Ok(())
    }

    /// Load values from INI text instead of a file.
    ///
    /// Values read before an invalid one are kept.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), DefenceError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|reason| self.config_error(reason))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), DefenceError> {
        // [field] section
        if let Some(v) = config.getint("field", "outer_ring").ok().flatten() {
            self.outer_ring = self.checked("outer_ring", v)?;
        }
        if let Some(v) = config.getint("field", "shrine_ring").ok().flatten() {
            self.shrine_ring = self.checked("shrine_ring", v)?;
        }
        if let Some(v) = config.getint("field", "entrance_ring").ok().flatten() {
            self.entrance_ring = self.checked("entrance_ring", v)?;
        }
        if let Some(v) = config.getuint("field", "entrances").ok().flatten() {
            self.entrances = self.checked("entrances", v)?;
        }

        // [world] section
        if let Some(v) = config.getuint("world", "seed").ok().flatten() {
            self.seed = v;
        }
        if let Some(v) = config.getfloat("world", "fill_threshold").ok().flatten() {
            self.fill_threshold = v;
        }

        // [waves] section
        if let Some(v) = config.getfloat("waves", "spawn_interval").ok().flatten() {
            self.spawn_interval = v as f32;
        }
        if let Some(v) = config.getint("waves", "enemy_health").ok().flatten() {
            self.enemy_health = self.checked("enemy_health", v)?;
        }
        if let Some(v) = config.getfloat("waves", "enemy_speed").ok().flatten() {
            self.enemy_speed = v as f32;
        }
        self.validate()
    }

    /// Reject values the game can't run with.
    pub fn validate(&self) -> Result<(), DefenceError> {
        if self.spawn_interval.is_nan() || self.spawn_interval < MIN_SPAWN_INTERVAL {
            return Err(self.config_error(format!(
                "spawn_interval = {} is below the minimum of {}",
                self.spawn_interval, MIN_SPAWN_INTERVAL
            )));
        }
        if self.enemy_speed.is_nan() || self.enemy_speed < 0.0 {
            return Err(self.config_error(format!(
                "enemy_speed = {} must not be negative",
                self.enemy_speed
            )));
        }
        if self.enemy_health <= 0 {
            return Err(self.config_error(format!(
                "enemy_health = {} must be positive",
                self.enemy_health
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_threshold) {
            return Err(self.config_error(format!(
                "fill_threshold = {} must be between 0 and 1",
                self.fill_threshold
            )));
        }
        Ok(())
    }

    fn checked<V, T>(&self, key: &str, value: V) -> Result<T, DefenceError>
    where
        V: Copy + std::fmt::Display,
        T: TryFrom<V>,
    {
        T::try_from(value)
            .map_err(|_| self.config_error(format!("{key} = {value} is out of range")))
    }

    /// Save the current values to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), DefenceError> {
        let mut config = Ini::new();

        config.set("field", "outer_ring", Some(self.outer_ring.to_string()));
        config.set("field", "shrine_ring", Some(self.shrine_ring.to_string()));
        config.set("field", "entrance_ring", Some(self.entrance_ring.to_string()));
        config.set("field", "entrances", Some(self.entrances.to_string()));

        config.set("world", "seed", Some(self.seed.to_string()));
        config.set("world", "fill_threshold", Some(self.fill_threshold.to_string()));

        config.set("waves", "spawn_interval", Some(self.spawn_interval.to_string()));
        config.set("waves", "enemy_health", Some(self.enemy_health.to_string()));
        config.set("waves", "enemy_speed", Some(self.enemy_speed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| self.config_error(e.to_string()))?;

        info!("Saved defence config to {:?}", self.config_path);
        Ok(())
    }

    /// Build the field geometry described by this configuration.
    pub fn build_field(&self) -> Result<DefenceField, DefenceError> {
        DefenceField::with_geometry(
            self.outer_ring,
            self.shrine_ring,
            self.entrance_ring,
            self.entrances,
        )
    }

    fn config_error(&self, reason: String) -> DefenceError {
        DefenceError::Config {
            path: self.config_path.display().to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let mut config = DefenceConfig::new();
        config
            .load_from_str("[field]\nouter_ring = 40\n[waves]\nenemy_speed = 3.5\n")
            .unwrap();
        assert_eq!(config.outer_ring, 40);
        assert_eq!(config.shrine_ring, DEFAULT_SHRINE_RING);
        assert_eq!(config.entrances, DEFAULT_ENTRANCE_COUNT);
        assert!((config.enemy_speed - 3.5).abs() < f32::EPSILON);
        assert!((config.fill_threshold - DEFAULT_FILL_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let mut config = DefenceConfig::with_path("./does/not/exist.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(matches!(err, DefenceError::Config { .. }));
        assert_eq!(config.outer_ring, DEFAULT_OUTER_RING);
    }

    #[test]
    fn build_field_validates_geometry() {
        let mut config = DefenceConfig::new();
        config.shrine_ring = 80;
        assert!(config.build_field().is_err());
        config.shrine_ring = 5;
        let field = config.build_field().unwrap();
        assert_eq!(field.entrance_count(), 3);
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let mut config = DefenceConfig::new();
        let err = config
            .load_from_str("[waves]\nspawn_interval = 0\n")
            .unwrap_err();
        assert!(matches!(err, DefenceError::Config { .. }));

        let mut config = DefenceConfig::new();
        assert!(config.load_from_str("[waves]\nspawn_interval = -1.5\n").is_err());

        let mut config = DefenceConfig::new();
        config.spawn_interval = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let mut config = DefenceConfig::new();
        let err = config
            .load_from_str("[field]\nouter_ring = 4294967356\n")
            .unwrap_err();
        assert!(matches!(err, DefenceError::Config { .. }));

        let mut config = DefenceConfig::new();
        assert!(config.load_from_str("[waves]\nenemy_health = -3\n").is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let path = std::env::temp_dir().join(format!(
            "gooeydefence-config-{}.ini",
            std::process::id()
        ));
        let mut saved = DefenceConfig::with_path(&path);
        saved.outer_ring = 42;
        saved.entrances = 5;
        saved.seed = 1234;
        saved.fill_threshold = 0.125;
        saved.spawn_interval = 1.5;
        saved.enemy_health = 17;
        saved.enemy_speed = 0.75;
        saved.save_to_file().unwrap();

        let mut loaded = DefenceConfig::with_path(&path);
        let result = loaded.load_from_file();
        let _ = std::fs::remove_file(&path);
        result.unwrap();
        assert_eq!(loaded, saved);
    }
}
