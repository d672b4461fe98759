//! Hit points for anything that can be damaged.
//!
//! Damage arrives through
//! [`DamageEntityEvent`](crate::events::health::DamageEntityEvent); the
//! component itself only stores the numbers.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub health: i32,
    pub max_health: i32,
}

impl Health {
    pub fn new(max_health: i32) -> Self {
        Health {
            health: max_health,
            max_health,
        }
    }

    /// Subtract `amount` (never below zero) and return whether the entity died.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}
