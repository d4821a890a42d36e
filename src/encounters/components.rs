//! Encounters domain: boss arena triggers and the rewards they hold.

use bevy::prelude::*;

use crate::player::PickupKind;

/// Zone that starts a boss fight the first time the player walks in.
#[derive(Component, Debug)]
pub struct BossArenaTrigger {
    pub boss: Entity,
    pub name: String,
    fired: bool,
}

impl BossArenaTrigger {
    pub fn new(boss: Entity, name: impl Into<String>) -> Self {
        Self {
            boss,
            name: name.into(),
            fired: false,
        }
    }

    /// True exactly once.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Dropped once the trigger's boss is defeated.
#[derive(Component, Debug, Clone, Copy)]
pub struct BossReward {
    pub kind: PickupKind,
    pub drop_at: Vec2,
}
