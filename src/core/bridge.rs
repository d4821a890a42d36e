//! Core domain: the boundary with presentation collaborators.
//!
//! The simulation only writes these messages; animation, audio, UI and
//! projectile prefabs live on the other side. `Checkpoint` and `ClipLibrary`
//! are the two inbound queries it relies on.

use std::collections::HashMap;

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::Team;

#[derive(Debug, Clone)]
pub struct PlayAnimation {
    pub actor: Entity,
    pub clip: &'static str,
}

impl Message for PlayAnimation {}

#[derive(Debug, Clone)]
pub struct PlaySound {
    pub clip: &'static str,
}

impl Message for PlaySound {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ProjectileKind {
    /// Straight shot from a red slime.
    Pellet,
    /// Cactus spike, fired in volleys.
    Spike,
    /// Aimed shot from the teleporting boss.
    Bullet,
    /// Lobbed bomb that explodes on contact.
    Bomb,
    /// Arena boss missile: flies forward, then drops onto a locked column.
    Missile,
    /// Arena boss laser bolt.
    Laser,
    /// Player ability projectile that detonates on contact or timeout.
    Ghost,
}

/// Request for the projectile collaborator. The core forgets the projectile
/// once this is written.
#[derive(Debug, Clone)]
pub struct SpawnProjectile {
    pub kind: ProjectileKind,
    pub origin: Vec2,
    /// Direction of travel, or the point to drop onto for missiles.
    pub aim: Vec2,
    pub team: Team,
    pub source: Entity,
}

impl Message for SpawnProjectile {}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    HealthChanged {
        actor: Entity,
        current: u32,
        max: u32,
    },
    BossRevealed {
        name: String,
    },
    BossHealthShown {
        boss: Entity,
    },
    BossHealthHidden {
        boss: Entity,
    },
    EnemyKilled {
        actor: Entity,
    },
    ShieldChanged {
        charges: u32,
    },
    AbilityUnlocked {
        name: &'static str,
    },
    Objective {
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct NotifyUi(pub UiEvent);

impl Message for NotifyUi {}

/// Last saved respawn position. Updated by checkpoint zones.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Checkpoint {
    position: Vec2,
}

impl Checkpoint {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn last_position(&self) -> Vec2 {
        self.position
    }

    pub fn save(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Clip lengths read back for sequencing, keyed by clip name.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
pub struct ClipLibrary {
    #[serde(default)]
    pub clips: HashMap<String, f32>,
}

impl ClipLibrary {
    pub fn duration(&self, clip: &str) -> Option<f32> {
        self.clips.get(clip).copied()
    }

    /// Clip length, or `fallback` when the clip is unknown.
    pub fn duration_or(&self, clip: &str, fallback: f32) -> f32 {
        self.duration(clip).unwrap_or(fallback)
    }
}

pub(crate) fn trace_presentation_requests(
    mut animations: MessageReader<PlayAnimation>,
    mut sounds: MessageReader<PlaySound>,
    mut ui_events: MessageReader<NotifyUi>,
) {
    for request in animations.read() {
        trace!("anim {:?} -> {}", request.actor, request.clip);
    }
    for request in sounds.read() {
        trace!("sound {}", request.clip);
    }
    for NotifyUi(event) in ui_events.read() {
        debug!("ui: {:?}", event);
    }
}
