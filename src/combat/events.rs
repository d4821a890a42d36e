//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::HitKind;

/// A screened hit, addressed to the target's own intake system.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub kind: HitKind,
    /// Where the hit came from, for knockback direction.
    pub origin: Vec2,
}

impl Message for DamageEvent {}

/// A non-player actor's health reached zero.
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

#[derive(Debug)]
pub struct BossDefeatedEvent {
    pub boss: Entity,
    pub name: String,
}

impl Message for BossDefeatedEvent {}

/// A boss fight begins. Written by arena triggers.
#[derive(Debug, Clone, Copy)]
pub struct BossActivated {
    pub boss: Entity,
}

impl Message for BossActivated {}
