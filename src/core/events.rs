//! Core domain: broadcasts shared between actor domains.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired once per player death, after the death animation has started.
/// Boss controllers consume it before their next tick.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDiedEvent {
    pub player: Entity,
}

impl Message for PlayerDiedEvent {}
