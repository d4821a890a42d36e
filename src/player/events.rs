//! Player domain: requests addressed to the player.

use bevy::ecs::message::Message;

/// Kill the player outright, whatever their health. Written by kill zones and
/// by a failed escort.
#[derive(Debug, Clone, Copy)]
pub struct KillPlayer {
    pub reason: &'static str,
}

impl Message for KillPlayer {}
