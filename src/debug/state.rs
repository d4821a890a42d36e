//! Debug domain: state and action definitions for debug tooling.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether debug UI is visible
    pub ui_visible: bool,
    /// Whether the player's hurtbox is held closed
    pub invincible: bool,
    /// Whether to show debug info overlay (position, health, etc.)
    pub show_info: bool,
    pub show_hitboxes: bool,
    /// Ground, wall and step rays around the player
    pub show_probes: bool,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }

    pub fn message(&self) -> &str {
        self.status_message
            .as_ref()
            .map(|(text, _)| text.as_str())
            .unwrap_or("")
    }
}

/// Actions that can be triggered from debug UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    ToggleInvincible,
    FullHeal,
    ToggleHitboxes,
    ToggleProbes,
    WarpToCheckpoint,
    WarpToTeleportBoss,
    WarpToArenaBoss,
    UnlockAbilities,
    KillAllEnemies,
    ToggleInfo,
    Close,
}

impl DebugAction {
    /// Action bound to Ctrl + `key`.
    pub fn from_hotkey(key: KeyCode) -> Option<Self> {
        let action = match key {
            KeyCode::KeyI => DebugAction::ToggleInvincible,
            KeyCode::KeyH => DebugAction::FullHeal,
            KeyCode::KeyG => DebugAction::ToggleHitboxes,
            KeyCode::KeyP => DebugAction::ToggleProbes,
            KeyCode::Digit1 => DebugAction::WarpToCheckpoint,
            KeyCode::Digit2 => DebugAction::WarpToTeleportBoss,
            KeyCode::Digit3 => DebugAction::WarpToArenaBoss,
            KeyCode::KeyU => DebugAction::UnlockAbilities,
            KeyCode::KeyK => DebugAction::KillAllEnemies,
            KeyCode::KeyD => DebugAction::ToggleInfo,
            _ => return None,
        };
        Some(action)
    }

    pub const HOTKEYS: [KeyCode; 10] = [
        KeyCode::KeyI,
        KeyCode::KeyH,
        KeyCode::KeyG,
        KeyCode::KeyP,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::KeyU,
        KeyCode::KeyK,
        KeyCode::KeyD,
    ];
}

/// A debug action requested from a hotkey or a panel button.
#[derive(Debug, Clone, Copy)]
pub struct DebugCommand(pub DebugAction);

impl Message for DebugCommand {}
