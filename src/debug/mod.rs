//! Debug tooling for playtesting the arena. Only built with `dev-tools`.
//!
//! Features:
//! - Toggle invincibility and full heal
//! - Warp to the checkpoint or either boss
//! - Unlock every ability
//! - Hitbox and sensing probe gizmos

mod gizmos;
mod state;
mod systems;
#[cfg(test)]
mod tests;
mod ui;

pub use state::{DebugAction, DebugCommand, DebugState};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::debug::gizmos::{draw_hitboxes, draw_probes};
use crate::debug::systems::{
    apply_debug_commands, apply_invincibility, handle_debug_buttons, handle_debug_hotkeys,
    toggle_debug_ui, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_message::<DebugCommand>()
            .add_systems(
                Update,
                (
                    toggle_debug_ui,
                    handle_debug_hotkeys,
                    handle_debug_buttons,
                    apply_debug_commands,
                    update_status_message,
                )
                    .chain()
                    .before(SimSet::Input),
            )
            .add_systems(Update, apply_invincibility.in_set(SimSet::Sense))
            .add_systems(
                Update,
                (
                    update_debug_info_overlay.run_if(|state: Res<DebugState>| state.show_info),
                    draw_hitboxes.run_if(|state: Res<DebugState>| state.show_hitboxes),
                    draw_probes.run_if(|state: Res<DebugState>| state.show_probes),
                )
                    .after(SimSet::Present),
            );
    }
}
