//! Core domain: frame scheduling, timers, and the collaborator boundary.

mod bridge;
mod events;
mod resources;
mod state;
mod systems;
mod timers;

#[cfg(test)]
mod tests;

pub use bridge::{
    Checkpoint, ClipLibrary, NotifyUi, PlayAnimation, PlaySound, ProjectileKind,
    SpawnProjectile, UiEvent,
};
pub use events::PlayerDiedEvent;
pub use resources::{GameplayPaused, RunConfig, SimRng, gameplay_active};
pub use state::{GameState, SimSet};
pub use timers::{ComboCounter, ComboOutcome, Cooldown, Task, TaskSlot};

use bevy::prelude::*;

use crate::core::bridge::trace_presentation_requests;
use crate::core::systems::{finish_boot, seed_simulation, setup_camera, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<RunConfig>()
            .init_resource::<SimRng>()
            .init_resource::<Checkpoint>()
            .init_resource::<ClipLibrary>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<PlayAnimation>()
            .add_message::<PlaySound>()
            .add_message::<SpawnProjectile>()
            .add_message::<NotifyUi>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Sense,
                    SimSet::Decide,
                    SimSet::Act,
                    SimSet::Resolve,
                    SimSet::Apply,
                    SimSet::Present,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(gameplay_active),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(OnExit(GameState::Boot), seed_simulation)
            .add_systems(Update, toggle_pause)
            .add_systems(Update, trace_presentation_requests.in_set(SimSet::Present));
    }
}
