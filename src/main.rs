mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod encounters;
mod level;
mod npc;
mod player;
mod spatial;

use avian2d::prelude::*;
use bevy::prelude::*;

/// Downward acceleration in world units per second squared.
const GRAVITY: f32 = 30.0;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Slimefall".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::NEG_Y * GRAVITY))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        player::PlayerPlugin,
        combat::CombatPlugin,
        npc::NpcPlugin,
        encounters::EncountersPlugin,
        level::LevelPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
