//! Debug domain: hotkey mapping and debug action tests.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::{DebugAction, DebugCommand, DebugState};
use crate::combat::{DamageEvent, Enemy, Health};
use crate::core::{Checkpoint, NotifyUi};
use crate::debug::systems::apply_debug_commands;
use crate::debug::ui::button_label;
use crate::player::{GhostBomb, Player, PlayerController, PlayerTuning, Shield};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[test]
fn test_every_hotkey_maps_to_an_action() {
    for key in DebugAction::HOTKEYS {
        assert!(DebugAction::from_hotkey(key).is_some(), "{:?}", key);
    }
    assert_eq!(DebugAction::from_hotkey(KeyCode::KeyZ), None);
    assert_eq!(
        DebugAction::from_hotkey(KeyCode::Digit1),
        Some(DebugAction::WarpToCheckpoint)
    );
}

#[test]
fn test_status_message_fades() {
    let mut state = DebugState::default();
    state.set_message("Full Heal", 1.0);
    state.tick_message(0.6);
    assert_eq!(state.message(), "Full Heal");
    state.tick_message(0.6);
    assert_eq!(state.message(), "");
    assert!(state.status_message.is_none());
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Resource, Default)]
struct Strikes(usize);

fn count_strikes(mut damage: MessageReader<DamageEvent>, mut strikes: ResMut<Strikes>) {
    strikes.0 += damage.read().count();
}

fn debug_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<DebugState>()
        .init_resource::<Strikes>()
        .insert_resource(Checkpoint::new(Vec2::new(-20.0, 1.5)))
        .add_message::<DebugCommand>()
        .add_message::<DamageEvent>()
        .add_message::<NotifyUi>()
        .add_systems(Update, (apply_debug_commands, count_strikes).chain());

    let tuning = PlayerTuning::default();
    let mut health = Health::new(tuning.max_health);
    health.current = 2;
    let player = app
        .world_mut()
        .spawn((
            Player,
            PlayerController::new(&tuning),
            GhostBomb::new(tuning.ghost_cooldown),
            Shield::new(tuning.shield_charges, tuning.shield_cooldown, tuning.shield_visible),
            health,
            Transform::from_xyz(40.0, 6.0, 0.0),
            LinearVelocity(Vec2::new(3.0, -2.0)),
        ))
        .id();
    (app, player)
}

fn request(app: &mut App, action: DebugAction) {
    app.world_mut().write_message(DebugCommand(action));
    app.update();
}

#[test]
fn test_full_heal_and_warp_to_checkpoint() {
    let (mut app, player) = debug_app();

    request(&mut app, DebugAction::FullHeal);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 5);

    request(&mut app, DebugAction::WarpToCheckpoint);
    let transform = app.world().get::<Transform>(player).unwrap();
    assert_eq!(transform.translation.truncate(), Vec2::new(-20.0, 1.5));
    assert_eq!(app.world().get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
}

#[test]
fn test_unlock_abilities() {
    let (mut app, player) = debug_app();
    request(&mut app, DebugAction::UnlockAbilities);

    let world = app.world();
    assert!(world.get::<PlayerController>(player).unwrap().has_weapon);
    assert!(world.get::<GhostBomb>(player).unwrap().unlocked);
    assert_eq!(world.get::<Shield>(player).unwrap().charges, 3);
}

#[test]
fn test_kill_all_strikes_every_slime() {
    let (mut app, _) = debug_app();
    app.world_mut().spawn(Enemy);
    app.world_mut().spawn(Enemy);

    request(&mut app, DebugAction::KillAllEnemies);
    assert_eq!(app.world().resource::<Strikes>().0, 2);
}

#[test]
fn test_toggles_flip_overlays() {
    let (mut app, _) = debug_app();
    request(&mut app, DebugAction::ToggleHitboxes);
    request(&mut app, DebugAction::ToggleProbes);
    request(&mut app, DebugAction::ToggleInvincible);

    let state = app.world().resource::<DebugState>();
    assert!(state.show_hitboxes);
    assert!(state.show_probes);
    assert!(state.invincible);
}

#[test]
fn test_toggle_labels_follow_state() {
    let mut state = DebugState::default();
    assert_eq!(
        button_label(DebugAction::ToggleProbes, &state),
        "Probes off [Ctrl+P]"
    );
    state.show_probes = true;
    assert_eq!(
        button_label(DebugAction::ToggleProbes, &state),
        "Probes on [Ctrl+P]"
    );
}
