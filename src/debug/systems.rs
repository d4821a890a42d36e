//! Debug domain: hotkeys, panel buttons and the actions they request.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{ArenaBoss, DamageEvent, Enemy, Health, HitKind, Hurtbox, TeleportBoss};
use crate::core::{Checkpoint, NotifyUi, RunConfig, UiEvent};
use crate::debug::state::{DebugAction, DebugCommand, DebugState};
use crate::debug::ui::{
    DebugButton, DebugInfoOverlay, DebugStatusMessage, DebugUI, refresh_debug_ui,
    spawn_debug_info_overlay,
};
use crate::player::{GhostBomb, Player, PlayerController, Shield};

/// Warps land this far left of a boss.
const WARP_LEAD: f32 = 8.0;

/// F1 or backtick opens and closes the panel.
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    if keyboard.any_just_pressed([KeyCode::F1, KeyCode::Backquote]) {
        debug_state.ui_visible = !debug_state.ui_visible;
        refresh_debug_ui(&mut commands, &debug_state, &existing_ui);
    }
}

/// Ctrl+Key shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<DebugCommand>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    for key in DebugAction::HOTKEYS {
        if keyboard.just_pressed(key)
            && let Some(action) = DebugAction::from_hotkey(key)
        {
            requests.write(DebugCommand(action));
        }
    }
}

pub(crate) fn handle_debug_buttons(
    button_query: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    mut requests: MessageWriter<DebugCommand>,
) {
    for (button, interaction) in &button_query {
        if *interaction == Interaction::Pressed {
            requests.write(DebugCommand(button.action));
        }
    }
}

pub(crate) fn apply_debug_commands(
    mut commands: Commands,
    mut requests: MessageReader<DebugCommand>,
    mut debug_state: ResMut<DebugState>,
    checkpoint: Res<Checkpoint>,
    mut damage: MessageWriter<DamageEvent>,
    mut ui: MessageWriter<NotifyUi>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut LinearVelocity,
            &mut Health,
            &mut PlayerController,
            &mut GhostBomb,
            &mut Shield,
        ),
        With<Player>,
    >,
    teleport_bosses: Query<&Transform, (With<TeleportBoss>, Without<Player>)>,
    arena_bosses: Query<&Transform, (With<ArenaBoss>, Without<Player>)>,
    slimes: Query<Entity, (With<Enemy>, Without<TeleportBoss>, Without<ArenaBoss>)>,
    existing_ui: Query<Entity, With<DebugUI>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    for DebugCommand(action) in requests.read() {
        let player = players.iter_mut().next();
        info!("[DEBUG] {:?}", action);

        match action {
            DebugAction::ToggleInvincible => {
                debug_state.invincible = !debug_state.invincible;
                let msg = if debug_state.invincible {
                    "Hurtbox held shut"
                } else {
                    "Hurtbox released"
                };
                debug_state.set_message(msg, 2.0);
            }
            DebugAction::FullHeal => {
                if let Some((entity, _, _, mut health, controller, _, _)) = player
                    && !controller.is_dead()
                {
                    health.reset_to_max();
                    ui.write(NotifyUi(UiEvent::HealthChanged {
                        actor: entity,
                        current: health.current,
                        max: health.max,
                    }));
                    debug_state.set_message("Full Heal", 2.0);
                }
            }
            DebugAction::ToggleHitboxes => {
                debug_state.show_hitboxes = !debug_state.show_hitboxes;
            }
            DebugAction::ToggleProbes => {
                debug_state.show_probes = !debug_state.show_probes;
            }
            DebugAction::WarpToCheckpoint
            | DebugAction::WarpToTeleportBoss
            | DebugAction::WarpToArenaBoss => {
                let target = match action {
                    DebugAction::WarpToTeleportBoss => teleport_bosses
                        .iter()
                        .next()
                        .map(|t| t.translation.truncate() - Vec2::new(WARP_LEAD, 0.0)),
                    DebugAction::WarpToArenaBoss => arena_bosses
                        .iter()
                        .next()
                        .map(|t| t.translation.truncate() - Vec2::new(WARP_LEAD, 0.0)),
                    _ => Some(checkpoint.last_position()),
                };
                match (target, player) {
                    (Some(target), Some((_, mut transform, mut velocity, ..))) => {
                        transform.translation.x = target.x;
                        transform.translation.y = target.y;
                        velocity.0 = Vec2::ZERO;
                        debug_state.set_message(
                            format!("Warped to {:.0}, {:.0}", target.x, target.y),
                            2.0,
                        );
                    }
                    (None, _) => debug_state.set_message("Nothing to warp to", 2.0),
                    _ => {}
                }
            }
            DebugAction::UnlockAbilities => {
                if let Some((_, _, _, _, mut controller, mut ghost, mut shield)) = player {
                    controller.has_weapon = true;
                    ghost.unlocked = true;
                    shield.activate();
                    ui.write(NotifyUi(UiEvent::ShieldChanged {
                        charges: shield.charges,
                    }));
                    debug_state.set_message("Spear, ghost bomb and shield unlocked", 2.0);
                }
            }
            DebugAction::KillAllEnemies => {
                let Some((source, transform, ..)) = player else {
                    continue;
                };
                let origin = transform.translation.truncate();
                let mut count = 0;
                for target in &slimes {
                    damage.write(DamageEvent {
                        source,
                        target,
                        amount: u32::MAX,
                        kind: HitKind::Strike,
                        origin,
                    });
                    count += 1;
                }
                debug_state.set_message(format!("Killed {} slimes", count), 2.0);
            }
            DebugAction::ToggleInfo => {
                debug_state.show_info = !debug_state.show_info;
                if debug_state.show_info {
                    spawn_debug_info_overlay(&mut commands);
                } else {
                    for entity in &existing_overlay {
                        commands.entity(entity).despawn();
                    }
                }
            }
            DebugAction::Close => {
                debug_state.ui_visible = false;
            }
        }
        refresh_debug_ui(&mut commands, &debug_state, &existing_ui);
    }
}

pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut text_query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());
    for mut text in &mut text_query {
        if **text != debug_state.message() {
            **text = debug_state.message().to_string();
        }
    }
}

/// Hold the player's hurtbox closed while invincible. Kill zones still kill.
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut was_invincible: Local<bool>,
    mut player_query: Query<(&PlayerController, &mut Hurtbox), With<Player>>,
) {
    for (controller, mut hurtbox) in &mut player_query {
        if debug_state.invincible {
            hurtbox.enabled = false;
        } else if *was_invincible {
            hurtbox.enabled = !controller.is_dead();
        }
    }
    *was_invincible = debug_state.invincible;
}

pub(crate) fn update_debug_info_overlay(
    debug_state: Res<DebugState>,
    run_config: Res<RunConfig>,
    checkpoint: Res<Checkpoint>,
    player_query: Query<(&Transform, &Health, &PlayerController, &Shield), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    if let (Some((transform, health, controller, shield)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        let checkpoint = checkpoint.last_position();
        **text = format!(
            "Pos: ({:.1}, {:.1})\nState: {:?}\nHP: {}/{} ({:.0}%)\nShield: {}\nCombo: {}\nWeapon: {}\nCheckpoint: ({:.0}, {:.0})\nSeed: {}\nInvincible: {}",
            pos.x,
            pos.y,
            controller.state,
            health.current,
            health.max,
            health.fraction() * 100.0,
            shield.charges,
            controller.combo.count,
            controller.has_weapon,
            checkpoint.x,
            checkpoint.y,
            run_config.seed,
            debug_state.invincible
        );
    }
}
