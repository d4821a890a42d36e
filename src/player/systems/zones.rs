//! Player domain: kill zones, checkpoints and pickups entered by the player.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{Checkpoint, NotifyUi, PlaySound, UiEvent};
use crate::player::{
    CheckpointZone, GhostBomb, KillPlayer, KillZone, KillZoneKind, Pickup, PickupKind, Player,
    PlayerController, Shield,
};

/// The player half of a collision pair, with the other entity.
pub(crate) fn player_pair(
    event: &CollisionStart,
    players: &Query<(), With<Player>>,
) -> Option<(Entity, Entity)> {
    if players.contains(event.collider1) {
        Some((event.collider1, event.collider2))
    } else if players.contains(event.collider2) {
        Some((event.collider2, event.collider1))
    } else {
        None
    }
}

pub(crate) fn handle_player_zones(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    mut checkpoint: ResMut<Checkpoint>,
    mut kills: MessageWriter<KillPlayer>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    player_marker: Query<(), With<Player>>,
    mut players: Query<
        (
            &mut PlayerController,
            &mut Transform,
            &mut LinearVelocity,
            &mut Shield,
            &mut GhostBomb,
        ),
        With<Player>,
    >,
    kill_zones: Query<&KillZone>,
    checkpoints: Query<&CheckpointZone>,
    pickups: Query<&Pickup>,
) {
    for event in collisions.read() {
        let Some((player, other)) = player_pair(event, &player_marker) else {
            continue;
        };
        let Ok((mut controller, mut transform, mut velocity, mut shield, mut ghost)) =
            players.get_mut(player)
        else {
            continue;
        };
        if controller.is_dead() {
            continue;
        }

        if let Ok(KillZone(kind)) = kill_zones.get(other) {
            match kind {
                KillZoneKind::Kill => {
                    kills.write(KillPlayer { reason: "kill zone" });
                }
                KillZoneKind::Teleport => {
                    let target = checkpoint.last_position();
                    transform.translation.x = target.x;
                    transform.translation.y = target.y;
                    velocity.0 = Vec2::ZERO;
                    info!("Player returned to checkpoint {:?}", target);
                }
            }
            continue;
        }

        if let Ok(zone) = checkpoints.get(other) {
            if zone.respawn != checkpoint.last_position() {
                checkpoint.save(zone.respawn);
                info!("Checkpoint saved at {:?}", zone.respawn);
            }
            continue;
        }

        if let Ok(pickup) = pickups.get(other) {
            sounds.write(PlaySound { clip: "pickup" });
            commands.entity(other).despawn();
            match pickup.0 {
                PickupKind::Spear => {
                    controller.has_weapon = true;
                    info!("Spear picked up");
                    ui.write(NotifyUi(UiEvent::AbilityUnlocked { name: "spear" }));
                }
                PickupKind::GhostBomb => {
                    ghost.unlocked = true;
                    info!("Ghost bomb unlocked");
                    ui.write(NotifyUi(UiEvent::AbilityUnlocked { name: "ghost_bomb" }));
                }
                PickupKind::ShieldBlessing => {
                    if shield.activate() {
                        info!("Shield raised with {} charges", shield.charges);
                        ui.write(NotifyUi(UiEvent::ShieldChanged {
                            charges: shield.charges,
                        }));
                    } else {
                        debug!("Shield still cooling down");
                    }
                }
            }
        }
    }
}
