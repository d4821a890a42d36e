//! NPC domain: escort control, damage intake and zones.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{DamageEvent, DamageOutcome, Health, Hurtbox};
use crate::core::{NotifyUi, PlayAnimation, PlaySound, UiEvent};
use crate::npc::{ClimbArea, Escort, EscortGoal, EscortState, EscortTuning};
use crate::player::{KillPlayer, Player, PlayerInput};

/// Interact starts the escort when the player is close, then toggles halt.
pub(crate) fn escort_interact(
    input: Res<PlayerInput>,
    tuning: Res<EscortTuning>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    players: Query<&Transform, With<Player>>,
    mut escorts: Query<(Entity, &Transform, &mut Escort, &mut Hurtbox), Without<Player>>,
) {
    if !input.interact {
        return;
    }
    let Some(player_pos) = players.iter().next().map(|t| t.translation.truncate()) else {
        return;
    };

    for (entity, transform, mut escort, mut hurtbox) in &mut escorts {
        if escort.state == EscortState::Waiting {
            let distance = transform.translation.truncate().distance(player_pos);
            if distance <= tuning.interact_radius && escort.start() {
                hurtbox.enabled = true;
                info!("Escort {:?} started", entity);
                ui.write(NotifyUi(UiEvent::Objective {
                    text: "Lead the escort to safety".to_string(),
                }));
            }
            continue;
        }

        if let Some(halted) = escort.toggle_halt() {
            debug!("Escort {:?} halted={}", entity, halted);
            sounds.write(PlaySound { clip: "halt_toggle" });
            animations.write(PlayAnimation {
                actor: entity,
                clip: if halted { "idle" } else { "walk" },
            });
        }
    }
}

pub(crate) fn move_escorts(
    time: Res<Time>,
    mut ui: MessageWriter<NotifyUi>,
    mut escorts: Query<(
        Entity,
        &mut Escort,
        &mut Transform,
        &mut LinearVelocity,
        &mut Health,
        &mut Hurtbox,
    )>,
) {
    let dt = time.delta_secs();
    for (entity, mut escort, mut transform, mut velocity, mut health, mut hurtbox) in &mut escorts {
        let out = escort.tick(dt);
        velocity.x = out.velocity_x;

        if out.respawned {
            transform.translation.x = escort.start.x;
            transform.translation.y = escort.start.y;
            velocity.0 = Vec2::ZERO;
            health.reset_to_max();
            hurtbox.enabled = true;
            info!("Escort {:?} back at {:?}", entity, escort.start);
            ui.write(NotifyUi(UiEvent::HealthChanged {
                actor: entity,
                current: health.current,
                max: health.max,
            }));
        }
    }
}

pub(crate) fn escort_take_hits(
    mut damage_events: MessageReader<DamageEvent>,
    mut kills: MessageWriter<KillPlayer>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    mut escorts: Query<(&mut Escort, &mut Health, &mut Hurtbox, &mut LinearVelocity)>,
) {
    for event in damage_events.read() {
        let Ok((mut escort, mut health, mut hurtbox, mut velocity)) =
            escorts.get_mut(event.target)
        else {
            continue;
        };

        let outcome = escort.take_damage(&mut health, event.amount);
        if outcome == DamageOutcome::Ignored {
            continue;
        }
        sounds.write(PlaySound { clip: "escort_hit" });
        ui.write(NotifyUi(UiEvent::HealthChanged {
            actor: event.target,
            current: health.current,
            max: health.max,
        }));

        if outcome == DamageOutcome::Killed {
            info!("Escort {:?} died, taking the player with it", event.target);
            hurtbox.enabled = false;
            velocity.0 = Vec2::ZERO;
            animations.write(PlayAnimation {
                actor: event.target,
                clip: "escort_death",
            });
            sounds.write(PlaySound {
                clip: "escort_death",
            });
            kills.write(KillPlayer {
                reason: "escort died",
            });
        }
    }
}

/// Goal and climb zones touched by an escort.
pub(crate) fn escort_zones(
    tuning: Res<EscortTuning>,
    mut collisions: MessageReader<CollisionStart>,
    mut ui: MessageWriter<NotifyUi>,
    goals: Query<&EscortGoal>,
    climbs: Query<(), With<ClimbArea>>,
    mut escorts: Query<(&mut Escort, &mut Transform, &mut Hurtbox)>,
) {
    for event in collisions.read() {
        for (escort_entity, zone) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok((mut escort, mut transform, mut hurtbox)) = escorts.get_mut(escort_entity)
            else {
                continue;
            };

            if let Ok(goal) = goals.get(zone) {
                if escort.is_escorting() && escort.reach_goal() {
                    hurtbox.enabled = false;
                    info!("Escort {:?} reached the goal", escort_entity);
                    ui.write(NotifyUi(UiEvent::Objective {
                        text: goal.objective.clone(),
                    }));
                }
            } else if climbs.contains(zone) && escort.state == EscortState::Walking {
                transform.translation.y += tuning.climb_height;
                trace!("Escort climbed to {}", transform.translation.y);
            }
        }
    }
}
