//! Player domain: damage intake, shield blocks and the start of the death sequence.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{DamageEvent, DamageFeedback, DamageOutcome, Health, Hitbox, Hurtbox};
use crate::core::{ClipLibrary, NotifyUi, PlayAnimation, PlaySound, PlayerDiedEvent, UiEvent};
use crate::player::{KillPlayer, Player, PlayerController, PlayerTuning, Shield, ShieldBlock};

const DEATH_CLIP: &str = "player_death";

/// Freeze the body and close both hit regions. The controller is already dead.
fn freeze_for_death(
    entity: Entity,
    body: &mut RigidBody,
    velocity: &mut LinearVelocity,
    hurtbox: &mut Hurtbox,
    swing: &mut Hitbox,
    died: &mut MessageWriter<PlayerDiedEvent>,
    animations: &mut MessageWriter<PlayAnimation>,
    sounds: &mut MessageWriter<PlaySound>,
) {
    *body = RigidBody::Kinematic;
    velocity.0 = Vec2::ZERO;
    hurtbox.enabled = false;
    swing.deactivate();
    animations.write(PlayAnimation {
        actor: entity,
        clip: DEATH_CLIP,
    });
    sounds.write(PlaySound {
        clip: "player_death",
    });
    died.write(PlayerDiedEvent { player: entity });
}

pub(crate) fn player_take_hits(
    clips: Res<ClipLibrary>,
    tuning: Res<PlayerTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut kill_requests: MessageReader<KillPlayer>,
    mut died: MessageWriter<PlayerDiedEvent>,
    mut animations: MessageWriter<PlayAnimation>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut PlayerController,
            &mut Health,
            &mut Shield,
            &mut Hurtbox,
            &mut Hitbox,
            &mut RigidBody,
            &mut LinearVelocity,
            Option<&mut DamageFeedback>,
        ),
        With<Player>,
    >,
) {
    let death_clip = clips.duration_or(DEATH_CLIP, tuning.death_fallback);

    for event in damage_events.read() {
        let Ok((
            entity,
            transform,
            mut controller,
            mut health,
            mut shield,
            mut hurtbox,
            mut swing,
            mut body,
            mut velocity,
            feedback,
        )) = players.get_mut(event.target)
        else {
            continue;
        };
        if controller.is_dead() {
            continue;
        }

        match shield.try_block() {
            ShieldBlock::Passed => {}
            block => {
                let clip = if block == ShieldBlock::Broke {
                    info!("Shield broke");
                    "shield_break"
                } else {
                    "shield_hit"
                };
                sounds.write(PlaySound { clip });
                ui.write(NotifyUi(UiEvent::ShieldChanged {
                    charges: shield.charges,
                }));
                continue;
            }
        }

        let outcome = controller.take_damage(&mut health, event.amount, death_clip);
        if outcome == DamageOutcome::Ignored {
            continue;
        }
        if let Some(mut feedback) = feedback {
            feedback.trigger(transform.translation.truncate(), event.origin);
        }
        ui.write(NotifyUi(UiEvent::HealthChanged {
            actor: entity,
            current: health.current,
            max: health.max,
        }));

        if outcome == DamageOutcome::Killed {
            info!("Player killed by {:?}", event.source);
            freeze_for_death(
                entity,
                &mut body,
                &mut velocity,
                &mut hurtbox,
                &mut swing,
                &mut died,
                &mut animations,
                &mut sounds,
            );
        } else {
            debug!("Player hit, {}/{}", health.current, health.max);
            sounds.write(PlaySound { clip: "player_hit" });
        }
    }

    for request in kill_requests.read() {
        for (
            entity,
            _,
            mut controller,
            mut health,
            _,
            mut hurtbox,
            mut swing,
            mut body,
            mut velocity,
            _,
        ) in &mut players
        {
            if !controller.force_kill(&mut health, death_clip) {
                continue;
            }
            info!("Player killed: {}", request.reason);
            ui.write(NotifyUi(UiEvent::HealthChanged {
                actor: entity,
                current: health.current,
                max: health.max,
            }));
            freeze_for_death(
                entity,
                &mut body,
                &mut velocity,
                &mut hurtbox,
                &mut swing,
                &mut died,
                &mut animations,
                &mut sounds,
            );
        }
    }
}
