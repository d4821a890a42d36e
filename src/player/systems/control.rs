//! Player domain: state machine tick and applying its output to the body.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{Health, Hitbox, Hurtbox};
use crate::core::{Checkpoint, NotifyUi, PlayAnimation, UiEvent};
use crate::player::{
    ControlOutput, Player, PlayerController, PlayerInput, PlayerSenses, PlayerState, PlayerTuning,
    WeaponVisual, swing_offset,
};

/// The controller's output for this frame, applied in the act phase.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerIntent(pub ControlOutput);

pub(crate) fn think_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<PlayerTuning>,
    mut animations: MessageWriter<PlayAnimation>,
    mut query: Query<
        (
            Entity,
            &mut PlayerController,
            &PlayerSenses,
            &LinearVelocity,
            &mut PlayerIntent,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (entity, mut controller, senses, velocity, mut intent) in &mut query {
        let before = controller.state;
        intent.0 = controller.tick(dt, &input, senses, velocity.y, &tuning);
        if controller.state != before {
            debug!("Player {:?} -> {:?}", before, controller.state);
            animations.write(PlayAnimation {
                actor: entity,
                clip: controller.state.clip(),
            });
        }
    }
}

pub(crate) fn move_player(
    checkpoint: Res<Checkpoint>,
    tuning: Res<PlayerTuning>,
    mut ui: MessageWriter<NotifyUi>,
    mut query: Query<
        (
            Entity,
            &PlayerIntent,
            &mut PlayerController,
            &mut Health,
            &mut Hurtbox,
            &mut Hitbox,
            &mut Transform,
            &mut LinearVelocity,
            &mut RigidBody,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    for (
        entity,
        intent,
        mut controller,
        mut health,
        mut hurtbox,
        mut swing,
        mut transform,
        mut velocity,
        mut body,
        mut sprite,
    ) in &mut query
    {
        let out = intent.0;

        if out.respawn {
            let target = checkpoint.last_position();
            controller.respawn(&mut health);
            transform.translation.x = target.x;
            transform.translation.y = target.y;
            velocity.0 = Vec2::ZERO;
            *body = RigidBody::Dynamic;
            hurtbox.enabled = true;
            info!("Player respawned at {:?}", target);
            ui.write(NotifyUi(UiEvent::HealthChanged {
                actor: entity,
                current: health.current,
                max: health.max,
            }));
            continue;
        }
        if controller.is_dead() {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        if let Some(vx) = out.velocity_x {
            velocity.x = vx;
        }
        if let Some(vy) = out.velocity_y {
            velocity.y = vy;
        }
        if out.step_up {
            transform.translation.y += tuning.step_height;
            trace!("Player stepped up to {}", transform.translation.y);
        }
        sprite.flip_x = controller.facing < 0.0;

        swing.offset = swing_offset(controller.facing, tuning.swing_reach);
        if out.swing {
            swing.activate();
        } else if out.swing_ended {
            swing.deactivate();
        }
    }
}

/// The carried weapon is hidden while a swing is in progress.
pub(crate) fn update_weapon_visual(
    players: Query<(&PlayerController, &Transform), (With<Player>, Without<WeaponVisual>)>,
    mut weapons: Query<(&WeaponVisual, &mut Transform, &mut Visibility)>,
    tuning: Res<PlayerTuning>,
) {
    for (weapon, mut transform, mut visibility) in &mut weapons {
        let Ok((controller, player_transform)) = players.get(weapon.owner) else {
            continue;
        };
        let shown = controller.has_weapon
            && !controller.is_attacking()
            && controller.state != PlayerState::Dead;
        *visibility = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        let follow = swing_offset(controller.facing, tuning.half_width);
        transform.translation.x = player_transform.translation.x + follow.x;
        transform.translation.y = player_transform.translation.y;
    }
}
