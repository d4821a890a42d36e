//! Player domain: input sampling.

use bevy::prelude::*;

use crate::player::PlayerInput;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<PlayerInput>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.axis = x;
    input.jump = keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.attack = mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::KeyJ);
    input.interact = keyboard.just_pressed(KeyCode::KeyH) || keyboard.just_pressed(KeyCode::KeyF);
    input.ability = keyboard.just_pressed(KeyCode::KeyE);
}
