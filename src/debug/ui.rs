//! Debug domain: the hotkey panel and the player info overlay.

use bevy::prelude::*;

use crate::debug::state::{DebugAction, DebugState};

const PANEL_BG: Color = Color::srgba(0.08, 0.1, 0.12, 0.92);
const PANEL_BORDER: Color = Color::srgb(0.3, 0.55, 0.35);
const BUTTON_BG: Color = Color::srgb(0.16, 0.2, 0.22);
const HEADER: Color = Color::srgb(0.55, 0.9, 0.5);
const LABEL: Color = Color::srgb(0.88, 0.9, 0.88);
const HINT: Color = Color::srgb(0.55, 0.6, 0.6);

/// Panel rows, top to bottom.
const SECTIONS: [(&str, &[DebugAction]); 4] = [
    (
        "Player",
        &[
            DebugAction::ToggleInvincible,
            DebugAction::FullHeal,
            DebugAction::UnlockAbilities,
        ],
    ),
    (
        "Warp",
        &[
            DebugAction::WarpToCheckpoint,
            DebugAction::WarpToTeleportBoss,
            DebugAction::WarpToArenaBoss,
        ],
    ),
    (
        "Overlays",
        &[
            DebugAction::ToggleHitboxes,
            DebugAction::ToggleProbes,
            DebugAction::ToggleInfo,
        ],
    ),
    ("Arena", &[DebugAction::KillAllEnemies]),
];

#[derive(Component, Debug)]
pub struct DebugUI;

#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

#[derive(Component, Debug)]
pub struct DebugStatusMessage;

#[derive(Component, Debug)]
pub struct DebugButton {
    pub action: DebugAction,
}

/// Button caption, with the current flag for toggles.
pub fn button_label(action: DebugAction, state: &DebugState) -> String {
    let toggle = |name: &str, on: bool, key: &str| {
        format!("{} {} [Ctrl+{}]", name, if on { "on" } else { "off" }, key)
    };
    match action {
        DebugAction::ToggleInvincible => toggle("Invincible", state.invincible, "I"),
        DebugAction::ToggleHitboxes => toggle("Hitboxes", state.show_hitboxes, "G"),
        DebugAction::ToggleProbes => toggle("Probes", state.show_probes, "P"),
        DebugAction::ToggleInfo => toggle("Info", state.show_info, "D"),
        DebugAction::FullHeal => "Heal [Ctrl+H]".to_string(),
        DebugAction::UnlockAbilities => "Unlock [Ctrl+U]".to_string(),
        DebugAction::WarpToCheckpoint => "Checkpoint [Ctrl+1]".to_string(),
        DebugAction::WarpToTeleportBoss => "Red Riot [Ctrl+2]".to_string(),
        DebugAction::WarpToArenaBoss => "Scientist [Ctrl+3]".to_string(),
        DebugAction::KillAllEnemies => "Kill slimes [Ctrl+K]".to_string(),
        DebugAction::Close => "X".to_string(),
    }
}

fn text(content: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(content),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn button(parent: &mut ChildSpawnerCommands, action: DebugAction, state: &DebugState) {
    parent
        .spawn((
            DebugButton { action },
            Button,
            Node {
                padding: UiRect::axes(Val::Px(6.0), Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(BUTTON_BG),
        ))
        .with_child(text(button_label(action, state), 11.0, LABEL));
}

pub(crate) fn spawn_debug_ui(commands: &mut Commands, state: &DebugState) {
    commands
        .spawn((
            DebugUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                width: Val::Px(320.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(6.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            BorderColor::all(PANEL_BORDER),
            ZIndex(500),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|title| {
                    title.spawn(text("SLIMEFALL DEBUG", 16.0, HEADER));
                    button(title, DebugAction::Close, state);
                });
            panel.spawn(text("F1 toggles this panel", 11.0, HINT));
            panel.spawn((DebugStatusMessage, text(state.message(), 12.0, HEADER)));

            for (title, actions) in SECTIONS {
                panel.spawn(text(title, 13.0, HEADER));
                panel
                    .spawn(Node {
                        flex_wrap: FlexWrap::Wrap,
                        column_gap: Val::Px(6.0),
                        row_gap: Val::Px(4.0),
                        ..default()
                    })
                    .with_children(|row| {
                        for action in actions {
                            button(row, *action, state);
                        }
                    });
            }
        });
}

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        text("", 12.0, LABEL),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ZIndex(500),
    ));
}

/// Rebuild the panel so toggle captions match the state.
pub(crate) fn refresh_debug_ui(
    commands: &mut Commands,
    debug_state: &DebugState,
    existing_ui: &Query<Entity, With<DebugUI>>,
) {
    for entity in existing_ui.iter() {
        commands.entity(entity).despawn();
    }
    if debug_state.ui_visible {
        spawn_debug_ui(commands, debug_state);
    }
}
