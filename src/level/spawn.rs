//! Level domain: geometry and zone spawning helpers, and the demo arena.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{
    ArenaBossTuning, ArenaBounds, CrackedBlock, EnemyRoster, TeleportBossTuning, spawn_arena_boss,
    spawn_enemy, spawn_teleport_boss,
};
use crate::core::Checkpoint;
use crate::encounters::{BossArenaTrigger, BossReward};
use crate::npc::{ClimbArea, EscortGoal, EscortTuning, spawn_escort};
use crate::player::{
    CheckpointZone, KillZone, KillZoneKind, PickupKind, PlayerTuning, spawn_pickup, spawn_player,
};
use crate::spatial::{GameLayer, Terrain, trigger_zone};

pub const PLAYER_START: Vec2 = Vec2::new(-20.0, 1.5);

const GROUND_COLOR: Color = Color::srgb(0.35, 0.4, 0.35);
const WALL_COLOR: Color = Color::srgb(0.25, 0.25, 0.35);

/// Solid terrain. Everything that moves collides with it and every sensing
/// ray stops on it.
pub fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) -> Entity {
    commands
        .spawn((
            Terrain,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
            Friction::ZERO,
        ))
        .id()
}

/// Terrain an explosion can remove.
pub fn spawn_cracked_block(commands: &mut Commands, center: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((
            Terrain,
            CrackedBlock,
            Sprite {
                color: Color::srgb(0.5, 0.42, 0.35),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new([GameLayer::Ground, GameLayer::Breakable], LayerMask::ALL),
        ))
        .id()
}

pub fn spawn_kill_zone(
    commands: &mut Commands,
    kind: KillZoneKind,
    center: Vec2,
    size: Vec2,
) -> Entity {
    commands
        .spawn((KillZone(kind), trigger_zone(center, size, GameLayer::Player)))
        .id()
}

pub fn spawn_checkpoint_zone(commands: &mut Commands, center: Vec2, respawn: Vec2) -> Entity {
    commands
        .spawn((
            CheckpointZone { respawn },
            trigger_zone(center, Vec2::new(1.0, 4.0), GameLayer::Player),
        ))
        .id()
}

pub fn spawn_arena_trigger(
    commands: &mut Commands,
    boss: Entity,
    name: &str,
    center: Vec2,
    reward: Option<BossReward>,
) -> Entity {
    let entity = commands
        .spawn((
            BossArenaTrigger::new(boss, name),
            trigger_zone(center, Vec2::new(1.0, 8.0), GameLayer::Player),
        ))
        .id();
    if let Some(reward) = reward {
        commands.entity(entity).insert(reward);
    }
    entity
}

/// Left to right: start area with a wall to climb, a step ledge, the three
/// slimes, a cracked block, the teleporting boss, a pit, the arena boss and
/// the escort stretch.
pub(crate) fn spawn_demo_arena(
    mut commands: Commands,
    player_tuning: Res<PlayerTuning>,
    escort_tuning: Res<EscortTuning>,
    roster: Res<EnemyRoster>,
    teleport_tuning: Res<TeleportBossTuning>,
    arena_tuning: Res<ArenaBossTuning>,
    mut checkpoint: ResMut<Checkpoint>,
) {
    let commands = &mut commands;

    // Floor, split by a pit at x 64..68. Floor top is y = 0.
    spawn_block(commands, Vec2::new(16.0, -1.0), Vec2::new(96.0, 2.0), GROUND_COLOR);
    spawn_block(commands, Vec2::new(107.0, -1.0), Vec2::new(78.0, 2.0), GROUND_COLOR);
    spawn_block(commands, Vec2::new(-32.5, 6.0), Vec2::new(1.0, 16.0), WALL_COLOR);
    spawn_block(commands, Vec2::new(146.5, 6.0), Vec2::new(1.0, 16.0), WALL_COLOR);
    // Wall-jump pillar facing the left wall.
    spawn_block(commands, Vec2::new(-27.0, 5.0), Vec2::new(1.0, 6.0), WALL_COLOR);

    // Ledges: one low enough to step onto, one for the escort to climb.
    spawn_block(commands, Vec2::new(-10.0, 0.5), Vec2::new(3.0, 1.0), GROUND_COLOR);
    spawn_block(commands, Vec2::new(121.0, 0.25), Vec2::new(6.0, 0.5), GROUND_COLOR);

    checkpoint.save(PLAYER_START);
    spawn_player(commands, &player_tuning, PLAYER_START);
    spawn_checkpoint_zone(commands, Vec2::new(-20.0, 2.0), PLAYER_START);
    spawn_pickup(commands, PickupKind::Spear, Vec2::new(-15.0, 0.5));

    spawn_enemy(commands, roster.blue.clone(), Vec2::new(0.0, 0.5));
    spawn_enemy(commands, roster.red.clone(), Vec2::new(10.0, 0.5));
    spawn_enemy(commands, roster.cactus.clone(), Vec2::new(20.0, 0.5));

    spawn_pickup(commands, PickupKind::GhostBomb, Vec2::new(26.0, 0.5));
    spawn_cracked_block(commands, Vec2::new(30.0, 2.0), Vec2::new(1.0, 4.0));

    let teleport_boss = spawn_teleport_boss(
        commands,
        teleport_tuning.clone(),
        Vec2::new(52.0, 3.0),
        vec![
            Vec2::new(42.0, 1.5),
            Vec2::new(50.0, 4.0),
            Vec2::new(58.0, 1.5),
        ],
    );
    spawn_arena_trigger(
        commands,
        teleport_boss,
        &teleport_tuning.name,
        Vec2::new(40.0, 4.0),
        Some(BossReward {
            kind: PickupKind::ShieldBlessing,
            drop_at: Vec2::new(50.0, 0.5),
        }),
    );

    spawn_checkpoint_zone(commands, Vec2::new(62.0, 2.0), Vec2::new(62.0, 1.5));
    spawn_kill_zone(
        commands,
        KillZoneKind::Kill,
        Vec2::new(66.0, -3.0),
        Vec2::new(4.0, 2.0),
    );
    // Anything that slips out of the level is returned to the checkpoint.
    spawn_kill_zone(
        commands,
        KillZoneKind::Teleport,
        Vec2::new(57.0, -12.0),
        Vec2::new(220.0, 2.0),
    );

    let arena_boss = spawn_arena_boss(
        commands,
        arena_tuning.clone(),
        Vec2::new(95.0, 1.25),
        ArenaBounds {
            left: 76.0,
            right: 99.0,
            spin_a: 80.0,
            spin_b: 95.0,
        },
    );
    spawn_arena_trigger(
        commands,
        arena_boss,
        &arena_tuning.name,
        Vec2::new(74.0, 4.0),
        None,
    );

    spawn_checkpoint_zone(commands, Vec2::new(103.0, 2.0), Vec2::new(103.0, 1.5));
    spawn_escort(commands, &escort_tuning, Vec2::new(106.0, 0.75));
    spawn_enemy(commands, roster.red.clone(), Vec2::new(128.0, 0.5));
    commands.spawn((
        ClimbArea,
        trigger_zone(Vec2::new(117.5, 1.0), Vec2::new(1.0, 2.0), GameLayer::Npc),
    ));
    commands.spawn((
        EscortGoal {
            objective: "The escort is safe".to_string(),
        },
        trigger_zone(Vec2::new(140.0, 2.0), Vec2::new(2.0, 4.0), GameLayer::Npc),
    ));

    info!("Demo arena ready, player at {:?}", PLAYER_START);
}
