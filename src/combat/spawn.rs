//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::{
    ArenaBoss, ArenaBounds, Enemy, EnemyBrain, EnemyIntent, EnemySenses, TeleportBoss,
    TeleportPoints,
};
use crate::combat::components::{
    DamageFeedback, Damageable, Health, Hitbox, HitboxRearm, Hurtbox, Team,
};
use crate::combat::resources::{ArenaBossTuning, EnemyProfile, TeleportBossTuning};
use crate::spatial::{GameLayer, ProbeShape};

const SLIME_SIZE: Vec2 = Vec2::new(1.0, 1.0);
const BOSS_SIZE: Vec2 = Vec2::new(2.0, 2.5);

fn slime_color(name: &str) -> Color {
    match name {
        "Red Slime" => Color::srgb(0.85, 0.2, 0.2),
        "Cactus Slime" => Color::srgb(0.3, 0.7, 0.3),
        _ => Color::srgb(0.25, 0.45, 0.9),
    }
}

/// Bundle for spawning a minor enemy from its profile
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub brain: EnemyBrain,
    pub senses: EnemySenses,
    pub intent: EnemyIntent,
    pub team: Team,
    pub health: Health,
    pub damageable: Damageable,
    pub hurtbox: Hurtbox,
    pub feedback: DamageFeedback,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(profile: EnemyProfile, position: Vec2) -> Self {
        let color = slime_color(&profile.name);
        Self {
            enemy: Enemy,
            health: Health::new(profile.max_health),
            feedback: DamageFeedback::new(color, profile.flash, profile.knockback),
            brain: EnemyBrain::new(profile),
            senses: EnemySenses::default(),
            intent: EnemyIntent::default(),
            team: Team::Enemy,
            damageable: Damageable::BY_PLAYER,
            hurtbox: Hurtbox::default(),
            sprite: Sprite {
                color,
                custom_size: Some(SLIME_SIZE),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(SLIME_SIZE.x, SLIME_SIZE.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::PlayerHitbox],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(1.0),
        }
    }
}

/// Spawn a minor enemy. Profiles with contact damage also carry an
/// always-on hitbox that re-arms on the contact interval.
pub fn spawn_enemy(commands: &mut Commands, profile: EnemyProfile, position: Vec2) -> Entity {
    let contact = profile.contact;
    let name = profile.name.clone();
    let entity = commands.spawn(EnemyBundle::new(profile, position)).id();

    if let Some(contact) = contact {
        commands.entity(entity).insert((
            Hitbox::new(
                entity,
                contact.damage,
                ProbeShape::Circle {
                    radius: contact.radius,
                },
            ),
            HitboxRearm::every(contact.interval),
        ));
    }

    debug!("Spawned {} {:?} at {:?}", name, entity, position);
    entity
}

fn boss_body(position: Vec2, color: Color) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(BOSS_SIZE),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 1.0),
        Visibility::Visible,
        RigidBody::Kinematic,
        Collider::rectangle(BOSS_SIZE.x, BOSS_SIZE.y),
        CollisionLayers::new(GameLayer::Enemy, [GameLayer::PlayerHitbox]),
        LinearVelocity::default(),
        LockedAxes::ROTATION_LOCKED,
    )
}

pub fn spawn_teleport_boss(
    commands: &mut Commands,
    tuning: TeleportBossTuning,
    position: Vec2,
    points: Vec<Vec2>,
) -> Entity {
    let color = Color::srgb(0.75, 0.1, 0.15);
    let flash = tuning.flash;
    let entity = commands
        .spawn((
            (
                Enemy,
                Health::new(tuning.max_health),
                TeleportBoss::new(tuning),
                TeleportPoints(points),
                Team::Enemy,
                Damageable::BY_PLAYER,
                Hurtbox::default(),
                DamageFeedback::new(color, flash, 0.0),
            ),
            boss_body(position, color),
        ))
        .id();
    info!("Spawned teleport boss {:?} at {:?}", entity, position);
    entity
}

pub fn spawn_arena_boss(
    commands: &mut Commands,
    tuning: ArenaBossTuning,
    position: Vec2,
    bounds: ArenaBounds,
) -> Entity {
    let color = Color::srgb(0.6, 0.6, 0.75);
    let spin = (tuning.spin_damage, tuning.spin_radius, tuning.spin_rearm);
    let entity = commands
        .spawn((
            (
                Enemy,
                Health::new(tuning.max_health),
                ArenaBoss::new(tuning),
                bounds,
                Team::Enemy,
                Damageable::BY_PLAYER,
                Hurtbox::default(),
            ),
            boss_body(position, color),
        ))
        .id();

    commands.entity(entity).insert((
        Hitbox::new(entity, spin.0, ProbeShape::Circle { radius: spin.1 }).dormant(),
        HitboxRearm::every(spin.2),
    ));
    info!("Spawned arena boss {:?} at {:?}", entity, position);
    entity
}
