//! Combat domain: default projectile collaborator and explosions.
//!
//! Actors only write `SpawnProjectile`. This module turns those requests into
//! bodies, moves missiles, and retires spent or expired projectiles, leaving an
//! explosion behind for bombs and ghosts.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::components::{HitKind, Hitbox, HitboxLifetime, Team};
use crate::combat::resources::{CombatTuning, ExplosionSpec};
use crate::core::{ProjectileKind, SpawnProjectile};
use crate::spatial::{GameLayer, ProbeShape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileMotion {
    /// Whatever velocity and gravity the body was launched with.
    Ballistic,
    /// Fly sideways, then drop onto a locked column.
    Dive {
        dir: f32,
        target_x: f32,
        forward_time: f32,
        forward_speed: f32,
        fall_speed: f32,
        home_speed: f32,
    },
}

impl ProjectileMotion {
    /// Velocity for a diving projectile at `age`, given its current `x`.
    pub fn dive_velocity(&self, age: f32, x: f32, dt: f32) -> Option<Vec2> {
        let ProjectileMotion::Dive {
            dir,
            target_x,
            forward_time,
            forward_speed,
            fall_speed,
            home_speed,
        } = *self
        else {
            return None;
        };
        if age < forward_time {
            return Some(Vec2::new(dir * forward_speed, 0.0));
        }
        let vx = if dt > 0.0 {
            ((target_x - x) / dt).clamp(-home_speed, home_speed)
        } else {
            0.0
        };
        Some(Vec2::new(vx, -fall_speed))
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub age: f32,
    pub lifetime: f32,
    /// Set once the projectile has touched something it reacts to.
    pub spent: bool,
    pub stops_on_terrain: bool,
    pub motion: ProjectileMotion,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.spent || self.age >= self.lifetime
    }
}

fn projectile_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Pellet => Color::srgb(0.9, 0.3, 0.2),
        ProjectileKind::Spike => Color::srgb(0.4, 0.8, 0.3),
        ProjectileKind::Bullet => Color::srgb(1.0, 0.5, 0.1),
        ProjectileKind::Bomb => Color::srgb(0.2, 0.2, 0.2),
        ProjectileKind::Missile => Color::srgb(0.8, 0.8, 0.9),
        ProjectileKind::Laser => Color::srgba(0.3, 1.0, 1.0, 0.7),
        ProjectileKind::Ghost => Color::srgba(0.8, 0.9, 1.0, 0.8),
    }
}

pub(crate) fn spawn_requested_projectiles(
    mut commands: Commands,
    mut requests: MessageReader<SpawnProjectile>,
    tuning: Res<CombatTuning>,
) {
    for request in requests.read() {
        let spec = tuning.projectile(request.kind);

        if request.kind == ProjectileKind::Laser {
            let dir = if request.aim.x < 0.0 { -1.0 } else { 1.0 };
            let half = Vec2::new(tuning.laser_length * 0.5, spec.radius);
            let center = request.origin + Vec2::new(dir * half.x, 0.0);
            commands.spawn((
                Hitbox::new(
                    request.source,
                    spec.damage,
                    ProbeShape::Rect { half_extents: half },
                ),
                request.team,
                HitboxLifetime(spec.lifetime),
                Sprite {
                    color: projectile_color(request.kind),
                    custom_size: Some(half * 2.0),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 2.0),
            ));
            continue;
        }

        let (velocity, motion) = match request.kind {
            ProjectileKind::Missile => {
                let dir = if request.aim.x >= request.origin.x { 1.0 } else { -1.0 };
                (
                    Vec2::new(dir * spec.speed, 0.0),
                    ProjectileMotion::Dive {
                        dir,
                        target_x: request.aim.x,
                        forward_time: tuning.missile_forward_time,
                        forward_speed: spec.speed,
                        fall_speed: tuning.missile_fall_speed,
                        home_speed: tuning.missile_home_speed,
                    },
                )
            }
            _ => (
                request.aim.normalize_or_zero() * spec.speed,
                ProjectileMotion::Ballistic,
            ),
        };

        let stops_on_terrain = request.kind != ProjectileKind::Missile;
        let mut filters = request.team.target_layers();
        if stops_on_terrain {
            filters = filters | LayerMask::from(GameLayer::Ground);
        }

        commands.spawn((
            (
                Projectile {
                    kind: request.kind,
                    age: 0.0,
                    lifetime: spec.lifetime,
                    spent: false,
                    stops_on_terrain,
                    motion,
                },
                Hitbox::new(
                    request.source,
                    spec.damage,
                    ProbeShape::Circle {
                        radius: spec.radius,
                    },
                ),
                request.team,
            ),
            Sprite {
                color: projectile_color(request.kind),
                custom_size: Some(Vec2::splat(spec.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(request.origin.x, request.origin.y, 2.0),
            (
                RigidBody::Dynamic,
                Collider::circle(spec.radius),
                Sensor,
                CollisionEventsEnabled,
                LockedAxes::ROTATION_LOCKED,
                GravityScale(spec.gravity),
                LinearVelocity(velocity),
                CollisionLayers::new(request.team.hitbox_layer(), filters),
            ),
        ));

        debug!(
            "Projectile {:?} from {:?} at {:?}",
            request.kind, request.source, request.origin
        );
    }
}

pub(crate) fn steer_projectiles(
    time: Res<Time>,
    mut query: Query<(&mut Projectile, &Transform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (mut projectile, transform, mut velocity) in &mut query {
        projectile.age += dt;
        if let Some(v) = projectile
            .motion
            .dive_velocity(projectile.age, transform.translation.x, dt)
        {
            velocity.0 = v;
        }
    }
}

pub(crate) fn retire_projectiles(
    mut commands: Commands,
    tuning: Res<CombatTuning>,
    query: Query<(Entity, &Projectile, &Hitbox, &Team, &Transform)>,
) {
    for (entity, projectile, hitbox, team, transform) in &query {
        if !projectile.is_expired() {
            continue;
        }
        if let Some(blast) = tuning.blast(projectile.kind) {
            spawn_explosion(
                &mut commands,
                hitbox.owner,
                *team,
                transform.translation.truncate(),
                blast,
            );
        }
        commands.entity(entity).despawn();
    }
}

/// Spawn a short-lived explosion region. It shatters cracked blocks and
/// strikes each target at most once.
pub fn spawn_explosion(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    center: Vec2,
    spec: &ExplosionSpec,
) -> Entity {
    info!("Explosion at {:?} (owner {:?})", center, owner);
    commands
        .spawn((
            Hitbox::new(
                owner,
                spec.damage,
                ProbeShape::Circle {
                    radius: spec.radius,
                },
            )
            .with_kind(HitKind::Explosion),
            team,
            HitboxLifetime(spec.duration),
            Sprite {
                color: Color::srgba(1.0, 0.7, 0.2, 0.5),
                custom_size: Some(Vec2::splat(spec.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 2.0),
        ))
        .id()
}
