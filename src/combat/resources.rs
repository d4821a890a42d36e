//! Combat domain: projectile, enemy and boss tuning.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::ProjectileKind;
use crate::spatial::ProbeShape;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub damage: u32,
    pub lifetime: f32,
    pub radius: f32,
    /// Gravity scale applied to the body. Zero flies straight.
    pub gravity: f32,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            speed: 8.0,
            damage: 1,
            lifetime: 5.0,
            radius: 0.2,
            gravity: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ExplosionSpec {
    pub radius: f32,
    pub duration: f32,
    pub damage: u32,
}

impl Default for ExplosionSpec {
    fn default() -> Self {
        Self {
            radius: 1.5,
            duration: 0.2,
            damage: 5,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub pellet: ProjectileSpec,
    pub spike: ProjectileSpec,
    pub bullet: ProjectileSpec,
    pub bomb: ProjectileSpec,
    pub missile: ProjectileSpec,
    pub laser: ProjectileSpec,
    pub ghost: ProjectileSpec,
    /// Missile forward flight before it starts to drop.
    pub missile_forward_time: f32,
    pub missile_fall_speed: f32,
    /// Horizontal correction speed while a missile drops onto its column.
    pub missile_home_speed: f32,
    /// Length of the laser beam. Its half-height is the laser radius.
    pub laser_length: f32,
    /// Ghost bomb detonation.
    pub ghost_blast: ExplosionSpec,
    /// Boss bomb detonation.
    pub bomb_blast: ExplosionSpec,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            pellet: ProjectileSpec::default(),
            spike: ProjectileSpec {
                speed: 8.0,
                damage: 1,
                lifetime: 5.0,
                radius: 0.15,
                gravity: 0.0,
            },
            bullet: ProjectileSpec {
                speed: 10.0,
                damage: 1,
                lifetime: 5.0,
                radius: 0.25,
                gravity: 0.0,
            },
            bomb: ProjectileSpec {
                speed: 8.0,
                damage: 0,
                lifetime: 4.0,
                radius: 0.3,
                gravity: 1.0,
            },
            missile: ProjectileSpec {
                speed: 10.0,
                damage: 2,
                lifetime: 5.0,
                radius: 0.3,
                gravity: 0.0,
            },
            laser: ProjectileSpec {
                speed: 0.0,
                damage: 2,
                lifetime: 2.0,
                radius: 0.3,
                gravity: 0.0,
            },
            ghost: ProjectileSpec {
                speed: 8.0,
                damage: 0,
                lifetime: 5.0,
                radius: 0.3,
                gravity: 0.0,
            },
            missile_forward_time: 0.4,
            missile_fall_speed: 6.0,
            missile_home_speed: 50.0,
            laser_length: 12.0,
            ghost_blast: ExplosionSpec::default(),
            bomb_blast: ExplosionSpec {
                radius: 1.5,
                duration: 0.2,
                damage: 2,
            },
        }
    }
}

impl CombatTuning {
    pub fn projectile(&self, kind: ProjectileKind) -> &ProjectileSpec {
        match kind {
            ProjectileKind::Pellet => &self.pellet,
            ProjectileKind::Spike => &self.spike,
            ProjectileKind::Bullet => &self.bullet,
            ProjectileKind::Bomb => &self.bomb,
            ProjectileKind::Missile => &self.missile,
            ProjectileKind::Laser => &self.laser,
            ProjectileKind::Ghost => &self.ghost,
        }
    }

    /// Explosion left behind when a projectile of `kind` retires, if any.
    pub fn blast(&self, kind: ProjectileKind) -> Option<&ExplosionSpec> {
        match kind {
            ProjectileKind::Bomb => Some(&self.bomb_blast),
            ProjectileKind::Ghost => Some(&self.ghost_blast),
            _ => None,
        }
    }
}

/// Area swept by a melee strike, placed ahead of the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum StrikeArea {
    Circle { radius: f32 },
    Box { half_width: f32, half_height: f32 },
}

impl StrikeArea {
    pub fn shape(&self) -> ProbeShape {
        match *self {
            StrikeArea::Circle { radius } => ProbeShape::Circle { radius },
            StrikeArea::Box {
                half_width,
                half_height,
            } => ProbeShape::Rect {
                half_extents: Vec2::new(half_width, half_height),
            },
        }
    }
}

/// How an enemy decides a target is close enough to swing at.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum MeleeReach {
    /// Target centre within this distance.
    Distance(f32),
    /// The strike area already overlaps a target.
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MeleeProfile {
    pub reach: MeleeReach,
    pub area: StrikeArea,
    /// Distance from the body centre to the centre of the strike area.
    pub offset: f32,
    pub windup: f32,
    /// Total attack time, windup included.
    pub duration: f32,
    pub damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RangedPattern {
    /// One projectile in the facing direction.
    Aimed(ProjectileKind),
    /// One projectile left, right and up.
    Volley(ProjectileKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RangedProfile {
    /// Targets at or inside this distance are chased instead.
    pub min_range: f32,
    pub max_range: f32,
    pub windup: f32,
    pub duration: f32,
    pub pattern: RangedPattern,
    /// Stand still between shots instead of closing in.
    pub hold_position: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContactProfile {
    pub damage: u32,
    pub radius: f32,
    /// Seconds between damage ticks while the target stays in contact.
    pub interval: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TargetPolicy {
    #[default]
    Nearest,
    /// Any escort in range wins over the player, regardless of distance.
    PreferEscort,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub name: String,
    pub max_health: u32,
    pub detection_range: f32,
    pub move_speed: f32,
    /// Vertical velocity applied while chasing on the ground. Zero walks.
    pub hop_force: f32,
    pub attack_cooldown: f32,
    pub melee: Option<MeleeProfile>,
    pub ranged: Option<RangedProfile>,
    pub contact: Option<ContactProfile>,
    pub knockback: f32,
    pub flash: f32,
    pub death_delay: f32,
    pub policy: TargetPolicy,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self::blue()
    }
}

impl EnemyProfile {
    /// Melee slime: walks up and jabs with a short forward strike.
    pub fn blue() -> Self {
        Self {
            name: "Blue Slime".to_string(),
            max_health: 2,
            detection_range: 6.0,
            move_speed: 2.0,
            hop_force: 0.0,
            attack_cooldown: 1.0,
            melee: Some(MeleeProfile {
                reach: MeleeReach::Contact,
                area: StrikeArea::Box {
                    half_width: 0.5,
                    half_height: 0.1,
                },
                offset: 1.0,
                windup: 0.25,
                duration: 0.6,
                damage: 1,
            }),
            ranged: None,
            contact: None,
            knockback: 0.0,
            flash: 0.0,
            death_delay: 0.4,
            policy: TargetPolicy::Nearest,
        }
    }

    /// Hybrid slime: melee up close, pellets at range, hops while chasing.
    pub fn red() -> Self {
        Self {
            name: "Red Slime".to_string(),
            max_health: 2,
            detection_range: 25.0,
            move_speed: 2.0,
            hop_force: 1.0,
            attack_cooldown: 1.0,
            melee: Some(MeleeProfile {
                reach: MeleeReach::Distance(3.0),
                area: StrikeArea::Circle { radius: 0.6 },
                offset: 0.6,
                windup: 0.25,
                duration: 0.6,
                damage: 1,
            }),
            ranged: Some(RangedProfile {
                min_range: 0.0,
                max_range: 20.0,
                windup: 0.3,
                duration: 0.6,
                pattern: RangedPattern::Aimed(ProjectileKind::Pellet),
                hold_position: false,
            }),
            contact: None,
            knockback: 5.0,
            flash: 1.0,
            death_delay: 0.4,
            policy: TargetPolicy::PreferEscort,
        }
    }

    /// Ranged slime: spike volleys from afar, chases and burns on contact up close.
    pub fn cactus() -> Self {
        Self {
            name: "Cactus Slime".to_string(),
            max_health: 3,
            detection_range: 25.0,
            move_speed: 2.0,
            hop_force: 1.0,
            attack_cooldown: 3.0,
            melee: None,
            ranged: Some(RangedProfile {
                min_range: 5.0,
                max_range: 25.0,
                windup: 0.0,
                duration: 0.0,
                pattern: RangedPattern::Volley(ProjectileKind::Spike),
                hold_position: true,
            }),
            contact: Some(ContactProfile {
                damage: 2,
                radius: 0.8,
                interval: 1.0,
            }),
            knockback: 5.0,
            flash: 1.0,
            death_delay: 0.4,
            policy: TargetPolicy::Nearest,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub blue: EnemyProfile,
    pub red: EnemyProfile,
    pub cactus: EnemyProfile,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            blue: EnemyProfile::blue(),
            red: EnemyProfile::red(),
            cactus: EnemyProfile::cactus(),
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeleportBossTuning {
    pub name: String,
    pub max_health: u32,
    /// Seconds between attack animations.
    pub shot_interval: f32,
    /// Delay from the attack animation starting to the shot leaving.
    pub shot_windup: f32,
    /// Every this many shots, a bomb replaces the bullet.
    pub shots_before_bomb: u32,
    pub teleport_delay: f32,
    pub flash: f32,
    pub death_heal: u32,
    pub heal_ceiling: u32,
    /// Used when the death clip length is unknown.
    pub death_fallback: f32,
}

impl Default for TeleportBossTuning {
    fn default() -> Self {
        Self {
            name: "Red Riot".to_string(),
            max_health: 40,
            shot_interval: 3.5,
            shot_windup: 0.4,
            shots_before_bomb: 10,
            teleport_delay: 2.0,
            flash: 0.15,
            death_heal: 10,
            heal_ceiling: 25,
            death_fallback: 1.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaBossTuning {
    pub name: String,
    pub max_health: u32,
    pub flee_speed: f32,
    /// Distance at which a flee or spin waypoint counts as reached.
    pub arrive_distance: f32,
    /// Laser and missile only fire at targets farther than this.
    pub ranged_min_distance: f32,
    pub laser_cooldown: f32,
    pub laser_charge: f32,
    pub laser_fire_at: f32,
    pub missile_cooldown: f32,
    pub missile_fire_at: f32,
    pub missile_recover: f32,
    pub spin_cooldown: f32,
    pub spin_charge: f32,
    pub spin_duration: f32,
    pub spin_speed: f32,
    pub spin_damage: u32,
    pub spin_radius: f32,
    pub spin_rearm: f32,
    pub death_heal: u32,
    pub defeat_delay: f32,
    pub disable_delay: f32,
}

impl Default for ArenaBossTuning {
    fn default() -> Self {
        Self {
            name: "The Scientist".to_string(),
            max_health: 40,
            flee_speed: 22.5,
            arrive_distance: 0.2,
            ranged_min_distance: 10.0,
            laser_cooldown: 5.0,
            laser_charge: 1.5,
            laser_fire_at: 0.8,
            missile_cooldown: 20.0,
            missile_fire_at: 0.5,
            missile_recover: 0.7,
            spin_cooldown: 40.0,
            spin_charge: 0.7,
            spin_duration: 10.0,
            spin_speed: 12.0,
            spin_damage: 1,
            spin_radius: 1.2,
            spin_rearm: 0.5,
            death_heal: 10,
            defeat_delay: 2.0,
            disable_delay: 1.0,
        }
    }
}
