//! Combat domain: unit tests for health, hit screening, and every brain.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::ai::{
    ArenaBossOutput, TeleportBossOutput, arena_boss_take_hits, think_arena_bosses,
};
use super::systems::resolve_projectile_contacts;
use super::{
    ArenaAttack, ArenaBoss, ArenaBossState, ArenaBossTuning, ArenaBounds, AttackMode,
    BossDefeatedEvent, BossHitOutcome, BossShot, Candidate, CombatTuning, Contact,
    DamageEvent, DamageFeedback, DamageOutcome, Damageable, DeathEvent, EnemyBrain,
    EnemyProfile, EnemyState, Health, HitKind, Hitbox, Hurtbox, Projectile, ProjectileMotion,
    Sighting, Struck, TargetPolicy, TargetTags, Team, TeleportBoss, TeleportBossState,
    TeleportBossTuning, pick_strike_target, pick_teleport_point, screen_hit, select_target,
    sweep_hitbox,
};
use crate::core::{NotifyUi, PlayAnimation, PlaySound, ProjectileKind, SpawnProjectile};
use crate::player::Player;
use crate::spatial::Terrain;
use crate::spatial::testing::BoxWorld;
use crate::spatial::{GameLayer, ProbeShape};

fn entities<const N: usize>() -> [Entity; N] {
    let mut world = World::new();
    std::array::from_fn(|_| world.spawn_empty().id())
}

fn open_to(damageable: Damageable) -> TargetTags {
    TargetTags {
        damageable,
        hurtbox_enabled: true,
    }
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_health_stays_in_range_under_damage() {
    let mut health = Health::new(5);
    for amount in [2, 0, 1, 7, 3] {
        health.apply_damage(amount);
        assert!(health.current <= health.max);
    }
    assert_eq!(health.current, 0);
}

#[test]
fn test_health_reports_kill_exactly_once() {
    let mut health = Health::new(1);
    assert_eq!(health.apply_damage(1), DamageOutcome::Killed);
    assert_eq!(health.apply_damage(1), DamageOutcome::Ignored);
    assert_eq!(health.heal(3), 0);
    assert!(health.is_dead());

    health.reset_to_max();
    assert_eq!(health.current, 1);
    assert_eq!(health.apply_damage(1), DamageOutcome::Killed);
}

#[test]
fn test_heal_capped_never_lowers_health() {
    let mut health = Health {
        current: 30,
        max: 40,
    };
    assert_eq!(health.heal_capped(10, 25), 0);
    assert_eq!(health.current, 30);

    health.current = 5;
    assert_eq!(health.heal_capped(10, 25), 10);
    assert_eq!(health.current, 15);
}

#[test]
fn test_zero_max_health_is_clamped() {
    assert_eq!(Health::new(0).max, 1);
}

#[test]
fn test_health_fraction() {
    let mut health = Health::new(4);
    health.apply_damage(1);
    assert_eq!(health.fraction(), 0.75);
}

// -----------------------------------------------------------------------------
// Hit screening
// -----------------------------------------------------------------------------

#[test]
fn test_hitbox_scores_each_target_once_per_activation() {
    let [owner, target] = entities();
    let mut hitbox = Hitbox::new(owner, 1, ProbeShape::Circle { radius: 0.5 });
    let tags = open_to(Damageable::BY_PLAYER);

    let hits = (0..5)
        .filter(|_| screen_hit(&mut hitbox, Team::Player, target, tags))
        .count();
    assert_eq!(hits, 1);

    hitbox.activate();
    assert!(screen_hit(&mut hitbox, Team::Player, target, tags));
}

#[test]
fn test_screen_rejects_owner_team_and_closed_hurtbox() {
    let [owner, target] = entities();
    let mut hitbox = Hitbox::new(owner, 1, ProbeShape::Circle { radius: 0.5 });

    assert!(!screen_hit(&mut hitbox, Team::Player, owner, open_to(Damageable::BY_PLAYER)));
    assert!(!screen_hit(&mut hitbox, Team::Player, target, open_to(Damageable::BY_ENEMY)));
    let closed = TargetTags {
        damageable: Damageable::BY_PLAYER,
        hurtbox_enabled: false,
    };
    assert!(!screen_hit(&mut hitbox, Team::Player, target, closed));
    // Rejections do not use up the activation.
    assert!(screen_hit(&mut hitbox, Team::Player, target, open_to(Damageable::BY_PLAYER)));
}

#[test]
fn test_dormant_hitbox_scores_nothing() {
    let [owner, target] = entities();
    let mut hitbox = Hitbox::new(owner, 1, ProbeShape::Circle { radius: 0.5 }).dormant();
    assert!(!screen_hit(&mut hitbox, Team::Player, target, open_to(Damageable::BY_PLAYER)));
}

#[test]
fn test_sweep_hits_overlapping_enemy_once() {
    let mut world = BoxWorld::default();
    let owner = world.entity();
    let slime = world.add_centered(Vec2::new(1.0, 0.0), Vec2::splat(0.5), GameLayer::Enemy);
    let far = world.add_centered(Vec2::new(6.0, 0.0), Vec2::splat(0.5), GameLayer::Enemy);
    let lookup = |_: Entity| Some(Contact::Actor(open_to(Damageable::BY_PLAYER)));

    let mut hitbox = Hitbox::new(owner, 1, ProbeShape::Circle { radius: 0.6 })
        .with_offset(Vec2::new(0.8, 0.0));
    let first = sweep_hitbox(&world, &mut hitbox, Team::Player, Vec2::ZERO, lookup);
    assert_eq!(first, vec![Struck::Target(slime)]);
    assert!(!first.contains(&Struck::Target(far)));

    let second = sweep_hitbox(&world, &mut hitbox, Team::Player, Vec2::ZERO, lookup);
    assert!(second.is_empty());
}

#[test]
fn test_only_explosions_shatter_cracked_blocks() {
    let mut world = BoxWorld::default();
    let owner = world.entity();
    let block = world.add_centered(Vec2::ZERO, Vec2::splat(0.5), GameLayer::Breakable);
    let lookup = |e: Entity| (e == block).then_some(Contact::Cracked);

    let mut swing = Hitbox::new(owner, 1, ProbeShape::Circle { radius: 1.5 });
    assert!(sweep_hitbox(&world, &mut swing, Team::Player, Vec2::ZERO, lookup).is_empty());

    let mut blast =
        Hitbox::new(owner, 5, ProbeShape::Circle { radius: 1.5 }).with_kind(HitKind::Explosion);
    assert_eq!(
        sweep_hitbox(&world, &mut blast, Team::Player, Vec2::ZERO, lookup),
        vec![Struck::Shattered(block)]
    );
}

#[test]
fn test_enemy_hitbox_ignores_enemies() {
    let mut world = BoxWorld::default();
    let owner = world.entity();
    world.add_centered(Vec2::ZERO, Vec2::splat(0.5), GameLayer::Enemy);
    let player = world.add_centered(Vec2::new(0.5, 0.0), Vec2::splat(0.5), GameLayer::Player);
    let lookup = |_: Entity| Some(Contact::Actor(open_to(Damageable::BY_ENEMY)));

    let mut contact = Hitbox::new(owner, 2, ProbeShape::Circle { radius: 0.8 });
    assert_eq!(
        sweep_hitbox(&world, &mut contact, Team::Enemy, Vec2::ZERO, lookup),
        vec![Struck::Target(player)]
    );
}

#[test]
fn test_knockback_pushes_away_from_attacker() {
    let mut feedback = DamageFeedback::new(Color::WHITE, 1.0, 5.0);
    assert_eq!(feedback.trigger(Vec2::new(2.0, 0.0), Vec2::ZERO), 5.0);
    assert_eq!(feedback.trigger(Vec2::new(-2.0, 0.0), Vec2::ZERO), -5.0);
    assert!(feedback.is_flashing());
    assert!(feedback.is_recoiling());
}

// -----------------------------------------------------------------------------
// Projectiles
// -----------------------------------------------------------------------------

#[test]
fn test_missile_flies_forward_then_drops_on_column() {
    let motion = ProjectileMotion::Dive {
        dir: 1.0,
        target_x: 5.0,
        forward_time: 0.4,
        forward_speed: 10.0,
        fall_speed: 6.0,
        home_speed: 50.0,
    };
    assert_eq!(motion.dive_velocity(0.1, 0.0, 0.1), Some(Vec2::new(10.0, 0.0)));

    let diving = motion.dive_velocity(1.0, 4.0, 0.1).unwrap();
    assert_eq!(diving.y, -6.0);
    assert!(diving.x > 0.0 && diving.x <= 50.0);
    assert_eq!(ProjectileMotion::Ballistic.dive_velocity(1.0, 0.0, 0.1), None);
}

#[test]
fn test_only_bombs_and_ghosts_leave_a_blast() {
    let tuning = CombatTuning::default();
    assert!(tuning.blast(ProjectileKind::Bomb).is_some());
    assert_eq!(tuning.blast(ProjectileKind::Ghost).map(|b| b.damage), Some(5));
    assert!(tuning.blast(ProjectileKind::Bullet).is_none());
    assert_eq!(tuning.projectile(ProjectileKind::Bullet).speed, 10.0);
}

// -----------------------------------------------------------------------------
// Minor enemies
// -----------------------------------------------------------------------------

fn sighting(x: f32, in_melee: bool) -> Option<Sighting> {
    let [target] = entities();
    Some(Sighting {
        entity: target,
        offset: Vec2::new(x, 0.0),
        in_melee,
    })
}

#[test]
fn test_two_hp_enemy_dies_on_second_hit() {
    let mut brain = EnemyBrain::new(EnemyProfile::blue());
    let mut health = Health::new(2);
    assert_eq!(brain.take_hit(&mut health), DamageOutcome::Wounded);
    assert!(!brain.is_dead());
    assert_eq!(brain.take_hit(&mut health), DamageOutcome::Killed);
    assert_eq!(brain.state, EnemyState::Dead);
    assert_eq!(brain.take_hit(&mut health), DamageOutcome::Ignored);
    assert_eq!(health.current, 0);
}

#[test]
fn test_dead_enemy_is_removed_after_delay() {
    let mut brain = EnemyBrain::new(EnemyProfile::blue());
    let mut health = Health::new(1);
    brain.take_hit(&mut health);

    let early = brain.tick(0.3, sighting(0.5, true));
    assert!(!early.remove && !early.strike);
    assert!(brain.tick(0.2, None).remove);
}

#[test]
fn test_enemy_chases_toward_target() {
    let mut brain = EnemyBrain::new(EnemyProfile::blue());
    let out = brain.tick(0.1, sighting(-4.0, false));
    assert_eq!(brain.state, EnemyState::Chase);
    assert_eq!(out.movement, Some(-1.0));
    assert_eq!(brain.facing, -1.0);
}

#[test]
fn test_enemy_idles_outside_detection_keeping_facing() {
    let mut brain = EnemyBrain::new(EnemyProfile::blue());
    brain.tick(0.1, sighting(-4.0, false));
    let out = brain.tick(0.1, sighting(10.0, false));
    assert_eq!(brain.state, EnemyState::Idle);
    assert_eq!(out.movement, None);
    assert_eq!(brain.facing, -1.0);
}

#[test]
fn test_melee_strikes_after_windup_then_recovers() {
    let mut brain = EnemyBrain::new(EnemyProfile::red());
    let start = brain.tick(0.1, sighting(1.0, true));
    assert_eq!(start.began, Some(AttackMode::Melee));
    assert_eq!(brain.state, EnemyState::Attack(AttackMode::Melee));

    let windup = brain.tick(0.1, sighting(1.0, true));
    assert!(!windup.strike);
    let strike = brain.tick(0.2, sighting(1.0, true));
    assert!(strike.strike);
    assert_eq!(brain.state, EnemyState::Attack(AttackMode::Melee));

    let recovered = brain.tick(0.4, sighting(1.0, true));
    assert!(!recovered.strike);
    // Cooldown still running, so the enemy stands its ground.
    assert_eq!(brain.state, EnemyState::Idle);
    assert_eq!(recovered.began, None);
}

#[test]
fn test_red_slime_shoots_beyond_melee_reach() {
    let mut brain = EnemyBrain::new(EnemyProfile::red());
    assert_eq!(brain.tick(0.1, sighting(10.0, false)).began, Some(AttackMode::Ranged));
    assert!(!brain.tick(0.2, sighting(10.0, false)).fire);
    assert!(brain.tick(0.2, sighting(10.0, false)).fire);
}

#[test]
fn test_cactus_volleys_then_holds_position() {
    let mut brain = EnemyBrain::new(EnemyProfile::cactus());
    assert_eq!(brain.tick(0.1, sighting(10.0, false)).began, Some(AttackMode::Ranged));
    assert!(brain.tick(0.1, sighting(10.0, false)).fire);

    brain.tick(0.1, sighting(10.0, false));
    let holding = brain.tick(0.1, sighting(10.0, false));
    assert_eq!(brain.state, EnemyState::Idle);
    assert_eq!(holding.movement, None);

    let close = brain.tick(0.1, sighting(3.0, false));
    assert_eq!(close.movement, Some(1.0));
}

#[test]
fn test_select_target_prefers_nearest() {
    let [first, second] = entities();
    let player = Candidate {
        entity: first,
        position: Vec2::new(5.0, 0.0),
        escort: false,
    };
    let escort = Candidate {
        entity: second,
        position: Vec2::new(8.0, 0.0),
        escort: true,
    };
    let both = [escort, player];
    assert_eq!(
        select_target(Vec2::ZERO, &both, 25.0, TargetPolicy::Nearest),
        Some(player)
    );
    assert_eq!(
        select_target(Vec2::ZERO, &both, 25.0, TargetPolicy::PreferEscort),
        Some(escort)
    );
    assert_eq!(
        select_target(Vec2::ZERO, &both, 6.0, TargetPolicy::PreferEscort),
        Some(player)
    );
    assert_eq!(select_target(Vec2::ZERO, &both, 2.0, TargetPolicy::Nearest), None);
}

#[test]
fn test_strike_prefers_escort_in_overlap() {
    let [player, escort] = entities();
    assert_eq!(pick_strike_target(&[(player, false), (escort, true)]), Some(escort));
    assert_eq!(pick_strike_target(&[(player, false)]), Some(player));
    assert_eq!(pick_strike_target(&[]), None);
}

// -----------------------------------------------------------------------------
// Teleport boss
// -----------------------------------------------------------------------------

fn teleport_boss() -> (TeleportBoss, Health) {
    let tuning = TeleportBossTuning::default();
    let health = Health::new(tuning.max_health);
    let mut boss = TeleportBoss::new(tuning);
    assert!(boss.activate());
    (boss, health)
}

#[test]
fn test_dormant_teleport_boss_does_nothing() {
    let mut boss = TeleportBoss::new(TeleportBossTuning::default());
    let mut health = Health::new(40);
    assert_eq!(boss.tick(5.0), TeleportBossOutput::default());
    assert_eq!(boss.take_hit(&mut health, true, 1.0), BossHitOutcome::Ignored);
}

#[test]
fn test_every_tenth_shot_is_a_bomb() {
    let (mut boss, _) = teleport_boss();
    let mut shots = Vec::new();
    for _ in 0..200 {
        if let Some(shot) = boss.tick(0.5).shot {
            shots.push(shot);
        }
        if shots.len() == 20 {
            break;
        }
    }
    assert_eq!(shots.len(), 20);
    for (i, shot) in shots.iter().enumerate() {
        let expected = if i % 10 == 9 { BossShot::Bomb } else { BossShot::Bullet };
        assert_eq!(*shot, expected, "shot {}", i);
    }
}

#[test]
fn test_shot_follows_windup() {
    let (mut boss, _) = teleport_boss();
    assert!(boss.tick(0.1).windup_started);
    assert_eq!(boss.tick(0.2).shot, None);
    assert_eq!(boss.tick(0.3).shot, Some(BossShot::Bullet));
}

#[test]
fn test_hit_starts_teleport_and_cancels_shot() {
    let (mut boss, mut health) = teleport_boss();
    boss.tick(0.1);
    assert!(boss.is_shot_pending());

    assert_eq!(boss.take_hit(&mut health, true, 1.0), BossHitOutcome::Teleported);
    assert_eq!(health.current, 39);
    assert_eq!(boss.state, TeleportBossState::Teleporting);
    assert!(!boss.is_shot_pending());

    // Unhittable while away.
    assert_eq!(boss.take_hit(&mut health, true, 1.0), BossHitOutcome::Ignored);
    assert_eq!(health.current, 39);

    assert!(!boss.tick(1.0).reappear);
    let back = boss.tick(1.1);
    assert!(back.reappear);
    assert_eq!(back.shot, None);
    assert_eq!(boss.state, TeleportBossState::Attacking);
    assert_eq!(boss.take_hit(&mut health, true, 1.0), BossHitOutcome::Teleported);
}

#[test]
fn test_lethal_hit_never_teleports() {
    let (mut boss, _) = teleport_boss();
    let mut health = Health { current: 1, max: 40 };
    assert_eq!(boss.take_hit(&mut health, true, 1.0), BossHitOutcome::Killed);
    assert_eq!(boss.state, TeleportBossState::Dead);
    assert_eq!(health.current, 0);

    let out = boss.tick(0.5);
    assert!(!out.reappear && !out.remove);
    assert!(boss.tick(0.6).remove);
}

#[test]
fn test_teleport_boss_ignores_non_player_hits() {
    let (mut boss, mut health) = teleport_boss();
    assert_eq!(boss.take_hit(&mut health, false, 1.0), BossHitOutcome::Ignored);
    assert_eq!(health.current, 40);
}

#[test]
fn test_player_death_heals_teleport_boss_to_ceiling() {
    let (boss, _) = teleport_boss();
    let mut health = Health { current: 5, max: 40 };
    assert_eq!(boss.on_player_died(&mut health), 10);
    assert_eq!(health.current, 15);

    health.current = 20;
    boss.on_player_died(&mut health);
    assert_eq!(health.current, 25);
}

#[test]
fn test_teleport_point_rerolls_until_different() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
        let pick = pick_teleport_point(Some(1), 3, &mut rng);
        assert!(matches!(pick, Some(0) | Some(2)));
    }
    assert_eq!(pick_teleport_point(Some(0), 1, &mut rng), Some(0));
    assert_eq!(pick_teleport_point(None, 0, &mut rng), None);
}

// -----------------------------------------------------------------------------
// Arena boss
// -----------------------------------------------------------------------------

const BOUNDS: ArenaBounds = ArenaBounds {
    left: -10.0,
    right: 10.0,
    spin_a: -6.0,
    spin_b: 6.0,
};

fn arena_boss() -> (ArenaBoss, Health) {
    let tuning = ArenaBossTuning::default();
    let health = Health::new(tuning.max_health);
    let mut boss = ArenaBoss::new(tuning);
    assert!(boss.activate());
    (boss, health)
}

#[test]
fn test_arena_cooldowns_start_charging() {
    let (mut boss, _) = arena_boss();
    assert_eq!(boss.tick(0.1, 0.0, 20.0, &BOUNDS).began, None);
    assert_eq!(boss.state, ArenaBossState::Moving);
}

#[test]
fn test_damage_flees_to_farther_bound() {
    let (mut boss, mut health) = arena_boss();
    assert_eq!(
        boss.take_damage(&mut health, 1, 3.0, &BOUNDS),
        DamageOutcome::Wounded
    );
    assert_eq!(boss.state, ArenaBossState::Fleeing);
    assert_eq!(boss.flee_target(), Some(-10.0));

    let out = boss.tick(0.1, 3.0, 0.0, &BOUNDS);
    assert_eq!(out.velocity_x, -22.5);

    boss.tick(0.1, -9.9, 0.0, &BOUNDS);
    assert_ne!(boss.state, ArenaBossState::Fleeing);

    boss.take_damage(&mut health, 1, -9.0, &BOUNDS);
    assert_eq!(boss.flee_target(), Some(10.0));
}

#[test]
fn test_spin_outranks_missile_and_laser() {
    let (mut boss, _) = arena_boss();
    boss.spin.reset();
    boss.missile.reset();
    boss.laser.reset();
    assert_eq!(boss.tick(0.01, 0.0, 20.0, &BOUNDS).began, Some(ArenaAttack::Spin));

    let (mut boss, _) = arena_boss();
    boss.missile.reset();
    boss.laser.reset();
    assert_eq!(
        boss.tick(0.01, 0.0, 20.0, &BOUNDS).began,
        Some(ArenaAttack::Missile)
    );
}

#[test]
fn test_ranged_attacks_need_distance() {
    let (mut boss, _) = arena_boss();
    boss.missile.reset();
    boss.laser.reset();
    assert_eq!(boss.tick(0.01, 0.0, 5.0, &BOUNDS).began, None);
    assert_eq!(boss.tick(0.01, 0.0, 15.0, &BOUNDS).began, Some(ArenaAttack::Missile));
}

#[test]
fn test_laser_fires_mid_charge() {
    let (mut boss, _) = arena_boss();
    boss.laser.reset();
    assert_eq!(boss.tick(0.01, 0.0, 20.0, &BOUNDS).began, Some(ArenaAttack::Laser));
    assert_eq!(boss.state, ArenaBossState::LaserCharge);
    assert!(!boss.tick(0.5, 0.0, 20.0, &BOUNDS).fire_laser);
    assert!(boss.tick(0.4, 0.0, 20.0, &BOUNDS).fire_laser);
    boss.tick(0.8, 0.0, 20.0, &BOUNDS);
    assert_eq!(boss.state, ArenaBossState::Moving);
}

#[test]
fn test_spin_ends_after_duration() {
    let (mut boss, _) = arena_boss();
    boss.spin.reset();
    boss.tick(0.01, 0.0, 0.0, &BOUNDS);
    assert_eq!(boss.state, ArenaBossState::SpinCharge);

    let start = boss.tick(0.8, 0.0, 0.0, &BOUNDS);
    assert!(start.spin_started);
    assert_eq!(boss.state, ArenaBossState::Spinning);
    assert!(start.velocity_x > 0.0);
    assert!(start.velocity_x * 0.8 <= 6.0 + 1e-4, "overshot the spin point");

    let mut elapsed = 0.0;
    let mut ended = false;
    for _ in 0..20 {
        let out = boss.tick(1.0, 0.0, 0.0, &BOUNDS);
        elapsed += 1.0;
        if out.spin_ended {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert!((9.0..=12.0).contains(&elapsed), "spin lasted {}", elapsed);
    assert_ne!(boss.state, ArenaBossState::Spinning);
}

#[test]
fn test_damage_interrupts_spin() {
    let (mut boss, mut health) = arena_boss();
    boss.spin.reset();
    boss.tick(0.01, 0.0, 0.0, &BOUNDS);
    boss.tick(0.8, 0.0, 0.0, &BOUNDS);
    boss.take_damage(&mut health, 1, 0.0, &BOUNDS);
    assert_eq!(boss.state, ArenaBossState::Fleeing);
}

const FRAME: f32 = 1.0 / 30.0;

#[test]
fn test_flee_lands_on_bound_at_low_frame_rate() {
    let (mut boss, mut health) = arena_boss();
    let mut x = 3.0;
    boss.take_damage(&mut health, 1, x, &BOUNDS);

    for _ in 0..60 {
        if boss.state != ArenaBossState::Fleeing {
            break;
        }
        x += boss.tick(FRAME, x, 0.0, &BOUNDS).velocity_x * FRAME;
        assert!(x >= BOUNDS.left - 1e-3, "fled past the bound to {}", x);
    }
    assert_ne!(boss.state, ArenaBossState::Fleeing);
    assert!((x - BOUNDS.left).abs() < 0.2);
}

#[test]
fn test_spin_reaches_both_points_at_low_frame_rate() {
    let (mut boss, _) = arena_boss();
    boss.spin.reset();
    let mut x = 0.0;
    boss.tick(FRAME, x, 0.0, &BOUNDS);
    while boss.state != ArenaBossState::Spinning {
        x += boss.tick(FRAME, x, 0.0, &BOUNDS).velocity_x * FRAME;
    }

    let (mut lowest, mut highest) = (x, x);
    for _ in 0..90 {
        x += boss.tick(FRAME, x, 0.0, &BOUNDS).velocity_x * FRAME;
        lowest = lowest.min(x);
        highest = highest.max(x);
    }
    assert!(highest > 5.8 && highest <= 6.0 + 1e-3, "highest {}", highest);
    assert!(lowest < -5.8 && lowest >= -6.0 - 1e-3, "lowest {}", lowest);
}

#[test]
fn test_arena_death_sequence_runs_once() {
    let (mut boss, _) = arena_boss();
    let mut health = Health { current: 1, max: 40 };
    assert_eq!(boss.take_damage(&mut health, 1, 0.0, &BOUNDS), DamageOutcome::Killed);
    assert_eq!(boss.take_damage(&mut health, 1, 0.0, &BOUNDS), DamageOutcome::Ignored);

    assert!(!boss.tick(1.0, 0.0, 0.0, &BOUNDS).defeated);
    assert!(boss.tick(1.1, 0.0, 0.0, &BOUNDS).defeated);
    assert!(boss.tick(1.1, 0.0, 0.0, &BOUNDS).disabled);
    assert!(!boss.enabled);
    assert_eq!(boss.tick(5.0, 0.0, 0.0, &BOUNDS), ArenaBossOutput::default());
}

#[test]
fn test_player_death_heals_arena_boss_up_to_max() {
    let (boss, _) = arena_boss();
    let mut health = Health { current: 35, max: 40 };
    assert_eq!(boss.on_player_died(&mut health), 5);
    assert_eq!(health.current, 40);
}

// -----------------------------------------------------------------------------
// Headless app: projectile contacts
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct DamageLog(Vec<DamageEvent>);

fn log_damage(mut damage: MessageReader<DamageEvent>, mut log: ResMut<DamageLog>) {
    log.0.extend(damage.read().copied());
}

fn contact_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<DamageLog>()
        .add_message::<CollisionStart>()
        .add_message::<DamageEvent>()
        .add_systems(Update, (resolve_projectile_contacts, log_damage).chain());
    app
}

fn spawn_projectile(app: &mut App, damage: u32) -> Entity {
    let world = app.world_mut();
    let owner = world.spawn_empty().id();
    world
        .spawn((
            Projectile {
                kind: ProjectileKind::Spike,
                age: 0.0,
                lifetime: 5.0,
                spent: false,
                stops_on_terrain: true,
                motion: ProjectileMotion::Ballistic,
            },
            Hitbox::new(owner, damage, ProbeShape::Circle { radius: 0.2 }),
            Team::Enemy,
            Transform::from_xyz(1.0, 0.0, 0.0),
        ))
        .id()
}

fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

#[test]
fn test_projectile_damages_first_target_once() {
    let mut app = contact_app();
    let spike = spawn_projectile(&mut app, 2);
    let player = app
        .world_mut()
        .spawn((Damageable::BY_ENEMY, Hurtbox::default()))
        .id();
    let escort = app
        .world_mut()
        .spawn((Damageable::BY_ENEMY, Hurtbox::default()))
        .id();

    touch(&mut app, spike, player);
    touch(&mut app, player, spike);
    app.update();
    touch(&mut app, escort, spike);
    app.update();

    let log = &app.world().resource::<DamageLog>().0;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].target, player);
    assert_eq!(log[0].amount, 2);
    assert_eq!(log[0].origin, Vec2::new(1.0, 0.0));
    assert!(app.world().get::<Projectile>(spike).unwrap().spent);
}

#[test]
fn test_projectile_passes_closed_hurtbox_and_stops_on_terrain() {
    let mut app = contact_app();
    let spike = spawn_projectile(&mut app, 1);
    let dead = app
        .world_mut()
        .spawn((Damageable::BY_ENEMY, Hurtbox { enabled: false }))
        .id();
    let wall = app.world_mut().spawn(Terrain).id();

    touch(&mut app, spike, dead);
    app.update();
    assert!(!app.world().get::<Projectile>(spike).unwrap().spent);

    touch(&mut app, wall, spike);
    app.update();
    assert!(app.world().get::<Projectile>(spike).unwrap().spent);
    assert!(app.world().resource::<DamageLog>().0.is_empty());
}

#[test]
fn test_harmless_bomb_is_spent_without_damage() {
    let mut app = contact_app();
    let bomb = spawn_projectile(&mut app, 0);
    let player = app
        .world_mut()
        .spawn((Damageable::BY_ENEMY, Hurtbox::default()))
        .id();

    touch(&mut app, bomb, player);
    app.update();
    assert!(app.world().get::<Projectile>(bomb).unwrap().spent);
    assert!(app.world().resource::<DamageLog>().0.is_empty());
}

// -----------------------------------------------------------------------------
// Headless app: the arena boss spin region
// -----------------------------------------------------------------------------

fn spin_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
        .add_message::<DamageEvent>()
        .add_message::<DeathEvent>()
        .add_message::<BossDefeatedEvent>()
        .add_message::<SpawnProjectile>()
        .add_message::<PlayAnimation>()
        .add_message::<PlaySound>()
        .add_message::<NotifyUi>()
        .add_systems(Update, (think_arena_bosses, arena_boss_take_hits).chain());

    app.world_mut().spawn((Player, Transform::from_xyz(2.0, 0.0, 0.0)));

    let tuning = ArenaBossTuning::default();
    let mut boss = ArenaBoss::new(tuning.clone());
    boss.activate();
    boss.spin.reset();
    let entity = app.world_mut().spawn_empty().id();
    app.world_mut().entity_mut(entity).insert((
        boss,
        Health::new(tuning.max_health),
        Hurtbox::default(),
        BOUNDS,
        Transform::default(),
        LinearVelocity::default(),
        Hitbox::new(entity, tuning.spin_damage, ProbeShape::Circle { radius: 1.2 }).dormant(),
        Sprite::default(),
    ));
    (app, entity)
}

fn run_until_spinning(app: &mut App, boss: Entity) {
    for _ in 0..20 {
        app.update();
        if app.world().get::<ArenaBoss>(boss).unwrap().state == ArenaBossState::Spinning {
            break;
        }
    }
    assert_eq!(
        app.world().get::<ArenaBoss>(boss).unwrap().state,
        ArenaBossState::Spinning
    );
    assert!(app.world().get::<Hitbox>(boss).unwrap().enabled);
}

#[test]
fn test_spin_region_closes_when_spin_ends() {
    let (mut app, boss) = spin_app();
    run_until_spinning(&mut app, boss);

    for _ in 0..60 {
        app.update();
        if app.world().get::<ArenaBoss>(boss).unwrap().state != ArenaBossState::Spinning {
            break;
        }
    }
    assert_ne!(
        app.world().get::<ArenaBoss>(boss).unwrap().state,
        ArenaBossState::Spinning
    );
    assert!(!app.world().get::<Hitbox>(boss).unwrap().enabled);
}

#[test]
fn test_spin_region_closes_on_hit_mid_spin() {
    let (mut app, boss) = spin_app();
    run_until_spinning(&mut app, boss);

    app.world_mut().write_message(DamageEvent {
        source: boss,
        target: boss,
        amount: 1,
        kind: HitKind::Strike,
        origin: Vec2::ZERO,
    });
    app.update();
    assert_eq!(
        app.world().get::<ArenaBoss>(boss).unwrap().state,
        ArenaBossState::Fleeing
    );
    assert!(!app.world().get::<Hitbox>(boss).unwrap().enabled);

    app.update();
    assert!(!app.world().get::<Hitbox>(boss).unwrap().enabled);
}
