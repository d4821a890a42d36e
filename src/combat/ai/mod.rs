//! Combat domain: brains for minor enemies and both bosses.

pub(crate) mod arena_boss;
pub(crate) mod enemy;
pub(crate) mod teleport_boss;

pub use arena_boss::{ArenaAttack, ArenaBoss, ArenaBossOutput, ArenaBossState, ArenaBounds};
pub use enemy::{
    AttackMode, Candidate, Enemy, EnemyBrain, EnemyIntent, EnemyOutput, EnemySenses, EnemyState,
    EnemyTarget, Sighting, pick_strike_target, select_target,
};
pub use teleport_boss::{
    BossHitOutcome, BossShot, TeleportBoss, TeleportBossOutput, TeleportBossState,
    TeleportPoints, pick_teleport_point,
};

pub(crate) use arena_boss::{
    arena_boss_heal_on_player_death, arena_boss_take_hits, think_arena_bosses,
};
pub(crate) use enemy::{act_enemies, enemy_take_hits, sense_enemy_targets, think_enemies};
pub(crate) use teleport_boss::{
    teleport_boss_heal_on_player_death, teleport_boss_take_hits, think_teleport_bosses,
};
