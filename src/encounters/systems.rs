//! Encounters domain: arena entry and boss defeat handling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{BossActivated, BossDefeatedEvent};
use crate::core::{NotifyUi, PlaySound, UiEvent};
use crate::encounters::{BossArenaTrigger, BossReward};
use crate::player::systems::player_pair;
use crate::player::{Player, spawn_pickup};

pub(crate) fn trigger_boss_arenas(
    mut collisions: MessageReader<CollisionStart>,
    mut activations: MessageWriter<BossActivated>,
    mut sounds: MessageWriter<PlaySound>,
    mut ui: MessageWriter<NotifyUi>,
    players: Query<(), With<Player>>,
    mut triggers: Query<&mut BossArenaTrigger>,
) {
    for event in collisions.read() {
        let Some((_, zone)) = player_pair(event, &players) else {
            continue;
        };
        let Ok(mut trigger) = triggers.get_mut(zone) else {
            continue;
        };
        if !trigger.fire() {
            trace!("Arena for {} already triggered", trigger.name);
            continue;
        }

        info!("Player entered the arena of {}", trigger.name);
        activations.write(BossActivated { boss: trigger.boss });
        sounds.write(PlaySound { clip: "boss_theme" });
        ui.write(NotifyUi(UiEvent::BossRevealed {
            name: trigger.name.clone(),
        }));
    }
}

pub(crate) fn reward_boss_defeats(
    mut commands: Commands,
    mut defeats: MessageReader<BossDefeatedEvent>,
    mut ui: MessageWriter<NotifyUi>,
    triggers: Query<(Entity, &BossArenaTrigger, Option<&BossReward>)>,
) {
    for event in defeats.read() {
        ui.write(NotifyUi(UiEvent::Objective {
            text: format!("{} defeated", event.name),
        }));

        let Some((entity, _, reward)) = triggers
            .iter()
            .find(|(_, trigger, _)| trigger.boss == event.boss)
        else {
            continue;
        };
        if let Some(reward) = reward {
            info!("{} dropped {:?}", event.name, reward.kind);
            spawn_pickup(&mut commands, reward.kind, reward.drop_at);
            commands.entity(entity).remove::<BossReward>();
        }
    }
}
