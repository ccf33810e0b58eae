// src/systems/combat.rs
//! 衝突 → ダメージ → ボーナス → 得点 → プレイヤー死亡、の戦闘まわりのシステムたち。
//! どれも前のシステムが出したイベントを取り出して処理するだけだよ。

use log::{debug, info, warn};
use rand::Rng;

use crate::components::*;
use crate::config::tuning::*;
use crate::ecs::{ComponentKind, Entity, System, SystemContext, World};
use crate::prototypes;
use crate::systems::spawned;

/// `EventCollide` を見て、何と何がぶつかったかで振り分ける。
///
/// - 弾 × 生き物 → `EventTakeDamage` を出して弾は消える
/// - プレイヤー × アイテム → `EventConferBonus` を出してアイテムは消える
/// - それ以外 (ただ触れただけ) → 何もしない
pub struct CollisionResponseSystem;

impl System for CollisionResponseSystem {
    fn name(&self) -> &'static str {
        "collision_response"
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        for EventCollide { a, b } in world.take_events::<EventCollide>() {
            if !respond(world, a, b) {
                respond(world, b, a);
            }
        }
    }
}

/// `first` を弾 (またはプレイヤー) として扱ってみる。処理したら true。
fn respond(world: &mut World, first: Entity, second: Entity) -> bool {
    // 同じ tick の前のペアで消えてたら何もしない
    if !world.is_entity_alive(first) || !world.is_entity_alive(second) {
        return true;
    }

    if let Some(bullet) = world.get_component::<Bullet>(first).copied() {
        if world.has_component(second, ComponentKind::Creature) {
            spawned(
                "CollisionResponseSystem",
                prototypes::event_take_damage(world, second, bullet.damage, bullet.inflictor),
            );
            world.destroy_entity(first);
            return true;
        }
    }

    if world.has_component(first, ComponentKind::Player) {
        if let Some(pickup) = world.get_component::<Pickup>(second).copied() {
            spawned("CollisionResponseSystem", prototypes::event_confer_bonus(world, first, pickup.kind));
            spawned("CollisionResponseSystem", prototypes::event_sound(world, Sound::Pickup));
            world.destroy_entity(second);
            return true;
        }
    }

    false
}

/// `EventTakeDamage` で体力を減らす。0 以下になったら倒れる。
///
/// 無敵中 (出現直後・被弾直後・チート) のダメージは無視。
/// モンスターが倒れたら得点イベント・死体・爆発、たまにアイテムを落とす。
/// プレイヤーが倒れたら `EventPlayerDied` を出す。
pub struct DamageSystem;

impl System for DamageSystem {
    fn name(&self) -> &'static str {
        "damage"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        let cheat = world
            .singleton::<PlayerController>()
            .is_some_and(|(_, pc)| pc.invulnerable_cheat);

        for hit in world.take_events::<EventTakeDamage>() {
            let Some(mut creature) = world.get_component::<Creature>(hit.target).copied() else {
                continue;
            };
            let is_player = world.has_component(hit.target, ComponentKind::Player);
            if creature.is_invulnerable() || (is_player && cheat) {
                continue;
            }

            creature.hp -= hit.damage;
            spawned("DamageSystem", prototypes::event_sound(world, Sound::Hit));

            if creature.hp > 0 {
                if is_player {
                    creature.invuln_timer = PLAYER_HIT_INVULN;
                }
                if let Some(slot) = world.get_component_mut::<Creature>(hit.target) {
                    *slot = creature;
                }
                continue;
            }

            let Some(at) = world.get_component::<Transform>(hit.target).copied() else {
                world.destroy_entity(hit.target);
                continue;
            };
            spawned("DamageSystem", prototypes::explosion(world, at.x, at.y));

            if is_player {
                debug!("DamageSystem: player {} down", hit.target);
                spawned("DamageSystem", prototypes::event_sound(world, Sound::PlayerDeath));
                spawned("DamageSystem", prototypes::event_player_died(world, hit.target));
            } else if let Some(monster) = world.get_component::<Monster>(hit.target).copied() {
                spawned("DamageSystem", prototypes::event_sound(world, Sound::MonsterDeath));
                spawned("DamageSystem", prototypes::event_award_points(world, hit.inflictor, monster.points));
                spawned("DamageSystem", prototypes::corpse(world, at.x, at.y));
                if ctx.rng.gen_range(0..100) < PICKUP_DROP_PERCENT {
                    let kind = PickupKind::ALL[ctx.rng.gen_range(0..PickupKind::ALL.len())];
                    spawned("DamageSystem", prototypes::pickup(world, at.x, at.y, kind, PICKUP_DURATION));
                }
            }
            world.destroy_entity(hit.target);
        }
    }
}

/// `EventConferBonus` でアイテムの効果をプレイヤーに与える。
pub struct BonusSystem;

impl System for BonusSystem {
    fn name(&self) -> &'static str {
        "bonus"
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        for bonus in world.take_events::<EventConferBonus>() {
            match bonus.kind {
                PickupKind::AttackUp => {
                    if let Some(p) = world.get_component_mut::<Player>(bonus.player) {
                        p.attack_level = (p.attack_level + 1).min(MAX_ATTACK_LEVEL);
                    }
                }
                PickupKind::SpeedUp => {
                    let Some(level) = world.get_component_mut::<Player>(bonus.player).map(|p| {
                        p.speed_level = (p.speed_level + 1).min(MAX_SPEED_LEVEL);
                        p.speed_level
                    }) else {
                        continue;
                    };
                    if let Some(c) = world.get_component_mut::<Creature>(bonus.player) {
                        c.speed = PLAYER_BASE_SPEED + PLAYER_SPEED_STEP * f32::from(level);
                    }
                }
                PickupKind::ExtraLife => {
                    if let Some((pc_entity, _)) = world.singleton::<PlayerController>() {
                        if let Some(pc) = world.get_component_mut::<PlayerController>(pc_entity) {
                            pc.lives += 1;
                        }
                        spawned("BonusSystem", prototypes::event_sound(world, Sound::ExtraLife));
                    }
                }
                PickupKind::Points => {
                    let controller = world.singleton::<PlayerController>().map(|(e, _)| e);
                    spawned("BonusSystem", prototypes::event_award_points(world, controller, PICKUP_POINTS));
                }
            }
        }
    }
}

/// `EventAwardPoints` を得点に足す。`EXTRA_LIFE_SCORE` をまたぐたびに残機 +1。
pub struct ScoringSystem;

impl System for ScoringSystem {
    fn name(&self) -> &'static str {
        "scoring"
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        for award in world.take_events::<EventAwardPoints>() {
            let Some(controller) = award.controller else {
                continue;
            };
            let Some(pc) = world.get_component_mut::<PlayerController>(controller) else {
                warn!("ScoringSystem: {} points for missing controller {}", award.points, controller);
                continue;
            };

            let before = pc.score;
            pc.score += u64::from(award.points);
            let extra = pc.score / EXTRA_LIFE_SCORE - before / EXTRA_LIFE_SCORE;
            pc.lives += extra as u32;
            for _ in 0..extra {
                spawned("ScoringSystem", prototypes::event_sound(world, Sound::ExtraLife));
            }
        }
    }
}

/// `EventPlayerDied` で残機を減らす。0 になったらゲームオーバー、まだあれば復活待ち。
pub struct PlayerDeathSystem;

impl System for PlayerDeathSystem {
    fn name(&self) -> &'static str {
        "player_death"
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        for died in world.take_events::<EventPlayerDied>() {
            let Some((pc_entity, mut pc)) = world.singleton::<PlayerController>() else {
                continue;
            };
            if pc.player != Some(died.player) {
                continue;
            }

            pc.player = None;
            pc.lives = pc.lives.saturating_sub(1);
            if pc.lives == 0 {
                info!("PlayerDeathSystem: game over (score {})", pc.score);
                if let Some((gc_entity, _)) = world.singleton::<GameController>() {
                    if let Some(gc) = world.get_component_mut::<GameController>(gc_entity) {
                        gc.game_over = true;
                    }
                }
                spawned("PlayerDeathSystem", prototypes::event_sound(world, Sound::GameOver));
            } else {
                pc.respawn_timer = RESPAWN_DELAY;
            }

            if let Some(slot) = world.get_component_mut::<PlayerController>(pc_entity) {
                *slot = pc;
            }
        }
    }
}
