// src/systems/player.rs

use log::info;

use crate::components::*;
use crate::config::tuning::*;
use crate::ecs::{Entity, System, SystemContext, World};
use crate::prototypes::{self, BulletSpec};
use crate::systems::spawned;

/// プレイヤーの操作 (移動・射撃) と、やられた後の復活を担当するシステム。
pub struct PlayerSystem;

impl System for PlayerSystem {
    fn name(&self) -> &'static str {
        "player"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        let Some((pc_entity, mut pc)) = world.singleton::<PlayerController>() else {
            return;
        };
        let game_over = world
            .singleton::<GameController>()
            .is_some_and(|(_, gc)| gc.game_over);

        let alive = pc.player.filter(|player| world.is_entity_alive(*player));
        match alive {
            Some(player) => steer_and_fire(world, player, pc_entity, &pc),
            None if !game_over && pc.lives > 0 => {
                pc.player = None;
                if pc.respawn_timer > 0 {
                    pc.respawn_timer -= 1;
                } else {
                    let (x, y) = ctx.tiles.center();
                    if let Some(player) = spawned("PlayerSystem", prototypes::player(world, x, y)) {
                        info!("PlayerSystem: player spawned as {} ({} lives)", player, pc.lives);
                        pc.player = Some(player);
                    }
                }
            }
            None => pc.player = None,
        }

        if let Some(slot) = world.get_component_mut::<PlayerController>(pc_entity) {
            *slot = pc;
        }
    }
}

fn steer_and_fire(world: &mut World, player: Entity, pc_entity: Entity, pc: &PlayerController) {
    let (Some(transform), Some(creature), Some(mut stats)) = (
        world.get_component::<Transform>(player).copied(),
        world.get_component::<Creature>(player).copied(),
        world.get_component::<Player>(player).copied(),
    ) else {
        return;
    };

    // --- 移動 ---
    let (ax, ay) = pc.input.axis();
    let mut facing = Direction::Up;
    if let Some(phys) = world.get_component_mut::<PhysObject>(player) {
        phys.vx = ax * creature.speed;
        phys.vy = ay * creature.speed;
        if let Some(dir) = Direction::from_velocity(ax, ay) {
            phys.facing = dir;
        }
        facing = phys.facing;
    }

    // --- 射撃 ---
    if stats.shoot_cooldown > 0 {
        stats.shoot_cooldown -= 1;
    }
    if pc.input.fire && stats.shoot_cooldown == 0 && live_bullets(world, player) < usize::from(stats.max_bullets) {
        let cluster = stats.attack_level + 1;
        let spec = BulletSpec {
            x: transform.x,
            y: transform.y,
            dir: facing,
            speed: PLAYER_BULLET_SPEED,
            owner: player,
            from_monster: false,
            cluster,
            damage: BULLET_DAMAGE * i32::from(cluster),
            inflictor: Some(pc_entity),
        };
        if spawned("PlayerSystem", prototypes::bullet(world, spec)).is_some() {
            spawned("PlayerSystem", prototypes::event_sound(world, Sound::PlayerShoot));
            stats.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
        }
    }

    if let Some(slot) = world.get_component_mut::<Player>(player) {
        *slot = stats;
    }
}

/// `player` が撃って、まだ飛んでる弾の数。
fn live_bullets(world: &World, player: Entity) -> usize {
    world
        .iter::<(Bullet, PhysObject)>()
        .filter(|(_, (_, phys))| phys.owner == Some(player))
        .count()
}
