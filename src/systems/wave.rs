// src/systems/wave.rs

use log::{debug, info, warn};
use rand::Rng;

use crate::components::*;
use crate::config::tuning::*;
use crate::ecs::{Entity, System, SystemContext, World};
use crate::prototypes;
use crate::systems::spawned;

/// ウェーブの進行とモンスターの出現を担当するシステム。
///
/// 休憩 (`intermission`) が終わったら次のウェーブ開始 → 決まった間隔でモンスターを1体ずつ出す
/// → 全部出し切って全滅させたらまた休憩、の繰り返し。
pub struct WaveSystem;

impl System for WaveSystem {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        let Some((gc_entity, mut gc)) = world.singleton::<GameController>() else {
            return;
        };
        if gc.game_over {
            return;
        }

        if gc.intermission > 0 {
            gc.intermission -= 1;
            if gc.intermission == 0 {
                start_wave(world, &mut gc);
            }
        } else if gc.to_spawn > 0 {
            if gc.spawn_timer > 0 {
                gc.spawn_timer -= 1;
            } else {
                spawn_monster(world, ctx, gc.wave);
                gc.to_spawn -= 1;
                gc.spawn_timer = WAVE_SPAWN_INTERVAL;
            }
        } else if world.iter::<Monster>().next().is_none() {
            debug!("WaveSystem: wave {} cleared", gc.wave);
            gc.intermission = WAVE_INTERMISSION;
        }

        if let Some(slot) = world.get_component_mut::<GameController>(gc_entity) {
            *slot = gc;
        }
    }
}

/// このウェーブで出てくるモンスターの数。
pub fn wave_size(wave: u32) -> u32 {
    WAVE_BASE_MONSTERS + WAVE_MONSTER_STEP * wave.saturating_sub(1)
}

fn start_wave(world: &mut World, gc: &mut GameController) {
    gc.wave += 1;
    gc.to_spawn = wave_size(gc.wave);
    gc.spawn_timer = 0;
    info!("WaveSystem: wave {} starts ({} monsters)", gc.wave, gc.to_spawn);

    // 前のウェーブの死体は片付ける
    let corpses: Vec<Entity> = world.iter::<Corpse>().map(|(e, _)| e).collect();
    for corpse in corpses {
        world.destroy_entity(corpse);
    }
    spawned("WaveSystem", prototypes::event_sound(world, Sound::WaveStart));
}

fn spawn_monster(world: &mut World, ctx: &mut SystemContext<'_>, wave: u32) {
    // 種類を先に決める。大きいやつは壁に刺さらない場所にしか出せないので
    let kind = if wave >= 2 && ctx.rng.gen_bool(SQUID_CHANCE) {
        MonsterKind::Squid
    } else {
        MonsterKind::Spider
    };
    let size = prototypes::monster_hitbox(kind);
    let points = ctx.tiles.spawn_points(size, size);
    if points.is_empty() {
        warn!("WaveSystem: no room for a {:?} in this arena", kind);
        return;
    }

    // プレイヤーの目の前には出さない (候補がなくなるなら全部から選ぶ)
    let player = world
        .iter::<(Player, Transform)>()
        .next()
        .map(|(_, (_, t))| t);
    let min_dist = TILE_SIZE * 4.0;
    let far: Vec<(f32, f32)> = points
        .iter()
        .copied()
        .filter(|(x, y)| {
            player.map_or(true, |p| p.distance_sq(&Transform::new(*x, *y)) >= min_dist * min_dist)
        })
        .collect();
    let candidates = if far.is_empty() { &points } else { &far };
    let (x, y) = candidates[ctx.rng.gen_range(0..candidates.len())];

    if let Some(monster) = spawned("WaveSystem", prototypes::monster(world, &mut *ctx.rng, kind, x, y)) {
        debug!("WaveSystem: {:?} {} at ({}, {})", kind, monster, x, y);
    }
}
