// src/systems/input.rs

use log::{debug, info};

use crate::components::*;
use crate::config::tuning::{MAX_ATTACK_LEVEL, MAX_SPEED_LEVEL, PLAYER_BASE_SPEED, PLAYER_SPEED_STEP};
use crate::ecs::{Entity, System, SystemContext, World};

/// 入力イベントを読んで、コントローラーの状態に反映するシステム。
///
/// 移動・射撃はボタンの押しっぱなし状態 (`InputState`) を更新するだけ。
/// 一時停止・リセット・チートはここで直接処理するよ。
pub struct InputSystem;

impl System for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn runs_while_paused(&self) -> bool {
        true
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        let mut events = world.take_events::<EventInput>();
        events.sort_by_key(|event| event.order);

        for event in events {
            match event.input {
                InputEvent::Move { dir, pressed } => update_input(world, |input| match dir {
                    Direction::Up => input.up = pressed,
                    Direction::Down => input.down = pressed,
                    Direction::Left => input.left = pressed,
                    Direction::Right => input.right = pressed,
                }),
                InputEvent::Fire { pressed } => update_input(world, |input| input.fire = pressed),
                InputEvent::Pause => toggle_pause(world),
                InputEvent::Reset => {
                    if let Some(gc) = game_controller_mut(world) {
                        gc.reset_requested = true;
                        info!("InputSystem: reset requested");
                    }
                }
                InputEvent::Cheat(cheat) => apply_cheat(world, cheat),
            }
        }
    }
}

fn update_input<F: FnOnce(&mut InputState)>(world: &mut World, f: F) {
    if let Some((entity, _)) = world.singleton::<PlayerController>() {
        if let Some(pc) = world.get_component_mut::<PlayerController>(entity) {
            f(&mut pc.input);
        }
    }
}

fn game_controller_mut(world: &mut World) -> Option<&mut GameController> {
    let (entity, _) = world.singleton::<GameController>()?;
    world.get_component_mut::<GameController>(entity)
}

fn toggle_pause(world: &mut World) {
    if let Some(gc) = game_controller_mut(world) {
        // ゲームオーバー中は止めても意味がない
        if gc.game_over {
            return;
        }
        gc.paused = !gc.paused;
        info!("InputSystem: paused = {}", gc.paused);
    }
}

fn apply_cheat(world: &mut World, cheat: Cheat) {
    debug!("InputSystem: cheat {:?}", cheat);
    match cheat {
        Cheat::Invulnerable => {
            if let Some((entity, _)) = world.singleton::<PlayerController>() {
                if let Some(pc) = world.get_component_mut::<PlayerController>(entity) {
                    pc.invulnerable_cheat = !pc.invulnerable_cheat;
                }
            }
        }
        Cheat::MaxPower => {
            if let Some(player) = current_player(world) {
                if let Some(p) = world.get_component_mut::<Player>(player) {
                    p.attack_level = MAX_ATTACK_LEVEL;
                    p.speed_level = MAX_SPEED_LEVEL;
                }
                if let Some(creature) = world.get_component_mut::<Creature>(player) {
                    creature.speed = PLAYER_BASE_SPEED + PLAYER_SPEED_STEP * f32::from(MAX_SPEED_LEVEL);
                }
            }
        }
        Cheat::SkipWave => {
            // 残りのモンスターを全部片付けて、出現待ちも0にする。次の tick でウェーブが終わる
            let monsters: Vec<Entity> = world.iter::<Monster>().map(|(e, _)| e).collect();
            for monster in monsters {
                world.destroy_entity(monster);
            }
            if let Some(gc) = game_controller_mut(world) {
                gc.to_spawn = 0;
            }
        }
    }
}

fn current_player(world: &World) -> Option<Entity> {
    let (_, pc) = world.singleton::<PlayerController>()?;
    pc.player.filter(|player| world.is_entity_alive(*player))
}
