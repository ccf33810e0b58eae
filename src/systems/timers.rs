// src/systems/timers.rs

use log::debug;

use crate::components::*;
use crate::ecs::system::for_each;
use crate::ecs::{System, SystemContext, World};

/// 時間で変わるものをまとめて進めるシステム。
/// 無敵時間のカウントダウン、アイテムの消滅、アニメーションのコマ送り。
pub struct TimerSystem;

impl System for TimerSystem {
    fn name(&self) -> &'static str {
        "timers"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        for_each::<Creature, _>(world, ctx, |world, _, entity, creature| {
            if creature.invuln_timer > 0 {
                if let Some(c) = world.get_component_mut::<Creature>(entity) {
                    c.invuln_timer -= 1;
                }
            }
            true
        });

        for_each::<Pickup, _>(world, ctx, |world, _, entity, pickup| {
            let timer = pickup.timer.saturating_sub(1);
            if timer == 0 {
                debug!("TimerSystem: {:?} {} expired", pickup.kind, entity);
                world.destroy_entity(entity);
            } else if let Some(p) = world.get_component_mut::<Pickup>(entity) {
                p.timer = timer;
            }
            true
        });

        for_each::<Animation, _>(world, ctx, |world, _, entity, mut animation| {
            if animation.advance() {
                world.destroy_entity(entity);
            } else if let Some(a) = world.get_component_mut::<Animation>(entity) {
                *a = animation;
            }
            true
        });
    }
}
