// src/systems/mod.rs
//! ゲームのルールを実装するシステムたち！
//!
//! 1 tick に1回、`Pipeline` が決まった順番で全部のシステムを呼ぶ。
//! システム同士はイベントコンポーネントでやりとりするので、順番がとっても大事だよ。

pub mod collision;
pub mod combat;
pub mod draw;
pub mod input;
pub mod monster;
pub mod movement;
pub mod player;
pub mod timers;
pub mod wave;

use log::warn;

use crate::components::GameController;
use crate::ecs::{EcsError, Entity, System, SystemContext, World};

pub use collision::CollisionSystem;
pub use combat::{BonusSystem, CollisionResponseSystem, DamageSystem, PlayerDeathSystem, ScoringSystem};
pub use draw::DrawSystem;
pub use input::InputSystem;
pub use monster::MonsterAiSystem;
pub use movement::MovementSystem;
pub use player::PlayerSystem;
pub use timers::TimerSystem;
pub use wave::WaveSystem;

/// システムの中でエンティティを作るとき用。
/// 上限に当たったら warn を出してその1体だけ諦める (tick は続ける)。
pub(crate) fn spawned(system: &str, result: Result<Entity, EcsError>) -> Option<Entity> {
    match result {
        Ok(entity) => Some(entity),
        Err(err) => {
            warn!("{}: spawn skipped: {}", system, err);
            None
        }
    }
}

/// 固定順のシステム列。
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
}

impl Pipeline {
    /// いつものゲームの並び。入力 → ウェーブ → 操作/AI → タイマー → 移動 → 衝突 → 戦闘 → 描画。
    pub fn standard() -> Self {
        Self {
            systems: vec![
                Box::new(InputSystem),
                Box::new(WaveSystem),
                Box::new(PlayerSystem),
                Box::new(MonsterAiSystem),
                Box::new(TimerSystem),
                Box::new(MovementSystem),
                Box::new(CollisionSystem),
                Box::new(CollisionResponseSystem),
                Box::new(DamageSystem),
                Box::new(BonusSystem),
                Box::new(ScoringSystem),
                Box::new(PlayerDeathSystem),
                Box::new(DrawSystem),
            ],
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// 全システムを1回ずつ回す。一時停止中は `runs_while_paused` なものだけ。
    ///
    /// 一時停止は入力システムが切り替えるので、システムごとに見直すよ。
    pub fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        for system in self.systems.iter_mut() {
            if is_paused(world) && !system.runs_while_paused() {
                continue;
            }
            system.run(world, ctx);
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_paused(world: &World) -> bool {
    world
        .singleton::<GameController>()
        .is_some_and(|(_, gc)| gc.paused)
}
