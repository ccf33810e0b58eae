// src/session.rs

use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::components::{EventDraw, EventPlaySound, GameController, InputEvent, PlayerController};
use crate::config::SessionConfig;
use crate::ecs::{SystemContext, World};
use crate::error::GameError;
use crate::platform::FrameOutput;
use crate::prototypes;
use crate::systems::Pipeline;
use crate::tiles::TileMap;

/// ゲーム1回ぶんのセッション！🎮
///
/// World・乱数・タイルマップ・設定・tick カウンタを全部ひとりで持ってて、
/// `tick` が呼ばれるたびにシステム列を1周させる。
///
/// 1 tick の流れ:
/// 1. 入力を `EventInput` にして World に入れる
/// 2. システムを決まった順に回す
/// 3. 描画・効果音のイベントを回収する
/// 4. 残ったイベントを全部掃除する (残ってたらバグ)
/// 5. `FrameOutput` を返して tick を進める
pub struct Session {
    world: World,
    rng: ChaCha8Rng,
    tiles: TileMap,
    config: SessionConfig,
    tick: u64,
    pipeline: Pipeline,
}

/// セッションの状態を丸ごと写し取ったもの。tick の合間に取るのでイベントは含まれない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub rng: ChaCha8Rng,
    pub world: World,
    pub config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let tiles = config.tile_map()?;
        let world = new_world(&config)?;
        info!(
            "Session: new game (seed {:#x}, {}x{} arena)",
            config.seed,
            tiles.cols(),
            tiles.rows()
        );
        Ok(Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tiles,
            config,
            tick: 0,
            pipeline: Pipeline::standard(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// これまでに進んだ tick 数。
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn score(&self) -> u64 {
        self.world
            .singleton::<PlayerController>()
            .map_or(0, |(_, pc)| pc.score)
    }

    pub fn lives(&self) -> u32 {
        self.world
            .singleton::<PlayerController>()
            .map_or(0, |(_, pc)| pc.lives)
    }

    pub fn wave(&self) -> u32 {
        self.world
            .singleton::<GameController>()
            .map_or(0, |(_, gc)| gc.wave)
    }

    pub fn is_game_over(&self) -> bool {
        self.world
            .singleton::<GameController>()
            .is_some_and(|(_, gc)| gc.game_over)
    }

    /// 1 tick 進める。
    pub fn tick(&mut self, inputs: &[InputEvent]) -> FrameOutput {
        for (order, input) in inputs.iter().enumerate() {
            if let Err(err) = prototypes::event_input(&mut self.world, *input, order as u32) {
                warn!("Session: dropped input {:?}: {}", input, err);
            }
        }

        let mut ctx = SystemContext {
            rng: &mut self.rng,
            tiles: &self.tiles,
            config: &self.config,
            tick: self.tick,
        };
        self.pipeline.run(&mut self.world, &mut ctx);

        let draws: Vec<EventDraw> = self.world.take_events::<EventDraw>();
        let sounds = self
            .world
            .take_events::<EventPlaySound>()
            .into_iter()
            .map(|event| event.sound)
            .collect();

        let leaked = self.world.drain_events();
        if leaked > 0 {
            error!("Session: {} event components left over at tick {}", leaked, self.tick);
        }
        debug_assert_eq!(leaked, 0, "every event must be consumed within its tick");

        let output = FrameOutput::new(self.tick, draws, sounds);
        self.tick += 1;

        let reset = self
            .world
            .singleton::<GameController>()
            .is_some_and(|(_, gc)| gc.reset_requested);
        if reset {
            self.reset();
        }
        output
    }

    /// World を作り直して最初から。乱数はそのまま続きを使うよ。
    pub fn reset(&mut self) {
        match new_world(&self.config) {
            Ok(world) => {
                info!("Session: reset at tick {}", self.tick);
                self.world = world;
            }
            Err(err) => error!("Session: reset failed: {}", err),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            rng: self.rng.clone(),
            world: self.world.clone(),
            config: self.config.clone(),
        }
    }

    pub fn restore(snapshot: Snapshot) -> Result<Self, GameError> {
        let tiles = snapshot.config.tile_map()?;
        info!("Session: restored at tick {}", snapshot.tick);
        Ok(Self {
            world: snapshot.world,
            rng: snapshot.rng,
            tiles,
            config: snapshot.config,
            tick: snapshot.tick,
            pipeline: Pipeline::standard(),
        })
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::restore(snapshot)
    }
}

fn new_world(config: &SessionConfig) -> Result<World, GameError> {
    let mut world = World::with_capacity(config.max_entities);
    prototypes::game_controller(&mut world)?;
    prototypes::player_controller(&mut world, config.starting_lives)?;
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::config::tuning::{PICKUP_DURATION, WAVE_BASE_MONSTERS};

    fn session() -> Session {
        Session::new(SessionConfig::default()).unwrap()
    }

    #[test]
    fn first_tick_spawns_the_player_and_draws_it() {
        let mut session = session();
        let output = session.tick(&[]);
        assert_eq!(output.tick, 0);
        assert_eq!(session.tick_count(), 1);
        assert!(output.draws.iter().any(|d| d.graphic == Graphic::Player));
        assert_eq!(session.lives(), SessionConfig::default().starting_lives);
    }

    #[test]
    fn no_event_survives_a_tick() {
        let mut session = session();
        let inputs = [
            InputEvent::Move { dir: Direction::Left, pressed: true },
            InputEvent::Fire { pressed: true },
        ];
        for _ in 0..600 {
            session.tick(&inputs);
            assert_eq!(session.world().event_count(), 0);
        }
    }

    #[test]
    fn pickup_expires_after_its_timer() {
        let mut session = session();
        let pickup = prototypes::pickup(session.world_mut(), 48.0, 48.0, PickupKind::Points, PICKUP_DURATION).unwrap();

        for _ in 0..PICKUP_DURATION - 1 {
            session.tick(&[]);
        }
        assert_eq!(session.world().get_component::<Pickup>(pickup).map(|p| p.timer), Some(1));

        let output = session.tick(&[]);
        assert!(!session.world().is_entity_alive(pickup));
        assert!(!output.sounds.contains(&Sound::Pickup), "拾われたんじゃなくて時間切れ");
    }

    #[test]
    fn pause_stops_the_simulation_but_keeps_drawing() {
        let mut session = session();
        session.tick(&[]);
        session.tick(&[InputEvent::Pause]);
        let before = session.world().singleton::<GameController>().unwrap().1;
        assert!(before.paused);

        let output = session.tick(&[]);
        let after = session.world().singleton::<GameController>().unwrap().1;
        assert_eq!(before.intermission, after.intermission);
        assert!(!output.draws.is_empty());
    }

    #[test]
    fn reset_starts_over() {
        let mut session = session();
        for _ in 0..120 {
            session.tick(&[]);
        }
        assert_eq!(session.wave(), 1);

        session.tick(&[InputEvent::Reset]);
        assert_eq!(session.wave(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.world().iter::<Monster>().next().is_none());
    }

    #[test]
    fn restored_snapshot_replays_identically() {
        let script = |t: u64| -> Vec<InputEvent> {
            match t % 40 {
                0 => vec![InputEvent::Move { dir: Direction::Up, pressed: true }, InputEvent::Fire { pressed: true }],
                10 => vec![InputEvent::Move { dir: Direction::Up, pressed: false }],
                20 => vec![InputEvent::Move { dir: Direction::Right, pressed: true }],
                30 => vec![InputEvent::Move { dir: Direction::Right, pressed: false }, InputEvent::Fire { pressed: false }],
                _ => Vec::new(),
            }
        };

        let mut original = session();
        for t in 0..300 {
            original.tick(&script(t));
        }

        let json = original.to_json().unwrap();
        let mut restored = Session::from_json(&json).unwrap();
        assert_eq!(restored.tick_count(), 300);

        for t in 300..600 {
            let a = original.tick(&script(t));
            let b = restored.tick(&script(t));
            assert_eq!(a, b, "tick {} の出力がずれた", t);
        }
        assert_eq!(original.to_json().unwrap(), restored.to_json().unwrap());
    }

    #[test]
    fn spawned_monsters_walk_away_from_their_spawn_point() {
        use std::collections::HashMap;

        let mut session = session();
        // モンスターごとに (出てきた tick, 出てきた位置, 動いたか)
        let mut seen: HashMap<crate::ecs::Entity, (u64, Transform, bool)> = HashMap::new();
        for _ in 0..1200 {
            session.tick(&[]);
            let now = session.tick_count();
            for (entity, (_, transform)) in session.world().iter::<(Monster, Transform)>() {
                let entry = seen.entry(entity).or_insert((now, transform, false));
                if entry.1 != transform {
                    entry.2 = true;
                }
            }
        }

        assert!(seen.len() >= WAVE_BASE_MONSTERS as usize, "ウェーブ1のモンスターが揃ってない");
        for (entity, (born, spawn, moved)) in &seen {
            if session.tick_count() - born >= 30 {
                assert!(*moved, "{} が ({}, {}) から一歩も動いてない", entity, spawn.x, spawn.y);
            }
        }
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = session();
        let mut b = session();
        for _ in 0..400 {
            assert_eq!(a.tick(&[]), b.tick(&[]));
        }
    }

    #[test]
    fn broken_arena_fails_to_start() {
        let config = SessionConfig {
            arena: vec!["##".into(), "#".into()],
            ..SessionConfig::default()
        };
        assert!(matches!(Session::new(config), Err(GameError::InvalidArena(_))));
    }
}
