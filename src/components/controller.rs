// src/components/controller.rs

use serde::{Deserialize, Serialize};

use crate::ecs::entity::Entity;

/// 押されっぱなしのボタンの状態。入力イベントで更新されるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// 押されてる方向から (-1..=1, -1..=1) の軸値を作る。
    pub fn axis(&self) -> (f32, f32) {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        (x, y)
    }
}

/// プレイヤー側のセッション状態 (残機・スコア・入力)。セッションに1つだけ！
///
/// プレイヤーキャラのエンティティは死ぬたびに作り直されるけど、こっちは生き残る。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerController {
    pub lives: u32,
    pub score: u64,
    pub player: Option<Entity>,
    pub respawn_timer: u32,
    pub input: InputState,
    pub invulnerable_cheat: bool,
}

/// ゲーム全体の進行状態 (ウェーブ・一時停止・ゲームオーバー)。これもセッションに1つだけ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameController {
    pub wave: u32,
    pub to_spawn: u32,
    pub spawn_timer: u32,
    pub intermission: u32,
    pub paused: bool,
    pub game_over: bool,
    pub reset_requested: bool,
}
