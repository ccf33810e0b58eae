// src/components/events.rs
//! イベントコンポーネントたち！ 1tick の中だけ生きるメッセージだよ。
//!
//! どれも専用のエンティティに単独で付けられて、後ろのシステムが種類ごとに
//! 取り出して (= エンティティごと消して) 処理する。tick の終わりには1個も残らない。

use serde::{Deserialize, Serialize};

use crate::components::drawable::{Graphic, Orientation};
use crate::components::items::PickupKind;
use crate::components::physics::Direction;
use crate::ecs::entity::Entity;

/// チート入力。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cheat {
    Invulnerable,
    MaxPower,
    SkipWave,
}

/// プラットフォーム層が翻訳済みの入力イベント。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Move { dir: Direction, pressed: bool },
    Fire { pressed: bool },
    Pause,
    Reset,
    Cheat(Cheat),
}

/// 鳴らしてほしい効果音。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    PlayerShoot,
    MonsterShoot,
    Hit,
    MonsterDeath,
    PlayerDeath,
    Pickup,
    ExtraLife,
    WaveStart,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub input: InputEvent,
    /// その tick の中での入力順。スロットは再利用されるので、並び順はこれで決める。
    pub order: u32,
}

/// 2つの物理オブジェクトが重なった。`a.index < b.index` の順で入ってるよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventCollide {
    pub a: Entity,
    pub b: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventConferBonus {
    pub player: Entity,
    pub kind: PickupKind,
}

/// 得点を `controller` (PlayerController) に加算してね、というお知らせ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventAwardPoints {
    pub controller: Option<Entity>,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventTakeDamage {
    pub target: Entity,
    pub damage: i32,
    pub inflictor: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPlayerDied {
    pub player: Entity,
}

/// 描画コマンド1つぶん。プラットフォームの描画シンクにそのまま渡る。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventDraw {
    pub x: f32,
    pub y: f32,
    pub graphic: Graphic,
    pub frame: u32,
    pub orientation: Orientation,
    pub z: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlaySound {
    pub sound: Sound,
}
