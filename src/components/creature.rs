// src/components/creature.rs

use serde::{Deserialize, Serialize};

use crate::components::physics::Direction;

/// 生き物全般。体力・無敵時間・移動速度を持つよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub hp: i32,
    pub max_hp: i32,
    pub invuln_timer: u32,
    pub speed: f32,
}

impl Creature {
    pub fn new(hp: i32, speed: f32) -> Self {
        Self {
            hp,
            max_hp: hp,
            invuln_timer: 0,
            speed,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0
    }
}

/// プレイヤーキャラ固有の状態。攻撃レベル・速度レベル・連射のクールダウン。
///
/// 画面に同時に出せる弾の数 (`max_bullets`) は、生きてる弾のうち
/// 持ち主が自分のものを数えて判定するよ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub attack_level: u8,
    pub speed_level: u8,
    pub shoot_cooldown: u32,
    pub max_bullets: u8,
}

/// モンスターの性格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    /// プレイヤーを追いかける
    Chase,
    /// 気ままにうろつく
    Wander,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Spider,
    Squid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub personality: Personality,
    pub shoot_timer: u32,
    pub wander_dir: Direction,
    pub wander_timer: u32,
    pub points: u32,
}
