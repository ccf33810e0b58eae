// src/components/drawable.rs

use serde::{Deserialize, Serialize};

use crate::components::physics::Direction;

/// プラットフォーム側が持ってるスプライトの識別子。ピクセルの中身はコア側では知らないよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Graphic {
    Player,
    Spider,
    Squid,
    Corpse,
    BulletSingle,
    BulletDouble,
    BulletCluster,
    MonsterBullet,
    PickupAttack,
    PickupSpeed,
    PickupLife,
    PickupPoints,
    Explosion,
}

/// スプライトの回転。素材は右向きで描かれてる前提！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    pub fn from_facing(facing: Direction) -> Self {
        match facing {
            Direction::Right => Orientation::Identity,
            Direction::Down => Orientation::Rotate90,
            Direction::Left => Orientation::Rotate180,
            Direction::Up => Orientation::Rotate270,
        }
    }
}

/// 描画できるモノに付けるコンポーネント。
///
/// `directional` が true のときだけ、`PhysObject` の向きでスプライトを回すよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawable {
    pub graphic: Graphic,
    pub z: i32,
    pub directional: bool,
}
