// src/components/physics.rs

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use crate::ecs::entity::Entity;

/// 4方向の向き。固定画面のアーケードなので斜めの「向き」は持たないよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// 画面座標 (y は下向きが正) での単位ベクトル。
    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    /// 速度ベクトルから向きを決める。大きい方の軸を優先、ゼロなら `None`。
    pub fn from_velocity(vx: f32, vy: f32) -> Option<Direction> {
        if vx == 0.0 && vy == 0.0 {
            None
        } else if vx.abs() >= vy.abs() {
            Some(if vx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if vy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// 当たり判定のカテゴリを表すビットフラグだよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysFlags(pub u32);

impl PhysFlags {
    pub const NONE: PhysFlags = PhysFlags(0);
    pub const PLAYER: PhysFlags = PhysFlags(1 << 0);
    pub const MONSTER: PhysFlags = PhysFlags(1 << 1);
    pub const BULLET: PhysFlags = PhysFlags(1 << 2);
    pub const PICKUP: PhysFlags = PhysFlags(1 << 3);

    pub fn contains(self, other: PhysFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: PhysFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for PhysFlags {
    type Output = PhysFlags;

    fn bitor(self, rhs: PhysFlags) -> PhysFlags {
        PhysFlags(self.0 | rhs.0)
    }
}

/// 物理オブジェクト。当たり判定の箱・速度・向き・持ち主をまとめたコンポーネント！
///
/// - `width`, `height`: `Transform` を中心にした当たり判定の大きさ。
/// - `owner`: 弾なら撃った本人。もう消えてるかもしれないので、引くときは必ず生存確認すること。
/// - `flags`: 自分が何者か。`ignore`: 相手の `flags` とこれが重なったら衝突しない。
/// - `blocked_by_tiles`: 壁タイルに止められるかどうか。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysObject {
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Direction,
    pub owner: Option<Entity>,
    pub flags: PhysFlags,
    pub ignore: PhysFlags,
    pub blocked_by_tiles: bool,
}

impl PhysObject {
    pub fn new(width: f32, height: f32, flags: PhysFlags, ignore: PhysFlags) -> Self {
        Self {
            width,
            height,
            vx: 0.0,
            vy: 0.0,
            facing: Direction::default(),
            owner: None,
            flags,
            ignore,
            blocked_by_tiles: true,
        }
    }

    /// お互いの ignore マスクを見て、この組み合わせが衝突し得るか判定する。
    pub fn can_collide_with(&self, other: &PhysObject) -> bool {
        !self.ignore.intersects(other.flags) && !other.ignore.intersects(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_prefers_dominant_axis() {
        assert_eq!(Direction::from_velocity(2.0, 1.0), Some(Direction::Right));
        assert_eq!(Direction::from_velocity(-0.5, 3.0), Some(Direction::Down));
        assert_eq!(Direction::from_velocity(0.0, -1.0), Some(Direction::Up));
        assert_eq!(Direction::from_velocity(0.0, 0.0), None);
    }

    #[test]
    fn ignore_masks_are_checked_both_ways() {
        let monster = PhysObject::new(32.0, 32.0, PhysFlags::MONSTER, PhysFlags::MONSTER);
        let other_monster = monster;
        let player = PhysObject::new(28.0, 28.0, PhysFlags::PLAYER, PhysFlags::NONE);
        let shy = PhysObject::new(8.0, 8.0, PhysFlags::BULLET, PhysFlags::PLAYER);

        assert!(!monster.can_collide_with(&other_monster));
        assert!(monster.can_collide_with(&player));
        assert!(!player.can_collide_with(&shy));
        assert!(!shy.can_collide_with(&player));
    }
}
