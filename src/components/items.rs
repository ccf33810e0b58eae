// src/components/items.rs

use serde::{Deserialize, Serialize};

use crate::ecs::entity::Entity;

/// 弾。`inflictor` は得点を受け取る `PlayerController` (モンスターの弾なら `None`)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: i32,
    pub inflictor: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    AttackUp,
    SpeedUp,
    ExtraLife,
    Points,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::AttackUp,
        PickupKind::SpeedUp,
        PickupKind::ExtraLife,
        PickupKind::Points,
    ];
}

/// 拾えるアイテム。`timer` が 0 になったら誰にも拾われずに消える。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub timer: u32,
}

/// コマ送りアニメーション。最後のコマを見せ終わったらエンティティごと消える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub frame: u32,
    pub frame_count: u32,
    pub ticks_per_frame: u32,
    pub elapsed: u32,
}

impl Animation {
    pub fn new(frame_count: u32, ticks_per_frame: u32) -> Self {
        Self {
            frame: 0,
            frame_count,
            ticks_per_frame,
            elapsed: 0,
        }
    }

    /// 1tick 進める。アニメーションが終わったら `true`。
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.ticks_per_frame {
            self.elapsed = 0;
            self.frame += 1;
        }
        self.frame >= self.frame_count
    }
}

/// 死体の目印。次のウェーブが始まると片付けられる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corpse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_finishes_after_all_frames() {
        let mut anim = Animation::new(3, 2);
        let finished: Vec<bool> = (0..6).map(|_| anim.advance()).collect();
        assert_eq!(finished, vec![false, false, false, false, false, true]);
    }
}
