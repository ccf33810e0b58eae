// src/components/transform.rs

use serde::{Deserialize, Serialize};

/// ワールド座標での位置を表すコンポーネントだよ！ 📍
///
/// 座標はエンティティの「中心」。当たり判定の箱 (`PhysObject`) もここを中心に広がるよ。
/// 画面は固定なので、単位はそのままピクセル。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 2点間の距離の二乗。比較だけなら平方根はいらないからね。
    pub fn distance_sq(&self, other: &Transform) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq_is_symmetric() {
        let a = Transform::new(100.0, 100.0);
        let b = Transform::new(103.0, 104.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(b.distance_sq(&a), 25.0);
    }
}
