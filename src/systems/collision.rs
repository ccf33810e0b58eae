// src/systems/collision.rs

use itertools::Itertools; // tuple_combinations で全ペアを作る
use log::debug;

use crate::components::*;
use crate::ecs::{Entity, System, SystemContext, World};
use crate::prototypes;
use crate::systems::spawned;

/// 当たり判定の箱 (AABB) 同士の重なりを調べて、重なってたら `EventCollide` を出すシステム。
///
/// ペアごとにイベントは1つだけ。`a` はインデックスが小さい方。
/// 辺がぴったり接してるだけなら重なり扱いにしないよ。
pub struct CollisionSystem;

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, world: &mut World, _ctx: &mut SystemContext<'_>) {
        // 先に全員ぶんコピーしておく。イベントを作ると World が変わっちゃうからね
        let bodies: Vec<(Entity, Transform, PhysObject)> = world
            .iter::<(Transform, PhysObject)>()
            .map(|(entity, (t, p))| (entity, t, p))
            .collect();

        // (a, b) と (b, a) は同じペア。tuple_combinations は片方しか作らないので重複なし 👍
        let pairs: Vec<(Entity, Entity)> = bodies
            .iter()
            .tuple_combinations()
            // 無視マスクを先に見る (安い方から)
            .filter(|((_, ta, pa), (_, tb, pb))| pa.can_collide_with(pb) && overlaps(ta, pa, tb, pb))
            .map(|((a, ..), (b, ..))| (*a, *b))
            .collect();

        for (a, b) in pairs {
            debug!("CollisionSystem: {} x {}", a, b);
            spawned("CollisionSystem", prototypes::event_collide(world, a, b));
        }
    }
}

/// 中心と大きさから、2つの箱が (面積を持って) 重なってるか。
///
/// 中心どうしの距離の2倍が、幅の合計より小さければ重なってる。`<` なので接してるだけはセーフ。
pub fn overlaps(ta: &Transform, pa: &PhysObject, tb: &Transform, pb: &PhysObject) -> bool {
    (ta.x - tb.x).abs() * 2.0 < pa.width + pb.width && (ta.y - tb.y).abs() * 2.0 < pa.height + pb.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::tiles::TileMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ignore_masks_skip_the_pair() {
        let mut world = World::with_capacity(8);
        let player = PhysObject::new(28.0, 28.0, PhysFlags::PLAYER, PhysFlags::NONE);
        let ghost = PhysObject::new(28.0, 28.0, PhysFlags::PICKUP, PhysFlags::PLAYER);
        let a = world.spawn().unwrap();
        world.add_component(a, Transform::new(100.0, 100.0)).unwrap();
        world.add_component(a, player).unwrap();
        let b = world.spawn().unwrap();
        world.add_component(b, Transform::new(100.0, 100.0)).unwrap();
        world.add_component(b, ghost).unwrap();

        let tiles = TileMap::default();
        let config = SessionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = SystemContext { rng: &mut rng, tiles: &tiles, config: &config, tick: 0 };
        CollisionSystem.run(&mut world, &mut ctx);
        // 片方が無視してるだけで、ペアまるごと無し
        assert!(world.take_events::<EventCollide>().is_empty());
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = PhysObject::new(32.0, 32.0, PhysFlags::MONSTER, PhysFlags::NONE);
        let b = a;
        assert!(!overlaps(&Transform::new(0.0, 0.0), &a, &Transform::new(32.0, 0.0), &b));
        assert!(overlaps(&Transform::new(0.0, 0.0), &a, &Transform::new(31.0, 31.0), &b));
    }
}
