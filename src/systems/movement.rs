// src/systems/movement.rs

use crate::components::*;
use crate::ecs::{System, SystemContext, World};
use crate::tiles::TileMap;

/// 速度ぶん位置を進めるシステム。タイルとの当たりは x 軸 → y 軸の順に1軸ずつ解決する。
///
/// 壁にぶつかった弾は消える。歩き回ってるモンスターは次の tick で向きを変える。
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        let mut query = world.query::<(Transform, PhysObject)>();
        while let Some((entity, (transform, phys))) = query.next(world) {
            if phys.vx == 0.0 && phys.vy == 0.0 {
                continue; // 止まってる子はスキップ
            }

            let (moved, blocked) = step(ctx.tiles, transform, &phys);

            if blocked && phys.flags.contains(PhysFlags::BULLET) {
                world.destroy_entity(entity);
                continue;
            }
            // ウロウロ中のモンスターは壁にぶつかったら次の tick で向きを変える 🔄
            if blocked {
                if let Some(monster) = world.get_component_mut::<Monster>(entity) {
                    monster.wander_timer = 0;
                }
            }
            if let Some(slot) = world.get_component_mut::<Transform>(entity) {
                *slot = moved;
            }
        }
    }
}

/// 1 tick ぶん動かした位置と、どこかの軸で壁に止められたかを返す。
pub fn step(tiles: &TileMap, from: Transform, phys: &PhysObject) -> (Transform, bool) {
    if !phys.blocked_by_tiles {
        return (Transform::new(from.x + phys.vx, from.y + phys.vy), false);
    }

    let mut to = from;
    let mut blocked = false;

    if phys.vx != 0.0 {
        if tiles.box_hits_solid(to.x + phys.vx, to.y, phys.width, phys.height) {
            blocked = true;
        } else {
            to.x += phys.vx;
        }
    }
    if phys.vy != 0.0 {
        if tiles.box_hits_solid(to.x, to.y + phys.vy, phys.width, phys.height) {
            blocked = true;
        } else {
            to.y += phys.vy;
        }
    }
    (to, blocked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mover(vx: f32, vy: f32) -> PhysObject {
        let mut phys = PhysObject::new(32.0, 32.0, PhysFlags::MONSTER, PhysFlags::NONE);
        phys.vx = vx;
        phys.vy = vy;
        phys
    }

    #[test]
    fn blocked_axis_stays_put_while_the_other_moves() {
        let tiles = TileMap::default();
        // 左の壁にぴったりくっついた状態で左下へ
        let (to, blocked) = step(&tiles, Transform::new(48.0, 100.0), &mover(-2.0, 2.0));
        assert!(blocked);
        assert_eq!(to, Transform::new(48.0, 102.0));
    }

    #[test]
    fn open_floor_moves_freely() {
        let tiles = TileMap::default();
        let (to, blocked) = step(&tiles, Transform::new(100.0, 100.0), &mover(1.5, -1.0));
        assert!(!blocked);
        assert_eq!(to, Transform::new(101.5, 99.0));
    }

    #[test]
    fn unblocked_objects_ignore_tiles() {
        let tiles = TileMap::default();
        let mut phys = mover(-10.0, 0.0);
        phys.blocked_by_tiles = false;
        let (to, blocked) = step(&tiles, Transform::new(48.0, 100.0), &phys);
        assert!(!blocked);
        assert_eq!(to.x, 38.0);
    }
}
