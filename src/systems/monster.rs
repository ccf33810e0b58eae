// src/systems/monster.rs

use rand::Rng; // 向き・タイマーのサイコロ 🎲

use crate::components::*;
use crate::config::tuning::*;
use crate::ecs::{System, SystemContext, World};
use crate::prototypes::{self, BulletSpec}; // 弾はプロトタイプから作る
use crate::systems::spawned;
use crate::tiles::TileMap;

/// モンスターの AI。性格ごとに進む向きを決めて、タイマーが切れたら弾を撃つ。
///
/// - Chase: プレイヤーとの差が大きい軸の方へまっすぐ寄ってくる。柱でふさがってたらもう片方の軸へ
/// - Wander: しばらく同じ向きに歩いて、タイマーが切れたら (または壁に当たったら) 向きを変える
pub struct MonsterAiSystem;

impl System for MonsterAiSystem {
    fn name(&self) -> &'static str {
        "monster_ai"
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>) {
        // 狙う相手。プレイヤーがいない (死んでる) 間は None だよ
        let target = world
            .iter::<(Player, Transform)>()
            .next()
            .map(|(_, (_, t))| t);

        let mut query = world.query::<(Monster, Transform, PhysObject, Creature)>();
        while let Some((entity, (mut monster, transform, mut phys, creature))) = query.next(world) {
            // --- まずは進む向きを決める ---
            let dir = match (monster.personality, target) {
                (Personality::Chase, Some(target)) => chase_dir(ctx.tiles, &transform, &phys, &target, creature.speed),
                // 追いかける相手がいないときは Chase でもウロウロする
                _ => {
                    if monster.wander_timer == 0 {
                        monster.wander_dir = Direction::ALL[ctx.rng.gen_range(0..Direction::ALL.len())];
                        monster.wander_timer = ctx.rng.gen_range(WANDER_TURN_MIN..=WANDER_TURN_MAX);
                    } else {
                        monster.wander_timer -= 1;
                    }
                    monster.wander_dir
                }
            };

            // 向き × 速さ = 速度。実際に動かすのは MovementSystem のお仕事
            let (ux, uy) = dir.unit();
            phys.vx = ux * creature.speed;
            phys.vy = uy * creature.speed;
            phys.facing = dir;

            // --- 次は射撃タイマー ---
            if monster.shoot_timer > 0 {
                monster.shoot_timer -= 1;
            } else {
                monster.shoot_timer = ctx.rng.gen_range(MONSTER_SHOOT_MIN..=MONSTER_SHOOT_MAX);
                // プレイヤーがいないときは撃たない
                if target.is_some() {
                    let spec = BulletSpec {
                        x: transform.x,
                        y: transform.y,
                        dir,
                        speed: ctx.config.monster_bullet_speed,
                        owner: entity,
                        from_monster: true,
                        cluster: 1,
                        damage: BULLET_DAMAGE,
                        inflictor: None,
                    };
                    if spawned("MonsterAiSystem", prototypes::bullet(world, spec)).is_some() {
                        spawned("MonsterAiSystem", prototypes::event_sound(world, Sound::MonsterShoot));
                    }
                }
            }

            // 書き戻し (途中で World を触ってるのでコピーを戻す形)
            if let Some(slot) = world.get_component_mut::<Monster>(entity) {
                *slot = monster;
            }
            if let Some(slot) = world.get_component_mut::<PhysObject>(entity) {
                *slot = phys;
            }
        }
    }
}

/// Chase の向き。差が大きい軸を優先して、その向きに1歩も進めないときは差が小さい軸へ回り込む。
fn chase_dir(tiles: &TileMap, from: &Transform, phys: &PhysObject, target: &Transform, speed: f32) -> Direction {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let Some(primary) = Direction::from_velocity(dx, dy) else {
        return phys.facing; // 真上に重なってる
    };

    let free = |dir: Direction| {
        let (ux, uy) = dir.unit();
        !tiles.box_hits_solid(from.x + ux * speed, from.y + uy * speed, phys.width, phys.height)
    };
    if free(primary) {
        return primary;
    }

    // 柱の裏に来ちゃった！もう片方の軸で回り込む
    let secondary = match primary {
        Direction::Left | Direction::Right => Direction::from_velocity(0.0, dy),
        Direction::Up | Direction::Down => Direction::from_velocity(dx, 0.0),
    };
    secondary.filter(|dir| free(*dir)).unwrap_or(primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spider_phys() -> PhysObject {
        PhysObject::new(SPIDER_HITBOX, SPIDER_HITBOX, PhysFlags::MONSTER, PhysFlags::NONE)
    }

    #[test]
    fn chase_heads_along_the_longer_axis() {
        let tiles = TileMap::default();
        let from = Transform::new(320.0, 240.0);
        let target = Transform::new(420.0, 260.0);
        assert_eq!(chase_dir(&tiles, &from, &spider_phys(), &target, SPIDER_SPEED), Direction::Right);
    }

    #[test]
    fn chase_goes_around_a_pillar() {
        let tiles = TileMap::default();
        // 柱 (5, 5) は x 160..192 / y 160..192。その左にぴったりくっついてる
        let from = Transform::new(140.0, 170.0);
        // 右のほうが遠いけど、柱でふさがってるので下へ
        let target = Transform::new(400.0, 260.0);
        assert_eq!(chase_dir(&tiles, &from, &spider_phys(), &target, SPIDER_SPEED), Direction::Down);
    }
}
