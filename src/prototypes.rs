// src/prototypes.rs
//! プロトタイプ (エンティティの「ひな形」) たち！
//!
//! エンティティは必ずここの関数で作る。決まった組み合わせのコンポーネントを
//! まとめて付けるので、「Creature なのに Transform がない」みたいな半端な状態が生まれないよ。
//! 途中で失敗したら作りかけのエンティティは消して、エラーをそのまま返す。

use rand::Rng;

use crate::components::*;
use crate::config::tuning::*;
use crate::ecs::{Component, EcsError, Entity, EventComponent, World};

/// spawn して、`build` でコンポーネントを付ける。失敗したら作りかけを片付ける。
fn assemble<F>(world: &mut World, build: F) -> Result<Entity, EcsError>
where
    F: FnOnce(&mut World, Entity) -> Result<(), EcsError>,
{
    let entity = world.spawn()?;
    if let Err(err) = build(world, entity) {
        world.destroy_entity(entity);
        return Err(err);
    }
    Ok(entity)
}

/// もう1個あったらエラー。コントローラーは World に1つだけ！
fn ensure_unique<T: Component>(world: &World) -> Result<(), EcsError> {
    match world.singleton::<T>() {
        Some((entity, _)) => Err(EcsError::SingletonExists { entity, kind: T::KIND }),
        None => Ok(()),
    }
}

pub fn game_controller(world: &mut World) -> Result<Entity, EcsError> {
    ensure_unique::<GameController>(world)?;
    assemble(world, |world, e| {
        world.add_component(
            e,
            GameController {
                wave: 0,
                to_spawn: 0,
                spawn_timer: 0,
                intermission: FIRST_WAVE_DELAY,
                paused: false,
                game_over: false,
                reset_requested: false,
            },
        )
    })
}

pub fn player_controller(world: &mut World, lives: u32) -> Result<Entity, EcsError> {
    ensure_unique::<PlayerController>(world)?;
    assemble(world, |world, e| {
        world.add_component(
            e,
            PlayerController {
                lives,
                score: 0,
                player: None,
                respawn_timer: 0,
                input: InputState::default(),
                invulnerable_cheat: false,
            },
        )
    })
}

pub fn player(world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
    assemble(world, |world, e| {
        let mut phys = PhysObject::new(PLAYER_HITBOX, PLAYER_HITBOX, PhysFlags::PLAYER, PhysFlags::NONE);
        phys.facing = Direction::Up;

        let mut creature = Creature::new(PLAYER_HP, PLAYER_BASE_SPEED);
        creature.invuln_timer = PLAYER_SPAWN_INVULN;

        world.add_component(e, Transform::new(x, y))?;
        world.add_component(e, phys)?;
        world.add_component(e, Drawable { graphic: Graphic::Player, z: Z_PLAYER, directional: true })?;
        world.add_component(e, creature)?;
        world.add_component(
            e,
            Player {
                attack_level: 0,
                speed_level: 0,
                shoot_cooldown: 0,
                max_bullets: MAX_PLAYER_BULLETS,
            },
        )
    })
}

pub fn corpse(world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
    assemble(world, |world, e| {
        world.add_component(e, Transform::new(x, y))?;
        world.add_component(e, Drawable { graphic: Graphic::Corpse, z: Z_CORPSE, directional: false })?;
        world.add_component(e, Corpse)
    })
}

pub fn spider<R: Rng>(world: &mut World, rng: &mut R, x: f32, y: f32) -> Result<Entity, EcsError> {
    monster(world, rng, MonsterKind::Spider, x, y)
}

pub fn squid<R: Rng>(world: &mut World, rng: &mut R, x: f32, y: f32) -> Result<Entity, EcsError> {
    monster(world, rng, MonsterKind::Squid, x, y)
}

/// 種類ごとのあたり判定の一辺 (正方形)。出現位置を選ぶときにも使うよ。
pub fn monster_hitbox(kind: MonsterKind) -> f32 {
    match kind {
        MonsterKind::Spider => SPIDER_HITBOX,
        MonsterKind::Squid => SQUID_HITBOX,
    }
}

/// モンスター共通。性格と最初の射撃タイマーはセッションの乱数で決める。
pub fn monster<R: Rng>(world: &mut World, rng: &mut R, kind: MonsterKind, x: f32, y: f32) -> Result<Entity, EcsError> {
    let hitbox = monster_hitbox(kind);
    let (hp, speed, points, graphic) = match kind {
        MonsterKind::Spider => (SPIDER_HP, SPIDER_SPEED, SPIDER_POINTS, Graphic::Spider),
        MonsterKind::Squid => (SQUID_HP, SQUID_SPEED, SQUID_POINTS, Graphic::Squid),
    };

    let personality = if rng.gen_bool(CHASE_CHANCE) {
        Personality::Chase
    } else {
        Personality::Wander
    };
    let shoot_timer = rng.gen_range(MONSTER_SHOOT_MIN..=MONSTER_SHOOT_MAX);
    let wander_dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    let wander_timer = rng.gen_range(WANDER_TURN_MIN..=WANDER_TURN_MAX);

    assemble(world, |world, e| {
        let mut phys = PhysObject::new(hitbox, hitbox, PhysFlags::MONSTER, PhysFlags::MONSTER | PhysFlags::PICKUP);
        phys.facing = wander_dir;

        world.add_component(e, Transform::new(x, y))?;
        world.add_component(e, phys)?;
        world.add_component(e, Drawable { graphic, z: Z_MONSTER, directional: kind == MonsterKind::Squid })?;
        world.add_component(e, Creature::new(hp, speed))?;
        world.add_component(
            e,
            Monster {
                kind,
                personality,
                shoot_timer,
                wander_dir,
                wander_timer,
                points,
            },
        )
    })
}

/// 弾を作るときのパラメータ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub x: f32,
    pub y: f32,
    pub dir: Direction,
    pub speed: f32,
    pub owner: Entity,
    pub from_monster: bool,
    /// 何発ぶんがまとまった弾か (攻撃レベル + 1)。
    pub cluster: u8,
    pub damage: i32,
    /// 得点を受け取る PlayerController。
    pub inflictor: Option<Entity>,
}

/// 弾。当たり判定はタイル単位に比例 (`BULLET_UNIT` × まとまりの数、3 で頭打ち)。
///
/// モンスターの弾はモンスターをすり抜ける、プレイヤーの弾はプレイヤーをすり抜ける。
/// 弾同士とアイテムはどちらもすり抜けるよ。
pub fn bullet(world: &mut World, spec: BulletSpec) -> Result<Entity, EcsError> {
    let cluster = spec.cluster.max(1);
    let size = BULLET_UNIT * f32::from(cluster.min(3));
    let (ux, uy) = spec.dir.unit();

    let shooter_flag = if spec.from_monster { PhysFlags::MONSTER } else { PhysFlags::PLAYER };
    let mut phys = PhysObject::new(size, size, PhysFlags::BULLET, PhysFlags::BULLET | PhysFlags::PICKUP | shooter_flag);
    phys.vx = ux * spec.speed;
    phys.vy = uy * spec.speed;
    phys.facing = spec.dir;
    phys.owner = Some(spec.owner);

    let graphic = if spec.from_monster {
        Graphic::MonsterBullet
    } else {
        match cluster {
            1 => Graphic::BulletSingle,
            2 => Graphic::BulletDouble,
            _ => Graphic::BulletCluster,
        }
    };

    assemble(world, |world, e| {
        world.add_component(e, Transform::new(spec.x, spec.y))?;
        world.add_component(e, phys)?;
        world.add_component(e, Drawable { graphic, z: Z_BULLET, directional: true })?;
        world.add_component(
            e,
            Bullet {
                damage: spec.damage,
                inflictor: spec.inflictor,
            },
        )
    })
}

pub fn animation(world: &mut World, x: f32, y: f32, graphic: Graphic, frames: u32, ticks_per_frame: u32) -> Result<Entity, EcsError> {
    assemble(world, |world, e| {
        world.add_component(e, Transform::new(x, y))?;
        world.add_component(e, Drawable { graphic, z: Z_EFFECT, directional: false })?;
        world.add_component(e, Animation::new(frames, ticks_per_frame))
    })
}

pub fn explosion(world: &mut World, x: f32, y: f32) -> Result<Entity, EcsError> {
    animation(world, x, y, Graphic::Explosion, EXPLOSION_FRAMES, EXPLOSION_FRAME_TICKS)
}

/// アイテム。`timer` tick 経っても拾われなければ消える。
pub fn pickup(world: &mut World, x: f32, y: f32, kind: PickupKind, timer: u32) -> Result<Entity, EcsError> {
    let graphic = match kind {
        PickupKind::AttackUp => Graphic::PickupAttack,
        PickupKind::SpeedUp => Graphic::PickupSpeed,
        PickupKind::ExtraLife => Graphic::PickupLife,
        PickupKind::Points => Graphic::PickupPoints,
    };
    assemble(world, |world, e| {
        world.add_component(e, Transform::new(x, y))?;
        world.add_component(
            e,
            PhysObject::new(PICKUP_HITBOX, PICKUP_HITBOX, PhysFlags::PICKUP, PhysFlags::MONSTER | PhysFlags::BULLET),
        )?;
        world.add_component(e, Drawable { graphic, z: Z_PICKUP, directional: false })?;
        world.add_component(e, Pickup { kind, timer })
    })
}

// --- イベント ---
// どれも spawn + コンポーネント1個だけ。他には何も付けない。

fn event<T: EventComponent>(world: &mut World, event: T) -> Result<Entity, EcsError> {
    assemble(world, |world, e| world.add_component(e, event))
}

pub fn event_input(world: &mut World, input: InputEvent, order: u32) -> Result<Entity, EcsError> {
    event(world, EventInput { input, order })
}

pub fn event_collide(world: &mut World, a: Entity, b: Entity) -> Result<Entity, EcsError> {
    event(world, EventCollide { a, b })
}

pub fn event_confer_bonus(world: &mut World, player: Entity, kind: PickupKind) -> Result<Entity, EcsError> {
    event(world, EventConferBonus { player, kind })
}

pub fn event_award_points(world: &mut World, controller: Option<Entity>, points: u32) -> Result<Entity, EcsError> {
    event(world, EventAwardPoints { controller, points })
}

pub fn event_take_damage(world: &mut World, target: Entity, damage: i32, inflictor: Option<Entity>) -> Result<Entity, EcsError> {
    event(world, EventTakeDamage { target, damage, inflictor })
}

pub fn event_player_died(world: &mut World, player: Entity) -> Result<Entity, EcsError> {
    event(world, EventPlayerDied { player })
}

pub fn event_draw(world: &mut World, draw: EventDraw) -> Result<Entity, EcsError> {
    event(world, draw)
}

pub fn event_sound(world: &mut World, sound: Sound) -> Result<Entity, EcsError> {
    event(world, EventPlaySound { sound })
}
