// src/config/tuning.rs
//! ゲームバランスの定数たち！ 速度・体力・タイマー・得点など。
//! 時間の単位は tick (60tick = 1秒)、長さの単位はピクセル。

pub const MAX_ENTITIES: usize = 4096;

// --- アリーナ ---
pub const TILE_SIZE: f32 = 32.0;
pub const ARENA_COLS: usize = 20;
pub const ARENA_ROWS: usize = 15;

// --- プレイヤー ---
pub const STARTING_LIVES: u32 = 3;
pub const PLAYER_HP: i32 = 3;
pub const PLAYER_HITBOX: f32 = 28.0;
pub const PLAYER_BASE_SPEED: f32 = 2.0;
pub const PLAYER_SPEED_STEP: f32 = 0.5;
pub const MAX_SPEED_LEVEL: u8 = 3;
pub const MAX_ATTACK_LEVEL: u8 = 3;
pub const PLAYER_SHOOT_COOLDOWN: u32 = 10;
pub const MAX_PLAYER_BULLETS: u8 = 3;
pub const PLAYER_BULLET_SPEED: f32 = 6.0;
pub const PLAYER_SPAWN_INVULN: u32 = 120; // 出現直後の無敵
pub const PLAYER_HIT_INVULN: u32 = 60; // 被弾後の無敵
pub const RESPAWN_DELAY: u32 = 90;

// --- モンスター ---
pub const SPIDER_HP: i32 = 2;
pub const SPIDER_SPEED: f32 = 1.0;
pub const SPIDER_HITBOX: f32 = 40.0;
pub const SPIDER_POINTS: u32 = 100;
pub const SQUID_HP: i32 = 3;
pub const SQUID_SPEED: f32 = 0.75;
pub const SQUID_HITBOX: f32 = 32.0;
pub const SQUID_POINTS: u32 = 200;
pub const MONSTER_BULLET_SPEED: f32 = 3.0;
pub const MONSTER_SHOOT_MIN: u32 = 60;
pub const MONSTER_SHOOT_MAX: u32 = 180;
pub const WANDER_TURN_MIN: u32 = 30;
pub const WANDER_TURN_MAX: u32 = 90;
pub const CHASE_CHANCE: f64 = 0.5;
pub const SQUID_CHANCE: f64 = 0.4; // ウェーブ2以降、イカが出る確率

// --- 弾 ---
pub const BULLET_UNIT: f32 = TILE_SIZE / 4.0;
pub const BULLET_DAMAGE: i32 = 1;

// --- アイテム ---
pub const PICKUP_DURATION: u32 = 900;
pub const PICKUP_HITBOX: f32 = 24.0;
pub const PICKUP_DROP_PERCENT: u32 = 20;
pub const PICKUP_POINTS: u32 = 500;

// --- 演出 ---
pub const EXPLOSION_FRAMES: u32 = 4;
pub const EXPLOSION_FRAME_TICKS: u32 = 6;

// --- ウェーブ ---
pub const WAVE_BASE_MONSTERS: u32 = 4;
pub const WAVE_MONSTER_STEP: u32 = 2;
pub const WAVE_SPAWN_INTERVAL: u32 = 45;
pub const WAVE_INTERMISSION: u32 = 120;
pub const FIRST_WAVE_DELAY: u32 = 60;

// --- 得点 ---
pub const EXTRA_LIFE_SCORE: u64 = 10_000;

// --- 描画順 (大きいほど手前) ---
pub const Z_CORPSE: i32 = 0;
pub const Z_PICKUP: i32 = 1;
pub const Z_MONSTER: i32 = 2;
pub const Z_PLAYER: i32 = 3;
pub const Z_BULLET: i32 = 4;
pub const Z_EFFECT: i32 = 5;
