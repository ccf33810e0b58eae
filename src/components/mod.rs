// src/components/mod.rs

// コンポーネントの定義たち。種類は ecs::component の表で固定されてるよ！
pub mod controller;
pub mod creature;
pub mod drawable;
pub mod events;
pub mod items;
pub mod physics;
pub mod transform;

pub use controller::{GameController, InputState, PlayerController};
pub use creature::{Creature, Monster, MonsterKind, Personality, Player};
pub use drawable::{Drawable, Graphic, Orientation};
pub use events::{
    Cheat, EventAwardPoints, EventCollide, EventConferBonus, EventDraw, EventInput,
    EventPlayerDied, EventPlaySound, EventTakeDamage, InputEvent, Sound,
};
pub use items::{Animation, Bullet, Corpse, Pickup, PickupKind};
pub use physics::{Direction, PhysFlags, PhysObject};
pub use transform::Transform;
