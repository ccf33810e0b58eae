// src/ecs/mod.rs
//! ECS (Entity-Component-System) core implementation.

pub mod component;
pub mod entity;
pub mod error;
pub mod query;
pub mod system;
pub mod world;

// Re-export key types for easier use via `crate::ecs::X`
pub use component::{Component, ComponentKind, ComponentStorage, EventComponent, KindSet};
pub use entity::Entity;
pub use error::EcsError;
pub use query::{Fetch, Query};
pub use system::{System, SystemContext};
pub use world::World;
