// src/error.rs

use thiserror::Error;

use crate::ecs::EcsError;

/// セッション全体のエラー。
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Ecs(#[from] EcsError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid arena: {0}")]
    InvalidArena(String),
}
