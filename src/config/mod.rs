// src/config/mod.rs
//! 設定まわり。コンパイル時の定数 (`tuning`) と、セッションごとの設定 (`SessionConfig`)。

pub mod tuning;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::tiles::TileMap;
use tuning::*;

/// セッションを始めるときの設定だよ。JSON からも読めるようにしてある。
///
/// 書かなかった項目は `Default` (= tuning の値) で埋まる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub starting_lives: u32,
    pub max_entities: usize,
    pub monster_bullet_speed: f32,
    /// `#` が壁、`.` が床。空ならデフォルトのアリーナ。
    pub arena: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            starting_lives: STARTING_LIVES,
            max_entities: MAX_ENTITIES,
            monster_bullet_speed: MONSTER_BULLET_SPEED,
            arena: Vec::new(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tile_map(&self) -> Result<TileMap, GameError> {
        if self.arena.is_empty() {
            Ok(TileMap::default())
        } else {
            TileMap::from_rows(self.arena.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = SessionConfig::from_json(r#"{ "seed": 42, "monster_bullet_speed": 0.0 }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.monster_bullet_speed, 0.0);
        assert_eq!(config.starting_lives, STARTING_LIVES);
        assert_eq!(config.max_entities, MAX_ENTITIES);
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(matches!(SessionConfig::from_json("{ seed"), Err(GameError::Json(_))));
    }

    #[test]
    fn custom_arena_is_parsed() {
        let config = SessionConfig {
            arena: vec!["###".into(), "#.#".into(), "###".into()],
            ..SessionConfig::default()
        };
        let tiles = config.tile_map().unwrap();
        assert_eq!((tiles.cols(), tiles.rows()), (3, 3));
    }
}
