// src/tiles.rs
//! 固定画面アリーナのタイルグリッド。壁とのあたり判定に使うよ。

use serde::{Deserialize, Serialize};

use crate::config::tuning::{ARENA_COLS, ARENA_ROWS, TILE_SIZE};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl Default for TileMap {
    /// 外周が壁で、中に柱が4本あるいつものアリーナ。
    fn default() -> Self {
        let pillars = [(5, 5), (14, 5), (5, 9), (14, 9)];
        let mut tiles = Vec::with_capacity(ARENA_COLS * ARENA_ROWS);
        for row in 0..ARENA_ROWS {
            for col in 0..ARENA_COLS {
                let border = row == 0 || col == 0 || row == ARENA_ROWS - 1 || col == ARENA_COLS - 1;
                let tile = if border || pillars.contains(&(col, row)) {
                    Tile::Wall
                } else {
                    Tile::Floor
                };
                tiles.push(tile);
            }
        }
        Self {
            cols: ARENA_COLS,
            rows: ARENA_ROWS,
            tiles,
        }
    }
}

impl TileMap {
    /// `#` (壁) と `.` (床) の行からマップを作る。全部の行は同じ長さじゃないとダメ。
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let cols = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(GameError::InvalidArena("arena has no tiles".into()));
        }

        let mut tiles = Vec::with_capacity(cols * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != cols {
                return Err(GameError::InvalidArena(format!("row {} is not {} tiles wide", y, cols)));
            }
            for ch in row.chars() {
                tiles.push(match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Floor,
                    other => {
                        return Err(GameError::InvalidArena(format!("unknown tile {:?} in row {}", other, y)));
                    }
                });
            }
        }

        Ok(Self {
            cols,
            rows: rows.len(),
            tiles,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.cols as f32 * TILE_SIZE
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * TILE_SIZE
    }

    /// マップの外は壁扱い。
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return true;
        }
        self.tiles[row as usize * self.cols + col as usize] == Tile::Wall
    }

    /// 中心 (cx, cy)、大きさ (w, h) の箱が壁タイルに食い込んでる？
    pub fn box_hits_solid(&self, cx: f32, cy: f32, w: f32, h: f32) -> bool {
        let col0 = ((cx - w / 2.0) / TILE_SIZE).floor() as i32;
        let col1 = ((cx + w / 2.0) / TILE_SIZE).ceil() as i32 - 1;
        let row0 = ((cy - h / 2.0) / TILE_SIZE).floor() as i32;
        let row1 = ((cy + h / 2.0) / TILE_SIZE).ceil() as i32 - 1;

        (row0..=row1).any(|row| (col0..=col1).any(|col| self.is_solid(col, row)))
    }

    pub fn tile_center(&self, col: usize, row: usize) -> (f32, f32) {
        (
            (col as f32 + 0.5) * TILE_SIZE,
            (row as f32 + 0.5) * TILE_SIZE,
        )
    }

    /// アリーナの真ん中 (プレイヤーの出現位置)。
    pub fn center(&self) -> (f32, f32) {
        (self.width() / 2.0, self.height() / 2.0)
    }

    /// モンスターの出現候補。`w`×`h` の箱が壁に食い込まずに置ける床タイルの中心を返す。
    ///
    /// 外周のすぐ内側のリングから探して、そこに置けなければ1つ内側のリングへ。
    /// 見つかったリングのぶんだけを行優先の順で返すよ。
    pub fn spawn_points(&self, w: f32, h: f32) -> Vec<(f32, f32)> {
        for ring in 1.. {
            if ring * 2 >= self.cols || ring * 2 >= self.rows {
                break;
            }
            let last_col = self.cols - 1 - ring;
            let last_row = self.rows - 1 - ring;
            let mut points = Vec::new();
            for row in ring..=last_row {
                for col in ring..=last_col {
                    let on_ring = row == ring || row == last_row || col == ring || col == last_col;
                    if !on_ring {
                        continue;
                    }
                    let (cx, cy) = self.tile_center(col, row);
                    if !self.box_hits_solid(cx, cy, w, h) {
                        points.push((cx, cy));
                    }
                }
            }
            if !points.is_empty() {
                return points;
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tuning::{SPIDER_HITBOX, SQUID_HITBOX};

    #[test]
    fn default_arena_has_walls_on_the_border() {
        let tiles = TileMap::default();
        assert!(tiles.is_solid(0, 0));
        assert!(tiles.is_solid(ARENA_COLS as i32 - 1, 3));
        assert!(!tiles.is_solid(1, 1));
        assert!(tiles.is_solid(-1, 5), "外は壁");
        assert!(tiles.is_solid(5, 5), "柱");
    }

    #[test]
    fn box_touching_a_wall_edge_does_not_hit_it() {
        let tiles = TileMap::default();
        // 壁 (col 0) の右端は x = 32。幅 32 の箱を中心 48 に置くとぴったり接するだけ
        assert!(!tiles.box_hits_solid(48.0, 100.0, 32.0, 32.0));
        assert!(tiles.box_hits_solid(47.0, 100.0, 32.0, 32.0));
    }

    #[test]
    fn spawn_points_fit_every_monster_hitbox() {
        let tiles = TileMap::default();
        for size in [SPIDER_HITBOX, SQUID_HITBOX] {
            let points = tiles.spawn_points(size, size);
            assert!(!points.is_empty(), "{}px の箱を置ける場所がない", size);
            for (x, y) in points {
                assert!(!tiles.box_hits_solid(x, y, size, size), "({}, {}) は壁に食い込んでる", x, y);
                // どっちかの向きには必ず1歩進める
                let free = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)]
                    .iter()
                    .any(|(dx, dy)| !tiles.box_hits_solid(x + dx, y + dy, size, size));
                assert!(free, "({}, {}) から動けない", x, y);
            }
        }
    }

    #[test]
    fn big_boxes_spawn_one_ring_further_in() {
        let tiles = TileMap::default();
        // タイル以下の箱は外周のすぐ内側 (row 1 の中心 y = 48)
        assert!(tiles.spawn_points(TILE_SIZE, TILE_SIZE).contains(&(48.0, 48.0)));
        // タイルより大きい箱はそこだと壁に刺さるので1つ内側
        let points = tiles.spawn_points(SPIDER_HITBOX, SPIDER_HITBOX);
        assert!(!points.contains(&(48.0, 48.0)));
        assert!(points.contains(&(80.0, 80.0)));
    }

    #[test]
    fn walled_in_arena_has_no_spawn_points() {
        let tiles = TileMap::from_rows(&["####", "#..#", "####"]).unwrap();
        assert!(!tiles.spawn_points(TILE_SIZE, TILE_SIZE).is_empty());
        // 床が1タイルぶんの高さしかないので大きい箱は入らない
        assert!(tiles.spawn_points(SPIDER_HITBOX, SPIDER_HITBOX).is_empty());
        assert!(TileMap::from_rows(&["###", "###", "###"]).unwrap().spawn_points(TILE_SIZE, TILE_SIZE).is_empty());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = ["###", "#.", "###"];
        assert!(matches!(TileMap::from_rows(&rows), Err(GameError::InvalidArena(_))));
        assert!(TileMap::from_rows::<&str>(&[]).is_err());
        assert!(TileMap::from_rows(&["#x#"]).is_err());
    }
}
