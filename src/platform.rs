// src/platform.rs
//! プラットフォーム (画面・音) との境界。
//!
//! コアは絵も音も自分では出さない。1 tick ぶんの描画コマンドと効果音の ID を
//! `FrameOutput` にまとめて、ここのトレイトを実装した相手に渡すだけだよ。

use serde::{Deserialize, Serialize};

use crate::components::{EventDraw, Sound};

/// 描画コマンドを受け取る側。コマンドは z の小さい順 (奥から) に並んでる。
pub trait DrawSink {
    fn draw(&mut self, commands: &[EventDraw]);
}

/// 効果音を鳴らす側。
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// 1 tick の出力。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub tick: u64,
    pub draws: Vec<EventDraw>,
    pub sounds: Vec<Sound>,
}

impl FrameOutput {
    /// 描画コマンドは z で安定ソートしておく (同じ z なら出てきた順のまま)。
    pub fn new(tick: u64, mut draws: Vec<EventDraw>, sounds: Vec<Sound>) -> Self {
        draws.sort_by_key(|draw| draw.z);
        Self { tick, draws, sounds }
    }

    pub fn submit<D: DrawSink, A: AudioSink>(&self, draw: &mut D, audio: &mut A) {
        draw.draw(&self.draws);
        for sound in &self.sounds {
            audio.play(*sound);
        }
    }
}
