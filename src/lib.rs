// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！
pub mod components; // コンポーネント (データだけ)
pub mod config; // 定数とセッション設定
pub mod ecs; // 自作 ECS のコア
pub mod error;
pub mod platform; // 画面・音との境界
pub mod prototypes; // エンティティのひな形
pub mod session; // 1ゲームぶんのセッション
pub mod systems; // ゲームルール
pub mod tiles; // アリーナのタイル

pub use config::SessionConfig;
pub use error::GameError;
pub use platform::{AudioSink, DrawSink, FrameOutput};
pub use session::{Session, Snapshot};

use crate::components::InputEvent;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// ブラウザ (JS) からセッションを動かすための入口。
///
/// 入力は `InputEvent` の JSON 配列で渡して、1 tick ぶんの `FrameOutput` を JSON で受け取る。
/// 描画と音は JS 側で好きにやってね、という分担！
#[wasm_bindgen]
pub struct GameHandle {
    session: Session,
}

#[wasm_bindgen]
impl GameHandle {
    /// `config_json` を省略するとデフォルト設定で始める。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GameHandle, JsValue> {
        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json).map_err(to_js)?,
            None => SessionConfig::default(),
        };
        let session = Session::new(config).map_err(to_js)?;
        log::info!("GameHandle: ready");
        Ok(GameHandle { session })
    }

    /// 1 tick 進めて、その tick の出力を JSON 文字列で返す。
    pub fn tick(&mut self, inputs_json: &str) -> Result<String, JsValue> {
        step_json(&mut self.session, inputs_json).map_err(to_js)
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    pub fn wave(&self) -> u32 {
        self.session.wave()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.session.to_json().map_err(to_js)
    }

    pub fn restore(json: &str) -> Result<GameHandle, JsValue> {
        let session = Session::from_json(json).map_err(to_js)?;
        Ok(GameHandle { session })
    }
}

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JSON の入力で1 tick 進めて、出力を JSON にする。空文字列は「入力なし」。
fn step_json(session: &mut Session, inputs_json: &str) -> Result<String, GameError> {
    let inputs: Vec<InputEvent> = if inputs_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(inputs_json)?
    };
    let output = session.tick(&inputs);
    Ok(serde_json::to_string(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_bridge_runs_a_tick() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        let json = step_json(&mut session, r#"[{"Fire":{"pressed":true}}, "Pause"]"#).unwrap();
        let output: FrameOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output.tick, 0);
        assert!(session.world().singleton::<components::GameController>().unwrap().1.paused);

        assert!(step_json(&mut session, "").is_ok());
        assert!(matches!(step_json(&mut session, "[{\"Jump\":1}]"), Err(GameError::Json(_))));
    }
}
