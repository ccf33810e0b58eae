// src/ecs/system.rs

use rand_chacha::ChaCha8Rng;

use crate::config::SessionConfig;
use crate::ecs::entity::Entity;
use crate::ecs::query::Fetch;
use crate::ecs::world::World;
use crate::tiles::TileMap;

/// システムが World 以外に触れるセッション側の資源。
///
/// 乱数はセッションが1本だけ持ってて、ここ経由で全システムに貸し出される。
/// どこかに隠れたグローバル乱数はないので、同じシードなら毎回同じ展開になるよ！
pub struct SystemContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub tiles: &'a TileMap,
    pub config: &'a SessionConfig,
    pub tick: u64,
}

/// System（システム）トレイトだよ！
///
/// 1つのシステムは「決まった形のクエリ + 変換」で、tick ごとに決まった順番で1回ずつ呼ばれる。
/// 前のシステムが出したイベントコンポーネントを後ろのシステムが消費する、という流れで
/// システム同士がやりとりするんだ。
pub trait System {
    fn name(&self) -> &'static str;

    /// 一時停止中も動かすか。入力と描画だけが true。
    fn runs_while_paused(&self) -> bool {
        false
    }

    fn run(&mut self, world: &mut World, ctx: &mut SystemContext<'_>);
}

/// クエリ `Q` にマッチするエンティティ1つずつに `f` を呼ぶ。
/// `f` が `false` を返したらそこで打ち切り。訪れた数を返すよ。
pub fn for_each<Q, F>(world: &mut World, ctx: &mut SystemContext<'_>, mut f: F) -> usize
where
    Q: Fetch,
    F: FnMut(&mut World, &mut SystemContext<'_>, Entity, Q) -> bool,
{
    let mut query = world.query::<Q>();
    let mut visited = 0;
    while let Some((entity, view)) = query.next(world) {
        visited += 1;
        if !f(world, ctx, entity, view) {
            break;
        }
    }
    visited
}
