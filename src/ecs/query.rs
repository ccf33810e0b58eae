// src/ecs/query.rs

use std::marker::PhantomData;

use crate::ecs::component::KindSet;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;

/// クエリで取り出せる「形」を表すトレイトだよ。
///
/// - コンポーネント型 `T` そのもの → 必須。持ってないエンティティはマッチしない。
/// - `Option<T>` → 任意。持ってなければ `None` が入る。
/// - それらのタプル → 全部まとめた1つのビュー。
///
/// 取り出す値はコピー (クローン) なので、ビューを持ったまま World を書き換えても大丈夫！
pub trait Fetch: Sized {
    /// このビューに必須なコンポーネント種別。
    fn required() -> KindSet;
    fn fetch(world: &World, entity: Entity) -> Option<Self>;
}

macro_rules! impl_fetch_tuple {
    ($($name:ident),+) => {
        impl<$($name: Fetch),+> Fetch for ($($name,)+) {
            fn required() -> KindSet {
                KindSet::EMPTY$(.union($name::required()))+
            }

            fn fetch(world: &World, entity: Entity) -> Option<Self> {
                Some(($($name::fetch(world, entity)?,)+))
            }
        }
    };
}

impl_fetch_tuple!(A);
impl_fetch_tuple!(A, B);
impl_fetch_tuple!(A, B, C);
impl_fetch_tuple!(A, B, C, D);
impl_fetch_tuple!(A, B, C, D, E);

/// クエリのカーソル。作った瞬間にマッチしたエンティティIDをインデックス昇順で控えておいて、
/// `next` のたびに「まだ生きてて、まだ条件を満たしてるか」を確かめてからビューを返す。
///
/// - 途中で破棄されたエンティティは飛ばす (落ちたりしない)
/// - 途中で生まれたエンティティは今回のパスでは訪れない
/// - 同じエンティティを2回訪れることはない
///
/// カーソル自身は World を借りっぱなしにしないので、ループの中で World を自由に書き換えられる！
pub struct Query<Q> {
    entities: Vec<Entity>,
    cursor: usize,
    _marker: PhantomData<fn() -> Q>,
}

impl<Q: Fetch> Query<Q> {
    pub(crate) fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            cursor: 0,
            _marker: PhantomData,
        }
    }

    pub fn next(&mut self, world: &World) -> Option<(Entity, Q)> {
        while let Some(&entity) = self.entities.get(self.cursor) {
            self.cursor += 1;
            if !world.is_entity_alive(entity) {
                continue;
            }
            if let Some(view) = Q::fetch(world, entity) {
                return Some((entity, view));
            }
        }
        None
    }

    /// 作成時点でマッチしていたエンティティ数。
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
