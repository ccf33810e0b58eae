// src/ecs/component.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::*;
use crate::ecs::entity::Entity;
use crate::ecs::query::Fetch;
use crate::ecs::world::World;

/// Component（コンポーネント）トレイトだよ！
///
/// コンポーネントの種類はコンパイル時に決まった閉じた集合 (`ComponentKind`) で、
/// 各型は自分の種類と、`ComponentTable` のどの欄に住んでるかを知ってる。
/// 実装は下の `component_table!` が全部生成するので、手で書くことはないよ。
pub trait Component: Clone + fmt::Debug + 'static {
    const KIND: ComponentKind;

    fn storage(table: &ComponentTable) -> &ComponentStorage<Self>;
    fn storage_mut(table: &mut ComponentTable) -> &mut ComponentStorage<Self>;
}

/// tick の中だけ生きるイベントコンポーネントの目印。
pub trait EventComponent: Component {}

/// 特定種類のコンポーネントを、エンティティのスロット番号で引ける配列にしまう箱！📦
///
/// 中身は `Vec<Option<T>>` の疎な配列なので、検索は O(1)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStorage<T> {
    components: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            len: 0,
        }
    }
}

impl<T> ComponentStorage<T> {
    /// スロットにコンポーネントを入れる。前に入ってたものがあれば返すよ。
    pub fn insert(&mut self, index: u32, component: T) -> Option<T> {
        let index = index as usize;
        if index >= self.components.len() {
            self.components.resize_with(index + 1, || None);
        }
        let old = self.components[index].replace(component);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.components.get(index as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.components.get_mut(index as usize).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, index: u32) -> Option<T> {
        let removed = self.components.get_mut(index as usize).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// コンポーネント種別のビット集合。エンティティごとの「持ってる種類」もこれで管理する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KindSet(pub u32);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    pub const fn of(kind: ComponentKind) -> KindSet {
        KindSet(kind.bit())
    }

    pub const fn with(self, kind: ComponentKind) -> KindSet {
        KindSet(self.0 | kind.bit())
    }

    pub const fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }

    pub fn insert(&mut self, kind: ComponentKind) {
        self.0 |= kind.bit();
    }

    pub fn remove(&mut self, kind: ComponentKind) {
        self.0 &= !kind.bit();
    }

    pub fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// `other` の種類を全部持ってる？
    pub fn contains_all(self, other: KindSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: KindSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .iter()
            .copied()
            .filter(move |kind| self.contains(*kind))
    }
}

/// コンポーネント種別の一覧表から、種別 enum・ストレージ表・トレイト実装をまとめて作るマクロ。
macro_rules! component_table {
    (
        persistent { $($pty:ident => $pfield:ident),* $(,)? }
        events { $($ety:ident => $efield:ident),* $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ComponentKind {
            $($pty,)*
            $($ety,)*
        }

        impl ComponentKind {
            pub const ALL: &'static [ComponentKind] = &[
                $(ComponentKind::$pty,)*
                $(ComponentKind::$ety,)*
            ];

            pub const fn bit(self) -> u32 {
                1 << (self as u32)
            }

            pub fn is_event(self) -> bool {
                KindSet::EVENTS.contains(self)
            }
        }

        impl KindSet {
            /// イベントコンポーネント全種類。
            pub const EVENTS: KindSet = KindSet($((1u32 << (ComponentKind::$ety as u32)))|*);
        }

        /// 全種類のストレージを並べた表。イベントの欄はスナップショットに含めない。
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct ComponentTable {
            $(pub(crate) $pfield: ComponentStorage<$pty>,)*
            $(#[serde(skip)] pub(crate) $efield: ComponentStorage<$ety>,)*
        }

        impl ComponentTable {
            /// 型を知らなくても種類だけで消せるようにするための入口。
            pub(crate) fn remove_kind(&mut self, kind: ComponentKind, index: u32) {
                match kind {
                    $(ComponentKind::$pty => { self.$pfield.remove(index); })*
                    $(ComponentKind::$ety => { self.$efield.remove(index); })*
                }
            }
        }

        $(
            impl Component for $pty {
                const KIND: ComponentKind = ComponentKind::$pty;
                fn storage(table: &ComponentTable) -> &ComponentStorage<Self> { &table.$pfield }
                fn storage_mut(table: &mut ComponentTable) -> &mut ComponentStorage<Self> { &mut table.$pfield }
            }
        )*

        $(
            impl Component for $ety {
                const KIND: ComponentKind = ComponentKind::$ety;
                fn storage(table: &ComponentTable) -> &ComponentStorage<Self> { &table.$efield }
                fn storage_mut(table: &mut ComponentTable) -> &mut ComponentStorage<Self> { &mut table.$efield }
            }

            impl EventComponent for $ety {}
        )*

        $(
            impl Fetch for $pty {
                fn required() -> KindSet { KindSet::of(ComponentKind::$pty) }
                fn fetch(world: &World, entity: Entity) -> Option<Self> { world.get_component::<$pty>(entity).cloned() }
            }

            impl Fetch for Option<$pty> {
                fn required() -> KindSet { KindSet::EMPTY }
                fn fetch(world: &World, entity: Entity) -> Option<Self> { Some(world.get_component::<$pty>(entity).cloned()) }
            }
        )*

        $(
            impl Fetch for $ety {
                fn required() -> KindSet { KindSet::of(ComponentKind::$ety) }
                fn fetch(world: &World, entity: Entity) -> Option<Self> { world.get_component::<$ety>(entity).cloned() }
            }
        )*
    };
}

component_table! {
    persistent {
        Transform => transform,
        PhysObject => phys_object,
        Drawable => drawable,
        Creature => creature,
        Player => player,
        PlayerController => player_controller,
        GameController => game_controller,
        Monster => monster,
        Bullet => bullet,
        Pickup => pickup,
        Animation => animation,
        Corpse => corpse,
    }
    events {
        EventInput => event_input,
        EventCollide => event_collide,
        EventConferBonus => event_confer_bonus,
        EventAwardPoints => event_award_points,
        EventTakeDamage => event_take_damage,
        EventPlayerDied => event_player_died,
        EventDraw => event_draw,
        EventPlaySound => event_play_sound,
    }
}
