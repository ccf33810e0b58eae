// src/ecs/world.rs

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::tuning::MAX_ENTITIES;
use crate::ecs::component::{Component, ComponentKind, ComponentTable, EventComponent, KindSet};
use crate::ecs::entity::{Entity, EntityManager};
use crate::ecs::error::EcsError;
use crate::ecs::query::{Fetch, Query};

/// ゲーム世界の全てのエンティティとコンポーネントを管理する中心的な構造体 (自作ECSのコア！)。
///
/// - エンティティの生存管理は `EntityManager` (世代付きID)
/// - コンポーネントは種類ごとの `ComponentStorage` に、スロット番号で入ってる
/// - エンティティごとに「持ってる種類」のビット集合があって、クエリはそれで絞り込む
///
/// イベントコンポーネントの欄はシリアライズされない。スナップショットは tick の合間
/// (イベントが全部掃除された後) に取る前提だよ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    entities: EntityManager,
    components: ComponentTable,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }

    /// 同時に生きていられるエンティティ数の上限を指定して作る。
    pub fn with_capacity(capacity: usize) -> Self {
        World {
            entities: EntityManager::with_capacity(capacity),
            components: ComponentTable::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    pub fn live_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// 新しいエンティティを作る。コンポーネントはまだ何も付いてないよ。
    /// 上限に達してたら `EcsError::CapacityExhausted`。
    pub fn spawn(&mut self) -> Result<Entity, EcsError> {
        let entity = self.entities.create_entity()?;
        debug!("World: spawned {}", entity);
        Ok(entity)
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// エンティティを破棄する。付いてたコンポーネントも全部お掃除！🧹
    ///
    /// 生きてなかった (破棄済み・古いハンドル) なら何もせず `false`。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let kinds = match self.entities.slot(entity) {
            Some(slot) => slot.kinds,
            None => return false,
        };
        for kind in kinds.kinds() {
            self.components.remove_kind(kind, entity.index);
        }
        debug!("World: destroyed {} ({} components)", entity, kinds.0.count_ones());
        self.entities.destroy_entity(entity)
    }

    /// コンポーネントを付ける。
    ///
    /// 同じ種類がもう付いてたら上書きはせずに `EcsError::DuplicateComponent` を返す。
    /// 差し替えたいときは `replace_component` を使ってね。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        let slot = self
            .entities
            .slot_mut(entity)
            .ok_or(EcsError::NoSuchEntity(entity))?;
        if slot.kinds.contains(T::KIND) {
            warn!("World: {} already has {:?}", entity, T::KIND);
            return Err(EcsError::DuplicateComponent {
                entity,
                kind: T::KIND,
            });
        }
        slot.kinds.insert(T::KIND);
        T::storage_mut(&mut self.components).insert(entity.index, component);
        Ok(())
    }

    /// コンポーネントを付ける、または差し替える。前の値があれば返すよ。
    pub fn replace_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<Option<T>, EcsError> {
        let slot = self
            .entities
            .slot_mut(entity)
            .ok_or(EcsError::NoSuchEntity(entity))?;
        slot.kinds.insert(T::KIND);
        Ok(T::storage_mut(&mut self.components).insert(entity.index, component))
    }

    /// コンポーネントへの読み取り専用参照。エンティティが死んでる・持ってないなら `None`。
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.entities.slot(entity)?;
        T::storage(&self.components).get(entity.index)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities.slot(entity)?;
        T::storage_mut(&mut self.components).get_mut(entity.index)
    }

    pub fn has_component(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.kinds_of(entity).is_some_and(|kinds| kinds.contains(kind))
    }

    pub fn kinds_of(&self, entity: Entity) -> Option<KindSet> {
        self.entities.slot(entity).map(|slot| slot.kinds)
    }

    /// コンポーネントを1つ外す。エンティティ自体は生きたまま (中身が空でも生存扱い)。
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let slot = self.entities.slot_mut(entity)?;
        slot.kinds.remove(T::KIND);
        T::storage_mut(&mut self.components).remove(entity.index)
    }

    /// `kinds` を全部持ってる生きたエンティティの一覧 (インデックス昇順)。
    pub fn entities_with(&self, kinds: KindSet) -> Vec<Entity> {
        self.entities
            .iter_alive()
            .filter(|(_, slot)| slot.kinds.contains_all(kinds))
            .map(|(entity, _)| entity)
            .collect()
    }

    pub fn count_with(&self, kinds: KindSet) -> usize {
        self.entities
            .iter_alive()
            .filter(|(_, slot)| slot.kinds.contains_all(kinds))
            .count()
    }

    /// 書き換えながら回せるクエリカーソルを作る。使い方はこんな感じ：
    ///
    /// ```ignore
    /// let mut query = world.query::<(Transform, Option<PhysObject>)>();
    /// while let Some((entity, (transform, phys))) = query.next(world) {
    ///     // world を書き換えてOK
    /// }
    /// ```
    pub fn query<Q: Fetch>(&self) -> Query<Q> {
        Query::new(self.entities_with(Q::required()))
    }

    /// 読むだけのシステム向けのイテレーター版。
    pub fn iter<Q: Fetch>(&self) -> impl Iterator<Item = (Entity, Q)> + '_ {
        self.entities_with(Q::required())
            .into_iter()
            .filter_map(move |entity| Q::fetch(self, entity).map(|view| (entity, view)))
    }

    /// その種類を持つ最初のエンティティ。セッションに1つしかないコントローラー用。
    pub fn singleton<T: Component>(&self) -> Option<(Entity, T)> {
        let entity = self
            .entities
            .iter_alive()
            .find(|(_, slot)| slot.kinds.contains(T::KIND))
            .map(|(entity, _)| entity)?;
        self.get_component::<T>(entity).map(|c| (entity, c.clone()))
    }

    /// 今生きてるイベントコンポーネント持ちのエンティティ数。
    pub fn event_count(&self) -> usize {
        self.entities
            .iter_alive()
            .filter(|(_, slot)| slot.kinds.intersects(KindSet::EVENTS))
            .count()
    }

    /// ある種類のイベントを全部取り出して、入れ物のエンティティごと消す。
    /// 順番は発行順 (インデックス昇順) じゃなくてスロット順だけど、tick ごとに決定的だよ。
    pub fn take_events<T: EventComponent>(&mut self) -> Vec<T> {
        let entities = self.entities_with(KindSet::of(T::KIND));
        let mut events = Vec::with_capacity(entities.len());
        for entity in entities {
            if let Some(event) = self.remove_component::<T>(entity) {
                events.push(event);
            }
            self.destroy_entity(entity);
        }
        events
    }

    /// 残ってるイベントを種類を問わず全部消す。消した数を返す。
    pub fn drain_events(&mut self) -> usize {
        let leftovers: Vec<Entity> = self
            .entities
            .iter_alive()
            .filter(|(_, slot)| slot.kinds.intersects(KindSet::EVENTS))
            .map(|(entity, _)| entity)
            .collect();
        for entity in &leftovers {
            self.destroy_entity(*entity);
        }
        leftovers.len()
    }
}

// テストは隣の world_tests.rs にまとめてある
#[cfg(test)]
#[path = "world_tests.rs"]
mod world_tests;
