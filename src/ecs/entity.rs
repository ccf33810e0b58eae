// src/ecs/entity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ecs::component::KindSet;
use crate::ecs::error::EcsError;

/// Entity（エンティティ）は、ゲームに登場する「モノ」を指すただのハンドルだよ！
///
/// `index` はスロット番号、`generation` はそのスロットが何代目かを表すよ。
/// エンティティが破棄されるとスロットは再利用されるけど、世代が進むから
/// 古いハンドルは「見つからない」扱いになるんだ。別のエンティティに化けたりしない！
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub index: u32,
    pub generation: u32,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// 1スロットぶんの管理情報。`kinds` はこのエンティティが持ってるコンポーネント種別のビット集合。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct EntitySlot {
    pub generation: u32,
    pub alive: bool,
    pub kinds: KindSet,
}

/// EntityManager は、エンティティIDの発行・回収を担当するよ。
///
/// 回収したスロットは `free` に積んでおいて、次の `create_entity` で後入れ先出しで再利用する。
/// 上限 (`capacity`) を超えて作ろうとしたら `EcsError::CapacityExhausted` を返す！
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityManager {
    slots: Vec<EntitySlot>,
    free: Vec<u32>,
    capacity: usize,
    alive_count: usize,
}

impl EntityManager {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            capacity,
            alive_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// 新しいエンティティを発行するよ。
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        if self.alive_count >= self.capacity {
            return Err(EcsError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(EntitySlot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.alive = true;
        slot.kinds = KindSet::EMPTY;
        self.alive_count += 1;

        Ok(Entity {
            index,
            generation: slot.generation,
        })
    }

    /// エンティティを回収する。生きてなかったら `false`。
    /// 世代をひとつ進めるので、手元に残ってる古いハンドルはもう解決できなくなる。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        match self.slot_mut(entity) {
            Some(slot) => {
                slot.alive = false;
                slot.kinds = KindSet::EMPTY;
                slot.generation = slot.generation.wrapping_add(1);
            }
            None => return false,
        }
        self.free.push(entity.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    pub(crate) fn slot(&self, entity: Entity) -> Option<&EntitySlot> {
        self.slots
            .get(entity.index as usize)
            .filter(|slot| slot.alive && slot.generation == entity.generation)
    }

    pub(crate) fn slot_mut(&mut self, entity: Entity) -> Option<&mut EntitySlot> {
        self.slots
            .get_mut(entity.index as usize)
            .filter(|slot| slot.alive && slot.generation == entity.generation)
    }

    /// 生きてるエンティティをインデックス昇順で返すイテレーター。
    pub(crate) fn iter_alive(&self) -> impl Iterator<Item = (Entity, &EntitySlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| {
                (
                    Entity {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    slot,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_entities_gives_unique_ids() {
        let mut manager = EntityManager::with_capacity(8);

        let entity1 = manager.create_entity().unwrap();
        let entity2 = manager.create_entity().unwrap();
        let entity3 = manager.create_entity().unwrap();

        assert_ne!(entity1, entity2);
        assert_ne!(entity2, entity3);
        assert_eq!(entity1.index, 0);
        assert_eq!(entity3.index, 2);
        assert_eq!(manager.alive_count(), 3);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut manager = EntityManager::with_capacity(8);
        let old = manager.create_entity().unwrap();
        assert!(manager.destroy_entity(old));

        let new = manager.create_entity().unwrap();
        assert_eq!(new.index, old.index, "スロットは再利用されるはず");
        assert_ne!(new.generation, old.generation);
        assert!(!manager.is_alive(old), "古いハンドルは見つからない扱い");
        assert!(manager.is_alive(new));
        assert!(!manager.destroy_entity(old), "二重破棄は何もしない");
    }

    #[test]
    fn capacity_is_a_recoverable_error() {
        let mut manager = EntityManager::with_capacity(2);
        let first = manager.create_entity().unwrap();
        manager.create_entity().unwrap();

        assert_eq!(
            manager.create_entity(),
            Err(EcsError::CapacityExhausted { capacity: 2 })
        );

        manager.destroy_entity(first);
        assert!(manager.create_entity().is_ok(), "空きができたらまた作れる");
    }
}
