// src/ecs/error.rs

use thiserror::Error;

use crate::ecs::component::ComponentKind;
use crate::ecs::entity::Entity;

/// World の操作で起きうるエラーだよ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// エンティティの上限に達した。破棄が進めばまた作れる。
    #[error("entity capacity exhausted ({capacity} live entities)")]
    CapacityExhausted { capacity: usize },

    /// 破棄済み、または存在しないエンティティへの操作。
    #[error("no such entity: {0}")]
    NoSuchEntity(Entity),

    /// 同じ種類のコンポーネントを二重に付けようとした (プログラムのバグ)。
    #[error("{entity} already has a {kind:?} component")]
    DuplicateComponent { entity: Entity, kind: ComponentKind },

    /// 1つだけのはずのコンポーネント (コントローラー) を2つ目として作ろうとした。
    #[error("a {kind:?} already exists on {entity}")]
    SingletonExists { entity: Entity, kind: ComponentKind },
}
