//! Collision Layers Constants
//!
//! Rapier collision groups: centralised constants для навигации.
//!
//! ## Архитектура:
//! - **Membership (битовая маска):** На каком слое находится объект
//! - **Filter (битовая маска):** С какими слоями объект коллидирует
//!
//! ## Слои:
//! - Layer 1 (0b1 = 1): Ground (поверхность планеты, по ней ходят)
//! - Layer 2 (0b10 = 2): Agents (капсулы NPC/игрока)
//! - Layer 3 (0b100 = 4): Walls (препятствия, блокируют capsule sweep)

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 1: Ground (планета / навигируемая поверхность)
pub const COLLISION_LAYER_GROUND: u32 = 0b1;

/// Layer 2: Agents (капсулы)
pub const COLLISION_LAYER_AGENTS: u32 = 0b10;

/// Layer 3: Walls (статические препятствия)
pub const COLLISION_LAYER_WALLS: u32 = 0b100;

/// Mask для capsule sweep при упрощении пути: только стены.
///
/// Ground не включаем: капсула смещена от поверхности на радиус, но на
/// кривой планете её нижняя точка всё равно может задеть грунт.
pub const COLLISION_MASK_PATH_SWEEP: u32 = COLLISION_LAYER_WALLS;

/// Groups для query filter: "кто угодно" против `mask`
pub fn sweep_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::all(), Group::from_bits_truncate(mask))
}

/// Groups для агента: коллайдит с землёй, стенами и другими агентами
pub fn agent_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_AGENTS),
        Group::from_bits_truncate(
            COLLISION_LAYER_GROUND | COLLISION_LAYER_AGENTS | COLLISION_LAYER_WALLS,
        ),
    )
}
