//! Navigation events: контакты агента с поверхностями от физического слоя

use bevy::prelude::*;

/// Контакт коллайдера агента с навигируемой поверхностью
///
/// Генерируется физическим слоем (collision callbacks):
/// - Entered: агент коснулся поверхности
/// - Resting: агент стоит на поверхности (каждый тик контакта)
/// - Exited: агент оторвался от поверхности
///
/// Только `Resting` что-то делает: переключает активную поверхность и
/// пытается запустить planning. Entered/Exited: пустые hooks.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceContact {
    Entered { agent: Entity, surface: Entity },
    Resting { agent: Entity, surface: Entity },
    Exited { agent: Entity, surface: Entity },
}
