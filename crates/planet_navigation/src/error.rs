//! Ошибки навигационного слоя
//!
//! Навигация деградирует мягко: "нет пути": не ошибка, агент просто идёт
//! прямо на цель. `NavError` покрывает только то, что реально нельзя
//! проигнорировать молча: битый конфиг и отказ ОС создать worker thread.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("Invalid navigation config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Failed to spawn planning worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

pub type NavResult<T> = Result<T, NavError>;
