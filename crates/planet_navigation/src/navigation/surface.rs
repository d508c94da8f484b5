//! NavSurface: navmesh планеты, на которой могут стоять агенты.
//!
//! Жизненный цикл явный: `spawn_nav_surface` при загрузке мира, despawn при
//! выгрузке. Planning worker держит свой `Arc` на граф, так что выгрузка
//! посреди поиска безопасна.

use bevy::prelude::*;
use std::fmt;
use std::sync::Arc;

use crate::graph::SpatialGraphIndex;

/// Навигируемая поверхность. Центр планеты: `Transform` того же entity.
#[derive(Component, Clone)]
pub struct NavSurface {
    pub graph: Arc<dyn SpatialGraphIndex>,
}

impl NavSurface {
    pub fn new(graph: Arc<dyn SpatialGraphIndex>) -> Self {
        Self { graph }
    }

    pub fn is_ready(&self) -> bool {
        self.graph.is_ready()
    }
}

impl fmt::Debug for NavSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavSurface")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Spawn поверхности с центром в `center`
pub fn spawn_nav_surface(
    commands: &mut Commands,
    graph: Arc<dyn SpatialGraphIndex>,
    center: Vec3,
) -> Entity {
    commands
        .spawn((NavSurface::new(graph), Transform::from_translation(center)))
        .id()
}
