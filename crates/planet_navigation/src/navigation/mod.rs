//! Navigation module
//!
//! Агенты на сферических мирах: A* в фоне, упрощение пути capsule sweep'ами,
//! следование по waypoints. Результат каждого тика: `SteeringTarget`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod components;
pub mod events;
pub mod follow;
pub mod scheduler;
pub mod surface;
pub mod systems;

// Re-export основных типов
pub use components::{NavigationConfig, Navigator, SteeringTarget};
pub use events::SurfaceContact;
pub use follow::PathFollowState;
pub use scheduler::{PlanHandoff, PlanRequest, PlanningScheduler, PlanningState};
pub use surface::{spawn_nav_surface, NavSurface};
pub use systems::SweepQuery;

/// Откуда брать capsule sweep для упрощения путей
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SweepBackend {
    /// `RapierContext::cast_shape` (нужен `RapierPhysicsPlugin`)
    #[default]
    Rapier,
    /// `SweepQuery` resource (вставляет пользователь)
    Resource,
}

/// Navigation Plugin
///
/// Регистрирует навигационные системы в FixedUpdate.
/// Порядок выполнения:
/// 1. receive_finished_plans: забрать результаты planning worker'ов
/// 2. handle_surface_contacts: Resting контакты → запуск planning
/// 3. simplify_fresh_paths: capsule sweep упрощение новых путей
/// 4. advance_waypoints: курсор + SteeringTarget
#[derive(Default)]
pub struct NavigationPlugin {
    pub backend: SweepBackend,
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SurfaceContact>();

        match self.backend {
            SweepBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::receive_finished_plans,
                        systems::handle_surface_contacts,
                        systems::simplify_fresh_paths_rapier,
                        systems::advance_waypoints,
                    )
                        .chain(),
                );
            }
            SweepBackend::Resource => {
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::receive_finished_plans,
                        systems::handle_surface_contacts,
                        systems::simplify_fresh_paths_with_query,
                        systems::advance_waypoints,
                    )
                        .chain(),
                );
            }
        }
    }
}

/// Spawn навигирующего агента (capsule collider + navigation state)
///
/// Невалидный конфиг заменяется дефолтным (с warning'ом).
pub fn spawn_navigator(
    commands: &mut Commands,
    position: Vec3,
    config: NavigationConfig,
    target: Option<Entity>,
) -> Entity {
    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            crate::log_warning(&format!("spawn_navigator: {}, using defaults", err));
            NavigationConfig::default()
        }
    };

    let mut navigator = Navigator::new(&config);
    if let Some(target) = target {
        navigator.set_target(target);
    }

    let half_height = (config.agent_height * 0.5 - config.agent_radius).max(0.0);

    commands
        .spawn((
            Transform::from_translation(position),
            SteeringTarget { point: position },
            navigator,
            Collider::capsule_y(half_height, config.agent_radius),
            crate::collision_layers::agent_groups(),
            config,
        ))
        .id()
}
