//! Planet Navigation Core
//!
//! ECS-навигация агентов по сферическим мирам на Bevy 0.16.
//!
//! Pipeline одного агента:
//! - A* по графу вершин navmesh планеты (фоновый поток)
//! - упрощение пути capsule sweep'ами (Rapier или свой backend)
//! - следование по waypoints → `SteeringTarget` каждый FixedUpdate тик

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod collision_layers;
pub mod error;
pub mod graph;
pub mod logger;
pub mod navigation;
pub mod planner;
pub mod simplify;

// Re-export базовых типов для удобства
pub use error::{NavError, NavResult};
pub use graph::{GraphNavMesh, SpatialGraphIndex, Vertex};
pub use logger::*;
pub use navigation::{
    spawn_nav_surface, spawn_navigator, NavSurface, NavigationConfig, NavigationPlugin, Navigator,
    SteeringTarget, SurfaceContact, SweepBackend, SweepQuery,
};
pub use planner::{find_path, NoPathReason, Path, PathNode, PlanOutcome};
pub use simplify::{simplify_path, CapsuleDimensions, CollisionQuery, SimplifyParams};

/// Главный plugin симуляции (fixed tick + навигация)
#[derive(Default)]
pub struct SimulationPlugin {
    pub backend: SweepBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(TICK))
            .add_plugins(NavigationPlugin {
                backend: self.backend,
            });
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Длительность одного simulation tick (60Hz)
pub const TICK: Duration = Duration::from_nanos(16_666_667);

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` двигает время ровно на один fixed tick,
/// независимо от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(TICK)) // 60Hz FixedUpdate
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    app
}
