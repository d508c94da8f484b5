//! Headless demo навигации
//!
//! Агент на UV-сфере идёт за блуждающей целью. Без рендера, без Rapier:
//! capsule sweep отвечает "препятствий нет", так что упрощение схлопывает
//! путь по бюджету узлов.

use bevy::prelude::*;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use planet_navigation::{
    create_headless_app, log_info, spawn_nav_surface, spawn_navigator, CollisionQuery,
    DeterministicRng, GraphNavMesh, NavigationConfig, NavigationPlugin, Navigator, SteeringTarget,
    SurfaceContact, SweepBackend, SweepQuery,
};

const PLANET_RADIUS: f32 = 50.0;
const TICKS: usize = 600;

/// Sweep backend без препятствий
struct OpenSky;

impl CollisionQuery for OpenSky {
    fn capsule_sweep_hits(&self, _: Vec3, _: Vec3, _: f32, _: Vec3, _: f32, _: u32) -> bool {
        false
    }
}

/// Demo state: кто за кем идёт
#[derive(Resource)]
struct Demo {
    surface: Entity,
    agent: Entity,
    target: Entity,
}

/// Агент "стоит" на планете каждый тик
fn emit_resting_contacts(demo: Res<Demo>, mut contacts: EventWriter<SurfaceContact>) {
    contacts.write(SurfaceContact::Resting {
        agent: demo.agent,
        surface: demo.surface,
    });
}

/// Простой movement controller: шаг к SteeringTarget, прижимаем к сфере
fn steer_agent(demo: Res<Demo>, mut agents: Query<(&SteeringTarget, &mut Transform)>) {
    let Ok((steering, mut transform)) = agents.get_mut(demo.agent) else {
        return;
    };

    let offset = steering.point - transform.translation;
    let step = offset.clamp_length_max(0.5);
    transform.translation = (transform.translation + step).normalize_or_zero() * PLANET_RADIUS;
}

/// Цель перепрыгивает в случайную вершину каждые 2 секунды
fn wander_target(
    demo: Res<Demo>,
    mut rng: ResMut<DeterministicRng>,
    mut transforms: Query<&mut Transform>,
    time: Res<Time<Fixed>>,
    mut last_jump: Local<Duration>,
) {
    if time.elapsed().saturating_sub(*last_jump) < Duration::from_secs(2) {
        return;
    }
    *last_jump = time.elapsed();

    if let Ok(mut transform) = transforms.get_mut(demo.target) {
        let direction = Vec3::new(
            rng.rng.gen_range(-1.0..1.0),
            rng.rng.gen_range(-1.0..1.0),
            rng.rng.gen_range(-1.0..1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        transform.translation = direction * PLANET_RADIUS;
    }
}

fn build_planet(rng: &mut DeterministicRng) -> GraphNavMesh {
    let mut mesh = GraphNavMesh::uv_sphere(PLANET_RADIUS, 16, 24);

    // Несколько непроходимых вершин (полюса не трогаем)
    for _ in 0..20 {
        let index = rng.rng.gen_range(1..mesh.vertex_count() - 1);
        mesh.set_traversable(index, false);
    }

    mesh
}

fn main() {
    let seed = 42;
    println!("Starting planet navigation demo (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(NavigationPlugin {
        backend: SweepBackend::Resource,
    })
    .insert_resource(SweepQuery(Arc::new(OpenSky)));

    let mesh = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        build_planet(&mut rng)
    };

    let demo = {
        let world = app.world_mut();
        let demo = {
            let mut commands = world.commands();
            let surface = spawn_nav_surface(&mut commands, Arc::new(mesh), Vec3::ZERO);
            let target = commands
                .spawn(Transform::from_translation(Vec3::NEG_Y * PLANET_RADIUS))
                .id();
            let agent = spawn_navigator(
                &mut commands,
                Vec3::Y * PLANET_RADIUS,
                NavigationConfig::default(),
                Some(target),
            );
            Demo {
                surface,
                agent,
                target,
            }
        };
        world.flush();
        demo
    };

    app.insert_resource(demo).add_systems(
        FixedUpdate,
        (emit_resting_contacts, wander_target, steer_agent),
    );

    for tick in 0..TICKS {
        app.update();

        if tick % 60 == 0 {
            let world = app.world_mut();
            let agent = world.resource::<Demo>().agent;
            let Some(navigator) = world.get::<Navigator>(agent) else {
                continue;
            };
            let waypoints = navigator.path_points().len();
            let cursor = navigator.follow.cursor();
            let planning = navigator.is_planning();
            let position = world
                .get::<Transform>(agent)
                .map(|t| t.translation)
                .unwrap_or_default();

            log_info(&format!(
                "Tick {}: agent at {:.1?}, {} waypoints (cursor {}), planning: {}",
                tick, position, waypoints, cursor, planning
            ));
        }

        // Даём planning потоку шанс закончить между тиками
        std::thread::sleep(Duration::from_millis(1));
    }

    println!("Demo complete!");
}
