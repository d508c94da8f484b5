//! Navigation systems (FixedUpdate, порядок задаёт `NavigationPlugin`)

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;
use std::sync::Arc;

use super::components::{NavigationConfig, Navigator, SteeringTarget};
use super::events::SurfaceContact;
use super::scheduler::PlanRequest;
use super::surface::NavSurface;
use crate::planner::PlanOutcome;
use crate::simplify::{simplify_path, CollisionQuery, RapierSweep, SimplifyParams};

/// Collision backend без Rapier (тесты, кастомная физика)
#[derive(Resource, Clone)]
pub struct SweepQuery(pub Arc<dyn CollisionQuery + Send + Sync>);

/// Система: забрать результаты planning worker'ов
///
/// Устанавливает путь (или "нет пути"), курсор → 0, помечает путь для
/// упрощения, открывает throttle window.
pub fn receive_finished_plans(
    mut navigators: Query<(Entity, &mut Navigator)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed();

    for (entity, mut navigator) in navigators.iter_mut() {
        let Some(outcome) = navigator.scheduler.poll(now) else {
            continue;
        };

        match outcome {
            PlanOutcome::Found(path) => {
                crate::log(&format!(
                    "Navigation: {:?} path installed ({} nodes)",
                    entity,
                    path.len()
                ));
                navigator.follow.install(Some(path));
            }
            PlanOutcome::NoPath(reason) => {
                crate::log_info(&format!(
                    "Navigation: {:?} no path ({:?}), steering straight at target",
                    entity, reason
                ));
                navigator.follow.install(None);
            }
        }
    }
}

/// Система: контакты с поверхностями → попытка planning
///
/// Позиции агента и цели захватываются здесь, worker работает с копией.
pub fn handle_surface_contacts(
    mut events: EventReader<SurfaceContact>,
    mut navigators: Query<(&Transform, &mut Navigator)>,
    surfaces: Query<&NavSurface>,
    targets: Query<&Transform>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed();

    for event in events.read() {
        let (agent, surface) = match *event {
            SurfaceContact::Resting { agent, surface } => (agent, surface),
            SurfaceContact::Entered { agent, surface } => {
                crate::log(&format!("Navigation: {:?} entered surface {:?}", agent, surface));
                continue;
            }
            SurfaceContact::Exited { agent, surface } => {
                crate::log(&format!("Navigation: {:?} left surface {:?}", agent, surface));
                continue;
            }
        };

        let Ok((transform, mut navigator)) = navigators.get_mut(agent) else {
            continue;
        };
        let Ok(nav_surface) = surfaces.get(surface) else {
            continue;
        };

        navigator.surface = Some(surface);
        if !nav_surface.is_ready() {
            continue;
        }

        let Some(target_transform) = navigator.target.and_then(|t| targets.get(t).ok()) else {
            continue;
        };

        let request = PlanRequest {
            start: transform.translation,
            target: target_transform.translation,
        };

        match navigator
            .scheduler
            .try_start(now, Arc::clone(&nav_surface.graph), request)
        {
            Ok(true) => crate::log(&format!(
                "Navigation: {:?} planning {:?} → {:?}",
                agent, request.start, request.target
            )),
            Ok(false) => {}
            Err(err) => crate::log_error(&format!("Navigation: {:?} {}", agent, err)),
        }
    }
}

/// Упростить все свежеустановленные пути одним проходом
fn simplify_pending<Q>(
    query: &Q,
    navigators: &mut Query<(Entity, &NavigationConfig, &mut Navigator)>,
    surfaces: &Query<&Transform, With<NavSurface>>,
) where
    Q: CollisionQuery + ?Sized,
{
    for (entity, config, mut navigator) in navigators.iter_mut() {
        if !navigator.follow.needs_simplification() {
            continue;
        }

        let surface_origin = navigator
            .surface
            .and_then(|s| surfaces.get(s).ok())
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO);

        let params = SimplifyParams {
            capsule: config.capsule(),
            max_nodes_simplified: config.max_nodes_simplified,
            layer_mask: config.obstacle_mask,
            surface_origin,
        };

        let raw = navigator.follow.path().unwrap_or_default();
        let simplified = simplify_path(raw, &params, query);
        crate::log(&format!(
            "Navigation: {:?} path simplified {} → {} nodes",
            entity,
            raw.len(),
            simplified.len()
        ));
        navigator.follow.replace_simplified(simplified);
    }
}

/// Система: упрощение путей через Rapier capsule cast
pub fn simplify_fresh_paths_rapier(
    rapier: ReadRapierContext,
    mut navigators: Query<(Entity, &NavigationConfig, &mut Navigator)>,
    surfaces: Query<&Transform, With<NavSurface>>,
) {
    let Ok(context) = rapier.single() else {
        // Нет physics world: оставляем сырые пути
        for (entity, _, mut navigator) in navigators.iter_mut() {
            if navigator.follow.needs_simplification() {
                crate::log_warning(&format!(
                    "Navigation: {:?} no rapier context, using raw path",
                    entity
                ));
                navigator.follow.skip_simplification();
            }
        }
        return;
    };

    simplify_pending(&RapierSweep::new(&context), &mut navigators, &surfaces);
}

/// Система: упрощение путей через `SweepQuery` resource
pub fn simplify_fresh_paths_with_query(
    sweep: Res<SweepQuery>,
    mut navigators: Query<(Entity, &NavigationConfig, &mut Navigator)>,
    surfaces: Query<&Transform, With<NavSurface>>,
) {
    simplify_pending(sweep.0.as_ref(), &mut navigators, &surfaces);
}

/// Система: продвинуть курсор и выставить SteeringTarget
///
/// Если цели нет (или она despawned): рулим в собственную позицию.
pub fn advance_waypoints(
    mut navigators: Query<(&Transform, &NavigationConfig, &mut Navigator, &mut SteeringTarget)>,
    targets: Query<&Transform>,
) {
    for (transform, config, mut navigator, mut steering) in navigators.iter_mut() {
        let position = transform.translation;
        let target_position = navigator
            .target
            .and_then(|t| targets.get(t).ok())
            .map(|t| t.translation)
            .unwrap_or(position);

        navigator.follow.advance(position, config.waypoint_reach_distance);

        let point = navigator.follow.next_waypoint(target_position);
        if steering.point != point {
            steering.point = point;
        }
    }
}
