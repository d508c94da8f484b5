//! Rapier backend для `CollisionQuery`: capsule shape-cast.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::CollisionQuery;
use crate::collision_layers::sweep_groups;

/// Capsule sweep через query pipeline Rapier.
///
/// Капсула строится прямо в world space (pos = 0, rot = identity), поэтому
/// концы оси `p1`/`p2` передаются как есть. В query уходит parry shape
/// (`Collider::raw`). Сенсоры игнорируются.
pub struct RapierSweep<'a, 'w> {
    context: &'a RapierContext<'w>,
}

impl<'a, 'w> RapierSweep<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self { context }
    }
}

impl CollisionQuery for RapierSweep<'_, '_> {
    fn capsule_sweep_hits(
        &self,
        p1: Vec3,
        p2: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layer_mask: u32,
    ) -> bool {
        let Some(velocity) = direction.try_normalize() else {
            return false;
        };

        let shape = Collider::capsule(p1, p2, radius);
        let options = ShapeCastOptions {
            max_time_of_impact: distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: false,
        };
        let filter = QueryFilter::new()
            .groups(sweep_groups(layer_mask))
            .exclude_sensors();

        self.context
            .cast_shape(
                Vec3::ZERO,
                Quat::IDENTITY,
                velocity,
                shape.raw.as_ref(),
                options,
                filter,
            )
            .is_some()
    }
}
