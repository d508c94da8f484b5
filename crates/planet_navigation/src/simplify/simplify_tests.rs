//! Tests for path simplification.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::cell::{Cell, RefCell};

    use crate::graph::Vertex;
    use crate::planner::{Path, PathNode};
    use crate::simplify::{simplify_path, CapsuleDimensions, CollisionQuery, SimplifyParams};

    /// Сферические препятствия: sweep блокируется если ось капсулы
    /// проходит ближе `radius + capsule radius` к центру
    struct SphereObstacles {
        obstacles: Vec<(Vec3, f32)>,
        calls: Cell<usize>,
    }

    impl SphereObstacles {
        fn new(obstacles: Vec<(Vec3, f32)>) -> Self {
            Self { obstacles, calls: Cell::new(0) }
        }

        fn none() -> Self {
            Self::new(Vec::new())
        }
    }

    fn segment_distance(a: Vec3, b: Vec3, point: Vec3) -> f32 {
        let ab = b - a;
        let len_sq = ab.length_squared();
        if len_sq == 0.0 {
            return a.distance(point);
        }
        let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        (a + ab * t).distance(point)
    }

    impl CollisionQuery for SphereObstacles {
        fn capsule_sweep_hits(
            &self,
            p1: Vec3,
            p2: Vec3,
            radius: f32,
            direction: Vec3,
            distance: f32,
            _layer_mask: u32,
        ) -> bool {
            self.calls.set(self.calls.get() + 1);
            let offset = direction.normalize_or_zero() * distance;
            self.obstacles.iter().any(|&(center, obstacle_radius)| {
                let reach = obstacle_radius + radius;
                segment_distance(p1, p1 + offset, center) < reach
                    || segment_distance(p2, p2 + offset, center) < reach
            })
        }
    }

    struct AlwaysHit;

    impl CollisionQuery for AlwaysHit {
        fn capsule_sweep_hits(&self, _: Vec3, _: Vec3, _: f32, _: Vec3, _: f32, _: u32) -> bool {
            true
        }
    }

    /// Записывает аргументы каждого sweep
    #[derive(Default)]
    struct Recorder {
        sweeps: RefCell<Vec<(Vec3, Vec3, f32, Vec3, f32, u32)>>,
    }

    impl CollisionQuery for Recorder {
        fn capsule_sweep_hits(
            &self,
            p1: Vec3,
            p2: Vec3,
            radius: f32,
            direction: Vec3,
            distance: f32,
            layer_mask: u32,
        ) -> bool {
            self.sweeps
                .borrow_mut()
                .push((p1, p2, radius, direction, distance, layer_mask));
            false
        }
    }

    fn params(max_nodes_simplified: usize) -> SimplifyParams {
        SimplifyParams {
            // height == 2 * radius → капсула вырождается в сферу
            capsule: CapsuleDimensions { height: 0.2, radius: 0.1 },
            max_nodes_simplified,
            layer_mask: 0b100,
            surface_origin: Vec3::new(0.0, -1000.0, 0.0),
        }
    }

    fn raw_path(points: &[Vec3]) -> Path {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| PathNode { vertex: Vertex(p), g: i as u32, h: 0.0 })
            .collect()
    }

    fn collinear(n: usize) -> Path {
        let points: Vec<Vec3> = (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        raw_path(&points)
    }

    /// Путь огибает препятствие в (2, 0.1, 0): прямой sweep 0→3 упирается в него
    fn detour() -> Path {
        raw_path(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(3.0, 0.0, 2.0),
            Vec3::new(4.0, 0.0, 0.0),
        ])
    }

    fn detour_obstacle() -> SphereObstacles {
        SphereObstacles::new(vec![(Vec3::new(2.0, 0.1, 0.0), 0.5)])
    }

    #[test]
    fn test_collinear_collapses_to_endpoints() {
        let raw = collinear(6);
        let simplified = simplify_path(&raw, &params(5), &SphereObstacles::none());

        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0], raw[0]);
        assert_eq!(simplified[1], raw[5]);
    }

    #[test]
    fn test_large_budget_same_result() {
        let raw = collinear(6);
        let simplified = simplify_path(&raw, &params(100), &SphereObstacles::none());
        assert_eq!(simplified, vec![raw[0], raw[5]]);
    }

    #[test]
    fn test_budget_limits_collapse() {
        let raw = collinear(6);
        let simplified = simplify_path(&raw, &params(2), &SphereObstacles::none());

        assert_eq!(simplified, vec![raw[0], raw[2], raw[4], raw[5]]);
        for pair in simplified.windows(2) {
            assert!(pair[1].g - pair[0].g <= 2);
        }
    }

    #[test]
    fn test_obstacle_keeps_intermediate_waypoint() {
        let raw = detour();
        let obstacle = detour_obstacle();
        let simplified = simplify_path(&raw, &params(5), &obstacle);

        // 0→2 чисто, 0→3 заблокировано, 2→3 чисто
        assert_eq!(simplified, vec![raw[0], raw[2], raw[3]]);
        assert!(obstacle.calls.get() >= 3);
    }

    #[test]
    fn test_resimplify_is_stable() {
        let obstacle = detour_obstacle();
        let once = simplify_path(&detour(), &params(5), &obstacle);
        let twice = simplify_path(&once, &params(5), &obstacle);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_is_ordered_subset() {
        let raw = detour();
        let simplified = simplify_path(&raw, &params(5), &detour_obstacle());

        let mut cursor = 0;
        for node in &simplified {
            let found = raw[cursor..].iter().position(|n| n == node);
            assert!(found.is_some(), "waypoint {:?} не из сырого пути", node.vertex);
            cursor += found.unwrap_or(0);
        }
        assert_eq!(simplified.first(), raw.first());
        assert_eq!(simplified.last(), raw.last());
    }

    #[test]
    fn test_blocked_everywhere_keeps_raw_path() {
        let raw = collinear(5);
        let simplified = simplify_path(&raw, &params(5), &AlwaysHit);
        assert_eq!(simplified, raw);
    }

    #[test]
    fn test_zero_budget_keeps_raw_path() {
        let raw = collinear(4);
        let simplified = simplify_path(&raw, &params(0), &SphereObstacles::none());
        assert_eq!(simplified, raw);
    }

    #[test]
    fn test_trivial_paths() {
        let empty: Path = Vec::new();
        assert!(simplify_path(&empty, &params(5), &AlwaysHit).is_empty());

        let single = collinear(1);
        assert_eq!(simplify_path(&single, &params(5), &AlwaysHit), single);
    }

    #[test]
    fn test_sweep_arguments() {
        let mut p = params(5);
        p.capsule = CapsuleDimensions { height: 4.0, radius: 1.0 };
        p.surface_origin = Vec3::new(0.0, -10.0, 0.0);

        let raw = raw_path(&[Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)]);
        let recorder = Recorder::default();
        simplify_path(&raw, &p, &recorder);

        let sweeps = recorder.sweeps.borrow();
        assert_eq!(sweeps.len(), 1);
        let (p1, p2, radius, direction, distance, mask) = sweeps[0];
        // Нормаль в (0,0,0) от центра (0,-10,0): +Y
        assert_eq!(p1, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p2, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(radius, 1.0);
        assert_eq!(direction, Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(distance, 5.0);
        assert_eq!(mask, 0b100);
    }

    #[test]
    fn test_capsule_axis() {
        let capsule = CapsuleDimensions { height: 2.0, radius: 1.0 };
        let (p1, p2) = capsule.axis_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(p1, Vec3::Y);
        assert_eq!(p2, Vec3::Y);
    }
}
