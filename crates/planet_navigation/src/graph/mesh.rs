//! GraphNavMesh: простой in-memory `SpatialGraphIndex`.
//!
//! Строится из явного списка вершин + рёбер, либо из indexed triangle list
//! (берём только adjacency, саму триангуляцию делает внешний builder).

use bevy::prelude::*;
use std::collections::HashMap;

use super::{SpatialGraphIndex, Vertex};

#[derive(Debug, Clone, Default)]
pub struct GraphNavMesh {
    vertices: Vec<Vertex>,
    lookup: HashMap<Vertex, usize>,
    adjacency: Vec<Vec<usize>>,
    traversable: Vec<bool>,
    ready: bool,
}

impl GraphNavMesh {
    /// Пустой граф, `is_ready() == false` до `set_ready(true)`
    pub fn new() -> Self {
        Self::default()
    }

    /// Граф из вершин и неориентированных рёбер (индексы в `points`).
    ///
    /// Рёбра с индексом за пределами `points` игнорируются.
    pub fn from_edges(points: &[Vec3], edges: &[(usize, usize)]) -> Self {
        let mut mesh = Self::new();
        let ids: Vec<usize> = points.iter().map(|&p| mesh.add_vertex(p)).collect();
        for &(a, b) in edges {
            if let (Some(&a), Some(&b)) = (ids.get(a), ids.get(b)) {
                mesh.add_edge(a, b);
            }
        }
        mesh.ready = true;
        mesh
    }

    /// Граф из треугольников: каждая сторона треугольника: ребро.
    pub fn from_triangles(points: &[Vec3], triangles: &[[usize; 3]]) -> Self {
        let edges: Vec<(usize, usize)> = triangles
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect();
        Self::from_edges(points, &edges)
    }

    /// UV-сфера вокруг начала координат (poles + `rings - 1` колец по
    /// `segments` вершин). Fixture для demo и тестов.
    pub fn uv_sphere(radius: f32, rings: usize, segments: usize) -> Self {
        let rings = rings.max(2);
        let segments = segments.max(3);

        let mut points = vec![Vec3::Y * radius];
        for ring in 1..rings {
            let polar = std::f32::consts::PI * ring as f32 / rings as f32;
            for segment in 0..segments {
                let azimuth = std::f32::consts::TAU * segment as f32 / segments as f32;
                points.push(Vec3::new(
                    radius * polar.sin() * azimuth.cos(),
                    radius * polar.cos(),
                    radius * polar.sin() * azimuth.sin(),
                ));
            }
        }
        let south = points.len();
        points.push(Vec3::NEG_Y * radius);

        let ring_vertex = |ring: usize, segment: usize| 1 + (ring - 1) * segments + segment % segments;

        let mut triangles = Vec::new();
        for segment in 0..segments {
            triangles.push([0, ring_vertex(1, segment), ring_vertex(1, segment + 1)]);
            triangles.push([south, ring_vertex(rings - 1, segment + 1), ring_vertex(rings - 1, segment)]);
        }
        for ring in 1..rings - 1 {
            for segment in 0..segments {
                let a = ring_vertex(ring, segment);
                let b = ring_vertex(ring, segment + 1);
                let c = ring_vertex(ring + 1, segment);
                let d = ring_vertex(ring + 1, segment + 1);
                triangles.push([a, c, b]);
                triangles.push([b, c, d]);
            }
        }

        Self::from_triangles(&points, &triangles)
    }

    /// Добавить вершину (дубликат по координатам возвращает существующий индекс)
    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        let vertex = Vertex(position);
        if let Some(&index) = self.lookup.get(&vertex) {
            return index;
        }

        let index = self.vertices.len();
        self.vertices.push(vertex);
        self.lookup.insert(vertex, index);
        self.adjacency.push(Vec::new());
        self.traversable.push(true);
        index
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a == b || a >= self.vertices.len() || b >= self.vertices.len() {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    pub fn set_traversable(&mut self, index: usize, traversable: bool) {
        if let Some(flag) = self.traversable.get_mut(index) {
            *flag = traversable;
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        self.vertices.get(index).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn index_of(&self, vertex: Vertex) -> Option<usize> {
        self.lookup.get(&vertex).copied()
    }
}

impl SpatialGraphIndex for GraphNavMesh {
    fn nearest_vertex(&self, point: Vec3) -> Option<Vertex> {
        self.vertices
            .iter()
            .copied()
            .min_by(|a, b| {
                a.0.distance_squared(point)
                    .total_cmp(&b.0.distance_squared(point))
            })
    }

    fn neighbors(&self, vertex: Vertex) -> Vec<Vertex> {
        let Some(index) = self.index_of(vertex) else {
            return Vec::new();
        };
        self.adjacency[index]
            .iter()
            .map(|&n| self.vertices[n])
            .collect()
    }

    fn is_traversable(&self, vertex: Vertex) -> bool {
        self.index_of(vertex)
            .map(|index| self.traversable[index])
            .unwrap_or(false)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_fan() -> GraphNavMesh {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        GraphNavMesh::from_triangles(&points, &[[0, 1, 2], [1, 3, 2]])
    }

    #[test]
    fn test_triangle_adjacency() {
        let mesh = triangle_fan();
        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.is_ready());

        let v0 = mesh.vertex(0).unwrap();
        let v3 = mesh.vertex(3).unwrap();
        assert_eq!(mesh.neighbors(v0).len(), 2);
        // 1-2: общее ребро двух треугольников, 1 и 2 видят по 3 соседа
        assert_eq!(mesh.neighbors(mesh.vertex(1).unwrap()).len(), 3);
        assert!(!mesh.neighbors(v0).contains(&v3));
    }

    #[test]
    fn test_duplicate_points_merge() {
        let mut mesh = GraphNavMesh::new();
        let a = mesh.add_vertex(Vec3::X);
        let b = mesh.add_vertex(Vec3::X);
        assert_eq!(a, b);
        assert_eq!(mesh.vertex_count(), 1);
        assert!(!mesh.is_ready());
    }

    #[test]
    fn test_nearest_vertex() {
        let mesh = triangle_fan();
        let nearest = mesh.nearest_vertex(Vec3::new(0.9, 0.3, 0.8)).unwrap();
        assert_eq!(nearest, Vertex::new(1.0, 0.0, 1.0));
        assert!(GraphNavMesh::new().nearest_vertex(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_uv_sphere_topology() {
        let mesh = GraphNavMesh::uv_sphere(10.0, 6, 8);
        // 2 poles + 5 колец по 8
        assert_eq!(mesh.vertex_count(), 42);
        assert!(mesh.is_ready());

        let north = mesh.vertex(0).unwrap();
        assert_eq!(mesh.neighbors(north).len(), 8);

        for i in 0..mesh.vertex_count() {
            let v = mesh.vertex(i).unwrap();
            assert!((v.position().length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_traversable_flags() {
        let mut mesh = triangle_fan();
        let v2 = mesh.vertex(2).unwrap();
        assert!(mesh.is_traversable(v2));

        mesh.set_traversable(2, false);
        assert!(!mesh.is_traversable(v2));
        // Вершина не из графа
        assert!(!mesh.is_traversable(Vertex::new(9.0, 9.0, 9.0)));
    }
}
