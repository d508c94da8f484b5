//! Navigation graph: вершины поверхности и query interface к navmesh.
//!
//! Сам navmesh (триангуляция сферы, baking): внешний коллаборатор.
//! Ядро навигации видит его только через [`SpatialGraphIndex`].

pub mod mesh;

pub use mesh::GraphNavMesh;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Точка навигируемой поверхности.
///
/// Identity по координатам, а не по индексу в графе: на этом держится
/// membership в open/closed списках A*. `-0.0` и `0.0` считаются одной точкой.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex(pub Vec3);

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.0
    }

    pub fn distance(&self, other: Vertex) -> f32 {
        self.0.distance(other.0)
    }

    #[inline]
    fn key(&self) -> [u32; 3] {
        // + 0.0 сворачивает -0.0 в 0.0
        [
            (self.0.x + 0.0).to_bits(),
            (self.0.y + 0.0).to_bits(),
            (self.0.z + 0.0).to_bits(),
        ]
    }
}

impl From<Vec3> for Vertex {
    fn from(position: Vec3) -> Self {
        Self(position)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Query interface к navmesh коллаборатору.
///
/// Реализация обязана быть стабильной пока `is_ready() == true`: planning
/// worker читает её из другого потока без блокировок.
pub trait SpatialGraphIndex: Send + Sync {
    /// Ближайшая вершина графа к точке (`None` если граф пуст)
    fn nearest_vertex(&self, point: Vec3) -> Option<Vertex>;

    /// Соседи вершины в стабильном порядке
    fn neighbors(&self, vertex: Vertex) -> Vec<Vertex>;

    fn is_traversable(&self, vertex: Vertex) -> bool;

    /// Готов ли navmesh (guard перед запуском planning)
    fn is_ready(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_equality_by_coordinates() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a, b);
        assert_ne!(a, Vertex::new(1.0, 2.0, 3.5));
    }

    #[test]
    fn test_negative_zero_is_same_vertex() {
        let a = Vertex::new(0.0, 1.0, 0.0);
        let b = Vertex::new(-0.0, 1.0, -0.0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
