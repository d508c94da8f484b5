//! Узлы поиска и узлы готового пути.

use serde::{Deserialize, Serialize};

use crate::graph::Vertex;

/// Элемент дерева поиска A* (живёт только внутри одного прогона).
///
/// `parent`: индекс в arena прогона вместо weak back-reference.
/// `g` может уменьшиться после вставки (relaxation), `h`: никогда.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub vertex: Vertex,
    pub parent: Option<usize>,
    pub g: u32,
    pub h: f32,
}

impl SearchNode {
    #[inline]
    pub fn f(&self) -> f32 {
        self.g as f32 + self.h
    }

    pub fn to_path_node(&self) -> PathNode {
        PathNode {
            vertex: self.vertex,
            g: self.g,
            h: self.h,
        }
    }
}

/// Узел готового пути: вершина + bookkeeping A* на момент завершения поиска.
///
/// Равенство только по вершине, g/h не участвуют.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathNode {
    pub vertex: Vertex,
    /// Число рёбер от старта (каждое ребро стоит ровно 1)
    pub g: u32,
    /// Прямая дистанция до вершины назначения
    pub h: f32,
}

impl PathNode {
    #[inline]
    pub fn f(&self) -> f32 {
        self.g as f32 + self.h
    }
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl Eq for PathNode {}

/// Упорядоченный путь start → destination
pub type Path = Vec<PathNode>;
