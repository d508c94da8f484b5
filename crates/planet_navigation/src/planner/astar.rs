//! A* по графу navmesh.
//!
//! Стоимость ребра: ровно 1 (g = число рёбер), эвристика: евклидова
//! дистанция до цели. На нерегулярном mesh это не consistent A*, путь может
//! быть неоптимальным; упрощение пути дальше это сглаживает.

use bevy::prelude::*;
use std::collections::HashSet;

use super::node::{Path, SearchNode};
use super::open_list::OpenList;
use crate::graph::{SpatialGraphIndex, Vertex};

/// Почему поиск не дал пути (только для логов: снаружи это всегда "нет пути")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPathReason {
    /// Start или target не разрешились в вершину (пустой граф)
    UnresolvedEndpoint,
    /// Вершина назначения непроходима
    DestinationBlocked,
    /// Open list опустел, цель в другой компоненте связности
    Unreachable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Found(Path),
    NoPath(NoPathReason),
}

impl PlanOutcome {
    pub fn into_path(self) -> Option<Path> {
        match self {
            PlanOutcome::Found(path) => Some(path),
            PlanOutcome::NoPath(_) => None,
        }
    }
}

/// Найти путь от ближайшей к `start` вершины до ближайшей к `target`.
pub fn find_path<G>(graph: &G, start: Vec3, target: Vec3) -> PlanOutcome
where
    G: SpatialGraphIndex + ?Sized,
{
    let (Some(first), Some(last)) = (graph.nearest_vertex(start), graph.nearest_vertex(target))
    else {
        return PlanOutcome::NoPath(NoPathReason::UnresolvedEndpoint);
    };

    if !graph.is_traversable(last) {
        return PlanOutcome::NoPath(NoPathReason::DestinationBlocked);
    }

    match search(graph, first, last) {
        Some(path) => PlanOutcome::Found(path),
        None => PlanOutcome::NoPath(NoPathReason::Unreachable),
    }
}

fn search<G>(graph: &G, first: Vertex, last: Vertex) -> Option<Path>
where
    G: SpatialGraphIndex + ?Sized,
{
    let mut nodes = vec![SearchNode {
        vertex: first,
        parent: None,
        g: 0,
        h: first.distance(last),
    }];
    let mut open = OpenList::new();
    let mut closed: HashSet<Vertex> = HashSet::new();
    open.push(0, &nodes);

    while let Some(current) = open.pop(&nodes) {
        let vertex = nodes[current].vertex;
        closed.insert(vertex);

        if vertex == last {
            return Some(reconstruct(&nodes, current));
        }

        let g = nodes[current].g + 1;
        for neighbor in graph.neighbors(vertex) {
            if closed.contains(&neighbor) || !graph.is_traversable(neighbor) {
                continue;
            }

            match open.get(neighbor) {
                None => {
                    nodes.push(SearchNode {
                        vertex: neighbor,
                        parent: Some(current),
                        g,
                        h: neighbor.distance(last),
                    });
                    open.push(nodes.len() - 1, &nodes);
                }
                Some(existing) if g < nodes[existing].g => {
                    // Relaxation: нашли более дешёвого родителя
                    nodes[existing].parent = Some(current);
                    nodes[existing].g = g;
                    open.decreased(existing, &nodes);
                }
                Some(_) => {}
            }
        }
    }

    None
}

/// Раскрутить parent-цепочку от цели до корня и развернуть
fn reconstruct(nodes: &[SearchNode], goal: usize) -> Path {
    let mut path: Path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(id) = cursor {
        path.push(nodes[id].to_path_node());
        cursor = nodes[id].parent;
    }
    path.reverse();
    path
}
