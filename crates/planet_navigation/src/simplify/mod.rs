//! PathSimplifier: greedy sight-line collapsing с бюджетом узлов.
//!
//! От якоря `s` пробуем дотянуться капсулой до всё более дальних узлов
//! сырого пути. Пока sweep чистый и бюджет не исчерпан: узлы схлопываются.
//! Иначе фиксируем последний достижимый узел и делаем его новым якорем.
//! Локально оптимально, не глобально.

pub mod rapier;

#[cfg(test)]
mod simplify_tests;

pub use rapier::RapierSweep;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::planner::{Path, PathNode};

/// Capsule sweep query к физике (внешний коллаборатор).
///
/// `p1`/`p2`: концы оси капсулы, `direction`: направление sweep
/// (не обязательно нормализованное), `distance`: длина sweep.
pub trait CollisionQuery {
    fn capsule_sweep_hits(
        &self,
        p1: Vec3,
        p2: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layer_mask: u32,
    ) -> bool;
}

/// Габариты тела агента
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDimensions {
    /// Полная высота (включая полусферы)
    pub height: f32,
    pub radius: f32,
}

impl CapsuleDimensions {
    /// Ось капсулы над вершиной `base`, вдоль нормали поверхности
    pub fn axis_at(&self, base: Vec3, normal: Vec3) -> (Vec3, Vec3) {
        let body = (self.height - self.radius * 2.0).max(0.0);
        let start = self.radius;
        (base + normal * start, base + normal * (start + body))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimplifyParams {
    pub capsule: CapsuleDimensions,
    /// Сколько сырых узлов можно схлопнуть от одного якоря
    pub max_nodes_simplified: usize,
    pub layer_mask: u32,
    /// Центр планеты: нормаль в вершине = (vertex - origin).normalize()
    pub surface_origin: Vec3,
}

impl SimplifyParams {
    fn surface_normal(&self, point: Vec3) -> Vec3 {
        (point - self.surface_origin).try_normalize().unwrap_or(Vec3::Y)
    }

    fn sweep_hits<Q>(&self, from: PathNode, to: PathNode, query: &Q) -> bool
    where
        Q: CollisionQuery + ?Sized,
    {
        let base = from.vertex.position();
        let (p1, p2) = self.capsule.axis_at(base, self.surface_normal(base));
        let direction = to.vertex.position() - base;
        let distance = base.distance(to.vertex.position());
        query.capsule_sweep_hits(p1, p2, self.capsule.radius, direction, distance, self.layer_mask)
    }
}

/// Упростить сырой путь A* за один проход.
///
/// Результат: подмножество `raw` в исходном порядке, начинается с `raw[0]`
/// и заканчивается последним узлом. Между двумя соседними waypoints не
/// больше `max_nodes_simplified - 1` пропущенных узлов. Если заблокирован
/// даже соседний узел, ребро графа принимается как есть.
pub fn simplify_path<Q>(raw: &[PathNode], params: &SimplifyParams, query: &Q) -> Path
where
    Q: CollisionQuery + ?Sized,
{
    let Some(&first) = raw.first() else {
        return Vec::new();
    };

    let last = raw.len() - 1;
    let mut simplified = vec![first];
    let mut tail = 0;

    let mut anchor = 0;
    let mut probe = 1;
    let mut last_ok = 0;
    let mut collapsed = 0;

    while tail != last {
        if probe > last {
            // last_ok всегда == probe - 1, значит здесь это последний узел
            simplified.push(raw[last_ok]);
            tail = last_ok;
            continue;
        }

        let blocked = collapsed >= params.max_nodes_simplified
            || params.sweep_hits(raw[anchor], raw[probe], query);

        if !blocked {
            last_ok = probe;
            probe += 1;
            collapsed += 1;
        } else if last_ok == anchor {
            simplified.push(raw[probe]);
            tail = probe;
            anchor = probe;
            last_ok = probe;
            probe += 1;
            collapsed = 0;
        } else {
            simplified.push(raw[last_ok]);
            tail = last_ok;
            anchor = last_ok;
            collapsed = 0;
        }
    }

    simplified
}
