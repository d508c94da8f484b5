//! Navigation компоненты: конфиг агента, состояние навигации, steering output

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::follow::PathFollowState;
use super::scheduler::PlanningScheduler;
use crate::collision_layers::COLLISION_MASK_PATH_SWEEP;
use crate::error::{NavError, NavResult};
use crate::planner::PathNode;
use crate::simplify::CapsuleDimensions;

/// Параметры навигации агента
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Полная высота капсулы агента (метры)
    pub agent_height: f32,
    /// Радиус капсулы агента (метры)
    pub agent_radius: f32,
    /// Минимальная пауза между planning прогонами (секунды)
    pub refresh_delay: f32,
    /// Сколько сырых узлов можно схлопнуть от одного якоря
    pub max_nodes_simplified: usize,
    /// Дистанция, на которой waypoint считается пройденным (метры)
    pub waypoint_reach_distance: f32,
    /// Collision layers, блокирующие capsule sweep
    pub obstacle_mask: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            agent_height: 2.0,
            agent_radius: 1.0,
            refresh_delay: 0.5,
            max_nodes_simplified: 5,
            waypoint_reach_distance: 5.0,
            obstacle_mask: COLLISION_MASK_PATH_SWEEP,
        }
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> NavResult<()> {
        let invalid = |field, reason| Err(NavError::InvalidConfig { field, reason });

        if !(self.agent_radius > 0.0) {
            return invalid("agent_radius", "must be positive");
        }
        if !(self.agent_height > 0.0) {
            return invalid("agent_height", "must be positive");
        }
        if self.agent_height < self.agent_radius * 2.0 {
            return invalid("agent_height", "must be at least twice the radius");
        }
        if !(self.refresh_delay >= 0.0) || !self.refresh_delay.is_finite() {
            return invalid("refresh_delay", "must be a finite non-negative number");
        }
        if !(self.waypoint_reach_distance > 0.0) {
            return invalid("waypoint_reach_distance", "must be positive");
        }
        if self.obstacle_mask == 0 {
            return invalid("obstacle_mask", "must select at least one layer");
        }
        Ok(())
    }

    pub fn capsule(&self) -> CapsuleDimensions {
        CapsuleDimensions {
            height: self.agent_height,
            radius: self.agent_radius,
        }
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_secs_f32(self.refresh_delay.max(0.0))
    }
}

/// Навигационная способность агента (композиция, а не базовый класс).
///
/// Цепляется к любому entity с `Transform`. Хранит путь, курсор,
/// planning scheduler, активную поверхность и цель.
#[derive(Component, Debug)]
pub struct Navigator {
    pub follow: PathFollowState,
    pub scheduler: PlanningScheduler,
    /// Поверхность, на которой агент стоит сейчас (меняется при переходе)
    pub surface: Option<Entity>,
    /// За кем идём
    pub target: Option<Entity>,
}

impl Navigator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            follow: PathFollowState::default(),
            scheduler: PlanningScheduler::new(config.refresh_delay()),
            surface: None,
            target: None,
        }
    }

    pub fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn path(&self) -> Option<&[PathNode]> {
        self.follow.path()
    }

    /// Waypoints текущего пути (debug polyline)
    pub fn path_points(&self) -> Vec<Vec3> {
        self.path()
            .map(|nodes| nodes.iter().map(|n| n.vertex.position()).collect())
            .unwrap_or_default()
    }

    pub fn is_planning(&self) -> bool {
        self.scheduler.is_planning()
    }

    pub fn next_waypoint(&self, target_position: Vec3) -> Vec3 {
        self.follow.next_waypoint(target_position)
    }
}

/// Куда рулить в этом тике (читает внешний movement controller)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringTarget {
    pub point: Vec3,
}
