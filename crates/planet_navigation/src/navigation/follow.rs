//! PathFollowState: какой waypoint сейчас цель агента.
//!
//! Movement controller каждый тик спрашивает `next_waypoint()` и зовёт
//! `advance()`. Курсор только растёт и максимум на 1 за вызов.

use bevy::prelude::*;

use crate::planner::{Path, PathNode};

#[derive(Debug, Clone, Default)]
pub struct PathFollowState {
    path: Option<Path>,
    cursor: usize,
    needs_simplification: bool,
}

impl PathFollowState {
    /// Установить свежий путь (полностью заменяет старый, курсор → 0).
    ///
    /// `None`: "пути нет", агент идёт прямо на цель.
    pub fn install(&mut self, path: Option<Path>) {
        self.needs_simplification = path.as_ref().is_some_and(|p| !p.is_empty());
        self.path = path;
        self.cursor = 0;
    }

    /// Заменить текущий путь упрощённой версией (курсор не трогаем,
    /// упрощение делается в первый же тик, до любого advance)
    pub fn replace_simplified(&mut self, simplified: Path) {
        self.path = Some(simplified);
        self.needs_simplification = false;
    }

    /// Пропустить упрощение (нет collision backend)
    pub fn skip_simplification(&mut self) {
        self.needs_simplification = false;
    }

    pub fn needs_simplification(&self) -> bool {
        self.needs_simplification
    }

    pub fn path(&self) -> Option<&[PathNode]> {
        self.path.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Waypoint под курсором, или живая позиция цели если пути нет /
    /// путь пройден.
    pub fn next_waypoint(&self, target_position: Vec3) -> Vec3 {
        self.current()
            .map(|node| node.vertex.position())
            .unwrap_or(target_position)
    }

    /// Сдвинуть курсор на 1, если агент в пределах `threshold` от waypoint
    pub fn advance(&mut self, agent_position: Vec3, threshold: f32) {
        let Some(node) = self.current() else {
            return;
        };
        if node.vertex.position().distance(agent_position) <= threshold {
            self.cursor += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    fn current(&self) -> Option<&PathNode> {
        self.path.as_ref()?.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;

    fn path(points: &[Vec3]) -> Path {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| PathNode { vertex: Vertex(p), g: i as u32, h: 0.0 })
            .collect()
    }

    #[test]
    fn test_no_path_falls_back_to_target() {
        let state = PathFollowState::default();
        let target = Vec3::new(7.0, 0.0, 7.0);
        assert_eq!(state.next_waypoint(target), target);
        assert!(!state.needs_simplification());
    }

    #[test]
    fn test_advance_steps_through_waypoints() {
        let mut state = PathFollowState::default();
        state.install(Some(path(&[Vec3::ZERO, Vec3::X * 10.0])));
        let target = Vec3::new(20.0, 0.0, 0.0);

        assert_eq!(state.next_waypoint(target), Vec3::ZERO);

        state.advance(Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.next_waypoint(target), Vec3::X * 10.0);

        // Далеко от waypoint: курсор стоит
        state.advance(Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert_eq!(state.cursor(), 1);

        state.advance(Vec3::new(9.0, 0.0, 0.0), 5.0);
        assert_eq!(state.cursor(), 2);
        assert!(state.is_exhausted());
        assert_eq!(state.next_waypoint(target), target);

        // Исчерпанный путь: advance ничего не делает
        state.advance(Vec3::new(20.0, 0.0, 0.0), 5.0);
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_advance_at_most_one_per_call() {
        let mut state = PathFollowState::default();
        // Все waypoints в радиусе threshold
        state.install(Some(path(&[Vec3::ZERO, Vec3::X, Vec3::X * 2.0])));

        state.advance(Vec3::ZERO, 100.0);
        assert_eq!(state.cursor(), 1);
        state.advance(Vec3::ZERO, 100.0);
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_install_resets_cursor_and_flags() {
        let mut state = PathFollowState::default();
        state.install(Some(path(&[Vec3::ZERO, Vec3::X])));
        assert!(state.needs_simplification());
        state.advance(Vec3::ZERO, 1.0);
        assert_eq!(state.cursor(), 1);

        state.install(Some(path(&[Vec3::Z, Vec3::Z * 2.0])));
        assert_eq!(state.cursor(), 0);
        assert!(state.needs_simplification());

        state.replace_simplified(path(&[Vec3::Z * 2.0]));
        assert!(!state.needs_simplification());
        assert_eq!(state.next_waypoint(Vec3::ONE), Vec3::Z * 2.0);

        state.install(None);
        assert!(state.path().is_none());
        assert!(!state.needs_simplification());
    }
}
