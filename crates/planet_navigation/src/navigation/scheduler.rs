//! PathPlanningScheduler: не больше одного planning прогона на агента
//! и не чаще чем раз в `refresh_delay`.
//!
//! State machine: `Idle → Planning → Idle`. Throttle считается от более
//! позднего из двух моментов: старт последнего прогона и его завершение.
//!
//! Worker thread: fire-and-forget, никогда не join'ится. Результат
//! передаётся через [`PlanHandoff`]: один слот + generation counter.
//! Foreground не блокируется: `poll()` только проверяет счётчик.

use bevy::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::error::NavResult;
use crate::graph::SpatialGraphIndex;
use crate::planner::{find_path, PlanOutcome};

/// Позиции, захваченные в момент старта (worker не читает живую цель)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub start: Vec3,
    pub target: Vec3,
}

/// Single-producer/single-consumer слот для результата planning.
///
/// Worker публикует результат и инкрементит `generation` (Release),
/// foreground сравнивает `generation` (Acquire) со своим consumed и
/// только тогда забирает слот.
#[derive(Debug, Default)]
pub struct PlanHandoff {
    slot: Mutex<Option<PlanOutcome>>,
    generation: AtomicU64,
}

impl PlanHandoff {
    pub fn publish(&self, outcome: PlanOutcome) {
        *self.lock() = Some(outcome);
        self.generation.fetch_add(1, Ordering::Release);
    }

    pub fn take(&self) -> Option<PlanOutcome> {
        self.lock().take()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, Option<PlanOutcome>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningState {
    Idle,
    Planning { started_at: Duration },
}

#[derive(Debug)]
pub struct PlanningScheduler {
    state: PlanningState,
    refresh_delay: Duration,
    throttle_from: Option<Duration>,
    handoff: Arc<PlanHandoff>,
    consumed: u64,
}

impl PlanningScheduler {
    pub fn new(refresh_delay: Duration) -> Self {
        Self {
            state: PlanningState::Idle,
            refresh_delay,
            throttle_from: None,
            handoff: Arc::new(PlanHandoff::default()),
            consumed: 0,
        }
    }

    pub fn state(&self) -> PlanningState {
        self.state
    }

    pub fn is_planning(&self) -> bool {
        matches!(self.state, PlanningState::Planning { .. })
    }

    pub fn is_throttled(&self, now: Duration) -> bool {
        self.throttle_from
            .is_some_and(|from| now.saturating_sub(from) < self.refresh_delay)
    }

    pub fn can_start(&self, now: Duration, graph_ready: bool) -> bool {
        graph_ready && !self.is_planning() && !self.is_throttled(now)
    }

    /// Сколько результатов worker'ы уже опубликовали
    pub fn generation(&self) -> u64 {
        self.handoff.generation()
    }

    /// Попытка запустить planning в фоне.
    ///
    /// `Ok(false)`: запрос молча отброшен (уже planning, throttle, navmesh
    /// не готов). `Err`: ОС не дала поток, состояние остаётся `Idle`.
    pub fn try_start(
        &mut self,
        now: Duration,
        graph: Arc<dyn SpatialGraphIndex>,
        request: PlanRequest,
    ) -> NavResult<bool> {
        if !self.can_start(now, graph.is_ready()) {
            return Ok(false);
        }

        let handoff = Arc::clone(&self.handoff);
        thread::Builder::new()
            .name("nav-planner".to_string())
            .spawn(move || {
                let outcome = find_path(graph.as_ref(), request.start, request.target);
                handoff.publish(outcome);
            })?;

        self.state = PlanningState::Planning { started_at: now };
        self.throttle_from = Some(now);
        Ok(true)
    }

    /// Забрать завершённый результат, если worker его опубликовал.
    ///
    /// Переводит state в `Idle` и открывает throttle window от `now`.
    pub fn poll(&mut self, now: Duration) -> Option<PlanOutcome> {
        let generation = self.handoff.generation();
        if generation == self.consumed {
            return None;
        }
        self.consumed = generation;

        let outcome = self.handoff.take()?;
        self.state = PlanningState::Idle;
        self.throttle_from = Some(now);
        Some(outcome)
    }
}
