//! Open list для A*: binary heap с адресацией по вершине.
//!
//! Хранит индексы узлов из arena поиска. `slots` отображает вершину в
//! позицию в heap: membership за O(1), relaxation (уменьшение g) за
//! O(log n) через `bubble_up`.

use std::collections::HashMap;

use super::node::SearchNode;
use crate::graph::Vertex;

#[derive(Debug, Default)]
pub(crate) struct OpenList {
    heap: Vec<usize>,
    slots: HashMap<Vertex, usize>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Узел в open list с этой вершиной (id в arena)
    pub fn get(&self, vertex: Vertex) -> Option<usize> {
        self.slots.get(&vertex).map(|&slot| self.heap[slot])
    }

    pub fn push(&mut self, id: usize, nodes: &[SearchNode]) {
        let slot = self.heap.len();
        self.heap.push(id);
        self.slots.insert(nodes[id].vertex, slot);
        self.bubble_up(slot, nodes);
    }

    /// Достать узел с минимальным f (tie-break: меньший h, затем порядок вставки)
    pub fn pop(&mut self, nodes: &[SearchNode]) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last, nodes);
        let id = self.heap.pop()?;
        self.slots.remove(&nodes[id].vertex);

        if !self.heap.is_empty() {
            self.trickle_down(0, nodes);
        }
        Some(id)
    }

    /// Узел стал дешевле (relaxation): поднимаем его в heap
    pub fn decreased(&mut self, id: usize, nodes: &[SearchNode]) {
        if let Some(&slot) = self.slots.get(&nodes[id].vertex) {
            self.bubble_up(slot, nodes);
        }
    }

    fn bubble_up(&mut self, mut slot: usize, nodes: &[SearchNode]) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !Self::less(self.heap[slot], self.heap[parent], nodes) {
                break;
            }
            self.swap(slot, parent, nodes);
            slot = parent;
        }
    }

    fn trickle_down(&mut self, mut slot: usize, nodes: &[SearchNode]) {
        loop {
            let left = slot * 2 + 1;
            let right = left + 1;
            let mut best = slot;

            if left < self.heap.len() && Self::less(self.heap[left], self.heap[best], nodes) {
                best = left;
            }
            if right < self.heap.len() && Self::less(self.heap[right], self.heap[best], nodes) {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap(slot, best, nodes);
            slot = best;
        }
    }

    fn swap(&mut self, a: usize, b: usize, nodes: &[SearchNode]) {
        self.heap.swap(a, b);
        self.slots.insert(nodes[self.heap[a]].vertex, a);
        self.slots.insert(nodes[self.heap[b]].vertex, b);
    }

    fn less(a: usize, b: usize, nodes: &[SearchNode]) -> bool {
        let (na, nb) = (&nodes[a], &nodes[b]);
        na.f()
            .total_cmp(&nb.f())
            .then(na.h.total_cmp(&nb.h))
            .then(a.cmp(&b))
            .is_lt()
    }
}
