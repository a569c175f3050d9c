use std::collections::HashSet;
use crate::state_graph::models::{NodeRecord, PushMove, StateGraph, UniqueNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertResult {
    Inserted(usize),
    Improved(usize),
    Unchanged(usize),
}

impl StateGraph {
    pub fn new() -> Self {
        StateGraph {
            nodes: bimap::BiMap::new(),
            records: Vec::new(),
            closed: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Inserts the node, or replaces its record if `record` reaches it with fewer pushes, or
    /// with as many pushes and fewer steps. Closed nodes are never reopened.
    pub fn upsert_state(&mut self, state: UniqueNode, record: NodeRecord) -> UpsertResult {
        if let Some(&id) = self.nodes.get_by_left(&state) {
            if self.closed.contains(&id) {
                return UpsertResult::Unchanged(id);
            }
            let existing = &self.records[id];
            let better = (record.pushes, record.steps) < (existing.pushes, existing.steps);
            if better {
                self.records[id] = record;
                UpsertResult::Improved(id)
            } else {
                UpsertResult::Unchanged(id)
            }
        } else {
            let id = self.records.len();
            self.records.push(record);

            // we know that this insertion is unique, because id is unique, and we just checked to ensure that the state is unique
            let inserted = self.nodes.insert_no_overwrite(state, id);
            assert!(inserted.is_ok(), "node ids are handed out once");
            UpsertResult::Inserted(id)
        }
    }

    pub fn get_state(&self, id: usize) -> Option<&UniqueNode> {
        self.nodes.get_by_right(&id)
    }

    pub fn record(&self, id: usize) -> &NodeRecord {
        &self.records[id]
    }

    pub fn mark_closed(&mut self, node_id: usize) {
        self.closed.insert(node_id);
    }

    pub fn is_closed(&self, node_id: usize) -> bool {
        self.closed.contains(&node_id)
    }

    /// Follows parent links back to the root and returns the pushes in play order.
    pub fn path_to(&self, node_id: usize) -> Vec<PushMove> {
        let mut moves = Vec::new();
        let mut current = node_id;
        while let Some((parent, push)) = self.records[current].parent {
            moves.push(push);
            current = parent;
        }
        moves.reverse();
        moves
    }
}

impl Default for StateGraph {
    fn default() -> Self {
        StateGraph::new()
    }
}
