use crate::klotski::prelude::*;

/// Index of a state within the search arena.
pub type StateId = usize;

/// One node of the parent-linked search tree.
#[derive(Clone, Debug)]
pub struct StateNode {
    /// The packed board.
    pub field: Field,
    /// One lattice anchor per tile, catalogue order.
    pub tiles: Box<[PosId]>,
    /// The state this one was expanded from; `None` at the root.
    pub parent: Option<StateId>,
}

/// Owns every state the sweep produces. Parent links and the seen-table
/// refer to states by index, so nothing is freed before the search ends.
#[derive(Clone, Debug, Default)]
pub struct StateArena {
    nodes: Vec<StateNode>,
}

impl StateArena {
    pub fn push(&mut self, node: StateNode) -> StateId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: StateId) -> &StateNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
