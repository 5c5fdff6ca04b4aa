pub(crate) mod seen;
pub(crate) mod state;

pub use seen::SeenSet;
pub use state::{StateArena, StateId, StateNode};

use crate::klotski::prelude::*;

/// The result of one breadth-first sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The first state satisfying every goal anchor.
    Solved { goal: StateId },
    /// No goal state exists within the depth cap.
    Exhausted,
}

/// Breadth-first sweep over the slide graph of one puzzle.
///
/// Layers hold the states of one depth in insertion order. Within one
/// mother, tiles expand in catalogue order and directions in up, left,
/// down, right order, which pins down the tie-break between equally short
/// solutions. Duplicate children are never committed: the speculative slide
/// is applied to a scratch field and slid straight back when the seen-table
/// already knows the result.
pub struct Solver<'a> {
    catalogue: &'a Catalogue,
    max_depth: usize,
    arena: StateArena,
    seen: SeenSet,
    layers: Vec<Vec<StateId>>,
}

impl<'a> Solver<'a> {
    pub fn new(catalogue: &'a Catalogue, max_depth: usize) -> Solver<'a> {
        Solver {
            catalogue,
            max_depth,
            arena: StateArena::default(),
            seen: SeenSet::default(),
            layers: vec![],
        }
    }

    /// Runs the sweep to the first goal state or to exhaustion. A puzzle
    /// whose start already satisfies the goal solves in zero slides.
    pub fn run(&mut self) -> Result<Outcome> {
        let (field, tiles) = self.catalogue.initial_state()?;
        let crc = field.fingerprint();
        let root = self.arena.push(StateNode { field, tiles, parent: None });
        self.seen.insert(crc, root);
        self.layers.push(vec![root]);

        if self.catalogue.satisfied(&self.arena.get(root).tiles) {
            return Ok(Outcome::Solved { goal: root });
        }

        for depth in 1..=self.max_depth {
            let (layer, found) = self.expand_layer(depth);
            log::info!("depth {}: {} new states, {} known", depth, layer.len(), self.arena.len());
            let dead_end = layer.is_empty();
            self.layers.push(layer);
            if let Some(goal) = found {
                return Ok(Outcome::Solved { goal });
            }
            if dead_end {
                // nothing left to expand, deeper layers stay empty too
                break;
            }
        }
        Ok(Outcome::Exhausted)
    }

    /// Expands every mother of the layer above, returning the new layer and
    /// the goal state if one was produced.
    fn expand_layer(&mut self, depth: usize) -> (Vec<StateId>, Option<StateId>) {
        let mut layer = vec![];
        for mi in 0..self.layers[depth - 1].len() {
            let mid = self.layers[depth - 1][mi];
            let mother = self.arena.get(mid);
            let mut scratch = mother.field.clone();
            let anchors = mother.tiles.clone();

            for (t, tile) in self.catalogue.tiles().iter().enumerate() {
                let at = anchors[t];
                for d in Direction::all() {
                    let Some(to) = tile.check_move(&scratch, at, d) else {
                        continue;
                    };
                    tile.do_move(&mut scratch, at, to, d);
                    let crc = scratch.fingerprint();
                    if self.seen.contains(crc, &scratch, &self.arena) {
                        // seen before, slide straight back
                        tile.do_move(&mut scratch, to, at, d.opposite());
                        continue;
                    }

                    let mut tiles = anchors.clone();
                    tiles[t] = to;
                    let done = self.catalogue.satisfied(&tiles);
                    let cid = self.arena.push(StateNode {
                        field: scratch.clone(),
                        tiles,
                        parent: Some(mid),
                    });
                    self.seen.insert(crc, cid);
                    layer.push(cid);
                    if done {
                        return (layer, Some(cid));
                    }
                    tile.do_move(&mut scratch, to, at, d.opposite());
                }
            }
        }
        (layer, None)
    }

    /// The solution path, root first. The number of slides is the path
    /// length minus one, which equals the goal's layer depth.
    pub fn solution(&self, goal: StateId) -> Vec<StateId> {
        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(parent) = self.arena.get(cursor).parent {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }

    pub fn state(&self, id: StateId) -> &StateNode {
        self.arena.get(id)
    }

    /// States recorded so far, root included.
    pub fn known_states(&self) -> usize {
        self.arena.len()
    }
}
