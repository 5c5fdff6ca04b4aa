use itertools::Itertools;

use crate::klotski::prelude::*;

/// Index of one anchor node within a tile's lattice.
pub type PosId = usize;

/// One legal anchor for a tile: its coordinates, the cached 1-D offset, and
/// the four neighbouring anchors. `None` marks the lattice boundary, which
/// is what keeps a slide from ever leaving the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePos {
    pub x: usize,
    pub y: usize,
    pub p: usize,
    pub next: [Option<PosId>; 4],
}

/// Every anchor a tile of a given footprint can take on the board, linked
/// four ways. Nodes are laid out row-major, so neighbours are index
/// arithmetic. Each tile gets its own lattice; a slide never crosses into
/// another tile's.
#[derive(Clone, Debug)]
pub struct Lattice {
    cols: usize,
    rows: usize,
    nodes: Vec<TilePos>,
}

impl Lattice {
    pub fn new(geom: Geometry, width: usize, height: usize) -> Lattice {
        let cols = geom.width - width + 1;
        let rows = geom.height - height + 1;
        let nodes = (0..rows)
            .cartesian_product(0..cols)
            .map(|(y, x)| {
                let node = y * cols + x;
                TilePos {
                    x,
                    y,
                    p: geom.offset(x, y),
                    next: [
                        (y > 0).then(|| node - cols),        // up
                        (x > 0).then(|| node - 1),           // left
                        (y + 1 < rows).then(|| node + cols), // down
                        (x + 1 < cols).then(|| node + 1),    // right
                    ],
                }
            })
            .collect();
        Lattice { cols, rows, nodes }
    }

    /// The node sitting at a concrete anchor.
    pub fn index_of(&self, x: usize, y: usize) -> PosId {
        y * self.cols + x
    }

    pub fn node(&self, at: PosId) -> &TilePos {
        &self.nodes[at]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
