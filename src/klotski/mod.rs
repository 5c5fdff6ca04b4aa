/*
 *  A shortest-slide solver core for Klotski-family sliding-block puzzles.
 */

pub mod board;
pub mod consts;
pub mod notation;
pub mod tiles;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Field, Geometry, crc32},
        consts::*,
        notation::{CellKind, GridString, Scenario},
        tiles::{Catalogue, GoalAnchor, Lattice, PosId, Tile, TileDesc, TilePos},
    };
}
