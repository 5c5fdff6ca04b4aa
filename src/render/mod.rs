use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::klotski::prelude::*;
use crate::solver::StateNode;

/// Shade of a wall cell; also the separating grid, so walls read as solid.
const WALL_SHADE: u8 = 0x00;
/// Shade of a goal tile.
const GOAL_SHADE: u8 = 0x60;
/// Shade of a movable non-goal tile.
const TILE_SHADE: u8 = 0xA0;
/// Shade of an uncovered cell, the lightest on the board.
const EMPTY_SHADE: u8 = 0xE0;

/// Rasterizes solver states into grayscale frames, one board cell per
/// `cell x cell` pixel square, and writes them out as binary PGMs.
pub struct Renderer<'a> {
    catalogue: &'a Catalogue,
    cell: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(catalogue: &'a Catalogue, cell_pixels: usize) -> Renderer<'a> {
        Renderer { catalogue, cell: cell_pixels }
    }

    /// Pixel dimensions of one rendered frame.
    pub fn dimensions(&self) -> (usize, usize) {
        let geom = self.catalogue.geom();
        (geom.width * self.cell, geom.height * self.cell)
    }

    /// Draws one state. Tiles paint per instance rather than per type so
    /// touching same-type tiles stay visually separate; cells of one
    /// instance connect across the grid lines between them.
    pub fn raster(&self, state: &StateNode) -> Vec<u8> {
        let geom = self.catalogue.geom();
        let (w, h, ic) = (geom.width, geom.height, self.cell);

        // instance grid: walls from the field, then tile index + 1 per cell
        let mut grid: Vec<u8> = state.field.cells().to_vec();
        for (i, tile) in self.catalogue.tiles().iter().enumerate() {
            let p0 = tile.lattice.node(state.tiles[i]).p;
            for &off in &tile.desc.form {
                grid[p0 + off] = (i + 1) as u8;
            }
        }

        let iw = w * ic;
        let mut image = vec![0u8; iw * h * ic];
        for py in 0..h {
            for px in 0..w {
                let v = grid[py * w + px];
                let shade = match v {
                    EMPTY => EMPTY_SHADE,
                    WALL => WALL_SHADE,
                    t if (t as usize) <= self.catalogue.goal_count() => GOAL_SHADE,
                    _ => TILE_SHADE,
                };

                // inner square, leaving the one-pixel grid line
                for y in py * ic + 1..(py + 1) * ic - 1 {
                    for x in px * ic + 1..(px + 1) * ic - 1 {
                        image[y * iw + x] = shade;
                    }
                }

                // fill the borders facing neighbours of the same instance
                if py > 0 && grid[(py - 1) * w + px] == v {
                    let y = py * ic;
                    for x in px * ic + 1..(px + 1) * ic - 1 {
                        image[y * iw + x] = shade;
                    }
                }
                if px > 0 && grid[py * w + px - 1] == v {
                    let x = px * ic;
                    for y in py * ic + 1..(py + 1) * ic - 1 {
                        image[y * iw + x] = shade;
                    }
                }
                if py + 1 < h && grid[(py + 1) * w + px] == v {
                    let y = (py + 1) * ic - 1;
                    for x in px * ic + 1..(px + 1) * ic - 1 {
                        image[y * iw + x] = shade;
                    }
                }
                if px + 1 < w && grid[py * w + px + 1] == v {
                    let x = (px + 1) * ic - 1;
                    for y in py * ic + 1..(py + 1) * ic - 1 {
                        image[y * iw + x] = shade;
                    }
                }

                // the corner quartet where a 2x2 of one instance meets
                if py + 1 < h
                    && px + 1 < w
                    && grid[(py + 1) * w + px] == v
                    && grid[py * w + px + 1] == v
                    && grid[(py + 1) * w + px + 1] == v
                {
                    for (dy, dx) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                        image[((py + 1) * ic - 1 + dy) * iw + (px + 1) * ic - 1 + dx] = shade;
                    }
                }
            }
        }
        image
    }

    /// Writes one solution step as a binary PGM with the numeric header.
    pub fn write_pgm(&self, dir: &Path, step: usize, state: &StateNode) -> Result<PathBuf> {
        let (iw, ih) = self.dimensions();
        let path = dir.join(format!("solution_{step:03}.pgm"));
        let file = File::create(&path)
            .with_context(|| format!("couldn't write image {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write!(out, "P5\n{} {}\n255\n", iw, ih)?;
        out.write_all(&self.raster(state))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Catalogue, StateNode) {
        let scenario =
            Scenario::new("a.\na#".parse().unwrap(), "a.\na.".parse().unwrap()).unwrap();
        let catalogue = Catalogue::from_scenario(&scenario).unwrap();
        let (field, tiles) = catalogue.initial_state().unwrap();
        (catalogue, StateNode { field, tiles, parent: None })
    }

    #[test]
    fn raster_shades_and_connects() {
        let (catalogue, state) = fixture();
        let renderer = Renderer::new(&catalogue, 4);
        let (iw, ih) = renderer.dimensions();
        assert_eq!((iw, ih), (8, 8));

        let image = renderer.raster(&state);
        assert_eq!(image.len(), 64);

        let at = |x: usize, y: usize| image[y * iw + x];
        assert_eq!(at(0, 0), 0x00); // grid line
        assert_eq!(at(2, 2), GOAL_SHADE); // goal tile interior
        assert_eq!(at(6, 2), EMPTY_SHADE); // empty cell interior
        assert_eq!(at(6, 6), WALL_SHADE); // wall interior
        assert_eq!(at(2, 3), GOAL_SHADE); // border inside the two-cell tile
        assert_eq!(at(2, 4), GOAL_SHADE);
        assert_eq!(at(6, 4), 0x00); // empty/wall border stays a line
    }

    #[test]
    fn pgm_has_header_and_raster() {
        let (catalogue, state) = fixture();
        let renderer = Renderer::new(&catalogue, 4);
        let dir = std::env::temp_dir().join(format!("klotski-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = renderer.write_pgm(&dir, 7, &state).unwrap();
        assert!(path.ends_with("solution_007.pgm"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P5\n8 8\n255\n"));
        assert_eq!(bytes.len(), b"P5\n8 8\n255\n".len() + 64);

        std::fs::remove_dir_all(&dir).ok();
    }
}
