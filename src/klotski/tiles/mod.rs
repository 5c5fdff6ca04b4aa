pub(crate) mod lattice;

pub use lattice::{Lattice, PosId, TilePos};

use std::collections::HashSet;

use itertools::Itertools;

use crate::klotski::prelude::*;

/// Where a goal tile has to end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalAnchor {
    pub x: usize,
    pub y: usize,
    pub p: usize,
}

/// Immutable per-tile data: identity, shape, and the slide masks derived
/// from it.
#[derive(Clone, Debug)]
pub struct TileDesc {
    /// The grid character naming this tile.
    pub id: char,
    /// Type tag painted into the packed field. Unique per goal tile, shared
    /// among shape-identical non-goal tiles so swapping them is a no-op on
    /// the field.
    pub tag: u8,
    /// Initial anchor, the top-left of the bounding box.
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Occupied 1-D offsets relative to the anchor, ascending.
    pub form: Vec<usize>,
    /// Leading-edge masks per direction: the offsets newly covered by a
    /// one-step slide that way. Both masks of an axis the tile spans
    /// completely are empty.
    pub edges: [Vec<usize>; 4],
    /// Present on goal tiles only.
    pub goal: Option<GoalAnchor>,
}

/// A tile instance: its descriptor plus the lattice of anchors it can take.
#[derive(Clone, Debug)]
pub struct Tile {
    pub desc: TileDesc,
    pub lattice: Lattice,
}

impl Tile {
    /// Tests whether the tile can slide one cell in direction `d` from
    /// anchor `at`; gives back the destination anchor when it can. Walls
    /// fail the emptiness test like any covered cell.
    pub fn check_move(&self, field: &Field, at: PosId, d: Direction) -> Option<PosId> {
        let to = self.lattice.node(at).next[d.index()]?;
        let p0 = self.lattice.node(to).p;
        self.desc.edges[d.index()]
            .iter()
            .all(|&off| field.get(p0 + off) == EMPTY)
            .then_some(to)
    }

    /// Slides the tile from `from` to the adjacent anchor `to` in direction
    /// `d`: trailing cells are erased, leading cells painted, the overlap
    /// left alone. The opposite slide restores the field byte for byte.
    pub fn do_move(&self, field: &mut Field, from: PosId, to: PosId, d: Direction) {
        let p_old = self.lattice.node(from).p;
        for &off in &self.desc.edges[d.opposite().index()] {
            field.set(p_old + off, EMPTY);
        }
        let p_new = self.lattice.node(to).p;
        for &off in &self.desc.edges[d.index()] {
            field.set(p_new + off, self.desc.tag);
        }
    }
}

/// Everything the search needs to know about one puzzle: the wall field,
/// the tiles with their lattices, and the goal condition. Goal tiles occupy
/// indices `0..goal_count`.
#[derive(Clone, Debug)]
pub struct Catalogue {
    geom: Geometry,
    walls: Field,
    tiles: Vec<Tile>,
    goal_count: usize,
    tag_count: u8,
}

impl Catalogue {
    pub fn from_scenario(scenario: &Scenario) -> Result<Catalogue> {
        let geom = scenario.geom;

        // Seek and catalogue puzzle tiles, building the base wall field.
        let mut walls = Field::empty(geom);
        let mut order: Vec<char> = vec![];
        for x in 0..geom.width {
            for y in 0..geom.height {
                match CellKind::parse(scenario.puzzle[y][x]) {
                    CellKind::Wall => walls.set(geom.offset(x, y), WALL),
                    CellKind::Tile(id) if !order.contains(&id) => order.push(id),
                    _ => {}
                }
            }
        }
        if order.len() > MAX_TILES {
            return Err(anyhow!("too many tiles, at most {MAX_TILES} distinct ids fit"));
        }

        // Count goal tiles and rotate them to the front, keeping discovery order.
        let mut goal_count = 0;
        for x in 0..geom.width {
            for y in 0..geom.height {
                match CellKind::parse(scenario.goal[y][x]) {
                    CellKind::Wall => {
                        if CellKind::parse(scenario.puzzle[y][x]) != CellKind::Wall {
                            return Err(anyhow!("solid tiles don't match"));
                        }
                    }
                    CellKind::Tile(id) => {
                        let Some(i) = order.iter().position(|&known| known == id) else {
                            return Err(anyhow!("goal tile not present in puzzle"));
                        };
                        if i >= goal_count {
                            let id = order.remove(i);
                            order.insert(goal_count, id);
                            goal_count += 1;
                        }
                    }
                    CellKind::Empty => {}
                }
            }
        }
        if goal_count == 0 {
            return Err(anyhow!("no goal tiles found, nothing to do"));
        }

        // Analyze each tile: anchor, bounds, form, type tag, edge masks.
        let mut descs: Vec<TileDesc> = Vec::with_capacity(order.len());
        let mut tag_count: u8 = 0;
        for (i, &id) in order.iter().enumerate() {
            let (x, y, width, height) = bounds(&scenario.puzzle, id).unwrap();
            let form = form_offsets(&scenario.puzzle, id, x, y, geom.width);

            let tag = if i < goal_count {
                tag_count += 1;
                tag_count
            } else {
                match descs[goal_count..i].iter().rev().find(|d| d.form == form) {
                    Some(twin) => twin.tag,
                    None => {
                        tag_count += 1;
                        tag_count
                    }
                }
            };

            let edges = edge_masks(&form, geom, width, height);
            descs.push(TileDesc { id, tag, x, y, width, height, form, edges, goal: None });
        }

        // Locate every goal anchor and make sure the goal grid draws the
        // exact same shape there.
        for desc in descs.iter_mut().take(goal_count) {
            let (gx, gy, _, _) = bounds(&scenario.goal, desc.id).unwrap();
            let placed = form_offsets(&scenario.goal, desc.id, gx, gy, geom.width);
            if placed != desc.form {
                return Err(anyhow!("goal tile forms don't match"));
            }
            desc.goal = Some(GoalAnchor { x: gx, y: gy, p: geom.offset(gx, gy) });
        }

        let tiles = descs
            .into_iter()
            .map(|desc| {
                let lattice = Lattice::new(geom, desc.width, desc.height);
                Tile { desc, lattice }
            })
            .collect();

        Ok(Catalogue { geom, walls, tiles, goal_count, tag_count })
    }

    pub fn geom(&self) -> Geometry {
        self.geom
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn goal_count(&self) -> usize {
        self.goal_count
    }

    pub fn tag_count(&self) -> u8 {
        self.tag_count
    }

    pub fn walls(&self) -> &Field {
        &self.walls
    }

    /// Paints every tile at its initial anchor into the wall field, yielding
    /// the root state. Overlap cannot come from a well-formed grid, so it is
    /// reported as the logic failure it would be.
    pub fn initial_state(&self) -> Result<(Field, Box<[PosId]>)> {
        let mut field = self.walls.clone();
        let mut anchors = Vec::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            let at = tile.lattice.index_of(tile.desc.x, tile.desc.y);
            let p0 = tile.lattice.node(at).p;
            for &off in &tile.desc.form {
                if field.get(p0 + off) != EMPTY {
                    return Err(anyhow!("something went terribly wrong"));
                }
                field.set(p0 + off, tile.desc.tag);
            }
            anchors.push(at);
        }
        Ok((field, anchors.into_boxed_slice()))
    }

    /// True when every goal tile sits on its goal anchor. Non-goal tiles
    /// are free to end up anywhere.
    pub fn satisfied(&self, anchors: &[PosId]) -> bool {
        self.tiles[..self.goal_count]
            .iter()
            .zip(anchors)
            .all(|(tile, &at)| tile.desc.goal.is_some_and(|g| tile.lattice.node(at).p == g.p))
    }

    /// Draws a state back as the character grid it came from.
    pub fn pretty_state(&self, anchors: &[PosId]) -> String {
        let mut rows = vec![vec!['.'; self.geom.width]; self.geom.height];
        for p in 0..self.geom.area() {
            if self.walls.get(p) == WALL {
                rows[p / self.geom.width][p % self.geom.width] = '#';
            }
        }
        for (tile, &at) in self.tiles.iter().zip(anchors) {
            let p0 = tile.lattice.node(at).p;
            for &off in &tile.desc.form {
                let p = p0 + off;
                rows[p / self.geom.width][p % self.geom.width] = tile.desc.id;
            }
        }
        rows.into_iter().map(|row| row.into_iter().join("")).join("\n")
    }
}

/// Bounding box of one tile id in a grid: anchor plus width and height.
fn bounds(rows: &[Vec<char>], id: char) -> Option<(usize, usize, usize, usize)> {
    let mut span: Option<(usize, usize, usize, usize)> = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            if c == id {
                span = Some(match span {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    span.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Offsets of one tile id relative to an anchor, in full-board stride,
/// ascending. The anchor must be the top-left of the id's bounding box.
fn form_offsets(rows: &[Vec<char>], id: char, x0: usize, y0: usize, stride: usize) -> Vec<usize> {
    let mut offsets = vec![];
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            if c == id {
                offsets.push((y - y0) * stride + (x - x0));
            }
        }
    }
    offsets
}

/// Derives the four leading-edge masks of a shape: the form cells whose
/// in-shape neighbour against the direction of travel is absent. Painted at
/// the destination anchor they are exactly the newly covered cells.
fn edge_masks(form: &[usize], geom: Geometry, width: usize, height: usize) -> [Vec<usize>; 4] {
    let stride = geom.width;
    let cells: HashSet<(usize, usize)> = form.iter().map(|&off| (off % stride, off / stride)).collect();

    let mut masks: [Vec<usize>; 4] = Default::default();
    for d in Direction::all() {
        // a tile spanning the whole axis has nowhere to go either way
        let spans = match d {
            Direction::Up | Direction::Down => height == geom.height,
            Direction::Left | Direction::Right => width == geom.width,
        };
        if spans {
            continue;
        }
        let leads = |x: usize, y: usize| match d {
            Direction::Up => y == 0 || !cells.contains(&(x, y - 1)),
            Direction::Left => x == 0 || !cells.contains(&(x - 1, y)),
            Direction::Down => !cells.contains(&(x, y + 1)),
            Direction::Right => !cells.contains(&(x + 1, y)),
        };
        masks[d.index()] =
            form.iter().filter(|&&off| leads(off % stride, off / stride)).copied().collect();
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(puzzle: &[&str], goal: &[&str]) -> Scenario {
        Scenario::new(puzzle.join("\n").parse().unwrap(), goal.join("\n").parse().unwrap()).unwrap()
    }

    fn catalogue(puzzle: &[&str], goal: &[&str]) -> Catalogue {
        Catalogue::from_scenario(&scenario(puzzle, goal)).unwrap()
    }

    const PUZZLE: [&str; 5] = ["bAAc", "bAAc", "deef", "dghf", "i..j"];
    const GOAL: [&str; 5] = ["....", "....", "....", ".AA.", ".AA."];

    #[test]
    fn classic_catalogue() {
        let cat = catalogue(&PUZZLE, &GOAL);
        assert_eq!(cat.tile_count(), 10);
        assert_eq!(cat.goal_count(), 1);
        assert_eq!(cat.tag_count(), 4);

        let a = &cat.tiles()[0].desc;
        assert_eq!(a.id, 'A');
        assert_eq!((a.width, a.height), (2, 2));
        assert_eq!(a.goal.map(|g| (g.x, g.y, g.p)), Some((1, 3, 13)));

        // the four bars share a tag, the four singles share another
        let tag_of = |id: char| cat.tiles().iter().find(|t| t.desc.id == id).unwrap().desc.tag;
        assert_eq!(tag_of('b'), tag_of('c'));
        assert_eq!(tag_of('b'), tag_of('d'));
        assert_eq!(tag_of('b'), tag_of('f'));
        assert_eq!(tag_of('g'), tag_of('h'));
        assert_eq!(tag_of('g'), tag_of('i'));
        assert_eq!(tag_of('g'), tag_of('j'));
        assert_ne!(tag_of('b'), tag_of('g'));
        assert_ne!(tag_of('e'), tag_of('b'));
        assert_ne!(tag_of('A'), tag_of('e'));
    }

    #[test]
    fn edge_masks_follow_the_outline() {
        let cat = catalogue(&["a..", "aa.", "..."], &["a..", "aa.", "..."]);
        let desc = &cat.tiles()[0].desc;
        assert_eq!(desc.form, vec![0, 3, 4]);
        assert_eq!(desc.edges[Direction::Up.index()], vec![0, 4]);
        assert_eq!(desc.edges[Direction::Left.index()], vec![0, 3]);
        assert_eq!(desc.edges[Direction::Down.index()], vec![3, 4]);
        assert_eq!(desc.edges[Direction::Right.index()], vec![0, 4]);
    }

    #[test]
    fn spanning_tiles_cannot_move_on_that_axis() {
        let cat = catalogue(&["a..", "a..", "a.."], &["a..", "a..", "a.."]);
        let desc = &cat.tiles()[0].desc;
        assert!(desc.edges[Direction::Up.index()].is_empty());
        assert!(desc.edges[Direction::Down.index()].is_empty());
        assert_eq!(desc.edges[Direction::Left.index()], vec![0, 3, 6]);
        assert_eq!(desc.edges[Direction::Right.index()], vec![0, 3, 6]);
    }

    #[test]
    fn validation_messages() {
        let err = |p: &[&str], g: &[&str]| {
            Catalogue::from_scenario(&scenario(p, g)).unwrap_err().to_string()
        };
        assert_eq!(err(&["a.", ".."], &["a#", ".."]), "solid tiles don't match");
        assert_eq!(err(&["a.", ".."], &["b.", ".."]), "goal tile not present in puzzle");
        assert_eq!(err(&["a.", ".."], &["..", ".."]), "no goal tiles found, nothing to do");
        assert_eq!(err(&["aa", ".."], &[".a", ".a"]), "goal tile forms don't match");
    }

    #[test]
    fn initial_state_reproduces_the_puzzle() {
        let cat = catalogue(&PUZZLE, &GOAL);
        let (_, anchors) = cat.initial_state().unwrap();
        assert_eq!(cat.pretty_state(&anchors), PUZZLE.join("\n"));
        assert!(!cat.satisfied(&anchors));
    }

    #[test]
    fn moves_round_trip() {
        let cat = catalogue(&["a..", "aa.", "..."], &["a..", "aa.", "..."]);
        let (mut field, anchors) = cat.initial_state().unwrap();
        let tile = &cat.tiles()[0];
        let before = field.clone();
        let at = anchors[0];

        // up is off the board, right is open
        assert_eq!(tile.check_move(&field, at, Direction::Up), None);
        let to = tile.check_move(&field, at, Direction::Right).unwrap();
        tile.do_move(&mut field, at, to, Direction::Right);
        assert_ne!(field, before);

        tile.do_move(&mut field, to, at, Direction::Left);
        assert_eq!(field, before);
    }

    #[test]
    fn moves_respect_walls_and_tiles() {
        let cat = catalogue(&["a#", ".b"], &["..", "ab"]);
        let (mut field, anchors) = cat.initial_state().unwrap();
        let a = &cat.tiles()[0];
        let b = &cat.tiles()[1];
        assert_eq!(a.desc.id, 'a');

        assert!(a.check_move(&field, anchors[0], Direction::Right).is_none()); // wall
        assert!(b.check_move(&field, anchors[1], Direction::Up).is_none()); // wall
        assert!(b.check_move(&field, anchors[1], Direction::Left).is_some());

        let to = a.check_move(&field, anchors[0], Direction::Down).unwrap();
        a.do_move(&mut field, anchors[0], to, Direction::Down);
        assert!(b.check_move(&field, anchors[1], Direction::Left).is_none()); // tile in the way
    }
}
