use itertools::Itertools;

use crate::klotski::prelude::*;

/// What one grid character stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Empty,
    Tile(char),
}

impl CellKind {
    /// Classifies a puzzle character. Anything that is not a wall or an
    /// empty marker names a tile; equal characters mean one tile.
    pub fn parse(c: char) -> CellKind {
        match c {
            '#' => CellKind::Wall,
            '.' | ' ' => CellKind::Empty,
            id => CellKind::Tile(id),
        }
    }
}

/// One rectangular character grid, as read from a puzzle or goal file.
/// The board dimensions are whatever the grid shape says they are.
#[derive(Clone, Debug)]
pub struct GridString {
    pub repr: String,
    pub rows: Vec<Vec<char>>,
}

impl std::str::FromStr for GridString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
        let body = &lines[start..end];
        if body.is_empty() {
            return Err(anyhow!("grid has no rows"));
        }

        // editors love to trim trailing blanks; short rows pad out as empty cells
        let width = body.iter().map(|l| l.chars().count()).max().unwrap();
        let rows = body
            .iter()
            .map(|l| {
                let mut row: Vec<char> = l.chars().collect();
                row.resize(width, ' ');
                row
            })
            .collect();
        Ok(GridString { repr: s.to_owned(), rows })
    }
}

impl GridString {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.rows[0].len(), self.rows.len())
    }
}

/// A validated puzzle/goal pair of identical dimensions. The puzzle grid is
/// the starting placement; the goal grid pins the tiles it mentions and
/// leaves every other tile unconstrained.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub geom: Geometry,
    pub puzzle: Vec<Vec<char>>,
    pub goal: Vec<Vec<char>>,
}

impl Scenario {
    pub fn new(puzzle: GridString, goal: GridString) -> Result<Scenario> {
        let geom = puzzle.geometry();
        if goal.geometry() != geom {
            return Err(anyhow!(
                "puzzle is {}x{} but goal is {}x{}",
                geom.width,
                geom.height,
                goal.geometry().width,
                goal.geometry().height
            ));
        }
        Ok(Scenario { geom, puzzle: puzzle.rows, goal: goal.rows })
    }

    /// Renders puzzle and goal side by side, the way the solver announces its input.
    pub fn pretty(&self) -> String {
        let bar: String = "-".repeat(self.geom.width);
        let mut out = vec![format!(" {}   {}", bar, bar)];
        for (p, g) in self.puzzle.iter().zip(&self.goal) {
            out.push(format!("|{}| |{}|", p.iter().join(""), g.iter().join("")));
        }
        out.push(format!(" {}   {}", bar, bar));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_pads_ragged_rows() {
        let grid: GridString = "ab\nc\n".parse().unwrap();
        assert_eq!(grid.rows, vec![vec!['a', 'b'], vec!['c', ' ']]);
        assert_eq!(grid.geometry(), Geometry::new(2, 2));
    }

    #[test]
    fn rejects_empty_input() {
        assert!("\n\n".parse::<GridString>().is_err());
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let p: GridString = "ab\n..".parse().unwrap();
        let g: GridString = "ab.".parse().unwrap();
        assert!(Scenario::new(p, g).is_err());
    }

    #[test]
    fn pretty_is_side_by_side() {
        let s = Scenario::new("a.".parse().unwrap(), ".a".parse().unwrap()).unwrap();
        assert_eq!(s.pretty(), " --   --\n|a.| |.a|\n --   --");
    }

    #[test]
    fn classifies_cells() {
        assert_eq!(CellKind::parse('#'), CellKind::Wall);
        assert_eq!(CellKind::parse('.'), CellKind::Empty);
        assert_eq!(CellKind::parse(' '), CellKind::Empty);
        assert_eq!(CellKind::parse('A'), CellKind::Tile('A'));
    }
}
