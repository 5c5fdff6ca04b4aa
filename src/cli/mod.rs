mod options;

use std::fs;

pub use options::SolverOptions;

use crate::prelude::*;

/// The command-line front-end: read one puzzle/goal pair, solve it, report.
pub struct App {
    options: SolverOptions,
}

impl App {
    pub fn new(options: SolverOptions) -> App {
        App { options }
    }

    /// Solves the configured scenario. "No solution within the depth cap"
    /// is an answer, not an error; only bad input or I/O fails.
    pub fn run(&self) -> Result<()> {
        let scenario = self.load_scenario()?;
        log::info!("puzzle -> goal:\n{}", scenario.pretty());

        let catalogue = Catalogue::from_scenario(&scenario)?;
        log::info!(
            "{} tiles, {} of them goal tiles, {} type tags",
            catalogue.tile_count(),
            catalogue.goal_count(),
            catalogue.tag_count()
        );

        let mut solver = Solver::new(&catalogue, self.options.max_depth);
        match solver.run()? {
            Outcome::Solved { goal } => {
                let path = solver.solution(goal);
                log::info!("finished, best solution has {} steps", path.len() - 1);
                if self.options.render {
                    self.dump_images(&catalogue, &solver, &path)?;
                }
            }
            Outcome::Exhausted => {
                log::info!(
                    "finished, no solutions found within {} steps",
                    self.options.max_depth
                );
            }
        }
        Ok(())
    }

    fn load_scenario(&self) -> Result<Scenario> {
        let puzzle = fs::read_to_string(&self.options.puzzle)
            .with_context(|| format!("couldn't read puzzle {}", self.options.puzzle.display()))?;
        let goal = fs::read_to_string(&self.options.goal)
            .with_context(|| format!("couldn't read goal {}", self.options.goal.display()))?;
        Scenario::new(puzzle.parse()?, goal.parse()?)
    }

    /// Dumps the solution path as one image per step, root first.
    fn dump_images(
        &self,
        catalogue: &Catalogue,
        solver: &Solver<'_>,
        path: &[StateId],
    ) -> Result<()> {
        fs::create_dir_all(&self.options.output_dir)
            .with_context(|| format!("couldn't create {}", self.options.output_dir.display()))?;
        let renderer = Renderer::new(catalogue, self.options.cell_pixels);
        for (step, &id) in path.iter().enumerate() {
            let state = solver.state(id);
            log::debug!("step {}:\n{}", step, catalogue.pretty_state(&state.tiles));
            let file = renderer.write_pgm(&self.options.output_dir, step, state)?;
            log::debug!("dumped {}", file.display());
        }
        Ok(())
    }
}
