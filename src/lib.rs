pub mod cli;
pub mod klotski;
pub mod render;
pub mod solver;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{Context, Error, anyhow, bail};
        pub type Result<T> = anyhow::Result<T, Error>;
    }
}

pub mod prelude {
    pub use super::cli::*;
    pub use super::klotski::prelude::*;
    pub use super::render::*;
    pub use super::solver::*;
    pub use super::utils::prelude::*;
}
