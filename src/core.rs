pub mod cost_model;
pub mod instance;
pub mod mask;
pub mod schedule;
mod solution_space;
pub mod solver;
pub mod step;
pub mod window;
