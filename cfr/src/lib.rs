pub mod eval;
pub mod games;
pub mod profile;
pub mod regret;
pub mod report;
pub mod solvers;

pub use solvers::cfr::{
    Trainer,
    TrainingArgs,
};
