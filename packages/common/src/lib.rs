pub mod generation;
pub mod schedule;

pub use schedule::{Budget, BudgetSource, DeadlineBasis, Level, StagePolicy, resolve_budget};
