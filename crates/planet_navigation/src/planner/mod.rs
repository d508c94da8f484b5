//! PathPlanner: A* поверх `SpatialGraphIndex`.

pub mod astar;
pub mod node;
mod open_list;


pub use astar::{find_path, NoPathReason, PlanOutcome};
pub use node::{Path, PathNode};
