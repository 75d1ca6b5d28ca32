//! Journey planner: path finding and live ETAs.
//!
//! Path queries build a directed graph from the network's routes and run a
//! breadth-first search for the path with the fewest segments. ETA queries
//! estimate arrival at each stop of a journey's route from its latest
//! position and speed.

mod config;
mod eta;
mod graph;
mod path;
mod search;


pub use config::PlannerConfig;
pub use eta::{StopEta, compute_etas};
pub use graph::{AdjacencyMap, Edge};
pub use path::{Segment, find_path};
pub use search::{EtaError, JourneyEtas, PathError, PlannedSegment, Planner};
