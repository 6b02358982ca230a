//! # terrain_pathfinding
//!
//! Shortest paths on a grid of terrain cells with per-cell movement costs. Moving onto a cell
//! costs that cell's cost, so edges are directed and generally asymmetric. Cells can be made
//! impassable, and [attraction and repulsion zones](zone) discount or penalize the cost of a cell
//! and its 4-neighbours.
//!
//! A [Session] drives a single game: a source, a destination and obstacles are placed, zones are
//! added, and [Session::find_path] compares Dijkstra and A* on the zoned costs with A* on the
//! costs as originally drawn. Unreachable destinations are detected from
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) before any
//! search runs.
mod search;

pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod session;
pub mod solver;
pub mod terrain_grid;
pub mod zone;

pub use config::{SessionConfig, SessionForm, TerrainColors, TerrainCosts};
pub use error::{CellError, ConfigError, PathError, SessionError, ZoneError};
pub use graph::{CostGraph, CostView};
pub use session::{PathReport, PathResult, Session, SessionPhase};
pub use solver::{shortest_path, Algorithm, Path};
pub use terrain_grid::{Cell, CellStatus, Terrain, TerrainGrid};
pub use zone::{ZoneKind, ZoneModifier};

/// Obstacles that have to be placed before zones or path finding are allowed.
pub const MIN_OBSTACLES: usize = 5;
pub const MAX_ATTRACTION_ZONES: usize = 5;
pub const MAX_REPULSION_ZONES: usize = 5;
/// Length after which a rendered path is broken onto a second line.
pub const WRAP_LIMIT: usize = 200;
