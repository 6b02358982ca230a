use grid_util::point::Point;
use rand::distributions::WeightedError;
use thiserror::Error;

use crate::zone::ZoneKind;

/// Rejected bootstrap input. No session is created when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive integer, got {value:?}")]
    InvalidInput { field: &'static str, value: String },
    #[error("terrain costs cannot weight the terrain draw: {0}")]
    TerrainWeights(#[from] WeightedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("cell ({}, {}) already has a status", .0.x, .0.y)]
    InvalidTransition(Point),
    #[error("cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    OutOfBounds(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("cell ({}, {}) cannot become a zone", .0.x, .0.y)]
    InvalidTransition(Point),
    #[error("no more {0} zones can be placed")]
    ZoneCapacityExceeded(ZoneKind),
    #[error("at least {required} obstacles are needed before zones, found {placed}")]
    TooFewObstacles { required: usize, placed: usize },
    #[error("cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    OutOfBounds(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no path from ({}, {}) to ({}, {})", .from.x, .from.y, .to.x, .to.y)]
    NoPath { from: Point, to: Point },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("source, destination and at least {0} obstacles are required before solving")]
    NotReady(usize),
    #[error(transparent)]
    NoPath(#[from] PathError),
}
