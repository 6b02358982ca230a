//! A single game: the grid, the zones placed on it and the phase of the interaction. Cell
//! commands arrive through [Session::primary], [Session::secondary] and [Session::tertiary];
//! [Session::find_path] freezes the grid and compares the searches.
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::format::{format_path, ASTAR_BASELINE_LABEL, ASTAR_LABEL, DIJKSTRA_LABEL};
use crate::graph::{CostGraph, CostView};
use crate::solver::{shortest_path, Algorithm, Path};
use crate::terrain_grid::{CellStatus, TerrainGrid};
use crate::zone::{ZoneKind, ZoneModifier};
use crate::MIN_OBSTACLES;
use grid_util::point::Point;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where a session is in its interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingSource,
    AwaitingDestination,
    /// Primary commands place obstacles.
    AwaitingObstacles,
    /// A zone has been placed; obstacles can no longer be added.
    Zoning,
    /// Paths have been computed; every cell command is ignored.
    Solved,
}

/// One computed path with its rendered text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    pub algorithm: Algorithm,
    pub view: CostView,
    pub path: Path,
    pub text: String,
}

/// The three paths a successful [Session::find_path] produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathReport {
    /// Dijkstra on the current costs.
    pub dijkstra: PathResult,
    /// A* on the current costs.
    pub astar: PathResult,
    /// A* on the costs before any zone was placed.
    pub astar_baseline: PathResult,
}

impl PathReport {
    /// The cells of the path to highlight: the A* path on the current costs.
    pub fn highlighted(&self) -> &[Point] {
        &self.astar.path.nodes
    }

    pub fn results(&self) -> [&PathResult; 3] {
        [&self.dijkstra, &self.astar, &self.astar_baseline]
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    grid: TerrainGrid,
    zones: ZoneModifier,
    phase: SessionPhase,
}

impl Session {
    /// Creates a session with freshly drawn terrain.
    pub fn new(config: SessionConfig) -> Result<Session, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut grid = TerrainGrid::new(config.rows, config.cols, config.costs);
        grid.assign_terrain(&mut rng)?;
        Ok(Session::with_grid(config, grid))
    }

    /// Creates a session on a prepared grid. Any source, destination or obstacles already on the
    /// grid advance the phase accordingly.
    pub fn with_grid(config: SessionConfig, grid: TerrainGrid) -> Session {
        let phase = match (grid.source(), grid.destination()) {
            (None, _) => SessionPhase::AwaitingSource,
            (Some(_), None) => SessionPhase::AwaitingDestination,
            (Some(_), Some(_)) => SessionPhase::AwaitingObstacles,
        };
        info!(
            "Started a {}x{} session, zones {}",
            grid.rows(),
            grid.cols(),
            if config.zones_enabled { "enabled" } else { "disabled" }
        );
        Session {
            config,
            grid,
            zones: ZoneModifier::new(),
            phase,
        }
    }

    /// Discards this session and starts a new one from the same configuration.
    pub fn restart(self) -> Result<Session, ConfigError> {
        info!("Restarting session");
        Session::new(self.config)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn zones(&self) -> &ZoneModifier {
        &self.zones
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Source, destination and enough obstacles are in place.
    pub fn ready_to_solve(&self) -> bool {
        self.grid.source().is_some()
            && self.grid.destination().is_some()
            && self.grid.obstacle_count() >= MIN_OBSTACLES
    }

    /// What the user is expected to do next.
    pub fn instructions(&self) -> String {
        match self.phase {
            SessionPhase::AwaitingSource => "Left click to set the starting point".to_owned(),
            SessionPhase::AwaitingDestination => "Left click to set the destination".to_owned(),
            SessionPhase::AwaitingObstacles if !self.ready_to_solve() => format!(
                "Left click to add some obstacles. Add at least {} obstacles.",
                MIN_OBSTACLES
            ),
            SessionPhase::AwaitingObstacles | SessionPhase::Zoning
                if self.config.zones_enabled =>
            {
                "Right click to add areas of attraction or middle click to add areas of repulsion."
                    .to_owned()
            }
            SessionPhase::AwaitingObstacles | SessionPhase::Zoning => {
                "Find the shortest path when ready.".to_owned()
            }
            SessionPhase::Solved => "Play again?".to_owned(),
        }
    }

    /// Advances the cell at `point`: the first call sets the source, the second the destination,
    /// every later one adds an obstacle. Returns whether the grid changed.
    pub fn primary(&mut self, point: Point) -> bool {
        let (status, next) = match self.phase {
            SessionPhase::AwaitingSource => {
                (CellStatus::Source, SessionPhase::AwaitingDestination)
            }
            SessionPhase::AwaitingDestination => {
                (CellStatus::Destination, SessionPhase::AwaitingObstacles)
            }
            SessionPhase::AwaitingObstacles => {
                (CellStatus::Obstacle, SessionPhase::AwaitingObstacles)
            }
            SessionPhase::Zoning | SessionPhase::Solved => {
                debug!("Ignoring primary command in phase {:?}", self.phase);
                return false;
            }
        };
        match self.grid.mark(point, status) {
            Ok(()) => {
                self.phase = next;
                true
            }
            Err(err) => {
                debug!("Ignoring primary command: {}", err);
                false
            }
        }
    }

    /// Places an attraction zone.
    pub fn secondary(&mut self, point: Point) -> bool {
        self.place_zone(point, ZoneKind::Attraction)
    }

    /// Places a repulsion zone.
    pub fn tertiary(&mut self, point: Point) -> bool {
        self.place_zone(point, ZoneKind::Repulsion)
    }

    fn place_zone(&mut self, point: Point, kind: ZoneKind) -> bool {
        if !self.config.zones_enabled {
            debug!("Zones are disabled, ignoring {} command", kind);
            return false;
        }
        if !matches!(
            self.phase,
            SessionPhase::AwaitingObstacles | SessionPhase::Zoning
        ) {
            debug!("Ignoring {} command in phase {:?}", kind, self.phase);
            return false;
        }
        match self.zones.apply(&mut self.grid, point, kind) {
            Ok(_) => {
                if self.phase == SessionPhase::AwaitingObstacles {
                    info!("First zone placed, obstacles are now frozen");
                }
                self.phase = SessionPhase::Zoning;
                true
            }
            Err(err) => {
                debug!("Ignoring {} command: {}", kind, err);
                false
            }
        }
    }

    /// Builds the baseline and current graphs and runs Dijkstra and A* on the current one and A*
    /// on the baseline. If the destination cannot be reached on the current graph, nothing else
    /// is computed and the session stays as it was.
    pub fn find_path(&mut self) -> Result<PathReport, SessionError> {
        let (source, destination) = match (self.grid.source(), self.grid.destination()) {
            (Some(s), Some(d)) if self.ready_to_solve() => (s, d),
            _ => return Err(SessionError::NotReady(MIN_OBSTACLES)),
        };
        if self.phase == SessionPhase::Solved {
            debug!("Paths are computed again on a solved session");
        }
        let current = CostGraph::build(&self.grid, CostView::Current);
        let baseline = CostGraph::build(&self.grid, CostView::Baseline);
        current.log_contents();

        let dijkstra = shortest_path(&current, source, destination, Algorithm::Dijkstra)?;
        let astar = shortest_path(&current, source, destination, Algorithm::AStar)?;
        let astar_baseline = shortest_path(&baseline, source, destination, Algorithm::AStar)?;
        self.phase = SessionPhase::Solved;

        let result = |algorithm, view, path: Path, label: &str| PathResult {
            algorithm,
            view,
            text: format_path(&path.nodes, path.cost, label),
            path,
        };
        Ok(PathReport {
            dijkstra: result(Algorithm::Dijkstra, CostView::Current, dijkstra, DIJKSTRA_LABEL),
            astar: result(Algorithm::AStar, CostView::Current, astar, ASTAR_LABEL),
            astar_baseline: result(
                Algorithm::AStar,
                CostView::Baseline,
                astar_baseline,
                ASTAR_BASELINE_LABEL,
            ),
        })
    }
}
