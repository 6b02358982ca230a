use crate::config::TerrainCosts;
use crate::error::{CellError, ConfigError};
use crate::zone::ZoneKind;
use core::fmt;
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// The six kinds of terrain a cell can be drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    #[default]
    Road,
    Meadow,
    Forest,
    Hill,
    Mountain,
    Lake,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Road,
        Terrain::Meadow,
        Terrain::Forest,
        Terrain::Hill,
        Terrain::Mountain,
        Terrain::Lake,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Road => "road",
            Terrain::Meadow => "meadow",
            Terrain::Forest => "forest",
            Terrain::Hill => "hill",
            Terrain::Mountain => "mountain",
            Terrain::Lake => "lake",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellStatus {
    #[default]
    Plain,
    Source,
    Destination,
    Obstacle,
    Attraction,
    Repulsion,
}

impl CellStatus {
    pub fn is_zone(self) -> bool {
        matches!(self, CellStatus::Attraction | CellStatus::Repulsion)
    }
}

/// A single grid cell. `base_cost` is the cost of the terrain as drawn and is never touched by
/// zones, `cost` is the cost after zone effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub base_cost: u32,
    pub cost: u32,
    pub status: CellStatus,
}

impl Cell {
    fn new(terrain: Terrain, costs: &TerrainCosts) -> Cell {
        let cost = costs.cost(terrain);
        Cell {
            terrain,
            base_cost: cost,
            cost,
            status: CellStatus::Plain,
        }
    }
}

/// [TerrainGrid] maps every `(row, col)` coordinate to its [Cell]. Coordinates are [Point]s with
/// `x` the row and `y` the column. It tracks the designated source and destination and the
/// obstacles in the order they were placed.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    cells: SimpleValueGrid<Cell>,
    costs: TerrainCosts,
    source: Option<Point>,
    destination: Option<Point>,
    obstacles: Vec<Point>,
}

impl TerrainGrid {
    /// Creates a grid of plain road cells.
    pub fn new(rows: usize, cols: usize, costs: TerrainCosts) -> TerrainGrid {
        TerrainGrid {
            cells: SimpleValueGrid::new(rows, cols, Cell::new(Terrain::Road, &costs)),
            costs,
            source: None,
            destination: None,
            obstacles: Vec::new(),
        }
    }

    /// Draws a terrain for every cell, using the configured cost of each terrain as its
    /// selection weight. Weights are summed as `u64`, so six maximal costs still fit. The grid is
    /// left untouched if the weights are rejected.
    pub fn assign_terrain<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), ConfigError> {
        let weights = Terrain::ALL.map(|t| u64::from(self.costs.cost(t)));
        let dist = WeightedIndex::new(weights)?;
        for x in 0..self.rows() as i32 {
            for y in 0..self.cols() as i32 {
                let terrain = Terrain::ALL[dist.sample(rng)];
                self.cells.set(x, y, Cell::new(terrain, &self.costs));
            }
        }
        info!("Assigned terrain to a {}x{} grid", self.rows(), self.cols());
        Ok(())
    }

    /// Places a terrain on a plain cell, resetting both of its costs to the terrain cost.
    pub fn set_terrain(&mut self, point: Point, terrain: Terrain) -> Result<(), CellError> {
        let cell = self.cell(point).ok_or(CellError::OutOfBounds(point))?;
        if cell.status != CellStatus::Plain {
            return Err(CellError::InvalidTransition(point));
        }
        self.cells
            .set(point.x, point.y, Cell::new(terrain, &self.costs));
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.cells.width()
    }

    pub fn cols(&self) -> usize {
        self.cells.height()
    }

    pub fn costs(&self) -> &TerrainCosts {
        &self.costs
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.rows()
            && (point.y as usize) < self.cols()
    }

    pub fn cell(&self, point: Point) -> Option<Cell> {
        if self.in_bounds(point) {
            Some(self.cells.get(point.x, point.y))
        } else {
            None
        }
    }

    pub fn cost(&self, point: Point) -> Option<u32> {
        self.cell(point).map(|c| c.cost)
    }

    pub fn status(&self, point: Point) -> Option<CellStatus> {
        self.cell(point).map(|c| c.status)
    }

    pub fn source(&self) -> Option<Point> {
        self.source
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn obstacles(&self) -> &[Point] {
        &self.obstacles
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_obstacle(&self, point: Point) -> bool {
        self.status(point) == Some(CellStatus::Obstacle)
    }

    /// The in-bounds 4-neighbours of a point, in the order up, down, left, right.
    pub fn neumann_neighbours(&self, point: Point) -> Vec<Point> {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
        ]
        .into_iter()
        .filter(|p| self.in_bounds(*p))
        .collect()
    }

    /// Gives a plain cell a status. A cell only ever changes status once, and only one source and
    /// one destination can exist. Zone statuses are rejected: a zone also rescales the costs
    /// around it and is placed through [crate::zone::ZoneModifier::apply].
    pub fn mark(&mut self, point: Point, status: CellStatus) -> Result<(), CellError> {
        if status.is_zone() {
            self.cell(point).ok_or(CellError::OutOfBounds(point))?;
            return Err(CellError::InvalidTransition(point));
        }
        self.set_status(point, status)
    }

    /// Marks a plain cell as a zone of `kind` without touching any cost.
    pub(crate) fn mark_zone(&mut self, point: Point, kind: ZoneKind) -> Result<(), CellError> {
        self.set_status(point, kind.status())
    }

    fn set_status(&mut self, point: Point, status: CellStatus) -> Result<(), CellError> {
        let mut cell = self.cell(point).ok_or(CellError::OutOfBounds(point))?;
        if cell.status != CellStatus::Plain || status == CellStatus::Plain {
            return Err(CellError::InvalidTransition(point));
        }
        match status {
            CellStatus::Source if self.source.is_some() => {
                return Err(CellError::InvalidTransition(point))
            }
            CellStatus::Destination if self.destination.is_some() => {
                return Err(CellError::InvalidTransition(point))
            }
            CellStatus::Source => self.source = Some(point),
            CellStatus::Destination => self.destination = Some(point),
            CellStatus::Obstacle => self.obstacles.push(point),
            _ => {}
        }
        cell.status = status;
        self.cells.set(point.x, point.y, cell);
        debug!("Marked ({}, {}) as {:?}", point.x, point.y, status);
        Ok(())
    }

    /// Turns a cell into a hole that no graph built from this grid will contain.
    pub fn add_obstacle(&mut self, point: Point) -> Result<(), CellError> {
        self.mark(point, CellStatus::Obstacle)
    }

    /// Overwrites the current cost of a cell, leaving its base cost alone.
    pub(crate) fn set_cost(&mut self, point: Point, cost: u32) {
        if let Some(mut cell) = self.cell(point) {
            cell.cost = cost;
            self.cells.set(point.x, point.y, cell);
        }
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for x in 0..self.rows() as i32 {
            let values = (0..self.cols() as i32)
                .map(|y| {
                    let cell = self.cells.get(x, y);
                    match cell.status {
                        CellStatus::Plain => format!("{:>5}", cell.cost),
                        CellStatus::Source => format!("{:>5}", "S"),
                        CellStatus::Destination => format!("{:>5}", "D"),
                        CellStatus::Obstacle => format!("{:>5}", "#"),
                        CellStatus::Attraction => format!("{:>5}", format!("A.{}", cell.cost)),
                        CellStatus::Repulsion => format!("{:>5}", format!("R.{}", cell.cost)),
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform(rows: usize, cols: usize, cost: u32) -> TerrainGrid {
        TerrainGrid::new(rows, cols, TerrainCosts::uniform(cost).unwrap())
    }

    #[test]
    fn new_grid_is_plain() {
        let grid = uniform(2, 3, 4);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        let cell = grid.cell(Point::new(1, 2)).unwrap();
        assert_eq!(cell.status, CellStatus::Plain);
        assert_eq!(cell.cost, 4);
        assert_eq!(cell.base_cost, 4);
        assert!(grid.cell(Point::new(2, 0)).is_none());
        assert!(grid.cell(Point::new(0, -1)).is_none());
    }

    #[test]
    fn marking_twice_is_rejected() {
        let mut grid = uniform(3, 3, 1);
        let p = Point::new(1, 1);
        grid.mark(p, CellStatus::Source).unwrap();
        assert_eq!(
            grid.mark(p, CellStatus::Destination),
            Err(CellError::InvalidTransition(p))
        );
        assert_eq!(grid.add_obstacle(p), Err(CellError::InvalidTransition(p)));
        assert_eq!(grid.source(), Some(p));
        assert_eq!(grid.destination(), None);
    }

    #[test]
    fn single_source_and_destination() {
        let mut grid = uniform(3, 3, 1);
        grid.mark(Point::new(0, 0), CellStatus::Source).unwrap();
        assert!(grid.mark(Point::new(0, 1), CellStatus::Source).is_err());
        grid.mark(Point::new(2, 2), CellStatus::Destination).unwrap();
        assert!(grid
            .mark(Point::new(2, 1), CellStatus::Destination)
            .is_err());
    }

    #[test]
    fn zone_status_needs_zone_modifier() {
        let mut grid = uniform(3, 3, 4);
        let p = Point::new(1, 1);
        for status in [CellStatus::Attraction, CellStatus::Repulsion] {
            assert_eq!(grid.mark(p, status), Err(CellError::InvalidTransition(p)));
        }
        assert_eq!(grid.status(p), Some(CellStatus::Plain));
        assert_eq!(grid.cost(p), Some(4));
        assert_eq!(
            grid.mark(Point::new(3, 3), CellStatus::Attraction),
            Err(CellError::OutOfBounds(Point::new(3, 3)))
        );
        grid.mark_zone(p, ZoneKind::Repulsion).unwrap();
        assert_eq!(grid.status(p), Some(CellStatus::Repulsion));
        assert_eq!(grid.cost(p), Some(4));
    }

    #[test]
    fn out_of_bounds_mark() {
        let mut grid = uniform(3, 3, 1);
        let p = Point::new(3, 0);
        assert_eq!(grid.add_obstacle(p), Err(CellError::OutOfBounds(p)));
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn obstacles_are_recorded_in_order() {
        let mut grid = uniform(3, 3, 1);
        grid.add_obstacle(Point::new(1, 1)).unwrap();
        grid.add_obstacle(Point::new(0, 1)).unwrap();
        assert_eq!(grid.obstacles(), &[Point::new(1, 1), Point::new(0, 1)]);
        assert!(grid.is_obstacle(Point::new(0, 1)));
    }

    #[test]
    fn neighbours_stay_in_bounds() {
        let grid = uniform(3, 3, 1);
        assert_eq!(
            grid.neumann_neighbours(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(grid.neumann_neighbours(Point::new(1, 1)).len(), 4);
    }

    /// A terrain whose weight dwarfs the others should dominate the draw.
    #[test]
    fn terrain_weighted_by_cost() {
        let costs = TerrainCosts::new([1, 1, 1, 1, 1000, 1]).unwrap();
        let mut grid = TerrainGrid::new(20, 20, costs);
        let mut rng = StdRng::seed_from_u64(0);
        grid.assign_terrain(&mut rng).unwrap();
        let mountains = (0..20)
            .flat_map(|x| (0..20).map(move |y| Point::new(x, y)))
            .filter(|p| grid.cell(*p).unwrap().terrain == Terrain::Mountain)
            .count();
        assert!(mountains > 380);
        let cell = grid.cell(Point::new(0, 0)).unwrap();
        assert_eq!(cell.cost, grid.costs().cost(cell.terrain));
    }

    /// Six costs of three billion sum past `u32::MAX` but are still valid weights.
    #[test]
    fn large_costs_still_weight_terrain() {
        let costs = TerrainCosts::uniform(3_000_000_000).unwrap();
        let mut grid = TerrainGrid::new(8, 8, costs);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(grid.assign_terrain(&mut rng), Ok(()));
        let drawn = (0..8)
            .flat_map(|x| (0..8).map(move |y| Point::new(x, y)))
            .map(|p| grid.cell(p).unwrap().terrain)
            .collect::<Vec<_>>();
        // a uniform draw over 64 cells does not land on a single terrain
        assert!(drawn.iter().any(|t| *t != drawn[0]));
        assert_eq!(grid.cost(Point::new(7, 7)), Some(3_000_000_000));
    }

    #[test]
    fn set_terrain_resets_cost() {
        let mut grid = TerrainGrid::new(2, 2, TerrainCosts::default());
        grid.set_terrain(Point::new(0, 1), Terrain::Mountain).unwrap();
        assert_eq!(grid.cost(Point::new(0, 1)), Some(8));
        grid.add_obstacle(Point::new(1, 1)).unwrap();
        assert!(grid.set_terrain(Point::new(1, 1), Terrain::Lake).is_err());
    }

    #[test]
    fn display_shows_markers() {
        let mut grid = uniform(1, 3, 7);
        grid.mark(Point::new(0, 0), CellStatus::Source).unwrap();
        grid.add_obstacle(Point::new(0, 2)).unwrap();
        assert_eq!(grid.to_string(), "    S    7    #\n");
    }
}
