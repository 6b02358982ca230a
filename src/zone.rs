//! Attraction and repulsion zones. A zone scales the cost of its own cell and of its
//! 4-neighbours; every scaled cost is floored and never drops below 1.
use crate::error::ZoneError;
use crate::terrain_grid::{CellStatus, TerrainGrid};
use crate::{MAX_ATTRACTION_ZONES, MAX_REPULSION_ZONES, MIN_OBSTACLES};
use core::fmt;
use grid_util::point::Point;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Attraction,
    Repulsion,
}

/// An exact rational multiplier, so that flooring happens in integer arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Multiplier {
    pub num: u32,
    pub den: u32,
}

impl Multiplier {
    pub const fn new(num: u32, den: u32) -> Multiplier {
        Multiplier { num, den }
    }

    /// `max(floor(cost * m), 1)`
    pub fn apply(self, cost: u32) -> u32 {
        let scaled = cost as u64 * self.num as u64 / self.den as u64;
        scaled.clamp(1, u32::MAX as u64) as u32
    }
}

impl ZoneKind {
    pub fn center_multiplier(self) -> Multiplier {
        match self {
            ZoneKind::Attraction => Multiplier::new(1, 2),
            ZoneKind::Repulsion => Multiplier::new(2, 1),
        }
    }

    pub fn adjacent_multiplier(self) -> Multiplier {
        match self {
            ZoneKind::Attraction => Multiplier::new(3, 4),
            ZoneKind::Repulsion => Multiplier::new(3, 2),
        }
    }

    pub fn capacity(self) -> usize {
        match self {
            ZoneKind::Attraction => MAX_ATTRACTION_ZONES,
            ZoneKind::Repulsion => MAX_REPULSION_ZONES,
        }
    }

    pub fn status(self) -> CellStatus {
        match self {
            ZoneKind::Attraction => CellStatus::Attraction,
            ZoneKind::Repulsion => CellStatus::Repulsion,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZoneKind::Attraction => f.write_str("attraction"),
            ZoneKind::Repulsion => f.write_str("repulsion"),
        }
    }
}

/// Keeps track of the zones placed on a grid and applies new ones.
#[derive(Clone, Debug, Default)]
pub struct ZoneModifier {
    attraction: Vec<Point>,
    repulsion: Vec<Point>,
}

impl ZoneModifier {
    pub fn new() -> ZoneModifier {
        ZoneModifier::default()
    }

    pub fn zones(&self, kind: ZoneKind) -> &[Point] {
        match kind {
            ZoneKind::Attraction => &self.attraction,
            ZoneKind::Repulsion => &self.repulsion,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attraction.is_empty() && self.repulsion.is_empty()
    }

    /// Places a zone of the given kind on `point` and rescales the costs around it. Returns every
    /// cell whose cost was rescaled, centre first.
    pub fn apply(
        &mut self,
        grid: &mut TerrainGrid,
        point: Point,
        kind: ZoneKind,
    ) -> Result<Vec<Point>, ZoneError> {
        if grid.obstacle_count() < MIN_OBSTACLES {
            return Err(ZoneError::TooFewObstacles {
                required: MIN_OBSTACLES,
                placed: grid.obstacle_count(),
            });
        }
        match grid.status(point) {
            None => return Err(ZoneError::OutOfBounds(point)),
            Some(CellStatus::Plain) => {}
            Some(_) => return Err(ZoneError::InvalidTransition(point)),
        }
        if self.zones(kind).len() >= kind.capacity() {
            return Err(ZoneError::ZoneCapacityExceeded(kind));
        }
        grid.mark_zone(point, kind)
            .map_err(|_| ZoneError::InvalidTransition(point))?;
        match kind {
            ZoneKind::Attraction => self.attraction.push(point),
            ZoneKind::Repulsion => self.repulsion.push(point),
        }

        let mut touched = vec![point];
        rescale(grid, point, kind.center_multiplier());
        for neighbour in grid.neumann_neighbours(point) {
            if !grid.is_obstacle(neighbour) {
                rescale(grid, neighbour, kind.adjacent_multiplier());
                touched.push(neighbour);
            }
        }
        debug!(
            "Placed {} zone at ({}, {}), rescaled {} cells",
            kind,
            point.x,
            point.y,
            touched.len()
        );
        Ok(touched)
    }
}

fn rescale(grid: &mut TerrainGrid, point: Point, multiplier: Multiplier) {
    if let Some(cost) = grid.cost(point) {
        grid.set_cost(point, multiplier.apply(cost));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainCosts;

    /// A uniform grid with the five obstacles along the bottom row of a 6x5 grid.
    fn zoning_grid(cost: u32) -> TerrainGrid {
        let mut grid = TerrainGrid::new(6, 5, TerrainCosts::uniform(cost).unwrap());
        for y in 0..5 {
            grid.add_obstacle(Point::new(5, y)).unwrap();
        }
        grid
    }

    #[test]
    fn multiplier_floors_and_clamps() {
        assert_eq!(Multiplier::new(3, 4).apply(2), 1);
        assert_eq!(Multiplier::new(1, 2).apply(1), 1);
        assert_eq!(Multiplier::new(3, 2).apply(3), 4);
        assert_eq!(Multiplier::new(2, 1).apply(7), 14);
        assert_eq!(Multiplier::new(3, 4).apply(8), 6);
    }

    #[test]
    fn attraction_halves_centre_and_discounts_neighbours() {
        let mut grid = zoning_grid(8);
        let mut zones = ZoneModifier::new();
        let touched = zones
            .apply(&mut grid, Point::new(2, 2), ZoneKind::Attraction)
            .unwrap();
        assert_eq!(touched.len(), 5);
        assert_eq!(grid.cost(Point::new(2, 2)), Some(4));
        for p in grid.neumann_neighbours(Point::new(2, 2)) {
            assert_eq!(grid.cost(p), Some(6));
        }
        assert_eq!(grid.cost(Point::new(0, 0)), Some(8));
        assert_eq!(grid.cell(Point::new(2, 2)).unwrap().base_cost, 8);
    }

    #[test]
    fn repulsion_skips_obstacles() {
        let mut grid = zoning_grid(2);
        let mut zones = ZoneModifier::new();
        let touched = zones
            .apply(&mut grid, Point::new(4, 0), ZoneKind::Repulsion)
            .unwrap();
        // up and right only: the cell below is an obstacle, left is off the grid
        assert_eq!(touched, vec![Point::new(4, 0), Point::new(3, 0), Point::new(4, 1)]);
        assert_eq!(grid.cost(Point::new(4, 0)), Some(4));
        assert_eq!(grid.cost(Point::new(3, 0)), Some(3));
        assert_eq!(grid.status(Point::new(4, 0)), Some(CellStatus::Repulsion));
    }

    #[test]
    fn effects_compose_on_current_cost() {
        let mut grid = zoning_grid(8);
        let mut zones = ZoneModifier::new();
        zones
            .apply(&mut grid, Point::new(1, 1), ZoneKind::Attraction)
            .unwrap();
        zones
            .apply(&mut grid, Point::new(1, 3), ZoneKind::Attraction)
            .unwrap();
        // (1, 2) neighbours both zones: 8 -> 6 -> 4
        assert_eq!(grid.cost(Point::new(1, 2)), Some(4));
    }

    #[test]
    fn requires_minimum_obstacles() {
        let mut grid = TerrainGrid::new(3, 3, TerrainCosts::uniform(2).unwrap());
        let mut zones = ZoneModifier::new();
        assert_eq!(
            zones.apply(&mut grid, Point::new(1, 1), ZoneKind::Attraction),
            Err(ZoneError::TooFewObstacles {
                required: MIN_OBSTACLES,
                placed: 0
            })
        );
        assert_eq!(grid.cost(Point::new(1, 1)), Some(2));
    }

    #[test]
    fn same_cell_is_rejected_twice() {
        let mut grid = zoning_grid(4);
        let mut zones = ZoneModifier::new();
        let p = Point::new(2, 2);
        zones.apply(&mut grid, p, ZoneKind::Repulsion).unwrap();
        assert_eq!(
            zones.apply(&mut grid, p, ZoneKind::Repulsion),
            Err(ZoneError::InvalidTransition(p))
        );
        assert_eq!(
            zones.apply(&mut grid, p, ZoneKind::Attraction),
            Err(ZoneError::InvalidTransition(p))
        );
        assert_eq!(grid.cost(p), Some(8));
    }

    #[test]
    fn rejects_terminal_cells() {
        let mut grid = zoning_grid(4);
        grid.mark(Point::new(0, 0), CellStatus::Source).unwrap();
        let mut zones = ZoneModifier::new();
        for p in [Point::new(0, 0), Point::new(5, 1)] {
            assert_eq!(
                zones.apply(&mut grid, p, ZoneKind::Attraction),
                Err(ZoneError::InvalidTransition(p))
            );
        }
        assert_eq!(
            zones.apply(&mut grid, Point::new(9, 9), ZoneKind::Attraction),
            Err(ZoneError::OutOfBounds(Point::new(9, 9)))
        );
    }

    #[test]
    fn capacity_is_per_kind() {
        let mut grid = zoning_grid(4);
        let mut zones = ZoneModifier::new();
        for y in 0..5 {
            zones
                .apply(&mut grid, Point::new(0, y), ZoneKind::Attraction)
                .unwrap();
        }
        assert_eq!(
            zones.apply(&mut grid, Point::new(2, 2), ZoneKind::Attraction),
            Err(ZoneError::ZoneCapacityExceeded(ZoneKind::Attraction))
        );
        assert!(zones
            .apply(&mut grid, Point::new(2, 2), ZoneKind::Repulsion)
            .is_ok());
        assert_eq!(zones.zones(ZoneKind::Attraction).len(), 5);
    }

    /// Whatever the starting cost, zones respect the floor and their direction.
    #[test]
    fn floor_and_monotonicity() {
        for cost in 1..40 {
            for kind in [ZoneKind::Attraction, ZoneKind::Repulsion] {
                for m in [kind.center_multiplier(), kind.adjacent_multiplier()] {
                    let new_cost = m.apply(cost);
                    assert!(new_cost >= 1);
                    match kind {
                        ZoneKind::Attraction => assert!(new_cost <= cost),
                        ZoneKind::Repulsion => assert!(new_cost >= cost),
                    }
                }
            }
        }
    }
}
