use grid_util::point::Point;

use crate::solver::GraphSolver;

#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GraphSolver for DijkstraSolver {
    /// No guidance: the search expands nodes purely in order of cost.
    fn heuristic(&self, _: &Point, _: &Point) -> u64 {
        0
    }
}
