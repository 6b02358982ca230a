use grid_util::point::Point;

use crate::solver::GraphSolver;

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GraphSolver for AstarSolver {
    /// Manhattan distance times the heuristic factor. Every step costs at least 1, so with the
    /// default factor this never overestimates.
    fn heuristic(&self, node: &Point, goal: &Point) -> u64 {
        let distance = (node.x - goal.x).unsigned_abs() + (node.y - goal.y).unsigned_abs();
        (distance as f32 * self.heuristic_factor) as u64
    }
}
