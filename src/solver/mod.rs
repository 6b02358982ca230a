use crate::error::PathError;
use crate::graph::CostGraph;
use crate::search::astar;
use core::fmt;
use grid_util::point::Point;
use log::{info, warn};
use petgraph::graph::NodeIndex;

pub mod astar;
pub mod dijkstra;

use self::astar::AstarSolver;
use self::dijkstra::DijkstraSolver;

/// A path through a [CostGraph] together with its cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Every node from source to destination, both included.
    pub nodes: Vec<Point>,
    /// Sum of the costs of the interior nodes.
    pub cost: u64,
}

impl Path {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Sums the graph costs of every node of `nodes` except the first and the last.
pub fn interior_cost(graph: &CostGraph, nodes: &[Point]) -> u64 {
    if nodes.len() <= 2 {
        return 0;
    }
    nodes[1..nodes.len() - 1]
        .iter()
        .filter_map(|p| graph.cost(*p))
        .map(u64::from)
        .sum()
}

pub trait GraphSolver {
    /// Lower bound on the remaining cost from `node` to `goal`.
    fn heuristic(&self, node: &Point, goal: &Point) -> u64;

    /// Computes a path from start to goal, or [None] if the search finds none. Start and goal
    /// have to be nodes of the graph.
    fn get_path_single_goal(
        &self,
        graph: &CostGraph,
        start: Point,
        goal: Point,
    ) -> Option<Vec<Point>> {
        let start_ix = graph.node_index(start)?;
        let goal_ix = graph.node_index(goal)?;
        astar(
            &start_ix,
            |&ix: &NodeIndex| graph.successors(ix),
            |&ix: &NodeIndex| self.heuristic(&graph.point(ix), &goal),
            |&ix: &NodeIndex| ix == goal_ix,
        )
        .map(|(v, _c)| v.into_iter().map(|ix| graph.point(ix)).collect())
    }

    /// Computes a shortest path and its interior cost. Unreachable goals are detected from the
    /// graph components before any search is started.
    fn shortest_path(
        &self,
        graph: &CostGraph,
        start: Point,
        goal: Point,
    ) -> Result<Path, PathError> {
        let no_path = PathError::NoPath {
            from: start,
            to: goal,
        };
        if graph.unreachable(start, goal) {
            info!(
                "({}, {}) is not reachable from ({}, {})",
                goal.x, goal.y, start.x, start.y
            );
            return Err(no_path);
        }
        match self.get_path_single_goal(graph, start, goal) {
            Some(nodes) => {
                let cost = interior_cost(graph, &nodes);
                Ok(Path { nodes, cost })
            }
            None => {
                warn!("Reachable goal could not be pathed to, is the component structure correct?");
                Err(no_path)
            }
        }
    }
}

/// The two searches a session compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => f.write_str("Dijkstra"),
            Algorithm::AStar => f.write_str("A*"),
        }
    }
}

/// Runs `algorithm` on `graph` from `source` to `destination`.
pub fn shortest_path(
    graph: &CostGraph,
    source: Point,
    destination: Point,
    algorithm: Algorithm,
) -> Result<Path, PathError> {
    let path = match algorithm {
        Algorithm::Dijkstra => DijkstraSolver.shortest_path(graph, source, destination),
        Algorithm::AStar => AstarSolver::new().shortest_path(graph, source, destination),
    }?;
    info!(
        "{} found a path of {} nodes with cost {}",
        algorithm,
        path.len(),
        path.cost
    );
    Ok(path)
}
