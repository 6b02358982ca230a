use crate::terrain_grid::TerrainGrid;
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::{debug, info, trace};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

/// Which costs of a [TerrainGrid] a [CostGraph] is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostView {
    /// Costs as drawn, before any zone was placed.
    Baseline,
    /// Costs after every zone placed so far.
    Current,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub point: Point,
    pub cost: u32,
}

/// Directed graph over the non-obstacle cells of a grid. An edge `u -> v` exists for every pair
/// of 4-adjacent cells and weighs the cost of `v`, so cost is charged on arrival. Connected
/// components are kept in a [UnionFind] so unreachable goals are detected without searching.
#[derive(Clone, Debug)]
pub struct CostGraph {
    pub(crate) graph: DiGraph<GraphNode, u32>,
    index: FxHashMap<Point, NodeIndex>,
    components: UnionFind<usize>,
}

impl CostGraph {
    /// Materializes the graph of `grid` under the given cost view.
    pub fn build(grid: &TerrainGrid, view: CostView) -> CostGraph {
        let mut graph = DiGraph::new();
        let mut index = FxHashMap::default();
        for x in 0..grid.rows() as i32 {
            for y in 0..grid.cols() as i32 {
                let point = Point::new(x, y);
                let cell = match grid.cell(point) {
                    Some(cell) if !grid.is_obstacle(point) => cell,
                    _ => continue,
                };
                let cost = match view {
                    CostView::Baseline => cell.base_cost,
                    CostView::Current => cell.cost,
                };
                let ix = graph.add_node(GraphNode { point, cost });
                index.insert(point, ix);
            }
        }

        let mut components = UnionFind::new(graph.node_count());
        let nodes = graph.node_indices().collect::<Vec<_>>();
        for u in nodes {
            let point = graph[u].point;
            for neighbour in grid.neumann_neighbours(point) {
                if let Some(&v) = index.get(&neighbour) {
                    let weight = graph[v].cost;
                    graph.add_edge(u, v, weight);
                    components.union(u.index(), v.index());
                }
            }
        }
        info!(
            "Built {:?} graph with {} nodes and {} edges",
            view,
            graph.node_count(),
            graph.edge_count()
        );
        CostGraph {
            graph,
            index,
            components,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.index.contains_key(&point)
    }

    pub(crate) fn node_index(&self, point: Point) -> Option<NodeIndex> {
        self.index.get(&point).copied()
    }

    pub(crate) fn point(&self, ix: NodeIndex) -> Point {
        self.graph[ix].point
    }

    /// Cost of the node at `point`, [None] for obstacles and points off the grid.
    pub fn cost(&self, point: Point) -> Option<u32> {
        self.node_index(point).map(|ix| self.graph[ix].cost)
    }

    pub fn edge_weight(&self, from: Point, to: Point) -> Option<u32> {
        let u = self.node_index(from)?;
        let v = self.node_index(to)?;
        self.graph
            .find_edge(u, v)
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    /// All nodes with their costs, in grid order.
    pub fn nodes(&self) -> impl Iterator<Item = GraphNode> + '_ {
        self.graph.node_weights().copied()
    }

    /// All edges as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point, u32)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].point,
                self.graph[e.target()].point,
                *e.weight(),
            )
        })
    }

    /// Outgoing edges of a node as `(target, weight)`, widened so path sums cannot overflow.
    pub(crate) fn successors(&self, ix: NodeIndex) -> Vec<(NodeIndex, u64)> {
        self.graph
            .edges(ix)
            .map(|e| (e.target(), u64::from(*e.weight())))
            .collect()
    }

    /// Checks if start and goal are in the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are in different components, or either is not a node.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        match (self.node_index(start), self.node_index(goal)) {
            (Some(s), Some(g)) => !self.components.equiv(s.index(), g.index()),
            _ => true,
        }
    }

    /// Logs every node cost and edge weight.
    pub fn log_contents(&self) {
        debug!("Nodes of the graph: {}", self.node_count());
        for node in self.nodes() {
            trace!("Cost of node ({}, {}): {}", node.point.x, node.point.y, node.cost);
        }
        for (from, to, weight) in self.edges() {
            trace!(
                "Cost of edge ({}, {}) -> ({}, {}): {}",
                from.x,
                from.y,
                to.x,
                to.y,
                weight
            );
        }
    }
}

impl PartialEq for CostGraph {
    /// Same nodes with the same costs and the same weighted edges.
    fn eq(&self, other: &Self) -> bool {
        if self.node_count() != other.node_count() || self.edge_count() != other.edge_count() {
            return false;
        }
        self.nodes().all(|n| other.cost(n.point) == Some(n.cost))
            && self
                .edges()
                .all(|(from, to, w)| other.edge_weight(from, to) == Some(w))
    }
}
