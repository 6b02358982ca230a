use grid_util::point::Point;
use terrain_pathfinding::{
    shortest_path, Algorithm, CostGraph, CostView, Terrain, TerrainCosts, TerrainGrid,
};

// In this example a path is found on a 3x4 grid with shape
//  ____
// |S M |
// | #M |
// |   E|
//  ____
// where
// - # marks an obstacle
// - M marks a mountain, every other cell is road
// - S marks the start
// - E marks the end
//
// Entering a mountain costs 8, entering a road costs 1.

fn main() {
    let mut grid = TerrainGrid::new(3, 4, TerrainCosts::default());
    grid.set_terrain(Point::new(0, 2), Terrain::Mountain).unwrap();
    grid.set_terrain(Point::new(1, 2), Terrain::Mountain).unwrap();
    grid.add_obstacle(Point::new(1, 1)).unwrap();
    println!("{}", grid);
    let graph = CostGraph::build(&grid, CostView::Current);
    let start = Point::new(0, 0);
    let end = Point::new(2, 3);
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        let path = shortest_path(&graph, start, end, algorithm).unwrap();
        println!("{} path with cost {}:", algorithm, path.cost);
        for p in path.nodes {
            println!("{:?}", p);
        }
    }
}
