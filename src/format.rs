use grid_util::point::Point;
use itertools::Itertools;

use crate::WRAP_LIMIT;

pub const DIJKSTRA_LABEL: &str = "Validation - Shortest path (Dijkstra): ";
pub const ASTAR_LABEL: &str = "Shortest path (A*): ";
pub const ASTAR_BASELINE_LABEL: &str = "Shortest path (A*) without areas of attraction/repulsion: ";

/// Renders a coordinate as `(row, col)`.
pub fn format_point(point: &Point) -> String {
    format!("({}, {})", point.x, point.y)
}

/// Renders `label` followed by the path as `(r, c) -> (r, c) -> ...` and `. Cost: N`. When the
/// label and path together exceed [WRAP_LIMIT] characters, a single line break is inserted at
/// exactly that offset, wherever it falls.
pub fn format_path(path: &[Point], cost: u64, label: &str) -> String {
    let mut text = format!("{}{}", label, path.iter().map(format_point).join(" -> "));
    let offset = text.char_indices().nth(WRAP_LIMIT).map(|(i, _)| i);
    if let Some(offset) = offset {
        text.insert(offset, '\n');
    }
    format!("{}. Cost: {}", text, cost)
}
