use vantage_core::camera::ViewportPoint;
use vantage_core::scene::NodeId;

/// 2D grid of node lists: rows are the vertical category, columns the
/// horizontal. Rebuilt fresh on every scan cycle.
#[derive(Clone, Debug)]
pub struct BucketGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<NodeId>>,
}

impl BucketGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Vec::new(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &[NodeId] {
        &self.cells[row * self.cols + col]
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Vec<NodeId> {
        &mut self.cells[row * self.cols + col]
    }

    pub fn node_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

/// Bucket viewport positions into an equal-width category grid.
///
/// Bin upper bounds sit at `(i + 1) / n` for the first `n - 1` bins; a
/// coordinate falls into the first bin whose bound strictly exceeds it, and
/// the final bin catches everything remaining (1.0 and any overshoot
/// included; negative coordinates land in bin 0). Degenerate category counts
/// collapse to a single bin on that axis.
pub fn categorize_viewport_positions(
    x_count: usize,
    y_count: usize,
    positions: &[(NodeId, ViewportPoint)],
) -> BucketGrid {
    let cols = x_count.max(1);
    let rows = y_count.max(1);

    let x_bounds: Vec<f32> = (0..cols - 1).map(|i| (i + 1) as f32 / cols as f32).collect();
    let y_bounds: Vec<f32> = (0..rows - 1).map(|j| (j + 1) as f32 / rows as f32).collect();

    let mut grid = BucketGrid::new(rows, cols);
    for &(id, point) in positions {
        let row = bin_index(point.y, &y_bounds, rows);
        let col = bin_index(point.x, &x_bounds, cols);
        grid.cell_mut(row, col).push(id);
    }
    grid
}

fn bin_index(value: f32, bounds: &[f32], count: usize) -> usize {
    for (i, bound) in bounds.iter().enumerate() {
        if value < *bound {
            return i;
        }
    }
    count - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mint `count` arena ids from a throwaway graph.
    fn nodes(count: usize) -> Vec<NodeId> {
        use cgmath::Point3;
        use vantage_core::scene::SceneGraph;
        let mut graph = SceneGraph::new();
        (0..count)
            .map(|k| {
                graph.add_node(None, format!("n{k}"), None, Point3::new(0.0, 0.0, 0.0), None)
            })
            .collect()
    }

    fn node(i: usize) -> NodeId {
        nodes(i + 1)[i]
    }

    fn at(x: f32, y: f32) -> ViewportPoint {
        ViewportPoint::new(x, y)
    }

    #[test]
    fn single_category_takes_everything() {
        let positions = vec![
            (node(0), at(0.0, 0.0)),
            (node(1), at(0.99, 0.5)),
            (node(2), at(-0.3, 2.0)),
        ];
        let grid = categorize_viewport_positions(1, 1, &positions);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.cell(0, 0).len(), 3);
    }

    #[test]
    fn zero_counts_collapse_to_one_bin() {
        let positions = vec![(node(0), at(0.5, 0.5))];
        let grid = categorize_viewport_positions(0, 0, &positions);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.cell(0, 0).len(), 1);
    }

    #[test]
    fn uniform_spread_maps_in_order() {
        let positions = vec![
            (node(0), at(0.1, 0.5)),
            (node(1), at(0.3, 0.5)),
            (node(2), at(0.6, 0.5)),
            (node(3), at(0.9, 0.5)),
        ];
        let grid = categorize_viewport_positions(4, 1, &positions);
        for col in 0..4 {
            assert_eq!(grid.cell(0, col).len(), 1, "col {col}");
        }
    }

    #[test]
    fn boundary_value_lands_in_the_later_bin() {
        // Strict `<` against the upper bound: 0.5 is not < 0.5.
        let positions = vec![(node(0), at(0.5, 0.0))];
        let grid = categorize_viewport_positions(2, 1, &positions);
        assert_eq!(grid.cell(0, 0).len(), 0);
        assert_eq!(grid.cell(0, 1).len(), 1);
    }

    #[test]
    fn final_bin_accepts_one_and_overshoot() {
        let positions = vec![(node(0), at(1.0, 0.5)), (node(1), at(1.7, 0.5))];
        let grid = categorize_viewport_positions(3, 1, &positions);
        assert_eq!(grid.cell(0, 2).len(), 2);
    }

    #[test]
    fn negative_coordinate_lands_in_bin_zero() {
        let positions = vec![(node(0), at(-0.4, -0.2))];
        let grid = categorize_viewport_positions(3, 3, &positions);
        assert_eq!(grid.cell(0, 0).len(), 1);
    }

    #[test]
    fn rows_are_vertical_columns_horizontal() {
        // High y, low x: top row, first column.
        let positions = vec![(node(0), at(0.1, 0.9))];
        let grid = categorize_viewport_positions(3, 3, &positions);
        assert_eq!(grid.cell(2, 0).len(), 1);
        assert_eq!(grid.node_count(), 1);
    }
}
