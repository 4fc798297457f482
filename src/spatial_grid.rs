/*
 * Spatial Grid Module
 *
 * Neighbor lookups for the steering rules. Both implementations sit behind
 * the NeighborQuery trait so the physics code never knows which one it is
 * talking to:
 *
 * - BruteForce scans every boid, fine for tens to low hundreds of boids.
 * - SpatialGrid buckets boids into a uniform grid over the world bounds,
 *   rebuilt once per tick, and only scans the cells a query radius can reach.
 *
 * Optimized for performance by:
 * - Reusing the cell vectors between ticks instead of reallocating
 * - Comparing squared distances
 * - Using integer cell arithmetic with clamping instead of bounds checks
 *
 * Visit order is fixed by boid index and cell order, so results never depend
 * on anything but positions.
 */

use nannou::prelude::*;

// Above this many boids `Auto` switches from brute force to the grid
pub const AUTO_GRID_THRESHOLD: usize = 128;

// Keeps the grid from exploding when a radius is tuned close to zero
const MAX_CELLS_PER_AXIS: usize = 256;

pub trait NeighborQuery: Send + Sync {
    /// Index this tick's positions. Must be called before any query.
    ///
    /// `reach` is the largest radius the caller expects to query with; it is
    /// only a sizing hint, queries with a larger radius still work.
    fn rebuild(&mut self, positions: &[Point2], reach: f32);

    /// Call `visitor(other_index, distance_squared)` for every other boid
    /// within `radius` of boid `index`.
    fn for_each_within(&self, index: usize, radius: f32, visitor: &mut dyn FnMut(usize, f32));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NeighborStrategy {
    BruteForce,
    Grid,
    #[default]
    Auto,
}

impl NeighborStrategy {
    pub fn build(self, width: f32, height: f32, boid_count: usize) -> Box<dyn NeighborQuery> {
        let use_grid = match self {
            NeighborStrategy::BruteForce => false,
            NeighborStrategy::Grid => true,
            NeighborStrategy::Auto => boid_count > AUTO_GRID_THRESHOLD,
        };

        if use_grid {
            Box::new(SpatialGrid::new(width, height))
        } else {
            Box::new(BruteForce::default())
        }
    }
}

#[derive(Debug, Default)]
pub struct BruteForce {
    positions: Vec<Point2>,
}

impl NeighborQuery for BruteForce {
    fn rebuild(&mut self, positions: &[Point2], _reach: f32) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    fn for_each_within(&self, index: usize, radius: f32, visitor: &mut dyn FnMut(usize, f32)) {
        let Some(&origin) = self.positions.get(index) else {
            return;
        };
        let radius_sq = radius * radius;

        for (other, &position) in self.positions.iter().enumerate() {
            if other == index {
                continue;
            }
            let distance_sq = origin.distance_squared(position);
            if distance_sq <= radius_sq {
                visitor(other, distance_sq);
            }
        }
    }
}

#[derive(Debug)]
pub struct SpatialGrid {
    width: f32,
    height: f32,
    cell_width: f32,
    cell_height: f32,
    columns: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
    positions: Vec<Point2>,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);

        Self {
            width,
            height,
            cell_width: width,
            cell_height: height,
            columns: 1,
            rows: 1,
            cells: vec![Vec::new()],
            positions: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    // Pick a layout whose cells are at least `reach` wide, capped per axis
    fn resize_for(&mut self, reach: f32) {
        let reach = if reach > 0.0 { reach } else { 1.0 };
        let columns = axis_cells(self.width, reach);
        let rows = axis_cells(self.height, reach);

        if columns != self.columns || rows != self.rows {
            self.columns = columns;
            self.rows = rows;
            self.cells = vec![Vec::new(); columns * rows];
        }

        self.cell_width = self.width / columns as f32;
        self.cell_height = self.height / rows as f32;
    }

    // Convert world coordinates to (column, row); out-of-bounds boids land in the border cells
    #[inline]
    fn cell_coords(&self, position: Point2) -> (isize, isize) {
        let column = ((position.x / self.cell_width).floor() as isize).clamp(0, self.columns as isize - 1);
        let row = ((position.y / self.cell_height).floor() as isize).clamp(0, self.rows as isize - 1);
        (column, row)
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }
}

fn axis_cells(extent: f32, reach: f32) -> usize {
    let cells = (extent / reach).floor();
    if cells.is_finite() && cells >= 1.0 {
        (cells as usize).min(MAX_CELLS_PER_AXIS)
    } else {
        1
    }
}

fn rings(radius: f32, cell_extent: f32, limit: usize) -> isize {
    let rings = (radius / cell_extent).ceil();
    if rings.is_finite() && rings >= 0.0 {
        (rings as usize).min(limit) as isize
    } else {
        limit as isize
    }
}

impl NeighborQuery for SpatialGrid {
    fn rebuild(&mut self, positions: &[Point2], reach: f32) {
        self.resize_for(reach);
        self.clear();
        self.positions.clear();
        self.positions.extend_from_slice(positions);

        for (index, &position) in positions.iter().enumerate() {
            let (column, row) = self.cell_coords(position);
            self.cells[row as usize * self.columns + column as usize].push(index);
        }
    }

    fn for_each_within(&self, index: usize, radius: f32, visitor: &mut dyn FnMut(usize, f32)) {
        let Some(&origin) = self.positions.get(index) else {
            return;
        };
        let radius_sq = radius * radius;
        let (column, row) = self.cell_coords(origin);
        let column_rings = rings(radius, self.cell_width, self.columns);
        let row_rings = rings(radius, self.cell_height, self.rows);

        let first_row = (row - row_rings).max(0);
        let last_row = (row + row_rings).min(self.rows as isize - 1);
        let first_column = (column - column_rings).max(0);
        let last_column = (column + column_rings).min(self.columns as isize - 1);

        for check_row in first_row..=last_row {
            let row_start = check_row as usize * self.columns;
            for check_column in first_column..=last_column {
                for &other in &self.cells[row_start + check_column as usize] {
                    if other == index {
                        continue;
                    }
                    let distance_sq = origin.distance_squared(self.positions[other]);
                    if distance_sq <= radius_sq {
                        visitor(other, distance_sq);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn neighbors_of(query: &dyn NeighborQuery, index: usize, radius: f32) -> Vec<usize> {
        let mut found = Vec::new();
        query.for_each_within(index, radius, &mut |other, _| found.push(other));
        found.sort_unstable();
        found
    }

    #[test]
    fn brute_force_finds_points_within_radius() {
        let mut query = BruteForce::default();
        query.rebuild(&[pt2(0.0, 0.0), pt2(1.0, 0.0), pt2(3.0, 4.0), pt2(10.0, 10.0)], 5.0);

        assert_eq!(vec![1, 2], neighbors_of(&query, 0, 5.0));
        assert_eq!(vec![1], neighbors_of(&query, 0, 1.0));
        assert!(neighbors_of(&query, 3, 2.0).is_empty());
    }

    #[test]
    fn queries_never_report_the_boid_itself() {
        let positions = [pt2(5.0, 5.0), pt2(5.0, 5.0)];
        for strategy in [NeighborStrategy::BruteForce, NeighborStrategy::Grid] {
            let mut query = strategy.build(20.0, 20.0, positions.len());
            query.rebuild(&positions, 3.0);
            assert_eq!(vec![1], neighbors_of(query.as_ref(), 0, 3.0));
        }
    }

    #[test]
    fn out_of_range_index_visits_nothing() {
        let mut grid = SpatialGrid::new(100.0, 100.0);
        grid.rebuild(&[pt2(1.0, 1.0)], 10.0);
        assert!(neighbors_of(&grid, 4, 50.0).is_empty());
    }

    #[test]
    fn grid_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(42);
        let positions: Vec<Point2> = (0..400)
            .map(|_| pt2(rng.gen_range(-20.0..520.0), rng.gen_range(-20.0..320.0)))
            .collect();

        let mut brute = BruteForce::default();
        let mut grid = SpatialGrid::new(500.0, 300.0);
        brute.rebuild(&positions, 40.0);
        grid.rebuild(&positions, 40.0);

        for radius in [5.0, 40.0, 95.0] {
            for index in (0..positions.len()).step_by(7) {
                assert_eq!(
                    neighbors_of(&brute, index, radius),
                    neighbors_of(&grid, index, radius),
                    "radius {radius}, boid {index}"
                );
            }
        }
    }

    #[test]
    fn grid_caps_its_resolution() {
        let mut grid = SpatialGrid::new(10_000.0, 10.0);
        grid.rebuild(&[pt2(0.0, 0.0)], 0.001);
        let (columns, rows) = grid.dimensions();
        assert_eq!(MAX_CELLS_PER_AXIS, columns);
        assert!(rows >= 1);
    }

    #[test]
    fn grid_survives_non_finite_positions() {
        let mut grid = SpatialGrid::new(100.0, 100.0);
        grid.rebuild(&[pt2(f32::NAN, 3.0), pt2(2.0, 2.0), pt2(f32::INFINITY, -1.0)], 10.0);
        assert_eq!(Vec::<usize>::new(), neighbors_of(&grid, 0, 10.0));
        assert!(neighbors_of(&grid, 1, f32::NAN).is_empty());
    }

    #[test]
    fn auto_strategy_switches_on_flock_size() {
        let mut small = NeighborStrategy::Auto.build(100.0, 100.0, 10);
        let mut large = NeighborStrategy::Auto.build(100.0, 100.0, 1_000);
        let positions = [pt2(1.0, 1.0), pt2(2.0, 2.0)];
        small.rebuild(&positions, 5.0);
        large.rebuild(&positions, 5.0);
        assert_eq!(neighbors_of(small.as_ref(), 0, 5.0), neighbors_of(large.as_ref(), 0, 5.0));
    }
}
