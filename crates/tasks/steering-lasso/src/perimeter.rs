use std::collections::{BTreeSet, VecDeque};

use steering_core::geometry::Point;

use crate::grid::{LassoGrid, cell_center};

type Cell = (usize, usize);

/// Grid heading, in clockwise order as drawn on screen (+y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    fn reverse(self) -> Self {
        self.clockwise().clockwise()
    }

    fn step(self, (row, col): Cell) -> Option<Cell> {
        match self {
            Self::North => Some((row.checked_sub(1)?, col)),
            Self::South => Some((row + 1, col)),
            Self::West => Some((row, col.checked_sub(1)?)),
            Self::East => Some((row, col + 1)),
        }
    }
}

/// Target cells grouped into 4-connected clusters, each sorted row-major.
pub fn target_components(grid: &LassoGrid) -> Vec<Vec<Cell>> {
    let mut remaining: BTreeSet<Cell> = grid
        .cells()
        .filter(|&(r, c, _)| grid.is_target(r, c))
        .map(|(r, c, _)| (r, c))
        .collect();
    let mut components = Vec::new();

    while let Some(seed) = remaining.pop_first() {
        let mut component = vec![seed];
        let mut queue = VecDeque::from([seed]);
        while let Some(cell) = queue.pop_front() {
            for heading in [Heading::North, Heading::East, Heading::South, Heading::West] {
                if let Some(next) = heading.step(cell)
                    && remaining.remove(&next)
                {
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}

/// Outer boundary of one 4-connected target cluster as a clockwise cycle of
/// cells: top row left to right, right side downwards, bottom row right to
/// left, left side upwards.
///
/// The walk keeps the outside on its left, preferring a left turn, then
/// straight, then right, then reversing. Interior cells are never visited;
/// they already lie inside the traced outline. One-cell-wide arms are walked
/// out and back, which leaves zero-area spikes; the cut band around the
/// outline covers them.
pub fn trace_perimeter(grid: &LassoGrid, component: &[Cell]) -> Vec<Cell> {
    let Some(&start) = component.iter().min() else {
        return Vec::new();
    };
    let next_move = |cell: Cell, heading: Heading| {
        [
            heading.counter_clockwise(),
            heading,
            heading.clockwise(),
            heading.reverse(),
        ]
        .into_iter()
        .find_map(|h| {
            h.step(cell)
                .filter(|&(r, c)| grid.is_target(r, c))
                .map(|next| (next, h))
        })
    };

    let mut cycle = vec![start];
    // The start cell is the top-most, left-most one, so facing north leaves
    // nothing to the left or ahead.
    let Some(first) = next_move(start, Heading::North) else {
        return cycle;
    };
    let (mut cell, mut heading) = first;
    let limit = 4 * component.len() + 4;
    for _ in 0..limit {
        if cell == start && next_move(cell, heading) == Some(first) {
            break;
        }
        cycle.push(cell);
        match next_move(cell, heading) {
            Some((next, h)) => {
                cell = next;
                heading = h;
            },
            None => break,
        }
    }
    cycle
}

/// Anti-cheat polygons: one clockwise outline of target centers per cluster.
pub fn target_polygons(grid: &LassoGrid, origin: Point, spacing: f64) -> Vec<Vec<Point>> {
    target_components(grid)
        .iter()
        .map(|component| {
            trace_perimeter(grid, component)
                .into_iter()
                .map(|(r, c)| cell_center(origin, spacing, r, c))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use steering_core::geometry::point_in_polygon;

    use super::*;

    fn grid(rows: &[&str]) -> LassoGrid {
        LassoGrid::parse(rows).unwrap()
    }

    #[test]
    fn square_block_is_clockwise() {
        let g = grid(&[". X X .", ". X X ."]);
        let components = target_components(&g);
        assert_eq!(components.len(), 1);
        let cycle = trace_perimeter(&g, &components[0]);
        assert_eq!(cycle, vec![(0, 1), (0, 2), (1, 2), (1, 1)]);
    }

    #[test]
    fn single_row_walks_out_and_back() {
        let g = grid(&["X X X"]);
        let cycle = trace_perimeter(&g, &target_components(&g)[0]);
        assert_eq!(cycle, vec![(0, 0), (0, 1), (0, 2), (0, 1)]);
    }

    #[test]
    fn single_cell_is_a_point() {
        let g = grid(&[". X ."]);
        assert_eq!(trace_perimeter(&g, &target_components(&g)[0]), vec![(0, 1)]);
    }

    #[test]
    fn interior_cells_are_skipped() {
        let g = grid(&["X X X", "X X X", "X X X"]);
        let cycle = trace_perimeter(&g, &target_components(&g)[0]);
        assert_eq!(cycle.len(), 8);
        assert!(!cycle.contains(&(1, 1)));
        assert_eq!(
            cycle,
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]
        );
    }

    #[test]
    fn l_cluster_outline() {
        let g = grid(&[
            ". . . .",
            ". X X .",
            ". X X X",
            ". X X X",
        ]);
        let cycle = trace_perimeter(&g, &target_components(&g)[0]);
        assert_eq!(
            cycle,
            vec![
                (1, 1),
                (1, 2),
                (2, 2),
                (2, 3),
                (3, 3),
                (3, 2),
                (3, 1),
                (2, 1)
            ]
        );
    }

    #[test]
    fn disjoint_clusters_get_separate_polygons() {
        let g = grid(&["X X . X X", "X X . X X"]);
        let polygons = target_polygons(&g, Point::ZERO, 1.0);
        assert_eq!(polygons.len(), 2);
        assert!(point_in_polygon(Point::new(0.5, 0.5), &polygons[0]));
        assert!(point_in_polygon(Point::new(3.5, 0.5), &polygons[1]));
        assert!(!point_in_polygon(Point::new(2.0, 0.5), &polygons[0]));
        assert!(!point_in_polygon(Point::new(2.0, 0.5), &polygons[1]));
    }

    #[test]
    fn diagonal_neighbours_are_separate_clusters() {
        let g = grid(&["X .", ". X"]);
        assert_eq!(target_components(&g).len(), 2);
    }
}
