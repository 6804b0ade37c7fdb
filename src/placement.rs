//! Arranges one room's batch of students into a four-column seat grid.
//!
//! Three fill orders are supported. `ZigZagDeptSafe` is the default: rows are
//! walked top to bottom, alternating direction so the path snakes through the
//! room, and each seat takes the first remaining student whose department
//! differs from every already-seated orthogonal neighbour. When no such
//! student is left the first remaining one is seated anyway and the seat is
//! flagged as forced.

use crate::data::Student;
use crate::labels::COLUMNS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementStrategy {
    /// Snake path with department checks against placed neighbours.
    #[default]
    ZigZagDeptSafe,
    /// Row-major, left to right, with the same department checks.
    GreedyNeighborSafe,
    /// Row-major in batch order, no checks.
    SimpleSequential,
}

/// A student together with the grid cell they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSeat {
    pub row: usize,
    pub col: usize,
    pub student: Student,
    /// Seated next to a same-department neighbour for lack of alternatives.
    pub forced: bool,
}

impl PlacementStrategy {
    #[inline]
    fn checks_departments(self) -> bool {
        !matches!(self, PlacementStrategy::SimpleSequential)
    }

    /// Grid cells in visiting order for a grid of `rows` rows.
    fn visiting_order(self, rows: usize) -> Vec<(usize, usize)> {
        let mut order = Vec::with_capacity(rows * COLUMNS);
        for row in 0..rows {
            let reversed = self == PlacementStrategy::ZigZagDeptSafe && row % 2 == 1;
            for step in 0..COLUMNS {
                let col = if reversed { COLUMNS - 1 - step } else { step };
                order.push((row, col));
            }
        }
        order
    }

    /// Seats every student of `batch`, returning them in seating order.
    pub fn arrange(self, batch: Vec<Student>) -> Vec<PlacedSeat> {
        let rows = batch.len().div_ceil(COLUMNS);
        let mut grid: Vec<[Option<usize>; COLUMNS]> = vec![[None; COLUMNS]; rows];
        let mut seats: Vec<PlacedSeat> = Vec::with_capacity(batch.len());
        let mut remaining = batch;

        for (row, col) in self.visiting_order(rows) {
            if remaining.is_empty() {
                break;
            }

            let (pick, forced) = if self.checks_departments() {
                let taken = neighbour_depts(&grid, &seats, row, col);
                match remaining
                    .iter()
                    .position(|s| taken.iter().all(|d| *d != s.dept))
                {
                    Some(i) => (i, false),
                    None => (0, true),
                }
            } else {
                (0, false)
            };

            let student = remaining.remove(pick);
            grid[row][col] = Some(seats.len());
            seats.push(PlacedSeat {
                row,
                col,
                student,
                forced,
            });
        }

        seats
    }
}

/// Departments of the already-occupied cells left, right and in front of
/// `(row, col)`. The cell behind is never filled yet.
fn neighbour_depts<'s>(
    grid: &[[Option<usize>; COLUMNS]],
    seats: &'s [PlacedSeat],
    row: usize,
    col: usize,
) -> Vec<&'s str> {
    let mut cells = Vec::with_capacity(3);
    if col > 0 {
        cells.push(grid[row][col - 1]);
    }
    if col + 1 < COLUMNS {
        cells.push(grid[row][col + 1]);
    }
    if row > 0 {
        cells.push(grid[row - 1][col]);
    }
    cells
        .into_iter()
        .flatten()
        .map(|i| seats[i].student.dept.as_str())
        .collect()
}
