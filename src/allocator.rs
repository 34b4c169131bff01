use crate::data::{Branch, SeatAssignment, SeatNo, Student};
use crate::roster::UsedSet;
use log::trace;

// orthogonal neighbours: left, right, front, back
const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// One branch's supply for a single room: exactly the students that will
/// fill its quota, consumed front to back with no reordering.
#[derive(Debug, Clone)]
pub struct RoomPool {
    pub branch: Branch,
    pub subject: String,
    pub students: Vec<Student>,
    pub remaining: u32,
    cursor: usize,
}

impl RoomPool {
    pub fn new(branch: Branch, subject: String, students: Vec<Student>) -> RoomPool {
        let remaining = students.len() as u32;
        RoomPool {
            branch,
            subject,
            students,
            remaining,
            cursor: 0,
        }
    }
}

/// Outcome of filling one room: the scanned grid plus the assignment list
/// derived from it in seat-number order.
#[derive(Debug, Clone)]
pub struct RoomLayout {
    pub grid: Vec<Vec<Option<SeatAssignment>>>,
    pub assignments: Vec<SeatAssignment>,
}

/// Fills one room's grid. Dimensions come from the caller so the scan logic
/// never assumes a particular room size.
#[derive(Debug, Clone, Copy)]
pub struct RoomAllocator {
    rows: usize,
    cols: usize,
}

impl RoomAllocator {
    pub fn new(rows: usize, cols: usize) -> RoomAllocator {
        RoomAllocator { rows, cols }
    }

    pub fn capacity(&self) -> u32 {
        (self.rows * self.cols) as u32
    }

    /// Scans cells row-major and seats, at each cell, the first pool in
    /// supplied order that still has quota and whose branch does not sit in
    /// an orthogonally neighbouring seat. Seat numbers start at 1 and only
    /// advance when a cell is filled; a cell no pool qualifies for stays
    /// empty for good. There is no backtracking, so an unlucky scan order
    /// can leave quota unseated even when a different ordering would fit;
    /// callers detect that through the pools' `remaining` counts.
    pub fn allocate(
        &self,
        block: &str,
        room: &str,
        pools: &mut [RoomPool],
        used: &mut UsedSet,
    ) -> RoomLayout {
        let mut grid: Vec<Vec<Option<SeatAssignment>>> = vec![vec![None; self.cols]; self.rows];
        let mut assignments = Vec::new();
        let mut seat_no: SeatNo = 1;

        for row in 0..self.rows {
            for col in 0..self.cols {
                if seat_no > self.capacity() {
                    break;
                }

                let Some(pool) = pools
                    .iter_mut()
                    .find(|p| p.remaining > 0 && placement_fits(&grid, row, col, &p.branch))
                else {
                    trace!("room {room}: no branch fits at ({row}, {col}), cell left empty");
                    continue;
                };

                let student = &pool.students[pool.cursor];
                let assignment = SeatAssignment {
                    roll_no: student.roll_no.clone(),
                    block: block.to_string(),
                    room: room.to_string(),
                    seat_no,
                    branch: student.branch.clone(),
                    subject: pool.subject.clone(),
                };
                grid[row][col] = Some(assignment.clone());
                assignments.push(assignment);
                used.insert(student.roll_no.clone());
                pool.cursor += 1;
                pool.remaining -= 1;
                seat_no += 1;
            }
        }

        RoomLayout { grid, assignments }
    }
}

/// A placement is legal when no orthogonally adjacent seat already holds the
/// same branch. Diagonal neighbours do not count.
fn placement_fits(grid: &[Vec<Option<SeatAssignment>>], row: usize, col: usize, branch: &str) -> bool {
    for (dr, dc) in NEIGHBOURS {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        if r < 0 || c < 0 {
            continue;
        }
        let neighbour = grid
            .get(r as usize)
            .and_then(|cells| cells.get(c as usize))
            .and_then(|cell| cell.as_ref());
        if let Some(seat) = neighbour {
            if seat.branch == branch {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students(branch: &str, n: usize) -> Vec<Student> {
        (1..=n)
            .map(|i| Student {
                roll_no: format!("{branch}-{i:02}"),
                branch: branch.to_string(),
            })
            .collect()
    }

    fn pool(branch: &str, subject: &str, n: usize) -> RoomPool {
        RoomPool::new(branch.to_string(), subject.to_string(), students(branch, n))
    }

    fn assert_no_adjacent_same_branch(grid: &[Vec<Option<SeatAssignment>>]) {
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(seat) = cell else { continue };
                // right and down cover every orthogonal pair once
                if let Some(Some(right)) = cells.get(col + 1) {
                    assert_ne!(seat.branch, right.branch, "clash at ({row}, {col})");
                }
                if let Some(Some(down)) = grid.get(row + 1).and_then(|r| r.get(col)) {
                    assert_ne!(seat.branch, down.branch, "clash at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn two_branches_alternate_without_adjacency_clashes() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        let mut pools = vec![pool("CSE", "DS", 4), pool("ECE", "OS", 4)];

        let layout = allocator.allocate("A", "101", &mut pools, &mut used);

        assert_eq!(layout.assignments.len(), 8);
        let seat_nos: Vec<SeatNo> = layout.assignments.iter().map(|a| a.seat_no).collect();
        assert_eq!(seat_nos, (1..=8).collect::<Vec<SeatNo>>());
        assert!(pools.iter().all(|p| p.remaining == 0));
        assert_eq!(used.len(), 8);
        assert_no_adjacent_same_branch(&layout.grid);
    }

    #[test]
    fn first_supplied_branch_wins_and_pools_drain_in_order() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        let mut pools = vec![pool("CSE", "DS", 4), pool("ECE", "OS", 4)];

        let layout = allocator.allocate("A", "101", &mut pools, &mut used);

        // CSE is first in pool order, so it takes (0, 0); the adjacency rule
        // then forces strict alternation along row 0
        let rolls: Vec<&str> = layout.assignments.iter().map(|a| a.roll_no.as_str()).collect();
        assert_eq!(
            rolls,
            [
                "CSE-01", "ECE-01", "CSE-02", "ECE-02", "CSE-03", "ECE-03", "CSE-04", "ECE-04"
            ]
        );
        assert_eq!(layout.assignments[0].subject, "DS");
        assert_eq!(layout.assignments[1].subject, "OS");
    }

    #[test]
    fn lone_branch_is_spaced_every_other_cell() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        let mut pools = vec![pool("MECH", "TD", 4)];

        let layout = allocator.allocate("A", "101", &mut pools, &mut used);

        assert_eq!(layout.assignments.len(), 4);
        // seat numbers stay contiguous even though cells are skipped
        let seat_nos: Vec<SeatNo> = layout.assignments.iter().map(|a| a.seat_no).collect();
        assert_eq!(seat_nos, [1, 2, 3, 4]);
        for col in [0, 2, 4, 6] {
            assert!(layout.grid[0][col].is_some());
        }
        for col in [1, 3, 5, 7] {
            assert!(layout.grid[0][col].is_none());
        }
    }

    #[test]
    fn full_grid_fills_with_two_balanced_branches() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        let mut pools = vec![pool("CSE", "DS", 24), pool("ECE", "OS", 24)];

        let layout = allocator.allocate("A", "101", &mut pools, &mut used);

        assert_eq!(layout.assignments.len(), 48);
        assert!(layout.grid.iter().flatten().all(|cell| cell.is_some()));
        assert_no_adjacent_same_branch(&layout.grid);
    }

    #[test]
    fn unseatable_quota_leaves_remaining_without_backtracking() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        // a lone branch can occupy at most every other cell: 24 of 48
        let mut pools = vec![pool("CSE", "DS", 25)];

        let layout = allocator.allocate("A", "101", &mut pools, &mut used);

        assert_eq!(layout.assignments.len(), 24);
        assert_eq!(pools[0].remaining, 1);
        assert_no_adjacent_same_branch(&layout.grid);
    }

    #[test]
    fn placed_students_are_marked_used() {
        let allocator = RoomAllocator::new(6, 8);
        let mut used = UsedSet::new();
        let mut pools = vec![pool("CSE", "DS", 2)];

        allocator.allocate("A", "101", &mut pools, &mut used);

        assert!(used.contains("CSE-01"));
        assert!(used.contains("CSE-02"));
        assert_eq!(used.len(), 2);
    }
}
