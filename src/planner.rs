use crate::allocator::{RoomAllocator, RoomPool};
use crate::data::{
    BranchStats, PlanOutput, PlanRequest, PlanStats, RoomRequest, RosterEntry, SeatAssignment,
    Student,
};
use crate::error::PlanError;
use crate::roster::{self, BranchPools, UsedSet};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};

// exam hall layout used for every room
pub const GRID_ROWS: usize = 6;
pub const GRID_COLS: usize = 8;

/// Runs one seating batch: shape checks, feasibility validation, then
/// strictly sequential room-by-room allocation against a shared used-set.
/// All-or-nothing: an error means no assignment was produced and nothing
/// should be persisted.
pub fn generate_plan(
    roster: &[RosterEntry],
    request: &PlanRequest,
) -> Result<PlanOutput, PlanError> {
    check_request(request)?;

    let block = sanitize_label(&request.block);
    info!(
        "generating seating plan for block {block} across {} rooms",
        request.rooms.len()
    );

    let pools = roster::group_by_branch(roster);
    for (branch, students) in &pools {
        debug!("{branch}: {} eligible students", students.len());
    }

    let allocator = RoomAllocator::new(GRID_ROWS, GRID_COLS);
    validate(&pools, request, allocator.capacity())?;

    let mut used = UsedSet::new();
    let mut assignments = Vec::new();
    for room in &request.rooms {
        debug!("processing room {}", room.room_number);
        let mut room_pools = build_room_pools(&pools, room, &used)?;
        let layout = allocator.allocate(&block, &room.room_number, &mut room_pools, &mut used);

        if let Some(short) = room_pools.iter().find(|p| p.remaining > 0) {
            let requested = short.students.len() as u32;
            return Err(PlanError::SeatingShortfall {
                room: room.room_number.clone(),
                branch: short.branch.clone(),
                requested,
                seated: requested - short.remaining,
            });
        }

        let empty = layout.grid.iter().flatten().filter(|cell| cell.is_none()).count();
        debug!(
            "room {}: {} seats filled, {empty} cells left empty",
            room.room_number,
            layout.assignments.len()
        );
        assignments.extend(layout.assignments);
    }

    info!("successfully assigned {} students", assignments.len());
    let stats = build_stats(&pools, &assignments);
    Ok(PlanOutput { assignments, stats })
}

// shape problems are rejected before any feasibility check runs
fn check_request(request: &PlanRequest) -> Result<(), PlanError> {
    let mut seen_rooms = HashSet::new();
    for room in &request.rooms {
        if room.room_number.trim().is_empty() {
            return Err(PlanError::EmptyRoomNumber);
        }
        if !seen_rooms.insert(room.room_number.as_str()) {
            return Err(PlanError::DuplicateRoom {
                room: room.room_number.clone(),
            });
        }
        for requirement in &room.branches {
            if requirement.branch.trim().is_empty() {
                return Err(PlanError::EmptyBranch {
                    room: room.room_number.clone(),
                });
            }
            if requirement.students_count == 0 {
                return Err(PlanError::ZeroCount {
                    room: room.room_number.clone(),
                    branch: requirement.branch.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Checks capacity and supply for every room before any seat is assigned.
/// Supply is checked against a running reservation: a student counted for an
/// earlier room is unavailable to later rooms of the same request.
fn validate(pools: &BranchPools, request: &PlanRequest, capacity: u32) -> Result<(), PlanError> {
    let mut reserved = UsedSet::new();
    for room in &request.rooms {
        let requested: u32 = room.branches.iter().map(|b| b.students_count).sum();
        if requested > capacity {
            return Err(PlanError::CapacityExceeded {
                room: room.room_number.clone(),
                requested,
                capacity,
            });
        }
        for requirement in &room.branches {
            let available = roster::available_count(pools, &requirement.branch, &reserved);
            if available < requirement.students_count as usize {
                return Err(PlanError::InsufficientStudents {
                    room: room.room_number.clone(),
                    branch: requirement.branch.clone(),
                    required: requirement.students_count,
                    available: available as u32,
                });
            }
            if let Some(students) = pools.get(&requirement.branch) {
                let picks: Vec<_> = students
                    .iter()
                    .filter(|s| !reserved.contains(&s.roll_no))
                    .take(requirement.students_count as usize)
                    .map(|s| s.roll_no.clone())
                    .collect();
                reserved.extend(picks);
            }
        }
    }
    Ok(())
}

// one consumption view per branch, scoped to the students this room seats:
// unused students in roster order, truncated to the requested count
fn build_room_pools(
    pools: &BranchPools,
    room: &RoomRequest,
    used: &UsedSet,
) -> Result<Vec<RoomPool>, PlanError> {
    let mut room_pools = Vec::with_capacity(room.branches.len());
    for requirement in &room.branches {
        let students: Vec<Student> = pools
            .get(&requirement.branch)
            .map(|all| {
                all.iter()
                    .filter(|s| !used.contains(&s.roll_no))
                    .take(requirement.students_count as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if (students.len() as u32) < requirement.students_count {
            return Err(PlanError::InsufficientStudents {
                room: room.room_number.clone(),
                branch: requirement.branch.clone(),
                required: requirement.students_count,
                available: students.len() as u32,
            });
        }
        room_pools.push(RoomPool::new(
            requirement.branch.clone(),
            requirement.subject.clone(),
            students,
        ));
    }
    Ok(room_pools)
}

// per-branch totals over the whole roster grouping, as reported to the caller
fn build_stats(pools: &BranchPools, assignments: &[SeatAssignment]) -> PlanStats {
    let mut branch_distribution = BTreeMap::new();
    for (branch, students) in pools {
        let assigned = assignments.iter().filter(|a| &a.branch == branch).count();
        branch_distribution.insert(
            branch.clone(),
            BranchStats {
                total: students.len(),
                assigned,
                available: students.len() - assigned,
            },
        );
    }
    PlanStats {
        total_assigned: assignments.len(),
        branch_distribution,
    }
}

// strips anything that is not alphanumeric, whitespace or a hyphen
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect()
}
