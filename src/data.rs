use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Type aliases for clarity
pub type RollNo = String;
pub type Branch = String;
pub type SeatNo = u32;

/// Raw record from the roster source. Only entries with role "student" and
/// both fields present take part in seating; the rest are skipped during
/// grouping, not rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterEntry {
    pub role: String,
    pub roll_no: Option<RollNo>,
    pub branch: Option<Branch>,
}

/// An eligible student as the allocator sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub roll_no: RollNo,
    pub branch: Branch,
}

/// One branch's share of a room: how many students sit which paper.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRequirement {
    pub branch: Branch,
    pub subject: String,
    pub students_count: u32,
}

/// A single room to fill, with its branch composition in request order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_number: String,
    pub branches: Vec<BranchRequirement>,
}

/// The complete input for one seating batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanRequest {
    pub block: String,
    pub rooms: Vec<RoomRequest>,
}

/// One seated student. A successful batch produces an ordered sequence of
/// these, rooms in request order and seats in seat-number order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub roll_no: RollNo,
    pub block: String,
    pub room: String,
    pub seat_no: SeatNo,
    pub branch: Branch,
    pub subject: String,
}

/// Per-branch availability figures reported alongside a successful plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStats {
    pub total: usize,
    pub assigned: usize,
    pub available: usize,
}

/// Aggregate numbers for one generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub total_assigned: usize,
    pub branch_distribution: BTreeMap<Branch, BranchStats>,
}

/// The final output of a successful batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutput {
    pub assignments: Vec<SeatAssignment>,
    pub stats: PlanStats,
}
