use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised while shaping, validating or executing a seating batch.
///
/// Every failure is reported synchronously and is deterministic: retrying
/// the same request against the same roster fails the same way, so nothing
/// here is worth retrying automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    // malformed input, rejected before validation begins
    #[error("room number is missing or empty")]
    EmptyRoomNumber,
    #[error("duplicate room {room} in request")]
    DuplicateRoom { room: String },
    #[error("room {room}: branch label is missing or empty")]
    EmptyBranch { room: String },
    #[error("room {room}: students count for {branch} must be at least 1")]
    ZeroCount { room: String, branch: String },

    // feasibility failures, raised before any seat is touched
    #[error("room {room} capacity exceeded ({requested}/{capacity})")]
    CapacityExceeded {
        room: String,
        requested: u32,
        capacity: u32,
    },
    #[error(
        "not enough students in {branch} branch for room {room}: required {required}, available {available}"
    )]
    InsufficientStudents {
        room: String,
        branch: String,
        required: u32,
        available: u32,
    },

    // the greedy scan could not legally seat the full quota even though
    // validation passed; the whole batch is discarded
    #[error("room {room}: seated only {seated} of {requested} {branch} students")]
    SeatingShortfall {
        room: String,
        branch: String,
        requested: u32,
        seated: u32,
    },
}

impl PlanError {
    /// Status the HTTP layer reports this failure with.
    pub fn status(&self) -> StatusCode {
        match self {
            PlanError::SeatingShortfall { .. } => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
