use crate::data::{PlanOutput, PlanRequest, RosterEntry, SeatAssignment};
use crate::planner;
use crate::roster;
use crate::store::{BranchRosterEntry, SeatView, SeatingStore};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};

/// Everything the handlers share: the roster snapshot fed by the roster
/// source and the currently stored seating plan.
#[derive(Default)]
pub struct AppState {
    roster: Vec<RosterEntry>,
    store: SeatingStore,
}

type SharedState = Arc<RwLock<AppState>>;

async fn load_roster_handler(
    State(state): State<SharedState>,
    Json(roster): Json<Vec<RosterEntry>>,
) -> Json<Value> {
    let count = roster.len();
    state.write().unwrap().roster = roster;
    info!("roster snapshot replaced with {count} entries");
    Json(json!({ "count": count }))
}

async fn generate_handler(
    State(state): State<SharedState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanOutput>, (StatusCode, String)> {
    let mut state = state.write().unwrap();
    match planner::generate_plan(&state.roster, &request) {
        Ok(output) => {
            // the stored plan is only ever replaced wholesale, and only on success
            state.store.replace_all(output.assignments.clone());
            Ok(Json(output))
        }
        Err(e) => Err((e.status(), e.to_string())),
    }
}

async fn seating_handler(State(state): State<SharedState>) -> Json<Vec<SeatAssignment>> {
    Json(state.read().unwrap().store.all())
}

async fn seat_lookup_handler(
    State(state): State<SharedState>,
    Path(roll_no): Path<String>,
) -> Result<Json<SeatView>, (StatusCode, String)> {
    state.read().unwrap().store.find_by_roll(&roll_no).map(Json).ok_or((
        StatusCode::NOT_FOUND,
        format!("no seating arrangement found for roll number {roll_no}"),
    ))
}

async fn branch_students_handler(
    State(state): State<SharedState>,
    Path(branch): Path<String>,
) -> Json<Vec<BranchRosterEntry>> {
    let state = state.read().unwrap();
    let pools = roster::group_by_branch(&state.roster);
    let students = pools.get(&branch).cloned().unwrap_or_default();
    Json(state.store.roster_view(&students))
}

pub async fn run_server() {
    let state: SharedState = Arc::new(RwLock::new(AppState::default()));

    let app = Router::new()
        .route("/v1/roster", post(load_roster_handler))
        .route("/v1/seating/generate", post(generate_handler))
        .route("/v1/seating", get(seating_handler))
        .route("/v1/seating/:roll_no", get(seat_lookup_handler))
        .route("/v1/students/:branch", get(branch_students_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
