use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{load_comp, reference_date, ApiError};
use crate::calculate::{classify_all, filter_and_sort_past, filter_window};
use crate::models::{ClassifiedRaceday, RaceDate};

#[derive(Debug, Serialize)]
pub struct RacedayListResponse {
    pub reference_date: RaceDate,
    /// Yesterday through the window's last day, soonest first
    pub live: Vec<ClassifiedRaceday>,
    /// Before yesterday, most recent first
    pub past: Vec<ClassifiedRaceday>,
    /// Every raceday in id order
    pub all: Vec<ClassifiedRaceday>,
}

pub async fn list_racedays(
    State(state): State<AppState>,
    Path(comp_id): Path<i64>,
) -> Result<Json<RacedayListResponse>, ApiError> {
    let reference = reference_date(&state)?;
    let comp = load_comp(&state, comp_id)?;

    // Same-day racedays keep id order through the stable date sorts below.
    let mut racedays = comp.racedays;
    racedays.sort_by_key(|r| r.id);

    let all = classify_all(&racedays, reference);
    let live = filter_window(&all, reference, state.window);
    let past = filter_and_sort_past(&all, reference);

    tracing::debug!(
        "Competition {}: {} live, {} past racedays",
        comp_id,
        live.len(),
        past.len()
    );

    Ok(Json(RacedayListResponse {
        reference_date: reference,
        live,
        past,
        all,
    }))
}
