use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{CompId, Raceday};
use crate::storage::{list_comps, EntityType, JsonlReader};

#[derive(Debug, Serialize)]
pub struct CompSummary {
    pub id: CompId,
    pub raceday_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CompsResponse {
    pub comps: Vec<CompSummary>,
}

pub async fn list_competitions(
    State(state): State<AppState>,
) -> Result<Json<CompsResponse>, ApiError> {
    let comps = list_comps(&state.storage)?
        .into_iter()
        .map(|id| -> Result<CompSummary, ApiError> {
            let raceday_count =
                JsonlReader::<Raceday>::for_entity(&state.storage, EntityType::Raceday, id)
                    .read_all()?
                    .len();
            Ok(CompSummary { id, raceday_count })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(CompsResponse { comps }))
}
