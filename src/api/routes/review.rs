use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{find_raceday, load_comp, ApiError};
use crate::calculate::ReviewBoard;
use crate::models::{RaceNo, Raceday};

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub raceday: Raceday,
    #[serde(flatten)]
    pub board: ReviewBoard,
}

pub async fn get_review(
    State(state): State<AppState>,
    Path((comp_id, raceday_id)): Path<(i64, i64)>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let comp = load_comp(&state, comp_id)?;
    let raceday = find_raceday(&comp, raceday_id)?;

    let race_numbers: Vec<RaceNo> = comp
        .races_for(raceday.id)
        .iter()
        .map(|r| r.race_no)
        .collect();
    let board = ReviewBoard::build(&comp.reviews_for(raceday.id), &race_numbers)?;

    Ok(Json(ReviewResponse { raceday, board }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{app, get_json};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_review_tables() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/comps/1/racedays/2/review").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["raceday"]["name"], "Cox Plate Day");
        assert_eq!(body["race_numbers"], serde_json::json!([1, 2, 3]));

        let tips = body["tips_table"].as_array().unwrap();
        assert_eq!(tips.len(), 9);
        assert_eq!(tips[0]["nickname"], "Ann");
        assert_eq!(tips[8]["nickname"], "Ivy");
        assert_eq!(tips[8]["has_tipped"], false);

        let points = body["points_table"].as_array().unwrap();
        assert_eq!(points[0]["rank"], 1);
        assert_eq!(points[1]["rank"], 1);
        // Gus and Hal tipped for 0; Ivy did not tip at all
        assert_eq!(points[6]["rank"], 7);
        assert_eq!(points[7]["rank"], 7);
        assert_eq!(points[8]["nickname"], "Ivy");
        assert_eq!(points[8]["rank"], 9);
    }
}
