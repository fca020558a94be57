use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{find_raceday, load_comp, ApiError};
use crate::calculate::{build_racecard, Racecard};
use crate::models::Raceday;

#[derive(Debug, Serialize)]
pub struct RacesResponse {
    pub raceday: Raceday,
    #[serde(flatten)]
    pub racecard: Racecard,
}

pub async fn get_races(
    State(state): State<AppState>,
    Path((comp_id, raceday_id)): Path<(i64, i64)>,
) -> Result<Json<RacesResponse>, ApiError> {
    let comp = load_comp(&state, comp_id)?;
    let raceday = find_raceday(&comp, raceday_id)?;

    let racecard = build_racecard(
        &comp.races_for(raceday.id),
        &comp.reviews_for(raceday.id),
    );

    Ok(Json(RacesResponse { raceday, racecard }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{app, get_json};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_racecard() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/comps/1/racedays/2/races").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["next_to_jump"], 2);
        assert_eq!(body["day_complete"], false);

        let races = body["races"].as_array().unwrap();
        assert_eq!(races[0]["status"], "RESULT");
        assert_eq!(races[1]["status"], "NEXT TO JUMP");
        assert_eq!(races[2]["status"], "PENDING");
        assert!(races[0]["consensus"].is_null());
        assert_eq!(
            races[0]["results"],
            serde_json::json!([{
                "place": "1st",
                "runner_no": 2,
                "runner_name": "Bravo",
                "win_odds": "$4.50",
                "place_odds": "$1.90",
            }])
        );
        assert_eq!(races[1]["results"], serde_json::json!([]));

        // Every tipster picked 1 with substitute 3, so the substitute collects the votes
        let runners = races[1]["consensus"]["runners"].as_array().unwrap();
        assert_eq!(runners[0]["runner_no"], 3);
        assert_eq!(runners[0]["tipster_count"], 8);
        assert_eq!(races[1]["substitutions"][0]["main_runner_name"], "Alpha");
        assert_eq!(races[1]["substitutions"][0]["alt_runner_name"], "Charlie");
    }
}
