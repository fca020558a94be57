use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{find_raceday, load_comp, ApiError};
use crate::calculate::{rank_reviews, OrderingMode};
use crate::models::{Metric, RankedEntity, RacedayId, TipsterId};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// "points" (default) or "odds"
    pub metric: Option<String>,
    /// Rows the client has loaded so far
    pub loaded: Option<usize>,
    /// Current tipster, flagged in the output
    pub tipster: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub ranked: RankedEntity,
    pub is_current: bool,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub raceday_id: RacedayId,
    pub metric: Metric,
    pub entries: Vec<LeaderboardEntry>,
    pub has_more: bool,
    pub remaining_count: usize,
    pub visible_count: usize,
    pub total_count: usize,
    /// Next value to send as `loaded` for "load more"
    pub next_loaded: usize,
    /// The current tipster's row, even when it is not yet visible
    pub current: Option<LeaderboardEntry>,
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path((comp_id, raceday_id)): Path<(i64, i64)>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let metric = match params.metric.as_deref() {
        Some(raw) => raw.parse::<Metric>().map_err(ApiError::BadRequest)?,
        None => Metric::default(),
    };
    let current_id = params.tipster.map(TipsterId::new);

    let comp = load_comp(&state, comp_id)?;
    let raceday = find_raceday(&comp, raceday_id)?;
    let reviews = comp.reviews_for(raceday.id);

    let entries: Vec<LeaderboardEntry> =
        rank_reviews(&reviews, metric, OrderingMode::Leaderboard)?
            .into_iter()
            .map(|ranked| LeaderboardEntry {
                is_current: Some(ranked.entity.id) == current_id,
                ranked,
            })
            .collect();

    let current = entries.iter().find(|e| e.is_current).cloned();
    let loaded = params.loaded.unwrap_or(0);
    let page = state.paginator.paginate(&entries, loaded);

    Ok(Json(LeaderboardResponse {
        raceday_id: raceday.id,
        metric,
        next_loaded: state.paginator.load_more(page.visible_count),
        entries: page.visible,
        has_more: page.has_more,
        remaining_count: page.remaining_count,
        visible_count: page.visible_count,
        total_count: page.total_count,
        current,
    }))
}
