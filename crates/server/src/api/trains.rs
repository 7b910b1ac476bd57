use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;

use crate::{
    dto::{ScheduleDto, TrainDto, TrainMatchDto},
    error::ApiError,
    state::AppState,
};

/// GET /trains — reference list of all trains.
pub async fn trains(State(state): State<Arc<AppState>>) -> Json<Vec<TrainDto>> {
    let trains: Vec<_> = state
        .engine
        .network()
        .trains
        .iter()
        .map(TrainDto::from)
        .collect();
    Json(trains)
}

/// GET /trains/{id}/schedule?date=YYYY-MM-DD
pub async fn schedule(
    Path(train_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScheduleDto>, ApiError> {
    let date = parse_date(&params, "date")?;
    let schedule = state.engine.schedule(&train_id, date)?;
    Ok(Json(ScheduleDto::from(schedule)))
}

/// GET /trains/search?from=..&to=..&date=YYYY-MM-DD — trains serving a
/// segment on a date, in travel order.
pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TrainMatchDto>>, ApiError> {
    let from = require(&params, "from")?;
    let to = require(&params, "to")?;
    let date = parse_date(&params, "date")?;
    let matches = state.engine.trains_between(from, to, date)?;
    Ok(Json(matches.iter().map(TrainMatchDto::from).collect()))
}

fn require<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ApiError> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, format!("Missing {key} parameter")))
}

fn parse_date(params: &HashMap<String, String>, key: &str) -> Result<NaiveDate, ApiError> {
    require(params, key)?.parse().map_err(|_| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("{key} must be a YYYY-MM-DD date"),
        )
    })
}
