use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{dto::SeatReportDto, error::ApiError, state::AppState};

/// GET /trains/{id}/seats — coach-wise availability for one train.
pub async fn seats(
    Path(train_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeatReportDto>, ApiError> {
    let summaries = state.engine.availability(&train_id)?;
    Ok(Json(SeatReportDto::from(&summaries)))
}
