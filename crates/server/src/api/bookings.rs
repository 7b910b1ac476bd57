use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use railbook::booking::ReservationRequest;

use crate::{
    dto::{BookSeatRequest, ConfirmationDto},
    error::ApiError,
    state::AppState,
};

/// Header the auth collaborator fills in with the verified passenger id.
const PASSENGER_HEADER: &str = "x-passenger-id";

/// POST /bookings/seat — atomic reserve-or-fail claim on one seat.
pub async fn book_seat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BookSeatRequest>,
) -> Result<Json<ConfirmationDto>, ApiError> {
    let passenger_id = headers
        .get(PASSENGER_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Missing passenger identity"))?;

    let request = ReservationRequest {
        passenger_id: passenger_id.to_string(),
        train_id: body.train_id,
        travel_date: body.travel_date,
        from_station_id: body.from_station_id,
        to_station_id: body.to_station_id,
        coach_type_id: body.coach_type_id,
        seat_id: body.seat_id,
    };
    let confirmation = state.engine.reserve(request)?;
    Ok(Json(ConfirmationDto::from(&confirmation)))
}
