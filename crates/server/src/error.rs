use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use railbook::booking;
use serde_json::json;

/// A booking failure rendered for the client: a concrete status code and the
/// specific reason, never a generic "failed".
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<booking::Error> for ApiError {
    fn from(error: booking::Error) -> Self {
        let status = match &error {
            booking::Error::TrainNotFound(_)
            | booking::Error::StationNotFound(_)
            | booking::Error::ScheduleNotFound { .. } => StatusCode::NOT_FOUND,
            booking::Error::StationNotInRoute(_)
            | booking::Error::InvalidSegmentOrder { .. }
            | booking::Error::NoCoachOfType { .. } => StatusCode::BAD_REQUEST,
            booking::Error::SeatUnavailable(_) => StatusCode::CONFLICT,
            booking::Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
