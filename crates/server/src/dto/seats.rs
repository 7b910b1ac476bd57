use railbook::booking::CoachAvailability;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachSummaryDto {
    pub coach_number: String,
    pub coach_type: String,
    pub train_name: String,
    pub available_seats: u32,
    pub booked_seats: u32,
}

impl CoachSummaryDto {
    pub fn from(summary: &CoachAvailability) -> Self {
        Self {
            coach_number: summary.coach_number.to_string(),
            coach_type: summary.coach_type.to_string(),
            train_name: summary.train_name.to_string(),
            available_seats: summary.available_seats,
            booked_seats: summary.booked_seats,
        }
    }
}

/// Coach-wise availability plus a human-readable status line, so the client
/// can tell "fully booked / no seat data" apart from an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatReportDto {
    pub message: String,
    pub coaches: Vec<CoachSummaryDto>,
}

impl SeatReportDto {
    pub fn from(summaries: &[CoachAvailability]) -> Self {
        let message = if summaries.is_empty() {
            "No seat details found: this train may be fully booked or lack seat data".to_string()
        } else {
            "Coach-wise seat details fetched successfully".to_string()
        };
        Self {
            message,
            coaches: summaries.iter().map(CoachSummaryDto::from).collect(),
        }
    }
}
