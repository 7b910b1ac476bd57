use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use railbook::booking::Confirmation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatRequest {
    pub train_id: String,
    pub travel_date: NaiveDate,
    pub from_station_id: String,
    pub to_station_id: String,
    pub coach_type_id: String,
    pub seat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationDto {
    pub booking_id: u64,
    pub passenger_id: String,
    pub train_id: String,
    pub train_name: String,
    pub departure_time: NaiveTime,
    pub travel_date: NaiveDate,
    pub booking_date: DateTime<Utc>,
    pub seat_number: String,
    pub coach_number: String,
}

impl ConfirmationDto {
    pub fn from(confirmation: &Confirmation) -> Self {
        Self {
            booking_id: confirmation.booking_id,
            passenger_id: confirmation.passenger_id.to_string(),
            train_id: confirmation.train_id.to_string(),
            train_name: confirmation.train_name.to_string(),
            departure_time: confirmation.departure,
            travel_date: confirmation.travel_date,
            booking_date: confirmation.booked_at,
            seat_number: confirmation.seat_number.to_string(),
            coach_number: confirmation.coach_number.to_string(),
        }
    }
}
