use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedStation {
    pub station_id: String,
    pub station_name: String,
    pub station_status: String,
    pub city: String,
    pub province: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedTrain {
    pub train_id: String,
    pub train_name: String,
    pub train_type: String,
    pub coach_count: u32,
    pub train_status: String,
    pub source_station_id: String,
    pub destination_station_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedStop {
    pub train_id: String,
    pub station_id: String,
    pub arrival_time: NaiveTime,
    pub departure_time: NaiveTime,
    pub stop_number: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedSchedule {
    pub schedule_id: String,
    pub train_id: String,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub schedule_status: String,
    pub duration_minutes: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedCoachType {
    pub coach_type_id: String,
    pub type_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedCoach {
    pub coach_id: String,
    pub train_id: String,
    pub coach_number: String,
    pub coach_type_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeedSeat {
    pub seat_id: String,
    pub coach_id: String,
    pub seat_number: String,
    pub is_available: bool,
}
