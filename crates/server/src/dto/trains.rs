use chrono::{NaiveDate, NaiveTime};
use railbook::booking::TrainMatch;
use railbook::network::{Schedule, Train};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainDto {
    pub id: String,
    pub name: String,
    pub train_type: String,
    pub coach_count: u32,
    pub status: String,
    pub source_station_id: String,
    pub destination_station_id: String,
}

impl TrainDto {
    pub fn from(train: &Train) -> Self {
        Self {
            id: train.id.to_string(),
            name: train.name.to_string(),
            train_type: train.train_type.to_string(),
            coach_count: train.coach_count,
            status: train.status.to_string(),
            source_station_id: train.source_station_id.to_string(),
            destination_station_id: train.destination_station_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDto {
    pub schedule_id: String,
    pub train_id: String,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub status: String,
    pub duration_minutes: u32,
}

impl ScheduleDto {
    pub fn from(schedule: &Schedule) -> Self {
        Self {
            schedule_id: schedule.id.to_string(),
            train_id: schedule.train_id.to_string(),
            travel_date: schedule.travel_date,
            departure_time: schedule.departure,
            arrival_time: schedule.arrival,
            status: schedule.status.to_string(),
            duration_minutes: schedule.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainMatchDto {
    pub train: TrainDto,
    pub from_station_id: String,
    pub to_station_id: String,
    pub schedule: ScheduleDto,
}

impl TrainMatchDto {
    pub fn from(value: &TrainMatch<'_>) -> Self {
        Self {
            train: TrainDto::from(value.train),
            from_station_id: value.from.station_id.to_string(),
            to_station_id: value.to.station_id.to_string(),
            schedule: ScheduleDto::from(value.schedule),
        }
    }
}
