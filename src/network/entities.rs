use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::seed::models::{
    SeedCoach, SeedCoachType, SeedSchedule, SeedSeat, SeedStation, SeedStop, SeedTrain,
};

/// Stop number given to a train's synthesized destination endpoint.
/// The source endpoint carries `0`, so every explicit stop sorts between them.
pub const LAST_STOP_NUMBER: u32 = u32::MAX;

/// A place where trains call. Immutable reference data for the booking core.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// The global internal index used for O(1) array lookups in the network.
    pub index: u32,
    /// The unique external identifier.
    pub id: Arc<str>,
    /// The display name of the station.
    pub name: Arc<str>,
    pub status: Arc<str>,
    pub city: Arc<str>,
    pub province: Arc<str>,
}

impl From<SeedStation> for Station {
    fn from(value: SeedStation) -> Self {
        Self {
            index: 0,
            id: value.station_id.into(),
            name: value.station_name.into(),
            status: value.station_status.into(),
            city: value.city.into(),
            province: value.province.into(),
        }
    }
}

/// A physical train service, owning its stops and coaches.
#[derive(Debug, Default, Clone)]
pub struct Train {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// Classification shown to passengers (e.g. "Express", "Intercity").
    pub train_type: Arc<str>,
    pub coach_count: u32,
    pub status: Arc<str>,
    /// Station this train departs from; becomes the implicit first stop.
    pub source_station_id: Arc<str>,
    /// Station this train terminates at; becomes the implicit last stop.
    pub destination_station_id: Arc<str>,
}

impl From<SeedTrain> for Train {
    fn from(value: SeedTrain) -> Self {
        Self {
            index: 0,
            id: value.train_id.into(),
            name: value.train_name.into(),
            train_type: value.train_type.into(),
            coach_count: value.coach_count,
            status: value.train_status.into(),
            source_station_id: value.source_station_id.into(),
            destination_station_id: value.destination_station_id.into(),
        }
    }
}

/// A station visited by a train, in a fixed order per train.
///
/// `stop_number` totally orders the stops of one train; a valid travel
/// segment requires `from.stop_number < to.stop_number`. The endpoints
/// synthesized from the train record carry no call times.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub train_id: Arc<str>,
    pub station_id: Arc<str>,
    pub arrival: Option<NaiveTime>,
    pub departure: Option<NaiveTime>,
    pub stop_number: u32,
}

impl From<SeedStop> for Stop {
    fn from(value: SeedStop) -> Self {
        Self {
            train_id: value.train_id.into(),
            station_id: value.station_id.into(),
            arrival: Some(value.arrival_time),
            departure: Some(value.departure_time),
            stop_number: value.stop_number,
        }
    }
}

/// The concrete date-bound timing instance of a train's journey.
/// At most one exists per (train, travel date).
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    pub id: Arc<str>,
    pub train_id: Arc<str>,
    pub travel_date: NaiveDate,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    pub status: Arc<str>,
    pub duration_minutes: u32,
}

impl From<SeedSchedule> for Schedule {
    fn from(value: SeedSchedule) -> Self {
        Self {
            id: value.schedule_id.into(),
            train_id: value.train_id.into(),
            travel_date: value.travel_date,
            departure: value.departure_time,
            arrival: value.arrival_time,
            status: value.schedule_status.into(),
            duration_minutes: value.duration_minutes,
        }
    }
}

/// Human-readable coach classification (e.g. "AC", "Economy").
#[derive(Debug, Default, Clone)]
pub struct CoachType {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
}

impl From<SeedCoachType> for CoachType {
    fn from(value: SeedCoachType) -> Self {
        Self {
            index: 0,
            id: value.coach_type_id.into(),
            name: value.type_name.into(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Coach {
    pub index: u32,
    pub id: Arc<str>,
    pub train_id: Arc<str>,
    /// Passenger-facing coach label (e.g. "C1").
    pub coach_number: Arc<str>,
    pub coach_type_id: Arc<str>,
}

impl From<SeedCoach> for Coach {
    fn from(value: SeedCoach) -> Self {
        Self {
            index: 0,
            id: value.coach_id.into(),
            train_id: value.train_id.into(),
            coach_number: value.coach_number.into(),
            coach_type_id: value.coach_type_id.into(),
        }
    }
}

/// Static identity of one physical seat. The availability bit is not here:
/// it is live state and lives in the booking ledger, keyed by `index`.
#[derive(Debug, Default, Clone)]
pub struct Seat {
    pub index: u32,
    pub id: Arc<str>,
    pub coach_id: Arc<str>,
    /// Passenger-facing seat label (e.g. "12A").
    pub seat_number: Arc<str>,
    /// Availability carried by the seed data; the ledger starts from this.
    pub available_at_seed: bool,
}

impl From<SeedSeat> for Seat {
    fn from(value: SeedSeat) -> Self {
        Self {
            index: 0,
            id: value.seat_id.into(),
            coach_id: value.coach_id.into(),
            seat_number: value.seat_number.into(),
            available_at_seed: value.is_available,
        }
    }
}
