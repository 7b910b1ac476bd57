use std::sync::Arc;

mod ledger;
mod route;
pub use ledger::*;
pub use route::*;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::network::{Network, Schedule, Stop, Train};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Train {0} not found")]
    TrainNotFound(String),
    #[error("Station {0} not found")]
    StationNotFound(String),
    #[error("Train {train} has no schedule on {date}")]
    ScheduleNotFound { train: String, date: NaiveDate },
    #[error("Station {0} is not on this train's route")]
    StationNotInRoute(String),
    #[error("Station {from} does not come before {to} on this route")]
    InvalidSegmentOrder { from: String, to: String },
    #[error("Train {train} has no coach of type {coach_type}")]
    NoCoachOfType { train: String, coach_type: String },
    #[error("Seat {0} is unavailable")]
    SeatUnavailable(String),
    #[error("Internal booking failure: {0}")]
    Internal(String),
}

/// Source of the booking timestamp, injected so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A booking request as it arrives from the HTTP layer. The passenger id is
/// supplied by the auth collaborator and is already verified.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub passenger_id: String,
    pub train_id: String,
    pub travel_date: NaiveDate,
    pub from_station_id: String,
    pub to_station_id: String,
    pub coach_type_id: String,
    pub seat_id: String,
}

/// Denormalized confirmation view returned to the client: passenger-facing
/// seat and coach labels, internal seat/coach ids stripped.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub booking_id: u64,
    pub passenger_id: Arc<str>,
    pub train_id: Arc<str>,
    pub train_name: Arc<str>,
    pub departure: NaiveTime,
    pub travel_date: NaiveDate,
    pub booked_at: DateTime<Utc>,
    pub seat_number: Arc<str>,
    pub coach_number: Arc<str>,
}

/// Per-coach seat counts for one train, partitioned on the availability bit.
#[derive(Debug, Clone)]
pub struct CoachAvailability {
    pub coach_number: Arc<str>,
    pub coach_type: Arc<str>,
    pub train_name: Arc<str>,
    pub available_seats: u32,
    pub booked_seats: u32,
}

/// A train serving a requested segment on a requested date.
#[derive(Debug, Clone)]
pub struct TrainMatch<'a> {
    pub train: &'a Train,
    pub from: &'a Stop,
    pub to: &'a Stop,
    pub schedule: &'a Schedule,
}

/// The booking engine: read queries over the timetable plus the atomic
/// reserve operation against the seat ledger. Cheap to clone; clones share
/// the same ledger.
#[derive(Clone)]
pub struct Engine {
    network: Arc<Network>,
    ledger: Arc<Ledger>,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new(network: Network) -> Self {
        Self::with_clock(network, Arc::new(SystemClock))
    }

    pub fn with_clock(network: Network, clock: Arc<dyn Clock>) -> Self {
        let ledger = Ledger::new(&network);
        Self {
            network: Arc::new(network),
            ledger: Arc::new(ledger),
            clock,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Per-coach availability summary for a train. An empty vec is a valid
    /// answer (train has no seat data or every coach is seatless), not an
    /// error. Counts are a read-committed snapshot: one read lock covers the
    /// whole scan, but nothing stops a claim landing after it returns.
    pub fn availability(&self, train_id: &str) -> Result<Vec<CoachAvailability>, Error> {
        let train = self
            .network
            .train_by_id(train_id)
            .ok_or_else(|| Error::TrainNotFound(train_id.to_string()))?;
        let coaches = self
            .network
            .coaches_by_train_id(&train.id)
            .unwrap_or_default();

        let state = self.ledger.read()?;
        let mut summaries = Vec::with_capacity(coaches.len());
        for coach in coaches {
            let seats = self
                .network
                .seats_by_coach_id(&coach.id)
                .unwrap_or_default();
            if seats.is_empty() {
                continue;
            }
            let coach_type = self
                .network
                .coach_type_by_id(&coach.coach_type_id)
                .ok_or_else(|| {
                    Error::Internal(format!("coach {} has unindexed type", coach.id))
                })?;
            let mut available_seats = 0;
            let mut booked_seats = 0;
            for seat in seats {
                if state.available[seat.index as usize] {
                    available_seats += 1;
                } else {
                    booked_seats += 1;
                }
            }
            summaries.push(CoachAvailability {
                coach_number: coach.coach_number.clone(),
                coach_type: coach_type.name.clone(),
                train_name: train.name.clone(),
                available_seats,
                booked_seats,
            });
        }
        Ok(summaries)
    }

    /// The schedule of a train on a travel date.
    pub fn schedule(&self, train_id: &str, travel_date: NaiveDate) -> Result<&Schedule, Error> {
        let train = self
            .network
            .train_by_id(train_id)
            .ok_or_else(|| Error::TrainNotFound(train_id.to_string()))?;
        self.network
            .schedule_for(&train.id, travel_date)
            .ok_or_else(|| Error::ScheduleNotFound {
                train: train_id.to_string(),
                date: travel_date,
            })
    }

    /// All trains that serve the segment from -> to (in travel order) and
    /// run on the given date. An empty vec is a valid answer.
    pub fn trains_between(
        &self,
        from_station_id: &str,
        to_station_id: &str,
        travel_date: NaiveDate,
    ) -> Result<Vec<TrainMatch<'_>>, Error> {
        for station_id in [from_station_id, to_station_id] {
            if self.network.station_by_id(station_id).is_none() {
                return Err(Error::StationNotFound(station_id.to_string()));
            }
        }
        let matches = self
            .network
            .trains
            .iter()
            .filter_map(|train| {
                let stops = self.network.stops_by_train_id(&train.id)?;
                let (from, to) =
                    route::validate_segment(&stops, from_station_id, to_station_id).ok()?;
                let schedule = self.network.schedule_for(&train.id, travel_date)?;
                Some(TrainMatch {
                    train,
                    from,
                    to,
                    schedule,
                })
            })
            .collect();
        Ok(matches)
    }

    /// Reserves exactly one seat, or fails with a definitive reason.
    ///
    /// Resolution order: train, schedule, route segment, coaches of the
    /// requested type, then the atomic claim against the ledger. Everything
    /// before the claim reads immutable timetable data; the availability
    /// check itself only happens inside the ledger's critical section, so
    /// among concurrent requests for one seat exactly one succeeds and the
    /// rest get `SeatUnavailable`.
    pub fn reserve(&self, request: ReservationRequest) -> Result<Confirmation, Error> {
        let train = self
            .network
            .train_by_id(&request.train_id)
            .ok_or_else(|| Error::TrainNotFound(request.train_id.clone()))?;
        let schedule = self
            .network
            .schedule_for(&train.id, request.travel_date)
            .ok_or_else(|| Error::ScheduleNotFound {
                train: request.train_id.clone(),
                date: request.travel_date,
            })?;

        let stops = self
            .network
            .stops_by_train_id(&train.id)
            .unwrap_or_default();
        route::validate_segment(&stops, &request.from_station_id, &request.to_station_id)?;

        let coaches = self
            .network
            .coaches_of_type(&train.id, &request.coach_type_id);
        if coaches.is_empty() {
            return Err(Error::NoCoachOfType {
                train: request.train_id.clone(),
                coach_type: request.coach_type_id.clone(),
            });
        }

        // A seat that does not exist, or sits in a coach of another type or
        // another train, is indistinguishable from a taken seat to the client.
        let seat = self
            .network
            .seat_by_id(&request.seat_id)
            .ok_or_else(|| Error::SeatUnavailable(request.seat_id.clone()))?;
        let coach = coaches
            .iter()
            .find(|coach| coach.id == seat.coach_id)
            .copied()
            .ok_or_else(|| Error::SeatUnavailable(request.seat_id.clone()))?;

        let draft = BookingDraft {
            passenger_id: request.passenger_id.as_str().into(),
            train_id: train.id.clone(),
            train_name: train.name.clone(),
            seat_id: seat.id.clone(),
            coach_id: coach.id.clone(),
            departure: schedule.departure,
            travel_date: request.travel_date,
            booked_at: self.clock.now(),
        };
        let booking = self.ledger.claim(seat.index as usize, draft)?;
        info!(
            booking = booking.id,
            train = %booking.train_id,
            seat = %booking.seat_id,
            passenger = %booking.passenger_id,
            "booking confirmed"
        );

        Ok(Confirmation {
            booking_id: booking.id,
            passenger_id: booking.passenger_id,
            train_id: booking.train_id,
            train_name: booking.train_name,
            departure: booking.departure,
            travel_date: booking.travel_date,
            booked_at: booking.booked_at,
            seat_number: seat.seat_number.clone(),
            coach_number: coach.coach_number.clone(),
        })
    }
}
