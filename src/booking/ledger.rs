use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use crate::booking::Error;
use crate::network::Network;

/// A committed seat claim. Append-only: once written a booking is never
/// mutated. `train_name` and `departure` are snapshots taken at claim time,
/// not live references, so later timetable edits leave history intact.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: u64,
    pub passenger_id: Arc<str>,
    pub train_id: Arc<str>,
    pub train_name: Arc<str>,
    pub seat_id: Arc<str>,
    pub coach_id: Arc<str>,
    pub departure: NaiveTime,
    pub travel_date: NaiveDate,
    pub booked_at: DateTime<Utc>,
}

/// Everything of a [`Booking`] except the id, which the ledger assigns
/// inside the claim transaction.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub passenger_id: Arc<str>,
    pub train_id: Arc<str>,
    pub train_name: Arc<str>,
    pub seat_id: Arc<str>,
    pub coach_id: Arc<str>,
    pub departure: NaiveTime,
    pub travel_date: NaiveDate,
    pub booked_at: DateTime<Utc>,
}

pub(crate) struct LedgerState {
    /// One availability bit per seat, indexed by `Seat::index`.
    pub(crate) available: Box<[bool]>,
    /// Append-only booking log.
    pub(crate) bookings: Vec<Booking>,
}

/// The live seat state of record: availability bits plus the booking log.
///
/// One write lock covers guard-check, flip and booking append, so a claim is
/// a single isolated transaction: among concurrent claims for one seat at
/// most one observes `available == true`, and a seat flip can never commit
/// without its booking row (or the other way around).
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Creates a ledger sized for the given network, seeded from each seat's
    /// bundled availability.
    ///
    /// # Warning
    /// The ledger must be used with the exact same `Network` it was created
    /// for; seat indexes from another network would claim the wrong rows.
    pub fn new(network: &Network) -> Self {
        let available: Box<[bool]> = network
            .seats
            .iter()
            .map(|seat| seat.available_at_seed)
            .collect();
        Self {
            state: RwLock::new(LedgerState {
                available,
                bookings: Vec::new(),
            }),
        }
    }

    /// Atomically claims one seat: if its bit is still set, flips it and
    /// appends the booking in the same critical section. Fails with
    /// `SeatUnavailable` when another claim got there first.
    pub fn claim(&self, seat_index: usize, draft: BookingDraft) -> Result<Booking, Error> {
        let mut state = self.write()?;
        let available = state
            .available
            .get(seat_index)
            .copied()
            .ok_or_else(|| Error::Internal(format!("seat index {seat_index} out of range")))?;
        if !available {
            return Err(Error::SeatUnavailable(draft.seat_id.to_string()));
        }
        state.available[seat_index] = false;
        let booking = Booking {
            id: state.bookings.len() as u64 + 1,
            passenger_id: draft.passenger_id,
            train_id: draft.train_id,
            train_name: draft.train_name,
            seat_id: draft.seat_id,
            coach_id: draft.coach_id,
            departure: draft.departure,
            travel_date: draft.travel_date,
            booked_at: draft.booked_at,
        };
        state.bookings.push(booking.clone());
        debug!(booking = booking.id, seat = %booking.seat_id, "seat claimed");
        Ok(booking)
    }

    /// Whether a seat is currently available. Snapshot semantics: accurate
    /// at read time only.
    pub fn seat_available(&self, seat_index: usize) -> Result<bool, Error> {
        let state = self.read()?;
        state
            .available
            .get(seat_index)
            .copied()
            .ok_or_else(|| Error::Internal(format!("seat index {seat_index} out of range")))
    }

    /// A copy of the booking log, oldest first.
    pub fn bookings(&self) -> Result<Vec<Booking>, Error> {
        Ok(self.read()?.bookings.clone())
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, Error> {
        self.state
            .read()
            .map_err(|_| Error::Internal("seat ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, Error> {
        self.state
            .write()
            .map_err(|_| Error::Internal("seat ledger lock poisoned".to_string()))
    }
}
