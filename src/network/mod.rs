use std::{collections::HashMap, sync::Arc};

mod entities;
pub use entities::*;
use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::debug;

use crate::seed::{self, Seed};

type IdToIndex = HashMap<Arc<str>, usize>;
type IdToIndexes = HashMap<Arc<str>, Box<[usize]>>;
type TrainSchedules = HashMap<Arc<str>, HashMap<NaiveDate, usize>>;

/// The immutable timetable: every station, train, stop, schedule, coach type,
/// coach and seat, indexed for O(1) lookups. Built once from a [`Seed`] and
/// shared read-only between requests; live seat state lives in the ledger.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub stations: Box<[Station]>,
    pub trains: Box<[Train]>,
    pub stops: Box<[Stop]>,
    pub schedules: Box<[Schedule]>,
    pub coach_types: Box<[CoachType]>,
    pub coaches: Box<[Coach]>,
    pub seats: Box<[Seat]>,

    station_lookup: Arc<IdToIndex>,
    train_lookup: Arc<IdToIndex>,
    coach_type_lookup: Arc<IdToIndex>,
    coach_lookup: Arc<IdToIndex>,
    seat_lookup: Arc<IdToIndex>,
    /// Per train, stop indexes ordered by `stop_number`.
    train_to_stops: Arc<IdToIndexes>,
    train_to_coaches: Arc<IdToIndexes>,
    coach_to_seats: Arc<IdToIndexes>,
    /// Per train, schedule indexes keyed by travel date.
    schedule_lookup: Arc<TrainSchedules>,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds the indexed timetable from a seed source.
    /// Rejects duplicate ids, dangling references, duplicate stop numbers
    /// within a train and duplicate (train, date) schedules.
    pub fn with_seed(mut self, seed: Seed) -> Result<Self, seed::Error> {
        // Stations
        debug!("loading stations");
        let mut station_lookup: IdToIndex = HashMap::new();
        let mut stations: Vec<Station> = Vec::new();
        seed.stream_stations(|(_, station)| {
            stations.push(station.into());
        })?;
        for (i, station) in stations.iter_mut().enumerate() {
            station.index = i as u32;
            if station_lookup.insert(station.id.clone(), i).is_some() {
                return Err(seed::Error::DuplicateId(station.id.to_string()));
            }
        }
        self.stations = stations.into();
        self.station_lookup = station_lookup.into();

        // Coach types
        debug!("loading coach types");
        let mut coach_type_lookup: IdToIndex = HashMap::new();
        let mut coach_types: Vec<CoachType> = Vec::new();
        seed.stream_coach_types(|(_, coach_type)| {
            coach_types.push(coach_type.into());
        })?;
        for (i, coach_type) in coach_types.iter_mut().enumerate() {
            coach_type.index = i as u32;
            if coach_type_lookup.insert(coach_type.id.clone(), i).is_some() {
                return Err(seed::Error::DuplicateId(coach_type.id.to_string()));
            }
        }
        self.coach_types = coach_types.into();
        self.coach_type_lookup = coach_type_lookup.into();

        // Trains
        debug!("loading trains");
        let mut train_lookup: IdToIndex = HashMap::new();
        let mut trains: Vec<Train> = Vec::new();
        seed.stream_trains(|(_, train)| {
            trains.push(train.into());
        })?;
        for (i, train) in trains.iter_mut().enumerate() {
            train.index = i as u32;
            for endpoint in [&train.source_station_id, &train.destination_station_id] {
                if !self.station_lookup.contains_key(endpoint) {
                    return Err(seed::Error::UnknownReference {
                        entity: "train",
                        id: train.id.to_string(),
                        field: "station_id",
                        value: endpoint.to_string(),
                    });
                }
            }
            if train_lookup.insert(train.id.clone(), i).is_some() {
                return Err(seed::Error::DuplicateId(train.id.to_string()));
            }
        }
        self.trains = trains.into();
        self.train_lookup = train_lookup.into();

        // Stops, with the train endpoints synthesized as stop 0 and the
        // sentinel last stop so full-route segments validate.
        debug!("loading stops");
        let mut stops: Vec<Stop> = Vec::new();
        seed.stream_stops(|(_, stop)| {
            stops.push(stop.into());
        })?;
        for stop in stops.iter() {
            if !self.train_lookup.contains_key(&stop.train_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "stop",
                    id: format!("{}:{}", stop.train_id, stop.stop_number),
                    field: "train_id",
                    value: stop.train_id.to_string(),
                });
            }
            if !self.station_lookup.contains_key(&stop.station_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "stop",
                    id: format!("{}:{}", stop.train_id, stop.stop_number),
                    field: "station_id",
                    value: stop.station_id.to_string(),
                });
            }
            if stop.stop_number == 0 || stop.stop_number == LAST_STOP_NUMBER {
                return Err(seed::Error::DuplicateStop(
                    stop.train_id.to_string(),
                    stop.stop_number,
                ));
            }
        }
        for train in self.trains.iter() {
            stops.push(Stop {
                train_id: train.id.clone(),
                station_id: train.source_station_id.clone(),
                arrival: None,
                departure: None,
                stop_number: 0,
            });
            stops.push(Stop {
                train_id: train.id.clone(),
                station_id: train.destination_station_id.clone(),
                arrival: None,
                departure: None,
                stop_number: LAST_STOP_NUMBER,
            });
        }
        let mut train_to_stops: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            train_to_stops
                .entry(stop.train_id.clone())
                .or_default()
                .push(i);
        }
        for indexes in train_to_stops.values_mut() {
            indexes.par_sort_by_key(|i| stops[*i].stop_number);
            for pair in indexes.windows(2) {
                let (a, b) = (&stops[pair[0]], &stops[pair[1]]);
                if a.stop_number == b.stop_number {
                    return Err(seed::Error::DuplicateStop(
                        a.train_id.to_string(),
                        a.stop_number,
                    ));
                }
            }
        }
        self.stops = stops.into();
        let train_to_stops: IdToIndexes = train_to_stops
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.train_to_stops = train_to_stops.into();

        // Schedules, at most one per (train, travel date)
        debug!("loading schedules");
        let mut schedules: Vec<Schedule> = Vec::new();
        let mut schedule_lookup: TrainSchedules = HashMap::new();
        seed.stream_schedules(|(_, schedule)| {
            schedules.push(schedule.into());
        })?;
        for (i, schedule) in schedules.iter().enumerate() {
            if !self.train_lookup.contains_key(&schedule.train_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "schedule",
                    id: schedule.id.to_string(),
                    field: "train_id",
                    value: schedule.train_id.to_string(),
                });
            }
            if schedule_lookup
                .entry(schedule.train_id.clone())
                .or_default()
                .insert(schedule.travel_date, i)
                .is_some()
            {
                return Err(seed::Error::DuplicateSchedule(
                    schedule.train_id.to_string(),
                    schedule.travel_date,
                ));
            }
        }
        self.schedules = schedules.into();
        self.schedule_lookup = schedule_lookup.into();

        // Coaches
        debug!("loading coaches");
        let mut coach_lookup: IdToIndex = HashMap::new();
        let mut train_to_coaches: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        let mut coaches: Vec<Coach> = Vec::new();
        seed.stream_coaches(|(_, coach)| {
            coaches.push(coach.into());
        })?;
        for (i, coach) in coaches.iter_mut().enumerate() {
            coach.index = i as u32;
            if !self.train_lookup.contains_key(&coach.train_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "coach",
                    id: coach.id.to_string(),
                    field: "train_id",
                    value: coach.train_id.to_string(),
                });
            }
            if !self.coach_type_lookup.contains_key(&coach.coach_type_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "coach",
                    id: coach.id.to_string(),
                    field: "coach_type_id",
                    value: coach.coach_type_id.to_string(),
                });
            }
            if coach_lookup.insert(coach.id.clone(), i).is_some() {
                return Err(seed::Error::DuplicateId(coach.id.to_string()));
            }
            train_to_coaches
                .entry(coach.train_id.clone())
                .or_default()
                .push(i);
        }
        self.coaches = coaches.into();
        self.coach_lookup = coach_lookup.into();
        let train_to_coaches: IdToIndexes = train_to_coaches
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.train_to_coaches = train_to_coaches.into();

        // Seats
        debug!("loading seats");
        let mut seat_lookup: IdToIndex = HashMap::new();
        let mut coach_to_seats: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        let mut seats: Vec<Seat> = Vec::new();
        seed.stream_seats(|(_, seat)| {
            seats.push(seat.into());
        })?;
        for (i, seat) in seats.iter_mut().enumerate() {
            seat.index = i as u32;
            if !self.coach_lookup.contains_key(&seat.coach_id) {
                return Err(seed::Error::UnknownReference {
                    entity: "seat",
                    id: seat.id.to_string(),
                    field: "coach_id",
                    value: seat.coach_id.to_string(),
                });
            }
            if seat_lookup.insert(seat.id.clone(), i).is_some() {
                return Err(seed::Error::DuplicateId(seat.id.to_string()));
            }
            coach_to_seats
                .entry(seat.coach_id.clone())
                .or_default()
                .push(i);
        }
        self.seats = seats.into();
        self.seat_lookup = seat_lookup.into();
        let coach_to_seats: IdToIndexes = coach_to_seats
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.coach_to_seats = coach_to_seats.into();

        debug!(
            stations = self.stations.len(),
            trains = self.trains.len(),
            stops = self.stops.len(),
            schedules = self.schedules.len(),
            coaches = self.coaches.len(),
            seats = self.seats.len(),
            "network built"
        );
        Ok(self)
    }

    /// Get a station with the given id.
    /// If no station is found with the given id None is returned.
    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let index = self.station_lookup.get(id)?;
        Some(&self.stations[*index])
    }

    /// Get a train with the given id.
    /// If no train is found with the given id None is returned.
    pub fn train_by_id(&self, id: &str) -> Option<&Train> {
        let index = self.train_lookup.get(id)?;
        Some(&self.trains[*index])
    }

    pub fn coach_type_by_id(&self, id: &str) -> Option<&CoachType> {
        let index = self.coach_type_lookup.get(id)?;
        Some(&self.coach_types[*index])
    }

    pub fn coach_by_id(&self, id: &str) -> Option<&Coach> {
        let index = self.coach_lookup.get(id)?;
        Some(&self.coaches[*index])
    }

    pub fn seat_by_id(&self, id: &str) -> Option<&Seat> {
        let index = self.seat_lookup.get(id)?;
        Some(&self.seats[*index])
    }

    /// Returns the full stop sequence of a train ordered by stop number,
    /// endpoints included. None if the train id is unknown.
    pub fn stops_by_train_id(&self, train_id: &str) -> Option<Vec<&Stop>> {
        let stops = self.train_to_stops.get(train_id)?;
        Some(stops.iter().map(|i| &self.stops[*i]).collect())
    }

    /// Returns all the coaches of a train in declaration order.
    pub fn coaches_by_train_id(&self, train_id: &str) -> Option<Vec<&Coach>> {
        let coaches = self.train_to_coaches.get(train_id)?;
        Some(coaches.iter().map(|i| &self.coaches[*i]).collect())
    }

    /// Returns the coaches of a train that have the given coach type.
    /// Empty when the train has no coach of that type.
    pub fn coaches_of_type(&self, train_id: &str, coach_type_id: &str) -> Vec<&Coach> {
        self.coaches_by_train_id(train_id)
            .unwrap_or_default()
            .into_iter()
            .filter(|coach| coach.coach_type_id.as_ref() == coach_type_id)
            .collect()
    }

    /// Returns all the seats that belong to a coach.
    pub fn seats_by_coach_id(&self, coach_id: &str) -> Option<Vec<&Seat>> {
        let seats = self.coach_to_seats.get(coach_id)?;
        Some(seats.iter().map(|i| &self.seats[*i]).collect())
    }

    /// The schedule of a train on a travel date, if one exists.
    pub fn schedule_for(&self, train_id: &str, travel_date: NaiveDate) -> Option<&Schedule> {
        let index = self.schedule_lookup.get(train_id)?.get(&travel_date)?;
        Some(&self.schedules[*index])
    }
}
