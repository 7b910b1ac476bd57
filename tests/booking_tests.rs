use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, TimeZone, Utc};
use railbook::booking::{Clock, Engine, Error, ReservationRequest};
use railbook::network::Network;
use railbook::seed::{
    Config, Records, Seed,
    models::{
        SeedCoach, SeedCoachType, SeedSchedule, SeedSeat, SeedStation, SeedStop, SeedTrain,
    },
};

fn station(id: &str, name: &str) -> SeedStation {
    SeedStation {
        station_id: id.into(),
        station_name: name.into(),
        station_status: "open".into(),
        city: name.into(),
        province: "West".into(),
    }
}

fn seat(id: &str, coach_id: &str, number: &str) -> SeedSeat {
    SeedSeat {
        seat_id: id.into(),
        coach_id: coach_id.into(),
        seat_number: number.into(),
        is_available: true,
    }
}

/// One train A -> B -> C with an AC coach (seats S1..S4), a sleeper coach
/// (seat X1) and a schedule on 2025-06-01.
fn records() -> Records {
    Records {
        stations: vec![
            station("A", "Alderton"),
            station("B", "Brighthall"),
            station("C", "Caldwell"),
        ],
        trains: vec![SeedTrain {
            train_id: "T1".into(),
            train_name: "Western Express".into(),
            train_type: "Express".into(),
            coach_count: 2,
            train_status: "active".into(),
            source_station_id: "A".into(),
            destination_station_id: "C".into(),
        }],
        stops: vec![SeedStop {
            train_id: "T1".into(),
            station_id: "B".into(),
            arrival_time: "09:40:00".parse().unwrap(),
            departure_time: "09:45:00".parse().unwrap(),
            stop_number: 1,
        }],
        schedules: vec![SeedSchedule {
            schedule_id: "SCH1".into(),
            train_id: "T1".into(),
            travel_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            departure_time: "08:00:00".parse().unwrap(),
            arrival_time: "12:00:00".parse().unwrap(),
            schedule_status: "on-time".into(),
            duration_minutes: 240,
        }],
        coach_types: vec![
            SeedCoachType {
                coach_type_id: "AC".into(),
                type_name: "AC".into(),
            },
            SeedCoachType {
                coach_type_id: "SLEEPER".into(),
                type_name: "Sleeper".into(),
            },
            SeedCoachType {
                coach_type_id: "ECON".into(),
                type_name: "Economy".into(),
            },
        ],
        coaches: vec![
            SeedCoach {
                coach_id: "CO1".into(),
                train_id: "T1".into(),
                coach_number: "C1".into(),
                coach_type_id: "AC".into(),
            },
            SeedCoach {
                coach_id: "CO2".into(),
                train_id: "T1".into(),
                coach_number: "C2".into(),
                coach_type_id: "SLEEPER".into(),
            },
        ],
        seats: vec![
            seat("S1", "CO1", "1"),
            seat("S2", "CO1", "2"),
            seat("S3", "CO1", "3"),
            seat("S4", "CO1", "4"),
            seat("X1", "CO2", "1"),
        ],
    }
}

fn engine() -> Engine {
    let seed = Seed::new(Config::default()).from_records(records());
    let network = Network::new().with_seed(seed).unwrap();
    Engine::new(network)
}

fn request(seat_id: &str) -> ReservationRequest {
    ReservationRequest {
        passenger_id: "P9".into(),
        train_id: "T1".into(),
        travel_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        from_station_id: "A".into(),
        to_station_id: "C".into(),
        coach_type_id: "AC".into(),
        seat_id: seat_id.into(),
    }
}

#[test]
fn end_to_end_reserve_then_reject() {
    let engine = engine();

    let confirmation = engine.reserve(request("S1")).unwrap();
    assert_eq!(confirmation.booking_id, 1);
    assert_eq!(confirmation.train_name.as_ref(), "Western Express");
    assert_eq!(confirmation.seat_number.as_ref(), "1");
    assert_eq!(confirmation.coach_number.as_ref(), "C1");
    assert_eq!(
        confirmation.departure,
        "08:00:00".parse().unwrap(),
        "departure is copied from the schedule at claim time"
    );

    let seat = engine.network().seat_by_id("S1").unwrap();
    assert!(!engine.ledger().seat_available(seat.index as usize).unwrap());

    let second = engine.reserve(request("S1"));
    assert!(matches!(second, Err(Error::SeatUnavailable(id)) if id == "S1"));
    assert_eq!(engine.ledger().bookings().unwrap().len(), 1);
}

#[test]
fn reserve_unknown_train() {
    let engine = engine();
    let mut req = request("S1");
    req.train_id = "T9".into();
    assert!(matches!(
        engine.reserve(req),
        Err(Error::TrainNotFound(id)) if id == "T9"
    ));
}

#[test]
fn reserve_without_schedule() {
    let engine = engine();
    let mut req = request("S1");
    req.travel_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    assert!(matches!(
        engine.reserve(req),
        Err(Error::ScheduleNotFound { .. })
    ));
}

#[test]
fn reserve_backwards_segment() {
    let engine = engine();
    let mut req = request("S1");
    req.from_station_id = "C".into();
    req.to_station_id = "A".into();
    assert!(matches!(
        engine.reserve(req),
        Err(Error::InvalidSegmentOrder { .. })
    ));
}

#[test]
fn reserve_station_off_route() {
    let engine = engine();
    let mut req = request("S1");
    req.to_station_id = "Z".into();
    assert!(matches!(
        engine.reserve(req),
        Err(Error::StationNotInRoute(id)) if id == "Z"
    ));
}

#[test]
fn reserve_missing_coach_type() {
    let engine = engine();
    let mut req = request("S1");
    req.coach_type_id = "ECON".into();
    assert!(matches!(engine.reserve(req), Err(Error::NoCoachOfType { .. })));
}

#[test]
fn reserve_seat_of_another_coach_type() {
    // X1 exists on this train, but in the sleeper coach; requesting it as an
    // AC seat is a conflict, not a validation error.
    let engine = engine();
    assert!(matches!(
        engine.reserve(request("X1")),
        Err(Error::SeatUnavailable(id)) if id == "X1"
    ));
}

#[test]
fn reserve_unknown_seat() {
    let engine = engine();
    assert!(matches!(
        engine.reserve(request("S99")),
        Err(Error::SeatUnavailable(id)) if id == "S99"
    ));
}

#[test]
fn failed_reserve_leaves_no_partial_state() {
    let engine = engine();

    let mut off_route = request("S2");
    off_route.to_station_id = "Z".into();
    let _ = engine.reserve(off_route);

    let mut no_schedule = request("S2");
    no_schedule.travel_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let _ = engine.reserve(no_schedule);

    let seat = engine.network().seat_by_id("S2").unwrap();
    assert!(engine.ledger().seat_available(seat.index as usize).unwrap());
    assert!(engine.ledger().bookings().unwrap().is_empty());
}

#[test]
fn at_most_one_concurrent_claim_wins() {
    const CLAIMANTS: usize = 16;
    let engine = engine();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..CLAIMANTS)
            .map(|i| {
                let engine = engine.clone();
                scope.spawn(move || {
                    let mut req = request("S3");
                    req.passenger_id = format!("P{i}");
                    engine.reserve(req)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one concurrent claim may succeed");
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(result, Err(Error::SeatUnavailable(_))));
    }

    let seat = engine.network().seat_by_id("S3").unwrap();
    assert!(!engine.ledger().seat_available(seat.index as usize).unwrap());
    let bookings = engine.ledger().bookings().unwrap();
    let rows = bookings
        .iter()
        .filter(|b| b.seat_id.as_ref() == "S3")
        .count();
    assert_eq!(rows, 1, "exactly one booking row references the seat");
}

struct FixedClock(chrono::DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        self.0
    }
}

#[test]
fn booking_timestamp_comes_from_the_clock() {
    let pinned = Utc.with_ymd_and_hms(2025, 5, 20, 10, 30, 0).unwrap();
    let seed = Seed::new(Config::default()).from_records(records());
    let network = Network::new().with_seed(seed).unwrap();
    let engine = Engine::with_clock(network, Arc::new(FixedClock(pinned)));

    let confirmation = engine.reserve(request("S4")).unwrap();
    assert_eq!(confirmation.booked_at, pinned);
}

#[test]
fn trains_between_respects_order_and_dates() {
    let engine = engine();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let matches = engine.trains_between("A", "C", date).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].train.id.as_ref(), "T1");
    assert_eq!(matches[0].schedule.id.as_ref(), "SCH1");

    // Wrong direction: the train exists but does not serve the segment.
    assert!(engine.trains_between("C", "A", date).unwrap().is_empty());

    // No schedule that day.
    let other = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    assert!(engine.trains_between("A", "C", other).unwrap().is_empty());

    assert!(matches!(
        engine.trains_between("A", "Q", date),
        Err(Error::StationNotFound(id)) if id == "Q"
    ));
}

#[test]
fn schedule_lookup() {
    let engine = engine();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let schedule = engine.schedule("T1", date).unwrap();
    assert_eq!(schedule.duration_minutes, 240);

    assert!(matches!(
        engine.schedule("T1", NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
        Err(Error::ScheduleNotFound { .. })
    ));
    assert!(matches!(
        engine.schedule("T9", date),
        Err(Error::TrainNotFound(_))
    ));
}
