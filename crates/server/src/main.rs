mod api;
mod dto;
mod error;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use railbook::{
    booking::Engine,
    network::Network,
    seed::{Config, Seed},
};
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing timetable bundle (zip of stations, trains, stops, schedules, coach_types, coaches, seats)");
        std::process::exit(1);
    }
    let path = std::path::Path::new(&args[1]).canonicalize().unwrap();

    info!("Loading timetable...");
    let now = Instant::now();
    let seed = Seed::new(Config::default()).from_zip(path);
    let network = Network::new().with_seed(seed).unwrap();
    let engine = Engine::new(network);
    let state = Arc::new(AppState::new(engine));
    info!("Loading timetable took {:?}", now.elapsed());

    let app = axum::Router::new()
        .route("/trains", get(api::trains))
        .route("/trains/search", get(api::search))
        .route("/trains/{id}/schedule", get(api::schedule))
        .route("/trains/{id}/seats", get(api::seats))
        .route("/bookings/seat", post(api::book_seat))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .unwrap();
    info!("Listening to port {PORT}");
    axum::serve(listener, app).await.unwrap();
}
