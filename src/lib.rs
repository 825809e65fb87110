//! Library entrypoint for the exchange back-office.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod errors;
pub mod models;
pub mod store;

// Kept at crate root so callers can write `crate::auth`.
#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: store::Db,
    pub settings: config::Settings,
    pub prices: services::binance::PriceFeed,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}
