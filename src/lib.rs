pub mod configuration;
pub mod domain;
pub mod duplicate_check;
pub mod routes;
pub mod startup;
pub mod telemetry;
mod utils;
pub mod waitlist_service;
pub mod waitlist_store;
