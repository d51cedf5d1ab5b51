pub mod auth;
pub mod configuration;
pub mod constant;
pub mod error;
pub mod portal;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod usage;
