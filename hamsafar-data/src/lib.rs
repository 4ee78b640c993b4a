//! Data access layer for the Hamsafar travel community.
//!
//! Callers open one [`store::TravelStore`] at start-up and pass it to the
//! accessors in [`services::read`] and [`services::write`].

pub mod config;
pub mod models;
pub mod schema;
pub mod services;
pub mod store;

pub use config::{AppConfig, DataMode};
pub use store::TravelStore;
