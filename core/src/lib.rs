//! Loan desk core: a synthetic borrower book, the read-only query
//! service over it, and the simulated status feed of a detail view.

pub mod analytics;
pub mod borrower;
pub mod clock;
pub mod command;
pub mod config;
pub mod desk;
pub mod error;
pub mod event;
pub mod name_generator;
pub mod query;
pub mod rng;
pub mod service;
pub mod session;
pub mod simulator;
pub mod store;
pub mod types;
