//! Course planner service: catalog browsing, a weekly schedule with
//! grid layout geometry, and third-party professor ratings.

pub mod catalog;
pub mod config;
pub mod layout;
pub mod listing;
pub mod ratings;
pub mod schedule;
pub mod server;
pub mod types;
