pub mod courses;
pub mod layout;
pub mod ratings;
pub mod schedule;
pub mod status;
