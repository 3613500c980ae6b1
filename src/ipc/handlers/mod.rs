pub mod core;
pub mod schedule;
pub mod setup;
