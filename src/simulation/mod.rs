//! Simulation - the day orchestrator and what it reports
//!
//! `Colony` owns every subsystem. `advance_day` borrows them in a fixed
//! order; nothing outside the call keeps a reference to colony state.

pub mod colony;
pub mod effects;
pub mod report;

pub use colony::Colony;
pub use report::{
    Casualty, DailySnapshot, DayOutcome, DayReport, GameOver, GameOverCause, SkippedEffect,
};
