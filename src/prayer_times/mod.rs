pub mod calculator;

pub use calculator::{compute_day_times_with, DayTimes};
