//! This crate finds out which garbage bin is due for collection right now and lights the
//! matching indicator LED.
//!
//! The dates are read from the ICS calendars published at
//! <https://www.bee-emden.de/abfall/entsorgungssystem/abfuhrkalender/>.

pub use chrono;

pub mod area;
pub mod calendar;
pub mod category;
pub mod error;
pub mod fetcher;
pub mod garbage_bin;
pub mod indicator;
pub mod pickup;
pub mod scanner;
#[cfg(test)]
mod test_logs;

pub use error::{Error, Result};
