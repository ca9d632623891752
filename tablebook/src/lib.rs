#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for allocating restaurant tables to reservations and walk-ins.
//!
//! Tables are booked for a whole service period (lunch or dinner) on a date.
//! Requests are matched to the first table, in ascending number order, that
//! is large enough and free for that period. Unconfirmed reservations are
//! swept once their grace period has passed.
//!
//! ## Core Types
//!
//! - [`Table`] and [`TableNumber`]: the table registry
//! - [`Reservation`] and [`Customer`]: bookings and who made them
//! - [`Restaurant`]: all scheduling state, passed explicitly to each operation
//! - [`ReservationManager`]: allocation and expiry
//! - [`Scheduler`]: a thread-safe front end serializing every write
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use tablebook::clock::FixedClock;
//! use tablebook::{Customer, ReservationManager, Restaurant, Table, TableNumber};
//!
//! let now = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let manager = ReservationManager::new(FixedClock::new(now));
//! let mut restaurant = Restaurant::new(vec![
//!     Table::new(TableNumber::try_from(1).unwrap(), 2).unwrap(),
//! ])
//! .unwrap();
//!
//! let lunch = now.date().and_hms_opt(12, 30, 0).unwrap();
//! let first = Customer::new("Ada", "555-0101").unwrap();
//! manager.make_reservation(&mut restaurant, first, 2, lunch).unwrap();
//!
//! // The only table is taken for the whole lunch service.
//! let second = Customer::new("Alan", "555-0102").unwrap();
//! let later = now.date().and_hms_opt(14, 0, 0).unwrap();
//! let err = manager.make_reservation(&mut restaurant, second, 2, later).unwrap_err();
//! assert!(err.is_no_table_available());
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod hours;
pub mod logging;
pub mod manager;
pub mod reservation;
pub mod restaurant;
pub mod scheduler;
pub mod table;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use hours::{OperatingHours, ServicePeriod, ServiceSlot};
pub use logging::{init_logger, init_logger_from_config, install_logger, LogLevel, Logger};
pub use manager::{ExpireResult, ReservationManager};
pub use reservation::{Customer, Reservation, ReservationId, ReservationKind, ReservationStatus};
pub use restaurant::{Order, OrderId, Restaurant, Staff, StaffId};
pub use scheduler::Scheduler;
pub use table::{Table, TableNumber};
