//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the tablebook library.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tablebook::clock::FixedClock;
use tablebook::{Customer, ReservationManager, Restaurant, Table, TableNumber};

/// The date every fixture runs on.
#[allow(dead_code)]
pub fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
}

/// `hh:mm` on the fixture date.
#[allow(dead_code)]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    service_date().and_hms_opt(hour, minute, 0).unwrap()
}

/// A customer with a placeholder contact number.
#[allow(dead_code)]
pub fn customer(name: &str) -> Customer {
    Customer::new(name, "555-0100").unwrap()
}

/// Builder for a restaurant plus a manager driven by a shared fixed clock.
///
/// # Examples
///
/// ```no_run
/// # use common::RestaurantFixture;
/// let fixture = RestaurantFixture::new()
///     .with_table(1, 2)
///     .with_table(2, 4)
///     .at(10, 0)
///     .build();
/// ```
#[allow(dead_code)]
pub struct RestaurantFixture {
    tables: Vec<(u32, u32)>,
    now: NaiveDateTime,
}

/// A built fixture.
#[allow(dead_code)]
pub struct Fixture {
    pub clock: Arc<FixedClock>,
    pub manager: ReservationManager<Arc<FixedClock>>,
    pub restaurant: Restaurant,
}

#[allow(dead_code)]
impl RestaurantFixture {
    /// Creates a new fixture builder.
    ///
    /// Defaults:
    /// - no tables
    /// - clock at 10:00 on the fixture date, before lunch opens
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            now: at(10, 0),
        }
    }

    /// Adds a table.
    pub fn with_table(mut self, number: u32, capacity: u32) -> Self {
        self.tables.push((number, capacity));
        self
    }

    /// Adds tables numbered from 1 with the given capacities.
    pub fn with_capacities(mut self, capacities: &[u32]) -> Self {
        let first = self.tables.len() as u32 + 1;
        for (offset, &capacity) in capacities.iter().enumerate() {
            self.tables.push((first + offset as u32, capacity));
        }
        self
    }

    /// Sets the clock.
    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.now = at(hour, minute);
        self
    }

    /// Builds the restaurant and manager.
    pub fn build(self) -> Fixture {
        let tables = self
            .tables
            .into_iter()
            .map(|(n, c)| Table::new(TableNumber::try_from(n).unwrap(), c).unwrap())
            .collect();
        let clock = Arc::new(FixedClock::new(self.now));
        Fixture {
            manager: ReservationManager::new(Arc::clone(&clock)),
            clock,
            restaurant: Restaurant::new(tables).unwrap(),
        }
    }
}

impl Default for RestaurantFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Asserts the global index and table lists agree.
#[allow(dead_code)]
pub fn assert_consistent(restaurant: &Restaurant) {
    if let Err(problem) = restaurant.check_consistency() {
        panic!("restaurant state is inconsistent: {problem}");
    }
}
