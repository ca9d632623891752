//! Serialized access to shared restaurant state.
//!
//! [`Scheduler`] owns the [`Restaurant`] behind a single mutex. Every write
//! (booking, walk-in, sweep, confirm, cancel) runs start to finish while
//! holding that lock, so two requests can never both see a table as free and
//! then both book it.
//!
//! Results are returned as owned clones since references cannot outlive the
//! lock guard.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::manager::{ExpireResult, ReservationManager};
use crate::reservation::{Customer, Reservation, ReservationId};
use crate::restaurant::{Order, Restaurant, Staff};
use crate::table::TableNumber;

/// Thread-safe front end over one restaurant.
///
/// Share it between threads with an [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::clock::FixedClock;
/// use tablebook::{Customer, ReservationManager, Restaurant, Scheduler, Table, TableNumber};
///
/// let now = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let restaurant = Restaurant::new(vec![
///     Table::new(TableNumber::try_from(1).unwrap(), 4).unwrap(),
/// ])
/// .unwrap();
/// let scheduler = Scheduler::new(ReservationManager::new(FixedClock::new(now)), restaurant);
///
/// let dinner = now.date().and_hms_opt(19, 0, 0).unwrap();
/// let customer = Customer::new("Grace", "555-0100").unwrap();
/// let reservation = scheduler.make_reservation(customer, 2, dinner).unwrap();
///
/// assert_eq!(reservation.table().value(), 1);
/// assert_eq!(scheduler.reservation_count(), 1);
/// ```
#[derive(Debug)]
pub struct Scheduler<C: Clock = SystemClock> {
    manager: ReservationManager<C>,
    state: Mutex<Restaurant>,
}

impl<C: Clock> Scheduler<C> {
    /// Creates a scheduler owning `restaurant`.
    #[must_use]
    pub fn new(manager: ReservationManager<C>, restaurant: Restaurant) -> Self {
        Self {
            manager,
            state: Mutex::new(restaurant),
        }
    }

    /// The manager used for every operation.
    #[must_use]
    pub fn manager(&self) -> &ReservationManager<C> {
        &self.manager
    }

    // Poison is ignored: `Restaurant::insert` does its dual write only after
    // every fallible check, so a panicking holder leaves consistent state.
    fn lock(&self) -> MutexGuard<'_, Restaurant> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Books a table in advance. See [`ReservationManager::make_reservation`].
    ///
    /// # Errors
    ///
    /// Returns the manager's error; the restaurant is unchanged on failure.
    pub fn make_reservation(
        &self,
        customer: Customer,
        party_size: u32,
        requested: NaiveDateTime,
    ) -> Result<Reservation> {
        let mut restaurant = self.lock();
        self.manager
            .make_reservation(&mut restaurant, customer, party_size, requested)
            .cloned()
    }

    /// Seats a walk-in party. See [`ReservationManager::make_walk_in_reservation`].
    ///
    /// # Errors
    ///
    /// Returns the manager's error; neither a reservation nor an order is
    /// created on failure.
    pub fn make_walk_in_reservation(
        &self,
        staff: &Staff,
        customer: Customer,
        party_size: u32,
    ) -> Result<Order> {
        let mut restaurant = self.lock();
        self.manager
            .make_walk_in_reservation(&mut restaurant, staff, customer, party_size)
            .cloned()
    }

    /// Runs one expiry sweep to completion.
    pub fn remove_expired_reservations(&self) -> ExpireResult {
        let mut restaurant = self.lock();
        self.manager.remove_expired_reservations(&mut restaurant)
    }

    /// Lists what a sweep would remove right now.
    #[must_use]
    pub fn preview_expired_reservations(&self) -> ExpireResult {
        self.manager.preview_expired_reservations(&self.lock())
    }

    /// Confirms a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) for an unknown id.
    pub fn confirm_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.lock().confirm_reservation(id).cloned()
    }

    /// Cancels a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) for an unknown id.
    pub fn cancel_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.lock().cancel_reservation(id)
    }

    /// Tables that could currently seat the party. For display only.
    #[must_use]
    pub fn available_tables(&self, at: NaiveDateTime, party_size: u32) -> Vec<TableNumber> {
        self.lock()
            .available_tables(at, party_size, self.manager.hours())
    }

    /// Number of live reservations.
    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.lock().reservation_count()
    }

    /// Runs `f` against the current state under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&Restaurant) -> R) -> R {
        f(&*self.lock())
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Restaurant {
        self.lock().clone()
    }

    /// Drops every reservation and order.
    pub fn clear(&self) {
        self.lock().clear();
        log::info!("Cleared all reservations and orders");
    }

    /// Consumes the scheduler, returning the restaurant.
    #[must_use]
    pub fn into_inner(self) -> Restaurant {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
