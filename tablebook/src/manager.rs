//! Reservation allocation and expiry.
//!
//! [`ReservationManager`] is the only code that creates reservations or sweeps
//! expired ones. It is stateless apart from its clock, the opening hours, and
//! the expiry grace period; all scheduling state lives in the [`Restaurant`]
//! passed to each operation.
//!
//! ## Allocation
//!
//! Tables are scanned in ascending number order and the first one that is
//! large enough and free for the requested service slot is taken. This is
//! first-fit: no attempt is made to minimise unused seats, and callers may
//! rely on which table is chosen.
//!
//! A request that finds no table leaves the restaurant unchanged and returns
//! [`Error::NoTableAvailable`].

use chrono::{Duration, NaiveDateTime};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ConfigValidator};
use crate::error::{Error, Result};
use crate::hours::{OperatingHours, ServiceSlot};
use crate::reservation::{Customer, Reservation, ReservationId, ReservationKind};
use crate::restaurant::{Order, Restaurant, Staff};
use crate::table::{Table, TableNumber};

/// Default grace period before an unconfirmed reservation expires.
pub const DEFAULT_GRACE_MINUTES: u32 = 30;

/// Result of an expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpireResult {
    /// Number of reservations removed (or that would be removed in a preview).
    pub removed_count: usize,
    /// Reservations that were (or would be) removed, in booking order.
    pub removed_reservations: Vec<Reservation>,
}

/// Allocates tables and sweeps expired reservations.
///
/// # Type Parameters
///
/// * `C` - The clock implementation (defaults to `SystemClock`)
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::clock::FixedClock;
/// use tablebook::{Customer, ReservationManager, Restaurant, Table, TableNumber};
///
/// let now = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let manager = ReservationManager::new(FixedClock::new(now));
/// let mut restaurant = Restaurant::new(vec![
///     Table::new(TableNumber::try_from(1).unwrap(), 2).unwrap(),
///     Table::new(TableNumber::try_from(2).unwrap(), 4).unwrap(),
/// ])
/// .unwrap();
///
/// let lunch = now.date().and_hms_opt(12, 0, 0).unwrap();
/// let customer = Customer::new("Ada", "98765432").unwrap();
/// let reservation = manager
///     .make_reservation(&mut restaurant, customer, 3, lunch)
///     .unwrap();
///
/// assert_eq!(reservation.table().value(), 2);
/// assert_eq!(restaurant.reservation_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReservationManager<C: Clock = SystemClock> {
    clock: C,
    hours: OperatingHours,
    grace: Duration,
}

impl<C: Clock> ReservationManager<C> {
    /// Creates a manager with default opening hours and a 30 minute grace period.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            hours: OperatingHours::default(),
            grace: Duration::minutes(i64::from(DEFAULT_GRACE_MINUTES)),
        }
    }

    /// Sets the opening hours requests are validated against.
    #[must_use]
    pub fn with_hours(mut self, hours: OperatingHours) -> Self {
        self.hours = hours;
        self
    }

    /// Sets how long a pending reservation is held past its time.
    #[must_use]
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Creates a manager from configuration.
    ///
    /// The configuration is validated first, so a hand-built [`Config`] gets
    /// the same checks as one from [`ConfigBuilder`](crate::ConfigBuilder).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &Config, clock: C) -> Result<Self> {
        ConfigValidator::validate(config)?;
        let mut manager = Self::new(clock);
        if let Some(ref hours) = config.hours {
            manager.hours = hours.to_operating_hours()?;
        }
        if let Some(minutes) = config.expiry.as_ref().and_then(|e| e.grace_minutes) {
            manager.grace = Duration::minutes(i64::from(minutes));
        }
        Ok(manager)
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the opening hours.
    #[must_use]
    pub fn hours(&self) -> &OperatingHours {
        &self.hours
    }

    /// Returns the expiry grace period.
    #[must_use]
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Book a table in advance.
    ///
    /// The request is validated first: the party must have at least one guest
    /// and `requested` must be within opening hours and not in the past. The
    /// first table (ascending number) that can seat the party in the
    /// requested service slot is then booked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a rejected request and
    /// [`Error::NoTableAvailable`] if every table is too small or taken. In
    /// both cases the restaurant is left unchanged.
    pub fn make_reservation<'r>(
        &self,
        restaurant: &'r mut Restaurant,
        customer: Customer,
        party_size: u32,
        requested: NaiveDateTime,
    ) -> Result<&'r Reservation> {
        let now = self.clock.now();
        let slot = self.validate_request(party_size, requested, now)?;
        let reservation = self.book(
            restaurant,
            customer,
            party_size,
            requested,
            slot,
            ReservationKind::Advance,
        )?;
        Ok(reservation)
    }

    /// Seat a walk-in party now and open an order for it.
    ///
    /// Uses the same first-fit allocation as [`make_reservation`] with the
    /// clock's current time. On success both a reservation and an order are
    /// created; on failure neither is. Pass [`Customer::walk_in`] when the
    /// party gave no details.
    ///
    /// [`make_reservation`]: Self::make_reservation
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the party is empty or the
    /// restaurant is closed, and [`Error::NoTableAvailable`] if no table is free.
    pub fn make_walk_in_reservation<'r>(
        &self,
        restaurant: &'r mut Restaurant,
        staff: &Staff,
        customer: Customer,
        party_size: u32,
    ) -> Result<&'r Order> {
        let now = self.clock.now();
        let slot = self.validate_request(party_size, now, now)?;
        let reservation = self
            .book(
                restaurant,
                customer,
                party_size,
                now,
                slot,
                ReservationKind::WalkIn,
            )?
            .clone();

        let order = restaurant.open_order(&reservation, staff, now);
        log::info!(
            "Opened order {} for walk-in {} at table {} (staff {})",
            order.id.0,
            reservation.id(),
            reservation.table(),
            staff.id
        );
        Ok(order)
    }

    /// Remove every pending reservation whose grace period has run out.
    ///
    /// A pending reservation is expired once the clock is at least the grace
    /// period past its timestamp. Running the sweep again without the clock
    /// moving removes nothing further.
    pub fn remove_expired_reservations(&self, restaurant: &mut Restaurant) -> ExpireResult {
        let expired = self.find_expired(restaurant);

        let removed_reservations: Vec<Reservation> = expired
            .into_iter()
            .filter_map(|id| restaurant.remove(id))
            .collect();

        for reservation in &removed_reservations {
            log::info!(
                "Expired reservation {} for {} at table {} ({})",
                reservation.id(),
                reservation.customer().name(),
                reservation.table(),
                reservation.reserved_at()
            );
        }

        ExpireResult {
            removed_count: removed_reservations.len(),
            removed_reservations,
        }
    }

    /// Report what [`remove_expired_reservations`] would remove without removing it.
    ///
    /// [`remove_expired_reservations`]: Self::remove_expired_reservations
    #[must_use]
    pub fn preview_expired_reservations(&self, restaurant: &Restaurant) -> ExpireResult {
        let removed_reservations: Vec<Reservation> = self
            .find_expired(restaurant)
            .into_iter()
            .filter_map(|id| restaurant.reservation(id).cloned())
            .collect();

        ExpireResult {
            removed_count: removed_reservations.len(),
            removed_reservations,
        }
    }

    /// Find the table a party would be given, without booking it.
    ///
    /// Returns `None` when `requested` is outside opening hours or no table
    /// qualifies.
    #[must_use]
    pub fn find_table(
        &self,
        restaurant: &Restaurant,
        party_size: u32,
        requested: NaiveDateTime,
    ) -> Option<TableNumber> {
        let slot = self.hours.slot_of(requested)?;
        first_fit(restaurant.tables(), slot, party_size)
    }

    fn validate_request(
        &self,
        party_size: u32,
        requested: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<ServiceSlot> {
        if party_size < 1 {
            return Err(Error::InvalidRequest {
                field: "party_size".into(),
                message: "party size must be at least 1".into(),
            });
        }

        if requested < now {
            return Err(Error::InvalidRequest {
                field: "requested".into(),
                message: format!("{requested} is in the past (now {now})"),
            });
        }

        self.hours
            .slot_of(requested)
            .ok_or_else(|| Error::InvalidRequest {
                field: "requested".into(),
                message: format!("{requested} is outside opening hours ({})", self.hours),
            })
    }

    fn book<'r>(
        &self,
        restaurant: &'r mut Restaurant,
        customer: Customer,
        party_size: u32,
        requested: NaiveDateTime,
        slot: ServiceSlot,
        kind: ReservationKind,
    ) -> Result<&'r Reservation> {
        let Some(table) = first_fit(restaurant.tables(), slot, party_size) else {
            log::debug!("No table for party of {party_size} in {slot}");
            return Err(Error::NoTableAvailable {
                party_size,
                requested,
            });
        };

        let id = restaurant.next_reservation_id();
        let reservation = Reservation::new(id, customer, party_size, requested, slot, table, kind);
        log::debug!("Assigned table {table} to reservation {id} for {slot}");
        restaurant.insert(reservation)
    }

    fn find_expired(&self, restaurant: &Restaurant) -> Vec<ReservationId> {
        let now = self.clock.now();
        restaurant
            .reservations()
            .filter(|r| r.is_expired(now, self.grace))
            .map(Reservation::id)
            .collect()
    }
}

impl Default for ReservationManager<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

/// First table in `tables` order that can seat the party in `slot`.
fn first_fit(tables: &[Table], slot: ServiceSlot, party_size: u32) -> Option<TableNumber> {
    tables
        .iter()
        .find(|t| t.is_available(slot, party_size))
        .map(Table::number)
}
