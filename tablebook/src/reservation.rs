//! Reservation types for tracking table bookings.
//!
//! This module provides the [`Reservation`] record together with its
//! identifier, status, and the validated [`Customer`] details a booking is
//! made under.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::hours::ServiceSlot;
use crate::table::TableNumber;

/// A unique identifier for a reservation, assigned by the restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(u64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Confirmation state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Not yet confirmed by staff; subject to expiry.
    Pending,
    /// Confirmed by staff; never expired by the sweep.
    Confirmed,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// How a reservation was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationKind {
    /// Booked ahead of time for a future slot.
    Advance,
    /// Booked by staff when the party arrived.
    WalkIn,
}

/// Name and contact number a reservation is held under.
///
/// # Examples
///
/// ```
/// use tablebook::Customer;
///
/// let customer = Customer::new("  Ada  ", "98765432").unwrap();
/// assert_eq!(customer.name(), "Ada");
///
/// assert!(Customer::new("", "98765432").is_err());
/// assert!(Customer::new("Ada", " ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    contact: String,
}

impl Customer {
    /// Creates customer details, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or contact is empty after trimming.
    pub fn new(name: impl AsRef<str>, contact: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "customer name must be non-empty after trimming whitespace".into(),
            });
        }

        let contact = contact.as_ref().trim();
        if contact.is_empty() {
            return Err(ValidationError {
                field: "contact".into(),
                message: "contact number must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            contact: contact.to_string(),
        })
    }

    /// Placeholder details for a walk-in party that gave no name.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Customer;
    ///
    /// let guest = Customer::walk_in();
    /// assert_eq!(guest.name(), "Walk-in");
    /// ```
    #[must_use]
    pub fn walk_in() -> Self {
        Self {
            name: "Walk-in".to_string(),
            contact: "on site".to_string(),
        }
    }

    /// Returns the customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact number.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }
}

/// A table booking.
///
/// Reservations are created only by the reservation manager. The timestamp,
/// party size, and assigned table never change after creation; only the
/// status does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    customer: Customer,
    party_size: u32,
    reserved_at: NaiveDateTime,
    slot: ServiceSlot,
    table: TableNumber,
    kind: ReservationKind,
    status: ReservationStatus,
}

impl Reservation {
    pub(crate) fn new(
        id: ReservationId,
        customer: Customer,
        party_size: u32,
        reserved_at: NaiveDateTime,
        slot: ServiceSlot,
        table: TableNumber,
        kind: ReservationKind,
    ) -> Self {
        Self {
            id,
            customer,
            party_size,
            reserved_at,
            slot,
            table,
            kind,
            status: ReservationStatus::Pending,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the customer details.
    #[must_use]
    pub const fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Returns the reservation timestamp.
    #[must_use]
    pub const fn reserved_at(&self) -> NaiveDateTime {
        self.reserved_at
    }

    /// Returns the service slot the table is held for.
    #[must_use]
    pub const fn slot(&self) -> ServiceSlot {
        self.slot
    }

    /// Returns the assigned table.
    #[must_use]
    pub const fn table(&self) -> TableNumber {
        self.table
    }

    /// Returns how the reservation was made.
    #[must_use]
    pub const fn kind(&self) -> ReservationKind {
        self.kind
    }

    /// Returns the confirmation status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns `true` if staff have not confirmed the reservation yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }

    /// Checks if the reservation has expired at `now` given a grace period.
    ///
    /// A pending reservation expires once `now` is at least `grace` past its
    /// timestamp; the boundary itself counts as expired. Confirmed
    /// reservations never expire.
    #[must_use]
    pub fn is_expired(&self, now: NaiveDateTime, grace: Duration) -> bool {
        self.is_pending() && now - self.reserved_at >= grace
    }

    pub(crate) fn confirm(&mut self) {
        self.status = ReservationStatus::Confirmed;
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
