//! Table types and the availability predicate.
//!
//! A [`Table`] owns the reservations booked against it. Whether a table can
//! take a new party is answered by [`Table::is_available`], a pure check of
//! capacity and service-slot conflicts.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::hours::{OperatingHours, ServiceSlot};
use crate::reservation::{Reservation, ReservationId};

/// A valid table number (1 and up).
///
/// # Examples
///
/// ```
/// use tablebook::TableNumber;
///
/// let number = TableNumber::try_from(7).unwrap();
/// assert_eq!(number.value(), 7);
///
/// assert!(TableNumber::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableNumber(u32);

impl TableNumber {
    /// Returns the underlying table number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TableNumber {
    type Error = InvalidTableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(InvalidTableError {
                value,
                reason: "table number 0 is invalid".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl From<TableNumber> for u32 {
    fn from(number: TableNumber) -> Self {
        number.0
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid table definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTableError {
    /// The raw table number.
    pub value: u32,
    /// The reason the table is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid table {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidTableError {}

/// A restaurant table and the reservations booked against it.
///
/// # Examples
///
/// ```
/// use tablebook::{Table, TableNumber};
///
/// let table = Table::new(TableNumber::try_from(1).unwrap(), 4).unwrap();
/// assert_eq!(table.capacity(), 4);
/// assert!(table.reserved_by().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableRecord")]
pub struct Table {
    number: TableNumber,
    capacity: u32,
    reserved_by: Vec<Reservation>,
}

/// Serialized form of a [`Table`]; capacity is rechecked on load.
#[derive(Deserialize)]
struct TableRecord {
    number: TableNumber,
    capacity: u32,
    #[serde(default)]
    reserved_by: Vec<Reservation>,
}

impl TryFrom<TableRecord> for Table {
    type Error = InvalidTableError;

    fn try_from(record: TableRecord) -> Result<Self, Self::Error> {
        let mut table = Self::new(record.number, record.capacity)?;
        table.reserved_by = record.reserved_by;
        Ok(table)
    }
}

impl Table {
    /// Creates an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero.
    pub fn new(number: TableNumber, capacity: u32) -> Result<Self, InvalidTableError> {
        if capacity == 0 {
            return Err(InvalidTableError {
                value: number.value(),
                reason: "capacity must be at least 1".into(),
            });
        }
        Ok(Self {
            number,
            capacity,
            reserved_by: Vec::new(),
        })
    }

    /// Returns the table number.
    #[must_use]
    pub const fn number(&self) -> TableNumber {
        self.number
    }

    /// Returns the seating capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the reservations booked against this table, in booking order.
    #[must_use]
    pub fn reserved_by(&self) -> &[Reservation] {
        &self.reserved_by
    }

    /// Returns `true` if a reservation already holds `slot`.
    #[must_use]
    pub fn is_booked(&self, slot: ServiceSlot) -> bool {
        self.reserved_by.iter().any(|r| r.slot() == slot)
    }

    /// Check if this table can seat `party_size` guests in `slot`.
    ///
    /// The table qualifies when it is large enough and no reservation on it
    /// holds the same service slot.
    #[must_use]
    pub fn is_available(&self, slot: ServiceSlot, party_size: u32) -> bool {
        self.capacity >= party_size && !self.is_booked(slot)
    }

    pub(crate) fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reserved_by.iter().find(|r| r.id() == id)
    }

    pub(crate) fn reservation_mut(&mut self, id: ReservationId) -> Option<&mut Reservation> {
        self.reserved_by.iter_mut().find(|r| r.id() == id)
    }

    pub(crate) fn attach(&mut self, reservation: Reservation) {
        self.reserved_by.push(reservation);
    }

    pub(crate) fn detach(&mut self, id: ReservationId) -> Option<Reservation> {
        let index = self.reserved_by.iter().position(|r| r.id() == id)?;
        Some(self.reserved_by.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.reserved_by.clear();
    }
}

/// Check if `table` can seat `party_size` guests at `requested`.
///
/// Times outside opening hours book no service slot, so no table is
/// available for them.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::hours::OperatingHours;
/// use tablebook::table::is_available;
/// use tablebook::{Table, TableNumber};
///
/// let hours = OperatingHours::default();
/// let table = Table::new(TableNumber::try_from(1).unwrap(), 2).unwrap();
/// let lunch = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
///
/// assert!(is_available(&table, lunch, 2, &hours));
/// assert!(!is_available(&table, lunch, 3, &hours));
/// ```
#[must_use]
pub fn is_available(
    table: &Table,
    requested: NaiveDateTime,
    party_size: u32,
    hours: &OperatingHours,
) -> bool {
    hours
        .slot_of(requested)
        .is_some_and(|slot| table.is_available(slot, party_size))
}
