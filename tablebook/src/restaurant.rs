//! The restaurant context: table registry, reservation index, and orders.
//!
//! [`Restaurant`] is the single owner of all mutable scheduling state. Each
//! [`Table`] owns the reservations booked against it, while the restaurant
//! keeps a global index of reservation ids in booking order. Every change to a
//! reservation goes through this type so the two views are always updated
//! together.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hours::OperatingHours;
use crate::reservation::{Reservation, ReservationId};
use crate::table::{Table, TableNumber};

/// Identifier of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub u32);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The staff member acting on a walk-in.
///
/// Only used for attribution; no role checks are made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Staff identifier.
    pub id: StaffId,
    /// Display name.
    pub name: String,
}

impl Staff {
    /// Creates a staff reference.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: StaffId(id),
            name: name.into(),
        }
    }
}

/// Identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

/// An order opened for a seated walk-in party.
///
/// Orders are created here and handed off; their later life (items,
/// invoices) is managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// The walk-in reservation the party was seated under.
    pub reservation: ReservationId,
    /// The table the party was seated at.
    pub table: TableNumber,
    /// The staff member who seated the party.
    pub staff: StaffId,
    /// When the order was opened.
    pub opened_at: NaiveDateTime,
}

/// All scheduling state for one restaurant.
///
/// # Examples
///
/// ```
/// use tablebook::{Restaurant, Table, TableNumber};
///
/// let restaurant = Restaurant::new(vec![
///     Table::new(TableNumber::try_from(2).unwrap(), 4).unwrap(),
///     Table::new(TableNumber::try_from(1).unwrap(), 2).unwrap(),
/// ])
/// .unwrap();
///
/// // Tables are kept in ascending order.
/// let numbers: Vec<u32> = restaurant.tables().iter().map(|t| t.number().value()).collect();
/// assert_eq!(numbers, vec![1, 2]);
/// assert_eq!(restaurant.reservation_count(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RestaurantRecord")]
pub struct Restaurant {
    tables: Vec<Table>,
    #[serde(skip)]
    index: Vec<(ReservationId, TableNumber)>,
    orders: Vec<Order>,
    next_reservation: u64,
    next_order: u64,
}

/// Serialized form of a [`Restaurant`].
///
/// Loading goes back through [`Restaurant::new`], so the registry is re-sorted
/// and the reservation index is rebuilt from the tables.
#[derive(Deserialize)]
struct RestaurantRecord {
    tables: Vec<Table>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    next_reservation: u64,
    #[serde(default)]
    next_order: u64,
}

impl TryFrom<RestaurantRecord> for Restaurant {
    type Error = Error;

    fn try_from(record: RestaurantRecord) -> Result<Self> {
        let mut restaurant = Self::new(record.tables)?;

        // Ids are handed out in booking order.
        let mut index: Vec<(ReservationId, TableNumber)> = restaurant
            .tables
            .iter()
            .flat_map(|t| t.reserved_by().iter().map(|r| (r.id(), t.number())))
            .collect();
        index.sort_by_key(|(id, _)| *id);
        restaurant.index = index;

        let last_reservation = restaurant.index.last().map_or(0, |(id, _)| id.value());
        let last_order = record.orders.iter().map(|o| o.id.0).max().unwrap_or(0);
        restaurant.next_reservation = record.next_reservation.max(last_reservation + 1);
        restaurant.next_order = record.next_order.max(last_order + 1);
        restaurant.orders = record.orders;

        restaurant
            .check_consistency()
            .map_err(|message| Error::Validation {
                field: "restaurant".into(),
                message,
            })?;
        Ok(restaurant)
    }
}

impl Restaurant {
    /// Creates a restaurant from its table registry.
    ///
    /// Tables are sorted by number so allocation scans them in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if two tables share a number.
    pub fn new(mut tables: Vec<Table>) -> Result<Self> {
        tables.sort_by_key(Table::number);
        if let Some(pair) = tables.windows(2).find(|w| w[0].number() == w[1].number()) {
            return Err(Error::DuplicateTable {
                number: pair[0].number(),
            });
        }

        Ok(Self {
            tables,
            index: Vec::new(),
            orders: Vec::new(),
            next_reservation: 1,
            next_order: 1,
        })
    }

    /// Creates a restaurant from the table list in configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no tables are configured or a table is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let table_configs = config.tables.as_ref().ok_or_else(|| Error::Validation {
            field: "tables".into(),
            message: "Table configuration is required".into(),
        })?;

        let tables = table_configs
            .iter()
            .map(|t| {
                let number = TableNumber::try_from(t.number)?;
                Ok(Table::new(number, t.capacity)?)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(tables)
    }

    /// Returns all tables in ascending number order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks up a table by number.
    #[must_use]
    pub fn table(&self, number: TableNumber) -> Option<&Table> {
        self.table_index(number).map(|i| &self.tables[i])
    }

    /// Looks up a reservation by id.
    #[must_use]
    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        let (_, table) = self.index.iter().find(|(rid, _)| *rid == id)?;
        self.table(*table)?.reservation(id)
    }

    /// Returns all reservations in booking order.
    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.index
            .iter()
            .filter_map(|(id, table)| self.table(*table)?.reservation(*id))
    }

    /// Returns the number of reservations in the global index.
    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.index.len()
    }

    /// Returns all orders in creation order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Returns the number of orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Lists the tables that could seat `party_size` guests at `at`.
    ///
    /// This is a display query; allocation decisions are made by the
    /// reservation manager under the scheduler's lock.
    #[must_use]
    pub fn available_tables(
        &self,
        at: NaiveDateTime,
        party_size: u32,
        hours: &OperatingHours,
    ) -> Vec<TableNumber> {
        self.tables
            .iter()
            .filter(|t| crate::table::is_available(t, at, party_size, hours))
            .map(Table::number)
            .collect()
    }

    /// Marks a reservation as confirmed by staff.
    ///
    /// A confirmed reservation stays on its table and in the index, holding
    /// the table for its service slot until it is cancelled. The expiry sweep
    /// never removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if no reservation has this id.
    pub fn confirm_reservation(&mut self, id: ReservationId) -> Result<&Reservation> {
        let table = self.table_of(id)?;
        let index = self.table_index(table).ok_or_else(|| not_found(id))?;
        let reservation = self.tables[index]
            .reservation_mut(id)
            .ok_or_else(|| not_found(id))?;
        reservation.confirm();
        log::info!("Confirmed reservation {id} at table {table}");
        Ok(&*reservation)
    }

    /// Cancels a reservation, removing it from its table and the index.
    ///
    /// # Errors
    ///
    /// Returns an error if no reservation has this id.
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<Reservation> {
        let reservation = self.remove(id).ok_or_else(|| not_found(id))?;
        log::info!(
            "Cancelled reservation {id} at table {}",
            reservation.table()
        );
        Ok(reservation)
    }

    /// Removes every reservation and order, keeping the table registry.
    pub fn clear(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }
        self.index.clear();
        self.orders.clear();
    }

    /// Checks that the global index and the table-local lists agree.
    ///
    /// Verifies that tables are in strictly ascending order, that each indexed
    /// reservation is held by exactly the table the index names, that no table
    /// holds an unindexed reservation, and that no table is over capacity or
    /// double-booked.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn check_consistency(&self) -> std::result::Result<(), String> {
        if let Some(pair) = self
            .tables
            .windows(2)
            .find(|w| w[0].number() >= w[1].number())
        {
            return Err(format!(
                "table {} listed before table {}",
                pair[0].number(),
                pair[1].number()
            ));
        }

        let mut indexed = HashSet::new();
        for (id, number) in &self.index {
            if !indexed.insert(*id) {
                return Err(format!("reservation {id} indexed twice"));
            }
            let table = self
                .table(*number)
                .ok_or_else(|| format!("reservation {id} indexed to missing table {number}"))?;
            if table.reservation(*id).is_none() {
                return Err(format!("reservation {id} missing from table {number}"));
            }
        }

        let mut held = 0;
        for table in &self.tables {
            let mut slots = HashSet::new();
            for reservation in table.reserved_by() {
                held += 1;
                if !indexed.contains(&reservation.id()) {
                    return Err(format!(
                        "table {} holds unindexed reservation {}",
                        table.number(),
                        reservation.id()
                    ));
                }
                if reservation.table() != table.number() {
                    return Err(format!(
                        "reservation {} assigned to table {} but held by table {}",
                        reservation.id(),
                        reservation.table(),
                        table.number()
                    ));
                }
                if reservation.party_size() > table.capacity() {
                    return Err(format!(
                        "table {} over capacity for reservation {}",
                        table.number(),
                        reservation.id()
                    ));
                }
                if !slots.insert(reservation.slot()) {
                    return Err(format!(
                        "table {} double-booked for {}",
                        table.number(),
                        reservation.slot()
                    ));
                }
            }
        }

        if held == self.index.len() {
            Ok(())
        } else {
            Err(format!(
                "{held} reservations held by tables but {} indexed",
                self.index.len()
            ))
        }
    }

    pub(crate) fn next_reservation_id(&mut self) -> ReservationId {
        let id = ReservationId::new(self.next_reservation);
        self.next_reservation += 1;
        id
    }

    /// Attaches a reservation to its table and appends it to the index.
    ///
    /// Both writes happen or neither does.
    pub(crate) fn insert(&mut self, reservation: Reservation) -> Result<&Reservation> {
        let number = reservation.table();
        let index = self.table_index(number).ok_or_else(|| Error::NotFound {
            resource: format!("table {number}"),
        })?;
        self.index.push((reservation.id(), number));
        let table = &mut self.tables[index];
        table.attach(reservation);
        table
            .reserved_by()
            .last()
            .ok_or_else(|| Error::NotFound {
                resource: format!("reservation on table {number}"),
            })
    }

    /// Detaches a reservation from its table and drops it from the index.
    pub(crate) fn remove(&mut self, id: ReservationId) -> Option<Reservation> {
        let position = self.index.iter().position(|(rid, _)| *rid == id)?;
        let (_, number) = self.index.remove(position);
        let index = self.table_index(number)?;
        self.tables[index].detach(id)
    }

    pub(crate) fn open_order(
        &mut self,
        reservation: &Reservation,
        staff: &Staff,
        opened_at: NaiveDateTime,
    ) -> &Order {
        let order = Order {
            id: OrderId(self.next_order),
            reservation: reservation.id(),
            table: reservation.table(),
            staff: staff.id,
            opened_at,
        };
        self.next_order += 1;
        self.orders.push(order);
        &self.orders[self.orders.len() - 1]
    }

    fn table_index(&self, number: TableNumber) -> Option<usize> {
        self.tables
            .binary_search_by_key(&number, Table::number)
            .ok()
    }

    fn table_of(&self, id: ReservationId) -> Result<TableNumber> {
        self.index
            .iter()
            .find(|(rid, _)| *rid == id)
            .map(|(_, table)| *table)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}
