//! Property-based tests for the scheduling invariants.
//!
//! Random sequences of bookings, walk-ins, confirmations, cancellations and
//! sweeps are replayed against a fresh restaurant; after every step the
//! global index and the table-local lists must still agree.

use crate::clock::FixedClock;
use crate::{
    Customer, Reservation, ReservationId, ReservationManager, Restaurant, Staff, Table,
    TableNumber,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Book { party: u32, day: u32, minute: u32 },
    WalkIn { party: u32 },
    Confirm { pick: usize },
    Cancel { pick: usize },
    Advance { minutes: i64 },
    Sweep,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u32..8, 0u32..3, 0u32..24 * 60)
            .prop_map(|(party, day, minute)| Op::Book { party, day, minute }),
        2 => (0u32..8).prop_map(|party| Op::WalkIn { party }),
        1 => any::<usize>().prop_map(|pick| Op::Confirm { pick }),
        1 => any::<usize>().prop_map(|pick| Op::Cancel { pick }),
        2 => (1i64..120).prop_map(|minutes| Op::Advance { minutes }),
        2 => Just(Op::Sweep),
    ]
}

fn tables_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::btree_map(1u32..20, 1u32..=6, 1..6).prop_map(|m| m.into_iter().collect())
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn restaurant(tables: &[(u32, u32)]) -> Restaurant {
    let tables = tables
        .iter()
        .map(|&(n, c)| Table::new(TableNumber::try_from(n).unwrap(), c).unwrap())
        .collect();
    Restaurant::new(tables).unwrap()
}

fn pick(restaurant: &Restaurant, pick: usize) -> Option<ReservationId> {
    let count = restaurant.reservation_count();
    if count == 0 {
        return None;
    }
    restaurant.reservations().nth(pick % count).map(Reservation::id)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Every step keeps the index and table lists in bijection, with no table
    // over capacity or booked twice for one service slot.
    #[test]
    fn operations_preserve_consistency(
        tables in tables_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let clock = FixedClock::new(start());
        let manager = ReservationManager::new(&clock);
        let mut restaurant = restaurant(&tables);
        let staff = Staff::new(1, "host");

        for op in ops {
            match op {
                Op::Book { party, day, minute } => {
                    let requested = start().date().and_hms_opt(0, 0, 0).unwrap()
                        + Duration::days(i64::from(day))
                        + Duration::minutes(i64::from(minute));
                    let customer = Customer::new("guest", "555-0100").unwrap();
                    let _ = manager.make_reservation(&mut restaurant, customer, party, requested);
                }
                Op::WalkIn { party } => {
                    let customer = Customer::new("walk-in", "555-0199").unwrap();
                    let _ = manager.make_walk_in_reservation(&mut restaurant, &staff, customer, party);
                }
                Op::Confirm { pick: p } => {
                    if let Some(id) = pick(&restaurant, p) {
                        prop_assert!(restaurant.confirm_reservation(id).is_ok());
                    }
                }
                Op::Cancel { pick: p } => {
                    if let Some(id) = pick(&restaurant, p) {
                        prop_assert!(restaurant.cancel_reservation(id).is_ok());
                    }
                }
                Op::Advance { minutes } => clock.advance(Duration::minutes(minutes)),
                Op::Sweep => {
                    manager.remove_expired_reservations(&mut restaurant);
                }
            }

            prop_assert_eq!(restaurant.check_consistency(), Ok(()));
        }
    }

    // A failed booking changes nothing.
    #[test]
    fn rejected_booking_is_noop(
        tables in tables_strategy(),
        party in 0u32..10,
        minute in 0u32..24 * 60
    ) {
        let clock = FixedClock::new(start());
        let manager = ReservationManager::new(&clock);
        let mut restaurant = restaurant(&tables);
        let requested = start().date().and_hms_opt(0, 0, 0).unwrap()
            + Duration::minutes(i64::from(minute));

        // Fill whatever can be filled first.
        for _ in 0..tables.len() {
            let customer = Customer::new("filler", "555-0100").unwrap();
            let _ = manager.make_reservation(&mut restaurant, customer, 1, requested);
        }

        let before: Vec<_> = restaurant.reservations().cloned().collect();
        let customer = Customer::new("late", "555-0101").unwrap();
        if manager.make_reservation(&mut restaurant, customer, party, requested).is_err() {
            let after: Vec<_> = restaurant.reservations().cloned().collect();
            prop_assert_eq!(before, after);
        }
    }

    // The chosen table is the lowest-numbered one that fits.
    #[test]
    fn allocation_is_first_fit(tables in tables_strategy(), party in 1u32..=6) {
        let clock = FixedClock::new(start());
        let manager = ReservationManager::new(&clock);
        let mut restaurant = restaurant(&tables);
        let lunch = start() + Duration::hours(2);

        let expected = tables.iter().find(|&&(_, c)| c >= party).map(|&(n, _)| n);
        let customer = Customer::new("guest", "555-0100").unwrap();
        let got = manager
            .make_reservation(&mut restaurant, customer, party, lunch)
            .ok()
            .map(|r| r.table().value());

        prop_assert_eq!(got, expected);
    }

    // Sweeping twice without the clock moving removes nothing the second time.
    #[test]
    fn sweep_is_idempotent(
        tables in tables_strategy(),
        minutes in prop::collection::vec(60u32..300, 1..10),
        elapsed in 0i64..600
    ) {
        let clock = FixedClock::new(start());
        let manager = ReservationManager::new(&clock);
        let mut restaurant = restaurant(&tables);

        for m in minutes {
            let customer = Customer::new("guest", "555-0100").unwrap();
            let at = start() + Duration::minutes(i64::from(m));
            let _ = manager.make_reservation(&mut restaurant, customer, 1, at);
        }

        clock.advance(Duration::minutes(elapsed));
        manager.remove_expired_reservations(&mut restaurant);
        let once: HashSet<_> = restaurant.reservations().map(|r| r.id()).collect();

        let second = manager.remove_expired_reservations(&mut restaurant);
        let twice: HashSet<_> = restaurant.reservations().map(|r| r.id()).collect();

        prop_assert_eq!(second.removed_count, 0);
        prop_assert_eq!(once, twice);
    }
}
