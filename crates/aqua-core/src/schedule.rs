//! # Delivery-Due Scheduler
//!
//! Decides, per customer, whether a delivery is due on a given calendar
//! date from the delivery frequency and the sale history.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_due_on(date, customer, sales)                                       │
//! │                                                                         │
//! │  frequency <= 0 ───────────────► false  (on-demand, never scheduled)   │
//! │  no prior sale ────────────────► true   (new customers appear on       │
//! │                                          day-one schedules)            │
//! │  otherwise ────────────────────► days since last sale >= frequency     │
//! │                                                                         │
//! │  Calendar-day granularity: a frequency-1 customer who bought           │
//! │  yesterday is due today, whatever the hour.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The predicate takes an arbitrary date, not just "today", so the caller
//! can build a rolling schedule; `is_due_on(today, ...)` is the everyday
//! case, [`weekly_schedule`] the rolling one.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Customer, Sale, Snapshot};

/// Whether `customer` is due for a delivery on `date`.
///
/// Business dates are already calendar days (`NaiveDate`), so there is no
/// wall-clock component to normalize away; the day difference is exact.
pub fn is_due_on(date: NaiveDate, customer: &Customer, all_sales: &[Sale]) -> bool {
    if customer.delivery_frequency_days <= 0 {
        return false;
    }

    let last_sale = all_sales
        .iter()
        .filter(|s| s.customer_id.as_deref() == Some(customer.id.as_str()))
        .map(|s| s.date)
        .max();

    match last_sale {
        None => true,
        Some(last) => (date - last).num_days() >= customer.delivery_frequency_days,
    }
}

/// All customers due for a delivery on `date`, in snapshot order.
pub fn due_customers(date: NaiveDate, snapshot: &Snapshot) -> Vec<&Customer> {
    snapshot
        .customers
        .iter()
        .filter(|c| is_due_on(date, c, &snapshot.sales))
        .collect()
}

// =============================================================================
// Weekly Schedule
// =============================================================================

/// One day of the rolling delivery schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DaySchedule {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Ids of the customers due that day.
    pub customer_ids: Vec<String>,
}

/// Builds a seven-day rolling schedule starting at `start`.
///
/// Each day is evaluated against the same sale history: the schedule shows
/// who is due *if no delivery happens in between*, which is exactly what a
/// planning view wants.
pub fn weekly_schedule(start: NaiveDate, snapshot: &Snapshot) -> Vec<DaySchedule> {
    (0..7)
        .map(|offset| {
            let date = start + Days::new(offset);
            DaySchedule {
                date,
                customer_ids: due_customers(date, snapshot)
                    .into_iter()
                    .map(|c| c.id.clone())
                    .collect(),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::PaymentMethod;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn customer(id: &str, frequency: i64) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {id}"),
            phone: None,
            address: None,
            total_balance: Money::zero(),
            empty_bottles_held: 0,
            delivery_frequency_days: frequency,
            last_empties_collection: None,
            created_at: Utc::now(),
        }
    }

    fn sale_on(customer_id: &str, date: NaiveDate) -> Sale {
        Sale {
            id: format!("s-{customer_id}-{date}"),
            customer_id: Some(customer_id.to_string()),
            salesman_id: None,
            item_id: None,
            quantity: 0,
            empties_collected: 0,
            amount: Money::zero(),
            amount_received: Money::zero(),
            date,
            payment_method: PaymentMethod::Cash,
            payment_for: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_on_demand_customers_are_never_due() {
        let c = customer("c-1", 0);
        assert!(!is_due_on(d(2024, 3, 10), &c, &[]));
    }

    #[test]
    fn test_never_served_customer_is_always_due() {
        let c = customer("c-1", 7);
        assert!(is_due_on(d(2024, 3, 10), &c, &[]));

        // sales belonging to other customers don't count
        let sales = vec![sale_on("c-2", d(2024, 3, 9))];
        assert!(is_due_on(d(2024, 3, 10), &c, &sales));
    }

    #[test]
    fn test_frequency_boundary() {
        let c = customer("c-1", 3);
        let sales = vec![sale_on("c-1", d(2024, 3, 7))];

        assert!(!is_due_on(d(2024, 3, 9), &c, &sales)); // 2 days: not yet
        assert!(is_due_on(d(2024, 3, 10), &c, &sales)); // exactly 3: due
        assert!(is_due_on(d(2024, 3, 11), &c, &sales)); // overdue stays due
    }

    #[test]
    fn test_daily_customer_due_the_day_after() {
        let c = customer("c-1", 1);
        let sales = vec![sale_on("c-1", d(2024, 3, 9))];
        assert!(!is_due_on(d(2024, 3, 9), &c, &sales));
        assert!(is_due_on(d(2024, 3, 10), &c, &sales));
    }

    #[test]
    fn test_most_recent_sale_wins() {
        let c = customer("c-1", 7);
        // an old sale followed by a recent one: the recent one resets the clock
        let sales = vec![sale_on("c-1", d(2024, 2, 1)), sale_on("c-1", d(2024, 3, 8))];
        assert!(!is_due_on(d(2024, 3, 10), &c, &sales));
        assert!(is_due_on(d(2024, 3, 15), &c, &sales));
    }

    #[test]
    fn test_due_customers_filters_the_snapshot() {
        let snapshot = Snapshot {
            customers: vec![customer("c-1", 3), customer("c-2", 0), customer("c-3", 5)],
            sales: vec![sale_on("c-1", d(2024, 3, 7)), sale_on("c-3", d(2024, 3, 9))],
            ..Snapshot::default()
        };

        let due: Vec<&str> = due_customers(d(2024, 3, 10), &snapshot)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();

        // c-1: 3 days elapsed, due. c-2: on-demand. c-3: only 1 of 5 days.
        assert_eq!(due, vec!["c-1"]);
    }

    #[test]
    fn test_weekly_schedule_rolls_forward() {
        let snapshot = Snapshot {
            customers: vec![customer("c-1", 3)],
            sales: vec![sale_on("c-1", d(2024, 3, 8))],
            ..Snapshot::default()
        };

        let week = weekly_schedule(d(2024, 3, 9), &snapshot);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, d(2024, 3, 9));
        assert!(week[0].customer_ids.is_empty()); // 1 day elapsed
        assert!(week[1].customer_ids.is_empty()); // 2 days
        assert_eq!(week[2].customer_ids, vec!["c-1"]); // due on day 3
        assert_eq!(week[6].customer_ids, vec!["c-1"]); // and stays due
    }
}
