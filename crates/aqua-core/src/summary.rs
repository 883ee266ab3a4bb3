//! # Account Summaries & Reports
//!
//! Read-only views computed from a snapshot:
//!
//! - [`customer_summary`] - the field set the outbound messaging
//!   collaborator formats into a customer's daily account message. This
//!   module only computes; templating and delivery live outside the core.
//! - [`low_stock_items`] / [`customers_with_balance`] - the reporting
//!   surfaces for the data-quality states the engine deliberately permits
//!   (negative or low stock, outstanding balances).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Customer, InventoryItem, Snapshot};

// =============================================================================
// Customer Summary
// =============================================================================

/// One customer's account position as of a business day.
///
/// `previous_balance + unpaid_today = closing_balance`; the messaging
/// collaborator renders these fields verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Balance before the day's transactions.
    pub previous_balance: Money,
    /// Total billed to the customer on `date`.
    pub purchased_today: Money,
    /// Total received from the customer on `date`.
    pub paid_today: Money,
    /// Net balance movement on `date` (negative when the customer paid
    /// down more than they bought).
    pub unpaid_today: Money,
    /// Balance after the day's transactions.
    pub closing_balance: Money,
    /// Returnable containers currently with the customer.
    pub empty_bottles_held: i64,
}

/// Computes a customer's daily summary.
///
/// The closing balance is the customer's current ledger balance; the
/// previous balance is derived by backing the day's net movement out of it,
/// so the summary always reconciles with the ledger the engine maintains.
pub fn customer_summary(
    date: NaiveDate,
    customer_id: &str,
    snapshot: &Snapshot,
) -> CoreResult<CustomerSummary> {
    let customer = snapshot
        .customer(customer_id)
        .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

    let mut purchased = Money::zero();
    let mut paid = Money::zero();
    for sale in snapshot.sales_for_customer(customer_id).filter(|s| s.date == date) {
        purchased += sale.amount;
        paid += sale.amount_received;
    }

    let unpaid = purchased - paid;
    let closing = customer.total_balance;

    Ok(CustomerSummary {
        customer_id: customer.id.clone(),
        name: customer.name.clone(),
        date,
        previous_balance: closing - unpaid,
        purchased_today: purchased,
        paid_today: paid,
        unpaid_today: unpaid,
        closing_balance: closing,
        empty_bottles_held: customer.empty_bottles_held,
    })
}

// =============================================================================
// Reports
// =============================================================================

/// Items at or below their low-stock threshold, lowest stock first.
/// Negative stock (oversold) naturally sorts to the top.
pub fn low_stock_items(snapshot: &Snapshot) -> Vec<&InventoryItem> {
    let mut items: Vec<&InventoryItem> = snapshot
        .inventory
        .iter()
        .filter(|i| i.stock <= i.low_stock_threshold)
        .collect();
    items.sort_by_key(|i| i.stock);
    items
}

/// Customers with money outstanding, largest debt first.
pub fn customers_with_balance(snapshot: &Snapshot) -> Vec<&Customer> {
    let mut customers: Vec<&Customer> = snapshot
        .customers
        .iter()
        .filter(|c| c.total_balance.is_positive())
        .collect();
    customers.sort_by(|a, b| b.total_balance.cmp(&a.total_balance));
    customers
}

// =============================================================================
// Unit Tests
// =============================================================================
