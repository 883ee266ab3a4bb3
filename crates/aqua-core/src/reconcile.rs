//! # Cash/Bank Reconciliation
//!
//! Reconstructs one day's opening and closing positions, for cash and bank
//! independently, from the full transaction history.
//!
//! ## Breakdown Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DayBreakdown (per channel: cash, bank)                                 │
//! │                                                                         │
//! │  opening          explicit DailyOpeningBalance, or derived from the    │
//! │                   full history strictly before the day                  │
//! │  + 19L collection    amount_received, bucketed via the classifier      │
//! │  + 6L collection     patterns or an explicit payment_for tag           │
//! │  + counter sales     walk-ins matching neither named bucket            │
//! │  - expenses          same-day, Salaries/Home/Shop broken out           │
//! │  ─────────────                                                          │
//! │  = closing                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Inherited Quirk
//!
//! The derived-opening fallback sums each prior sale's `amount` (billed),
//! while same-day revenue sums `amount_received` (collected). The two bases
//! differ whenever a sale is partly unpaid. This mirrors the behavior the
//! business has reconciled against historically; do not "fix" it here
//! without a product decision, because every derived opening position would
//! shift. See DESIGN.md.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::classify::container_size;
use crate::money::Money;
use crate::types::{CollectionCategory, PaymentMethod, Sale, Snapshot};

// =============================================================================
// Breakdown Types
// =============================================================================

/// Same-day expenses for one channel. Salaries, Home and Shop are the
/// categories the business watches daily; everything else only lands in the
/// total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseBreakdown {
    pub salaries: Money,
    pub home: Money,
    pub shop: Money,
    pub total: Money,
}

/// One channel (cash or bank) of the daily breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChannelBreakdown {
    pub opening: Money,
    pub collection_19l: Money,
    pub collection_6l: Money,
    pub counter: Money,
    pub revenue_total: Money,
    pub expenses: ExpenseBreakdown,
    pub closing: Money,
}

/// The full reconciliation picture for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayBreakdown {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub cash: ChannelBreakdown,
    pub bank: ChannelBreakdown,
}

impl DayBreakdown {
    /// Cash and bank closing positions combined.
    pub fn combined_closing(&self) -> Money {
        self.cash.closing + self.bank.closing
    }
}

// =============================================================================
// Bucketing
// =============================================================================

/// Revenue bucket for a sale: an explicit `payment_for` tag wins, otherwise
/// the referenced item's name decides via the classifier patterns. `None`
/// means the sale belongs to neither named bucket.
fn bucket_for(sale: &Sale, snapshot: &Snapshot) -> Option<CollectionCategory> {
    sale.payment_for.or_else(|| {
        sale.item_id
            .as_deref()
            .and_then(|id| snapshot.item(id))
            .and_then(|item| container_size(&item.name))
    })
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Builds the daily cash/bank breakdown for `date`.
///
/// Pure and total: a date with no records yields a breakdown of zeros (plus
/// whatever opening the history implies).
pub fn reconcile(date: NaiveDate, snapshot: &Snapshot) -> DayBreakdown {
    let (opening_cash, opening_bank) = match snapshot.opening_balance(date) {
        Some(explicit) => (explicit.cash, explicit.bank),
        None => derived_opening(date, snapshot),
    };

    let mut cash = ChannelBreakdown {
        opening: opening_cash,
        ..ChannelBreakdown::default()
    };
    let mut bank = ChannelBreakdown {
        opening: opening_bank,
        ..ChannelBreakdown::default()
    };

    for sale in snapshot.sales.iter().filter(|s| s.date == date) {
        let channel = match sale.payment_method {
            PaymentMethod::Cash => &mut cash,
            PaymentMethod::Bank => &mut bank,
            // nothing was received into either float
            PaymentMethod::Pending => continue,
        };

        match bucket_for(sale, snapshot) {
            Some(CollectionCategory::NineteenLitre) => channel.collection_19l += sale.amount_received,
            Some(CollectionCategory::SixLitre) => channel.collection_6l += sale.amount_received,
            // walk-ins with no named bucket are counter revenue; customer
            // sales with no bucket stay out of the revenue lines entirely
            None if sale.customer_id.is_none() => channel.counter += sale.amount_received,
            None => {}
        }
    }

    for expense in snapshot.expenses.iter().filter(|e| e.date == date) {
        let channel = match expense.payment_method {
            PaymentMethod::Cash => &mut cash,
            PaymentMethod::Bank => &mut bank,
            PaymentMethod::Pending => continue,
        };

        if expense.category.eq_ignore_ascii_case("salaries") {
            channel.expenses.salaries += expense.amount;
        } else if expense.category.eq_ignore_ascii_case("home") {
            channel.expenses.home += expense.amount;
        } else if expense.category.eq_ignore_ascii_case("shop") {
            channel.expenses.shop += expense.amount;
        }
        channel.expenses.total += expense.amount;
    }

    for channel in [&mut cash, &mut bank] {
        channel.revenue_total = channel.collection_19l + channel.collection_6l + channel.counter;
        channel.closing = channel.opening + channel.revenue_total - channel.expenses.total;
    }

    trace!(
        %date,
        cash_closing = %cash.closing,
        bank_closing = %bank.closing,
        "Reconciled day"
    );

    DayBreakdown { date, cash, bank }
}

/// Derives opening positions from the full history strictly before `date`:
/// every sale's `amount` minus every expense's `amount`, split by payment
/// method. (Billed basis, not collected - see the module docs.)
fn derived_opening(date: NaiveDate, snapshot: &Snapshot) -> (Money, Money) {
    let mut cash = Money::zero();
    let mut bank = Money::zero();

    for sale in snapshot.sales.iter().filter(|s| s.date < date) {
        match sale.payment_method {
            PaymentMethod::Cash => cash += sale.amount,
            PaymentMethod::Bank => bank += sale.amount,
            PaymentMethod::Pending => {}
        }
    }

    for expense in snapshot.expenses.iter().filter(|e| e.date < date) {
        match expense.payment_method {
            PaymentMethod::Cash => cash -= expense.amount,
            PaymentMethod::Bank => bank -= expense.amount,
            PaymentMethod::Pending => {}
        }
    }

    (cash, bank)
}

// =============================================================================
// Unit Tests
// =============================================================================
