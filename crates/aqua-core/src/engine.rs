//! # Sale Transaction Engine
//!
//! Every sale create/update/delete flows through here, keeping the three
//! derived ledgers consistent in one step: the customer's outstanding
//! balance, the customer's held empty-container count, and the inventory
//! item's stock level.
//!
//! ## Operation Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Transaction Engine                              │
//! │                                                                         │
//! │  Two composable primitives:                                            │
//! │                                                                         │
//! │    apply_sale_effects(sale)     balance  += amount - received          │
//! │                                 empties  += quantity - collected       │
//! │                                 stock    -= quantity                   │
//! │                                                                         │
//! │    reverse_sale_effects(sale)   the exact sign-mirrored deltas         │
//! │                                                                         │
//! │  Every operation is a composition:                                     │
//! │                                                                         │
//! │    add    = apply(new)                                                 │
//! │    delete = reverse(old)                                               │
//! │    update = reverse(old) then apply(new)   (same working snapshot)     │
//! │                                                                         │
//! │  Reversibility is structural: delete(add(s)) lands back on the         │
//! │  starting ledgers because the deltas cancel exactly.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity Contract
//!
//! Operations take `&Snapshot` and return a new `Snapshot`. The input is
//! never touched; an `Err` means no new snapshot exists, so a failed
//! operation cannot partially apply. The caller owns persistence and must
//! re-read the latest snapshot before the next mutation (single logical
//! writer, no internal locking).
//!
//! ## What the Engine Does NOT Do
//!
//! No business-rule validation: negative stock and negative balances are
//! valid, observable states surfaced by reporting, not rejected here. Input
//! validation is the caller's job (see [`crate::validation`]). The only
//! failure the engine raises is "referenced entity not found".

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::classify::classify_collection;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    CollectionCategory, Customer, CustomerDraft, PaymentMethod, Sale, SaleDraft, Snapshot,
};

// =============================================================================
// Effect Primitives
// =============================================================================

/// Folds one sale's full effect into the customer and inventory aggregates.
///
/// The empty-container delta is gated on the category of the item *this*
/// sale references: only returnable containers leave empties with the
/// customer. A sale with no item moves no stock and no empties.
fn apply_sale_effects(snapshot: &mut Snapshot, sale: &Sale) -> CoreResult<()> {
    let sold_container = match sale.item_id.as_deref() {
        Some(item_id) => snapshot
            .item(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?
            .category
            .is_returnable_container(),
        None => false,
    };

    if let Some(customer_id) = sale.customer_id.as_deref() {
        let customer = snapshot
            .customer_mut(customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

        customer.total_balance += sale.amount - sale.amount_received;
        if sold_container {
            customer.empty_bottles_held += sale.quantity - sale.empties_collected;
        }
        if sale.empties_collected > 0 {
            customer.last_empties_collection = Some(sale.date);
        }
    }

    if let Some(item_id) = sale.item_id.as_deref() {
        let item = snapshot
            .item_mut(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        item.stock -= sale.quantity;
    }

    Ok(())
}

/// Backs one sale's full effect out of the customer and inventory
/// aggregates - the exact sign-mirror of [`apply_sale_effects`].
///
/// The `last_empties_collection` stamp is NOT restored: there is no prior
/// value recorded to restore it to. Reversibility is defined over the three
/// ledgers (balance, empties held, stock), and those cancel exactly.
fn reverse_sale_effects(snapshot: &mut Snapshot, sale: &Sale) -> CoreResult<()> {
    let sold_container = match sale.item_id.as_deref() {
        Some(item_id) => snapshot
            .item(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?
            .category
            .is_returnable_container(),
        None => false,
    };

    if let Some(customer_id) = sale.customer_id.as_deref() {
        let customer = snapshot
            .customer_mut(customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

        customer.total_balance -= sale.amount - sale.amount_received;
        if sold_container {
            customer.empty_bottles_held -= sale.quantity - sale.empties_collected;
        }
    }

    if let Some(item_id) = sale.item_id.as_deref() {
        let item = snapshot
            .item_mut(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        item.stock += sale.quantity;
    }

    Ok(())
}

// =============================================================================
// Sale Operations
// =============================================================================

/// Records a new sale.
///
/// Runs the collection classifier if the draft carries no explicit tag,
/// mints a UUID, applies the ledger effects, and appends the record.
/// Returns the new snapshot together with the created sale.
pub fn add_sale(snapshot: &Snapshot, draft: SaleDraft) -> CoreResult<(Snapshot, Sale)> {
    let mut next = snapshot.clone();

    let payment_for = classify_collection(
        &next.inventory,
        draft.item_id.as_deref(),
        draft.amount_received,
        draft.payment_for,
    );

    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        customer_id: draft.customer_id,
        salesman_id: draft.salesman_id,
        item_id: draft.item_id,
        quantity: draft.quantity,
        empties_collected: draft.empties_collected,
        amount: draft.amount,
        amount_received: draft.amount_received,
        date: draft.date,
        payment_method: draft.payment_method,
        payment_for,
        note: draft.note,
        created_at: Utc::now(),
    };

    apply_sale_effects(&mut next, &sale)?;

    debug!(
        sale_id = %sale.id,
        customer_id = ?sale.customer_id,
        amount = %sale.amount,
        received = %sale.amount_received,
        "Recorded sale"
    );

    next.sales.push(sale.clone());
    Ok((next, sale))
}

/// Rewrites an existing sale.
///
/// Expressed as an exact reversal of the old sale's effects followed by
/// application of the new values, in that order, against the same working
/// snapshot. When the customer or item reference changes between old and
/// new, reversal hits the *old* entities and application hits the *new*
/// ones - the two may be entirely different records.
pub fn update_sale(snapshot: &Snapshot, sale_id: &str, draft: SaleDraft) -> CoreResult<Snapshot> {
    let mut next = snapshot.clone();

    let pos = next
        .sales
        .iter()
        .position(|s| s.id == sale_id)
        .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;
    let old = next.sales[pos].clone();

    reverse_sale_effects(&mut next, &old)?;

    let payment_for = classify_collection(
        &next.inventory,
        draft.item_id.as_deref(),
        draft.amount_received,
        draft.payment_for,
    );

    let new_sale = Sale {
        id: old.id.clone(),
        customer_id: draft.customer_id,
        salesman_id: draft.salesman_id,
        item_id: draft.item_id,
        quantity: draft.quantity,
        empties_collected: draft.empties_collected,
        amount: draft.amount,
        amount_received: draft.amount_received,
        date: draft.date,
        payment_method: draft.payment_method,
        payment_for,
        note: draft.note,
        created_at: old.created_at,
    };

    apply_sale_effects(&mut next, &new_sale)?;

    debug!(sale_id = %sale_id, "Updated sale");

    next.sales[pos] = new_sale;
    Ok(next)
}

/// Deletes a sale, restoring the ledgers as if it had never existed.
pub fn delete_sale(snapshot: &Snapshot, sale_id: &str) -> CoreResult<Snapshot> {
    let mut next = snapshot.clone();

    let pos = next
        .sales
        .iter()
        .position(|s| s.id == sale_id)
        .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;
    let old = next.sales[pos].clone();

    reverse_sale_effects(&mut next, &old)?;
    next.sales.remove(pos);

    debug!(sale_id = %sale_id, "Deleted sale");
    Ok(next)
}

// =============================================================================
// Customer Lifecycle
// =============================================================================

/// Creates a customer.
///
/// A nonzero opening balance in the draft injects a synthetic
/// opening-balance sale (no item, nothing received, pending) dated `as_of`,
/// so the balance invariant holds from the customer's first day instead of
/// the starting debt being an unexplained ledger write.
pub fn add_customer(
    snapshot: &Snapshot,
    draft: CustomerDraft,
    as_of: NaiveDate,
) -> CoreResult<(Snapshot, Customer)> {
    let customer_id = Uuid::new_v4().to_string();
    let mut next = snapshot.clone();

    next.customers.push(Customer {
        id: customer_id.clone(),
        name: draft.name,
        phone: draft.phone,
        address: draft.address,
        total_balance: Money::zero(),
        empty_bottles_held: 0,
        delivery_frequency_days: draft.delivery_frequency_days,
        last_empties_collection: None,
        created_at: Utc::now(),
    });

    if let Some(opening) = draft.opening_balance.filter(|o| !o.is_zero()) {
        let (with_opening, _) = add_sale(
            &next,
            SaleDraft {
                customer_id: Some(customer_id.clone()),
                salesman_id: None,
                item_id: None,
                quantity: 0,
                empties_collected: 0,
                amount: opening,
                amount_received: Money::zero(),
                date: as_of,
                payment_method: PaymentMethod::Pending,
                payment_for: None,
                note: Some("Opening balance".to_string()),
            },
        )?;
        next = with_opening;
    }

    debug!(customer_id = %customer_id, "Added customer");

    let customer = next
        .customer(&customer_id)
        .cloned()
        .ok_or_else(|| CoreError::CustomerNotFound(customer_id))?;
    Ok((next, customer))
}

/// Removes a customer and their sale history.
///
/// This is account closure, not transaction undo: the goods really left
/// inventory, so nothing is reversed. The sales go with the account because
/// orphaned sales would re-enter reconciliation totals with no owning
/// ledger.
pub fn remove_customer(snapshot: &Snapshot, customer_id: &str) -> CoreResult<Snapshot> {
    let mut next = snapshot.clone();

    if next.customer(customer_id).is_none() {
        return Err(CoreError::CustomerNotFound(customer_id.to_string()));
    }

    next.customers.retain(|c| c.id != customer_id);
    next.sales
        .retain(|s| s.customer_id.as_deref() != Some(customer_id));

    debug!(customer_id = %customer_id, "Removed customer");
    Ok(next)
}

// =============================================================================
// Payment & Collection Operations
// =============================================================================

/// Records a payment against a customer's balance.
///
/// A payment is a payment-only sale: zero amount billed, the paid amount
/// received, so the balance moves down by exactly `amount`. `payment_for`
/// tags which collection account the payment settles (a customer paying
/// down their 19-litre account), which daily reconciliation buckets by.
pub fn record_payment(
    snapshot: &Snapshot,
    customer_id: &str,
    amount: Money,
    method: PaymentMethod,
    date: NaiveDate,
    payment_for: Option<CollectionCategory>,
) -> CoreResult<Snapshot> {
    let (next, _) = add_sale(
        snapshot,
        SaleDraft {
            customer_id: Some(customer_id.to_string()),
            salesman_id: None,
            item_id: None,
            quantity: 0,
            empties_collected: 0,
            amount: Money::zero(),
            amount_received: amount,
            date,
            payment_method: method,
            payment_for,
            note: Some("Payment received".to_string()),
        },
    )?;
    Ok(next)
}

/// Takes empty containers back from a customer without selling anything.
///
/// `item_id` names the container product the empties belong to; with zero
/// quantity the stock level is untouched, while the customer's empties held
/// drop by `count` and the collection date is stamped.
pub fn collect_empties(
    snapshot: &Snapshot,
    customer_id: &str,
    item_id: &str,
    count: i64,
    date: NaiveDate,
) -> CoreResult<Snapshot> {
    let (next, _) = add_sale(
        snapshot,
        SaleDraft {
            customer_id: Some(customer_id.to_string()),
            salesman_id: None,
            item_id: Some(item_id.to_string()),
            quantity: 0,
            empties_collected: count,
            amount: Money::zero(),
            amount_received: Money::zero(),
            date,
            payment_method: PaymentMethod::Cash,
            payment_for: None,
            note: Some("Empties collection".to_string()),
        },
    )?;
    Ok(next)
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// Applies a manual stock adjustment (received delivery, breakage,
/// correction). Additive, so it composes with sale-driven stock mutations
/// in any order without a reconciliation step.
pub fn adjust_stock(snapshot: &Snapshot, item_id: &str, adjustment: i64) -> CoreResult<Snapshot> {
    let mut next = snapshot.clone();

    let item = next
        .item_mut(item_id)
        .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
    item.stock += adjustment;

    debug!(item_id = %item_id, adjustment, stock = item.stock, "Adjusted stock");
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================
