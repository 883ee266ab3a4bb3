//! # aqua-core: Pure Business Logic for AquaFlow
//!
//! This crate is the **heart** of AquaFlow, a management system for a
//! bottled-water distribution business. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       AquaFlow Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Frontend / Desktop Shell                    │   │
//! │  │     Sale forms ──► Customer cards ──► Daily report ──► Charts  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ collects input, renders output         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ aqua-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │ schedule  │  │ reconcile │  │ classify  │  │   │
//! │  │   │ add sale  │  │ due today │  │ cash/bank │  │ 19L / 6L  │  │   │
//! │  │   │ update    │  │ weekly    │  │ breakdown │  │ buckets   │  │   │
//! │  │   │ delete    │  │ schedule  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Snapshot in, Snapshot out              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Ledger Store (external)                         │   │
//! │  │          load() -> Snapshot, save(&Snapshot) -> ()              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Sale, InventoryItem, Snapshot, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`engine`] - The sale transaction engine and ledger operations
//! - [`classify`] - Payment category classifier (19L/6L revenue buckets)
//! - [`schedule`] - Delivery-due scheduling
//! - [`reconcile`] - Daily cash/bank reconciliation
//! - [`summary`] - Customer summaries, low-stock and outstanding reports
//! - [`audit`] - Derived-ledger verification and rebuild
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation maps an input snapshot to a new
//!    snapshot or a derived value - same input, same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paisa (i64), so applying
//!    and reversing a sale cancels exactly
//! 4. **Structural Reversibility**: update = reverse(old) + apply(new),
//!    delete = reverse(old); the derived ledgers can never drift
//! 5. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use aqua_core::engine::add_sale;
//! use aqua_core::money::Money;
//! use aqua_core::types::{PaymentMethod, SaleDraft, Snapshot};
//! use chrono::NaiveDate;
//!
//! let snapshot = Snapshot::default();
//!
//! // A counter sale: no customer, nothing kept on a balance
//! let draft = SaleDraft {
//!     customer_id: None,
//!     salesman_id: None,
//!     item_id: None,
//!     quantity: 0,
//!     empties_collected: 0,
//!     amount: Money::from_rupees(120),
//!     amount_received: Money::from_rupees(120),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     payment_method: PaymentMethod::Cash,
//!     payment_for: None,
//!     note: None,
//! };
//!
//! let (next, sale) = add_sale(&snapshot, draft).unwrap();
//! assert_eq!(next.sales.len(), 1);
//! assert_eq!(sale.amount_received, Money::from_rupees(120));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod classify;
pub mod engine;
pub mod error;
pub mod money;
pub mod reconcile;
pub mod schedule;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use aqua_core::Money` instead of
// `use aqua_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Ledger Store Contract
// =============================================================================

/// The persistence contract the core requires from the outside world.
///
/// The core never persists on its own: every mutating operation returns a
/// new [`Snapshot`], and writing it back is the caller's explicit, separate
/// step. `load` must return a self-consistent snapshot (run
/// [`audit::rebuild_customer_ledgers`] on foreign data first).
pub trait LedgerStore {
    type Error;

    /// Loads the full snapshot.
    fn load(&self) -> Result<Snapshot, Self::Error>;

    /// Persists the full snapshot. No partial writes.
    fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted on a single sale form.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
/// The engine itself computes with any value; this bounds user input.
pub const MAX_SALE_QUANTITY: i64 = 999;

/// Maximum delivery frequency the schedule form accepts, in days.
///
/// ## Business Reason
/// A cadence longer than a year is indistinguishable from on-demand;
/// customers like that are entered with frequency 0 instead.
pub const MAX_DELIVERY_FREQUENCY_DAYS: i64 = 365;
