//! # Domain Types
//!
//! Core domain types for the AquaFlow distribution ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Sale       │   │  InventoryItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  total_balance  │◄──│  customer_id?   │──►│  stock          │       │
//! │  │  empties_held   │   │  item_id?       │   │  category       │       │
//! │  └─────────────────┘   │  amount/received│   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Customer.total_balance and .empty_bottles_held and                    │
//! │  InventoryItem.stock are DERIVED ledgers: they always equal the        │
//! │  cumulative effect of the sale history. Only the engine writes them.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, minted by the engine
//! - Human-facing fields: (name, phone, ...) - mutable, never used as keys

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale or expense was settled.
///
/// `Pending` means nothing was received into cash or bank yet; the unpaid
/// portion lives on the customer's balance until a payment sale clears it.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Bank transfer or deposit.
    Bank,
    /// Nothing received yet; amount stays on the customer balance.
    Pending,
}

// =============================================================================
// Collection Category
// =============================================================================

/// Revenue bucket by container size, independent of whether the transaction
/// references an inventory item directly.
///
/// A payment-only sale (no item) can still carry an explicit tag, e.g. a
/// customer paying down the balance on their 19-litre account.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CollectionCategory {
    /// 19-litre container revenue.
    NineteenLitre,
    /// 6-litre container revenue.
    SixLitre,
}

impl CollectionCategory {
    /// Human-facing label used on reports and messages.
    pub const fn label(&self) -> &'static str {
        match self {
            CollectionCategory::NineteenLitre => "19Ltr Collection",
            CollectionCategory::SixLitre => "6Ltr Collection",
        }
    }
}

// =============================================================================
// Item Category
// =============================================================================

/// Inventory item categories.
///
/// `WaterBottle` is the returnable-container category: selling one puts an
/// empty in the customer's possession, collecting empties takes them back.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Returnable water container (19L, 6L, ...). Drives empty tracking.
    WaterBottle,
    /// Water dispensers and pumps.
    Dispenser,
    /// Caps, taps, stands and other non-returnable goods.
    Accessory,
}

impl ItemCategory {
    /// Whether selling this item leaves a returnable container with the
    /// customer.
    #[inline]
    pub const fn is_returnable_container(&self) -> bool {
        matches!(self, ItemCategory::WaterBottle)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A delivery customer.
///
/// `total_balance` and `empty_bottles_held` are derived ledgers: they must
/// always equal the cumulative effect of every sale recorded against this
/// customer. Only the ledger engine writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Delivery address.
    pub address: Option<String>,

    /// Amount the customer currently owes. Negative = customer in credit.
    pub total_balance: Money,

    /// Returnable containers currently in the customer's possession.
    pub empty_bottles_held: i64,

    /// Delivery cadence in days. 0 = on-demand, never auto-scheduled.
    pub delivery_frequency_days: i64,

    /// Date empties were last collected from this customer.
    #[ts(as = "Option<String>")]
    pub last_empties_collection: Option<NaiveDate>,

    /// When the customer record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Salesman
// =============================================================================

/// A delivery salesman. Referenced by sales and expenses for attribution;
/// carries no ledger of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Salesman {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name. The collection classifier pattern-matches this
    /// ("19 Ltr Bottle", "6 Litre Bottle", ...).
    pub name: String,

    /// Category; `WaterBottle` drives empty-container tracking.
    pub category: ItemCategory,

    /// Current stock level. Signed: sale deduction may legitimately drive
    /// it negative, and reporting surfaces that rather than the engine
    /// rejecting it.
    pub stock: i64,

    /// Unit selling price.
    pub selling_price: Money,

    /// Stock level at or below which the item shows up on the low-stock
    /// report.
    pub low_stock_threshold: i64,

    /// When the item record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
///
/// This is the unit the ledger engine applies and reverses. Several shapes
/// share this one record type:
///
/// - delivery sale: customer + item + quantity
/// - counter sale: no customer, item + quantity, paid in full
/// - payment-only: no item, `amount` zero, `amount_received` positive
/// - empties collection: no amounts, `empties_collected` positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4), minted by the engine.
    pub id: String,

    /// Owning customer; `None` = counter/walk-in sale.
    pub customer_id: Option<String>,

    /// Salesman who made the delivery, if any.
    pub salesman_id: Option<String>,

    /// Sold inventory item; `None` = manual/payment-only entry.
    pub item_id: Option<String>,

    /// Units sold.
    pub quantity: i64,

    /// Empty containers taken back from the customer in this transaction.
    pub empties_collected: i64,

    /// Total billed value of the sale.
    pub amount: Money,

    /// Cash/bank actually collected now. The unpaid remainder
    /// (`amount - amount_received`) goes on the customer's balance.
    pub amount_received: Money,

    /// Business day of the sale.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// How the received portion was settled.
    pub payment_method: PaymentMethod,

    /// Revenue bucket tag. Set explicitly by the caller or inferred once by
    /// the classifier at record time; never overwritten afterwards.
    pub payment_for: Option<CollectionCategory>,

    /// Free-form note ("Opening balance", "Payment received", ...).
    pub note: Option<String>,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a sale. The engine mints identity and
/// timestamps; everything else comes from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDraft {
    pub customer_id: Option<String>,
    pub salesman_id: Option<String>,
    pub item_id: Option<String>,
    pub quantity: i64,
    pub empties_collected: i64,
    pub amount: Money,
    pub amount_received: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub payment_for: Option<CollectionCategory>,
    pub note: Option<String>,
}

// =============================================================================
// Expense
// =============================================================================

/// A business expense. Read-only input to daily reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Free-form category name. "Salaries", "Home" and "Shop" are broken
    /// out on the daily report; everything else folds into the total.
    pub category: String,

    pub amount: Money,

    pub payment_method: PaymentMethod,

    /// Salesman the expense is attributed to, if any.
    pub salesman_id: Option<String>,

    pub note: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Daily Opening Balance
// =============================================================================

/// Authoritative opening cash/bank positions for one calendar day.
///
/// When present for a date, reconciliation uses these figures verbatim
/// instead of deriving the opening from the full prior history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyOpeningBalance {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub cash: Money,
    pub bank: Money,
}

// =============================================================================
// Customer Draft
// =============================================================================

/// Input for creating a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub delivery_frequency_days: i64,
    /// Starting debt carried over from before the system was introduced.
    /// Nonzero injects a synthetic opening-balance sale so the balance
    /// invariant holds from the customer's first day.
    pub opening_balance: Option<Money>,
}

// =============================================================================
// Snapshot
// =============================================================================

/// The full in-memory state of the business.
///
/// This is the value the Ledger Store loads and saves as a whole, and the
/// unit every engine operation consumes and produces. Operations never
/// mutate their input snapshot; they clone, transform, and return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub salesmen: Vec<Salesman>,
    pub inventory: Vec<InventoryItem>,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub opening_balances: Vec<DailyOpeningBalance>,
}

impl Snapshot {
    /// Looks up a customer by id.
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Looks up a customer by id, mutably.
    pub fn customer_mut(&mut self, id: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    /// Looks up an inventory item by id.
    pub fn item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// Looks up an inventory item by id, mutably.
    pub fn item_mut(&mut self, id: &str) -> Option<&mut InventoryItem> {
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    /// Looks up a sale by id.
    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Looks up the explicit opening balance record for a date.
    pub fn opening_balance(&self, date: NaiveDate) -> Option<&DailyOpeningBalance> {
        self.opening_balances.iter().find(|ob| ob.date == date)
    }

    /// All sales belonging to one customer.
    pub fn sales_for_customer<'a>(&'a self, customer_id: &'a str) -> impl Iterator<Item = &'a Sale> {
        self.sales
            .iter()
            .filter(move |s| s.customer_id.as_deref() == Some(customer_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
