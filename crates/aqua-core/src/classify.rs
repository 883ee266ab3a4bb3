//! # Payment Category Classifier
//!
//! Maps a sale's inventory item to a revenue bucket (19-litre or 6-litre
//! collection). This is the single place container-size inference lives:
//! both the ledger engine (tagging a sale at record time) and daily
//! reconciliation (bucketing a sale retroactively) call through here, so the
//! two can never disagree on what counts as 19L revenue.
//!
//! ## Classification Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  classify_collection(inventory, item_id, amount_received, existing)     │
//! │                                                                         │
//! │  existing tag set?  ──────────► keep it (never overwrite)              │
//! │  no item referenced? ─────────► keep existing (payment-only entry)     │
//! │  nothing received?  ──────────► keep existing (no revenue to bucket)   │
//! │  item name ~ "19 ltr/litre/liter" ──► NineteenLitre                    │
//! │  item name ~  "6 ltr/litre/liter" ──► SixLitre                         │
//! │  anything else ───────────────► keep existing (still None)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::money::Money;
use crate::types::{CollectionCategory, InventoryItem};

// =============================================================================
// Container Size Patterns
// =============================================================================

/// Matches "19 Ltr", "19Litre", "19 liter", case-insensitive, with optional
/// whitespace before the unit. The leading guard rejects a size that is the
/// tail of a larger number ("619 Ltr" is neither bucket).
static NINETEEN_LITRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9])19\s*(?:ltr|litre|liter)").expect("valid 19-litre pattern")
});

/// Matches "6 Ltr", "6Litre", "6 liter", same rules as above.
static SIX_LITRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9])6\s*(?:ltr|litre|liter)").expect("valid 6-litre pattern")
});

// =============================================================================
// Classification
// =============================================================================

/// Infers the collection bucket from an item name alone.
///
/// The 19-litre pattern is checked first: "19 Ltr" also contains a "9 "
/// that could never match, but a name like "6x19 Ltr Pack" must land in the
/// 19-litre bucket, not the 6-litre one.
pub fn container_size(name: &str) -> Option<CollectionCategory> {
    if NINETEEN_LITRE.is_match(name) {
        Some(CollectionCategory::NineteenLitre)
    } else if SIX_LITRE.is_match(name) {
        Some(CollectionCategory::SixLitre)
    } else {
        None
    }
}

/// Classifies a sale's revenue bucket.
///
/// Idempotent: an explicit `existing` tag is always returned unchanged, and
/// re-running the classifier on an already-tagged sale is a no-op. Returns
/// `existing` (possibly `None`) when there is nothing to infer from: no item
/// reference, no money received, or an item name matching neither pattern.
///
/// Never errors: a dangling `item_id` is not this function's problem - the
/// engine validates references, the classifier just declines to tag.
pub fn classify_collection(
    inventory: &[InventoryItem],
    item_id: Option<&str>,
    amount_received: Money,
    existing: Option<CollectionCategory>,
) -> Option<CollectionCategory> {
    if existing.is_some() || !amount_received.is_positive() {
        return existing;
    }

    let Some(item_id) = item_id else {
        return existing;
    };

    match inventory.iter().find(|i| i.id == item_id) {
        Some(item) => container_size(&item.name).or(existing),
        None => existing,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
