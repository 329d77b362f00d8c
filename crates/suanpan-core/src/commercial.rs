//! # Commercial Calculator
//!
//! Pure pricing functions: a discount step and a tax step composed over an
//! exact decimal amount, producing a structured breakdown.
//!
//! ## ⚠ Discount Convention (read this before calling)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PAID-FRACTION DISCOUNTS (折 convention)                                │
//! │                                                                         │
//! │  discount_percent = 75  means  "the customer PAYS 75%"  (75折)          │
//! │                                                                         │
//! │  This is the INVERSE of the Western "25% off" phrasing:                 │
//! │    Western:  25% discount → pay 75%                                     │
//! │    折:       75折          → pay 75%                                    │
//! │                                                                         │
//! │  The parameter is the fraction still paid, NOT the reduction.           │
//! │  Renaming it would silently break every existing caller, so it is       │
//! │  documented here instead.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//! ```text
//! original ──► apply_discount (optional) ──► apply_tax (optional,
//! exclusive) ──► final_price rounded to 2 decimal places
//! ```
//! The order is fixed: discount always precedes tax, and the tax step in
//! [`calculate_price`] always applies to the post-discount price. There is
//! no configuration to reverse this.
//!
//! Negative or zero prices are NOT rejected - these are pure arithmetic
//! functions that propagate whatever they are given; range validation
//! belongs to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Decimal places on the final price of a breakdown.
const FINAL_PRICE_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Tax Mode
// =============================================================================

/// Whether a tax rate is added on top of a price or assumed already
/// embedded within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Tax added on top: `final = price + price × rate`.
    Exclusive,
    /// Tax already embedded; only the embedded amount is extracted and
    /// reported, the price itself stays unchanged.
    Inclusive,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Structured result of a full price calculation.
///
/// `final_price` is always present and rounded to 2 decimal places.
/// The intermediate fields are present only when the corresponding step
/// was requested, and carry full unrounded precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    /// Price before any step was applied.
    #[ts(type = "string")]
    pub original_price: Decimal,

    /// Paid fraction (0–1): 0.75 = the customer pays 75% (75折).
    #[ts(type = "string | null")]
    pub discount_rate: Option<Decimal>,

    /// Price after the discount step, unrounded.
    #[ts(type = "string | null")]
    pub discounted_price: Option<Decimal>,

    /// Tax rate (0–1): 0.05 = 5%.
    #[ts(type = "string | null")]
    pub tax_rate: Option<Decimal>,

    /// Tax charged on the post-discount price, unrounded.
    #[ts(type = "string | null")]
    pub tax_amount: Option<Decimal>,

    /// The amount the customer pays, rounded to 2 decimal places.
    #[ts(type = "string")]
    pub final_price: Decimal,
}

// =============================================================================
// Pricing Functions
// =============================================================================

/// Applies a paid-fraction discount.
///
/// `rate` is the fraction of the original price still PAID: 0.75 means
/// the customer pays 75% (a "75折" - see the module docs; this is the
/// inverse of "75% off").
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use suanpan_core::commercial::apply_discount;
///
/// let price = Decimal::new(200, 0);
/// let rate = Decimal::new(75, 2); // pay 75%
/// assert_eq!(apply_discount(price, rate), Decimal::new(15000, 2)); // 150.00
/// ```
pub fn apply_discount(price: Decimal, rate: Decimal) -> Decimal {
    price * rate
}

/// Computes tax for a price, returning `(final_price, tax_amount)`.
///
/// - [`TaxMode::Exclusive`]: `tax = price × rate`, `final = price + tax`.
/// - [`TaxMode::Inclusive`]: `tax = price − price ÷ (1 + rate)`, and
///   `final = price` UNCHANGED. Callers use inclusive mode purely to
///   disclose the tax embedded in a sticker price; the observed behavior
///   of never adjusting the price is intentional and load-bearing, even
///   though it reads like an inconsistency at first sight.
pub fn apply_tax(price: Decimal, rate: Decimal, mode: TaxMode) -> (Decimal, Decimal) {
    match mode {
        TaxMode::Exclusive => {
            let tax_amount = price * rate;
            (price + tax_amount, tax_amount)
        }
        TaxMode::Inclusive => {
            let tax_amount = price - price / (Decimal::ONE + rate);
            (price, tax_amount)
        }
    }
}

/// Full price calculation: optional discount, then optional exclusive tax.
///
/// Percentages are 0–100 values: `discount_percent = 75` means "pay 75%"
/// (paid-fraction convention, see module docs), `tax_percent = 5` means
/// "5% tax". Each is converted to a 0–1 rate before its step runs. The
/// steps are strictly sequential and order-fixed; tax is charged on the
/// post-discount running price.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use suanpan_core::commercial::calculate_price;
///
/// // $200 at 75折 plus 5% tax
/// let breakdown = calculate_price(
///     Decimal::new(200, 0),
///     Some(Decimal::new(75, 0)),
///     Some(Decimal::new(5, 0)),
/// );
/// assert_eq!(breakdown.final_price, Decimal::new(15750, 2)); // 157.50
/// ```
pub fn calculate_price(
    original: Decimal,
    discount_percent: Option<Decimal>,
    tax_percent: Option<Decimal>,
) -> PriceBreakdown {
    let mut breakdown = PriceBreakdown {
        original_price: original,
        discount_rate: None,
        discounted_price: None,
        tax_rate: None,
        tax_amount: None,
        final_price: Decimal::ZERO,
    };
    let mut current_price = original;

    if let Some(percent) = discount_percent {
        let rate = percent / Decimal::ONE_HUNDRED;
        breakdown.discount_rate = Some(rate);
        current_price = apply_discount(current_price, rate);
        breakdown.discounted_price = Some(current_price);
    }

    if let Some(percent) = tax_percent {
        let rate = percent / Decimal::ONE_HUNDRED;
        breakdown.tax_rate = Some(rate);
        let (taxed_price, tax_amount) = apply_tax(current_price, rate, TaxMode::Exclusive);
        breakdown.tax_amount = Some(tax_amount);
        current_price = taxed_price;
    }

    breakdown.final_price = current_price.round_dp(FINAL_PRICE_DECIMAL_PLACES);
    breakdown
}

// =============================================================================
// Unit Tests
// =============================================================================
