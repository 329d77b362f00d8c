//! # Wire Protocol
//!
//! Request and response types for the line-JSON transport.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One JSON object per line, both directions.                            │
//! │                                                                         │
//! │  → {"action":"press_digit","digit":"5"}                                 │
//! │  ← {"success":true,"display":"5","error":false}                         │
//! │                                                                         │
//! │  → {"action":"convert_unit","value":"1",                                │
//! │     "from_unit":"公頃","to_unit":"坪"}                                  │
//! │  ← {"success":true,"result":"3024.9955"}                                │
//! │                                                                         │
//! │  → {"action":"calculate_price","original":"200",                        │
//! │     "discount_percent":"75","tax_percent":"5"}                          │
//! │  ← {"success":true,"breakdown":{"original_price":"200",                 │
//! │     "discount_rate":"75%","discounted_price":"150.00",                  │
//! │     "tax_rate":"5%","tax_amount":"7.5000","final_price":"157.50"}}      │
//! │                                                                         │
//! │  ← {"success":false,"error":"Unknown unit: 英畝"}                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every numeric value travels as a STRING. JSON numbers are parsed as
//! binary floats by most consumers; strings keep the decimals exact end
//! to end.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use suanpan_core::PriceBreakdown;

// =============================================================================
// Requests
// =============================================================================

/// An incoming command, tagged by its `action` field.
///
/// An unknown action fails tag deserialization and is answered with the
/// invalid-request envelope - there is no catch-all variant on purpose.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// A digit or decimal-point key ("0".."9" or ".").
    PressDigit { digit: String },
    /// An operator key ("+", "-", "*", "/").
    PressOperator { operator: String },
    /// The equals key.
    PressEquals,
    /// Full reset (C).
    Clear,
    /// Entry-only reset (CE) - pending operation survives.
    ClearEntry,
    /// Delete the last typed character.
    Backspace,
    /// Convert a value between two registered units.
    ConvertUnit {
        value: String,
        from_unit: String,
        to_unit: String,
    },
    /// Full price calculation. Percentages are 0–100 values;
    /// `discount_percent` follows the paid-fraction (折) convention:
    /// "75" means the customer pays 75%.
    CalculatePrice {
        original: String,
        #[serde(default)]
        discount_percent: Option<String>,
        #[serde(default)]
        tax_percent: Option<String>,
    },
}

// =============================================================================
// Responses
// =============================================================================

/// Outgoing response envelope. Untagged: each flavor carries its own
/// `success` field, so the frontend branches on that alone.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Engine(EngineResponse),
    Convert(ConvertResponse),
    Price(PriceResponse),
    Failure(FailureResponse),
}

/// Calculator state after a key press. `display` is what the user sees;
/// `error` mirrors the engine's sticky fault flag (the call itself always
/// succeeds - faults live in the display, not in the envelope).
#[derive(Debug, Clone, Serialize)]
pub struct EngineResponse {
    pub success: bool,
    pub display: String,
    pub error: bool,
}

/// Result of a unit conversion, 4 decimal places, as an exact string.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub result: String,
}

/// Result of a price calculation.
#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub success: bool,
    pub breakdown: PriceBreakdownDto,
}

/// A failed request. `error` is the human-readable reason.
#[derive(Debug, Clone, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl Response {
    pub fn engine(display: &str, error: bool) -> Self {
        Response::Engine(EngineResponse {
            success: true,
            display: display.to_string(),
            error,
        })
    }

    pub fn convert(result: Decimal) -> Self {
        Response::Convert(ConvertResponse {
            success: true,
            result: result.to_string(),
        })
    }

    pub fn price(breakdown: &PriceBreakdown) -> Self {
        Response::Price(PriceResponse {
            success: true,
            breakdown: PriceBreakdownDto::from(breakdown),
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Response::Failure(FailureResponse {
            success: false,
            error: error.into(),
        })
    }
}

// =============================================================================
// Price Breakdown DTO
// =============================================================================

/// Frontend-facing rendering of a [`PriceBreakdown`].
///
/// Rates are shown as percent strings ("75%", "5%") because that is what
/// the UI prints verbatim; amounts stay exact decimal strings. Optional
/// fields are null when the corresponding step was not requested.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdownDto {
    pub original_price: String,
    pub discount_rate: Option<String>,
    pub discounted_price: Option<String>,
    pub tax_rate: Option<String>,
    pub tax_amount: Option<String>,
    pub final_price: String,
}

impl From<&PriceBreakdown> for PriceBreakdownDto {
    fn from(breakdown: &PriceBreakdown) -> Self {
        PriceBreakdownDto {
            original_price: breakdown.original_price.to_string(),
            discount_rate: breakdown.discount_rate.map(format_percent),
            discounted_price: breakdown.discounted_price.map(|p| p.to_string()),
            tax_rate: breakdown.tax_rate.map(format_percent),
            tax_amount: breakdown.tax_amount.map(|t| t.to_string()),
            final_price: breakdown.final_price.to_string(),
        }
    }
}

/// Renders a 0–1 rate as a percent string: 0.75 → "75%".
fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_lines_parse() {
        let request: Request = serde_json::from_str(r#"{"action":"press_digit","digit":"5"}"#).unwrap();
        assert!(matches!(request, Request::PressDigit { ref digit } if digit == "5"));

        let request: Request = serde_json::from_str(r#"{"action":"press_equals"}"#).unwrap();
        assert!(matches!(request, Request::PressEquals));

        let request: Request = serde_json::from_str(
            r#"{"action":"convert_unit","value":"2.5","from_unit":"公頃","to_unit":"坪"}"#,
        )
        .unwrap();
        assert!(matches!(request, Request::ConvertUnit { ref to_unit, .. } if to_unit == "坪"));
    }

    #[test]
    fn test_calculate_price_percent_fields_are_optional() {
        let request: Request =
            serde_json::from_str(r#"{"action":"calculate_price","original":"200"}"#).unwrap();
        let Request::CalculatePrice {
            discount_percent,
            tax_percent,
            ..
        } = request
        else {
            panic!("wrong variant");
        };
        assert_eq!(discount_percent, None);
        assert_eq!(tax_percent, None);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_str::<Request>(r#"{"action":"ai_chat","query":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let json = serde_json::to_string(&Response::failure("Unknown unit: 英畝")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"Unknown unit: 英畝"}"#);
    }

    #[test]
    fn test_engine_envelope_shape() {
        let json = serde_json::to_string(&Response::engine("5", false)).unwrap();
        assert_eq!(json, r#"{"success":true,"display":"5","error":false}"#);
    }

    #[test]
    fn test_percent_rendering_strips_trailing_zeros() {
        assert_eq!(format_percent(Decimal::new(75, 2)), "75%");
        assert_eq!(format_percent(Decimal::new(5, 2)), "5%");
        assert_eq!(format_percent(Decimal::new(825, 4)), "8.25%");
    }
}
