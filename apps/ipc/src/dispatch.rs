//! # Request Dispatch
//!
//! Maps each [`Request`] to exactly one core call and wraps the outcome
//! in a [`Response`] envelope.
//!
//! ## Fault Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Engine actions     → ALWAYS succeed at the envelope level.             │
//! │                       Calculator faults (÷0, bad literal) are part      │
//! │                       of the display the user reads back.              │
//! │                                                                         │
//! │  Converter/pricing  → CoreError becomes the failure envelope:          │
//! │                       {"success":false,"error":"Unknown unit: …"}      │
//! │                                                                         │
//! │  Malformed keys     → failure envelope before the core is touched      │
//! │  (multi-char digit)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use suanpan_core::{commercial, CoreError, CoreResult, PriceBreakdown};

use crate::protocol::{Request, Response};
use crate::state::Session;

/// Handles one request against the session, producing one response.
///
/// Never panics and never returns an error: every fault is a well-formed
/// failure envelope, because the frontend can only read what comes back
/// on stdout.
pub fn handle_request(session: &mut Session, request: Request) -> Response {
    match request {
        Request::PressDigit { digit } => match single_key(&digit) {
            Some(key @ ('0'..='9' | '.')) => {
                debug!(key = %digit, "press_digit");
                session.engine.press_digit(key);
                engine_response(session)
            }
            _ => Response::failure(format!("Invalid digit key: {digit}")),
        },
        Request::PressOperator { operator } => match single_key(&operator) {
            // An invalid single-char symbol is the ENGINE's fault to
            // report (sticky error state), not a transport failure
            Some(key) => {
                debug!(key = %operator, "press_operator");
                session.engine.press_operator(key);
                engine_response(session)
            }
            None => Response::failure(format!("Invalid operator key: {operator}")),
        },
        Request::PressEquals => {
            debug!("press_equals");
            session.engine.press_equals();
            engine_response(session)
        }
        Request::Clear => {
            debug!("clear");
            session.engine.clear();
            engine_response(session)
        }
        Request::ClearEntry => {
            debug!("clear_entry");
            session.engine.clear_entry();
            engine_response(session)
        }
        Request::Backspace => {
            debug!("backspace");
            session.engine.backspace();
            engine_response(session)
        }
        Request::ConvertUnit {
            value,
            from_unit,
            to_unit,
        } => {
            debug!(%value, %from_unit, %to_unit, "convert_unit");
            match convert(session, &value, &from_unit, &to_unit) {
                Ok(result) => Response::convert(result),
                Err(err) => Response::failure(err.to_string()),
            }
        }
        Request::CalculatePrice {
            original,
            discount_percent,
            tax_percent,
        } => {
            debug!(%original, "calculate_price");
            match calculate_price(&original, discount_percent.as_deref(), tax_percent.as_deref()) {
                Ok(breakdown) => Response::price(&breakdown),
                Err(err) => Response::failure(err.to_string()),
            }
        }
    }
}

/// The engine envelope: current display plus the sticky fault flag.
fn engine_response(session: &Session) -> Response {
    Response::engine(session.engine.display(), session.engine.is_error())
}

/// Extracts the single key character, rejecting empty/multi-char strings.
fn single_key(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Some(key),
        _ => None,
    }
}

fn convert(session: &Session, value: &str, from_unit: &str, to_unit: &str) -> CoreResult<Decimal> {
    let value = parse_decimal(value)?;
    session.converter.convert(value, from_unit, to_unit)
}

fn calculate_price(
    original: &str,
    discount_percent: Option<&str>,
    tax_percent: Option<&str>,
) -> CoreResult<PriceBreakdown> {
    let original = parse_decimal(original)?;
    let discount_percent = discount_percent.map(parse_decimal).transpose()?;
    let tax_percent = tax_percent.map(parse_decimal).transpose()?;
    Ok(commercial::calculate_price(
        original,
        discount_percent,
        tax_percent,
    ))
}

/// Parses a wire string into an exact decimal.
fn parse_decimal(literal: &str) -> CoreResult<Decimal> {
    literal
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidNumber {
            literal: literal.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
