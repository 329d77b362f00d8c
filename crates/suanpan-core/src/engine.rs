//! # Calculator Engine
//!
//! A stateful four-function calculator following the classic
//! "running total, pending operator, fresh-entry flag" model.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CalculatorEngine States                             │
//! │                                                                         │
//! │              digit                    operator                          │
//! │  ┌───────────┐ ──► ┌──────────────┐ ──────► ┌─────────────────┐        │
//! │  │FreshEntry │     │ Accumulating │         │ PendingOperator │        │
//! │  │new_number │ ◄── │ (appending   │ ◄────── │ (lhs + op held, │        │
//! │  │  = true   │  =  │  to display) │  digit  │  awaiting rhs)  │        │
//! │  └───────────┘     └──────┬───────┘         └─────────────────┘        │
//! │        ▲                  │                                             │
//! │        │                  │ malformed literal / ÷0 / overflow           │
//! │        │                  ▼                                             │
//! │        │           ┌──────────────┐                                     │
//! │        └────────── │    Error     │  sticky: absorbed until clear()    │
//! │     digit / clear  │ (display =   │  or the next digit press, which    │
//! │     (auto-clear)   │  "Error...") │  auto-clears then applies itself   │
//! │                    └──────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Invariants
//! - `current_value` is always the exact decimal parse of `display`,
//!   except transiently while the error state holds an "Error..." message.
//! - The pending operand and operator live in ONE `Option<PendingOp>`:
//!   "operator set without stored value" is unrepresentable.
//! - All arithmetic is exact decimal; only the final display formatting
//!   step bounds precision (8 fractional digits). No binary-float drift
//!   across chained operations.
//! - Key presses never panic and never return errors. Faults land in the
//!   sticky error state and are read back through `display()`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Display text for a malformed literal or arithmetic overflow.
const DISPLAY_ERROR: &str = "Error";

/// Display text for division by a zero operand.
const DIVISION_BY_ZERO_ERROR: &str = "Error: Division by zero";

// =============================================================================
// Operation
// =============================================================================

/// The four binary operations the engine supports.
///
/// Evaluation is strictly left-to-right with no precedence:
/// `2 + 3 * 4 =` is `(2 + 3) * 4 = 20`, not `14`. A desk calculator,
/// not an expression parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Parses an operator key symbol. Returns `None` for anything outside
    /// `+ - * /` (the caller faults the engine on `None`).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Subtract),
            '*' => Some(Operation::Multiply),
            '/' => Some(Operation::Divide),
            _ => None,
        }
    }

    /// The key symbol for this operation.
    pub const fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }
}

// =============================================================================
// Pending Operation
// =============================================================================

/// The left operand and operator of a calculation awaiting its right operand.
///
/// Fused into one struct so the two can only exist together. The original
/// flag-soup model allowed `operation` without `stored_value`; this type
/// makes that state impossible to construct.
#[derive(Debug, Clone, Copy)]
struct PendingOp {
    lhs: Decimal,
    op: Operation,
}

// =============================================================================
// Calculator Engine
// =============================================================================

/// A four-function calculator state machine over exact decimal values.
///
/// One engine instance per logical session; the engine is deliberately
/// `!Sync`-agnostic plain data with no interior locking, because each
/// instance is owned by exactly one caller at a time.
///
/// ## Example
/// ```rust
/// use suanpan_core::engine::CalculatorEngine;
///
/// let mut engine = CalculatorEngine::new();
/// engine.press_digit('2');
/// engine.press_operator('+');
/// engine.press_digit('3');
/// engine.press_equals();
/// assert_eq!(engine.display(), "5");
/// ```
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    /// The user-visible text, or an "Error..." message under the error flag.
    display: String,
    /// Exact decimal parse of `display` (see module invariants).
    current_value: Decimal,
    /// Left operand + operator awaiting the right operand, if any.
    pending: Option<PendingOp>,
    /// True when the next digit starts a fresh entry instead of appending.
    new_number: bool,
    /// Sticky fault flag. Cleared only by `clear()`, `clear_entry()`, or
    /// the auto-clear built into the next key press.
    error: bool,
}

impl CalculatorEngine {
    /// Creates an engine in the identity state: display "0", no pending
    /// operation, fresh entry.
    pub fn new() -> Self {
        CalculatorEngine {
            display: "0".to_string(),
            current_value: Decimal::ZERO,
            pending: None,
            new_number: true,
            error: false,
        }
    }

    /// The user-visible display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether the engine is in the sticky error state.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The exact decimal value behind the display.
    ///
    /// Stale while `is_error()` - the display holds a message then, not
    /// a number.
    pub fn value(&self) -> Decimal {
        self.current_value
    }

    /// Handles a digit or decimal-point key.
    ///
    /// ## Behavior
    /// - In the error state: auto-clears first, then applies the digit to
    ///   the cleared state (a digit press is the recovery gesture).
    /// - Fresh entry: the digit starts a new display; a lone `.` becomes
    ///   `0.`.
    /// - Accumulating: appends, with two guards - a second `.` is
    ///   silently ignored, and a leading lone `0` is replaced (not
    ///   prefixed) by the first non-point digit, so `0` `5` shows `5`,
    ///   never `05`.
    pub fn press_digit(&mut self, digit: char) {
        self.recover_if_error();

        if self.new_number {
            self.display = if digit == '.' {
                "0.".to_string()
            } else {
                digit.to_string()
            };
            self.new_number = false;
        } else {
            if digit == '.' && self.display.contains('.') {
                return;
            }
            if self.display == "0" && digit != '.' {
                self.display = digit.to_string();
            } else {
                self.display.push(digit);
            }
        }

        // Re-parse after every edit. Unreachable for well-formed key
        // streams, but a malformed literal must never survive as
        // current_value, so the validation stays.
        match parse_display(&self.display) {
            Ok(value) => self.current_value = value,
            Err(_) => self.fault(DISPLAY_ERROR),
        }
    }

    /// Handles an operator key (`+ - * /`).
    ///
    /// If an operation is already pending and the user has typed a new
    /// operand since, the pending calculation runs first (operator
    /// chaining): `5 + 3 *` computes `8` before storing `*`. The current
    /// value then becomes the left operand of the new pending operation.
    ///
    /// In the error state the press is consumed as a clear and not
    /// applied. An unknown symbol faults the engine.
    pub fn press_operator(&mut self, symbol: char) {
        if self.recover_if_error() {
            return;
        }

        match parse_display(&self.display) {
            Ok(value) => self.current_value = value,
            Err(_) => {
                self.fault(DISPLAY_ERROR);
                return;
            }
        }

        // Chained operator: fold the pending calculation before storing
        // the next one. Skipped when no new operand was typed, so
        // `5 + - 3 =` re-arms with `-` instead of computing twice.
        if self.pending.is_some() && !self.new_number {
            self.calculate();
        }

        let Some(op) = Operation::from_symbol(symbol) else {
            self.fault(DISPLAY_ERROR);
            return;
        };

        // Unconditionally re-arm, even after a division-by-zero fault
        // above: the error flag is sticky, so every recovery path
        // discards this pending slot anyway.
        self.pending = Some(PendingOp {
            lhs: self.current_value,
            op,
        });
        self.new_number = true;
    }

    /// Handles the equals key.
    ///
    /// Runs the pending calculation and terminates the chain: the result
    /// stays on the display, but a following digit starts a fresh entry
    /// rather than appending. With nothing pending this is a no-op.
    pub fn press_equals(&mut self) {
        if self.recover_if_error() {
            return;
        }

        if self.pending.is_none() {
            return;
        }

        match parse_display(&self.display) {
            Ok(value) => self.current_value = value,
            Err(_) => {
                self.fault(DISPLAY_ERROR);
                return;
            }
        }

        self.calculate();
        self.pending = None;
        self.new_number = true;
    }

    /// Full reset to the identity state. Idempotent.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.current_value = Decimal::ZERO;
        self.pending = None;
        self.new_number = true;
        self.error = false;
    }

    /// Resets only the current entry, preserving any pending operation.
    ///
    /// Distinguishes "CE" from "C": after `5 + 7 CE 3 =` the display
    /// shows `8` because the `5 +` survived the entry reset.
    pub fn clear_entry(&mut self) {
        self.display = "0".to_string();
        self.current_value = Decimal::ZERO;
        self.new_number = true;
        self.error = false;
    }

    /// Removes the last character of the current entry.
    ///
    /// No-op in the error state or on a fresh entry (results are not
    /// editable). Deleting the final character resets the entry to `0`.
    pub fn backspace(&mut self) {
        if self.error || self.new_number {
            return;
        }

        if self.display.len() > 1 {
            self.display.pop();
        } else {
            self.display = "0".to_string();
            self.new_number = true;
        }

        // A truncated well-formed literal is still well-formed, so this
        // parse cannot fail in practice; the fallback resets to zero
        // WITHOUT entering the error state.
        match parse_display(&self.display) {
            Ok(value) => self.current_value = value,
            Err(_) => {
                self.display = "0".to_string();
                self.current_value = Decimal::ZERO;
            }
        }
    }

    /// The single error-recovery transition, invoked at the top of every
    /// key operation. Returns true if a fault was cleared.
    fn recover_if_error(&mut self) -> bool {
        if self.error {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Enters the sticky error state with the given display message.
    fn fault(&mut self, message: &str) {
        self.display = message.to_string();
        self.error = true;
    }

    /// Applies the pending operation to `(lhs, current_value)` in that
    /// left-to-right order. On success the result becomes the current
    /// value and the display. Division by a zero operand and decimal
    /// overflow fault the engine instead.
    fn calculate(&mut self) {
        let Some(PendingOp { lhs, op }) = self.pending else {
            return;
        };

        let result = match op {
            Operation::Add => lhs.checked_add(self.current_value),
            Operation::Subtract => lhs.checked_sub(self.current_value),
            Operation::Multiply => lhs.checked_mul(self.current_value),
            Operation::Divide => {
                if self.current_value.is_zero() {
                    self.fault(DIVISION_BY_ZERO_ERROR);
                    return;
                }
                lhs.checked_div(self.current_value)
            }
        };

        match result {
            Some(value) => {
                self.current_value = value;
                self.display = format_result(value);
            }
            // checked_* returned None: the exact result does not fit a
            // 96-bit decimal
            None => self.fault(DISPLAY_ERROR),
        }
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        CalculatorEngine::new()
    }
}

// =============================================================================
// Display Parsing & Formatting
// =============================================================================

/// Parses the display text into an exact decimal.
///
/// A transient trailing point (`0.`) is a legal display state while the
/// user is mid-entry; it is stripped before parsing.
fn parse_display(display: &str) -> Result<Decimal, rust_decimal::Error> {
    display.trim_end_matches('.').parse::<Decimal>()
}

/// Formats a computed result for display.
///
/// Integral values render as plain integers (`4`, never `4.0000`).
/// Fractional values are rounded to 8 decimal places (half-even) and
/// trailing zeros stripped, so `1 / 3` shows `0.33333333` and
/// `1 / 8` shows `0.125`. This bounds DISPLAY precision only - the
/// underlying value keeps full decimal precision for chaining.
fn format_result(value: Decimal) -> String {
    if value.fract().is_zero() {
        return value.trunc().normalize().to_string();
    }
    value.round_dp(8).normalize().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Test helper: presses a string of digit/point keys.
    fn press_digits(engine: &mut CalculatorEngine, keys: &str) {
        for key in keys.chars() {
            engine.press_digit(key);
        }
    }

    #[test]
    fn test_digit_entry_canonical_form() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "123.45");
        assert_eq!(engine.display(), "123.45");
        assert_eq!(engine.value(), dec!(123.45));
    }

    #[test]
    fn test_leading_zero_is_replaced_not_prefixed() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "05");
        assert_eq!(engine.display(), "5");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "1.2.3");
        assert_eq!(engine.display(), "1.23");
    }

    #[test]
    fn test_lone_point_starts_zero_point() {
        let mut engine = CalculatorEngine::new();
        engine.press_digit('.');
        assert_eq!(engine.display(), "0.");
        engine.press_digit('5');
        assert_eq!(engine.display(), "0.5");
        assert_eq!(engine.value(), dec!(0.5));
    }

    #[test]
    fn test_simple_addition() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "2");
        engine.press_operator('+');
        press_digits(&mut engine, "3");
        engine.press_equals();
        assert_eq!(engine.display(), "5");
        assert!(!engine.is_error());
    }

    #[test]
    fn test_chaining_is_left_to_right_without_precedence() {
        // 2 + 3 * 4 = must be (2 + 3) * 4 = 20, not 14
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "2");
        engine.press_operator('+');
        press_digits(&mut engine, "3");
        engine.press_operator('*');
        // The chained fold already happened: display shows 5
        assert_eq!(engine.display(), "5");
        press_digits(&mut engine, "4");
        engine.press_equals();
        assert_eq!(engine.display(), "20");
    }

    #[test]
    fn test_operator_rearm_without_new_operand_does_not_compute() {
        // 5 + - 3 = : the second operator replaces the first, no fold
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "5");
        engine.press_operator('+');
        engine.press_operator('-');
        press_digits(&mut engine, "3");
        engine.press_equals();
        assert_eq!(engine.display(), "2");
    }

    #[test]
    fn test_equals_terminates_chain() {
        // After =, a digit starts fresh instead of appending to the result
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "2");
        engine.press_operator('+');
        press_digits(&mut engine, "3");
        engine.press_equals();
        assert_eq!(engine.display(), "5");
        press_digits(&mut engine, "7");
        assert_eq!(engine.display(), "7");
        // And equals with nothing pending is a no-op
        engine.press_equals();
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_division_by_zero_is_sticky() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "5");
        engine.press_operator('/');
        press_digits(&mut engine, "0");
        engine.press_equals();
        assert_eq!(engine.display(), "Error: Division by zero");
        assert!(engine.is_error());

        // Equals and operators are absorbed while the fault holds
        engine.press_equals();
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_digit_press_recovers_from_error_and_applies_itself() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "5");
        engine.press_operator('/');
        press_digits(&mut engine, "0");
        engine.press_equals();
        assert!(engine.is_error());

        engine.press_digit('9');
        assert!(!engine.is_error());
        assert_eq!(engine.display(), "9");
        // The old chain is gone: 9 + 1 = 10, not influenced by the 5
        engine.press_operator('+');
        press_digits(&mut engine, "1");
        engine.press_equals();
        assert_eq!(engine.display(), "10");
    }

    #[test]
    fn test_operator_press_in_error_state_is_consumed_not_applied() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "1");
        engine.press_operator('/');
        press_digits(&mut engine, "0");
        engine.press_equals();
        assert!(engine.is_error());

        engine.press_operator('+');
        assert!(!engine.is_error());
        assert_eq!(engine.display(), "0");
        // Nothing pending: equals is a no-op
        engine.press_equals();
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_invalid_operator_symbol_faults() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "5");
        engine.press_operator('%');
        assert!(engine.is_error());
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "12");
        engine.press_operator('+');
        press_digits(&mut engine, "3");

        engine.clear();
        let once = engine.clone();
        engine.clear();

        assert_eq!(engine.display(), once.display());
        assert_eq!(engine.value(), once.value());
        assert_eq!(engine.is_error(), once.is_error());
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_clear_entry_preserves_pending_operation() {
        // 5 + 7 CE 3 = must give 8: the entry reset keeps the "5 +"
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "5");
        engine.press_operator('+');
        press_digits(&mut engine, "7");
        engine.clear_entry();
        assert_eq!(engine.display(), "0");
        press_digits(&mut engine, "3");
        engine.press_equals();
        assert_eq!(engine.display(), "8");
    }

    #[test]
    fn test_backspace_edits_entry() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "123");
        engine.backspace();
        assert_eq!(engine.display(), "12");
        assert_eq!(engine.value(), dec!(12));

        engine.backspace();
        engine.backspace();
        assert_eq!(engine.display(), "0");

        // Fresh entry after full deletion: next digit starts a new number
        press_digits(&mut engine, "7");
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_backspace_ignores_results_and_errors() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "6");
        engine.press_operator('*');
        press_digits(&mut engine, "7");
        engine.press_equals();
        assert_eq!(engine.display(), "42");

        // Result is not editable
        engine.backspace();
        assert_eq!(engine.display(), "42");

        press_digits(&mut engine, "1");
        engine.press_operator('/');
        press_digits(&mut engine, "0");
        engine.press_equals();
        assert!(engine.is_error());
        engine.backspace();
        assert!(engine.is_error());
        assert_eq!(engine.display(), "Error: Division by zero");
    }

    #[test]
    fn test_integral_result_has_no_fractional_part() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "8");
        engine.press_operator('/');
        press_digits(&mut engine, "2");
        engine.press_equals();
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_fractional_result_rounds_to_eight_places() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "1");
        engine.press_operator('/');
        press_digits(&mut engine, "3");
        engine.press_equals();
        assert_eq!(engine.display(), "0.33333333");
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "1");
        engine.press_operator('/');
        press_digits(&mut engine, "8");
        engine.press_equals();
        assert_eq!(engine.display(), "0.125");
    }

    #[test]
    fn test_exact_decimal_no_float_drift() {
        // The canonical float failure: 0.1 + 0.2
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "0.1");
        engine.press_operator('+');
        press_digits(&mut engine, "0.2");
        engine.press_equals();
        assert_eq!(engine.display(), "0.3");
    }

    #[test]
    fn test_decimal_point_after_operator_starts_fresh() {
        let mut engine = CalculatorEngine::new();
        press_digits(&mut engine, "2");
        engine.press_operator('+');
        engine.press_digit('.');
        assert_eq!(engine.display(), "0.");
        press_digits(&mut engine, "5");
        engine.press_equals();
        assert_eq!(engine.display(), "2.5");
    }

    #[test]
    fn test_operation_symbol_round_trip() {
        for symbol in ['+', '-', '*', '/'] {
            let op = Operation::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert!(Operation::from_symbol('^').is_none());
    }
}
