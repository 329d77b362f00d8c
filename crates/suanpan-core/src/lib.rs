//! # suanpan-core: Pure Business Arithmetic for Suanpan
//!
//! This crate is the **heart** of Suanpan (算盤, "abacus"). It contains the
//! deterministic decimal calculation core as pure logic with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Suanpan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (Electron / TypeScript)               │   │
//! │  │    Calculator UI ──► Unit Converter UI ──► Pricing UI           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ line-JSON over stdio                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/ipc (request dispatcher)                   │   │
//! │  │    press_digit, convert_unit, calculate_price, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ suanpan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌───────────────┐  ┌───────────────────┐  │   │
//! │  │   │    engine     │  │     units     │  │    commercial     │  │   │
//! │  │   │ Calculator-   │  │ UnitConverter │  │ apply_discount    │  │   │
//! │  │   │ Engine (FSM)  │  │ 甲/分/坪/畝   │  │ apply_tax         │  │   │
//! │  │   └───────────────┘  └───────────────┘  └───────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ASYNC • NO FLOATS • EXACT DECIMAL ONLY           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three components are independent of one another - the engine never
//! calls the converter or the pricing functions. The dispatcher above maps
//! each incoming command to exactly one of them.
//!
//! ## Modules
//!
//! - [`engine`] - Stateful four-function calculator state machine
//! - [`units`] - Exact unit conversion (Taiwan land-measure units)
//! - [`commercial`] - Discount + tax pricing with structured breakdown
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Exact Decimal**: every value is a `rust_decimal::Decimal`; binary
//!    floats never appear. `0.1 + 0.2` is `0.3`, full stop.
//! 2. **Pure Functions**: converter and pricing are pure; the engine is one
//!    plain mutable value with no interior locking - one instance per
//!    session, owned by exactly one caller.
//! 3. **No I/O**: network, file system, and async are forbidden here.
//! 4. **Bounded Time**: every operation completes in effectively constant
//!    time; there is nothing to cancel or time out.
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use suanpan_core::{CalculatorEngine, UnitConverter, commercial};
//!
//! // Calculator: 2 + 3 * 4 = 20 (left-to-right, no precedence)
//! let mut engine = CalculatorEngine::new();
//! for key in ['2', '+', '3', '*', '4'] {
//!     match key {
//!         '0'..='9' | '.' => engine.press_digit(key),
//!         _ => engine.press_operator(key),
//!     }
//! }
//! engine.press_equals();
//! assert_eq!(engine.display(), "20");
//!
//! // Units: 1 公頃 in 坪
//! let converter = UnitConverter::new();
//! let ping = converter.convert(Decimal::ONE, "公頃", "坪").unwrap();
//! assert_eq!(ping.to_string(), "3024.9955");
//!
//! // Pricing: $200 at 75折 plus 5% tax
//! let breakdown = commercial::calculate_price(
//!     Decimal::new(200, 0),
//!     Some(Decimal::new(75, 0)),
//!     Some(Decimal::new(5, 0)),
//! );
//! assert_eq!(breakdown.final_price.to_string(), "157.50");
//! ```

pub mod commercial;
pub mod engine;
pub mod error;
pub mod units;

// Re-export the primary types at the crate root for convenient importing
pub use commercial::{PriceBreakdown, TaxMode};
pub use engine::{CalculatorEngine, Operation};
pub use error::{CoreError, CoreResult};
pub use units::{UnitConverter, UnitDefinition};
