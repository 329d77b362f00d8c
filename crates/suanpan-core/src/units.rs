//! # Unit Converter
//!
//! Registry-based conversion between named units, built for the Taiwan
//! land-measure units the product's users actually type.
//!
//! ## Two-Hop Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    from → base → to                                     │
//! │                                                                         │
//! │   convert(2, "公頃", "坪")                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   2 × 10000        = 20000 m²      (from.to_base)                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   20000 ÷ 3.30579  = 6049.9911…坪  (÷ to.to_base)                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   round to 4 decimal places                                             │
//! │                                                                         │
//! │  WHY: adding a unit needs ONE factor to the base, not a pairwise        │
//! │  table, and A→B→C equals A→C up to rounding as long as every factor     │
//! │  in a category is registered against the same base.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit names are matched exactly - case-sensitive, no aliasing or
//! normalization. The default registry names are the Chinese strings the
//! frontend sends verbatim.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Decimal places kept on every conversion result.
const RESULT_DECIMAL_PLACES: u32 = 4;

/// Category tag for area units (base unit: square meter).
pub const CATEGORY_AREA: &str = "面積";

// =============================================================================
// Unit Definition
// =============================================================================

/// A named unit with its exact multiplicative factor to the category base.
///
/// Within one category every `to_base` factor is expressed against the
/// same implicit base unit (area → square meters). The factors for the
/// traditional units are domain constants, not derivable:
/// 1 甲 ≈ 9699.17 m² is a surveyed legal value, not a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitDefinition {
    /// Unit name as the user types it (exact match key).
    pub name: String,
    /// Category tag; conversion across categories is refused.
    pub category: String,
    /// Exact factor to the category base unit.
    #[ts(type = "string")]
    pub to_base: Decimal,
}

// =============================================================================
// Unit Converter
// =============================================================================

/// Registry of named units grouped by category.
///
/// Stateless across calls besides the immutable registry: `convert` never
/// mutates, so failures cannot corrupt anything.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use suanpan_core::units::UnitConverter;
///
/// let converter = UnitConverter::new();
/// let ping = converter.convert(Decimal::ONE, "公頃", "坪").unwrap();
/// assert_eq!(ping.to_string(), "3024.9955");
/// ```
#[derive(Debug, Clone)]
pub struct UnitConverter {
    units: HashMap<String, UnitDefinition>,
}

impl UnitConverter {
    /// Creates a converter pre-loaded with the default area registry.
    pub fn new() -> Self {
        let mut converter = UnitConverter {
            units: HashMap::new(),
        };
        converter.register_default_units();
        converter
    }

    /// Creates an empty converter (for callers injecting their own
    /// registry configuration).
    pub fn empty() -> Self {
        UnitConverter {
            units: HashMap::new(),
        }
    }

    /// Registers the built-in area units, base = square meter (m²).
    ///
    /// The 甲/分 pair is the Taiwan land-measure system (1 分 = 0.1 甲);
    /// 畝 is the mainland-Chinese unit; 坪 is the everyday real-estate
    /// unit. Factors are the exact literals the product has always used.
    fn register_default_units(&mut self) {
        let square_meter = Decimal::ONE;
        self.register("平方公尺", CATEGORY_AREA, square_meter);
        self.register("m²", CATEGORY_AREA, square_meter);
        self.register("公頃", CATEGORY_AREA, Decimal::new(10000, 0));
        self.register("甲", CATEGORY_AREA, Decimal::new(969_917, 2));
        self.register("分", CATEGORY_AREA, Decimal::new(969_917, 3));
        self.register("畝", CATEGORY_AREA, Decimal::new(66667, 2));
        self.register("坪", CATEGORY_AREA, Decimal::new(330_579, 5));
        self.register("平方公里", CATEGORY_AREA, Decimal::new(1_000_000, 0));
        self.register("km²", CATEGORY_AREA, Decimal::new(1_000_000, 0));
    }

    /// Inserts or overwrites a unit definition.
    ///
    /// Last write wins - this is a configuration operation, not a
    /// transaction, and no uniqueness is enforced beyond the map key.
    pub fn register(&mut self, name: &str, category: &str, to_base: Decimal) {
        self.units.insert(
            name.to_string(),
            UnitDefinition {
                name: name.to_string(),
                category: category.to_string(),
                to_base,
            },
        );
    }

    /// Looks up a registered unit definition.
    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    /// Converts a value between two registered units of the same category.
    ///
    /// Two-hop: `value * from.to_base / to.to_base`, in exact decimal
    /// arithmetic, rounded to 4 decimal places (half-even).
    ///
    /// ## Errors
    /// - [`CoreError::UnknownUnit`] if either name is unregistered
    /// - [`CoreError::IncompatibleCategory`] if the categories differ
    pub fn convert(&self, value: Decimal, from_unit: &str, to_unit: &str) -> CoreResult<Decimal> {
        let from = self.get(from_unit).ok_or_else(|| CoreError::UnknownUnit {
            name: from_unit.to_string(),
        })?;
        let to = self.get(to_unit).ok_or_else(|| CoreError::UnknownUnit {
            name: to_unit.to_string(),
        })?;

        if from.category != to.category {
            return Err(CoreError::IncompatibleCategory {
                from: from.category.clone(),
                to: to.category.clone(),
            });
        }

        let base_value = value * from.to_base;
        let result = base_value / to.to_base;

        Ok(result.round_dp(RESULT_DECIMAL_PLACES))
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        UnitConverter::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
