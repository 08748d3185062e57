//! # Discount Module
//!
//! Discount math, display formatting and form validation for the
//! discounts screen.
//!
//! ## Two Discount Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PERCENT                            FIXED                               │
//! │  ───────                            ─────                               │
//! │  value = share of the fee          value = currency amount              │
//! │  1000 × 10%   = 100 off            1000 - 150    = 150 off              │
//! │  1000 × 150%  = 1500 off (!)       100  - 150    = 100 off (capped)     │
//! │                                                                         │
//! │  The percent branch is NOT capped. The final amount is floored at      │
//! │  zero instead, so a 150% discount still ends at 0, never below.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unknown Types
//! Raw tags from forms and the backend go through [`DiscountType::from_tag`].
//! Anything other than `percent` / `fixed` becomes `None`, and every function
//! here treats `None` as "no discount" instead of failing.
//!
//! ## Usage
//! ```rust
//! use school_core::discount::{calculate_final_amount, format_discount_value, DiscountType};
//!
//! let fee = 1000.0;
//! let percent = Some(DiscountType::Percent);
//!
//! assert_eq!(calculate_final_amount(fee, percent, 10.0), 900.0);
//! assert_eq!(format_discount_value(10.0, percent, None), "10%");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::lenient;
use crate::DEFAULT_CURRENCY;

/// Translation key used for the percent label.
pub const PERCENTAGE_LABEL_KEY: &str = "percentage";

/// Translation key used for every non-percent label.
pub const FIXED_AMOUNT_LABEL_KEY: &str = "fixedAmount";

// =============================================================================
// Discount Type
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Value is a percentage of the original amount.
    Percent,
    /// Value is an absolute currency amount.
    Fixed,
}

impl DiscountType {
    /// Every accepted discount type, in form display order.
    pub const ALL: [DiscountType; 2] = [DiscountType::Percent, DiscountType::Fixed];

    /// Lenient boundary parse: `None` for anything but the exact tags.
    ///
    /// ```rust
    /// use school_core::discount::DiscountType;
    ///
    /// assert_eq!(DiscountType::from_tag("percent"), Some(DiscountType::Percent));
    /// assert_eq!(DiscountType::from_tag("Percent"), None);
    /// assert_eq!(DiscountType::from_tag("bogus"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "percent" => Some(DiscountType::Percent),
            "fixed" => Some(DiscountType::Fixed),
            other => {
                debug!(tag = %other, "Unrecognized discount type tag");
                None
            }
        }
    }

    /// Wire tag for this type.
    pub const fn as_tag(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Fixed => "fixed",
        }
    }

    /// Discount produced by `value` against `original_amount`.
    pub fn discount_amount(&self, original_amount: f64, value: f64) -> f64 {
        match self {
            DiscountType::Percent => original_amount * value / 100.0,
            DiscountType::Fixed => value.min(original_amount),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for DiscountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscountType::from_tag(s).ok_or_else(|| CoreError::UnknownDiscountType(s.to_string()))
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Returns the amount taken off `original_amount`.
///
/// ## Rules
/// - Percent: `original_amount * discount_value / 100`, not capped
/// - Fixed: `min(discount_value, original_amount)`
/// - Unknown (`None`): `0`
///
/// Negative inputs are not guarded; they flow through the arithmetic.
///
/// ## Example
/// ```rust
/// use school_core::discount::{calculate_discount_amount, DiscountType};
///
/// assert_eq!(calculate_discount_amount(200.0, Some(DiscountType::Percent), 150.0), 300.0);
/// assert_eq!(calculate_discount_amount(100.0, Some(DiscountType::Fixed), 150.0), 100.0);
/// assert_eq!(calculate_discount_amount(100.0, None, 50.0), 0.0);
/// ```
pub fn calculate_discount_amount(
    original_amount: f64,
    discount_type: Option<DiscountType>,
    discount_value: f64,
) -> f64 {
    match discount_type {
        Some(kind) => kind.discount_amount(original_amount, discount_value),
        None => 0.0,
    }
}

/// Returns the amount still owed after the discount, floored at zero.
///
/// ## User Workflow
/// ```text
/// Fee: 1000 EGP, Discount: 150%
///      │
///      ▼
/// calculate_discount_amount → 1500
///      │
///      ▼
/// 1000 - 1500 = -500 → floored → 0  ← THIS FUNCTION
/// ```
pub fn calculate_final_amount(
    original_amount: f64,
    discount_type: Option<DiscountType>,
    discount_value: f64,
) -> f64 {
    let discount = calculate_discount_amount(original_amount, discount_type, discount_value);
    (original_amount - discount).max(0.0)
}

/// Calculator input bundled as one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSpec {
    pub original_amount: f64,
    /// Unknown or missing tags read as `None` (no discount).
    #[serde(default, deserialize_with = "lenient::discount_type")]
    pub discount_type: Option<DiscountType>,
    pub discount_value: f64,
}

impl DiscountSpec {
    pub fn discount_amount(&self) -> f64 {
        calculate_discount_amount(self.original_amount, self.discount_type, self.discount_value)
    }

    pub fn final_amount(&self) -> f64 {
        calculate_final_amount(self.original_amount, self.discount_type, self.discount_value)
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats a discount value for tables and badges.
///
/// The value is printed as-is (no rounding). `currency` falls back to
/// [`DEFAULT_CURRENCY`] when the caller passes `None`.
///
/// ## Example
/// ```rust
/// use school_core::discount::{format_discount_value, DiscountType};
///
/// assert_eq!(format_discount_value(25.5, Some(DiscountType::Percent), None), "25.5%");
/// assert_eq!(format_discount_value(100.0, Some(DiscountType::Fixed), None), "100 EGP");
/// assert_eq!(format_discount_value(50.0, Some(DiscountType::Fixed), Some("USD")), "50 USD");
/// assert_eq!(format_discount_value(7.0, None, Some("USD")), "7");
/// ```
pub fn format_discount_value(
    value: f64,
    discount_type: Option<DiscountType>,
    currency: Option<&str>,
) -> String {
    match discount_type {
        Some(DiscountType::Percent) => format!("{}%", value),
        Some(DiscountType::Fixed) => {
            format!("{} {}", value, currency.unwrap_or(DEFAULT_CURRENCY))
        }
        None => value.to_string(),
    }
}

/// UI colour tag for a discount type badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Primary,
    Secondary,
}

/// Percent discounts get the primary colour; everything else is secondary.
pub fn get_discount_type_color(discount_type: Option<DiscountType>) -> BadgeColor {
    match discount_type {
        Some(DiscountType::Percent) => BadgeColor::Primary,
        _ => BadgeColor::Secondary,
    }
}

/// A string-keyed lookup supplied by the presentation layer.
///
/// Plain closures work too:
/// ```rust
/// use school_core::discount::{get_discount_type_label, DiscountType};
///
/// let t = |key: &str| format!("[{}]", key);
/// assert_eq!(get_discount_type_label(Some(DiscountType::Percent), &t), "[percentage]");
/// ```
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Localized label for a discount type.
///
/// Only two keys are ever requested: `percentage` for percent discounts and
/// `fixedAmount` for everything else, unknown types included.
pub fn get_discount_type_label<T>(discount_type: Option<DiscountType>, translator: &T) -> String
where
    T: Translator + ?Sized,
{
    match discount_type {
        Some(DiscountType::Percent) => translator.translate(PERCENTAGE_LABEL_KEY),
        _ => translator.translate(FIXED_AMOUNT_LABEL_KEY),
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A field on the discount form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountField {
    Symbol,
    Name,
    Value,
    DiscountType,
}

impl DiscountField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountField::Symbol => "symbol",
            DiscountField::Name => "name",
            DiscountField::Value => "value",
            DiscountField::DiscountType => "discount_type",
        }
    }
}

impl fmt::Display for DiscountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw discount form input, exactly as submitted.
///
/// Deserialization never rejects a field's content: a blank number box
/// (`""`) or a non-string tag arrives as `None`, so every problem surfaces
/// through [`validate_discount_data`] with its field key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Numbers and numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient::number")]
    #[ts(type = "number | string | null")]
    pub value: Option<f64>,
    /// Raw tag; anything but `percent` / `fixed` fails validation.
    #[serde(default, deserialize_with = "lenient::text")]
    pub discount_type: Option<String>,
}

/// Outcome of [`validate_discount_data`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<DiscountField, String>,
}

impl DiscountValidation {
    /// Message for `field`, if that field failed.
    pub fn error(&self, field: DiscountField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Validates every field of a discount form at once.
///
/// ## Rules
/// ```text
/// symbol         missing / blank after trim        → error
/// name           missing / blank after trim        → error
/// value          missing / NaN / zero / negative   → error
/// discount_type  missing / not percent|fixed       → error
/// ```
///
/// All four checks always run, so the form can highlight every bad field in
/// one pass. Percent values above 100 are accepted.
///
/// ## Example
/// ```rust
/// use school_core::discount::{validate_discount_data, DiscountField, DiscountRecord};
///
/// let record = DiscountRecord {
///     symbol: Some("d-001".to_string()),
///     name: Some("   ".to_string()),
///     value: Some(10.0),
///     discount_type: Some("percent".to_string()),
/// };
///
/// let result = validate_discount_data(&record);
/// assert!(!result.is_valid);
/// assert!(result.error(DiscountField::Name).is_some());
/// assert_eq!(result.errors.len(), 1);
/// ```
pub fn validate_discount_data(record: &DiscountRecord) -> DiscountValidation {
    let mut errors = BTreeMap::new();

    if is_blank(record.symbol.as_deref()) {
        let err = ValidationError::Required {
            field: DiscountField::Symbol.to_string(),
        };
        errors.insert(DiscountField::Symbol, err.to_string());
    }

    if is_blank(record.name.as_deref()) {
        let err = ValidationError::Required {
            field: DiscountField::Name.to_string(),
        };
        errors.insert(DiscountField::Name, err.to_string());
    }

    // `!(v > 0.0)` also rejects NaN
    match record.value {
        Some(v) if v > 0.0 => {}
        _ => {
            let err = ValidationError::MustBePositive {
                field: DiscountField::Value.to_string(),
            };
            errors.insert(DiscountField::Value, err.to_string());
        }
    }

    if record
        .discount_type
        .as_deref()
        .and_then(DiscountType::from_tag)
        .is_none()
    {
        let err = ValidationError::NotAllowed {
            field: DiscountField::DiscountType.to_string(),
            allowed: DiscountType::ALL.iter().map(|t| t.as_tag().to_string()).collect(),
        };
        errors.insert(DiscountField::DiscountType, err.to_string());
    }

    DiscountValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

// =============================================================================
// Validated Discount
// =============================================================================

/// A discount that passed validation.
///
/// Once a record is accepted its type is a real [`DiscountType`], so the
/// "unknown type" fallback never applies past this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    pub discount_type: DiscountType,
}

impl DiscountRecord {
    /// Validates the record and, if it passes, returns the typed discount.
    pub fn into_discount(self) -> Result<Discount, DiscountValidation> {
        let validation = validate_discount_data(&self);
        if !validation.is_valid {
            return Err(validation);
        }

        let discount_type = self.discount_type.as_deref().and_then(DiscountType::from_tag);
        match (self.symbol, self.name, self.value, discount_type) {
            (Some(symbol), Some(name), Some(value), Some(discount_type)) => Ok(Discount {
                symbol: symbol.trim().to_string(),
                name: name.trim().to_string(),
                value,
                discount_type,
            }),
            _ => Err(validation),
        }
    }
}

impl Discount {
    /// Parses and validates a discount form payload.
    ///
    /// On failure the first failing field (in form order) is reported.
    pub fn from_json(json: &str) -> CoreResult<Discount> {
        let record: DiscountRecord = serde_json::from_str(json)?;
        record.into_discount().map_err(|validation| {
            let field = validation
                .errors
                .keys()
                .next()
                .copied()
                .unwrap_or(DiscountField::Symbol);
            CoreError::Validation(field_error(field))
        })
    }

    pub fn discount_amount(&self, original_amount: f64) -> f64 {
        calculate_discount_amount(original_amount, Some(self.discount_type), self.value)
    }

    pub fn final_amount(&self, original_amount: f64) -> f64 {
        calculate_final_amount(original_amount, Some(self.discount_type), self.value)
    }

    pub fn display_value(&self, currency: Option<&str>) -> String {
        format_discount_value(self.value, Some(self.discount_type), currency)
    }

    pub fn color(&self) -> BadgeColor {
        get_discount_type_color(Some(self.discount_type))
    }
}

fn field_error(field: DiscountField) -> ValidationError {
    let name = field.to_string();
    match field {
        DiscountField::Symbol | DiscountField::Name => ValidationError::Required { field: name },
        DiscountField::Value => ValidationError::MustBePositive { field: name },
        DiscountField::DiscountType => ValidationError::NotAllowed {
            field: name,
            allowed: DiscountType::ALL.iter().map(|t| t.as_tag().to_string()).collect(),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
