//! # Console Façade
//!
//! The handful of calls the discount and schedule screens make, with the
//! configured currency and the UI's translator already wired in.
//!
//! ```text
//! Discount table row ──► Console::describe()        ──► label, colour, "15%"
//! Discount form save ──► Console::review_discount() ──► { isValid, errors }
//! Schedule page load ──► Console::load_schedule()   ──► Schedule
//! ```

use std::collections::HashMap;

use school_core::{
    format_discount_value, get_discount_type_label, validate_discount_data, BadgeColor, Discount,
    DiscountRecord, DiscountType, DiscountValidation, Schedule, Translator,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;

// =============================================================================
// Catalog
// =============================================================================

/// In-memory string table for callers that already hold their translations.
///
/// Missing keys translate to the key itself, so an incomplete table still
/// renders something readable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Catalog {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

// =============================================================================
// Discount Summary
// =============================================================================

/// Everything a discount table row shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSummary {
    pub symbol: String,
    pub name: String,
    pub type_label: String,
    pub color: BadgeColor,
    pub display_value: String,
}

// =============================================================================
// Console
// =============================================================================

pub struct Console<T> {
    config: ConsoleConfig,
    translator: T,
}

impl<T: Translator> Console<T> {
    pub fn new(config: ConsoleConfig, translator: T) -> Self {
        Console { config, translator }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Formats a discount value using the configured currency.
    pub fn format_discount(&self, value: f64, discount_type: Option<DiscountType>) -> String {
        format_discount_value(value, discount_type, Some(self.config.currency()))
    }

    pub fn discount_label(&self, discount_type: Option<DiscountType>) -> String {
        get_discount_type_label(discount_type, &self.translator)
    }

    pub fn describe(&self, discount: &Discount) -> DiscountSummary {
        DiscountSummary {
            symbol: discount.symbol.clone(),
            name: discount.name.clone(),
            type_label: self.discount_label(Some(discount.discount_type)),
            color: discount.color(),
            display_value: discount.display_value(Some(self.config.currency())),
        }
    }

    /// Validates a submitted discount form.
    pub fn review_discount(&self, record: &DiscountRecord) -> DiscountValidation {
        let validation = validate_discount_data(record);
        if !validation.is_valid {
            let fields: Vec<&str> = validation.errors.keys().map(|f| f.as_str()).collect();
            debug!(?fields, "Discount form rejected");
        }
        validation
    }

    /// Parses and validates a discount payload in one step.
    pub fn parse_discount(&self, json: &str) -> ConsoleResult<Discount> {
        Ok(Discount::from_json(json)?)
    }

    /// Builds the editable schedule from the API response.
    pub fn load_schedule(&self, json: &str) -> ConsoleResult<Schedule> {
        let schedule = Schedule::from_json(json)?;
        debug!(
            grade_id = ?schedule.grade_id,
            periods = schedule.period_count(),
            "Schedule loaded"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use school_core::{CoreError, DiscountField, Weekday};

    fn console(currency: &str) -> Console<Catalog> {
        let mut config = ConsoleConfig::default();
        config.display.currency = currency.to_string();
        let catalog: Catalog = [("percentage", "Percentage"), ("fixedAmount", "Fixed Amount")]
            .into_iter()
            .collect();
        Console::new(config, catalog)
    }

    #[test]
    fn test_catalog_falls_back_to_key() {
        let mut catalog = Catalog::new();
        catalog.insert("percentage", "نسبة مئوية");
        assert_eq!(catalog.translate("percentage"), "نسبة مئوية");
        assert_eq!(catalog.translate("fixedAmount"), "fixedAmount");
    }

    #[test]
    fn test_format_uses_configured_currency() {
        let console = console("USD");
        assert_eq!(console.format_discount(50.0, Some(DiscountType::Fixed)), "50 USD");
        assert_eq!(console.format_discount(20.0, Some(DiscountType::Percent)), "20%");
        assert_eq!(console.format_discount(3.0, DiscountType::from_tag("odd")), "3");
    }

    #[test]
    fn test_discount_label() {
        let console = console("EGP");
        assert_eq!(console.discount_label(Some(DiscountType::Percent)), "Percentage");
        assert_eq!(console.discount_label(Some(DiscountType::Fixed)), "Fixed Amount");
        assert_eq!(console.discount_label(None), "Fixed Amount");
    }

    #[test]
    fn test_closure_translator() {
        let console = Console::new(ConsoleConfig::default(), |key: &str| key.to_uppercase());
        assert_eq!(console.discount_label(Some(DiscountType::Percent)), "PERCENTAGE");
    }

    #[test]
    fn test_describe() {
        let console = console("EGP");
        let discount = Discount {
            symbol: "d-010".to_string(),
            name: "Staff child".to_string(),
            value: 300.0,
            discount_type: DiscountType::Fixed,
        };
        let summary = console.describe(&discount);
        assert_eq!(summary.type_label, "Fixed Amount");
        assert_eq!(summary.color, BadgeColor::Secondary);
        assert_eq!(summary.display_value, "300 EGP");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["typeLabel"], "Fixed Amount");
        assert_eq!(json["color"], "secondary");
    }

    #[test]
    fn test_review_discount() {
        let console = console("EGP");
        let record = DiscountRecord {
            symbol: Some("d-1".to_string()),
            name: None,
            value: Some(10.0),
            discount_type: Some("percent".to_string()),
        };
        let validation = console.review_discount(&record);
        assert!(!validation.is_valid);
        assert!(validation.error(DiscountField::Name).is_some());
    }

    #[test]
    fn test_parse_discount_errors_surface_as_core() {
        let console = console("EGP");
        let err = console
            .parse_discount(r#"{"symbol":"","name":"x","value":1,"discount_type":"fixed"}"#)
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Core(CoreError::Validation(_))));

        let ok = console
            .parse_discount(r#"{"symbol":"s","name":"x","value":1,"discount_type":"fixed"}"#)
            .unwrap();
        assert_eq!(ok.discount_type, DiscountType::Fixed);
    }

    #[test]
    fn test_load_schedule() {
        let console = console("EGP");
        let schedule = console
            .load_schedule(r#"{"gradeId":"g-4","gradeName":"Grade 4"}"#)
            .unwrap();
        assert!(schedule.is_valid());
        assert!(schedule.get_day_periods(Weekday::Thursday).is_empty());

        let err = console.load_schedule("not json").unwrap_err();
        assert!(matches!(err, ConsoleError::Core(CoreError::InvalidPayload(_))));
    }
}
