//! # school-core: Pure Business Logic for the School Console
//!
//! The logic behind the discounts and class-schedule screens, written as
//! pure functions and plain data with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     School Console Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Console (UI)                         │   │
//! │  │   Discount table ──► Discount form ──► Schedule editor         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TypeScript bindings (ts-rs)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                school-console (config, tracing)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ school-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐          ┌────────────────────┐       │   │
//! │  │   │      discount      │          │      schedule      │       │   │
//! │  │   │  amount / final    │          │  Schedule, Period  │       │   │
//! │  │   │  format / validate │          │  add/remove/update │       │   │
//! │  │   └────────────────────┘          └────────────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`discount`] - Discount math, formatting and form validation
//! - [`schedule`] - Weekly class timetable for a grade
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: config files, env vars and log output live in school-console
//! 3. **Degrade, Don't Fail**: unknown discount types and unknown days fall
//!    back to zero / no-op; validation is an explicit, separate step
//!
//! ## Example Usage
//!
//! ```rust
//! use school_core::discount::{calculate_final_amount, DiscountType};
//! use school_core::schedule::{Period, Schedule, Weekday};
//!
//! let fee = calculate_final_amount(1200.0, Some(DiscountType::Fixed), 200.0);
//! assert_eq!(fee, 1000.0);
//!
//! let mut schedule = Schedule::default();
//! schedule.add_period(Weekday::Sunday, Period::new().with("subject", "English"));
//! assert_eq!(schedule.get_day_periods(Weekday::Sunday).len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
mod lenient;
pub mod schedule;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{
    calculate_discount_amount, calculate_final_amount, format_discount_value,
    get_discount_type_color, get_discount_type_label, validate_discount_data, BadgeColor,
    Discount, DiscountField, DiscountRecord, DiscountSpec, DiscountType, DiscountValidation,
    Translator,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use schedule::{
    DaySchedule, GradeId, Period, Schedule, ScheduleData, SchedulePayload, Weekday,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency printed after fixed discount values when the caller gives none.
pub const DEFAULT_CURRENCY: &str = "EGP";
