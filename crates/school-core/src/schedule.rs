//! # Schedule Module
//!
//! A grade's weekly class timetable, edited in memory by the schedules
//! screen and handed back to the caller for transport.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Schedule (gradeId, gradeName)                                          │
//! │                                                                         │
//! │  Sunday     [ Period, Period, ... ]                                     │
//! │  Monday     [ Period, ... ]                                             │
//! │  Tuesday    [ ]                                                         │
//! │  Wednesday  [ Period ]                                                  │
//! │  Thursday   [ Period, Period ]                                          │
//! │                                                                         │
//! │  Slot order = position in the list. There is no slot index field;     │
//! │  remove/update address a period by its position.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Edit Operations
//! ```text
//! Form Action              Schedule Method           Effect
//! ───────────              ───────────────           ──────
//! Add row      ──────────► add_period()    ───────► periods.push(p)
//! Edit cell    ──────────► update_period() ───────► periods[i].merge(partial)
//! Delete row   ──────────► remove_period() ───────► periods.remove(i)
//! Render day   ──────────► get_day_periods() ─────► (read only)
//! Save         ──────────► to_payload()    ───────► plain record for the API
//! ```
//!
//! An unknown day or an out-of-range index is never an error. The call is a
//! no-op (logged at `debug`), because half-built rows are normal while a
//! teacher is still filling in the form. [`Schedule::is_valid`] is the
//! explicit gate before saving.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;

// =============================================================================
// Weekday
// =============================================================================

/// A day of the school week.
///
/// The school week is fixed at Sunday through Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Weekday {
    /// The school week in timetable order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
    ];

    /// Label used as the `day` key in schedule payloads.
    pub const fn label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Weekday::ALL.into_iter().find(|day| day.label() == label)
    }

    /// Maps a calendar weekday onto the school week.
    ///
    /// Friday and Saturday are not school days and map to `None`.
    ///
    /// ```rust
    /// use school_core::schedule::Weekday;
    ///
    /// assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), Some(Weekday::Sunday));
    /// assert_eq!(Weekday::from_chrono(chrono::Weekday::Fri), None);
    /// ```
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Sun => Some(Weekday::Sunday),
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri | chrono::Weekday::Sat => None,
        }
    }
}

impl AsRef<str> for Weekday {
    fn as_ref(&self) -> &str {
        self.label()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Period
// =============================================================================

/// One timetable slot.
///
/// The fields (subject, teacher, start/end time, room, ...) belong to the
/// backend. Whatever the server sends is kept as-is; only [`Period::merge`]
/// and [`Period::with`] assume an object, and turn anything else into one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(Value);

impl Default for Period {
    fn default() -> Self {
        Period::new()
    }
}

impl Period {
    pub fn new() -> Self {
        Period(Value::Object(Map::new()))
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ensure_object();
        if let Some(fields) = self.0.as_object_mut() {
            fields.insert(key.into(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The period's fields, if it is an object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Shallow merge: every field in `partial` overwrites the field of the
    /// same name here, all other fields are kept.
    ///
    /// A non-object `partial` carries no fields and changes nothing.
    pub fn merge(&mut self, partial: Period) {
        let Value::Object(incoming) = partial.0 else {
            debug!("Partial period is not an object, nothing merged");
            return;
        };
        self.ensure_object();
        if let Some(fields) = self.0.as_object_mut() {
            fields.extend(incoming);
        }
    }

    fn ensure_object(&mut self) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
    }
}

impl From<Map<String, Value>> for Period {
    fn from(fields: Map<String, Value>) -> Self {
        Period(Value::Object(fields))
    }
}

impl From<Value> for Period {
    fn from(value: Value) -> Self {
        Period(value)
    }
}

// =============================================================================
// Grade Id
// =============================================================================

/// Identifier of the grade that owns a schedule.
///
/// Backends send either a string or a numeric key; both are kept verbatim
/// and written back in the same form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeId {
    Text(String),
    Number(Number),
}

impl GradeId {
    /// `""` and `0` do not identify a grade.
    pub fn is_present(&self) -> bool {
        match self {
            GradeId::Text(id) => !id.is_empty(),
            GradeId::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        }
    }
}

impl fmt::Display for GradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeId::Text(id) => f.write_str(id),
            GradeId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for GradeId {
    fn from(id: &str) -> Self {
        GradeId::Text(id.to_string())
    }
}

impl From<String> for GradeId {
    fn from(id: String) -> Self {
        GradeId::Text(id)
    }
}

impl From<u64> for GradeId {
    fn from(id: u64) -> Self {
        GradeId::Number(Number::from(id))
    }
}

// =============================================================================
// Day Schedule
// =============================================================================

/// The ordered periods of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DaySchedule {
    /// Day label, normally a [`Weekday::label`].
    pub day: String,

    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub periods: Vec<Period>,
}

impl DaySchedule {
    pub fn empty(day: Weekday) -> Self {
        DaySchedule {
            day: day.label().to_string(),
            periods: Vec::new(),
        }
    }
}

// =============================================================================
// Wire Shapes
// =============================================================================

/// Constructor input, as received from the server or a blank form.
///
/// Every field is optional; missing ones fall back to the empty template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    #[serde(default)]
    #[ts(type = "string | number | null")]
    pub grade_id: Option<GradeId>,
    #[serde(default)]
    pub grade_name: Option<String>,
    #[serde(default)]
    pub days: Option<Vec<DaySchedule>>,
}

/// Snapshot handed to the API layer when saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[ts(type = "string | number | null")]
    pub grade_id: Option<GradeId>,
    pub grade_name: String,
    pub days: Vec<DaySchedule>,
}

impl SchedulePayload {
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// A grade's weekly timetable.
///
/// ## Invariants
/// - `days` is built once at construction and never gains or loses entries
/// - Period order within a day is insertion order
/// - Lookups by day label never fail; misses are no-ops
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub grade_id: Option<GradeId>,
    pub grade_name: String,
    pub days: Vec<DaySchedule>,
}

impl Default for Schedule {
    /// The empty template: five school days, no periods, no grade.
    fn default() -> Self {
        Schedule::new(ScheduleData::default())
    }
}

impl From<ScheduleData> for Schedule {
    fn from(data: ScheduleData) -> Self {
        Schedule::new(data)
    }
}

impl Schedule {
    /// Builds a schedule from server data or from scratch.
    ///
    /// Supplied `days` are taken verbatim, even if they do not match the
    /// school week. Without them, the five weekdays are created empty.
    ///
    /// ## Example
    /// ```rust
    /// use school_core::schedule::{Schedule, ScheduleData};
    ///
    /// let schedule = Schedule::new(ScheduleData::default());
    /// let days: Vec<&str> = schedule.days.iter().map(|d| d.day.as_str()).collect();
    /// assert_eq!(days, ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"]);
    /// assert!(schedule.grade_id.is_none());
    /// ```
    pub fn new(data: ScheduleData) -> Self {
        let days = data
            .days
            .unwrap_or_else(|| Weekday::ALL.into_iter().map(DaySchedule::empty).collect());

        Schedule {
            grade_id: data.grade_id,
            grade_name: data.grade_name.unwrap_or_default(),
            days,
        }
    }

    /// Parses a schedule payload received from the API.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: ScheduleData = serde_json::from_str(json)?;
        Ok(Schedule::new(data))
    }

    fn day(&self, day: &str) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    fn day_mut(&mut self, day: &str) -> Option<&mut DaySchedule> {
        self.days.iter_mut().find(|d| d.day == day)
    }

    /// Appends `period` to the end of `day`.
    pub fn add_period(&mut self, day: impl AsRef<str>, period: Period) {
        let day = day.as_ref();
        match self.day_mut(day) {
            Some(entry) => entry.periods.push(period),
            None => debug!(day = %day, "Unknown day, period not added"),
        }
    }

    /// Removes the period at `index`; later periods shift left.
    pub fn remove_period(&mut self, day: impl AsRef<str>, index: usize) {
        let day = day.as_ref();
        match self.day_mut(day) {
            Some(entry) if index < entry.periods.len() => {
                entry.periods.remove(index);
            }
            Some(_) => debug!(day = %day, index, "Period index out of range, nothing removed"),
            None => debug!(day = %day, "Unknown day, nothing removed"),
        }
    }

    /// Merges `partial` into the period at `index`.
    ///
    /// ```rust
    /// use school_core::schedule::{Period, Schedule, Weekday};
    ///
    /// let mut schedule = Schedule::default();
    /// schedule.add_period(Weekday::Monday, Period::new().with("subject", "Math").with("room", "A1"));
    /// schedule.update_period(Weekday::Monday, 0, Period::new().with("room", "B2"));
    ///
    /// let period = &schedule.get_day_periods(Weekday::Monday)[0];
    /// assert_eq!(period.get("room").unwrap(), "B2");
    /// assert_eq!(period.get("subject").unwrap(), "Math");
    /// ```
    pub fn update_period(&mut self, day: impl AsRef<str>, index: usize, partial: Period) {
        let day = day.as_ref();
        match self.day_mut(day) {
            Some(entry) => match entry.periods.get_mut(index) {
                Some(period) => period.merge(partial),
                None => debug!(day = %day, index, "Period index out of range, nothing updated"),
            },
            None => debug!(day = %day, "Unknown day, nothing updated"),
        }
    }

    /// Periods for `day`, or an empty slice if there is no such day.
    pub fn get_day_periods(&self, day: impl AsRef<str>) -> &[Period] {
        self.day(day.as_ref())
            .map(|d| d.periods.as_slice())
            .unwrap_or(&[])
    }

    /// Periods for the school day that `date` falls on.
    ///
    /// Fridays and Saturdays have no periods.
    pub fn periods_on(&self, date: NaiveDate) -> &[Period] {
        match Weekday::from_chrono(date.weekday()) {
            Some(day) => self.get_day_periods(day),
            None => &[],
        }
    }

    /// Total number of periods across the week.
    pub fn period_count(&self) -> usize {
        self.days.iter().map(|d| d.periods.len()).sum()
    }

    /// A schedule can be saved once it is tied to a grade.
    pub fn is_valid(&self) -> bool {
        let has_grade_id = self.grade_id.as_ref().is_some_and(GradeId::is_present);
        has_grade_id && !self.grade_name.is_empty()
    }

    /// Plain snapshot for transport.
    pub fn to_payload(&self) -> SchedulePayload {
        SchedulePayload {
            grade_id: self.grade_id.clone(),
            grade_name: self.grade_name.clone(),
            days: self.days.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn math() -> Period {
        Period::new()
            .with("subject", "Math")
            .with("teacher", "Mr. Adel")
            .with("room", "A1")
    }

    fn science() -> Period {
        Period::new().with("subject", "Science")
    }

    #[test]
    fn test_default_template() {
        let schedule = Schedule::default();
        assert_eq!(schedule.days.len(), 5);
        for (entry, weekday) in schedule.days.iter().zip(Weekday::ALL) {
            assert_eq!(entry.day, weekday.label());
            assert!(entry.periods.is_empty());
        }
        assert_eq!(schedule.grade_name, "");
        assert!(schedule.grade_id.is_none());
    }

    #[test]
    fn test_supplied_days_used_verbatim() {
        let data = ScheduleData {
            grade_id: Some(GradeId::from("g-1")),
            grade_name: Some("Grade 1".to_string()),
            days: Some(vec![DaySchedule {
                day: "Saturday".to_string(),
                periods: vec![math()],
            }]),
        };
        let schedule = Schedule::new(data);
        assert_eq!(schedule.days.len(), 1);
        assert_eq!(schedule.get_day_periods("Saturday"), &[math()]);
        assert!(schedule.get_day_periods(Weekday::Monday).is_empty());
    }

    #[test]
    fn test_add_period() {
        let mut schedule = Schedule::default();
        schedule.add_period("Monday", math());
        assert_eq!(schedule.get_day_periods("Monday"), &[math()]);

        schedule.add_period(Weekday::Monday, science());
        assert_eq!(schedule.get_day_periods("Monday"), &[math(), science()]);
    }

    #[test]
    fn test_add_period_unknown_day_is_noop() {
        let mut schedule = Schedule::default();
        let before = schedule.clone();
        schedule.add_period("NotADay", math());
        assert_eq!(schedule, before);
        assert_eq!(schedule.period_count(), 0);
    }

    #[test]
    fn test_remove_period_shifts_left() {
        let mut schedule = Schedule::default();
        schedule.add_period("Tuesday", math());
        schedule.add_period("Tuesday", science());
        schedule.remove_period("Tuesday", 0);
        assert_eq!(schedule.get_day_periods("Tuesday"), &[science()]);
    }

    #[test]
    fn test_remove_period_out_of_range_is_noop() {
        let mut schedule = Schedule::default();
        schedule.add_period("Monday", math());
        schedule.add_period("Monday", science());
        schedule.remove_period("Monday", 5);
        assert_eq!(schedule.get_day_periods("Monday").len(), 2);

        schedule.remove_period("Friday", 0);
        assert_eq!(schedule.period_count(), 2);
    }

    #[test]
    fn test_update_period_merges_fields() {
        let mut schedule = Schedule::default();
        schedule.add_period("Monday", math());
        schedule.update_period("Monday", 0, Period::new().with("room", "B2"));

        let period = &schedule.get_day_periods("Monday")[0];
        assert_eq!(period.get("room"), Some(&json!("B2")));
        assert_eq!(period.get("subject"), Some(&json!("Math")));
        assert_eq!(period.get("teacher"), Some(&json!("Mr. Adel")));
        assert_eq!(period.fields().map(Map::len), Some(3));
    }

    #[test]
    fn test_update_period_misses_are_noops() {
        let mut schedule = Schedule::default();
        schedule.add_period("Wednesday", math());
        let before = schedule.clone();

        schedule.update_period("Wednesday", 1, Period::new().with("room", "C3"));
        schedule.update_period("Someday", 0, Period::new().with("room", "C3"));
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_get_day_periods_unknown_day_is_empty() {
        let schedule = Schedule::default();
        assert!(schedule.get_day_periods("Funday").is_empty());
    }

    #[test]
    fn test_periods_on_date() {
        let mut schedule = Schedule::default();
        schedule.add_period(Weekday::Monday, math());

        // 2024-09-02 was a Monday, 2024-09-06 a Friday
        let monday = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let friday = NaiveDate::from_ymd_opt(2024, 9, 6).unwrap();
        assert_eq!(schedule.periods_on(monday), &[math()]);
        assert!(schedule.periods_on(friday).is_empty());
    }

    #[test]
    fn test_is_valid() {
        let mut schedule = Schedule::default();
        assert!(!schedule.is_valid());

        schedule.grade_name = "Grade 3".to_string();
        assert!(!schedule.is_valid());

        schedule.grade_id = Some(GradeId::from(""));
        assert!(!schedule.is_valid());

        schedule.grade_id = Some(GradeId::from("g-3"));
        assert!(schedule.is_valid());

        schedule.grade_name.clear();
        assert!(!schedule.is_valid());
    }

    #[test]
    fn test_payload_wire_shape() {
        let mut schedule = Schedule::new(ScheduleData {
            grade_id: Some(GradeId::from("g-7")),
            grade_name: Some("Grade 7".to_string()),
            days: None,
        });
        schedule.add_period("Sunday", science());

        let value = serde_json::to_value(schedule.to_payload()).unwrap();
        assert_eq!(value["gradeId"], "g-7");
        assert_eq!(value["gradeName"], "Grade 7");
        assert_eq!(value["days"][0]["day"], "Sunday");
        assert_eq!(value["days"][0]["periods"][0]["subject"], "Science");
        assert_eq!(value["days"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_from_json_server_payload() {
        let json = r#"{
            "gradeId": "g-2",
            "gradeName": "Grade 2",
            "days": [
                { "day": "Sunday", "periods": [ { "subject": "Arabic", "start": "08:00" } ] },
                { "day": "Monday", "periods": [] }
            ]
        }"#;
        let schedule = Schedule::from_json(json).unwrap();
        assert!(schedule.is_valid());
        assert_eq!(schedule.days.len(), 2);
        assert_eq!(
            schedule.get_day_periods("Sunday")[0].get("start"),
            Some(&json!("08:00"))
        );

        let reparsed = Schedule::from_json(&schedule.to_payload().to_json().unwrap()).unwrap();
        assert_eq!(reparsed, schedule);
    }

    #[test]
    fn test_from_json_partial_payload_uses_template() {
        let schedule = Schedule::from_json(r#"{ "gradeName": "KG1" }"#).unwrap();
        assert_eq!(schedule.grade_name, "KG1");
        assert_eq!(schedule.days.len(), 5);
        assert!(!schedule.is_valid());
    }

    #[test]
    fn test_from_json_keeps_non_object_period() {
        let json = r#"{ "days": [ { "day": "Sunday", "periods": [42, "free"] }, { "day": "Monday" } ] }"#;
        let mut schedule = Schedule::from_json(json).unwrap();

        let sunday = schedule.get_day_periods("Sunday");
        assert_eq!(sunday[0].as_value(), &json!(42));
        assert_eq!(sunday[0].fields(), None);
        assert_eq!(sunday[1].as_value(), &json!("free"));
        assert!(schedule.get_day_periods("Monday").is_empty());

        let value = serde_json::to_value(schedule.to_payload()).unwrap();
        assert_eq!(value["days"][0]["periods"], json!([42, "free"]));
        assert_eq!(value["days"][1]["periods"], json!([]));

        schedule.update_period("Sunday", 0, Period::new().with("subject", "Art"));
        assert_eq!(
            schedule.get_day_periods("Sunday")[0].as_value(),
            &json!({ "subject": "Art" })
        );
    }

    #[test]
    fn test_merge_non_object_partial_is_noop() {
        let mut period = science();
        period.merge(Period::from(json!("oops")));
        assert_eq!(period, science());
    }

    #[test]
    fn test_numeric_grade_id() {
        let schedule = Schedule::from_json(r#"{ "gradeId": 3, "gradeName": "Grade 3" }"#).unwrap();
        assert_eq!(schedule.grade_id, Some(GradeId::from(3_u64)));
        assert!(schedule.is_valid());
        assert_eq!(schedule.grade_id.as_ref().map(ToString::to_string).as_deref(), Some("3"));

        let value = serde_json::to_value(schedule.to_payload()).unwrap();
        assert_eq!(value["gradeId"], json!(3));

        let zero = Schedule::from_json(r#"{ "gradeId": 0, "gradeName": "Grade 3" }"#).unwrap();
        assert!(!zero.is_valid());
        let blank = Schedule::from_json(r#"{ "gradeId": "", "gradeName": "Grade 3" }"#).unwrap();
        assert!(!blank.is_valid());
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(Weekday::from_label("Thursday"), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_label("Friday"), None);
        assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
    }
}
