//! Time slot and day-of-week models.
//!
//! The weekly grid is discrete: six teaching days crossed with a fixed,
//! ordered set of time slots. Slots are term-independent and reusable
//! across academic terms. There is no sub-slot overlap reasoning
//! anywhere in the crate; two placements collide only when they share
//! the exact (day, slot) cell.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A teaching day. Sunday is not schedulable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All teaching days in week order.
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Position within the week (Monday = 0).
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Capitalized label used in grid keys and user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Accepts both the capitalized grid form ("Monday") and the
    /// lowercase storage form ("monday").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            other => Err(format!("unknown day of week: '{other}'")),
        }
    }
}

/// A discrete teaching period within a day.
///
/// Slots are ordered by start time. Break slots (e.g. the lunch row)
/// occupy a grid position but are never assigned a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Display name (e.g. "09:40-10:40").
    pub slot_name: String,
    /// Period start.
    pub start_time: NaiveTime,
    /// Period end.
    pub end_time: NaiveTime,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Whether this slot is a break (lunch) row.
    pub is_break: bool,
    /// Inactive slots are hidden from scheduling.
    pub is_active: bool,
}

impl TimeSlot {
    /// Creates a new teaching slot.
    pub fn new(id: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        let duration = end_time.signed_duration_since(start_time);
        let minutes = duration.num_minutes().max(0) as u32;
        Self {
            id: id.into(),
            slot_name: format!(
                "{}-{}",
                start_time.format("%I:%M"),
                end_time.format("%I:%M")
            ),
            start_time,
            end_time,
            duration_minutes: minutes,
            is_break: false,
            is_active: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.slot_name = name.into();
        self
    }

    /// Marks the slot as a break row.
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// 12-hour start label ("09:40", "01:20") used in grid keys.
    pub fn start_label(&self) -> String {
        self.start_time.format("%I:%M").to_string()
    }

    /// Whether sessions may be placed in this slot.
    pub fn is_schedulable(&self) -> bool {
        self.is_active && !self.is_break
    }
}

/// Builds the grid key for a (day, slot) cell: `"{Day}-{HH:MM}"`.
///
/// This is the single key constructor shared by static fixtures, the
/// external solver wire format, and generated grids. All call sites
/// must go through it.
pub fn grid_key(day: DayOfWeek, slot: &TimeSlot) -> String {
    format!("{}-{}", day.label(), slot.start_label())
}

/// Parses a grid key back into a (day, slot) pair against a slot list.
///
/// Returns `None` when the day is unknown or no slot carries the given
/// start label.
pub fn parse_grid_key<'a>(
    key: &str,
    slots: &'a [TimeSlot],
) -> Option<(DayOfWeek, &'a TimeSlot)> {
    let (day_part, label) = key.split_once('-')?;
    let day = DayOfWeek::from_str(day_part).ok()?;
    let slot = slots.iter().find(|s| s.start_label() == label)?;
    Some((day, slot))
}

/// The standard seven-row teaching day: six one-hour periods around a
/// 40-minute lunch break. Slot ids reuse the 12-hour start label.
pub fn standard_slots() -> Vec<TimeSlot> {
    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("literal time")
    }

    vec![
        TimeSlot::new("09:40", t(9, 40), t(10, 40)),
        TimeSlot::new("10:40", t(10, 40), t(11, 40)),
        TimeSlot::new("11:40", t(11, 40), t(12, 40)),
        TimeSlot::new("12:40", t(12, 40), t(13, 20))
            .with_name("12:40-01:20")
            .as_break(),
        TimeSlot::new("01:20", t(13, 20), t(14, 20)),
        TimeSlot::new("02:20", t(14, 20), t(15, 20)),
        TimeSlot::new("03:20", t(15, 20), t(16, 20)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_ordering_and_position() {
        assert!(DayOfWeek::Monday < DayOfWeek::Saturday);
        assert_eq!(DayOfWeek::Monday.position(), 0);
        assert_eq!(DayOfWeek::Saturday.position(), 5);
    }

    #[test]
    fn test_day_parse_both_forms() {
        assert_eq!("Monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert!("Sunday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_day_serde_lowercase() {
        let json = serde_json::to_string(&DayOfWeek::Wednesday).unwrap();
        assert_eq!(json, "\"wednesday\"");
        let day: DayOfWeek = serde_json::from_str("\"friday\"").unwrap();
        assert_eq!(day, DayOfWeek::Friday);
    }

    #[test]
    fn test_slot_duration_and_name() {
        let slots = standard_slots();
        assert_eq!(slots[0].slot_name, "09:40-10:40");
        assert_eq!(slots[0].duration_minutes, 60);
        assert_eq!(slots[3].duration_minutes, 40);
        assert!(slots[3].is_break);
        assert!(!slots[3].is_schedulable());
    }

    #[test]
    fn test_start_label_is_twelve_hour() {
        let slots = standard_slots();
        // 13:20 renders as "01:20", matching the historical grid keys.
        assert_eq!(slots[4].start_label(), "01:20");
        assert_eq!(slots[0].start_label(), "09:40");
    }

    #[test]
    fn test_grid_key_round_trip() {
        let slots = standard_slots();
        let key = grid_key(DayOfWeek::Monday, &slots[0]);
        assert_eq!(key, "Monday-09:40");

        let (day, slot) = parse_grid_key(&key, &slots).unwrap();
        assert_eq!(day, DayOfWeek::Monday);
        assert_eq!(slot.id, "09:40");
    }

    #[test]
    fn test_parse_grid_key_afternoon() {
        let slots = standard_slots();
        let (day, slot) = parse_grid_key("Thursday-01:20", &slots).unwrap();
        assert_eq!(day, DayOfWeek::Thursday);
        assert_eq!(slot.id, "01:20");
    }

    #[test]
    fn test_parse_grid_key_rejects_unknown() {
        let slots = standard_slots();
        assert!(parse_grid_key("Sunday-09:40", &slots).is_none());
        assert!(parse_grid_key("Monday-08:00", &slots).is_none());
        assert!(parse_grid_key("garbage", &slots).is_none());
    }

    #[test]
    fn test_standard_slots_ordered() {
        let slots = standard_slots();
        assert_eq!(slots.len(), 7);
        for pair in slots.windows(2) {
            assert!(pair[0].start_time < pair[1].start_time);
        }
        assert_eq!(slots.iter().filter(|s| s.is_schedulable()).count(), 6);
    }
}
