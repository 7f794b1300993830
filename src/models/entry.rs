//! Timetable entry model.
//!
//! A [`TimetableEntry`] is a single scheduled (subject, faculty, room)
//! assignment occupying one slot key: the tuple
//! (academic_term_id, day_of_week, time_slot_id, timetable_type).
//! Regular and exam timetables share the same slot vocabulary but are
//! independent entry sets, never cross-checked against each other.
//!
//! An [`EntryCandidate`] is a proposed entry that has not yet passed
//! referential and conflict validation; only the
//! [`TimetableStore`](crate::store::TimetableStore) turns candidates
//! into entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DayOfWeek;

/// Kind of session occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Lecture,
    Lab,
    Tutorial,
    Exam,
    Seminar,
}

/// Which of the two independent timetables an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimetableType {
    Regular,
    Exam,
}

impl fmt::Display for TimetableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimetableType::Regular => "regular",
            TimetableType::Exam => "exam",
        })
    }
}

/// A committed, conflict-checked placement on the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Store-generated entry identifier.
    pub id: String,
    /// Owning academic term.
    pub academic_term_id: String,
    /// Referenced subject.
    pub subject_id: String,
    /// Referenced faculty member.
    pub faculty_id: String,
    /// Referenced room.
    pub room_id: String,
    /// Referenced time slot.
    pub time_slot_id: String,
    /// Day of week.
    pub day_of_week: DayOfWeek,
    /// Session kind.
    pub session_type: SessionType,
    /// Regular or exam timetable.
    pub timetable_type: TimetableType,
    /// Optional student group label (e.g. "CSE-A").
    pub student_group: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Drafts (`false`) still participate in conflict checks.
    pub is_confirmed: bool,
    /// Creation timestamp (UTC).
    pub created_at: NaiveDateTime,
    /// Last mutation timestamp (UTC).
    pub updated_at: NaiveDateTime,
}

impl TimetableEntry {
    /// Whether the entry occupies the given grid cell.
    pub fn occupies(&self, day: DayOfWeek, time_slot_id: &str) -> bool {
        self.day_of_week == day && self.time_slot_id == time_slot_id
    }
}

/// A proposed entry awaiting validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCandidate {
    /// Owning academic term.
    pub academic_term_id: String,
    /// Referenced subject.
    pub subject_id: String,
    /// Referenced faculty member.
    pub faculty_id: String,
    /// Referenced room.
    pub room_id: String,
    /// Referenced time slot.
    pub time_slot_id: String,
    /// Day of week.
    pub day_of_week: DayOfWeek,
    /// Session kind.
    pub session_type: SessionType,
    /// Regular or exam timetable.
    pub timetable_type: TimetableType,
    /// Optional student group label.
    pub student_group: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// New placements start as drafts.
    pub is_confirmed: bool,
}

impl EntryCandidate {
    /// Creates a draft lecture candidate for the given cell.
    pub fn new(
        academic_term_id: impl Into<String>,
        day_of_week: DayOfWeek,
        time_slot_id: impl Into<String>,
        timetable_type: TimetableType,
    ) -> Self {
        Self {
            academic_term_id: academic_term_id.into(),
            subject_id: String::new(),
            faculty_id: String::new(),
            room_id: String::new(),
            time_slot_id: time_slot_id.into(),
            day_of_week,
            session_type: SessionType::Lecture,
            timetable_type,
            student_group: None,
            notes: None,
            is_confirmed: false,
        }
    }

    /// Sets the subject reference.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = subject_id.into();
        self
    }

    /// Sets the faculty reference.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = faculty_id.into();
        self
    }

    /// Sets the room reference.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = room_id.into();
        self
    }

    /// Sets the session kind.
    pub fn with_session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = session_type;
        self
    }

    /// Sets the student group label.
    pub fn with_student_group(mut self, group: impl Into<String>) -> Self {
        self.student_group = Some(group.into());
        self
    }

    /// Sets notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Marks the candidate as confirmed (not a draft).
    pub fn confirmed(mut self) -> Self {
        self.is_confirmed = true;
        self
    }

    /// Whether all three resource references are filled in.
    pub fn is_fully_assigned(&self) -> bool {
        !self.subject_id.is_empty() && !self.faculty_id.is_empty() && !self.room_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = EntryCandidate::new("term-1", DayOfWeek::Monday, "09:40", TimetableType::Regular)
            .with_subject("s1")
            .with_faculty("f1")
            .with_room("r1")
            .with_student_group("CSE-A");

        assert!(c.is_fully_assigned());
        assert_eq!(c.session_type, SessionType::Lecture);
        assert!(!c.is_confirmed);
        assert_eq!(c.student_group.as_deref(), Some("CSE-A"));
    }

    #[test]
    fn test_candidate_partial_assignment() {
        let c = EntryCandidate::new("term-1", DayOfWeek::Monday, "09:40", TimetableType::Regular)
            .with_subject("s1");
        assert!(!c.is_fully_assigned());
    }

    #[test]
    fn test_enum_serde_forms() {
        assert_eq!(
            serde_json::to_string(&SessionType::Lecture).unwrap(),
            "\"lecture\""
        );
        assert_eq!(
            serde_json::to_string(&TimetableType::Regular).unwrap(),
            "\"regular\""
        );
        let t: TimetableType = serde_json::from_str("\"exam\"").unwrap();
        assert_eq!(t, TimetableType::Exam);
    }
}
