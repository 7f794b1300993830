//! Academic term model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An academic term (semester instance).
///
/// At most one term carries `is_current` at a time; the catalog's
/// reads rely on that. Terms are immutable once referenced by
/// timetable entries, except for toggling `is_current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicTerm {
    /// Unique term identifier.
    pub id: String,
    /// Display name (e.g. "2025-26 Odd Semester").
    pub term_name: String,
    /// First day of the term.
    pub start_date: NaiveDate,
    /// Last day of the term.
    pub end_date: NaiveDate,
    /// Whether this is the active term.
    pub is_current: bool,
}

impl AcademicTerm {
    /// Creates a new term.
    pub fn new(
        id: impl Into<String>,
        term_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            term_name: term_name.into(),
            start_date,
            end_date,
            is_current: false,
        }
    }

    /// Marks this term as the current one.
    pub fn as_current(mut self) -> Self {
        self.is_current = true;
        self
    }
}
