//! Faculty model.

use serde::{Deserialize, Serialize};

/// A teaching faculty member.
///
/// Owned by the catalog; timetable entries reference faculty by id and
/// never own them. Inactive faculty cannot be placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Employee code (e.g. "EMP-014").
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Home department.
    pub department: String,
    /// Designation (e.g. "Assistant Professor").
    pub designation: String,
    /// Subject specializations.
    pub specializations: Vec<String>,
    /// Weekly teaching-hour cap.
    pub max_hours_per_week: u32,
    /// Inactive faculty are excluded from placement.
    pub is_active: bool,
}

impl Faculty {
    /// Creates a new active faculty member.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            name: name.into(),
            department: department.into(),
            designation: String::new(),
            specializations: Vec::new(),
            max_hours_per_week: 18,
            is_active: true,
        }
    }

    /// Sets the designation.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    /// Adds a specialization.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specializations.push(specialization.into());
        self
    }

    /// Sets the weekly hour cap.
    pub fn with_max_hours(mut self, hours: u32) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}
