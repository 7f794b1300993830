//! Subject model.

use serde::{Deserialize, Serialize};

/// A taught subject (course offering within a department/semester).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Short code used on the grid (e.g. "DBMS", "PPS Lab").
    pub subject_code: String,
    /// Full name.
    pub subject_name: String,
    /// Owning department.
    pub department: String,
    /// Semester number the subject belongs to.
    pub semester: u8,
    /// Credit count.
    pub credits: u8,
    /// Weekly theory hours.
    pub theory_hours: u32,
    /// Weekly lab hours.
    pub lab_hours: u32,
    /// Inactive subjects are excluded from placement.
    pub is_active: bool,
}

impl Subject {
    /// Creates a new active subject.
    pub fn new(
        id: impl Into<String>,
        subject_code: impl Into<String>,
        subject_name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_code: subject_code.into(),
            subject_name: subject_name.into(),
            department: department.into(),
            semester: 1,
            credits: 3,
            theory_hours: 3,
            lab_hours: 0,
            is_active: true,
        }
    }

    /// Sets the semester number.
    pub fn with_semester(mut self, semester: u8) -> Self {
        self.semester = semester;
        self
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: u8) -> Self {
        self.credits = credits;
        self
    }

    /// Sets weekly theory and lab hours.
    pub fn with_hours(mut self, theory: u32, lab: u32) -> Self {
        self.theory_hours = theory;
        self.lab_hours = lab;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Whether the subject has a lab component.
    pub fn has_lab(&self) -> bool {
        self.lab_hours > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("s1", "DBMS", "Database Management Systems", "AIML")
            .with_semester(4)
            .with_credits(4)
            .with_hours(3, 2);

        assert_eq!(s.subject_code, "DBMS");
        assert_eq!(s.semester, 4);
        assert!(s.has_lab());
        assert!(s.is_active);
    }
}
