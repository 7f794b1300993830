//! Resource catalog: read-mostly reference data for an academic term.
//!
//! Holds the faculty, subjects, rooms, time slots, and terms that
//! timetable entries reference. Filtering is pure (non-mutating):
//! case-insensitive substring match on name/code fields plus exact
//! department match. Persistence and CRUD screens live outside the
//! core; the catalog is populated from whatever store backs them.

use crate::error::{PlacementError, ReferenceField};
use crate::models::{AcademicTerm, EntryCandidate, Faculty, Room, Subject, TimeSlot};

/// Filter for catalog list reads.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Exact department match, when set.
    pub department: Option<String>,
    /// Case-insensitive substring match on name/code fields, when set.
    pub search: Option<String>,
}

impl ResourceFilter {
    /// An empty filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restricts to one department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Adds a search string.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn search_matches(&self, fields: &[&str]) -> bool {
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            }
        }
    }

    fn department_matches(&self, department: &str) -> bool {
        match &self.department {
            None => true,
            Some(dept) => dept == department,
        }
    }
}

/// Reference data for scheduling: terms, faculty, subjects, rooms, slots.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    terms: Vec<AcademicTerm>,
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    rooms: Vec<Room>,
    time_slots: Vec<TimeSlot>,
}

impl ResourceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an academic term.
    pub fn with_term(mut self, term: AcademicTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculty.push(faculty);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a time slot. Slots are kept ordered by start time.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self.time_slots.sort_by_key(|s| s.start_time);
        self
    }

    /// Adds a batch of time slots.
    pub fn with_time_slots(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.time_slots.extend(slots);
        self.time_slots.sort_by_key(|s| s.start_time);
        self
    }

    // ---- point lookups ----

    /// Looks up a term by id.
    pub fn term(&self, id: &str) -> Option<&AcademicTerm> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// The at-most-one current term.
    pub fn current_term(&self) -> Option<&AcademicTerm> {
        self.terms.iter().find(|t| t.is_current)
    }

    /// Looks up a faculty member by id.
    pub fn faculty(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    /// Looks up a faculty member by display name.
    pub fn faculty_by_name(&self, name: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.name == name)
    }

    /// Looks up a subject by id.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Looks up a subject by grid code.
    pub fn subject_by_code(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.subject_code == code)
    }

    /// Looks up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Looks up a room by number or display name.
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|r| r.room_number == name || r.room_name == name)
    }

    /// Looks up a time slot by id.
    pub fn time_slot(&self, id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| s.id == id)
    }

    // ---- filtered reads ----

    /// Faculty matching a filter, in insertion order.
    pub fn list_faculty(&self, filter: &ResourceFilter) -> Vec<&Faculty> {
        self.faculty
            .iter()
            .filter(|f| {
                filter.department_matches(&f.department)
                    && filter.search_matches(&[&f.name, &f.employee_id, &f.designation])
            })
            .collect()
    }

    /// Subjects matching a filter, in insertion order.
    pub fn list_subjects(&self, filter: &ResourceFilter) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|s| {
                filter.department_matches(&s.department)
                    && filter.search_matches(&[&s.subject_code, &s.subject_name])
            })
            .collect()
    }

    /// Rooms matching a filter (rooms carry no department).
    pub fn list_rooms(&self, filter: &ResourceFilter) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| filter.search_matches(&[&r.room_number, &r.room_name, &r.building]))
            .collect()
    }

    /// Active time slots ordered by start time.
    pub fn time_slots(&self) -> Vec<&TimeSlot> {
        self.time_slots.iter().filter(|s| s.is_active).collect()
    }

    /// All terms, current first.
    pub fn terms(&self) -> Vec<&AcademicTerm> {
        let mut terms: Vec<&AcademicTerm> = self.terms.iter().collect();
        terms.sort_by_key(|t| !t.is_current);
        terms
    }

    /// Distinct departments across faculty and subjects.
    pub fn departments(&self) -> Vec<String> {
        let mut departments: Vec<String> = self
            .faculty
            .iter()
            .map(|f| f.department.clone())
            .chain(self.subjects.iter().map(|s| s.department.clone()))
            .collect();
        departments.sort();
        departments.dedup();
        departments
    }

    // ---- referential integrity ----

    /// Validates that every reference in a candidate resolves to an
    /// active/available record. Runs before conflict checking.
    pub fn validate_references(&self, candidate: &EntryCandidate) -> Result<(), PlacementError> {
        if self.term(&candidate.academic_term_id).is_none() {
            return Err(PlacementError::Referential {
                field: ReferenceField::Term,
                id: candidate.academic_term_id.clone(),
            });
        }
        match self.subject(&candidate.subject_id) {
            Some(subject) if subject.is_active => {}
            _ => {
                return Err(PlacementError::Referential {
                    field: ReferenceField::Subject,
                    id: candidate.subject_id.clone(),
                })
            }
        }
        match self.faculty(&candidate.faculty_id) {
            Some(faculty) if faculty.is_active => {}
            _ => {
                return Err(PlacementError::Referential {
                    field: ReferenceField::Faculty,
                    id: candidate.faculty_id.clone(),
                })
            }
        }
        match self.room(&candidate.room_id) {
            Some(room) if room.is_available => {}
            _ => {
                return Err(PlacementError::Referential {
                    field: ReferenceField::Room,
                    id: candidate.room_id.clone(),
                })
            }
        }
        match self.time_slot(&candidate.time_slot_id) {
            Some(slot) if slot.is_schedulable() => Ok(()),
            _ => Err(PlacementError::Referential {
                field: ReferenceField::TimeSlot,
                id: candidate.time_slot_id.clone(),
            }),
        }
    }
}
