//! Authoritative mutable collection of timetable entries.
//!
//! A store is scoped to one (academic term, timetable type) pair. Every
//! mutation is gated: referential integrity first, then conflict
//! checking, then the write. Validation happens in full before any
//! state changes, so no intermediate state is observable where two
//! entries share a slot key illegally, and any rejection leaves the
//! store byte-for-byte unchanged.
//!
//! The store also carries a revision counter, bumped on every
//! successful mutation. A multi-editor deployment backed by a remote
//! database would use it as the optimistic-concurrency anchor:
//! re-validate against the freshest state at commit time and reject
//! stale writes as conflicts. The core itself is single-threaded and
//! event-driven; nothing here spawns or blocks.

use chrono::Utc;
use tracing::debug;

use crate::catalog::ResourceCatalog;
use crate::conflict::check_placement;
use crate::error::{PlacementError, ReferenceField};
use crate::models::{DayOfWeek, EntryCandidate, TimetableEntry, TimetableType};

/// Conflict-gated entry collection for one term and timetable type.
#[derive(Debug, Clone)]
pub struct TimetableStore {
    academic_term_id: String,
    timetable_type: TimetableType,
    entries: Vec<TimetableEntry>,
    /// Slot id → position, captured from the catalog's slot order.
    slot_positions: Vec<String>,
    next_id: u64,
    revision: u64,
}

impl TimetableStore {
    /// Creates an empty store scoped to a term and timetable type.
    ///
    /// The catalog's active slot order is captured once so queries can
    /// sort by slot start time without re-consulting the catalog.
    pub fn new(
        academic_term_id: impl Into<String>,
        timetable_type: TimetableType,
        catalog: &ResourceCatalog,
    ) -> Self {
        Self {
            academic_term_id: academic_term_id.into(),
            timetable_type,
            entries: Vec::new(),
            slot_positions: catalog.time_slots().iter().map(|s| s.id.clone()).collect(),
            next_id: 1,
            revision: 0,
        }
    }

    /// The owning term id.
    pub fn academic_term_id(&self) -> &str {
        &self.academic_term_id
    }

    /// The timetable type this store holds.
    pub fn timetable_type(&self) -> TimetableType {
        self.timetable_type
    }

    /// Monotonic counter, bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The first entry occupying a grid cell, if any.
    pub fn entry_at(&self, day: DayOfWeek, time_slot_id: &str) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.occupies(day, time_slot_id))
    }

    /// Entries matching the optional day/slot filters, ordered by
    /// day-of-week then slot start position.
    pub fn query(&self, day: Option<DayOfWeek>, time_slot_id: Option<&str>) -> Vec<&TimetableEntry> {
        let mut matched: Vec<&TimetableEntry> = self
            .entries
            .iter()
            .filter(|e| day.map_or(true, |d| e.day_of_week == d))
            .filter(|e| time_slot_id.map_or(true, |s| e.time_slot_id == s))
            .collect();
        matched.sort_by_key(|e| (e.day_of_week, self.slot_position(&e.time_slot_id)));
        matched
    }

    fn slot_position(&self, slot_id: &str) -> usize {
        self.slot_positions
            .iter()
            .position(|id| id == slot_id)
            .unwrap_or(usize::MAX)
    }

    /// Validates and inserts a candidate.
    ///
    /// Rejection order: store-scope checks (term, then timetable
    /// type), completeness, referential integrity, conflicts. On
    /// success the entry id is generated and the created entry
    /// returned.
    pub fn insert(
        &mut self,
        candidate: EntryCandidate,
        catalog: &ResourceCatalog,
    ) -> Result<&TimetableEntry, PlacementError> {
        if candidate.academic_term_id != self.academic_term_id {
            return Err(PlacementError::Referential {
                field: ReferenceField::Term,
                id: candidate.academic_term_id,
            });
        }
        if candidate.timetable_type != self.timetable_type {
            return Err(PlacementError::Referential {
                field: ReferenceField::TimetableType,
                id: candidate.timetable_type.to_string(),
            });
        }
        let missing = missing_references(&candidate);
        if !missing.is_empty() {
            debug!(?missing, "placement rejected: incomplete assignment");
            return Err(PlacementError::Incomplete { missing });
        }
        catalog.validate_references(&candidate)?;
        if let Err(conflict) = check_placement(&candidate, &self.entries, None) {
            debug!(%conflict, "placement rejected");
            return Err(PlacementError::Conflict(conflict));
        }

        let now = Utc::now().naive_utc();
        let entry = TimetableEntry {
            id: format!("tt-{}", self.next_id),
            academic_term_id: candidate.academic_term_id,
            subject_id: candidate.subject_id,
            faculty_id: candidate.faculty_id,
            room_id: candidate.room_id,
            time_slot_id: candidate.time_slot_id,
            day_of_week: candidate.day_of_week,
            session_type: candidate.session_type,
            timetable_type: candidate.timetable_type,
            student_group: candidate.student_group,
            notes: candidate.notes,
            is_confirmed: candidate.is_confirmed,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.revision += 1;
        let index = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[index])
    }

    /// Moves an existing entry to a new (day, slot) cell.
    ///
    /// Treated as a delete+insert check against the target, excluding
    /// the entry's own current placement. Moving an entry onto the cell
    /// it already occupies succeeds and changes nothing.
    pub fn move_entry(
        &mut self,
        id: &str,
        day: DayOfWeek,
        time_slot_id: &str,
        catalog: &ResourceCatalog,
    ) -> Result<&TimetableEntry, PlacementError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PlacementError::NotFound { id: id.to_string() })?;

        if self.entries[index].occupies(day, time_slot_id) {
            return Ok(&self.entries[index]);
        }

        match catalog.time_slot(time_slot_id) {
            Some(slot) if slot.is_schedulable() => {}
            _ => {
                return Err(PlacementError::Referential {
                    field: ReferenceField::TimeSlot,
                    id: time_slot_id.to_string(),
                })
            }
        }

        let probe = probe_for_move(&self.entries[index], day, time_slot_id);
        if let Err(conflict) = check_placement(&probe, &self.entries, Some(id)) {
            debug!(%conflict, entry = id, "move rejected");
            return Err(PlacementError::Conflict(conflict));
        }

        let entry = &mut self.entries[index];
        entry.day_of_week = day;
        entry.time_slot_id = time_slot_id.to_string();
        entry.updated_at = Utc::now().naive_utc();
        self.revision += 1;
        Ok(&self.entries[index])
    }

    /// Removes an entry by id, returning it.
    pub fn remove(&mut self, id: &str) -> Result<TimetableEntry, PlacementError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PlacementError::NotFound { id: id.to_string() })?;
        self.revision += 1;
        Ok(self.entries.remove(index))
    }
}

fn missing_references(candidate: &EntryCandidate) -> Vec<ReferenceField> {
    let mut missing = Vec::new();
    if candidate.subject_id.is_empty() {
        missing.push(ReferenceField::Subject);
    }
    if candidate.faculty_id.is_empty() {
        missing.push(ReferenceField::Faculty);
    }
    if candidate.room_id.is_empty() {
        missing.push(ReferenceField::Room);
    }
    missing
}

/// Projects an entry onto a target cell for conflict checking.
fn probe_for_move(entry: &TimetableEntry, day: DayOfWeek, time_slot_id: &str) -> EntryCandidate {
    let mut probe = EntryCandidate::new(
        entry.academic_term_id.clone(),
        day,
        time_slot_id,
        entry.timetable_type,
    )
    .with_subject(entry.subject_id.clone())
    .with_faculty(entry.faculty_id.clone())
    .with_room(entry.room_id.clone());
    probe.session_type = entry.session_type;
    probe.student_group = entry.student_group.clone();
    probe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictKind;
    use crate::models::{standard_slots, AcademicTerm, Faculty, Room, Subject};
    use chrono::NaiveDate;

    fn catalog() -> ResourceCatalog {
        ResourceCatalog::new()
            .with_term(
                AcademicTerm::new(
                    "term-1",
                    "2025-26 Odd",
                    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                )
                .as_current(),
            )
            .with_faculty(Faculty::new("f1", "EMP-001", "S. Gnaneshwari", "AIML"))
            .with_faculty(Faculty::new("f2", "EMP-002", "K. Ishwarya Devi", "AIML"))
            .with_subject(Subject::new("s1", "DAA", "Algorithms", "AIML"))
            .with_subject(Subject::new("s2", "WT", "Web Technologies", "AIML"))
            .with_room(Room::new("r1", "301", "Classroom 301"))
            .with_room(Room::new("r2", "L1", "Computer Lab 1"))
            .with_time_slots(standard_slots())
    }

    fn store(catalog: &ResourceCatalog) -> TimetableStore {
        TimetableStore::new("term-1", TimetableType::Regular, catalog)
    }

    fn candidate(day: DayOfWeek, slot: &str, subject: &str, faculty: &str, room: &str) -> EntryCandidate {
        EntryCandidate::new("term-1", day, slot, TimetableType::Regular)
            .with_subject(subject)
            .with_faculty(faculty)
            .with_room(room)
    }

    #[test]
    fn test_insert_then_room_conflict() {
        let catalog = catalog();
        let mut store = store(&catalog);

        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();

        // Same room, same cell, different faculty.
        let err = store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s2", "f2", "r1"), &catalog)
            .unwrap_err();
        match err {
            PlacementError::Conflict(c) => assert_eq!(c.kind, ConflictKind::Room),
            other => panic!("expected room conflict, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_faculty_conflict() {
        let catalog = catalog();
        let mut store = store(&catalog);

        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();
        let err = store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s2", "f1", "r2"), &catalog)
            .unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Conflict(c) if c.kind == ConflictKind::Faculty
        ));
    }

    #[test]
    fn test_self_move_is_unchanged_success() {
        let catalog = catalog();
        let mut store = store(&catalog);

        let id = store
            .insert(candidate(DayOfWeek::Monday, "10:40", "s1", "f1", "r2"), &catalog)
            .unwrap()
            .id
            .clone();
        let revision = store.revision();

        let entry = store
            .move_entry(&id, DayOfWeek::Monday, "10:40", &catalog)
            .unwrap();
        assert!(entry.occupies(DayOfWeek::Monday, "10:40"));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_move_into_occupied_room_rejected_and_source_kept() {
        let catalog = catalog();
        let mut store = store(&catalog);

        // E1 at tuesday 11:40 in r1; E2 at tuesday 10:40 also r1.
        let e1 = store
            .insert(candidate(DayOfWeek::Tuesday, "11:40", "s1", "f1", "r1"), &catalog)
            .unwrap()
            .id
            .clone();
        store
            .insert(candidate(DayOfWeek::Tuesday, "10:40", "s2", "f2", "r1"), &catalog)
            .unwrap();

        let err = store
            .move_entry(&e1, DayOfWeek::Tuesday, "10:40", &catalog)
            .unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Conflict(c) if c.kind == ConflictKind::Room
        ));
        // E1 stays where it was.
        assert!(store.get(&e1).unwrap().occupies(DayOfWeek::Tuesday, "11:40"));
    }

    #[test]
    fn test_move_to_free_cell() {
        let catalog = catalog();
        let mut store = store(&catalog);

        let id = store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap()
            .id
            .clone();
        let moved = store
            .move_entry(&id, DayOfWeek::Friday, "02:20", &catalog)
            .unwrap();
        assert!(moved.occupies(DayOfWeek::Friday, "02:20"));
    }

    #[test]
    fn test_move_rejects_break_slot() {
        let catalog = catalog();
        let mut store = store(&catalog);

        let id = store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap()
            .id
            .clone();
        let err = store
            .move_entry(&id, DayOfWeek::Monday, "12:40", &catalog)
            .unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Referential {
                field: ReferenceField::TimeSlot,
                ..
            }
        ));
    }

    #[test]
    fn test_rejection_leaves_state_identical() {
        let catalog = catalog();
        let mut store = store(&catalog);
        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();

        let snapshot = serde_json::to_string(&store.query(None, None)).unwrap();
        let revision = store.revision();

        // Conflict rejection.
        let _ = store.insert(candidate(DayOfWeek::Monday, "09:40", "s2", "f2", "r1"), &catalog);
        // Referential rejection.
        let _ = store.insert(candidate(DayOfWeek::Tuesday, "09:40", "s9", "f1", "r1"), &catalog);
        // Incomplete rejection.
        let incomplete =
            EntryCandidate::new("term-1", DayOfWeek::Tuesday, "09:40", TimetableType::Regular)
                .with_subject("s1");
        let _ = store.insert(incomplete, &catalog);

        assert_eq!(
            serde_json::to_string(&store.query(None, None)).unwrap(),
            snapshot
        );
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_incomplete_candidate_rejected() {
        let catalog = catalog();
        let mut store = store(&catalog);
        let c = EntryCandidate::new("term-1", DayOfWeek::Monday, "09:40", TimetableType::Regular)
            .with_room("r1");
        let err = store.insert(c, &catalog).unwrap_err();
        match err {
            PlacementError::Incomplete { missing } => {
                assert_eq!(missing, vec![ReferenceField::Subject, ReferenceField::Faculty]);
            }
            other => panic!("expected incomplete, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_and_not_found() {
        let catalog = catalog();
        let mut store = store(&catalog);
        let id = store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap()
            .id
            .clone();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert!(matches!(
            store.remove(&id),
            Err(PlacementError::NotFound { .. })
        ));
    }

    #[test]
    fn test_query_order_day_then_slot() {
        let catalog = catalog();
        let mut store = store(&catalog);
        store
            .insert(candidate(DayOfWeek::Tuesday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();
        store
            .insert(candidate(DayOfWeek::Monday, "02:20", "s2", "f2", "r2"), &catalog)
            .unwrap();
        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();

        let ordered = store.query(None, None);
        let cells: Vec<(DayOfWeek, &str)> = ordered
            .iter()
            .map(|e| (e.day_of_week, e.time_slot_id.as_str()))
            .collect();
        assert_eq!(
            cells,
            vec![
                (DayOfWeek::Monday, "09:40"),
                (DayOfWeek::Monday, "02:20"),
                (DayOfWeek::Tuesday, "09:40"),
            ]
        );
    }

    #[test]
    fn test_query_filters() {
        let catalog = catalog();
        let mut store = store(&catalog);
        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();
        store
            .insert(candidate(DayOfWeek::Tuesday, "09:40", "s2", "f2", "r2"), &catalog)
            .unwrap();

        assert_eq!(store.query(Some(DayOfWeek::Monday), None).len(), 1);
        assert_eq!(store.query(None, Some("09:40")).len(), 2);
        assert_eq!(store.query(Some(DayOfWeek::Friday), None).len(), 0);
    }

    #[test]
    fn test_invariants_hold_after_operation_sequence() {
        let catalog = catalog();
        let mut store = store(&catalog);

        // A mixed sequence of inserts and moves, some rejected.
        let ops: Vec<EntryCandidate> = vec![
            candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"),
            candidate(DayOfWeek::Monday, "09:40", "s2", "f2", "r2"),
            candidate(DayOfWeek::Monday, "09:40", "s2", "f2", "r1"), // rejected: room
            candidate(DayOfWeek::Monday, "10:40", "s1", "f1", "r1"),
            candidate(DayOfWeek::Monday, "10:40", "s2", "f1", "r2"), // rejected: faculty
        ];
        for c in ops {
            let _ = store.insert(c, &catalog);
        }
        let _ = store.move_entry("tt-1", DayOfWeek::Monday, "10:40", &catalog); // rejected

        // No two entries share (day, slot, room) or (day, slot, faculty).
        let entries = store.query(None, None);
        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                if a.occupies(b.day_of_week, &b.time_slot_id) {
                    assert_ne!(a.room_id, b.room_id);
                    assert_ne!(a.faculty_id, b.faculty_id);
                }
            }
        }
    }

    #[test]
    fn test_store_scope_type_mismatch() {
        let catalog = catalog();
        let mut store = store(&catalog);
        store
            .insert(candidate(DayOfWeek::Monday, "09:40", "s1", "f1", "r1"), &catalog)
            .unwrap();

        // An exam-typed candidate must not slip into the regular grid,
        // where it would dodge conflict checks against regular entries.
        let mut c = candidate(DayOfWeek::Monday, "09:40", "s2", "f2", "r2");
        c.timetable_type = TimetableType::Exam;
        let err = store.insert(c, &catalog).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Referential {
                field: ReferenceField::TimetableType,
                ..
            }
        ));
        assert_eq!(store.len(), 1);
        assert!(store
            .query(None, None)
            .iter()
            .all(|e| e.timetable_type == TimetableType::Regular));
    }

    #[test]
    fn test_store_scope_term_mismatch() {
        let catalog = catalog();
        let mut store = store(&catalog);
        let c = EntryCandidate::new("term-2", DayOfWeek::Monday, "09:40", TimetableType::Regular)
            .with_subject("s1")
            .with_faculty("f1")
            .with_room("r1");
        assert!(matches!(
            store.insert(c, &catalog),
            Err(PlacementError::Referential {
                field: ReferenceField::Term,
                ..
            })
        ));
    }
}
