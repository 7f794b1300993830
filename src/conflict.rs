//! Placement conflict checking.
//!
//! Decides whether inserting a candidate into the grid would
//! double-book a room, faculty member, or student group within the same
//! (term, day, slot, timetable type) cell. Purely tuple equality: slots
//! are discrete, so no sub-slot overlap reasoning exists or is needed.
//!
//! The checker is a pure predicate over the current entry collection;
//! it never mutates anything and never fails for transport reasons.

use std::fmt;

use crate::models::{EntryCandidate, TimetableEntry};

/// Which exclusivity rule a candidate violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two entries share a room in the same cell.
    Room,
    /// Two entries share a faculty member in the same cell.
    Faculty,
    /// Two entries share a student group in the same cell.
    Group,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictKind::Room => "room",
            ConflictKind::Faculty => "faculty",
            ConflictKind::Group => "student group",
        };
        f.write_str(name)
    }
}

/// A detected double-booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    /// Which exclusivity rule was violated.
    pub kind: ConflictKind,
    /// Id of the already-placed entry that collides.
    pub entry_id: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} conflict with entry '{}'", self.kind, self.entry_id)
    }
}

/// Checks a candidate placement against the current entries.
///
/// Entries are scanned in collection order; the first colliding entry
/// is reported, with axes tested room → faculty → group. Entries on a
/// different day, slot, term, or timetable type never collide. Draft
/// entries participate like confirmed ones.
///
/// `exclude` skips the entry with the given id, so that moving an
/// entry does not conflict with its own current placement.
pub fn check_placement<'a, I>(
    candidate: &EntryCandidate,
    entries: I,
    exclude: Option<&str>,
) -> Result<(), Conflict>
where
    I: IntoIterator<Item = &'a TimetableEntry>,
{
    for entry in entries {
        if let Some(skip_id) = exclude {
            if entry.id == skip_id {
                continue;
            }
        }
        if entry.academic_term_id != candidate.academic_term_id
            || entry.timetable_type != candidate.timetable_type
            || !entry.occupies(candidate.day_of_week, &candidate.time_slot_id)
        {
            continue;
        }

        if entry.room_id == candidate.room_id {
            return Err(Conflict {
                kind: ConflictKind::Room,
                entry_id: entry.id.clone(),
            });
        }
        if entry.faculty_id == candidate.faculty_id {
            return Err(Conflict {
                kind: ConflictKind::Faculty,
                entry_id: entry.id.clone(),
            });
        }
        if let (Some(group), Some(other)) =
            (candidate.student_group.as_deref(), entry.student_group.as_deref())
        {
            if group == other {
                return Err(Conflict {
                    kind: ConflictKind::Group,
                    entry_id: entry.id.clone(),
                });
            }
        }
    }
    Ok(())
}
