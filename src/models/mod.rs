//! Timetable domain models.
//!
//! Core data types for an academic term's scheduling problem: the
//! reference entities (faculty, subjects, rooms, time slots, terms)
//! and the central mutable record, [`TimetableEntry`].
//!
//! Reference entities are owned by the
//! [`ResourceCatalog`](crate::catalog::ResourceCatalog) and referenced
//! (never owned) by timetable entries.

mod entry;
mod faculty;
mod room;
mod slot;
mod subject;
mod term;

pub use entry::{EntryCandidate, SessionType, TimetableEntry, TimetableType};
pub use faculty::Faculty;
pub use room::{Room, RoomType};
pub use slot::{grid_key, parse_grid_key, standard_slots, DayOfWeek, TimeSlot};
pub use subject::Subject;
pub use term::AcademicTerm;
