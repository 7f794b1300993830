//! Timetable construction core for a university department portal.
//!
//! Maintains a weekly grid of (subject, faculty, room) placements per
//! academic term and keeps it conflict-free under every mutation path:
//! direct inserts, drag-and-drop editing, and bulk generation.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `AcademicTerm`, `Faculty`, `Subject`,
//!   `Room`, `TimeSlot`, `DayOfWeek`, `TimetableEntry`
//! - **`catalog`**: Read-mostly reference data with filtered lookups
//!   and referential validation
//! - **`conflict`**: Pure double-booking predicate over grid cells
//! - **`store`**: Conflict-gated entry collection for one term and
//!   timetable type
//! - **`generation`**: Pluggable full-grid strategies (static tables,
//!   round-robin, external solver) plus the commit gate
//! - **`dragdrop`**: Interactive placement staging and reconciliation
//! - **`report`**: User-facing outcome messages
//! - **`error`**: Placement, generation, and solver error taxonomy
//!
//! # Invariants
//!
//! No two entries in the same (term, day, slot, timetable type) cell
//! ever share a room, faculty member, or student group. Generation
//! output is re-validated at commit; solver claims are never trusted.
//! Rejected operations leave the store unchanged.

pub mod catalog;
pub mod conflict;
pub mod dragdrop;
pub mod error;
pub mod generation;
pub mod models;
pub mod report;
pub mod store;
