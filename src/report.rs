//! User-facing operation outcomes.
//!
//! Every editing or generation operation ends in exactly one outcome
//! message. Messages are precise: a conflict names the contested
//! resource and the cell it is contested in, never a generic "something
//! went wrong". Transport failures are kept distinct from rejections so
//! a UI can offer a retry instead of implying the user did something
//! wrong.

use crate::catalog::ResourceCatalog;
use crate::conflict::ConflictKind;
use crate::dragdrop::DropOutcome;
use crate::error::{PlacementError, SolverError};
use crate::generation::CommitReport;
use crate::models::{DayOfWeek, TimetableEntry};
use crate::store::TimetableStore;

/// The single answer every operation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The operation took effect.
    Success { summary: String },
    /// The operation was refused; state is unchanged.
    Rejected { message: String },
    /// An external service failed; the operation may be retried.
    TransportFailure { message: String },
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success { .. })
    }

    /// The outcome text, whichever variant carries it.
    pub fn message(&self) -> &str {
        match self {
            OperationOutcome::Success { summary } => summary,
            OperationOutcome::Rejected { message } => message,
            OperationOutcome::TransportFailure { message } => message,
        }
    }
}

/// Describes a successful placement, naming what landed where.
pub fn placement_summary(entry: &TimetableEntry, catalog: &ResourceCatalog) -> OperationOutcome {
    let subject = catalog
        .subject(&entry.subject_id)
        .map(|s| s.subject_code.clone())
        .unwrap_or_else(|| entry.subject_id.clone());
    let faculty = catalog
        .faculty(&entry.faculty_id)
        .map(|f| f.name.clone())
        .unwrap_or_else(|| entry.faculty_id.clone());
    let room = catalog
        .room(&entry.room_id)
        .map(|r| r.room_name.clone())
        .unwrap_or_else(|| entry.room_id.clone());

    OperationOutcome::Success {
        summary: format!(
            "Scheduled {subject} with {faculty} in {room} at {}.",
            cell_label(entry.day_of_week, &entry.time_slot_id, catalog)
        ),
    }
}

/// Describes a rejection, resolving ids to names where the catalog and
/// store can.
pub fn rejection_message(
    error: &PlacementError,
    store: &TimetableStore,
    catalog: &ResourceCatalog,
) -> OperationOutcome {
    let message = match error {
        PlacementError::Conflict(conflict) => match store.get(&conflict.entry_id) {
            Some(existing) => {
                let resource = contested_resource(conflict.kind, existing, catalog);
                let subject = catalog
                    .subject(&existing.subject_id)
                    .map(|s| s.subject_code.clone())
                    .unwrap_or_else(|| existing.subject_id.clone());
                format!(
                    "{resource} is already taken by {subject} at {}.",
                    cell_label(existing.day_of_week, &existing.time_slot_id, catalog)
                )
            }
            None => error.to_string(),
        },
        other => {
            let mut message = other.to_string();
            if let Some(first) = message.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            message.push('.');
            message
        }
    };
    OperationOutcome::Rejected { message }
}

/// Converts a drop gesture's result into an outcome.
pub fn drop_outcome(
    outcome: &DropOutcome,
    store: &TimetableStore,
    catalog: &ResourceCatalog,
) -> OperationOutcome {
    match outcome {
        DropOutcome::Inserted { entry_id } | DropOutcome::Moved { entry_id } => {
            match store.get(entry_id) {
                Some(entry) => placement_summary(entry, catalog),
                None => OperationOutcome::Success {
                    summary: format!("Placed entry '{entry_id}'."),
                },
            }
        }
        DropOutcome::Rejected { error } => rejection_message(error, store, catalog),
        DropOutcome::Cancelled => OperationOutcome::Rejected {
            message: "Nothing was being dragged.".to_string(),
        },
    }
}

/// Summarizes a commit pass, carrying generation warnings along.
pub fn commit_summary(report: &CommitReport) -> OperationOutcome {
    let mut summary = if report.is_clean() {
        format!("Generated timetable: {} classes placed.", report.placed)
    } else {
        format!(
            "Generated timetable: {} classes placed, {} skipped ({}).",
            report.placed,
            report.skipped.len(),
            skipped_codes(report)
        )
    };
    for warning in &report.warnings {
        summary.push(' ');
        summary.push_str(warning);
    }
    OperationOutcome::Success { summary }
}

/// Reports an unrecoverable solver failure (one the fallback could not
/// absorb either).
pub fn solver_failure(error: &SolverError) -> OperationOutcome {
    OperationOutcome::TransportFailure {
        message: format!("Timetable service unavailable: {error}."),
    }
}

fn contested_resource(
    kind: ConflictKind,
    existing: &TimetableEntry,
    catalog: &ResourceCatalog,
) -> String {
    match kind {
        ConflictKind::Room => catalog
            .room(&existing.room_id)
            .map(|r| r.room_name.clone())
            .unwrap_or_else(|| format!("Room '{}'", existing.room_id)),
        ConflictKind::Faculty => catalog
            .faculty(&existing.faculty_id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| format!("Faculty '{}'", existing.faculty_id)),
        ConflictKind::Group => existing
            .student_group
            .clone()
            .map(|g| format!("Group {g}"))
            .unwrap_or_else(|| "The student group".to_string()),
    }
}

fn cell_label(day: DayOfWeek, time_slot_id: &str, catalog: &ResourceCatalog) -> String {
    match catalog.time_slot(time_slot_id) {
        Some(slot) => format!("{} {}", day.label(), slot.start_label()),
        None => format!("{} {time_slot_id}", day.label()),
    }
}

fn skipped_codes(report: &CommitReport) -> String {
    let mut codes: Vec<&str> = report
        .skipped
        .iter()
        .map(|s| s.course_code.as_str())
        .collect();
    codes.dedup();
    codes.join(", ")
}
