//! Error taxonomy for the timetable core.
//!
//! Expected conditions (conflicts, missing references, incomplete
//! assignments) are returned as tagged values, never panics. Transport
//! failures are confined to the generation boundary and converted into
//! fallback actions or reportable outcomes there; they never reach the
//! conflict checker.

use std::fmt;
use thiserror::Error;

use crate::conflict::Conflict;

/// Which reference field of a candidate is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Subject,
    Faculty,
    Room,
    TimeSlot,
    Term,
    TimetableType,
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceField::Subject => "subject",
            ReferenceField::Faculty => "faculty",
            ReferenceField::Room => "room",
            ReferenceField::TimeSlot => "time slot",
            ReferenceField::Term => "academic term",
            ReferenceField::TimetableType => "timetable type",
        };
        f.write_str(name)
    }
}

/// Rejection reasons for store mutations.
///
/// All variants are recoverable locally: the operation is rejected and
/// the store's prior state is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The candidate collides with an existing entry in the same cell.
    #[error("{0}")]
    Conflict(Conflict),

    /// The candidate references a missing, inactive, or unavailable record.
    #[error("unknown or inactive {field}: '{id}'")]
    Referential {
        /// Offending reference field.
        field: ReferenceField,
        /// The id that failed to resolve.
        id: String,
    },

    /// The candidate lacks one or more of subject/faculty/room.
    #[error("incomplete assignment, missing: {}", format_fields(missing))]
    Incomplete {
        /// Fields still unassigned.
        missing: Vec<ReferenceField>,
    },

    /// No entry with the given id exists in the store.
    #[error("no timetable entry with id '{id}'")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },
}

fn format_fields(fields: &[ReferenceField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures of a generation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// No precomputed table exists for the requested year-semester key.
    #[error("no timetable data for key '{key}'")]
    NoData {
        /// The "{year}-{semester}" lookup key.
        key: String,
    },

    /// The subject load list is empty; neither round-robin nor the
    /// heuristic fallback can produce placements.
    #[error("no subjects configured for this department/year")]
    NoSubjects,

    /// A static fixture failed to parse.
    #[error("invalid timetable fixture: {message}")]
    InvalidFixture {
        /// Parser diagnostic.
        message: String,
    },

    /// The solver client could not be set up at all.
    #[error("solver unavailable: {message}")]
    SolverUnavailable {
        /// Setup diagnostic.
        message: String,
    },
}

/// Failures while talking to the external solver service.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The service is unreachable or returned a non-success status.
    #[error("solver transport error: {message}")]
    Transport {
        /// Underlying diagnostic.
        message: String,
    },

    /// The response body could not be decoded or carried invalid rows.
    #[error("malformed solver response: {message}")]
    Malformed {
        /// Parser diagnostic.
        message: String,
    },

    /// The bounded wait elapsed before the service answered.
    #[error("solver timed out after {seconds}s")]
    Timeout {
        /// The wait bound that elapsed.
        seconds: u64,
    },
}

impl SolverError {
    /// Whether retrying the request later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SolverError::Transport { .. } | SolverError::Timeout { .. }
        )
    }
}

impl From<reqwest::Error> for SolverError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SolverError::Malformed {
                message: err.to_string(),
            }
        } else {
            SolverError::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictKind;

    #[test]
    fn test_incomplete_message_lists_fields() {
        let err = PlacementError::Incomplete {
            missing: vec![ReferenceField::Faculty, ReferenceField::Room],
        };
        assert_eq!(err.to_string(), "incomplete assignment, missing: faculty, room");
    }

    #[test]
    fn test_conflict_message_passthrough() {
        let err = PlacementError::Conflict(Conflict {
            kind: ConflictKind::Room,
            entry_id: "tt-3".into(),
        });
        assert!(err.to_string().contains("room"));
        assert!(err.to_string().contains("tt-3"));
    }

    #[test]
    fn test_generation_error_messages() {
        let err = GenerationError::SolverUnavailable {
            message: "builder error".into(),
        };
        assert_eq!(err.to_string(), "solver unavailable: builder error");
        let err = GenerationError::NoData { key: "3-1".into() };
        assert_eq!(err.to_string(), "no timetable data for key '3-1'");
    }

    #[test]
    fn test_solver_retryability() {
        assert!(SolverError::Timeout { seconds: 10 }.is_retryable());
        assert!(!SolverError::Malformed {
            message: "bad json".into()
        }
        .is_retryable());
    }
}
