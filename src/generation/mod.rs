//! Timetable generation strategies.
//!
//! A strategy produces a full-grid proposal of placements for a
//! (department, year, semester, timetable type) before anything is
//! committed. Strategies are never trusted blindly: [`commit_grid`]
//! re-runs every proposed cell through the store's referential and
//! conflict gates.
//!
//! # Variants
//!
//! - [`StaticStrategy`]: precomputed table lookup, authored offline.
//! - [`RoundRobinStrategy`]: deterministic `(slot + day) mod N` spread.
//! - [`ExternalSolverStrategy`]: delegates to an optimizer service,
//!   falling back to a random heuristic on failure.
//!
//! Selection is configuration-driven via [`GenerationMode`]; adding a
//! department-specific strategy means adding a variant, not editing a
//! shared conditional.

mod external;
mod round_robin;
mod static_table;

pub use external::{ExternalSolverStrategy, HttpSolverClient, SolverApi, SolverAssignment, SolverConfig};
pub use round_robin::RoundRobinStrategy;
pub use static_table::{StaticCell, StaticStrategy, StaticTimetableSet};

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::catalog::ResourceCatalog;
use crate::error::{GenerationError, PlacementError, ReferenceField};
use crate::models::{DayOfWeek, EntryCandidate, SessionType, TimeSlot, TimetableType};
use crate::store::TimetableStore;

/// One subject's teaching assignment for a department/year: who
/// teaches it and where it usually runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectLoad {
    /// Grid code (e.g. "DAA", "PP Lab").
    pub code: String,
    /// Assigned faculty display name.
    pub faculty: String,
    /// Default room name.
    pub room: String,
}

impl SubjectLoad {
    /// Creates a subject load row.
    pub fn new(
        code: impl Into<String>,
        faculty: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            faculty: faculty.into(),
            room: room.into(),
        }
    }
}

/// Everything a strategy needs to produce a proposal.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Department the grid is for.
    pub department: String,
    /// Academic year (1-based).
    pub year: u8,
    /// Semester number within the year.
    pub semester: u8,
    /// Which timetable the proposal targets.
    pub timetable_type: TimetableType,
    /// Teaching days, in week order.
    pub days: Vec<DayOfWeek>,
    /// Ordered slot rows, breaks included.
    pub slots: Vec<TimeSlot>,
    /// Subject teaching assignments for this department/year.
    pub subjects: Vec<SubjectLoad>,
}

impl GenerationContext {
    /// Creates a context over the standard six-day week.
    pub fn new(department: impl Into<String>, year: u8, semester: u8, slots: Vec<TimeSlot>) -> Self {
        Self {
            department: department.into(),
            year,
            semester,
            timetable_type: TimetableType::Regular,
            days: DayOfWeek::ALL.to_vec(),
            slots,
            subjects: Vec::new(),
        }
    }

    /// Sets the subject load list.
    pub fn with_subjects(mut self, subjects: Vec<SubjectLoad>) -> Self {
        self.subjects = subjects;
        self
    }

    /// Targets the exam timetable instead of the regular one.
    pub fn for_exams(mut self) -> Self {
        self.timetable_type = TimetableType::Exam;
        self
    }

    /// The "{year}-{semester}" lookup key used by static tables.
    pub fn load_key(&self) -> String {
        format!("{}-{}", self.year, self.semester)
    }

    /// The teaching assignment for a subject code, if configured.
    pub fn load_for(&self, code: &str) -> Option<&SubjectLoad> {
        self.subjects.iter().find(|s| s.code == code)
    }
}

/// A proposed (subject code, room name) occupant for one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Subject grid code.
    pub course_code: String,
    /// Room name the cell should run in.
    pub room: String,
}

/// A candidate grid produced by a strategy, not yet committed.
///
/// Cells are keyed by (day, slot id); iteration order is day-of-week
/// then slot id, which is deterministic for a fixed slot set.
#[derive(Debug, Clone, Default)]
pub struct GeneratedGrid {
    /// Proposed cells.
    pub cells: BTreeMap<(DayOfWeek, String), GridCell>,
    /// User-visible notices (e.g. fallback activation).
    pub warnings: Vec<String>,
    /// Name of the strategy that produced the grid.
    pub strategy: &'static str,
}

impl GeneratedGrid {
    /// Creates an empty grid tagged with a strategy name.
    pub fn new(strategy: &'static str) -> Self {
        Self {
            cells: BTreeMap::new(),
            warnings: Vec::new(),
            strategy,
        }
    }

    /// Sets a cell's occupant.
    pub fn set_cell(&mut self, day: DayOfWeek, slot_id: impl Into<String>, cell: GridCell) {
        self.cells.insert((day, slot_id.into()), cell);
    }

    /// The occupant of a cell, if proposed.
    pub fn cell(&self, day: DayOfWeek, slot_id: &str) -> Option<&GridCell> {
        self.cells.get(&(day, slot_id.to_string()))
    }

    /// Number of proposed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid proposes nothing.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A strategy that proposes a full grid for a generation context.
///
/// Implementations must be deterministic where their contract says so
/// (static lookup, round-robin); the external variant is inherently
/// not. Every implementation's output goes through [`commit_grid`]
/// validation before reaching the store.
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// Strategy name for logs and reports.
    fn name(&self) -> &'static str;

    /// Produces a candidate grid.
    async fn generate(&self, context: &GenerationContext)
        -> Result<GeneratedGrid, GenerationError>;
}

/// Configuration-driven strategy selection.
#[derive(Debug)]
pub enum GenerationMode {
    /// Precomputed tables keyed by "{year}-{semester}".
    Static(StaticTimetableSet),
    /// Deterministic round-robin over the subject load.
    RoundRobin,
    /// External optimizer service with heuristic fallback.
    External(SolverConfig),
}

/// Builds the strategy for a configured mode.
pub fn strategy_for(mode: GenerationMode) -> Result<Box<dyn GenerationStrategy>, GenerationError> {
    match mode {
        GenerationMode::Static(tables) => Ok(Box::new(StaticStrategy::new(tables))),
        GenerationMode::RoundRobin => Ok(Box::new(RoundRobinStrategy)),
        GenerationMode::External(config) => {
            Ok(Box::new(ExternalSolverStrategy::http(config)?))
        }
    }
}

/// One cell the commit pass could not place.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCell {
    /// Cell day.
    pub day: DayOfWeek,
    /// Cell slot id.
    pub slot_id: String,
    /// Proposed subject code.
    pub course_code: String,
    /// Why the placement was rejected.
    pub reason: PlacementError,
}

/// Outcome of committing a generated grid.
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    /// Entries created.
    pub placed: usize,
    /// Cells rejected with their reasons.
    pub skipped: Vec<SkippedCell>,
    /// Warnings carried over from generation (e.g. fallback notice).
    pub warnings: Vec<String>,
}

impl CommitReport {
    /// Whether every proposed cell was placed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Commits a generated grid into the store.
///
/// Resolves each cell's subject code, room name, and (via the
/// context's subject load) faculty against the catalog, then inserts
/// through the store's full validation path. Generation output is
/// re-checked here even when the producer claims to be conflict-free.
/// Cells that fail to resolve or collide are skipped and reported; the
/// store keeps every placement that passed.
pub fn commit_grid(
    grid: &GeneratedGrid,
    store: &mut TimetableStore,
    catalog: &ResourceCatalog,
    context: &GenerationContext,
) -> CommitReport {
    info!(
        strategy = grid.strategy,
        cells = grid.len(),
        department = %context.department,
        "committing generated grid"
    );
    let mut report = CommitReport {
        warnings: grid.warnings.clone(),
        ..CommitReport::default()
    };

    for ((day, slot_id), cell) in &grid.cells {
        match build_candidate(*day, slot_id, cell, store, catalog, context) {
            Ok(candidate) => match store.insert(candidate, catalog) {
                Ok(_) => report.placed += 1,
                Err(reason) => report.skipped.push(SkippedCell {
                    day: *day,
                    slot_id: slot_id.clone(),
                    course_code: cell.course_code.clone(),
                    reason,
                }),
            },
            Err(reason) => report.skipped.push(SkippedCell {
                day: *day,
                slot_id: slot_id.clone(),
                course_code: cell.course_code.clone(),
                reason,
            }),
        }
    }

    debug!(placed = report.placed, skipped = report.skipped.len(), "commit finished");
    report
}

fn build_candidate(
    day: DayOfWeek,
    slot_id: &str,
    cell: &GridCell,
    store: &TimetableStore,
    catalog: &ResourceCatalog,
    context: &GenerationContext,
) -> Result<EntryCandidate, PlacementError> {
    let subject = catalog
        .subject_by_code(&cell.course_code)
        .ok_or_else(|| PlacementError::Referential {
            field: ReferenceField::Subject,
            id: cell.course_code.clone(),
        })?;
    let room = catalog
        .room_by_name(&cell.room)
        .ok_or_else(|| PlacementError::Referential {
            field: ReferenceField::Room,
            id: cell.room.clone(),
        })?;
    let load = context
        .load_for(&cell.course_code)
        .ok_or_else(|| PlacementError::Referential {
            field: ReferenceField::Faculty,
            id: cell.course_code.clone(),
        })?;
    let faculty =
        catalog
            .faculty_by_name(&load.faculty)
            .ok_or_else(|| PlacementError::Referential {
                field: ReferenceField::Faculty,
                id: load.faculty.clone(),
            })?;

    let session_type = if subject.has_lab() || cell.course_code.ends_with("Lab") {
        SessionType::Lab
    } else {
        SessionType::Lecture
    };

    Ok(
        EntryCandidate::new(store.academic_term_id(), day, slot_id, store.timetable_type())
            .with_subject(subject.id.clone())
            .with_faculty(faculty.id.clone())
            .with_room(room.id.clone())
            .with_session_type(session_type),
    )
}
