//! Drag-and-drop placement reconciliation.
//!
//! Models the interactive editing flow: a resource (subject, faculty,
//! room) or an existing entry is picked up, then dropped on a grid
//! cell. Resource drops stage into a per-cell pending assignment; the
//! cell only becomes an entry once all three resources are present and
//! the store's full validation path accepts it. Entry drops are moves.
//!
//! A rejected drop never loses work: staged resources stay attached to
//! the cell so the next drop can complete the assignment, and a failed
//! move leaves the entry where it was.

use std::collections::HashMap;
use tracing::debug;

use crate::catalog::ResourceCatalog;
use crate::error::{PlacementError, ReferenceField};
use crate::models::{DayOfWeek, EntryCandidate};
use crate::store::TimetableStore;

/// A draggable catalog resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Subject(String),
    Faculty(String),
    Room(String),
}

/// What is currently being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A resource from the sidebar palette.
    Resource(ResourceRef),
    /// An already-placed entry, identified by id.
    Entry(String),
}

/// Reconciler drag state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSource),
}

/// A grid cell drop target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotTarget {
    pub day: DayOfWeek,
    pub time_slot_id: String,
}

impl SlotTarget {
    pub fn new(day: DayOfWeek, time_slot_id: impl Into<String>) -> Self {
        Self {
            day,
            time_slot_id: time_slot_id.into(),
        }
    }
}

/// Resources staged on a cell that is not yet a complete assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAssignment {
    pub subject_id: Option<String>,
    pub faculty_id: Option<String>,
    pub room_id: Option<String>,
}

impl PendingAssignment {
    fn merge(&mut self, resource: ResourceRef) {
        match resource {
            ResourceRef::Subject(id) => self.subject_id = Some(id),
            ResourceRef::Faculty(id) => self.faculty_id = Some(id),
            ResourceRef::Room(id) => self.room_id = Some(id),
        }
    }

    /// Fields still needed before the cell can be committed.
    pub fn missing(&self) -> Vec<ReferenceField> {
        let mut missing = Vec::new();
        if self.subject_id.is_none() {
            missing.push(ReferenceField::Subject);
        }
        if self.faculty_id.is_none() {
            missing.push(ReferenceField::Faculty);
        }
        if self.room_id.is_none() {
            missing.push(ReferenceField::Room);
        }
        missing
    }
}

/// Result of a drop gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A complete staged assignment became a new entry.
    Inserted { entry_id: String },
    /// An existing entry changed cell (or was dropped back onto its own).
    Moved { entry_id: String },
    /// The drop was rejected; staged resources are retained.
    Rejected { error: PlacementError },
    /// Nothing was being dragged.
    Cancelled,
}

/// Stateful drag-and-drop editor over one store.
///
/// New entries default to a lecture session in draft state; session
/// type and confirmation are edited after placement, not during the
/// drag.
#[derive(Debug, Default)]
pub struct DragDropReconciler {
    state: DragState,
    staging: HashMap<SlotTarget, PendingAssignment>,
    /// Store revision seen when the drag started.
    observed_revision: u64,
}

impl DragDropReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current drag state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Staged resources for a cell, if any.
    pub fn staged(&self, target: &SlotTarget) -> Option<&PendingAssignment> {
        self.staging.get(target)
    }

    /// Discards staged resources for a cell.
    pub fn clear_slot(&mut self, target: &SlotTarget) {
        self.staging.remove(target);
    }

    /// Begins a drag. The store revision is recorded so a grid changed
    /// underneath the gesture can be noticed at drop time.
    pub fn drag_start(&mut self, source: DragSource, store: &TimetableStore) {
        self.observed_revision = store.revision();
        self.state = DragState::Dragging(source);
    }

    /// Abandons the current drag without touching staged cells.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Completes the drag onto a grid cell.
    ///
    /// Resource drops stage into the cell and commit through the
    /// store's validation once subject, faculty, and room are all
    /// present. Entry drops move the entry. Either way the drag state
    /// returns to idle.
    pub fn drop_on_slot(
        &mut self,
        target: SlotTarget,
        store: &mut TimetableStore,
        catalog: &ResourceCatalog,
    ) -> DropOutcome {
        let source = match std::mem::take(&mut self.state) {
            DragState::Idle => return DropOutcome::Cancelled,
            DragState::Dragging(source) => source,
        };

        if store.revision() != self.observed_revision {
            debug!(
                observed = self.observed_revision,
                current = store.revision(),
                "grid changed during drag, validating against current state"
            );
        }

        match source {
            DragSource::Entry(id) => match store.move_entry(&id, target.day, &target.time_slot_id, catalog) {
                Ok(entry) => DropOutcome::Moved {
                    entry_id: entry.id.clone(),
                },
                Err(error) => DropOutcome::Rejected { error },
            },
            DragSource::Resource(resource) => self.stage_and_commit(target, resource, store, catalog),
        }
    }

    fn stage_and_commit(
        &mut self,
        target: SlotTarget,
        resource: ResourceRef,
        store: &mut TimetableStore,
        catalog: &ResourceCatalog,
    ) -> DropOutcome {
        let pending = self.staging.entry(target.clone()).or_default();
        pending.merge(resource);

        let missing = pending.missing();
        if !missing.is_empty() {
            return DropOutcome::Rejected {
                error: PlacementError::Incomplete { missing },
            };
        }

        let candidate = EntryCandidate::new(
            store.academic_term_id(),
            target.day,
            target.time_slot_id.clone(),
            store.timetable_type(),
        )
        .with_subject(pending.subject_id.clone().unwrap_or_default())
        .with_faculty(pending.faculty_id.clone().unwrap_or_default())
        .with_room(pending.room_id.clone().unwrap_or_default());

        match store.insert(candidate, catalog) {
            Ok(entry) => {
                let entry_id = entry.id.clone();
                self.staging.remove(&target);
                DropOutcome::Inserted { entry_id }
            }
            // Staged resources survive so the user can swap the
            // offending one and drop again.
            Err(error) => DropOutcome::Rejected { error },
        }
    }
}
