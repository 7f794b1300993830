//! Static timetable strategy.
//!
//! Looks up a precomputed table keyed by `"{year}-{semester}"` mapping
//! grid keys (`"{Day}-{HH:MM}"`) to fixed (course code, room) pairs.
//! Tables are authored offline; the strategy itself carries no
//! conflict risk, but its output still passes through the commit
//! gate like every other strategy's.
//!
//! Absent slot keys mean "no class that slot", not an error. An absent
//! year-semester key is an error: there is nothing to generate from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{GeneratedGrid, GenerationContext, GenerationStrategy, GridCell};
use crate::error::GenerationError;
use crate::models::grid_key;

/// One authored cell of a static table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticCell {
    /// Authoring id, kept for traceability.
    pub id: String,
    /// Subject grid code.
    #[serde(rename = "courseCode")]
    pub course_code: String,
    /// Room name.
    pub room: String,
}

/// Precomputed timetables keyed by `"{year}-{semester}"`, each mapping
/// grid keys to cells. `null` cells are treated like absent keys.
///
/// The JSON wire format mirrors the authoring tool's export:
///
/// ```json
/// {
///   "1-1": {
///     "Monday-09:40": { "id": "m-1-1", "courseCode": "ED&CAD", "room": "Lab" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticTimetableSet {
    tables: HashMap<String, HashMap<String, Option<StaticCell>>>,
}

impl StaticTimetableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a set from its JSON export.
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(json).map_err(|e| GenerationError::InvalidFixture {
            message: e.to_string(),
        })
    }

    /// Adds a table for a year-semester key.
    pub fn with_table(
        mut self,
        key: impl Into<String>,
        table: HashMap<String, Option<StaticCell>>,
    ) -> Self {
        self.tables.insert(key.into(), table);
        self
    }

    /// The table for a year-semester key, if authored.
    pub fn table(&self, key: &str) -> Option<&HashMap<String, Option<StaticCell>>> {
        self.tables.get(key)
    }
}

/// Strategy that reads placements from a [`StaticTimetableSet`].
#[derive(Debug, Clone)]
pub struct StaticStrategy {
    tables: StaticTimetableSet,
}

impl StaticStrategy {
    /// Creates the strategy over a table set.
    pub fn new(tables: StaticTimetableSet) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl GenerationStrategy for StaticStrategy {
    fn name(&self) -> &'static str {
        "static"
    }

    /// Walks every (day, schedulable slot) cell and copies the authored
    /// occupant when one exists. Deterministic: the same context always
    /// yields the same grid.
    async fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<GeneratedGrid, GenerationError> {
        let key = context.load_key();
        let table = self
            .tables
            .table(&key)
            .ok_or(GenerationError::NoData { key })?;

        let mut grid = GeneratedGrid::new(self.name());
        for &day in &context.days {
            for slot in context.slots.iter().filter(|s| s.is_schedulable()) {
                if let Some(Some(cell)) = table.get(&grid_key(day, slot)) {
                    grid.set_cell(
                        day,
                        slot.id.clone(),
                        GridCell {
                            course_code: cell.course_code.clone(),
                            room: cell.room.clone(),
                        },
                    );
                }
            }
        }
        Ok(grid)
    }
}
