//! External solver strategy.
//!
//! Delegates grid construction to an external optimizer service. The
//! service receives (semester, department) and answers with a sequence
//! of `{slot_id, course_code, room_name}` assignments it claims are
//! conflict-free; the claim is never trusted — every cell still goes
//! through the commit gate.
//!
//! Failure handling is the documented fallback, not a silent swallow:
//! transport errors, timeouts, and malformed responses all produce a
//! locally generated random heuristic grid plus a user-visible warning.
//! The grid is never left empty because the service misbehaved.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use super::{GeneratedGrid, GenerationContext, GenerationStrategy, GridCell};
use crate::error::{GenerationError, SolverError};
use crate::models::{parse_grid_key, DayOfWeek};

/// Configuration for the solver HTTP client.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Service base URL.
    pub base_url: String,
    /// Bound on the total wait for a solver answer.
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// One assignment row in a solver response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverAssignment {
    /// Grid key, e.g. "Monday-09:40".
    pub slot_id: String,
    /// Subject grid code.
    pub course_code: String,
    /// Room name.
    pub room_name: String,
}

#[derive(Debug, Serialize)]
struct SolveRequest<'a> {
    semester: u8,
    department: &'a str,
}

/// The solver service boundary.
///
/// Abstracted so tests can exercise the fallback path without a
/// network; production code uses [`HttpSolverClient`].
#[async_trait]
pub trait SolverApi: Send + Sync {
    /// Requests a grid for a semester/department.
    async fn solve(
        &self,
        semester: u8,
        department: &str,
    ) -> Result<Vec<SolverAssignment>, SolverError>;
}

/// HTTP implementation of [`SolverApi`].
#[derive(Debug, Clone)]
pub struct HttpSolverClient {
    client: Client,
    config: SolverConfig,
}

impl HttpSolverClient {
    /// Builds a client for the given configuration.
    pub fn with_config(config: SolverConfig) -> Result<Self, SolverError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| SolverError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SolverApi for HttpSolverClient {
    async fn solve(
        &self,
        semester: u8,
        department: &str,
    ) -> Result<Vec<SolverAssignment>, SolverError> {
        let url = format!("{}/timetable/generate", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SolveRequest {
                semester,
                department,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolverError::Transport {
                message: format!("solver returned status {status}"),
            });
        }
        let rows: Vec<SolverAssignment> = response.json().await?;
        Ok(rows)
    }
}

/// Strategy that asks an external optimizer, with heuristic fallback.
pub struct ExternalSolverStrategy {
    api: Box<dyn SolverApi>,
    wait: Duration,
}

impl ExternalSolverStrategy {
    /// Wraps an arbitrary solver boundary (used by tests).
    pub fn new(api: impl SolverApi + 'static, wait: Duration) -> Self {
        Self {
            api: Box::new(api),
            wait,
        }
    }

    /// Builds the production HTTP-backed strategy.
    pub fn http(config: SolverConfig) -> Result<Self, GenerationError> {
        let wait = config.timeout;
        let client = HttpSolverClient::with_config(config).map_err(|e| {
            GenerationError::SolverUnavailable {
                message: e.to_string(),
            }
        })?;
        Ok(Self::new(client, wait))
    }

    /// Converts solver rows into a grid.
    ///
    /// Any row whose slot id fails to parse against the context's
    /// slot/day vocabulary marks the whole response malformed.
    fn grid_from_rows(
        &self,
        rows: Vec<SolverAssignment>,
        context: &GenerationContext,
    ) -> Result<GeneratedGrid, SolverError> {
        let mut grid = GeneratedGrid::new(self.name());
        for row in rows {
            let (day, slot) = parse_slot_id(&row.slot_id, context).ok_or_else(|| {
                SolverError::Malformed {
                    message: format!("unknown slot id '{}'", row.slot_id),
                }
            })?;
            grid.set_cell(
                day,
                slot,
                GridCell {
                    course_code: row.course_code,
                    room: row.room_name,
                },
            );
        }
        Ok(grid)
    }

    /// Random heuristic covering every teaching cell. Used when the
    /// service is unavailable; the caller attaches the warning.
    fn fallback_grid(&self, context: &GenerationContext) -> Result<GeneratedGrid, GenerationError> {
        if context.subjects.is_empty() {
            return Err(GenerationError::NoSubjects);
        }
        let mut rng = rand::rng();
        let mut grid = GeneratedGrid::new(self.name());
        for &day in &context.days {
            for slot in context.slots.iter().filter(|s| s.is_schedulable()) {
                let load = &context.subjects[rng.random_range(0..context.subjects.len())];
                grid.set_cell(
                    day,
                    slot.id.clone(),
                    GridCell {
                        course_code: load.code.clone(),
                        room: load.room.clone(),
                    },
                );
            }
        }
        Ok(grid)
    }
}

/// Resolves a wire slot id ("Monday-09:40") against the context.
fn parse_slot_id(slot_id: &str, context: &GenerationContext) -> Option<(DayOfWeek, String)> {
    let (day, slot) = parse_grid_key(slot_id, &context.slots)?;
    if !context.days.contains(&day) || !slot.is_schedulable() {
        return None;
    }
    Some((day, slot.id.clone()))
}

#[async_trait]
impl GenerationStrategy for ExternalSolverStrategy {
    fn name(&self) -> &'static str {
        "external-solver"
    }

    async fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<GeneratedGrid, GenerationError> {
        info!(
            department = %context.department,
            semester = context.semester,
            "requesting external solver grid"
        );

        let outcome = tokio::time::timeout(
            self.wait,
            self.api.solve(context.semester, &context.department),
        )
        .await
        .map_err(|_| SolverError::Timeout {
            seconds: self.wait.as_secs(),
        })
        .and_then(|r| r)
        .and_then(|rows| self.grid_from_rows(rows, context));

        match outcome {
            Ok(grid) => Ok(grid),
            Err(err) => {
                warn!(error = %err, "solver unavailable, using heuristic fallback");
                let mut grid = self.fallback_grid(context)?;
                grid.warnings.push(format!(
                    "Solver service unavailable ({err}); generated a heuristic fallback schedule."
                ));
                Ok(grid)
            }
        }
    }
}
