//! End-to-end exam timetabling pipeline.
//!
//! [`ExamSolver`] runs the stages in order and stops at the first failure:
//!
//! 1. Input validation (every problem reported at once)
//! 2. Enrollment derivation and the conflict model
//! 3. Slot scheduling
//! 4. Hall allocation

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::allocation::{AllocatorConfig, HallAllocator};
use crate::conflict::ConflictGraph;
use crate::error::{Result, TimetableError};
use crate::models::{Hall, HallAllocation, SlotGrid, StudentGroup, Subject, Timetable};
use crate::scheduler::{CancelToken, SchedulerConfig, SearchStats, SlotScheduler};
use crate::validation::validate_input;

/// Configuration of every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Slot search settings.
    pub scheduler: SchedulerConfig,
    /// Hall allocation settings.
    pub allocator: AllocatorConfig,
}

impl SolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheduler configuration.
    pub fn with_scheduler(mut self, config: SchedulerConfig) -> Self {
        self.scheduler = config;
        self
    }

    /// Sets the allocator configuration.
    pub fn with_allocator(mut self, config: AllocatorConfig) -> Self {
        self.allocator = config;
        self
    }
}

/// A timetabling problem.
///
/// Deserialises from JSON; `config` may be omitted.
///
/// ```json
/// {
///   "subjects": ["Math", "Physics"],
///   "groups": [{"name": "G1", "subjects": ["Math"], "size": 25}],
///   "days": 1,
///   "slots_per_day": 2,
///   "halls": [{"name": "Hall-1", "capacity": 60}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRequest {
    /// Subject names, in priority order for tie-breaks.
    pub subjects: Vec<String>,
    /// Student groups; each group's subjects conflict pairwise.
    pub groups: Vec<StudentGroup>,
    /// Number of exam days.
    pub days: u32,
    /// Exam slots per day.
    pub slots_per_day: u32,
    /// Available halls.
    pub halls: Vec<Hall>,
    /// Stage settings; defaults when omitted.
    #[serde(default)]
    pub config: SolverConfig,
}

impl ExamRequest {
    /// Creates an empty request over a `days × slots_per_day` grid.
    pub fn new(days: u32, slots_per_day: u32) -> Self {
        Self {
            subjects: Vec::new(),
            groups: Vec::new(),
            days,
            slots_per_day,
            halls: Vec::new(),
            config: SolverConfig::default(),
        }
    }

    /// Adds a subject.
    pub fn with_subject(mut self, name: impl Into<String>) -> Self {
        self.subjects.push(name.into());
        self
    }

    /// Adds a student group.
    pub fn with_group(mut self, group: StudentGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a hall.
    pub fn with_hall(mut self, hall: Hall) -> Self {
        self.halls.push(hall);
        self
    }

    /// Sets the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The slot grid.
    pub fn grid(&self) -> SlotGrid {
        SlotGrid::new(self.days, self.slots_per_day)
    }
}

/// A solved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSolution {
    /// Subjects with derived enrollment, in request order.
    pub subjects: Vec<Subject>,
    /// Subject to slot assignment.
    pub timetable: Timetable,
    /// Seating plan for every used slot.
    pub allocation: HallAllocation,
    /// Scheduler search counters.
    pub stats: SearchStats,
}

/// Exam timetabling pipeline.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Hall, Slot, StudentGroup};
/// use u_timetable::solver::{ExamRequest, ExamSolver};
///
/// let request = ExamRequest::new(1, 2)
///     .with_subject("Math")
///     .with_subject("Physics")
///     .with_group(StudentGroup::new("G1", 25).with_subjects(["Math", "Physics"]))
///     .with_hall(Hall::new("Hall-1", 60));
///
/// let solution = ExamSolver::new().solve(&request).unwrap();
/// assert_eq!(solution.timetable.slot_of("Physics"), Some(Slot::new(0, 1)));
/// assert_eq!(solution.allocation.occupancy("Hall-1", Slot::new(0, 1)), 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExamSolver {
    cancel: Option<CancelToken>,
}

impl ExamSolver {
    /// Creates a solver without a cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the caller cancel the slot search.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Solves `request`.
    ///
    /// # Errors
    /// Any [`TimetableError`](crate::error::TimetableError): invalid input,
    /// an infeasible or aborted search, or insufficient hall capacity.
    #[instrument(skip_all, fields(
        subjects = request.subjects.len(),
        groups = request.groups.len(),
        halls = request.halls.len(),
    ))]
    pub fn solve(&self, request: &ExamRequest) -> Result<ExamSolution> {
        let grid = request.grid();
        let mut errors =
            validate_input(&request.subjects, &request.groups, &request.halls, &grid)
                .err()
                .unwrap_or_default();
        if let Err(mut e) = request.config.allocator.validate() {
            errors.append(&mut e);
        }
        if !errors.is_empty() {
            return Err(TimetableError::InvalidInput(errors));
        }

        let subjects = Subject::derive_all(&request.subjects, &request.groups);
        let graph = ConflictGraph::build(&request.subjects, &request.groups)?;
        info!(
            subjects = graph.subject_count(),
            conflicts = graph.edge_count(),
            "conflict model built"
        );

        let mut scheduler = SlotScheduler::new().with_config(request.config.scheduler.clone());
        if let Some(token) = &self.cancel {
            scheduler = scheduler.with_cancel_token(token.clone());
        }
        let (timetable, stats) = scheduler.schedule_with_stats(&request.subjects, &graph, grid)?;

        let allocation = HallAllocator::new()
            .with_config(request.config.allocator.clone())
            .allocate(&timetable, &subjects, &request.halls)?;

        info!(
            slots_used = timetable.used_slots().len(),
            records = allocation.record_count(),
            steps = stats.steps,
            backtracks = stats.backtracks,
            "exam timetable solved"
        );
        Ok(ExamSolution {
            subjects,
            timetable,
            allocation,
            stats,
        })
    }
}
