//! Backtracking slot scheduler.
//!
//! # Algorithm
//!
//! 1. Build, for every subject, the list of subjects it may not share a
//!    slot with (its conflict neighbours, or every other subject under
//!    [`SlotPolicy::Exclusive`]).
//! 2. Checkpoint: count a step, honour the step limit and cancellation.
//! 3. Select the unassigned subject with the fewest legal slots (MRV);
//!    ties go to the earliest subject in input order.
//! 4. Try its legal slots in ascending `(day, period)` order, descending
//!    after each placement and undoing it when the subtree fails. The
//!    descent keeps its own frame stack, so depth is bounded by memory,
//!    not the call stack.
//! 5. Stop at the first complete assignment; exhausting the tree proves
//!    infeasibility.
//!
//! The search is deterministic: the same input yields the same timetable.
//!
//! # Complexity
//! Exponential in the worst case (graph colouring). Each node costs
//! O(n · d) for MRV selection with recomputed legality, O(n) with the
//! incremental domain table.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3: Backtracking Search for CSPs

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use super::budget::{AbortCause, CancelToken, SearchStats};
use super::config::{DomainStrategy, SchedulerConfig, SlotPolicy};
use super::domains::{DomainTable, RecomputedDomains, SlotDomains};
use crate::conflict::ConflictGraph;
use crate::error::{Result, TimetableError};
use crate::models::{Assignment, SlotGrid, Timetable};
use crate::validation::{validate_grid, ValidationError, ValidationErrorKind};

/// Backtracking constraint-satisfaction scheduler.
///
/// Assigns every subject a slot such that no two conflicting subjects
/// share one.
///
/// # Example
///
/// ```
/// use u_timetable::conflict::ConflictGraph;
/// use u_timetable::models::{Slot, SlotGrid, StudentGroup};
/// use u_timetable::scheduler::SlotScheduler;
///
/// let groups = vec![StudentGroup::new("G1", 30).with_subjects(["Math", "Physics"])];
/// let subjects = ["Math", "Physics"];
/// let graph = ConflictGraph::build(&subjects, &groups).unwrap();
///
/// let timetable = SlotScheduler::new()
///     .schedule(&subjects, &graph, SlotGrid::new(1, 2))
///     .unwrap();
/// assert_eq!(timetable.slot_of("Math"), Some(Slot::new(0, 0)));
/// assert_eq!(timetable.slot_of("Physics"), Some(Slot::new(0, 1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotScheduler {
    config: SchedulerConfig,
    cancel: Option<CancelToken>,
}

impl SlotScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules subjects into slots of `grid`.
    ///
    /// # Errors
    /// - `InvalidInput`: empty grid, duplicate subjects, or a subject
    ///   missing from `graph`.
    /// - `Infeasible`: no conflict-free timetable exists.
    /// - `SearchAborted`: the step limit or cancellation stopped the search.
    pub fn schedule<S: AsRef<str>>(
        &self,
        subjects: &[S],
        graph: &ConflictGraph,
        grid: SlotGrid,
    ) -> Result<Timetable> {
        self.schedule_with_stats(subjects, graph, grid)
            .map(|(timetable, _)| timetable)
    }

    /// Like [`schedule`](Self::schedule), also returning search statistics.
    #[instrument(skip_all, fields(
        subjects = subjects.len(),
        slots = grid.total_slots(),
        policy = ?self.config.slot_policy,
        strategy = ?self.config.domain_strategy,
    ))]
    pub fn schedule_with_stats<S: AsRef<str>>(
        &self,
        subjects: &[S],
        graph: &ConflictGraph,
        grid: SlotGrid,
    ) -> Result<(Timetable, SearchStats)> {
        validate_grid(&grid)?;
        let blockers = self.blockers(subjects, graph)?;
        let total_slots = grid.total_slots();

        if self.config.slot_policy == SlotPolicy::Exclusive && subjects.len() > total_slots {
            info!(
                subjects = subjects.len(),
                total_slots, "more subjects than exclusive slots"
            );
            return Err(TimetableError::Infeasible {
                stats: SearchStats::default(),
            });
        }

        let (flow, assignment, stats) = match self.config.domain_strategy {
            DomainStrategy::Recompute => {
                self.run(RecomputedDomains::new(&blockers, total_slots), subjects.len(), total_slots)
            }
            DomainStrategy::Incremental => {
                self.run(DomainTable::new(&blockers, total_slots), subjects.len(), total_slots)
            }
        };

        match flow {
            Flow::Solved => {
                let mut timetable = Timetable::new(grid);
                for (s, slot) in subjects.iter().zip(assignment) {
                    let index = slot.expect("solved search leaves every subject assigned");
                    let slot = grid
                        .slot_at(index)
                        .expect("search only uses slots inside the grid");
                    timetable.add_assignment(Assignment::new(s.as_ref(), slot));
                }
                info!(
                    steps = stats.steps,
                    backtracks = stats.backtracks,
                    slots_used = timetable.used_slots().len(),
                    "timetable found"
                );
                Ok((timetable, stats))
            }
            Flow::Exhausted => {
                info!(
                    steps = stats.steps,
                    backtracks = stats.backtracks,
                    "search space exhausted"
                );
                Err(TimetableError::Infeasible { stats })
            }
            Flow::Aborted(cause) => {
                warn!(%cause, steps = stats.steps, "search aborted");
                Err(TimetableError::SearchAborted { cause, stats })
            }
        }
    }

    fn run<D: SlotDomains>(
        &self,
        domains: D,
        subject_count: usize,
        total_slots: usize,
    ) -> (Flow, Vec<Option<usize>>, SearchStats) {
        let mut search = Search {
            domains,
            total_slots,
            assignment: vec![None; subject_count],
            unassigned: subject_count,
            stats: SearchStats::default(),
            step_limit: self.config.step_limit,
            cancel: self.cancel.as_ref(),
        };
        let flow = search.explore();
        (flow, search.assignment, search.stats)
    }

    /// Per-subject blocker lists, indexed by position in `subjects`.
    fn blockers<S: AsRef<str>>(
        &self,
        subjects: &[S],
        graph: &ConflictGraph,
    ) -> Result<Vec<Vec<usize>>> {
        let mut local: HashMap<usize, usize> = HashMap::with_capacity(subjects.len());
        let mut errors = Vec::new();

        for (i, s) in subjects.iter().enumerate() {
            let name = s.as_ref();
            match graph.position(name) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Subject '{name}' is not in the conflict graph"),
                )),
                Some(p) => {
                    if local.insert(p, i).is_some() {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::DuplicateId,
                            format!("Duplicate subject ID: {name}"),
                        ));
                    }
                }
            }
        }
        if !errors.is_empty() {
            return Err(TimetableError::InvalidInput(errors));
        }

        let n = subjects.len();
        let blockers: Vec<Vec<usize>> = match self.config.slot_policy {
            SlotPolicy::Exclusive => (0..n)
                .map(|i| (0..n).filter(|&j| j != i).collect())
                .collect(),
            SlotPolicy::Shared => subjects
                .iter()
                .map(|s| {
                    let p = graph
                        .position(s.as_ref())
                        .expect("subject positions checked above");
                    let mut list: Vec<usize> = graph
                        .neighbor_indices(p)
                        .into_iter()
                        .filter_map(|q| local.get(&q).copied())
                        .collect();
                    list.sort_unstable();
                    list
                })
                .collect(),
        };

        debug!(
            pairs = blockers.iter().map(Vec::len).sum::<usize>() / 2,
            "blocker lists built"
        );
        Ok(blockers)
    }
}

/// Outcome of a search subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Solved,
    Exhausted,
    Aborted(AbortCause),
}

/// State of one search. Owned by a single `schedule` call.
struct Search<'a, D> {
    domains: D,
    total_slots: usize,
    assignment: Vec<Option<usize>>,
    unassigned: usize,
    stats: SearchStats,
    step_limit: Option<u64>,
    cancel: Option<&'a CancelToken>,
}

/// A subject under trial and the first slot not yet tried for it.
struct Frame {
    subject: usize,
    next_slot: usize,
    placed: Option<usize>,
}

impl<D: SlotDomains> Search<'_, D> {
    /// Depth-first search over an explicit frame stack, one frame per
    /// placed subject.
    fn explore(&mut self) -> Flow {
        let mut frames: Vec<Frame> = Vec::with_capacity(self.assignment.len());
        loop {
            if self.unassigned == 0 {
                return Flow::Solved;
            }
            if let Some(cause) = self.checkpoint() {
                return Flow::Aborted(cause);
            }
            frames.push(Frame {
                subject: self.select_subject(),
                next_slot: 0,
                placed: None,
            });

            // Advance the top frame to its next legal slot, unwinding
            // frames whose slots are used up.
            loop {
                let Some(frame) = frames.last_mut() else {
                    return Flow::Exhausted;
                };
                let subject = frame.subject;
                if let Some(slot) = frame.placed.take() {
                    self.lift(subject, slot);
                    self.stats.backtracks += 1;
                }
                let next = (frame.next_slot..self.total_slots)
                    .find(|&k| self.domains.is_legal(subject, k, &self.assignment));
                match next {
                    Some(slot) => {
                        frame.next_slot = slot + 1;
                        frame.placed = Some(slot);
                        self.place(subject, slot);
                        break;
                    }
                    None => {
                        frames.pop();
                    }
                }
            }
        }
    }

    /// Cooperative checkpoint before each subject selection.
    fn checkpoint(&mut self) -> Option<AbortCause> {
        if let Some(limit) = self.step_limit {
            if self.stats.steps >= limit {
                return Some(AbortCause::StepLimit(limit));
            }
        }
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Some(AbortCause::Cancelled);
        }
        self.stats.steps += 1;
        None
    }

    /// Minimum-remaining-values selection; earliest subject wins ties.
    fn select_subject(&self) -> usize {
        let mut best: Option<(usize, usize)> = None;
        for (i, slot) in self.assignment.iter().enumerate() {
            if slot.is_some() {
                continue;
            }
            let count = self.domains.legal_count(i, &self.assignment);
            if best.map_or(true, |(_, c)| count < c) {
                best = Some((i, count));
                if count == 0 {
                    break;
                }
            }
        }
        best.map(|(i, _)| i)
            .expect("select_subject called with no unassigned subject")
    }

    fn place(&mut self, subject: usize, slot: usize) {
        self.assignment[subject] = Some(slot);
        self.unassigned -= 1;
        self.domains.assign(subject, slot);
    }

    fn lift(&mut self, subject: usize, slot: usize) {
        self.assignment[subject] = None;
        self.unassigned += 1;
        self.domains.unassign(subject, slot);
    }
}
