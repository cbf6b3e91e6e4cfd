//! Subject conflict graph.
//!
//! Two subjects conflict when at least one student group takes both: the
//! group's students cannot sit two exams at once, so the subjects must be
//! held in different slots. Each group therefore contributes a clique over
//! its subjects.
//!
//! Node indices follow subject input order, so every query that returns
//! several subjects returns them in that order.
//!
//! # Reference
//! Welsh & Powell (1967), "An upper bound for the chromatic number of a
//! graph and its application to timetabling problems"

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::StudentGroup;
use crate::validation::{check_subject_references, ValidationError, ValidationErrorKind};

/// Undirected "cannot share a slot" relation over subjects.
///
/// Built once per request and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl ConflictGraph {
    /// Builds the conflict graph from subjects and groups.
    ///
    /// For every group, every unordered pair of distinct subjects it takes
    /// becomes one edge. Pairs shared by several groups yield a single edge.
    ///
    /// # Errors
    /// `InvalidInput` if the subject list has duplicates or a group
    /// references an unknown subject.
    ///
    /// # Example
    /// ```
    /// use u_timetable::conflict::ConflictGraph;
    /// use u_timetable::models::StudentGroup;
    ///
    /// let groups = vec![StudentGroup::new("G1", 30).with_subjects(["Math", "Physics"])];
    /// let graph = ConflictGraph::build(&["Math", "Physics", "Art"], &groups).unwrap();
    ///
    /// assert!(graph.conflicts("Math", "Physics"));
    /// assert!(!graph.conflicts("Math", "Art"));
    /// ```
    pub fn build<S: AsRef<str>>(subjects: &[S], groups: &[StudentGroup]) -> Result<Self> {
        let mut graph = UnGraph::with_capacity(subjects.len(), 0);
        let mut index = HashMap::with_capacity(subjects.len());

        for s in subjects {
            let name = s.as_ref();
            if index.contains_key(name) {
                return Err(TimetableError::invalid(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate subject ID: {name}"),
                )));
            }
            let node = graph.add_node(name.to_string());
            index.insert(name.to_string(), node);
        }

        let known: HashSet<&str> = index.keys().map(String::as_str).collect();
        check_subject_references(&known, groups)?;

        for g in groups {
            let nodes: Vec<NodeIndex> = g.distinct_subjects().iter().map(|s| index[*s]).collect();
            for (i, &a) in nodes.iter().enumerate() {
                for &b in &nodes[i + 1..] {
                    graph.update_edge(a, b, ());
                }
            }
        }

        debug!(
            subjects = graph.node_count(),
            edges = graph.edge_count(),
            "conflict graph built"
        );

        Ok(Self { graph, index })
    }

    /// Whether `a` and `b` must not share a slot.
    ///
    /// `false` for unknown subjects and for `a == b`.
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&na), Some(&nb)) if na != nb => self.graph.find_edge(na, nb).is_some(),
            _ => false,
        }
    }

    /// Subjects that must not share `subject`'s slot, in input order.
    ///
    /// Empty for unknown subjects.
    pub fn conflicting_subjects(&self, subject: &str) -> Vec<&str> {
        let Some(&node) = self.index.get(subject) else {
            return Vec::new();
        };
        self.neighbor_indices(node.index())
            .into_iter()
            .map(|i| self.graph[NodeIndex::new(i)].as_str())
            .collect()
    }

    /// Whether the subject is part of the graph.
    pub fn contains(&self, subject: &str) -> bool {
        self.index.contains_key(subject)
    }

    /// Number of subjects.
    pub fn subject_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct conflict pairs.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of subjects conflicting with `subject`.
    pub fn degree(&self, subject: &str) -> usize {
        self.index
            .get(subject)
            .map(|&n| self.graph.neighbors(n).count())
            .unwrap_or(0)
    }

    /// All conflict pairs `(a, b)` with `a` before `b` in input order.
    ///
    /// Sorted by `a`, then `b`.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(usize, usize)> = self
            .graph
            .edge_references()
            .map(|e| {
                let (s, t) = (e.source().index(), e.target().index());
                (s.min(t), s.max(t))
            })
            .collect();
        pairs.sort_unstable();
        pairs
            .into_iter()
            .map(|(a, b)| (self.name_at(a), self.name_at(b)))
            .collect()
    }

    /// Input-order position of a subject.
    pub(crate) fn position(&self, subject: &str) -> Option<usize> {
        self.index.get(subject).map(|n| n.index())
    }

    /// Subject name at an input-order position.
    pub(crate) fn name_at(&self, position: usize) -> &str {
        &self.graph[NodeIndex::new(position)]
    }

    /// Positions of the neighbours of a position, ascending.
    pub(crate) fn neighbor_indices(&self, position: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(position))
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out
    }
}
