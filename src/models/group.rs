//! Student group model.
//!
//! A group is a cohort of students sitting the same set of subjects.
//! Two subjects taken by one group can never share an exam slot.

use serde::{Deserialize, Serialize};

/// A group of students with common subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGroup {
    /// Unique group identifier.
    pub name: String,
    /// Subjects the group takes.
    pub subjects: Vec<String>,
    /// Number of students in the group (must be positive).
    pub size: u32,
}

impl StudentGroup {
    /// Creates a group with no subjects.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
            size,
        }
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Adds several subjects.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Whether the group takes `subject`.
    pub fn takes(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Distinct subjects in first-occurrence order.
    pub fn distinct_subjects(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.subjects.len());
        for s in &self.subjects {
            if !seen.contains(&s.as_str()) {
                seen.push(s);
            }
        }
        seen
    }
}
