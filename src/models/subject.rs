//! Subject model.
//!
//! A subject is one exam. Its enrollment is not supplied by the caller;
//! it is the sum of the sizes of the groups that take it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::StudentGroup;

/// An examinable subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub name: String,
    /// Number of students sitting this exam.
    pub enrollment: u32,
}

impl Subject {
    /// Creates a subject with zero enrollment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enrollment: 0,
        }
    }

    /// Sets the enrollment.
    pub fn with_enrollment(mut self, enrollment: u32) -> Self {
        self.enrollment = enrollment;
        self
    }

    /// Derives subjects with enrollment from the groups that take them.
    ///
    /// Preserves the order of `names`. A group listing a subject more than
    /// once counts once. Subjects no group takes get enrollment 0.
    ///
    /// # Panics
    /// If an enrollment overflows `u32`.
    pub fn derive_all<S: AsRef<str>>(names: &[S], groups: &[StudentGroup]) -> Vec<Subject> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let enrollment = groups
                    .iter()
                    .filter(|g| g.takes(name))
                    .fold(0u32, |acc, g| {
                        acc.checked_add(g.size)
                            .unwrap_or_else(|| panic!("enrollment of '{name}' overflows u32"))
                    });
                if enrollment == 0 {
                    warn!(subject = name, "subject is not taken by any group");
                }
                Subject::new(name).with_enrollment(enrollment)
            })
            .collect()
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
