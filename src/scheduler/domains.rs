//! Slot legality tracking.
//!
//! Subjects and slots are dense indices here: subject `i` is the i-th
//! subject handed to the scheduler, slot `k` the k-th slot of the grid in
//! ascending order. `blockers[i]` lists the subjects that may not share a
//! slot with subject `i`.

/// Answers "may subject `i` take slot `k` right now?".
pub(crate) trait SlotDomains {
    /// Whether `slot` is legal for `subject` under `assignment`.
    fn is_legal(&self, subject: usize, slot: usize, assignment: &[Option<usize>]) -> bool;

    /// Number of legal slots for `subject` under `assignment`.
    fn legal_count(&self, subject: usize, assignment: &[Option<usize>]) -> usize;

    /// Called after `subject` was placed in `slot`.
    fn assign(&mut self, subject: usize, slot: usize);

    /// Called after `subject` was removed from `slot`.
    fn unassign(&mut self, subject: usize, slot: usize);
}

/// Recomputes legality from the assignment on every query.
pub(crate) struct RecomputedDomains<'a> {
    blockers: &'a [Vec<usize>],
    total_slots: usize,
}

impl<'a> RecomputedDomains<'a> {
    pub(crate) fn new(blockers: &'a [Vec<usize>], total_slots: usize) -> Self {
        Self {
            blockers,
            total_slots,
        }
    }
}

impl SlotDomains for RecomputedDomains<'_> {
    fn is_legal(&self, subject: usize, slot: usize, assignment: &[Option<usize>]) -> bool {
        self.blockers[subject]
            .iter()
            .all(|&b| assignment[b] != Some(slot))
    }

    fn legal_count(&self, subject: usize, assignment: &[Option<usize>]) -> usize {
        let mut taken = vec![false; self.total_slots];
        let mut blocked = 0;
        for &b in &self.blockers[subject] {
            if let Some(k) = assignment[b] {
                if !taken[k] {
                    taken[k] = true;
                    blocked += 1;
                }
            }
        }
        self.total_slots - blocked
    }

    fn assign(&mut self, _subject: usize, _slot: usize) {}

    fn unassign(&mut self, _subject: usize, _slot: usize) {}
}

/// Explicit per-subject domain table.
///
/// `blocked[i][k]` counts assigned blockers of subject `i` sitting in slot
/// `k`; slot `k` is in `i`'s domain iff the count is zero. `live[i]` is the
/// domain size.
pub(crate) struct DomainTable<'a> {
    blockers: &'a [Vec<usize>],
    blocked: Vec<Vec<u32>>,
    live: Vec<usize>,
}

impl<'a> DomainTable<'a> {
    pub(crate) fn new(blockers: &'a [Vec<usize>], total_slots: usize) -> Self {
        Self {
            blockers,
            blocked: vec![vec![0; total_slots]; blockers.len()],
            live: vec![total_slots; blockers.len()],
        }
    }
}

impl SlotDomains for DomainTable<'_> {
    fn is_legal(&self, subject: usize, slot: usize, _assignment: &[Option<usize>]) -> bool {
        self.blocked[subject][slot] == 0
    }

    fn legal_count(&self, subject: usize, _assignment: &[Option<usize>]) -> usize {
        self.live[subject]
    }

    fn assign(&mut self, subject: usize, slot: usize) {
        for &b in &self.blockers[subject] {
            let count = &mut self.blocked[b][slot];
            if *count == 0 {
                self.live[b] -= 1;
            }
            *count += 1;
        }
    }

    fn unassign(&mut self, subject: usize, slot: usize) {
        for &b in &self.blockers[subject] {
            let count = &mut self.blocked[b][slot];
            assert!(*count > 0, "domain table underflow for subject {b}");
            *count -= 1;
            if *count == 0 {
                self.live[b] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 - 1 - 2 path, 0 and 2 independent
    fn path_blockers() -> Vec<Vec<usize>> {
        vec![vec![1], vec![0, 2], vec![1]]
    }

    fn check<D: SlotDomains>(mut d: D) {
        let mut assignment = vec![None; 3];
        assert_eq!(d.legal_count(1, &assignment), 2);

        assignment[0] = Some(0);
        d.assign(0, 0);
        assert!(!d.is_legal(1, 0, &assignment));
        assert!(d.is_legal(1, 1, &assignment));
        assert!(d.is_legal(2, 0, &assignment));
        assert_eq!(d.legal_count(1, &assignment), 1);

        assignment[2] = Some(0);
        d.assign(2, 0);
        assert_eq!(d.legal_count(1, &assignment), 1);

        assignment[0] = None;
        d.unassign(0, 0);
        assert_eq!(d.legal_count(1, &assignment), 1);

        assignment[2] = None;
        d.unassign(2, 0);
        assert_eq!(d.legal_count(1, &assignment), 2);
        assert!(d.is_legal(1, 0, &assignment));
    }

    #[test]
    fn test_recomputed_domains() {
        let blockers = path_blockers();
        check(RecomputedDomains::new(&blockers, 2));
    }

    #[test]
    fn test_domain_table() {
        let blockers = path_blockers();
        check(DomainTable::new(&blockers, 2));
    }
}
