use crate::data::{Branch, RollNo, RosterEntry, Student};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Roll numbers already seated somewhere in the current batch.
pub type UsedSet = HashSet<RollNo>;

/// Branch label -> eligible students, in roster order.
pub type BranchPools = HashMap<Branch, Vec<Student>>;

/// Groups the roster by branch, preserving roster order within each branch.
/// Entries that are not students, or that lack a roll number or a branch,
/// are dropped silently.
pub fn group_by_branch(roster: &[RosterEntry]) -> BranchPools {
    roster
        .iter()
        .filter(|entry| entry.role == "student")
        .filter_map(|entry| match (&entry.roll_no, &entry.branch) {
            (Some(roll_no), Some(branch)) if !roll_no.is_empty() && !branch.is_empty() => Some((
                branch.clone(),
                Student {
                    roll_no: roll_no.clone(),
                    branch: branch.clone(),
                },
            )),
            _ => None,
        })
        .into_group_map()
}

/// Students of `branch` not yet seated. A branch absent from the roster
/// counts as zero available, it is not an error.
pub fn available_count(pools: &BranchPools, branch: &str, used: &UsedSet) -> usize {
    pools
        .get(branch)
        .map(|students| students.iter().filter(|s| !used.contains(&s.roll_no)).count())
        .unwrap_or(0)
}
