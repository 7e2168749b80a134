use std::collections::HashSet;

use chrono::Duration;
use tracing::debug;

use crate::models::{Connection, PositionedCommit};

/// Base-branch fallbacks tried, in order, when picking the branch other
/// branches are assumed to have forked from. The default branch is always
/// tried first.
pub const BASE_BRANCH_CANDIDATES: [&str; 4] = ["develop", "dev", "main", "master"];

/// Pick the base branch: the default branch if present, otherwise the first
/// of the fixed fallback names found in the branch set, otherwise the
/// default name as given.
pub fn select_base_branch<'a>(branches: &'a [String], default_branch: &'a str) -> &'a str {
    std::iter::once(default_branch)
        .chain(BASE_BRANCH_CANDIDATES.iter().copied())
        .find(|candidate| branches.iter().any(|b| b == candidate))
        .unwrap_or(default_branch)
}

/// Heuristic fork point: the base commit closest in time at or before the
/// branch's oldest commit; if none precedes it, the base branch's
/// chronologically last element. `base_commits` is expected newest-first.
fn heuristic_fork_point<'a>(
    branch_commits: &[&'a PositionedCommit],
    base_commits: &[&'a PositionedCommit],
) -> Option<&'a PositionedCommit> {
    let oldest = branch_commits.iter().min_by_key(|c| c.timestamp)?;
    base_commits
        .iter()
        .find(|base| base.timestamp <= oldest.timestamp)
        .or_else(|| base_commits.last())
        .copied()
}

/// Exact fork point via common ancestor: the first base commit whose hash is
/// referenced as a parent anywhere in the branch.
fn common_ancestor<'a>(
    branch_commits: &[&'a PositionedCommit],
    base_commits: &[&'a PositionedCommit],
) -> Option<&'a PositionedCommit> {
    let parents: HashSet<&str> = branch_commits
        .iter()
        .flat_map(|c| c.commit.parents.iter().map(String::as_str))
        .collect();

    base_commits
        .iter()
        .find(|base| parents.contains(base.commit.hash.as_str()))
        .copied()
}

/// Locate the most plausible fork point of a branch on the base branch:
/// common-ancestor match first, timestamp heuristic as the fallback.
pub fn find_fork_point<'a>(
    branch_commits: &[&'a PositionedCommit],
    base_commits: &[&'a PositionedCommit],
) -> Option<&'a PositionedCommit> {
    common_ancestor(branch_commits, base_commits)
        .or_else(|| heuristic_fork_point(branch_commits, base_commits))
}

/// Build fork edges for every non-base branch with commits.
///
/// A connection runs from the inferred fork point to the branch's
/// first-in-branch commit. Near-simultaneous pairs (closer than
/// `suppression`) are skipped: a branch created and immediately populated
/// is not a meaningful fork.
pub fn fork_connections(
    positioned: &[PositionedCommit],
    ordered_branches: &[String],
    branches: &[String],
    default_branch: &str,
    suppression: Duration,
) -> Vec<Connection> {
    let base_branch = select_base_branch(branches, default_branch);
    let base_commits: Vec<&PositionedCommit> = positioned
        .iter()
        .filter(|c| c.commit.branch == base_branch)
        .collect();

    let mut connections = Vec::new();
    for branch in ordered_branches {
        if branch == base_branch {
            continue;
        }

        let branch_commits: Vec<&PositionedCommit> = positioned
            .iter()
            .filter(|c| c.commit.branch == *branch)
            .collect();
        let Some(first) = branch_commits.first() else {
            continue;
        };

        let Some(fork_point) = find_fork_point(&branch_commits, &base_commits) else {
            continue;
        };

        let gap = (fork_point.timestamp - first.timestamp).abs();
        if gap < suppression {
            debug!(branch = %branch, gap_secs = gap.num_seconds(),
                "skipping fork edge for near-simultaneous branch");
            continue;
        }

        connections.push(Connection::between(fork_point, first, branch));
    }

    connections
}
