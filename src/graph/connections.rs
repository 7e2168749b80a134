use std::collections::HashMap;

use crate::models::{Connection, PositionedCommit};

/// Connect consecutive commits of each branch, lane by lane, in the
/// positioned (newest-first) order.
pub fn branch_connections(
    positioned: &[PositionedCommit],
    ordered_branches: &[String],
) -> Vec<Connection> {
    let mut connections = Vec::new();
    for branch in ordered_branches {
        let on_branch: Vec<&PositionedCommit> = positioned
            .iter()
            .filter(|c| c.commit.branch == *branch)
            .collect();

        for pair in on_branch.windows(2) {
            connections.push(Connection::between(pair[0], pair[1], branch));
        }
    }
    connections
}

/// For every commit with two or more parents, emit one edge per parent on a
/// different branch, labeled with the parent's branch: "branch X was merged
/// into branch Y at commit C". Parents missing from the commit list are
/// tolerated; their edges are omitted.
pub fn merge_connections(positioned: &[PositionedCommit]) -> Vec<Connection> {
    let by_hash: HashMap<&str, &PositionedCommit> = positioned
        .iter()
        .map(|c| (c.commit.hash.as_str(), c))
        .collect();

    let mut connections = Vec::new();
    for commit in positioned.iter().filter(|c| c.is_merge_commit) {
        for parent_hash in &commit.commit.parents {
            let Some(parent) = by_hash.get(parent_hash.as_str()) else {
                continue;
            };
            if parent.commit.branch == commit.commit.branch {
                continue;
            }
            connections.push(Connection::between(parent, commit, &parent.commit.branch));
        }
    }
    connections
}

/// For every merge commit, connect it to the chronologically-next commit on
/// its own branch: work resumed after the merge, as opposed to work merged
/// in. At most one continuation per merge commit; none when the merge is
/// the branch's latest commit.
pub fn continuation_connections(positioned: &[PositionedCommit]) -> Vec<Connection> {
    let mut connections = Vec::new();
    for commit in positioned.iter().filter(|c| c.is_merge_commit) {
        let next = positioned
            .iter()
            .filter(|c| c.commit.branch == commit.commit.branch && c.timestamp > commit.timestamp)
            .min_by_key(|c| c.timestamp);

        if let Some(next) = next {
            connections.push(Connection::between(commit, next, &commit.commit.branch));
        }
    }
    connections
}
