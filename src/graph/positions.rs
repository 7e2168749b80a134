use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::graph::error::LayoutError;
use crate::graph::lanes::LaneAssignment;
use crate::models::{Commit, MergeProvenance, PositionedCommit};
use crate::state::config::LayoutConfig;

/// Parse every commit date up front. A single malformed timestamp fails the
/// layout; callers preferring to drop bad records use
/// `RepositoryData::partition_valid` first.
pub fn parse_dates(commits: &[Commit]) -> Result<HashMap<String, DateTime<Utc>>, LayoutError> {
    let mut dates = HashMap::with_capacity(commits.len());
    for commit in commits {
        let ts = commit
            .parsed_date()
            .map_err(|_| LayoutError::malformed_timestamp(&commit.hash, &commit.date))?;
        dates.insert(commit.hash.clone(), ts);
    }
    Ok(dates)
}

/// Assign every commit its 2D position and per-branch classification.
///
/// Commits are walked newest-first (ties broken by hash). Each **distinct**
/// timestamp takes the next value of a vertical cursor, so commits sharing
/// an instant share a y and parallel-branch work aligns horizontally.
/// x derives from the owning branch's lane; commits on branches missing
/// from the assignment fall back to lane 0.
pub fn assign_positions(
    commits: &[Commit],
    dates: &HashMap<String, DateTime<Utc>>,
    assignment: &LaneAssignment,
    provenance: &HashMap<String, MergeProvenance>,
    config: &LayoutConfig,
) -> Vec<PositionedCommit> {
    let mut sorted: Vec<&Commit> = commits.iter().collect();
    sorted.sort_by(|a, b| {
        dates[&b.hash]
            .cmp(&dates[&a.hash])
            .then_with(|| a.hash.cmp(&b.hash))
    });

    // One y per distinct timestamp, newest at the top.
    let mut y_of_time: HashMap<DateTime<Utc>, f32> = HashMap::new();
    let mut cursor = config.start_y;
    for commit in &sorted {
        let ts = dates[&commit.hash];
        y_of_time.entry(ts).or_insert_with(|| {
            let y = cursor;
            cursor += config.commit_spacing;
            y
        });
    }

    // Branch subsequences in the same newest-first order, for the
    // first/last-in-branch flags.
    let mut by_branch: HashMap<&str, Vec<&str>> = HashMap::new();
    for commit in &sorted {
        by_branch
            .entry(commit.branch.as_str())
            .or_default()
            .push(commit.hash.as_str());
    }

    sorted
        .iter()
        .map(|commit| {
            let ts = dates[&commit.hash];
            let lane = match assignment.lane_of.get(&commit.branch) {
                Some(index) => *index,
                None => {
                    debug!(branch = %commit.branch, hash = %commit.hash,
                        "commit branch missing from branch list, using lane 0");
                    0
                }
            };

            let branch_commits = &by_branch[commit.branch.as_str()];
            let is_first_in_branch = branch_commits.first() == Some(&commit.hash.as_str());
            let is_last_in_branch = branch_commits.last() == Some(&commit.hash.as_str());

            let provenance = provenance.get(&commit.hash).cloned();
            let mut commit = (*commit).clone();
            if let Some(p) = &provenance {
                if !p.source_branch.is_empty() {
                    commit.source_branch = p.source_branch.clone();
                }
            }

            PositionedCommit {
                x: lane as f32 * config.lane_spacing + config.start_x,
                y: y_of_time[&ts],
                is_merge_commit: commit.is_merge_commit(),
                is_first_in_branch,
                is_last_in_branch,
                time_group: ts.format("%Y-%m-%d").to_string(),
                branch_order: lane,
                provenance,
                timestamp: ts,
                commit,
            }
        })
        .collect()
}
