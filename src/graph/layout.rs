use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::graph::classify::MessageClassifier;
use crate::graph::connections::{branch_connections, continuation_connections, merge_connections};
use crate::graph::error::LayoutError;
use crate::graph::forks::fork_connections;
use crate::graph::lanes::{assign_lanes, build_lanes, BranchLane};
use crate::graph::positions::{assign_positions, parse_dates};
use crate::models::{Connection, MergeProvenance, PositionedCommit, RepositoryData};
use crate::state::config::LayoutConfig;

/// Everything the rendering collaborator consumes: positioned commits, lane
/// descriptors, the branch-to-lane bijection, and the derived edge sets.
///
/// All vectors are built by walking ordered sequences, so repeated calls on
/// identical input produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub positioned_commits: Vec<PositionedCommit>,
    pub lanes: Vec<BranchLane>,
    pub lane_of: HashMap<String, usize>,
    pub branch_connections: Vec<Connection>,
    pub fork_edges: Vec<Connection>,
    pub merge_edges: Vec<Connection>,
    pub continuation_edges: Vec<Connection>,
}

/// Compute the full graph layout from scratch.
///
/// Pure and total over well-formed input: the only failures are malformed
/// timestamps and duplicate hashes. Empty commit or branch lists and
/// single-commit repositories are valid degenerate inputs producing empty
/// or trivial outputs.
pub fn compute_layout(
    data: &RepositoryData,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    data.validate()?;
    let dates = parse_dates(&data.commits)?;

    let classifier = MessageClassifier::new()?;
    let provenance: HashMap<String, MergeProvenance> = data
        .commits
        .iter()
        .filter_map(|c| {
            classifier
                .classify(&c.message, &c.branch, &data.default_branch)
                .map(|p| (c.hash.clone(), p))
        })
        .collect();

    let assignment = assign_lanes(&data.branches, &data.default_branch);
    let lanes = build_lanes(&assignment, &data.default_branch, config);
    let positioned = assign_positions(&data.commits, &dates, &assignment, &provenance, config);

    let branch_edges = branch_connections(&positioned, &assignment.ordered);
    let fork_edges = fork_connections(
        &positioned,
        &assignment.ordered,
        &data.branches,
        &data.default_branch,
        config.fork_suppression(),
    );
    let merge_edges = merge_connections(&positioned);
    let continuation_edges = continuation_connections(&positioned);

    debug!(
        commits = positioned.len(),
        lanes = lanes.len(),
        forks = fork_edges.len(),
        merges = merge_edges.len(),
        continuations = continuation_edges.len(),
        "layout computed"
    );

    Ok(LayoutResult {
        positioned_commits: positioned,
        lane_of: assignment.lane_of,
        lanes,
        branch_connections: branch_edges,
        fork_edges,
        merge_edges,
        continuation_edges,
    })
}
