use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::config::LayoutConfig;

/// Branch classification inferred from the branch name, used for lane
/// ordering priority and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    Main,
    Develop,
    Release,
    Feature,
    Bugfix,
    Hotfix,
    Other,
}

impl BranchKind {
    /// Infer the kind from the branch name. The default branch is always
    /// `Main`; prefixes are checked before the looser substring matches.
    pub fn classify(branch: &str, default_branch: &str) -> Self {
        if branch == default_branch {
            return BranchKind::Main;
        }
        if branch.starts_with("feature/") || branch.starts_with("feat/") {
            return BranchKind::Feature;
        }
        if branch.starts_with("bugfix/") || branch.starts_with("fix/") {
            return BranchKind::Bugfix;
        }
        if branch.starts_with("hotfix/") {
            return BranchKind::Hotfix;
        }
        if branch.contains("develop") {
            return BranchKind::Develop;
        }
        if branch.contains("release") {
            return BranchKind::Release;
        }
        BranchKind::Other
    }

    /// Ordering priority: main 0, develop 1, release 2, feature 3,
    /// bugfix 4, hotfix 5, other 6.
    pub fn priority(self) -> u8 {
        match self {
            BranchKind::Main => 0,
            BranchKind::Develop => 1,
            BranchKind::Release => 2,
            BranchKind::Feature => 3,
            BranchKind::Bugfix => 4,
            BranchKind::Hotfix => 5,
            BranchKind::Other => 6,
        }
    }
}

/// The bijection from branch name to lane index, plus the branches in lane
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneAssignment {
    pub lane_of: HashMap<String, usize>,
    pub ordered: Vec<String>,
}

/// Compute the total branch order and assign lane indices.
///
/// Sort key, ascending: is-default (default always first), branch-kind
/// priority, then lexicographic name — a total order, so equal-priority
/// branches still land deterministically.
pub fn assign_lanes(branches: &[String], default_branch: &str) -> LaneAssignment {
    let mut ordered: Vec<String> = branches.to_vec();
    ordered.sort_by_key(|branch| {
        (
            branch != default_branch,
            BranchKind::classify(branch, default_branch).priority(),
            branch.clone(),
        )
    });

    let lane_of = ordered
        .iter()
        .enumerate()
        .map(|(index, branch)| (branch.clone(), index))
        .collect();

    LaneAssignment { lane_of, ordered }
}

/// A fixed horizontal slot assigned to one branch for the duration of the
/// graph, with the metadata a renderer needs to label it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchLane {
    pub branch: String,
    pub index: usize,
    pub x: f32,
    pub color: String,
    pub is_default: bool,
    pub kind: BranchKind,
}

/// Build per-lane descriptors from an assignment.
pub fn build_lanes(
    assignment: &LaneAssignment,
    default_branch: &str,
    config: &LayoutConfig,
) -> Vec<BranchLane> {
    assignment
        .ordered
        .iter()
        .enumerate()
        .map(|(index, branch)| {
            let kind = BranchKind::classify(branch, default_branch);
            let is_default = branch == default_branch;
            BranchLane {
                branch: branch.clone(),
                index,
                x: index as f32 * config.lane_spacing + config.start_x,
                color: config.branch_colors.color_for(kind, is_default).to_string(),
                is_default,
                kind,
            }
        })
        .collect()
}
