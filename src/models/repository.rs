use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::error::LayoutError;
use crate::models::Commit;

/// The full input contract from the data-retrieval collaborator: an
/// already-decoded commit list, the branch names, and the designated
/// default branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryData {
    pub owner: String,
    pub repo: String,
    pub commits: Vec<Commit>,
    pub branches: Vec<String>,
    pub default_branch: String,
}

impl RepositoryData {
    /// Boundary validation. Duplicate hashes are malformed input and fail;
    /// inconsistent stats and an absent default branch are reported but
    /// tolerated, as are dangling parent references (their edges are simply
    /// omitted downstream).
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::with_capacity(self.commits.len());
        for commit in &self.commits {
            if !seen.insert(commit.hash.as_str()) {
                return Err(LayoutError::DuplicateHash(commit.hash.clone()));
            }
            if !commit.stats.is_consistent() {
                warn!(
                    hash = %commit.hash,
                    additions = commit.stats.additions,
                    deletions = commit.stats.deletions,
                    total = commit.stats.total,
                    "commit stats total does not match additions + deletions"
                );
            }
        }

        if !self.branches.iter().any(|b| b == &self.default_branch) {
            warn!(
                default_branch = %self.default_branch,
                "default branch is not a member of the branch list"
            );
        }

        Ok(())
    }

    /// Split commits into those with parseable timestamps and those without,
    /// for callers that choose to drop bad records instead of aborting the
    /// whole layout. The rejection reason accompanies each dropped commit.
    pub fn partition_valid(&self) -> (Vec<Commit>, Vec<(Commit, String)>) {
        let mut valid = Vec::with_capacity(self.commits.len());
        let mut rejected = Vec::new();
        for commit in &self.commits {
            match commit.parsed_date() {
                Ok(_) => valid.push(commit.clone()),
                Err(e) => {
                    warn!(hash = %commit.hash, date = %commit.date, error = %e,
                        "rejecting commit with malformed timestamp");
                    rejected.push((commit.clone(), e.to_string()));
                }
            }
        }
        (valid, rejected)
    }

    /// Unique author display names, sorted.
    pub fn authors(&self) -> Vec<String> {
        let mut authors: Vec<String> = self
            .commits
            .iter()
            .map(|c| c.author.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        authors.sort();
        authors
    }

    /// A copy of this repository restricted to the given commits and
    /// branches, preserving input order.
    pub fn with_selection(&self, commits: Vec<Commit>, branches: Vec<String>) -> Self {
        RepositoryData {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            commits,
            branches,
            default_branch: self.default_branch.clone(),
        }
    }
}
