use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-commit change statistics as delivered by the data source.
///
/// `total` is trusted as given; the input boundary only warns when it does
/// not equal `additions + deletions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

impl CommitStats {
    pub fn is_consistent(&self) -> bool {
        self.total == self.additions + self.deletions
    }
}

/// A single commit record, immutable once produced by the data source.
///
/// `branch` is the single attributed branch assigned upstream by best-effort
/// heuristics, not full ancestry walking; the engine preserves that
/// simplification rather than reconstructing multi-branch membership.
/// `date` stays a raw ISO 8601 string until the layout boundary so that a
/// malformed timestamp can be reported instead of silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub branch: String,
    pub source_branch: String,
    pub parents: Vec<String>,
    #[serde(default)]
    pub stats: CommitStats,
}

impl Commit {
    /// Zero parents = root, one = regular, two or more = merge.
    pub fn is_merge_commit(&self) -> bool {
        self.parents.len() > 1
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Parse the stored ISO 8601 date. Failure is the caller's data-quality
    /// signal, never swallowed here.
    pub fn parsed_date(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.date).map(|dt| dt.with_timezone(&Utc))
    }
}

/// Merge state recovered from message text. The recognizers only ever see
/// already-merged history, so this carries a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStatus {
    Merged,
}

/// Provenance recovered for a merge commit: originating request number and
/// source/target branches. `number` is `-1` for plain branch merges that
/// carry no request number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeProvenance {
    pub number: i64,
    pub source_branch: String,
    pub target_branch: String,
    pub status: MergeStatus,
}

/// A [`Commit`] augmented with its 2D position and per-branch classification.
///
/// First/last flags are computed over the branch's own subsequence in
/// newest-first order: `is_first_in_branch` marks the branch's newest commit,
/// `is_last_in_branch` its oldest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedCommit {
    #[serde(flatten)]
    pub commit: Commit,
    pub x: f32,
    pub y: f32,
    pub is_merge_commit: bool,
    pub is_first_in_branch: bool,
    pub is_last_in_branch: bool,
    /// Calendar-day grouping key (`YYYY-MM-DD`).
    pub time_group: String,
    /// Lane index of the owning branch.
    pub branch_order: usize,
    pub provenance: Option<MergeProvenance>,
    /// Timestamp parsed once at the layout boundary.
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
}

/// A drawn line between two positions, labeled with the branch whose color
/// identifies it. Derived data: recomputed whenever positions change, never
/// persisted independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub branch: String,
}

impl Connection {
    pub fn between(from: &PositionedCommit, to: &PositionedCommit, branch: &str) -> Self {
        Connection {
            start_x: from.x,
            start_y: from.y,
            end_x: to.x,
            end_y: to.y,
            branch: branch.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, date: &str, parents: &[&str]) -> Commit {
        Commit {
            hash: hash.to_string(),
            message: "update".to_string(),
            author: "alice".to_string(),
            date: date.to_string(),
            branch: "main".to_string(),
            source_branch: "main".to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            stats: CommitStats::default(),
        }
    }

    #[test]
    fn test_merge_commit_classification() {
        assert!(!commit("a", "2024-01-01T00:00:00Z", &[]).is_merge_commit());
        assert!(!commit("b", "2024-01-01T00:00:00Z", &["a"]).is_merge_commit());
        assert!(commit("c", "2024-01-01T00:00:00Z", &["a", "b"]).is_merge_commit());
    }

    #[test]
    fn test_parsed_date_accepts_iso8601() {
        let c = commit("a", "2024-03-05T12:30:45Z", &[]);
        let ts = c.parsed_date().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-05T12:30:45+00:00");
    }

    #[test]
    fn test_parsed_date_rejects_garbage() {
        assert!(commit("a", "yesterday", &[]).parsed_date().is_err());
        assert!(commit("b", "", &[]).parsed_date().is_err());
    }

    #[test]
    fn test_stats_consistency() {
        let good = CommitStats { additions: 3, deletions: 2, total: 5 };
        let bad = CommitStats { additions: 3, deletions: 2, total: 9 };
        assert!(good.is_consistent());
        assert!(!bad.is_consistent());
    }

    #[test]
    fn test_commit_decodes_camel_case_json() {
        let json = r#"{
            "hash": "abc123",
            "message": "feat: add parser",
            "author": "alice",
            "date": "2024-01-15T10:30:00Z",
            "branch": "feature/parser",
            "sourceBranch": "feature/parser",
            "parents": ["def456"],
            "stats": { "additions": 10, "deletions": 2, "total": 12 }
        }"#;
        let c: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(c.source_branch, "feature/parser");
        assert_eq!(c.stats.total, 12);
        assert_eq!(c.summary(), "feat: add parser");
    }
}
