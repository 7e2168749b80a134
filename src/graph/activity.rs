use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::PositionedCommit;

/// Commit activity attributed to one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorActivity {
    pub author: String,
    pub commits: usize,
    pub additions: u64,
    pub deletions: u64,
}

/// Commit activity on one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchActivity {
    pub branch: String,
    pub commits: usize,
    pub merges: usize,
}

/// One day of the trailing activity timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: String,
    pub commits: usize,
    pub additions: u64,
    pub deletions: u64,
}

/// Aggregate activity over a positioned commit set: totals, per-author and
/// per-branch breakdowns, and a trailing-7-day timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_commits: usize,
    pub total_merges: usize,
    pub total_authors: usize,
    pub total_branches: usize,
    pub total_additions: u64,
    pub total_deletions: u64,
    /// Sorted by commit count descending, then author name.
    pub author_activity: Vec<AuthorActivity>,
    /// Sorted by commit count descending, then branch name.
    pub branch_activity: Vec<BranchActivity>,
    /// Oldest day first, ending at `now`'s day.
    pub timeline: Vec<DayActivity>,
}

/// Summarize activity. `now` is passed in explicitly so the computation
/// stays pure and repeatable.
pub fn summarize(
    positioned: &[PositionedCommit],
    branches: &[String],
    now: DateTime<Utc>,
) -> ActivitySummary {
    let mut by_author: BTreeMap<&str, AuthorActivity> = BTreeMap::new();
    let mut by_branch: BTreeMap<&str, BranchActivity> = BTreeMap::new();
    for branch in branches {
        by_branch.insert(
            branch.as_str(),
            BranchActivity {
                branch: branch.clone(),
                commits: 0,
                merges: 0,
            },
        );
    }

    let mut total_merges = 0;
    let mut total_additions = 0;
    let mut total_deletions = 0;

    for c in positioned {
        if c.is_merge_commit {
            total_merges += 1;
        }
        total_additions += c.commit.stats.additions;
        total_deletions += c.commit.stats.deletions;

        let author = by_author
            .entry(c.commit.author.as_str())
            .or_insert_with(|| AuthorActivity {
                author: c.commit.author.clone(),
                commits: 0,
                additions: 0,
                deletions: 0,
            });
        author.commits += 1;
        author.additions += c.commit.stats.additions;
        author.deletions += c.commit.stats.deletions;

        if let Some(branch) = by_branch.get_mut(c.commit.branch.as_str()) {
            branch.commits += 1;
            if c.is_merge_commit {
                branch.merges += 1;
            }
        }
    }

    let total_authors = by_author.len();
    let mut author_activity: Vec<AuthorActivity> = by_author.into_values().collect();
    author_activity.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));

    let mut branch_activity: Vec<BranchActivity> = by_branch.into_values().collect();
    branch_activity.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.branch.cmp(&b.branch)));

    let timeline = (0..7)
        .rev()
        .map(|days_ago| {
            let date = (now - Duration::days(days_ago)).format("%Y-%m-%d").to_string();
            let day_commits: Vec<&PositionedCommit> = positioned
                .iter()
                .filter(|c| c.time_group == date)
                .collect();
            DayActivity {
                commits: day_commits.len(),
                additions: day_commits.iter().map(|c| c.commit.stats.additions).sum(),
                deletions: day_commits.iter().map(|c| c.commit.stats.deletions).sum(),
                date,
            }
        })
        .collect();

    ActivitySummary {
        total_commits: positioned.len(),
        total_merges,
        total_authors,
        total_branches: branches.len(),
        total_additions,
        total_deletions,
        author_activity,
        branch_activity,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::graph::lanes::assign_lanes;
    use crate::graph::positions::{assign_positions, parse_dates};
    use crate::models::{Commit, CommitStats};
    use crate::state::config::LayoutConfig;

    fn commit(hash: &str, branch: &str, author: &str, date: &str, parents: &[&str]) -> Commit {
        Commit {
            hash: hash.to_string(),
            message: "work".to_string(),
            author: author.to_string(),
            date: date.to_string(),
            branch: branch.to_string(),
            source_branch: branch.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            stats: CommitStats { additions: 10, deletions: 4, total: 14 },
        }
    }

    fn summary(commits: &[Commit], branches: &[&str], now: &str) -> ActivitySummary {
        let branches: Vec<String> = branches.iter().map(|b| b.to_string()).collect();
        let assignment = assign_lanes(&branches, "main");
        let dates = parse_dates(commits).unwrap();
        let positioned = assign_positions(
            commits,
            &dates,
            &assignment,
            &HashMap::new(),
            &LayoutConfig::default(),
        );
        let now = DateTime::parse_from_rfc3339(now).unwrap().with_timezone(&Utc);
        summarize(&positioned, &branches, now)
    }

    #[test]
    fn test_totals() {
        let commits = vec![
            commit("a", "main", "alice", "2024-01-01T00:00:00Z", &[]),
            commit("b", "feature/x", "bob", "2024-01-02T00:00:00Z", &["a"]),
            commit("c", "main", "alice", "2024-01-03T00:00:00Z", &["a", "b"]),
        ];
        let s = summary(&commits, &["main", "feature/x"], "2024-01-03T12:00:00Z");
        assert_eq!(s.total_commits, 3);
        assert_eq!(s.total_merges, 1);
        assert_eq!(s.total_authors, 2);
        assert_eq!(s.total_branches, 2);
        assert_eq!(s.total_additions, 30);
        assert_eq!(s.total_deletions, 12);
    }

    #[test]
    fn test_author_activity_sorted_by_commits() {
        let commits = vec![
            commit("a", "main", "bob", "2024-01-01T00:00:00Z", &[]),
            commit("b", "main", "alice", "2024-01-02T00:00:00Z", &["a"]),
            commit("c", "main", "alice", "2024-01-03T00:00:00Z", &["b"]),
        ];
        let s = summary(&commits, &["main"], "2024-01-03T12:00:00Z");
        assert_eq!(s.author_activity[0].author, "alice");
        assert_eq!(s.author_activity[0].commits, 2);
        assert_eq!(s.author_activity[1].author, "bob");
    }

    #[test]
    fn test_branch_activity_counts_merges() {
        let commits = vec![
            commit("a", "main", "alice", "2024-01-01T00:00:00Z", &[]),
            commit("b", "feature/x", "bob", "2024-01-02T00:00:00Z", &["a"]),
            commit("c", "main", "alice", "2024-01-03T00:00:00Z", &["a", "b"]),
        ];
        let s = summary(&commits, &["main", "feature/x"], "2024-01-03T12:00:00Z");
        let main = s.branch_activity.iter().find(|b| b.branch == "main").unwrap();
        assert_eq!(main.commits, 2);
        assert_eq!(main.merges, 1);
    }

    #[test]
    fn test_timeline_covers_seven_days_ending_today() {
        let commits = vec![
            commit("a", "main", "alice", "2024-01-05T08:00:00Z", &[]),
            commit("b", "main", "alice", "2024-01-07T08:00:00Z", &["a"]),
        ];
        let s = summary(&commits, &["main"], "2024-01-07T12:00:00Z");
        assert_eq!(s.timeline.len(), 7);
        assert_eq!(s.timeline[0].date, "2024-01-01");
        assert_eq!(s.timeline[6].date, "2024-01-07");
        assert_eq!(s.timeline[6].commits, 1);
        assert_eq!(s.timeline[4].commits, 1);
        assert_eq!(s.timeline[4].additions, 10);
        assert_eq!(s.timeline[5].commits, 0);
    }
}
