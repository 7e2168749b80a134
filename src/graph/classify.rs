use regex::Regex;
use tracing::warn;

use crate::graph::error::LayoutError;
use crate::models::{MergeProvenance, MergeStatus};

/// The kinds of commit message shapes the classifier recognizes, in the
/// priority order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerKind {
    /// "Merge pull request #N from owner/branch"
    PullRequest,
    /// "Merge branch 'x' into 'y'" (target optional)
    MergeBranch,
    /// Looser merge shape: optional quotes, case-insensitive
    SimpleMerge,
    /// "feat-123" style feature-branch reference
    FeatureBranch,
    /// Platform squash merge: trailing "(#N)"
    SquashMerge,
    /// "merged N commits into target from source"
    SquashMergeSimple,
}

/// One textual recognizer: a kind plus its compiled pattern.
#[derive(Debug)]
pub struct Recognizer {
    pub kind: RecognizerKind,
    pattern: Regex,
}

/// Pattern-matches commit message text against a fixed, ordered recognizer
/// table to recover merge provenance when it is not explicit in the data.
///
/// The priority is the table order, not code order: first match wins. The
/// feature-branch pattern deliberately precedes the squash-merge pattern,
/// preserving the established precedence for ambiguous messages like
/// "feat-5 (#5)".
#[derive(Debug)]
pub struct MessageClassifier {
    recognizers: Vec<Recognizer>,
}

impl MessageClassifier {
    pub fn new() -> Result<Self, LayoutError> {
        let table = [
            (
                RecognizerKind::PullRequest,
                r"Merge pull request #(\d+) from ([^/]+)/([^/\s]+)",
            ),
            (
                RecognizerKind::MergeBranch,
                r#"Merge branch ['"]([^'"]+)['"](?: into ['"]([^'"]+)['"])?"#,
            ),
            (
                RecognizerKind::SimpleMerge,
                r#"(?i)^merge (?:branch )?['"]?([^'"]+)['"]?(?: into ['"]?([^'"]+)['"]?)?"#,
            ),
            (RecognizerKind::FeatureBranch, r"(?i)feat[#\s-]*(\d+)"),
            (RecognizerKind::SquashMerge, r"\(#(\d+)\)$"),
            (
                RecognizerKind::SquashMergeSimple,
                r"(?i)merged (\d+) commits? into ([^/\s]+) from ([^/\s]+)",
            ),
        ];

        let mut recognizers = Vec::with_capacity(table.len());
        for (kind, pattern) in table {
            recognizers.push(Recognizer {
                kind,
                pattern: Regex::new(pattern)?,
            });
        }

        Ok(MessageClassifier { recognizers })
    }

    /// The recognizer order, exposed so the priority itself is testable.
    pub fn order(&self) -> Vec<RecognizerKind> {
        self.recognizers.iter().map(|r| r.kind).collect()
    }

    /// Try each recognizer in priority order against `message`; the first
    /// match yields the provenance. `fallback_branch` fills the source for
    /// shapes that do not name one; `default_branch` fills the target for
    /// shapes that do not name one. Returns `None` when nothing matches.
    pub fn classify(
        &self,
        message: &str,
        fallback_branch: &str,
        default_branch: &str,
    ) -> Option<MergeProvenance> {
        for recognizer in &self.recognizers {
            let Some(caps) = recognizer.pattern.captures(message) else {
                continue;
            };

            let provenance = match recognizer.kind {
                RecognizerKind::PullRequest => MergeProvenance {
                    number: match parse_number(recognizer.kind, &caps[1]) {
                        Some(n) => n,
                        None => continue,
                    },
                    source_branch: caps[3].to_string(),
                    target_branch: default_branch.to_string(),
                    status: MergeStatus::Merged,
                },
                RecognizerKind::MergeBranch | RecognizerKind::SimpleMerge => MergeProvenance {
                    number: -1,
                    source_branch: caps[1].to_string(),
                    target_branch: caps
                        .get(2)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_else(|| default_branch.to_string()),
                    status: MergeStatus::Merged,
                },
                RecognizerKind::FeatureBranch | RecognizerKind::SquashMerge => MergeProvenance {
                    number: match parse_number(recognizer.kind, &caps[1]) {
                        Some(n) => n,
                        None => continue,
                    },
                    source_branch: fallback_branch.to_string(),
                    target_branch: default_branch.to_string(),
                    status: MergeStatus::Merged,
                },
                RecognizerKind::SquashMergeSimple => MergeProvenance {
                    number: match parse_number(recognizer.kind, &caps[1]) {
                        Some(n) => n,
                        None => continue,
                    },
                    source_branch: caps[3].to_string(),
                    target_branch: caps[2].to_string(),
                    status: MergeStatus::Merged,
                },
            };

            return Some(provenance);
        }

        None
    }
}

/// Parse a numeric capture. The pattern guarantees digits, so the only
/// failure mode is overflow; the recognizer is skipped rather than
/// fabricating a sentinel number.
fn parse_number(kind: RecognizerKind, digits: &str) -> Option<i64> {
    match digits.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(?kind, digits, error = %e, "skipping recognizer with unparseable number capture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn classifier() -> MessageClassifier {
        MessageClassifier::new().unwrap()
    }

    #[test]
    fn test_recognizer_order_is_fixed() {
        assert_eq!(
            classifier().order(),
            vec![
                RecognizerKind::PullRequest,
                RecognizerKind::MergeBranch,
                RecognizerKind::SimpleMerge,
                RecognizerKind::FeatureBranch,
                RecognizerKind::SquashMerge,
                RecognizerKind::SquashMergeSimple,
            ]
        );
    }

    #[test]
    fn test_pull_request_merge() {
        let p = classifier()
            .classify("Merge pull request #42 from alice/feature-x", "main", "main")
            .unwrap();
        assert_eq!(p.number, 42);
        assert_eq!(p.source_branch, "feature-x");
        assert_eq!(p.target_branch, "main");
        assert_eq!(p.status, MergeStatus::Merged);
    }

    #[test]
    fn test_branch_merge_with_target() {
        let p = classifier()
            .classify("Merge branch 'dev' into 'main'", "main", "master")
            .unwrap();
        assert_eq!(p.number, -1);
        assert_eq!(p.source_branch, "dev");
        assert_eq!(p.target_branch, "main");
    }

    #[test]
    fn test_branch_merge_without_target_defaults() {
        let p = classifier()
            .classify("Merge branch 'hotfix/crash'", "main", "master")
            .unwrap();
        assert_eq!(p.source_branch, "hotfix/crash");
        assert_eq!(p.target_branch, "master");
    }

    #[test]
    fn test_simple_merge_is_case_insensitive() {
        let p = classifier()
            .classify("merge develop2", "main", "main")
            .unwrap();
        assert_eq!(p.number, -1);
        assert_eq!(p.source_branch, "develop2");
        assert_eq!(p.target_branch, "main");
    }

    #[test]
    fn test_feature_branch_reference() {
        let p = classifier()
            .classify("feat-123 add search box", "feature/search", "main")
            .unwrap();
        assert_eq!(p.number, 123);
        assert_eq!(p.source_branch, "feature/search");
        assert_eq!(p.target_branch, "main");
    }

    #[test]
    fn test_squash_merge_suffix() {
        let p = classifier()
            .classify("Add login screen (#17)", "feature/login", "main")
            .unwrap();
        assert_eq!(p.number, 17);
        assert_eq!(p.source_branch, "feature/login");
    }

    #[test]
    fn test_squash_merge_suffix_must_be_at_end() {
        let p = classifier().classify("(#17) add login screen", "main", "main");
        assert!(p.is_none());
    }

    #[test]
    fn test_generic_squash_merge() {
        let p = classifier()
            .classify("Merged 4 commits into main from feature-y", "x", "z")
            .unwrap();
        assert_eq!(p.number, 4);
        assert_eq!(p.source_branch, "feature-y");
        assert_eq!(p.target_branch, "main");
    }

    #[test_case("fix typo" ; "plain message")]
    #[test_case("Update README" ; "doc change")]
    #[test_case("refactor: split module" ; "conventional commit")]
    fn test_unrecognized_messages_yield_nothing(message: &str) {
        assert!(classifier().classify(message, "main", "main").is_none());
    }

    #[test]
    fn test_ambiguous_feat_and_squash_prefers_feature_branch() {
        // Established precedence: the feature pattern is tried before the
        // squash suffix, so both-matching messages classify as feature refs.
        let p = classifier().classify("feat-5 (#5)", "feature/5", "main").unwrap();
        assert_eq!(p.number, 5);
        assert_eq!(p.source_branch, "feature/5");
    }

    #[test]
    fn test_pull_request_wins_over_later_recognizers() {
        let p = classifier()
            .classify("Merge pull request #9 from bob/feat-12", "main", "main")
            .unwrap();
        assert_eq!(p.number, 9);
        assert_eq!(p.source_branch, "feat-12");
    }

    #[test]
    fn test_overflowing_number_skips_to_next_recognizer() {
        // The 30-digit suffix overflows i64; the squash recognizer is
        // skipped and no later recognizer matches.
        let message = "tidy (#999999999999999999999999999999)";
        assert!(classifier().classify(message, "main", "main").is_none());
    }
}
