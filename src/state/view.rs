use serde::{Deserialize, Serialize};

use crate::models::{Commit, RepositoryData};

/// Which facet the surrounding view is filtering on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Author,
    Branch,
}

/// Author selection: everything, or an explicit set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorFilter {
    #[default]
    All,
    Selected(Vec<String>),
}

impl AuthorFilter {
    fn matches(&self, author: &str) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Selected(authors) => authors.iter().any(|a| a == author),
        }
    }
}

/// Immutable view state passed into the pure filtering functions.
///
/// Interactions never mutate shared state: every `with_*`/`toggle_*` call
/// consumes the state and returns the next one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub author_filter: AuthorFilter,
    pub selected_branches: Vec<String>,
    pub view_mode: ViewMode,
}

impl ViewState {
    /// Initial state for a repository: everything selected, no search.
    pub fn for_repository(data: &RepositoryData) -> Self {
        ViewState {
            search_term: String::new(),
            author_filter: AuthorFilter::All,
            selected_branches: data.branches.clone(),
            view_mode: ViewMode::All,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Toggle a branch in or out of the selection.
    pub fn toggle_branch(mut self, branch: &str) -> Self {
        if let Some(index) = self.selected_branches.iter().position(|b| b == branch) {
            self.selected_branches.remove(index);
        } else {
            self.selected_branches.push(branch.to_string());
        }
        self
    }

    /// Toggle an author in or out of the selection. Toggling on top of
    /// `All` narrows to just that author.
    pub fn toggle_author(mut self, author: &str) -> Self {
        self.author_filter = match self.author_filter {
            AuthorFilter::All => AuthorFilter::Selected(vec![author.to_string()]),
            AuthorFilter::Selected(mut authors) => {
                if let Some(index) = authors.iter().position(|a| a == author) {
                    authors.remove(index);
                } else {
                    authors.push(author.to_string());
                }
                AuthorFilter::Selected(authors)
            }
        };
        self
    }

    pub fn select_all_authors(mut self) -> Self {
        self.author_filter = AuthorFilter::All;
        self
    }

    /// Whether one commit passes the search, author, and branch filters.
    pub fn matches(&self, commit: &Commit) -> bool {
        let matches_search = self.search_term.is_empty() || {
            let term = self.search_term.to_lowercase();
            commit.message.to_lowercase().contains(&term)
                || commit.author.to_lowercase().contains(&term)
                || commit.hash.contains(&self.search_term)
        };

        let matches_author = self.author_filter.matches(&commit.author);
        let matches_branch = self.selected_branches.iter().any(|b| b == &commit.branch);

        matches_search && matches_author && matches_branch
    }

    /// Pure filtering over a commit slice.
    pub fn filter<'a>(&self, commits: &'a [Commit]) -> Vec<&'a Commit> {
        commits.iter().filter(|c| self.matches(c)).collect()
    }

    /// Produce the filtered repository view fed to the layout engine:
    /// matching commits, branches restricted to the selection in their
    /// original order.
    pub fn apply(&self, data: &RepositoryData) -> RepositoryData {
        let commits = self.filter(&data.commits).into_iter().cloned().collect();
        let branches = data
            .branches
            .iter()
            .filter(|b| self.selected_branches.contains(b))
            .cloned()
            .collect();
        data.with_selection(commits, branches)
    }
}
