use std::collections::{HashMap, HashSet};

use crate::domain::pull_request::OpenPullRequest;

#[derive(Debug, Clone, Default)]
pub struct BranchPrMatches {
    by_branch: HashMap<String, OpenPullRequest>,
}

impl BranchPrMatches {
    pub fn correlate(candidates: &[String], pull_requests: &[OpenPullRequest]) -> Self {
        let index = candidates
            .iter()
            .map(|name| name.to_lowercase())
            .collect::<HashSet<_>>();

        let mut by_branch = HashMap::new();
        for pr in pull_requests {
            let key = pr.head_ref.to_lowercase();
            // First match in API order wins.
            if index.contains(&key) {
                by_branch.entry(key).or_insert_with(|| pr.clone());
            }
        }
        Self { by_branch }
    }

    pub fn get(&self, branch: &str) -> Option<&OpenPullRequest> {
        self.by_branch.get(&branch.to_lowercase())
    }

    pub fn matched_count(&self) -> usize {
        self.by_branch.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionChoice {
    pub branch: String,
    pub pull_request: Option<OpenPullRequest>,
    pub selectable: bool,
}

impl DeletionChoice {
    pub fn label(&self) -> String {
        match &self.pull_request {
            Some(pr) => {
                let draft = if pr.is_draft { " [draft]" } else { "" };
                format!(
                    "{}  (open PR #{}{draft}: {})",
                    self.branch, pr.number, pr.title
                )
            }
            None => self.branch.clone(),
        }
    }
}

pub fn plan_deletion_choices(
    candidates: &[String],
    matches: &BranchPrMatches,
    allow_open_prs: bool,
) -> Vec<DeletionChoice> {
    candidates
        .iter()
        .map(|branch| {
            let pull_request = matches.get(branch).cloned();
            let selectable = allow_open_prs || pull_request.is_none();
            DeletionChoice {
                branch: branch.clone(),
                pull_request,
                selectable,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(number: u64, head_ref: &str) -> OpenPullRequest {
        OpenPullRequest {
            number,
            title: format!("PR {number}"),
            url: format!("https://github.com/acme/widgets/pull/{number}"),
            is_draft: false,
            head_ref: head_ref.to_string(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn correlation_ignores_case() {
        let matches = BranchPrMatches::correlate(&names(&["Feature/Foo"]), &[pr(7, "feature/foo")]);
        assert_eq!(matches.get("Feature/Foo").map(|pr| pr.number), Some(7));
        assert_eq!(matches.get("FEATURE/FOO").map(|pr| pr.number), Some(7));
    }

    #[test]
    fn ignores_pull_requests_for_other_branches() {
        let matches = BranchPrMatches::correlate(
            &names(&["feature/a"]),
            &[pr(1, "feature/b"), pr(2, "main")],
        );
        assert_eq!(matches.matched_count(), 0);
    }

    #[test]
    fn first_pull_request_wins_for_duplicate_head_refs() {
        // Duplicate head refs are not expected from the API; the tie-break is
        // API order, not recency.
        let matches = BranchPrMatches::correlate(
            &names(&["topic"]),
            &[pr(12, "topic"), pr(30, "TOPIC")],
        );
        assert_eq!(matches.matched_count(), 1);
        assert_eq!(matches.get("topic").map(|pr| pr.number), Some(12));
    }

    #[test]
    fn matched_branches_are_disabled_by_default() {
        let candidates = names(&["feature/a", "feature/b"]);
        let matches = BranchPrMatches::correlate(&candidates, &[pr(3, "feature/b")]);

        let choices = plan_deletion_choices(&candidates, &matches, false);
        assert!(choices[0].selectable);
        assert!(!choices[1].selectable);
        assert_eq!(choices[1].label(), "feature/b  (open PR #3: PR 3)");

        let overridden = plan_deletion_choices(&candidates, &matches, true);
        assert!(overridden.iter().all(|choice| choice.selectable));
    }

    #[test]
    fn label_marks_drafts() {
        let mut draft = pr(9, "wip");
        draft.is_draft = true;
        let choice = DeletionChoice {
            branch: "wip".to_string(),
            pull_request: Some(draft),
            selectable: false,
        };
        assert_eq!(choice.label(), "wip  (open PR #9 [draft]: PR 9)");
    }
}
