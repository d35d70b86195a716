use std::collections::BTreeSet;

const DEFAULT_PROTECTED: [&str; 4] = ["main", "master", "integration", "develop"];
const RELEASE_PREFIX: &str = "release/";

/// Branch names that never enter deletion flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBranches {
    names: BTreeSet<String>,
    prefixes: Vec<String>,
}

impl ProtectedBranches {
    /// A custom name set. The `release/` prefix rule always applies.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .map(|name: String| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            prefixes: vec![RELEASE_PREFIX.to_string()],
        }
    }

    pub fn is_protected(&self, branch: &str) -> bool {
        self.names.contains(branch)
            || self
                .prefixes
                .iter()
                .any(|prefix| branch.starts_with(prefix.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ProtectedBranches {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    pub is_current: bool,
    pub is_protected: bool,
}

impl LocalBranch {
    pub fn is_deletion_candidate(&self) -> bool {
        !self.is_current && !self.is_protected
    }
}

pub fn describe_branches(
    names: &[String],
    current: Option<&str>,
    protected: &ProtectedBranches,
) -> Vec<LocalBranch> {
    names
        .iter()
        .map(|name| LocalBranch {
            name: name.clone(),
            is_current: current == Some(name.as_str()),
            is_protected: protected.is_protected(name),
        })
        .collect()
}

pub fn deletion_candidates(
    names: &[String],
    current: Option<&str>,
    protected: &ProtectedBranches,
) -> Vec<String> {
    describe_branches(names, current, protected)
        .into_iter()
        .filter(LocalBranch::is_deletion_candidate)
        .map(|branch| branch.name)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_summary(prefix: Option<&str>, summary: &str) -> Self {
        let slug = slugify(summary);
        match prefix.map(|p| p.trim().trim_matches('/')) {
            Some(prefix) if !prefix.is_empty() => Self(format!("{prefix}/{slug}")),
            _ => Self(slug),
        }
    }
}

fn slugify(input: &str) -> String {
    let clean = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();

    let trimmed = clean.trim_matches('-');
    let mut result = String::with_capacity(trimmed.len());
    let mut prev_dash = false;
    for ch in trimmed.chars() {
        if ch == '-' {
            if !prev_dash {
                result.push(ch);
            }
            prev_dash = true;
        } else {
            result.push(ch);
            prev_dash = false;
        }
    }
    if result.is_empty() {
        "work".to_string()
    } else {
        result
    }
}
