use std::collections::HashSet;

use crate::domain::change::{ChangeBuckets, ChangeEntry};

pub const SHORT_PATH_MAX: usize = 26;

const SMALL_CHANGE_LIMIT: usize = 3;
const FILE_COUNT_SUFFIX_THRESHOLD: usize = 6;
const NO_FILES_PLACEHOLDER: &str = "No file list available.";

const ADDED_CAP: usize = 12;
const MODIFIED_CAP: usize = 14;
const DELETED_CAP: usize = 8;
const MOVED_CAP: usize = 6;
const OTHER_CAP: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub sections: Vec<BodySection>,
}

impl CommitMessage {
    pub fn from_buckets(buckets: &ChangeBuckets) -> Self {
        Self {
            subject: synthesize_subject(buckets),
            sections: synthesize_sections(buckets),
        }
    }

    pub fn body(&self) -> String {
        if self.sections.is_empty() {
            return NO_FILES_PLACEHOLDER.to_string();
        }
        self.sections
            .iter()
            .map(BodySection::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySection {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub hidden: usize,
}

impl BodySection {
    fn new(title: &'static str, items: Vec<String>, cap: usize) -> Self {
        let hidden = items.len().saturating_sub(cap);
        let lines = items.into_iter().take(cap).collect();
        Self {
            title,
            lines,
            hidden,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}:", self.title);
        for line in &self.lines {
            out.push_str("\n- ");
            out.push_str(line);
        }
        if self.hidden > 0 {
            out.push_str(&format!("\n…and {} more", self.hidden));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedList {
    pub text: String,
    pub remaining: usize,
}

pub fn nice_join<S: AsRef<str>>(items: &[S], max_show: usize) -> JoinedList {
    let mut seen = HashSet::new();
    let unique = items
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|item| seen.insert(*item))
        .collect::<Vec<_>>();

    let shown = &unique[..unique.len().min(max_show)];
    let text = match shown {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    };

    JoinedList {
        text,
        remaining: unique.len() - shown.len(),
    }
}

pub fn shorten_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();

    if segments.len() >= 2 {
        let tail = segments[segments.len() - 2..].join("/");
        if tail.chars().count() <= max_len {
            return tail;
        }
    }

    let basename = segments.last().copied().unwrap_or(path);
    if basename.chars().count() <= max_len {
        return basename.to_string();
    }

    let mut truncated = basename
        .chars()
        .take(max_len.saturating_sub(1))
        .collect::<String>();
    truncated.push('…');
    truncated
}

pub fn synthesize_subject(buckets: &ChangeBuckets) -> String {
    let total = buckets.total();
    let small = total <= SMALL_CHANGE_LIMIT;
    let max_show = if small { 3 } else { 2 };

    let mut phrases = Vec::new();
    for (verb, entries) in [
        ("Added", &buckets.added),
        ("Updated", &buckets.modified),
        ("Deleted", &buckets.deleted),
    ] {
        if let Some(phrase) = phrase(verb, entries, max_show) {
            phrases.push(phrase);
        }
    }

    for (verb, entries) in [("Renamed", &buckets.renamed), ("Copied", &buckets.copied)] {
        if small || entries.len() == total {
            if let Some(phrase) = phrase(verb, entries, max_show) {
                phrases.push(phrase);
            }
        }
    }

    let mut subject = if phrases.is_empty() {
        if total == 1 {
            "Updated 1 file".to_string()
        } else {
            format!("Updated {total} files")
        }
    } else {
        phrases.join("; ")
    };

    if !small && total > FILE_COUNT_SUFFIX_THRESHOLD {
        subject.push_str(&format!(" ({total} files)"));
    }
    subject
}

fn phrase(verb: &str, entries: &[ChangeEntry], max_show: usize) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let items = entries.iter().map(short_display).collect::<Vec<_>>();
    let joined = nice_join(&items, max_show);
    let mut phrase = format!("{verb} {}", joined.text);
    if joined.remaining > 0 {
        phrase.push_str(&format!(" (+{} more)", joined.remaining));
    }
    Some(phrase)
}

fn short_display(entry: &ChangeEntry) -> String {
    match entry {
        ChangeEntry::Path { path, .. } => shorten_path(path, SHORT_PATH_MAX),
        ChangeEntry::Moved { from, to, .. } => format!(
            "{} → {}",
            shorten_path(from, SHORT_PATH_MAX),
            shorten_path(to, SHORT_PATH_MAX)
        ),
    }
}

fn synthesize_sections(buckets: &ChangeBuckets) -> Vec<BodySection> {
    [
        BodySection::new("Added", plain_lines(&buckets.added), ADDED_CAP),
        BodySection::new("Modified", plain_lines(&buckets.modified), MODIFIED_CAP),
        BodySection::new("Deleted", plain_lines(&buckets.deleted), DELETED_CAP),
        BodySection::new("Renamed", moved_lines(&buckets.renamed), MOVED_CAP),
        BodySection::new("Copied", moved_lines(&buckets.copied), MOVED_CAP),
        BodySection::new("Other", tagged_lines(&buckets.other), OTHER_CAP),
    ]
    .into_iter()
    .filter(|section| !section.lines.is_empty())
    .collect()
}

fn plain_lines(entries: &[ChangeEntry]) -> Vec<String> {
    entries.iter().map(ChangeEntry::display).collect()
}

fn moved_lines(entries: &[ChangeEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry {
            ChangeEntry::Moved {
                similarity: Some(score),
                ..
            } if *score < 100 => format!("{} ({score}% similar)", entry.display()),
            _ => entry.display(),
        })
        .collect()
}

// Unmerged and unknown entries share a section, so each line names its kind.
fn tagged_lines(entries: &[ChangeEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("{} ({})", entry.display(), entry.kind().as_str()))
        .collect()
}
