use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unmerged,
    Unknown,
}

impl ChangeKind {
    pub fn from_status(status: &str) -> Self {
        match status.chars().next() {
            Some('A') => ChangeKind::Added,
            Some('M') => ChangeKind::Modified,
            Some('D') => ChangeKind::Deleted,
            Some('R') => ChangeKind::Renamed,
            Some('C') => ChangeKind::Copied,
            Some('U') => ChangeKind::Unmerged,
            _ => ChangeKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
            ChangeKind::Copied => "copied",
            ChangeKind::Unmerged => "unmerged",
            ChangeKind::Unknown => "unknown",
        }
    }

    fn is_move(&self) -> bool {
        matches!(self, ChangeKind::Renamed | ChangeKind::Copied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEntry {
    Path { kind: ChangeKind, path: String },
    Moved {
        kind: ChangeKind,
        from: String,
        to: String,
        similarity: Option<u8>,
    },
}

impl ChangeEntry {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let fields = line.split('\t').map(str::trim).collect::<Vec<_>>();
        let status = fields[0];
        let kind = ChangeKind::from_status(status);

        if fields.len() == 1 {
            return Some(ChangeEntry::Path {
                kind: ChangeKind::Unknown,
                path: status.to_string(),
            });
        }

        if kind.is_move() {
            if fields.len() == 3 {
                return Some(ChangeEntry::Moved {
                    kind,
                    from: fields[1].to_string(),
                    to: fields[2].to_string(),
                    similarity: parse_similarity(status),
                });
            }
            let path = fields.last().copied().unwrap_or(status);
            return Some(ChangeEntry::Path {
                kind: ChangeKind::Unknown,
                path: path.to_string(),
            });
        }

        Some(ChangeEntry::Path {
            kind,
            path: fields[1].to_string(),
        })
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEntry::Path { kind, .. } | ChangeEntry::Moved { kind, .. } => *kind,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ChangeEntry::Path { path, .. } => path.clone(),
            ChangeEntry::Moved { from, to, .. } => format!("{from} → {to}"),
        }
    }
}

fn parse_similarity(status: &str) -> Option<u8> {
    let digits = status.get(1..)?;
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok().map(|score| score.min(100) as u8)
}

pub fn parse_name_status(text: &str) -> Vec<ChangeEntry> {
    text.lines().filter_map(ChangeEntry::parse).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBuckets {
    pub added: Vec<ChangeEntry>,
    pub modified: Vec<ChangeEntry>,
    pub deleted: Vec<ChangeEntry>,
    pub renamed: Vec<ChangeEntry>,
    pub copied: Vec<ChangeEntry>,
    pub other: Vec<ChangeEntry>,
}

impl ChangeBuckets {
    pub fn classify<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChangeEntry>,
    {
        let mut buckets = Self::default();
        for entry in entries {
            let bucket = match entry.kind() {
                ChangeKind::Added => &mut buckets.added,
                ChangeKind::Modified => &mut buckets.modified,
                ChangeKind::Deleted => &mut buckets.deleted,
                ChangeKind::Renamed => &mut buckets.renamed,
                ChangeKind::Copied => &mut buckets.copied,
                ChangeKind::Unmerged | ChangeKind::Unknown => &mut buckets.other,
            };
            bucket.push(entry);
        }

        for bucket in buckets.buckets_mut() {
            dedup_and_sort(bucket);
        }
        buckets
    }

    pub fn from_name_status(text: &str) -> Self {
        Self::classify(parse_name_status(text))
    }

    pub fn total(&self) -> usize {
        self.added.len()
            + self.modified.len()
            + self.deleted.len()
            + self.renamed.len()
            + self.copied.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn buckets_mut(&mut self) -> [&mut Vec<ChangeEntry>; 6] {
        [
            &mut self.added,
            &mut self.modified,
            &mut self.deleted,
            &mut self.renamed,
            &mut self.copied,
            &mut self.other,
        ]
    }
}

fn dedup_and_sort(bucket: &mut Vec<ChangeEntry>) {
    let mut seen = HashSet::new();
    bucket.retain(|entry| seen.insert(entry.display()));
    bucket.sort_by_key(ChangeEntry::display);
}
