//! Reading the markdown list of sets.
//!
//! Only list items (`* ` after trimming) matter. Items carrying a markdown
//! link become linked [`Entry`] values; every other item is kept verbatim so it
//! can be echoed back unchanged.

use crate::Result;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// List item marker, including the separating space.
pub const LIST_MARKER: &str = "* ";

static LINK_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* \[(.*?)\]\((.*?)\)").unwrap());

/// One item from the set list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Set name, or the whole trimmed line for unlinked items
    pub name: String,
    /// Canonical set page, absent for unpublished items
    pub link: Option<String>,
    /// The trimmed source line
    pub raw_line: String,
}

impl Entry {
    pub fn linked(name: &str, link: &str, raw_line: &str) -> Self {
        Self {
            name: name.to_string(),
            link: Some(link.to_string()),
            raw_line: raw_line.to_string(),
        }
    }

    pub fn unlinked(raw_line: &str) -> Self {
        Self {
            name: raw_line.to_string(),
            link: None,
            raw_line: raw_line.to_string(),
        }
    }

    /// Identity used to collapse duplicates: the link, or the raw line when there is none.
    pub fn dedup_key(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => &self.raw_line,
        }
    }
}

/// Whether a trimmed line is a list item.
pub fn is_list_item(trimmed: &str) -> bool {
    trimmed.starts_with(LIST_MARKER)
}

/// Parse list text into unique entries, keeping first-seen order.
pub fn parse_list(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if !is_list_item(trimmed) {
            continue;
        }

        let entry = match LINK_ITEM.captures(trimmed) {
            Some(caps) if !caps[2].is_empty() => Entry::linked(&caps[1], &caps[2], trimmed),
            _ => Entry::unlinked(trimmed),
        };

        if !seen.insert(entry.dedup_key().to_string()) {
            log::debug!("Skipping duplicate set: {}", entry.dedup_key());
            continue;
        }

        match &entry.link {
            Some(link) => log::debug!("Found set (linked): {} ({link})", entry.name),
            None => log::debug!("Found set (unlinked): {}", entry.raw_line),
        }
        entries.push(entry);
    }

    log::debug!("Extracted {} unique sets", entries.len());
    entries
}

/// Read and parse the list file. Failing to read the file is the only error.
pub fn read_list<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    log::debug!("Opening set list: {}", path.display());
    let text = fs::read_to_string(path)?;
    Ok(parse_list(&text))
}
