//! Re-ordering an already annotated list by play count.
//!
//! Nothing is fetched here; counts come from the annotations written by
//! [`aggregate`](crate::aggregate).

use crate::list::is_list_item;
use crate::Result;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((https?://[^\s)]+)\)").unwrap());
static PLAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)([kM]?)🎧").unwrap());

/// A list line together with what was extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedLine {
    pub line: String,
    pub plays: u64,
    pub link: Option<String>,
}

/// Extract the play annotation of a line, 0 if there is none.
///
/// Both plain counts (`1234🎧`) and magnitude-formatted ones (`2.5k🎧`,
/// `1.2M🎧`) are understood.
pub fn extract_plays(line: &str) -> u64 {
    let Some(caps) = PLAYS.captures(line) else {
        return 0;
    };
    let multiplier = match &caps[2] {
        "k" => 1_000.0,
        "M" => 1_000_000.0,
        _ => 1.0,
    };
    caps[1]
        .parse::<f64>()
        .map(|value| (value * multiplier).round() as u64)
        .unwrap_or(0)
}

fn extract_link(line: &str) -> Option<String> {
    LINK.captures(line).map(|caps| caps[1].to_string())
}

/// Keep list items, drop repeated links, and stable-sort by plays descending.
pub fn sort_lines(text: &str) -> Vec<SortedLine> {
    let mut seen_links = HashSet::new();
    let mut lines = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if !is_list_item(trimmed) {
            continue;
        }

        let link = extract_link(trimmed);
        if let Some(link) = &link {
            if !seen_links.insert(link.clone()) {
                log::debug!("Skipping duplicate list line for {link}");
                continue;
            }
        }

        lines.push(SortedLine {
            line: trimmed.to_string(),
            plays: extract_plays(trimmed),
            link,
        });
    }

    lines.sort_by(|a, b| b.plays.cmp(&a.plays));
    lines
}

/// Read the list file and return its lines in play order.
pub fn read_sorted<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(sort_lines(&text).into_iter().map(|l| l.line).collect())
}
