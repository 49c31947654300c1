//! Summing play counts across a set list and rendering the annotated list.

use crate::counter::PlayCounter;
use crate::links::{find_provider_links, Provider, ProviderLinks};
use crate::list::Entry;
use std::io::{self, Write};

/// Marker appended to play counts.
pub const PLAYS_MARKER: &str = "🎧";
/// Marker appended to the set total.
pub const SETS_MARKER: &str = "🎶";

/// Format a count as `950`, `1.5k` or `2.3M`.
pub fn format_plays(plays: u64) -> String {
    match plays {
        n if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        n if n >= 1_000 => format!("{:.1}k", n as f64 / 1_000.0),
        n => n.to_string(),
    }
}

/// Output line for a linked set.
pub fn format_linked_line(name: &str, link: &str, plays: u64) -> String {
    if plays > 0 {
        format!("* [{name}]({link}) _//_ {}{PLAYS_MARKER}", format_plays(plays))
    } else {
        format!("* [{name}]({link})")
    }
}

/// Result of aggregating a set list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetReport {
    /// One line per unique entry, in list order
    pub lines: Vec<String>,
    pub total_plays: u64,
    /// Every unique entry counts, published or not
    pub total_sets: usize,
}

impl SetReport {
    pub fn total_plays_line(&self) -> String {
        format!(
            "Total plays: **{}{PLAYS_MARKER}**",
            format_plays(self.total_plays)
        )
    }

    pub fn total_sets_line(&self) -> String {
        format!("Total amount of sets: **{}{SETS_MARKER}**", self.total_sets)
    }

    /// Write the annotated list followed by the two summary lines.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.total_plays_line())?;
        writeln!(out, "{}", self.total_sets_line())
    }
}

/// Sum the plays of every provider present on a set page.
pub async fn count_plays<C: PlayCounter + ?Sized>(counter: &C, links: &ProviderLinks) -> u64 {
    let mut plays = 0;
    for (provider, url) in links.iter() {
        let count = match provider {
            Provider::Mixcloud => counter.mixcloud_plays(url).await,
            Provider::SoundCloud => counter.soundcloud_plays(url).await,
            Provider::YouTube => counter.youtube_plays(url).await,
        };
        log::info!("{provider}: {count} plays for {url}");
        plays += count;
    }
    plays
}

/// Resolve every entry in order and build the report.
///
/// Entries are processed one after another; a set page that cannot be fetched
/// is still listed, just without a play count.
pub async fn aggregate<C: PlayCounter + ?Sized>(counter: &C, entries: &[Entry]) -> SetReport {
    let mut report = SetReport::default();
    log::debug!("Processing {} unique sets", entries.len());

    for entry in entries {
        report.total_sets += 1;

        let link = match entry.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => {
                report.lines.push(entry.raw_line.clone());
                continue;
            }
        };

        let page = match counter.fetch_page(link).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Could not fetch set page {link}: {e}");
                report.lines.push(format_linked_line(&entry.name, link, 0));
                continue;
            }
        };

        let plays = count_plays(counter, &find_provider_links(&page)).await;
        report.total_plays += plays;
        report
            .lines
            .push(format_linked_line(&entry.name, link, plays));
    }

    report
}
