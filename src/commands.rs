//! The two run modes behind the `set-plays` binary.

use crate::aggregate::aggregate;
use crate::counter::PlayCounter;
use crate::list::read_list;
use crate::sort::read_sorted;
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Default location of the set list, relative to the working directory.
pub const DEFAULT_LIST_PATH: &str = "../all-sets.md";

/// Annotate every set in the list with its play count and print totals.
pub async fn run_plays<C, W>(counter: &C, list_path: &Path, out: &mut W) -> Result<()>
where
    C: PlayCounter + ?Sized,
    W: Write,
{
    let entries = read_list(list_path)?;
    let report = aggregate(counter, &entries).await;
    log::info!(
        "Counted {} plays across {} sets",
        report.total_plays,
        report.total_sets
    );
    report.render(out)?;
    Ok(())
}

/// Print the list ordered by the play counts already written into it.
pub fn run_sort<W: Write>(list_path: &Path, out: &mut W) -> Result<()> {
    for line in read_sorted(list_path)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
