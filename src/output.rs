//! Output formatting for CLI display

use crate::catalog::AssetRecord;
use colored::Colorize;

/// Format a record as a single result line
///
/// In quiet mode only the `uid` is printed, for piping into other tools.
#[must_use]
pub fn record_line(record: &AssetRecord, quiet: bool) -> String {
    if quiet {
        return record.uid().to_string();
    }

    let author = if record.author.is_empty() {
        String::new()
    } else {
        format!(" by {}", record.author)
    };

    format!(
        "  {} {}{} ({} faces, {} vertices)",
        record.uid().dimmed(),
        record.name.bold(),
        author,
        record.face_count,
        record.vertex_count
    )
}

/// Format the fields delivered by a detail fetch
///
/// Returns `None` if the detail has not arrived.
#[must_use]
pub fn detail_line(record: &AssetRecord) -> Option<String> {
    if !record.detail_fetched {
        return None;
    }

    let animated = match record.has_animation {
        Some(true) => "animated".green().to_string(),
        _ => "static".to_string(),
    };
    let rigged = match record.has_skin {
        Some(true) => "rigged",
        Some(false) => "unrigged",
        None => "rig unknown",
    };
    let license = record
        .license
        .as_ref()
        .and_then(|l| l.get("label"))
        .and_then(|l| l.as_str())
        .unwrap_or("license unknown");

    Some(format!("      {animated}, {rigged}, {}", license.cyan()))
}

/// Page footer showing which directions can be paged
#[must_use]
pub fn paging_hint(page: u32, has_previous: bool, has_next: bool) -> String {
    let mut hint = format!("  page {page}");
    if has_previous {
        hint.push_str(" | previous available");
    }
    if has_next {
        hint.push_str(" | more results");
    }
    hint.yellow().to_string()
}
