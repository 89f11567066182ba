//! CLI output formatting for conversion runs.
//!
//! Output is **page-centric**: each converted page leads with its positional
//! index and title, with the source file and link count as indented context
//! lines.
//!
//! ```text
//! Pages
//! 001 Guide → docs/api/guide.vue
//!     Source: docs/api/guide.html
//!     Links: 3
//! 002 Home - Site → index.vue
//!     Source: index.html
//!
//! Converted 2 pages, 3 links (1 file skipped)
//! ```
//!
//! Each `format_*` function returns `Vec<String>` for testability; the
//! `print_*` wrappers write to stdout.

use crate::walk::ConvertReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format a conversion report.
///
/// `dry_run` changes the summary verb so `check` output doesn't claim files
/// were written.
pub fn format_convert_output(report: &ConvertReport, dry_run: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in report.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                page.title,
                page.destination
            ));
            lines.push(format!("    Source: {}", page.source));
            if page.links > 0 {
                lines.push(format!("    Links: {}", page.links));
            }
        }
        lines.push(String::new());
    }

    let verb = if dry_run { "Checked" } else { "Converted" };
    let mut summary = format!(
        "{} {}, {}",
        verb,
        plural(report.pages.len(), "page", "pages"),
        plural(report.total_links(), "link", "links")
    );
    if report.skipped > 0 {
        summary.push_str(&format!(
            " ({} skipped)",
            plural(report.skipped, "file", "files")
        ));
    }
    lines.push(summary);
    lines
}

/// Print a conversion report to stdout.
pub fn print_convert_output(report: &ConvertReport, dry_run: bool) {
    for line in format_convert_output(report, dry_run) {
        println!("{}", line);
    }
}
