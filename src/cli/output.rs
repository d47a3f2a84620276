//! Output formatting utilities

use crate::application::BuildReport;

/// Summarize a finished build for display
pub fn format_build_report(report: &BuildReport) -> String {
    let mut output = format!(
        "Built {} page{} ({} mode) into {}\n",
        report.pages_written,
        if report.pages_written == 1 { "" } else { "s" },
        report.mode,
        report.output_dir.display()
    );

    if report.files_copied > 0 {
        output.push_str(&format!("Copied {} static files\n", report.files_copied));
    }
    if let Some(feed) = &report.feed {
        output.push_str(&format!("Feed: {}\n", feed.display()));
    }
    if !report.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", report.tags.join(", ")));
    }

    output
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!("#{}\n", tag));
    }

    output
}
