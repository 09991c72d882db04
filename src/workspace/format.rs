//! Format generation reports as text.

use crate::generator::GenerationReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a generation report as human-readable text.
pub fn format_generation_report_text(report: &GenerationReport) -> String {
    let mut out = String::new();
    let heading = if report.written {
        "Generated"
    } else {
        "Dry run"
    };
    out.push_str(&format!("{}\n\n", format_section_heading(heading)));
    out.push_str(&format!("  Root:   {}\n", report.root.display()));
    out.push_str(&format!("  Output: {}\n\n", report.output.display()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Item", "Count"]);
    table.add_row(vec!["Containers".to_string(), report.containers.to_string()]);
    table.add_row(vec!["Accessors".to_string(), report.accessors.to_string()]);
    table.add_row(vec![
        "Metadata skipped".to_string(),
        report.stats.skipped_metadata.to_string(),
    ]);
    table.add_row(vec!["Bytes".to_string(), report.bytes.to_string()]);
    out.push_str(&format!("{}\n", table));

    if report.stats.collisions > 0 {
        out.push_str(&format!(
            "\n{} {} file(s) shared an identifier with a sibling and were dropped\n",
            "warning:".yellow().bold(),
            report.stats.collisions
        ));
    }
    if report.stats.link_loops > 0 {
        out.push_str(&format!(
            "\n{} {} symlinked folder(s) pointed back at a parent and were not entered\n",
            "warning:".yellow().bold(),
            report.stats.link_loops
        ));
    }
    out
}

/// One `raw -> identifier` line per name.
pub fn format_sanitize_text(pairs: &[(String, String)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Identifier"]);
    for (raw, identifier) in pairs {
        let shown = if identifier.is_empty() {
            "(empty)".to_string()
        } else {
            identifier.clone()
        };
        table.add_row(vec![raw.clone(), shown]);
    }
    format!("{}", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ScanStats;
    use std::path::PathBuf;

    fn report(collisions: usize) -> GenerationReport {
        GenerationReport {
            root: PathBuf::from("/p/Assets/Resources"),
            output: PathBuf::from("/p/Assets/Data/ResourcesData.cs"),
            containers: 4,
            accessors: 12,
            bytes: 900,
            stats: ScanStats {
                directories: 3,
                files: 12 + collisions,
                skipped_metadata: 15,
                collisions,
                link_loops: 0,
            },
            written: true,
        }
    }

    #[test]
    fn test_report_lists_counts() {
        let text = format_generation_report_text(&report(0));
        assert!(text.contains("ResourcesData.cs"));
        assert!(text.contains("Accessors"));
        assert!(text.contains("12"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn test_report_warns_on_collisions() {
        let text = format_generation_report_text(&report(2));
        assert!(text.contains("warning"));
    }

    #[test]
    fn test_sanitize_table_marks_empty() {
        let text = format_sanitize_text(&[
            ("My-File_02".to_string(), "MyFile02".to_string()),
            ("!!!".to_string(), String::new()),
        ]);
        assert!(text.contains("MyFile02"));
        assert!(text.contains("(empty)"));
    }
}
