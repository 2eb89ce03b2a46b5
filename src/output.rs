//! CLI output formatting.
//!
//! Output lists the generated categories the way they appear in the showcase,
//! each with a positional index per sibling level, and the macro ids of its
//! images indented below:
//!
//! ```text
//! 001 Maler (2 images)
//!     @Maler.Koje_farbig
//!     @Maler.Pinsel
//!     001 Maler_Taetigkeiten (1 image)
//!         @Maler_Taetigkeiten.Grundflaeche
//! 002 Elektro (0 images)
//!
//! Generated 6 macros in 3 categories → makros.md
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::GenerationReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn image_count_label(n: usize) -> String {
    if n == 1 {
        "1 image".to_string()
    } else {
        format!("{n} images")
    }
}

/// Category tree with per-level positional indices.
fn format_tree(report: &GenerationReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.root_macros.is_empty() {
        lines.push(format!(
            "(image root) ({})",
            image_count_label(report.root_macros.len())
        ));
        for macro_id in &report.root_macros {
            lines.push(format!("{}@{}", indent(1), macro_id));
        }
    }

    // positions[d] = index of the current category at depth d
    let mut positions: Vec<usize> = Vec::new();
    for category in &report.categories {
        positions.truncate(category.depth + 1);
        while positions.len() < category.depth + 1 {
            positions.push(0);
        }
        positions[category.depth] += 1;

        lines.push(format!(
            "{}{} {} ({})",
            indent(category.depth),
            format_index(positions[category.depth]),
            category.label,
            image_count_label(category.macros.len())
        ));
        for macro_id in &category.macros {
            lines.push(format!("{}@{}", indent(category.depth + 1), macro_id));
        }
    }
    lines
}

/// Format the result of a run that wrote the macro file.
pub fn format_generate_output(report: &GenerationReport) -> Vec<String> {
    let mut lines = format_tree(report);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let target = report
        .output_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not written)".to_string());
    lines.push(format!(
        "Generated {} macros in {} categories → {}",
        report.image_count() * 2,
        report.categories.len(),
        target
    ));
    lines
}

/// Format the result of a dry run.
pub fn format_check_output(report: &GenerationReport) -> Vec<String> {
    let mut lines = format_tree(report);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Found {} in {} categories",
        image_count_label(report.image_count()),
        report.categories.len()
    ));
    lines
}

pub fn print_generate_output(report: &GenerationReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

pub fn print_check_output(report: &GenerationReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
