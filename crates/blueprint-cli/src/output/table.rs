//! Table formatting utilities for CLI output.

use blueprint::functions::FunctionSpec;
use comfy_table::{presets, ContentArrangement, Table};

/// Per-file result of `blueprint check`.
pub struct FileReport {
    pub file: String,
    pub errors: usize,
    pub variables: usize,
    pub functions: usize,
    pub unknown_functions: usize,
}

/// Format the function catalog as an ASCII table.
pub fn format_functions_table(catalog: &[FunctionSpec]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Function", "Arguments", "Description"]);

    for spec in catalog {
        table.add_row(vec![
            spec.name.to_string(),
            spec.signature.to_string(),
            spec.summary.to_string(),
        ]);
    }

    table
}

/// Format check results as an ASCII table.
pub fn format_check_table(reports: &[FileReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Errors", "Variables", "Functions", "Unknown"]);

    for report in reports {
        table.add_row(vec![
            report.file.clone(),
            report.errors.to_string(),
            report.variables.to_string(),
            report.functions.to_string(),
            report.unknown_functions.to_string(),
        ]);
    }

    table
}
