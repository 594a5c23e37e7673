use crate::error::ScanError;
use crate::types::{Census, ExtensionStat, ScanResult};
use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};

#[must_use]
pub fn format_report(result: &ScanResult) -> Vec<String> {
    let census = &result.census;
    let mut lines = Vec::new();

    lines.push("--- Scan Complete ---".to_string());
    lines.push(format!(
        "Scanned {} folders and {} files in {:.2} seconds.",
        group_thousands(census.folders),
        group_thousands(census.files),
        result.elapsed.as_secs_f64()
    ));

    if census.files > 0 {
        lines.push(String::new());
        lines.push("--- File Type Breakdown (most common first) ---".to_string());

        for (ext, stat) in sorted_extensions(census) {
            if ext.is_empty() {
                lines.push(format!(
                    "  {:>10} files with no extension",
                    group_thousands(stat.files)
                ));
            } else {
                lines.push(format!(
                    "  {:>10} {} files",
                    group_thousands(stat.files),
                    ext
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("=".repeat(50));
    lines.push("Ready for a new scan.".to_string());

    lines
}

#[must_use]
pub fn format_error(err: &ScanError) -> Vec<String> {
    match err {
        ScanError::Inaccessible { path, source } => vec![
            String::new(),
            "--- ERROR ---".to_string(),
            format!("Cannot open '{}': {source}.", path.display()),
        ],
        ScanError::Io(source) => vec![
            String::new(),
            "--- An unexpected error occurred ---".to_string(),
            format!("{source}"),
        ],
    }
}

pub fn print_table_report(result: &ScanResult) {
    let census = &result.census;

    println!("\n{}", "--- Scan Complete ---".cyan());
    println!(
        "Scanned {} folders and {} files in {:.2} seconds.",
        group_thousands(census.folders),
        group_thousands(census.files),
        result.elapsed.as_secs_f64()
    );

    if census.files == 0 {
        println!("No files found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Extension", "Files", "Data"]);

    for (ext, stat) in sorted_extensions(census) {
        let label = if ext.is_empty() {
            "(no extension)"
        } else {
            ext.as_str()
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(group_thousands(stat.files)),
            Cell::new(human_bytes::human_bytes(stat.bytes as f64)),
        ]);
    }

    // Summary Row
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(group_thousands(census.files)).add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(census.bytes as f64)).add_attribute(Attribute::Bold),
    ]);

    println!("{table}");
    println!(
        "Data volume: {}",
        human_bytes::human_bytes(census.bytes as f64).green()
    );
}

fn sorted_extensions(census: &Census) -> Vec<(&String, &ExtensionStat)> {
    let mut rows: Vec<_> = census.by_extension.iter().collect();
    // Most common first; equal counts fall back to the extension name
    // so the order is stable across runs
    rows.sort_by(|a, b| b.1.files.cmp(&a.1.files).then_with(|| a.0.cmp(b.0)));
    rows
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
