mod error;
mod report;
mod scanner;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to scan
    root: Option<PathBuf>,

    /// Render the extension breakdown as a table
    #[arg(long, short = 't')]
    table: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // No directory given means no scan, same as dismissing a folder picker
    let Some(root) = args.root else {
        println!("Scan cancelled by user.");
        return;
    };

    println!(
        "{}",
        format!(
            "=== Folder Census: {} ===",
            Local::now().format("%Y-%m-%d %H:%M")
        )
        .cyan()
    );
    println!("Scanning files in '{}'...", root.display());
    println!("This may take a moment for large directories...");

    match scanner::scan(&root) {
        Ok(result) => {
            if args.table {
                report::print_table_report(&result);
            } else {
                for line in report::format_report(&result) {
                    println!("{line}");
                }
            }
        }
        Err(err) => {
            for line in report::format_error(&err) {
                eprintln!("{line}");
            }
            std::process::exit(1);
        }
    }
}
