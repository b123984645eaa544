//! Terminal output: a live progress line per file and the result panel.

use std::io::Write;

use buzzer_upload::{UploadEvent, UploadOutcome};
use colored::Colorize;
use tokio::sync::mpsc;

const GIB: f64 = (1024 * 1024 * 1024) as f64;
const MIB: f64 = (1024 * 1024) as f64;

/// Renders upload events to stderr until the orchestrator drops its sender.
pub async fn run(mut events: mpsc::Receiver<UploadEvent>) {
    let mut progress = ProgressLine::default();
    while let Some(event) = events.recv().await {
        progress.handle(&event);
    }
}

/// Redraws one line per file, only when the shown percentage changes.
#[derive(Default)]
struct ProgressLine {
    /// Last drawn tenths of a percent.
    shown: Option<u64>,
}

impl ProgressLine {
    fn handle(&mut self, event: &UploadEvent) {
        match event {
            UploadEvent::FileStarted {
                file_name,
                total_bytes,
                parts,
            } => {
                self.shown = None;
                eprintln!(
                    "{} {} ({}, {} part{})",
                    "Uploading".cyan().bold(),
                    file_name,
                    human_size(*total_bytes),
                    parts,
                    if *parts == 1 { "" } else { "s" }
                );
            }
            UploadEvent::Progress { file_name, record } => {
                let tenths = (record.fraction() * 1000.0) as u64;
                if self.shown == Some(tenths) {
                    return;
                }
                self.shown = Some(tenths);
                eprint!(
                    "\r{}",
                    progress_text(file_name, record.bytes_uploaded, record.total_bytes)
                );
                let _ = std::io::stderr().flush();
            }
            UploadEvent::PartUploaded { .. } => {}
            UploadEvent::FileCommitted { file_name, .. } => {
                eprintln!();
                eprintln!("{} {}", "Committed".green().bold(), file_name);
            }
            UploadEvent::SkippedDirectory { path } => {
                eprintln!(
                    "{} {}",
                    "Multi-level folders are not supported, skipping:"
                        .red()
                        .bold(),
                    path.display()
                );
            }
            UploadEvent::Failed { file_name, error } => {
                eprintln!();
                eprintln!("{} {}: {}", "Failed".red().bold(), file_name, error);
            }
        }
    }
}

fn progress_text(file_name: &str, uploaded: u64, total: u64) -> String {
    let percent = if total == 0 {
        100.0
    } else {
        uploaded as f64 * 100.0 / total as f64
    };
    format!(
        "{file_name} {percent:>5.1}% {} / {}",
        human_size(uploaded),
        human_size(total)
    )
}

fn human_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.2} GiB", b / GIB)
    } else if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else {
        format!("{bytes} B")
    }
}

/// Result box: `File ID`, `File Name` and `File Link`, uncolored.
pub fn panel(outcome: &UploadOutcome) -> String {
    let rows = [
        format!("File ID     : {}", outcome.file_id),
        format!("File Name   : {}", outcome.file_name),
        format!("File Link   : {}", outcome.link),
    ];
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

    let border = "─".repeat(width + 4);
    let mut out = format!("╭{border}╮\n");
    for row in &rows {
        let pad = width - row.chars().count();
        out.push_str(&format!("│  {row}{}  │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{border}╯"));
    out
}

/// Prints the result box to stdout.
pub fn print_outcome(outcome: &UploadOutcome) {
    println!();
    for line in panel(outcome).lines() {
        if line.starts_with('│') {
            println!("{}", line.yellow().bold());
        } else {
            println!("{}", line.green().bold());
        }
    }
}
