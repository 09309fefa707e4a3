//! Progress and run summaries for the terminal

use crate::crawler::RunSummary;
use crate::progress::ProgressStatistics;

/// Width of the text progress bar
pub const BAR_WIDTH: usize = 50;

/// Renders `[####----] done/total`; None when there is nothing to track
pub fn progress_bar(stats: &ProgressStatistics, width: usize) -> Option<String> {
    if stats.total == 0 {
        return None;
    }

    let filled = width * stats.completed / stats.total;
    Some(format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        stats.completed,
        stats.total
    ))
}

/// Prints progress statistics to stdout
pub fn print_statistics(stats: &ProgressStatistics) {
    println!("=== Harvest Progress ===\n");
    println!("  Total entities: {}", stats.total);
    println!("  Completed: {}", stats.completed);
    println!("  Pending: {}", stats.pending);
    println!("  Progress: {:.1}%", stats.percentage);
    println!();

    if let Some(bar) = progress_bar(stats, BAR_WIDTH) {
        println!("{}", bar);
    }
}

/// Logs the end-of-session summary
pub fn log_run_summary(summary: &RunSummary) {
    if summary.interrupted {
        tracing::warn!("Harvest interrupted; pending entities resume on the next run");
    }
    tracing::info!("Processed: {} entities", summary.processed);
    tracing::info!("Failed: {} entities", summary.failed);
    tracing::info!(
        "Overall progress: {}/{} ({:.1}%)",
        summary.statistics.completed,
        summary.statistics.total,
        summary.statistics.percentage
    );
}
