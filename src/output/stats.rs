//! Statistics reporting.

use console::style;

use crate::run::RunStats;

/// Print statistics for a completed run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Products scanned: {}", stats.products_scanned);
    println!("  Products changed: {}", stats.products_changed);
    println!("  Images removed:   {}", stats.images_removed);
    println!("  Files deleted:    {}", stats.files_deleted);
    if stats.save_failures > 0 {
        println!("  Save failures:    {}", style(stats.save_failures).red());
    }
    if stats.product_failures > 0 {
        println!("  Products failed:  {}", style(stats.product_failures).red());
    }
    if stats.dry_run {
        println!("  {}", style("(dry-run, nothing was modified)").yellow());
    }
    println!("{}", style("═".repeat(50)).dim());
}
