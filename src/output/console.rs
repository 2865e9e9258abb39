//! Console output utilities.

use console::style;

use crate::config::Config;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════╗
║     Catalog Dedup                                 ║
║     Remove duplicate product images               ║
╚═══════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(config: &Config, explicit_skus: usize) {
    let mode = if config.options.apply {
        "apply"
    } else {
        "dry-run"
    };
    let scope = if explicit_skus > 0 {
        format!("{} given SKU(s)", explicit_skus)
    } else {
        "auto-discovered candidates".to_string()
    };

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Database:   {}", config.catalog.database.display());
    println!("  Media root: {}", config.media.root.display());
    println!("  Store:      {}", config.catalog.store_id);
    println!("  Products:   {}", scope);
    println!("  Mode:       {} (unlink: {})", mode, config.options.unlink);
    println!();
}
