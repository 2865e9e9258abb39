//! Catalog Dedup - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use catalog_dedup::{
    catalog::CatalogStore,
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    output::{print_banner, print_config_summary, print_error, print_info, print_run_stats, print_warning},
    run::execute,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Database(_) | Error::ProductNotFound(_) => {
                    ExitCode::from(exit_codes::DATABASE_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Print configuration summary
    print_config_summary(&config, args.products.len());

    // Open the catalog and run
    let mut store = CatalogStore::open(&config.catalog.database)?;
    let stats = execute(&mut store, &config, &args.products)?;

    print_run_stats(&stats);

    Ok(())
}
