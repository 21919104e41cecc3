use anyhow::Result;

use race_results::{config, logging, process_directory, report, RunRegistry};

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::new()?;

    let registry = match process_directory(&config.results_dir, config.html_dir.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", config.results_dir.display(), e);
            RunRegistry::new()
        }
    };

    if config.json {
        println!("{}", report::json_report(&registry)?);
    } else {
        println!("{}", report::summary_table(registry.stats()));
        println!();
        println!("{}", report::leaderboard_table(&registry.leaderboard()));
    }

    Ok(())
}
