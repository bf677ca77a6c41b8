use anyhow::{Context, Result};
use job_search::scrapers::{collectors_for, CrawlContext};
use job_search::{logger, search, storage};
use log::info;

fn main() -> Result<()> {
    logger::init();
    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());

    // Load and validate configuration
    let config = storage::load_config(&root)?;
    let rules = config.validate().context("Invalid search configuration")?;
    let sources = config.selected_sources();
    info!(
        "Searching {} for {:?}",
        sources.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
        rules.keywords
    );

    let ctx = CrawlContext::new()?;
    let collectors = collectors_for(&sources);
    let outcome = search::run_search(&rules, &collectors, &ctx);

    let (csv_path, log_path) = storage::save_results(&root, &outcome)?;

    if outcome.postings.is_empty() {
        println!("No postings matched these criteria.");
    } else {
        println!("Top postings:");
        for scored in outcome.postings.iter().take(10) {
            let p = &scored.posting;
            println!("- [{}] {} ({}, {}) - {}", scored.score, p.title, p.company, p.source, p.url);
        }
    }
    println!("Results: {}", csv_path.display());
    println!("Log: {}", log_path.display());

    Ok(())
}
