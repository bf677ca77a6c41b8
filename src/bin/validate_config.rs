//! Config Validation Binary
//!
//! Checks config/search.yml before a search:
//! - thresholds are in range
//! - at least one keyword and one source are selected
//! - every rule group compiles

use anyhow::{Context, Result};
use job_search::storage;

fn main() -> Result<()> {
    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());

    println!("=== Search Configuration Validator ===");

    let config = storage::load_config(&root).context("Failed to load search.yml")?;
    let rules = config.validate().context("Configuration is invalid")?;

    let sources = config.selected_sources();
    println!(
        "Sources ({}): {}",
        sources.len(),
        sources.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
    );
    println!("Keywords: {:?}", rules.keywords);
    println!("Minimum score: {}", rules.min_score);
    println!("Maximum age: {} days", rules.max_age_days);
    println!("Already applied URLs: {}", rules.already_applied_urls.len());

    for (name, matcher) in rules.groups() {
        match matcher.pattern() {
            Some(pattern) => println!("  {:<18} {}", name, pattern),
            None => println!("  {:<18} (empty, never matches)", name),
        }
    }

    println!("✅ Configuration OK");
    Ok(())
}
