use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::rules::{RuleConfig, RuleSet};
use crate::types::{ScoredPosting, SearchOutcome, Source};

const CONFIG_FILE: &str = "config/search.yml";
const RESULTS_CSV: &str = "output/jobs.csv";
const RESULTS_LOG: &str = "output/search.log";

pub const CSV_HEADER: [&str; 7] = ["title", "company", "location", "url", "published_at", "source", "score"];

/// Search configuration file: which sites to query and the scoring rules
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub sources: Vec<Source>,
    pub rules: RuleConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: Source::ALL.to_vec(),
            rules: RuleConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Check the configuration and compile the rule set
    pub fn validate(&self) -> Result<RuleSet> {
        if self.sources.is_empty() {
            bail!("No sources selected");
        }
        if self.rules.keywords.terms().is_empty() {
            bail!("No keywords given");
        }
        self.rules.build()
    }

    /// Selected sources without repeats, in configured order
    pub fn selected_sources(&self) -> Vec<Source> {
        let mut selected = Vec::new();
        for source in &self.sources {
            if !selected.contains(source) {
                selected.push(*source);
            }
        }
        selected
    }
}

/// Load `config/search.yml` under `root`; defaults apply when the file is absent
pub fn load_config(root: &str) -> Result<SearchConfig> {
    let path = PathBuf::from(root).join(CONFIG_FILE);

    if !path.exists() {
        log::info!("No config at {:?}, using defaults", path);
        return Ok(SearchConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    let config: SearchConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config {:?}", path))?;

    Ok(config)
}

/// Write the ranked table as CSV. An empty table still gets its header.
pub fn write_csv<W: Write>(postings: &[ScoredPosting], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for scored in postings {
        let p = &scored.posting;
        let score = scored.score.to_string();
        csv_writer.write_record([
            p.title.as_str(),
            p.company.as_str(),
            p.location.as_str(),
            p.url.as_str(),
            p.published_at.as_deref().unwrap_or(""),
            p.source.as_str(),
            score.as_str(),
        ])?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Save the table and the log transcript under `root/output`
pub fn save_results(root: &str, outcome: &SearchOutcome) -> Result<(PathBuf, PathBuf)> {
    let csv_path = PathBuf::from(root).join(RESULTS_CSV);
    let log_path = PathBuf::from(root).join(RESULTS_LOG);

    if let Some(parent) = csv_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file = fs::File::create(&csv_path)
        .with_context(|| format!("Failed to create {:?}", csv_path))?;
    write_csv(&outcome.postings, file)
        .with_context(|| format!("Failed to write results to {:?}", csv_path))?;

    write_transcript(&log_path, &outcome.log)?;

    Ok((csv_path, log_path))
}

fn write_transcript(path: &Path, transcript: &str) -> Result<()> {
    let body = if transcript.is_empty() { "(empty)" } else { transcript };
    fs::write(path, format!("{}\n", body))
        .with_context(|| format!("Failed to write log to {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Posting;

    #[test]
    fn test_write_csv_quotes_fields() {
        let postings = vec![ScoredPosting {
            posting: Posting::new(
                "Sales Manager, B2B",
                "Acme \"Group\"",
                "Paris",
                "https://x/1",
                Some("2025-03-10".to_string()),
                Source::Apec,
            ),
            score: 85,
        }];

        let mut buf = Vec::new();
        write_csv(&postings, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("title,company,location,url,published_at,source,score"));
        assert_eq!(
            lines.next(),
            Some(r#""Sales Manager, B2B","Acme ""Group""",Paris,https://x/1,2025-03-10,apec,85"#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_csv_empty_has_header() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "title,company,location,url,published_at,source,score\n"
        );
    }

    #[test]
    fn test_config_yaml() {
        let yaml = r#"
sources: [indeed, apec, indeed]
rules:
  keywords: "Head of Sales"
  min_score: 50
"#;
        let config: SearchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.selected_sources(), vec![Source::Indeed, Source::Apec]);
        let rules = config.validate().unwrap();
        assert_eq!(rules.min_score, 50);
        assert_eq!(rules.keywords, vec!["Head of Sales"]);
    }

    #[test]
    fn test_validate_rejects_empty_selection() {
        let mut config = SearchConfig::default();
        config.sources.clear();
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.rules.keywords = " | ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config("/nonexistent/job_search/root").unwrap();
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.rules.min_score, 40);
    }
}
