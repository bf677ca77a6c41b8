//! Search Orchestrator
//!
//! Runs every collector in order, deduplicates by URL, scores, filters
//! and ranks. Each call is an independent run with its own log and
//! dedup set.

use crate::filter::{parse_published_at, score_posting, within_age_window, Score};
use crate::normalize::dedupe_by_url;
use crate::rules::RuleSet;
use crate::run_log::RunLog;
use crate::scrapers::{Collector, CrawlContext};
use crate::sorter::sort_postings;
use crate::types::{Posting, ScoredPosting, SearchOutcome};
use chrono::{DateTime, Utc};

pub fn run_search(rules: &RuleSet, collectors: &[Box<dyn Collector>], ctx: &CrawlContext) -> SearchOutcome {
    run_search_at(rules, collectors, ctx, Utc::now())
}

/// Same as `run_search`, with the reference time for the age window given explicitly
pub fn run_search_at(
    rules: &RuleSet,
    collectors: &[Box<dyn Collector>],
    ctx: &CrawlContext,
    now: DateTime<Utc>,
) -> SearchOutcome {
    let mut log = RunLog::new();

    log.info("=== START ===");
    log.info(format!("Keywords: {:?}", rules.keywords));
    if rules.keywords.is_empty() {
        log.warn("[WARN] no keywords given, collectors will return nothing");
    }

    let raw = collect_all(rules, collectors, ctx, &mut log);

    let deduped = dedupe_by_url(raw);
    if deduped.missing_url > 0 {
        log.warn(format!("[WARN] {} postings without URL dropped", deduped.missing_url));
    }
    log.info(format!(
        "Total raw (deduplicated): {} ({} duplicates removed)",
        deduped.postings.len(),
        deduped.duplicates
    ));

    let mut kept = Vec::new();
    let mut rejected = 0usize;
    let mut too_old = 0usize;
    let mut undated = 0usize;

    for posting in deduped.postings {
        let score = match score_posting(&posting, rules) {
            Score::Rejected(_) => {
                rejected += 1;
                continue;
            }
            Score::Kept(score) => score,
        };
        if score < rules.min_score {
            continue;
        }

        let published_at = posting.published_at.as_deref();
        if published_at.and_then(parse_published_at).is_none() {
            undated += 1;
        }
        if !within_age_window(published_at, rules.max_age_days, now) {
            too_old += 1;
            continue;
        }

        kept.push(ScoredPosting { posting, score });
    }

    log.info(format!("Hard rejects (exclusions, contract, already applied): {}", rejected));
    if too_old > 0 {
        log.info(format!("Older than {} days: {}", rules.max_age_days, too_old));
    }
    if undated > 0 {
        log.info(format!("Kept without a usable publish date: {}", undated));
    }

    sort_postings(&mut kept);
    log.info(format!("Kept (score ≥ {}): {}", rules.min_score, kept.len()));

    SearchOutcome {
        postings: kept,
        log: log.into_transcript(),
    }
}

/// Run collectors in order; a failing collector contributes nothing
fn collect_all(
    rules: &RuleSet,
    collectors: &[Box<dyn Collector>],
    ctx: &CrawlContext,
    log: &mut RunLog,
) -> Vec<Posting> {
    let mut all = Vec::new();

    for collector in collectors {
        let source = collector.source();
        match collector.collect(&rules.keywords, ctx, log) {
            Ok(postings) => {
                log.info(format!("[{}] {} postings collected", source.label(), postings.len()));
                all.extend(postings);
            }
            Err(e) => {
                log.warn(format!("[WARN] {}: {:#}", source.label(), e));
            }
        }
    }

    all
}
