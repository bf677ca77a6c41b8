use crate::rules::RuleSet;
use crate::types::Posting;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

// ============================================
// Score weights
// ============================================

const MUST_HAVE_TITLE: i32 = 40;
const MUST_HAVE_TEXT: i32 = 30;
const MUST_HAVE_MISSING: i32 = -10;
const KEYWORD_IN_TITLE: i32 = 20;
const SENIORITY: i32 = 15;
const CONTRACT_PREFERRED: i32 = 10;
const NICE_TO_HAVE: i32 = 15;
const REMOTE_OK: i32 = 5;
const LOCATION_BONUS: i32 = 10;
const COMPANY_WHITELISTED: i32 = 10;
const COMPANY_BLACKLISTED: i32 = -20;

/// Why a posting was rejected outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Excluded,
    ContractExcluded,
    AlreadyApplied(String),
}

/// Outcome of scoring one posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Score {
    Rejected(RejectReason),
    Kept(u8),
}

impl Score {
    /// Numeric value; a rejection counts as 0
    pub fn value(&self) -> u8 {
        match self {
            Score::Rejected(_) => 0,
            Score::Kept(s) => *s,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Score::Rejected(_))
    }
}

/// Check the hard-reject conditions, in order
fn hard_reject(posting: &Posting, rules: &RuleSet, text: &str) -> Option<RejectReason> {
    if rules.exclusions.is_match(&posting.title) || rules.exclusions.is_match(text) {
        return Some(RejectReason::Excluded);
    }

    if rules.contract_exclude.is_match(text) {
        return Some(RejectReason::ContractExcluded);
    }

    rules
        .already_applied_urls
        .iter()
        .find(|applied| posting.url.contains(applied.as_str()))
        .map(|applied| RejectReason::AlreadyApplied(applied.clone()))
}

/// Score a posting against the rule set.
///
/// Pure: the same posting and rules always give the same result.
pub fn score_posting(posting: &Posting, rules: &RuleSet) -> Score {
    let location = posting.location.to_lowercase();
    let text = format!("{} {} {}", posting.title, posting.company, location);

    if let Some(reason) = hard_reject(posting, rules, &text) {
        return Score::Rejected(reason);
    }

    let mut score: i32 = 0;

    if rules.must_have.is_match(&posting.title) {
        score += MUST_HAVE_TITLE;
    } else if rules.must_have.is_match(&text) {
        score += MUST_HAVE_TEXT;
    } else {
        score += MUST_HAVE_MISSING;
    }

    // Raw keyword in the title; stacks with the must-have title match
    let title_lower = posting.title.to_lowercase();
    if rules
        .keywords
        .iter()
        .any(|k| title_lower.contains(&k.to_lowercase()))
    {
        score += KEYWORD_IN_TITLE;
    }

    if rules.seniority.is_match(&text) {
        score += SENIORITY;
    }
    if rules.contract_prefer.is_match(&text) {
        score += CONTRACT_PREFERRED;
    }
    if rules.nice_to_have.is_match(&text) {
        score += NICE_TO_HAVE;
    }
    if rules.remote_ok.is_match(&text) {
        score += REMOTE_OK;
    }
    if rules.location_bonus.is_match(&location) {
        score += LOCATION_BONUS;
    }
    if rules.company_whitelist.is_match(&posting.company) {
        score += COMPANY_WHITELISTED;
    }
    if rules.company_blacklist.is_match(&posting.company) {
        score += COMPANY_BLACKLISTED;
    }

    Score::Kept(score.clamp(0, 100) as u8)
}

/// Parse an ISO-8601 publish date.
///
/// Accepts RFC 3339 (with offset or `Z`), naive date-times and plain dates.
/// Naive values are taken as UTC.
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = value.trim_end_matches('Z');
    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whether a posting's publish date falls inside the age window.
///
/// Absent or unparseable dates count as inside the window. A window too
/// large to represent as a duration has no limit.
pub fn within_age_window(published_at: Option<&str>, max_age_days: i64, now: DateTime<Utc>) -> bool {
    let Some(window) = Duration::try_days(max_age_days) else {
        return true;
    };
    match published_at.and_then(parse_published_at) {
        Some(published) => now - published <= window,
        None => true,
    }
}
