//! Rule Set for posting scoring
//!
//! `RuleConfig` is the loosely typed user input (YAML or form fields);
//! `RuleSet` is the validated, compiled form used for one search.

use crate::patterns::{build_matcher, split_terms, TermMatcher};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A term list as written by the user: either `"a|b|c"` or a YAML list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TermInput {
    Piped(String),
    List(Vec<String>),
}

impl TermInput {
    pub fn terms(&self) -> Vec<String> {
        match self {
            TermInput::Piped(text) => split_terms(text),
            TermInput::List(items) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for TermInput {
    fn default() -> Self {
        TermInput::List(vec![])
    }
}

impl From<&str> for TermInput {
    fn from(text: &str) -> Self {
        TermInput::Piped(text.to_string())
    }
}

/// User-supplied rule configuration, before validation
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    pub keywords: TermInput,
    pub min_score: i64,
    pub max_age_days: i64,
    pub must_have: TermInput,
    pub nice_to_have: TermInput,
    pub exclusions: TermInput,
    pub seniority: TermInput,
    pub contract_prefer: TermInput,
    pub contract_exclude: TermInput,
    pub remote_ok: TermInput,
    pub cities_bonus: TermInput,
    pub company_whitelist: TermInput,
    pub company_blacklist: TermInput,
    pub already_applied_urls: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            keywords: "Directeur commercial|Head of Sales|Sales Manager".into(),
            min_score: 40,
            max_age_days: 14,
            must_have: TermInput::default(),
            nice_to_have: "b2b|industrie|retail|RSE|IoT".into(),
            exclusions: "stage|alternance|junior|freelance".into(),
            seniority: "head|directeur|director|senior|lead|responsable|manager".into(),
            contract_prefer: "cdi|permanent".into(),
            contract_exclude: "cdd|intérim|freelance|temporary|temp".into(),
            remote_ok: "télétravail|remote|hybride|hybrid".into(),
            cities_bonus: "France|Télétravail|Remote".into(),
            company_whitelist: TermInput::default(),
            company_blacklist: TermInput::default(),
            already_applied_urls: vec![],
        }
    }
}

impl RuleConfig {
    /// Config with every group empty, for callers that set only what they need
    pub fn blank() -> Self {
        Self {
            keywords: TermInput::default(),
            min_score: 0,
            max_age_days: 14,
            must_have: TermInput::default(),
            nice_to_have: TermInput::default(),
            exclusions: TermInput::default(),
            seniority: TermInput::default(),
            contract_prefer: TermInput::default(),
            contract_exclude: TermInput::default(),
            remote_ok: TermInput::default(),
            cities_bonus: TermInput::default(),
            company_whitelist: TermInput::default(),
            company_blacklist: TermInput::default(),
            already_applied_urls: vec![],
        }
    }

    /// Validate and compile into a `RuleSet`.
    ///
    /// When no must-have terms are given the keyword list stands in for them.
    pub fn build(&self) -> Result<RuleSet> {
        if self.min_score < 0 {
            bail!("min_score must not be negative (got {})", self.min_score);
        }
        if self.min_score > 100 {
            bail!("min_score must be at most 100 (got {})", self.min_score);
        }
        if self.max_age_days < 0 {
            bail!("max_age_days must not be negative (got {})", self.max_age_days);
        }

        let keywords = self.keywords.terms();
        let must_have_terms = self.must_have.terms();
        let must_have_terms = if must_have_terms.is_empty() {
            keywords.clone()
        } else {
            must_have_terms
        };

        // Location is lower-cased before matching
        let cities: Vec<String> = self
            .cities_bonus
            .terms()
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        let compile = |name: &str, terms: &[String]| {
            build_matcher(terms).with_context(|| format!("Failed to build {} matcher", name))
        };

        Ok(RuleSet {
            must_have: compile("must_have", &must_have_terms)?,
            nice_to_have: compile("nice_to_have", &self.nice_to_have.terms())?,
            exclusions: compile("exclusions", &self.exclusions.terms())?,
            seniority: compile("seniority", &self.seniority.terms())?,
            contract_prefer: compile("contract_prefer", &self.contract_prefer.terms())?,
            contract_exclude: compile("contract_exclude", &self.contract_exclude.terms())?,
            remote_ok: compile("remote_ok", &self.remote_ok.terms())?,
            location_bonus: compile("cities_bonus", &cities)?,
            company_whitelist: compile("company_whitelist", &self.company_whitelist.terms())?,
            company_blacklist: compile("company_blacklist", &self.company_blacklist.terms())?,
            keywords,
            min_score: self.min_score as u8,
            max_age_days: self.max_age_days,
            already_applied_urls: self
                .already_applied_urls
                .iter()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .collect(),
        })
    }
}

/// Compiled, immutable rules for one search
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub must_have: TermMatcher,
    pub nice_to_have: TermMatcher,
    pub exclusions: TermMatcher,
    pub seniority: TermMatcher,
    pub contract_prefer: TermMatcher,
    pub contract_exclude: TermMatcher,
    pub remote_ok: TermMatcher,
    pub location_bonus: TermMatcher,
    pub company_whitelist: TermMatcher,
    pub company_blacklist: TermMatcher,
    pub keywords: Vec<String>,
    pub min_score: u8,
    pub max_age_days: i64,
    pub already_applied_urls: Vec<String>,
}

impl RuleSet {
    /// Named groups, in declaration order
    pub fn groups(&self) -> [(&'static str, &TermMatcher); 10] {
        [
            ("must_have", &self.must_have),
            ("nice_to_have", &self.nice_to_have),
            ("exclusions", &self.exclusions),
            ("seniority", &self.seniority),
            ("contract_prefer", &self.contract_prefer),
            ("contract_exclude", &self.contract_exclude),
            ("remote_ok", &self.remote_ok),
            ("cities_bonus", &self.location_bonus),
            ("company_whitelist", &self.company_whitelist),
            ("company_blacklist", &self.company_blacklist),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_have_falls_back_to_keywords() {
        let mut cfg = RuleConfig::blank();
        cfg.keywords = "Sales Manager|Head of Sales".into();
        let rules = cfg.build().unwrap();
        assert!(rules.must_have.is_match("Senior Sales Manager"));
        assert_eq!(rules.keywords, vec!["Sales Manager", "Head of Sales"]);
    }

    #[test]
    fn test_explicit_must_have_wins() {
        let mut cfg = RuleConfig::blank();
        cfg.keywords = "Sales Manager".into();
        cfg.must_have = TermInput::List(vec!["Account Executive".to_string()]);
        let rules = cfg.build().unwrap();
        assert!(rules.must_have.is_match("account executive"));
        assert!(!rules.must_have.is_match("Sales Manager"));
    }

    #[test]
    fn test_rejects_out_of_range_thresholds() {
        let mut cfg = RuleConfig::blank();
        cfg.min_score = -5;
        assert!(cfg.build().is_err());

        cfg.min_score = 101;
        assert!(cfg.build().is_err());

        cfg.min_score = 40;
        cfg.max_age_days = -1;
        assert!(cfg.build().is_err());
    }

    #[test]
    fn test_blank_applied_urls_dropped() {
        let mut cfg = RuleConfig::blank();
        cfg.already_applied_urls = vec!["  ".to_string(), "https://a/1".to_string()];
        let rules = cfg.build().unwrap();
        assert_eq!(rules.already_applied_urls, vec!["https://a/1"]);
    }

    #[test]
    fn test_yaml_accepts_piped_and_list_terms() {
        let yaml = r#"
keywords: "Sales Manager | Head of Sales"
exclusions:
  - stage
  - alternance
min_score: 55
"#;
        let cfg: RuleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.keywords.terms(), vec!["Sales Manager", "Head of Sales"]);
        assert_eq!(cfg.exclusions.terms(), vec!["stage", "alternance"]);
        assert_eq!(cfg.min_score, 55);
        // untouched fields keep their defaults
        assert_eq!(cfg.max_age_days, 14);
        assert!(cfg.build().unwrap().seniority.is_match("Directeur régional"));
    }
}
