//! Term Matcher Builder
//!
//! Turns free-text term lists into compiled, case-insensitive
//! whole-word alternations.

use anyhow::{Context, Result};
use regex::Regex;

/// Compiled "any of these terms" test. An empty matcher never matches.
#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    regex: Option<Regex>,
}

impl TermMatcher {
    /// Matcher with no terms
    pub fn empty() -> Self {
        Self { regex: None }
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().map(|re| re.is_match(text)).unwrap_or(false)
    }

    /// Source pattern, if any (for diagnostics)
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(|re| re.as_str())
    }
}

/// Build one matcher from an ordered term list.
///
/// Terms are trimmed and escaped; blank terms are dropped. The result is
/// `(?i)\b(?:t1|t2|...)\b`, or an empty matcher when nothing is left.
pub fn build_matcher<S: AsRef<str>>(terms: &[S]) -> Result<TermMatcher> {
    let escaped: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if escaped.is_empty() {
        return Ok(TermMatcher::empty());
    }

    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    let regex = Regex::new(&pattern)
        .with_context(|| format!("Failed to compile term pattern {}", pattern))?;

    Ok(TermMatcher { regex: Some(regex) })
}

/// Split pipe-delimited user input into trimmed, non-blank terms
pub fn split_terms(text: &str) -> Vec<String> {
    text.split('|')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_terms_match_nothing() {
        let m = build_matcher::<&str>(&[]).unwrap();
        assert!(m.is_empty());
        assert!(!m.is_match(""));
        assert!(!m.is_match("anything at all"));

        let blank = build_matcher(&["  ", ""]).unwrap();
        assert!(blank.is_empty());
        assert!(!blank.is_match(""));
    }

    #[test]
    fn test_case_insensitive_whole_word() {
        let m = build_matcher(&["stage", "Head of Sales"]).unwrap();
        assert!(m.is_match("Offre de STAGE commercial"));
        assert!(m.is_match("head of sales EMEA"));
        assert!(!m.is_match("Stagiaire commercial"));
        assert!(!m.is_match("backstage crew"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let m = build_matcher(&["Node.js", "v1.0"]).unwrap();
        assert!(m.is_match("Lead Node.js developer"));
        assert!(!m.is_match("Lead Nodexjs developer"));
        assert!(m.is_match("release v1.0 notes"));
        assert!(!m.is_match("release v100 notes"));
    }

    #[test]
    fn test_accented_terms() {
        let m = build_matcher(&["intérim", "télétravail"]).unwrap();
        assert!(m.is_match("Mission en Intérim"));
        assert!(m.is_match("télétravail partiel"));
    }

    #[test]
    fn test_split_terms() {
        assert_eq!(
            split_terms(" Directeur commercial| Head of Sales ||Sales Manager "),
            vec!["Directeur commercial", "Head of Sales", "Sales Manager"]
        );
        assert!(split_terms(" | ").is_empty());
    }
}
