use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a listing card carries no readable title.
pub const UNTITLED: &str = "Sans titre";

/// Location used when a listing card carries no location.
pub const DEFAULT_LOCATION: &str = "France";

/// Listing sites a posting can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Apec,
    Indeed,
    Wttj,
    Hellowork,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Apec, Source::Indeed, Source::Wttj, Source::Hellowork];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Apec => "apec",
            Source::Indeed => "indeed",
            Source::Wttj => "wttj",
            Source::Hellowork => "hellowork",
        }
    }

    /// Tag used as a prefix in run log lines
    pub fn label(&self) -> &'static str {
        match self {
            Source::Apec => "APEC",
            Source::Indeed => "Indeed",
            Source::Wttj => "WTTJ",
            Source::Hellowork => "HelloWork",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw job posting as produced by a collector
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Posting {
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub location: String,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    pub source: Source,
}

impl Posting {
    /// Build a posting, substituting the placeholder title and location for blank values.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
        published_at: Option<String>,
        source: Source,
    ) -> Self {
        let title = title.into();
        let location = location.into();
        Posting {
            title: if title.trim().is_empty() { UNTITLED.to_string() } else { title },
            company: company.into(),
            location: if location.trim().is_empty() { DEFAULT_LOCATION.to_string() } else { location },
            url: url.into(),
            published_at: published_at.filter(|d| !d.trim().is_empty()),
            source,
        }
    }
}

/// A posting that survived scoring and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPosting {
    #[serde(flatten)]
    pub posting: Posting,
    pub score: u8,
}

/// Result of one search run: the ranked table and the diagnostic transcript.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub postings: Vec<ScoredPosting>,
    pub log: String,
}
