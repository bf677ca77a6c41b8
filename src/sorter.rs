use crate::types::ScoredPosting;
use std::cmp::Ordering;

/// Ranking order: score (descending), then source name, then title
pub fn compare_postings(a: &ScoredPosting, b: &ScoredPosting) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.posting.source.as_str().cmp(b.posting.source.as_str()))
        .then_with(|| a.posting.title.cmp(&b.posting.title))
}

/// Sort postings into ranking order. Stable, so full ties keep encounter order.
pub fn sort_postings(postings: &mut [ScoredPosting]) {
    postings.sort_by(compare_postings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Posting, Source};

    fn scored(title: &str, source: Source, score: u8) -> ScoredPosting {
        ScoredPosting {
            posting: Posting::new(title, "", "", format!("https://x/{}", title), None, source),
            score,
        }
    }

    #[test]
    fn test_score_then_source_then_title() {
        let mut postings = vec![
            scored("B", Source::Wttj, 80),
            scored("Z", Source::Apec, 80),
            scored("Top", Source::Indeed, 60),
            scored("A", Source::Apec, 80),
        ];
        sort_postings(&mut postings);

        let order: Vec<(&str, u8)> = postings
            .iter()
            .map(|p| (p.posting.title.as_str(), p.score))
            .collect();
        assert_eq!(order, vec![("A", 80), ("Z", 80), ("B", 80), ("Top", 60)]);
    }

    #[test]
    fn test_source_order_is_by_name() {
        // "hellowork" < "indeed" alphabetically
        let mut postings = vec![scored("x", Source::Indeed, 50), scored("x", Source::Hellowork, 50)];
        sort_postings(&mut postings);
        assert_eq!(postings[0].posting.source, Source::Hellowork);
    }
}
