use super::{build_search_url, element_text, first_datetime, first_text, parse_document, selector};
use crate::normalize::absolutize;
use crate::types::{Posting, Source};
use anyhow::Result;

const ORIGIN: &str = "https://www.apec.fr";
const SEARCH_URL: &str = "https://www.apec.fr/candidat/recherche-emploi.html/emploi";

pub fn search_url(keyword: &str) -> Result<String> {
    build_search_url(
        SEARCH_URL,
        &[("motsCles", keyword), ("lieux", "France"), ("sortsType", "DATE")],
    )
}

/// Parse an APEC result page; each `article` is one offer card
pub fn parse(html: &str) -> Result<Vec<Posting>> {
    let document = parse_document(html);

    let results_sel = selector("[data-testid='search-results'] article")?;
    let article_sel = selector("article")?;
    let title_sel = selector("h3, h2, a")?;
    let link_sel = selector("a[href]")?;
    let company_sel = selector("[data-testid='company-name'], .company")?;
    let location_sel = selector("[data-testid='job-location'], .location")?;
    let date_sel = selector("time[datetime]")?;

    let mut cards: Vec<_> = document.select(&results_sel).collect();
    if cards.is_empty() {
        cards = document.select(&article_sel).collect();
    }

    let postings = cards
        .iter()
        .map(|card| {
            let title = card.select(&title_sel).next().map(|el| element_text(&el)).unwrap_or_default();
            let href = card
                .select(&link_sel)
                .next()
                .and_then(|el| el.value().attr("href"))
                .unwrap_or_default();

            Posting::new(
                title,
                first_text(card, &company_sel).unwrap_or_default(),
                first_text(card, &location_sel).unwrap_or_default(),
                absolutize(ORIGIN, href),
                first_datetime(card, &date_sel),
                Source::Apec,
            )
        })
        .collect();

    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_LOCATION, UNTITLED};

    const FIXTURE: &str = r#"
<html><body>
  <article><h3>Ignored sidebar card</h3></article>
  <div data-testid="search-results">
    <article>
      <a href="/candidat/recherche-emploi.html/emploi/detail-offre/178000001W">
        <h3>Directeur commercial B2B</h3>
      </a>
      <p data-testid="company-name">Acme Industrie</p>
      <p data-testid="job-location">Lyon - 69</p>
      <time datetime="2025-03-10T08:00:00Z">10/03/2025</time>
    </article>
    <article>
      <a href="https://www.apec.fr/offre/2"></a>
    </article>
  </div>
</body></html>
"#;

    #[test]
    fn test_parse_cards() {
        let postings = parse(FIXTURE).unwrap();
        assert_eq!(postings.len(), 2);

        let first = &postings[0];
        assert_eq!(first.title, "Directeur commercial B2B");
        assert_eq!(first.company, "Acme Industrie");
        assert_eq!(first.location, "Lyon - 69");
        assert_eq!(
            first.url,
            "https://www.apec.fr/candidat/recherche-emploi.html/emploi/detail-offre/178000001W"
        );
        assert_eq!(first.published_at.as_deref(), Some("2025-03-10T08:00:00Z"));
        assert_eq!(first.source, Source::Apec);

        let second = &postings[1];
        assert_eq!(second.title, UNTITLED);
        assert_eq!(second.location, DEFAULT_LOCATION);
        assert_eq!(second.published_at, None);
    }

    #[test]
    fn test_falls_back_to_any_article() {
        let html = r#"<article><h2>Sales Manager</h2><a href="/offre/9">voir</a></article>"#;
        let postings = parse(html).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Sales Manager");
        assert_eq!(postings[0].url, "https://www.apec.fr/offre/9");
    }

    #[test]
    fn test_search_url_encodes_keyword() {
        let url = search_url("Head of Sales").unwrap();
        assert!(url.starts_with(SEARCH_URL));
        assert!(url.contains("motsCles=Head+of+Sales"));
        assert!(url.contains("lieux=France"));
        assert!(url.contains("sortsType=DATE"));
    }
}
