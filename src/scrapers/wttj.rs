use super::{build_search_url, element_text, enclosing, first_text, parse_document, selector};
use crate::normalize::absolutize;
use crate::types::{Posting, Source};
use anyhow::Result;

const ORIGIN: &str = "https://www.welcometothejungle.com";
const SEARCH_URL: &str = "https://www.welcometothejungle.com/fr/jobs";

pub fn search_url(keyword: &str) -> Result<String> {
    build_search_url(
        SEARCH_URL,
        &[("query", keyword), ("aroundQuery", "France"), ("sortBy", "publication")],
    )
}

pub fn parse(html: &str) -> Result<Vec<Posting>> {
    let document = parse_document(html);

    let anchor_sel = selector("article a[href*='/fr/offres-emploi/']")?;
    let company_sel = selector("[data-testid='company-name']")?;
    let location_sel = selector("[data-testid='job-location']")?;

    let postings = document
        .select(&anchor_sel)
        .map(|a| {
            let card = enclosing(a, &["article"]);
            Posting::new(
                element_text(&a),
                first_text(&card, &company_sel).unwrap_or_default(),
                first_text(&card, &location_sel).unwrap_or_default(),
                absolutize(ORIGIN, a.value().attr("href").unwrap_or_default()),
                None,
                Source::Wttj,
            )
        })
        .collect();

    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offer_links() {
        let html = r#"
<ul>
  <li><article>
    <a href="/fr/companies/acme/jobs/sales-manager_paris"><h4>Sales Manager</h4></a>
    <a href="/fr/offres-emploi/sales-manager-paris">Sales Manager - Paris</a>
    <span data-testid="company-name">Acme</span>
    <span data-testid="job-location">Paris</span>
  </article></li>
  <li><a href="/fr/offres-emploi/outside-article">Not a card</a></li>
</ul>
"#;
        let postings = parse(html).unwrap();
        assert_eq!(postings.len(), 1);
        let p = &postings[0];
        assert_eq!(p.title, "Sales Manager - Paris");
        assert_eq!(p.company, "Acme");
        assert_eq!(p.location, "Paris");
        assert_eq!(p.url, "https://www.welcometothejungle.com/fr/offres-emploi/sales-manager-paris");
        assert_eq!(p.source, Source::Wttj);
    }

    #[test]
    fn test_search_url() {
        let url = search_url("Sales Manager").unwrap();
        assert!(url.contains("query=Sales+Manager"));
        assert!(url.contains("sortBy=publication"));
    }
}
