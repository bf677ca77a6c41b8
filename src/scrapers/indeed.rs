use super::{build_search_url, element_text, enclosing, first_text, parse_document, selector};
use crate::normalize::absolutize;
use crate::types::{Posting, Source};
use anyhow::Result;

const ORIGIN: &str = "https://fr.indeed.com";
const SEARCH_URL: &str = "https://fr.indeed.com/jobs";

pub fn search_url(keyword: &str) -> Result<String> {
    build_search_url(SEARCH_URL, &[("q", keyword), ("l", "France"), ("sort", "date")])
}

/// Parse an Indeed result page.
///
/// Cards are located through their title anchor; the markup changes often,
/// so three anchor shapes are tried in turn.
pub fn parse(html: &str) -> Result<Vec<Posting>> {
    let document = parse_document(html);

    let anchor_selectors = [
        selector("a.jcs-JobTitle")?,
        selector("h2.jobTitle a")?,
        selector("a[href*='/rc/clk'], a[href*='/pagead/']")?,
    ];
    let company_sel = selector(".companyName, [data-testid='company-name']")?;
    let location_sel = selector(".companyLocation, [data-testid='text-location']")?;

    let anchors: Vec<_> = anchor_selectors
        .iter()
        .map(|sel| document.select(sel).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    let postings = anchors
        .into_iter()
        .map(|a| {
            let card = enclosing(a, &["div", "article"]);
            Posting::new(
                element_text(&a),
                first_text(&card, &company_sel).unwrap_or_default(),
                first_text(&card, &location_sel).unwrap_or_default(),
                absolutize(ORIGIN, a.value().attr("href").unwrap_or_default()),
                None,
                Source::Indeed,
            )
        })
        .collect();

    Ok(postings)
}
