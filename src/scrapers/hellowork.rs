use super::{build_search_url, element_text, enclosing, first_datetime, first_text, parse_document, selector};
use crate::normalize::absolutize;
use crate::types::{Posting, Source};
use anyhow::Result;

const ORIGIN: &str = "https://www.hellowork.com";
const SEARCH_URL: &str = "https://www.hellowork.com/fr-fr/emploi/recherche.html";

pub fn search_url(keyword: &str) -> Result<String> {
    build_search_url(SEARCH_URL, &[("k", keyword), ("l", "France"), ("sort", "DATE")])
}

pub fn parse(html: &str) -> Result<Vec<Posting>> {
    let document = parse_document(html);

    let anchor_sel = selector("article a[href*='/offres/'], article a[href*='/emploi/'], a[data-cy='offerLink']")?;
    let company_sel = selector("[data-cy='companyName'], [class*='company']")?;
    let location_sel = selector("[data-cy='jobLocation'], [class*='location']")?;
    let date_sel = selector("time[datetime]")?;

    let postings = document
        .select(&anchor_sel)
        .map(|a| {
            let card = enclosing(a, &["article"]);
            Posting::new(
                element_text(&a),
                first_text(&card, &company_sel).unwrap_or_default(),
                first_text(&card, &location_sel).unwrap_or_default(),
                absolutize(ORIGIN, a.value().attr("href").unwrap_or_default()),
                first_datetime(&card, &date_sel),
                Source::Hellowork,
            )
        })
        .collect();

    Ok(postings)
}
