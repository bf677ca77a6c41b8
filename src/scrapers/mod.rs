mod apec;
mod hellowork;
mod indeed;
mod wttj;

use crate::delay_manager::{self, REQUEST_DELAY};
use crate::js_detector::block_reason;
use crate::run_log::RunLog;
use crate::types::{Posting, Source};
use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Produces raw postings for one listing site.
///
/// Zero results are `Ok(vec![])`; an `Err` means the whole source failed.
pub trait Collector {
    fn source(&self) -> Source;

    fn collect(&self, keywords: &[String], ctx: &CrawlContext, log: &mut RunLog) -> Result<Vec<Posting>>;
}

/// Retrieves one page of HTML
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest client with browser-like headers and a rotating User-Agent
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-FR,fr;q=0.9,en;q=0.8"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    /// GET a page with a random desktop User-Agent; non-2xx is an error
    fn fetch(&self, url: &str) -> Result<String> {
        let ua = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, ua)
            .send()?
            .error_for_status()?;

        Ok(resp.text()?)
    }
}

/// Page fetcher and pacing shared by every collector of a run
pub struct CrawlContext {
    fetcher: Box<dyn PageFetcher>,
    delay: Duration,
}

impl CrawlContext {
    /// Context backed by the HTTP fetcher
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Box::new(HttpFetcher::new()?)))
    }

    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            delay: REQUEST_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn fetch(&self, url: &str) -> Result<String> {
        self.fetcher.fetch(url)
    }
}

/// Collector for one of the built-in listing sites
pub struct SiteCollector {
    source: Source,
}

impl SiteCollector {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    fn search_url(&self, keyword: &str) -> Result<String> {
        match self.source {
            Source::Apec => apec::search_url(keyword),
            Source::Indeed => indeed::search_url(keyword),
            Source::Wttj => wttj::search_url(keyword),
            Source::Hellowork => hellowork::search_url(keyword),
        }
    }

    fn parse(&self, html: &str) -> Result<Vec<Posting>> {
        match self.source {
            Source::Apec => apec::parse(html),
            Source::Indeed => indeed::parse(html),
            Source::Wttj => wttj::parse(html),
            Source::Hellowork => hellowork::parse(html),
        }
    }
}

impl Collector for SiteCollector {
    fn source(&self) -> Source {
        self.source
    }

    fn collect(&self, keywords: &[String], ctx: &CrawlContext, log: &mut RunLog) -> Result<Vec<Posting>> {
        let label = self.source.label();
        let mut rows = Vec::new();

        for keyword in keywords {
            let url = self.search_url(keyword)?;
            log.info(format!("[{}] {} → {}", label, keyword, url));

            let fetched = ctx.fetch(&url);
            delay_manager::request_delay(ctx.delay());

            let html = match fetched {
                Ok(html) => html,
                Err(e) => {
                    log.warn(format!("[NET] {} -> {:#}", url, e));
                    continue;
                }
            };

            if let Some(reason) = block_reason(&html) {
                log.warn(format!("[{}] suspicious page ({:?}), skipping '{}'", label, reason, keyword));
                continue;
            }

            let cards = self
                .parse(&html)
                .with_context(|| format!("Failed to parse {} results for '{}'", label, keyword))?;
            log.info(format!("[{}] raw for '{}': {} cards", label, keyword, cards.len()));
            rows.extend(cards);
        }

        Ok(rows)
    }
}

/// Built-in collectors for the selected sources, in the given order
pub fn collectors_for(sources: &[Source]) -> Vec<Box<dyn Collector>> {
    sources
        .iter()
        .map(|s| Box::new(SiteCollector::new(*s)) as Box<dyn Collector>)
        .collect()
}

// ============================================
// HTML helpers shared by the site parsers
// ============================================

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector `{}`: {:?}", css, e))
}

/// Text content with whitespace collapsed
fn element_text(el: &ElementRef) -> String {
    el.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element under `scope` matching `sel`
fn first_text(scope: &ElementRef, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(|el| element_text(&el))
}

/// `datetime` attribute of the first matching `<time>` element
fn first_datetime(scope: &ElementRef, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .map(|s| s.trim().to_string())
}

/// Nearest ancestor whose tag is one of `names`, or the element itself
fn enclosing<'a>(el: ElementRef<'a>, names: &[&str]) -> ElementRef<'a> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| names.iter().any(|n| *n == a.value().name()))
        .unwrap_or(el)
}

/// Search URL with the keyword and a France-wide location
fn build_search_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    let url = url::Url::parse_with_params(base, params)
        .with_context(|| format!("Failed to build search URL from {}", base))?;
    Ok(url.to_string())
}

fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}
