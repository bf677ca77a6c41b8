//! Blocked-Page Detection
//!
//! Listing sites answer bots with captcha walls or JS-only shells.
//! These checks are heuristics; a false negative only yields zero cards.

/// Pages shorter than this are treated as shells
const MIN_PAGE_BYTES: usize = 2000;

const BLOCK_MARKERS: &[&str] = &[
    "captcha",
    "enable javascript",
    "are you human",
    "access denied",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    Marker(&'static str),
    ContentTooShort(usize),
}

/// Why a page looks like an anti-bot response, if it does
pub fn block_reason(html: &str) -> Option<BlockReason> {
    let lower = html.to_lowercase();
    if let Some(marker) = BLOCK_MARKERS.iter().find(|m| lower.contains(*m)) {
        return Some(BlockReason::Marker(*marker));
    }
    if lower.len() < MIN_PAGE_BYTES {
        return Some(BlockReason::ContentTooShort(lower.len()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(body: &str) -> String {
        format!("<html><body>{}{}</body></html>", body, "<p>offre</p>".repeat(300))
    }

    #[test]
    fn test_marker_detected() {
        let html = padded("Please complete the CAPTCHA to continue");
        assert_eq!(block_reason(&html), Some(BlockReason::Marker("captcha")));
    }

    #[test]
    fn test_short_page_detected() {
        assert!(matches!(
            block_reason("<html></html>"),
            Some(BlockReason::ContentTooShort(13))
        ));
    }

    #[test]
    fn test_normal_page_passes() {
        assert_eq!(block_reason(&padded("<article>Sales Manager</article>")), None);
    }
}
