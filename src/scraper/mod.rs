//! Best-effort vehicle attribute extraction from listing pages
//!
//! Listing sites have no stable markup, so this works on the visible text:
//! strip tags, then pattern-match year, price, and engine size. Anything
//! that can't be found stays `None` and the caller falls back to manual
//! input. Make and model are not extracted; they would need per-site
//! selectors.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::types::ScrapedListing;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Listing prices below this are treated as page noise, USD
const MIN_PLAUSIBLE_PRICE: i64 = 500;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20[1-2][0-9])\b").unwrap());
static PRICE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\$\s*([\d,]+)").unwrap(),
        Regex::new(r"(?i)usd[\s:]*([\d,]+)").unwrap(),
        Regex::new(r"(?i)fob[\s:]*([\d,]+)").unwrap(),
    ]
});
static ENGINE_LITERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:l\b|litre|liter)").unwrap());
static ENGINE_CC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{3,4})\s*cc\b").unwrap());

/// Fetch a listing URL and extract whatever attributes the page text yields.
///
/// Transport and HTTP failures are `Error::Scrape`; a page that yields no
/// attributes is a successful, all-`None` result.
pub fn scrape_listing(url: &str) -> Result<ScrapedListing> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Scrape(e.to_string()))?;

    let body = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|e| Error::Scrape(e.to_string()))?;

    Ok(extract_listing(&body))
}

/// Extract attributes from raw page HTML
pub fn extract_listing(html: &str) -> ScrapedListing {
    let text = visible_text(html);

    ScrapedListing {
        make: None,
        model: None,
        year: extract_year(&text),
        engine_size_liters: extract_engine_size(&text),
        fob_value_usd: extract_price(&text),
    }
}

fn visible_text(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    TAG_RE.replace_all(&without_scripts, " ").into_owned()
}

fn extract_year(text: &str) -> Option<i32> {
    YEAR_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_price(text: &str) -> Option<Decimal> {
    for re in PRICE_RES.iter() {
        for captures in re.captures_iter(text) {
            let digits: String = captures
                .get(1)
                .map(|m| m.as_str().chars().filter(|c| c.is_ascii_digit()).collect())
                .unwrap_or_default();
            if let Ok(value) = digits.parse::<Decimal>() {
                if value >= Decimal::from(MIN_PLAUSIBLE_PRICE) {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn extract_engine_size(text: &str) -> Option<Decimal> {
    if let Some(captures) = ENGINE_LITERS_RE.captures(text) {
        if let Ok(liters) = captures.get(1)?.as_str().parse::<Decimal>() {
            if liters > Decimal::ZERO && liters <= Decimal::from(10) {
                return Some(liters);
            }
        }
    }
    if let Some(captures) = ENGINE_CC_RE.captures(text) {
        if let Ok(cc) = captures.get(1)?.as_str().parse::<Decimal>() {
            if cc >= Decimal::from(500) {
                return Some(cc / Decimal::from(1_000));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><head><title>2019 Toyota Harrier</title>
        <script>var price = 99;</script></head>
        <body>
            <h1>Toyota Harrier Premium</h1>
            <p>Year: 2019</p>
            <p>Engine: 2.0L turbo</p>
            <p>FOB Price: $14,500</p>
        </body></html>
    "#;

    #[test]
    fn extracts_from_listing_page() {
        let listing = extract_listing(LISTING);
        assert_eq!(listing.year, Some(2019));
        assert_eq!(listing.engine_size_liters, Some(Decimal::new(20, 1)));
        assert_eq!(listing.fob_value_usd, Some(Decimal::from(14_500)));
        assert!(listing.make.is_none());
    }

    #[test]
    fn script_content_is_not_scanned() {
        // The 99 inside <script> must not surface as a price
        let listing = extract_listing("<script>$ 9,999,999</script><p>no price here</p>");
        assert_eq!(listing.fob_value_usd, None);
    }

    #[test]
    fn engine_size_from_cc() {
        let listing = extract_listing("<p>Engine capacity 1500cc, year 2018</p>");
        assert_eq!(listing.engine_size_liters, Some(Decimal::new(15, 1)));
        assert_eq!(listing.year, Some(2018));
    }

    #[test]
    fn small_dollar_amounts_are_noise() {
        let listing = extract_listing("<p>Shipping from $50. Price USD 13,200</p>");
        assert_eq!(listing.fob_value_usd, Some(Decimal::from(13_200)));
    }

    #[test]
    fn empty_page_yields_empty_listing() {
        assert!(extract_listing("<html><body>nothing</body></html>").is_empty());
    }
}
