use crate::domain::Institution;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3 a[href]").expect("static selector"));

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?/5").expect("static regex"));

/// Ownership shows up under different class names across the five portals.
/// First selector that matches wins.
static OWNERSHIP_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [".ownership", ".college-type", ".institute-type", ".type"]
        .iter()
        .map(|css| Selector::parse(css).expect("static selector"))
        .collect()
});

/// A text line containing any of these is card chrome, not a location.
const LOCATION_MARKERS: &[&str] = &["Rating", "Ownership", "NIRF", "Rank", "Careers360"];

/// Parses every institution card on a listing page. Cards missing the title
/// anchor still produce a (URL-less) institution so the category keeps its
/// full card count in the output.
pub fn parse_listing(
    html: &str,
    card_selector: &str,
    domain: &str,
    base_url: &str,
) -> Result<Vec<Institution>> {
    let cards = Selector::parse(card_selector).map_err(|e| EtlError::InvalidConfigValueError {
        field: "card_selector".to_string(),
        value: card_selector.to_string(),
        reason: e.to_string(),
    })?;

    let doc = Html::parse_document(html);
    Ok(doc
        .select(&cards)
        .map(|card| parse_card(card, domain, base_url))
        .collect())
}

fn parse_card(card: ElementRef<'_>, domain: &str, base_url: &str) -> Institution {
    let mut institution = Institution::new(domain);

    // Trimmed text lines of the whole card, for pattern-based fields.
    let lines: Vec<&str> = card
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if let Some(link) = card.select(&TITLE_LINK).next() {
        institution.title = Some(link.text().map(str::trim).collect());
        if let Some(href) = link.value().attr("href") {
            institution.detail_url = Some(resolve_url(href, base_url));
        }
    }

    institution.rating = lines
        .iter()
        .find_map(|line| RATING_RE.find(line))
        .map(|m| m.as_str().to_string());

    institution.ownership = OWNERSHIP_SELECTORS.iter().find_map(|selector| {
        card.select(selector)
            .next()
            .map(|el| el.text().map(str::trim).collect())
    });

    institution.location = lines
        .iter()
        .find(|line| looks_like_location(line))
        .map(|line| line.to_string());

    institution
}

fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}

/// Inline-location heuristic: exactly one comma, no card-chrome markers.
fn looks_like_location(line: &str) -> bool {
    line.matches(',').count() == 1 && !LOCATION_MARKERS.iter().any(|m| line.contains(m))
}
