/// Partial institution as parsed from one listing card. Enrichment and row
/// expansion happen later; a card without a detail link still yields one of
/// these (it just never gets enriched).
#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub title: Option<String>,
    pub detail_url: Option<String>,
    pub domain: String,
    pub rating: Option<String>,
    pub ownership: Option<String>,
    pub location: Option<String>,
}

impl Institution {
    pub fn new(domain: &str) -> Self {
        Self {
            title: None,
            detail_url: None,
            domain: domain.to_string(),
            rating: None,
            ownership: None,
            location: None,
        }
    }
}

/// One course scraped from an institution's courses page. All value fields
/// are raw site text until the cleaning stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub name: String,
    pub duration: Option<String>,
    pub fee: Option<String>,
    pub seats: Option<String>,
}

/// Per-URL bundle produced by the enrichment pool. Missing fields mean the
/// corresponding fetch or extraction came up empty; that is not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResult {
    pub location: Option<String>,
    pub established: Option<String>,
    pub courses: Vec<Course>,
}

/// Fully flattened record, one per institution x course pair (or one per
/// institution when no courses were found).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRow {
    pub title: Option<String>,
    pub domain: String,
    pub rating: Option<String>,
    pub ownership: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub established: Option<String>,
    pub course_name: Option<String>,
    pub course_duration: Option<String>,
    pub course_fee: Option<String>,
    pub course_seats: Option<String>,
}

/// Substrings that disqualify an enriched location string. The detail pages
/// sometimes put scholarship or programme links in the banner slot.
const LOCATION_DENYLIST: &[&str] = &["meritcum-means", "scholarship", "phd", "research"];

/// A location is usable only as "City, State": exactly two non-empty
/// comma-separated parts, none of the denylist markers.
pub fn is_valid_location(loc: &str) -> bool {
    if !loc.contains(',') {
        return false;
    }
    let lower = loc.to_lowercase();
    if LOCATION_DENYLIST.iter().any(|bad| lower.contains(bad)) {
        return false;
    }
    let parts: Vec<&str> = loc.split(',').map(str::trim).collect();
    parts.len() == 2 && parts.iter().all(|p| !p.is_empty())
}

/// Splits a validated "City, State" string.
pub fn split_location(loc: &str) -> Option<(String, String)> {
    let mut parts = loc.split(',').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(city), Some(state)) => Some((city.to_string(), state.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_city_state_location() {
        assert!(is_valid_location("Mumbai, Maharashtra"));
        assert!(is_valid_location("New Delhi, Delhi"));
    }

    #[test]
    fn test_denylisted_location_rejected() {
        assert!(!is_valid_location("MeritCum-Means Scholarship, Delhi"));
        assert!(!is_valid_location("PhD Admissions, Pune"));
    }

    #[test]
    fn test_commaless_location_rejected() {
        assert!(!is_valid_location("Engineering"));
        assert!(!is_valid_location(""));
    }

    #[test]
    fn test_three_part_location_rejected() {
        assert!(!is_valid_location("A, B, C"));
    }

    #[test]
    fn test_empty_part_rejected() {
        assert!(!is_valid_location("Mumbai, "));
    }

    #[test]
    fn test_split_location() {
        assert_eq!(
            split_location("Mumbai, Maharashtra"),
            Some(("Mumbai".to_string(), "Maharashtra".to_string()))
        );
    }
}
