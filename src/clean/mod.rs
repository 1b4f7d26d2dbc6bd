use crate::domain::OutputRow;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::sync::LazyLock;

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(\d+(?:\.\d+)?)\s*year"));
static MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(\d+(?:\.\d+)?)\s*month"));
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\d+(?:\.\d+)?"));
static CRORE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\d+(?:\.\d+)?\s*(?:crore|cr)"));
static LAKH_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\d+(?:\.\d+)?\s*(?:lakh|lac|l)"));
static THOUSAND_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\d+(?:\.\d+)?\s*k"));
static BARE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| re(r"^\d+(?:\.\d+)?$"));

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

/// "4 Years 6 Months" -> 4.5. Sums a year component and a month component
/// (months / 12), rounded to 2 decimals. Neither unit present -> None.
pub fn duration_in_years(duration: &str) -> Option<f64> {
    let duration = duration.to_lowercase();
    let mut total = 0.0;
    if let Some(m) = YEARS_RE.captures(&duration) {
        total += m[1].parse::<f64>().ok()?;
    }
    if let Some(m) = MONTHS_RE.captures(&duration) {
        total += m[1].parse::<f64>().ok()? / 12.0;
    }
    if total > 0.0 {
        Some((total * 100.0).round() / 100.0)
    } else {
        None
    }
}

/// Fee text to whole rupees. Unit rules are checked in priority order so a
/// string resolves through at most one of them: crore/cr before lakh/lac/l,
/// the bare-thousand "k" suffix last, then plain numbers.
pub fn fee_in_inr(fee: &str) -> Option<i64> {
    let fee = fee.to_lowercase().replace([',', '₹'], "").trim().to_string();

    let scale = if CRORE_RE.is_match(&fee) {
        1e7
    } else if LAKH_RE.is_match(&fee) {
        1e5
    } else if THOUSAND_RE.is_match(&fee) {
        1e3
    } else if BARE_NUMBER_RE.is_match(&fee) {
        1.0
    } else {
        return None;
    };

    let amount: f64 = NUMBER_RE.find(&fee)?.as_str().parse().ok()?;
    Some((amount * scale).round() as i64)
}

/// Leading numeric token of a "4.2/5" style rating. Missing or non-numeric
/// ratings stay null; the export-time fill policy decides what null becomes.
pub fn rating_value(rating: &str) -> Option<f64> {
    NUMBER_RE.find(rating)?.as_str().parse().ok()
}

/// Seat counts arrive as free text ("120 seats", "1,180"). Keeps digits only.
pub fn seat_count(seats: &str) -> Option<u32> {
    let digits: String = seats.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// One fully typed row: raw site text preserved alongside derived numeric
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub domain: String,
    pub ownership: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub established: Option<String>,
    pub course_name: Option<String>,
    pub course_duration: Option<String>,
    pub course_fee: Option<String>,
    pub course_seats: Option<u32>,
    pub course_duration_years: Option<f64>,
    pub course_fee_inr: Option<i64>,
    pub rating_raw: Option<String>,
}

/// Derives the numeric columns for every row. Total per value: unparseable
/// input becomes null, never an error.
pub fn clean_rows(rows: &[OutputRow]) -> Vec<CleanRow> {
    rows.iter()
        .map(|row| CleanRow {
            title: row.title.clone(),
            rating: row.rating.as_deref().and_then(rating_value),
            domain: row.domain.clone(),
            ownership: row.ownership.clone(),
            location: row.location.clone(),
            city: row.city.clone(),
            state: row.state.clone(),
            established: row.established.clone(),
            course_name: row.course_name.clone(),
            course_duration: row.course_duration.clone(),
            course_fee: row.course_fee.clone(),
            course_seats: row.course_seats.as_deref().and_then(seat_count),
            course_duration_years: row.course_duration.as_deref().and_then(duration_in_years),
            course_fee_inr: row.course_fee.as_deref().and_then(fee_in_inr),
            rating_raw: row.rating.clone(),
        })
        .collect()
}

/// Raw artifact: every column in first-seen order, nulls as empty cells.
pub const RAW_COLUMNS: &[&str] = &[
    "title",
    "rating",
    "ownership",
    "location",
    "domain",
    "city",
    "state",
    "established",
    "course_name",
    "course_duration",
    "course_fee",
    "course_seats",
    "course_duration_years",
    "course_fee_inr",
    "rating_raw",
];

/// Cleaned artifact: canonical order for downstream charting. Columns named
/// here but absent from the row schema are dropped, not an error. Note
/// `ownership` is deliberately not part of this projection.
pub const CANONICAL_COLUMNS: &[&str] = &[
    "title",
    "rating",
    "domain",
    "city",
    "state",
    "established",
    "course_name",
    "course_duration_years",
    "course_fee_inr",
    "location",
    "course_duration",
    "course_fee",
    "course_seats",
    "rating_raw",
];

/// How to render a null cell: raw export leaves it empty, the cleaned export
/// fills numeric nulls with 0 and text nulls with the literal "NaN" (an
/// export-compatibility contract with downstream consumers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NullPolicy {
    Empty,
    Filled,
}

enum Cell {
    Number(Option<String>),
    Text(Option<String>),
}

impl CleanRow {
    pub fn has_column(column: &str) -> bool {
        matches!(
            column,
            "title"
                | "rating"
                | "domain"
                | "ownership"
                | "location"
                | "city"
                | "state"
                | "established"
                | "course_name"
                | "course_duration"
                | "course_fee"
                | "course_seats"
                | "course_duration_years"
                | "course_fee_inr"
                | "rating_raw"
        )
    }

    fn cell(&self, column: &str) -> Option<Cell> {
        let text = |v: &Option<String>| Some(Cell::Text(v.clone()));
        match column {
            "title" => text(&self.title),
            "rating" => Some(Cell::Number(self.rating.map(|v| v.to_string()))),
            "domain" => Some(Cell::Text(Some(self.domain.clone()))),
            "ownership" => text(&self.ownership),
            "location" => text(&self.location),
            "city" => text(&self.city),
            "state" => text(&self.state),
            "established" => text(&self.established),
            "course_name" => text(&self.course_name),
            "course_duration" => text(&self.course_duration),
            "course_fee" => text(&self.course_fee),
            "course_seats" => Some(Cell::Number(self.course_seats.map(|v| v.to_string()))),
            "course_duration_years" => Some(Cell::Number(
                self.course_duration_years.map(|v| v.to_string()),
            )),
            "course_fee_inr" => Some(Cell::Number(self.course_fee_inr.map(|v| v.to_string()))),
            "rating_raw" => text(&self.rating_raw),
            _ => None,
        }
    }

    fn render(&self, column: &str, policy: NullPolicy) -> String {
        match (self.cell(column), policy) {
            (Some(Cell::Number(Some(v))), _) | (Some(Cell::Text(Some(v))), _) => v,
            (Some(Cell::Number(None)), NullPolicy::Filled) => "0".to_string(),
            (Some(Cell::Text(None)), NullPolicy::Filled) => "NaN".to_string(),
            _ => String::new(),
        }
    }
}

/// Byte-order mark expected by the downstream spreadsheet consumers.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serializes rows to CSV under the given column projection and null policy.
pub fn to_csv(rows: &[CleanRow], columns: &[&str], policy: NullPolicy) -> Result<Vec<u8>> {
    let present: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| CleanRow::has_column(c))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&present)?;
    for row in rows {
        let record: Vec<String> = present.iter().map(|c| row.render(c, policy)).collect();
        writer.write_record(&record)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| EtlError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })?;

    let mut out = Vec::with_capacity(UTF8_BOM.len() + data.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(&data);
    Ok(out)
}

/// What transform hands to load: the typed rows plus both rendered artifacts.
#[derive(Debug, Clone)]
pub struct CleanResult {
    pub rows: Vec<CleanRow>,
    pub raw_csv: Vec<u8>,
    pub clean_csv: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_years_only() {
        assert_eq!(duration_in_years("4 Years"), Some(4.0));
        assert_eq!(duration_in_years("5.5 years"), Some(5.5));
    }

    #[test]
    fn test_duration_years_and_months() {
        assert_eq!(duration_in_years("2 Years 6 Months"), Some(2.5));
        assert_eq!(duration_in_years("1 year 1 month"), Some(1.08));
    }

    #[test]
    fn test_duration_months_only() {
        assert_eq!(duration_in_years("18 Months"), Some(1.5));
    }

    #[test]
    fn test_duration_without_units_is_null() {
        assert_eq!(duration_in_years("Full Time"), None);
        assert_eq!(duration_in_years(""), None);
        assert_eq!(duration_in_years("3.0"), None);
    }

    #[test]
    fn test_fee_crore() {
        assert_eq!(fee_in_inr("1.2 Crore"), Some(12_000_000));
        assert_eq!(fee_in_inr("2 cr"), Some(20_000_000));
    }

    #[test]
    fn test_fee_lakh_variants() {
        assert_eq!(fee_in_inr("₹ 8.5 Lakh"), Some(850_000));
        assert_eq!(fee_in_inr("3 lac"), Some(300_000));
        assert_eq!(fee_in_inr("2.4 L"), Some(240_000));
    }

    #[test]
    fn test_fee_thousand() {
        assert_eq!(fee_in_inr("50 K"), Some(50_000));
    }

    #[test]
    fn test_fee_bare_number_with_commas() {
        assert_eq!(fee_in_inr("1,25,000"), Some(125_000));
        assert_eq!(fee_in_inr("₹90000"), Some(90_000));
    }

    // "1.2 crore" must resolve via the crore rule even though the trailing
    // "e" of "crore" never matches "k"; the ambiguity that matters is
    // crore/lakh vs the bare-thousand suffix.
    #[test]
    fn test_fee_unit_priority() {
        assert_eq!(fee_in_inr("1.2 crore"), Some(12_000_000));
        assert_ne!(fee_in_inr("1.2 crore"), Some(1_200));
        // "lakh" contains no "k"-adjacent digit, but "120k lakh"-style junk
        // must still resolve as lakh first.
        assert_eq!(fee_in_inr("5 lakh"), Some(500_000));
    }

    #[test]
    fn test_fee_unparseable_is_null() {
        assert_eq!(fee_in_inr("Contact college"), None);
        assert_eq!(fee_in_inr(""), None);
    }

    #[test]
    fn test_rating_value() {
        assert_eq!(rating_value("4.2/5"), Some(4.2));
        assert_eq!(rating_value("5/5"), Some(5.0));
        assert_eq!(rating_value("no rating"), None);
    }

    #[test]
    fn test_seat_count() {
        assert_eq!(seat_count("120 seats"), Some(120));
        assert_eq!(seat_count("1,180"), Some(1180));
        assert_eq!(seat_count("N/A"), None);
    }

    // Re-cleaning already-numeric text must be a no-op, not an error.
    #[test]
    fn test_cleaning_idempotent_on_numeric_values() {
        assert_eq!(fee_in_inr("12000000"), Some(12_000_000));
        assert_eq!(rating_value("4.2"), Some(4.2));
        assert_eq!(seat_count("120"), Some(120));
    }

    fn sample_row() -> OutputRow {
        OutputRow {
            title: Some("IIT Bombay".to_string()),
            domain: "Engineering".to_string(),
            rating: Some("4.4/5".to_string()),
            ownership: Some("Public".to_string()),
            location: Some("Mumbai, Maharashtra".to_string()),
            city: Some("Mumbai".to_string()),
            state: Some("Maharashtra".to_string()),
            established: Some("1958".to_string()),
            course_name: Some("B.Tech CSE".to_string()),
            course_duration: Some("4 Years".to_string()),
            course_fee: Some("8.5 Lakh".to_string()),
            course_seats: Some("120".to_string()),
        }
    }

    #[test]
    fn test_clean_rows_derives_numeric_columns() {
        let cleaned = clean_rows(&[sample_row()]);
        let row = &cleaned[0];
        assert_eq!(row.rating, Some(4.4));
        assert_eq!(row.rating_raw.as_deref(), Some("4.4/5"));
        assert_eq!(row.course_duration_years, Some(4.0));
        assert_eq!(row.course_fee_inr, Some(850_000));
        assert_eq!(row.course_seats, Some(120));
    }

    #[test]
    fn test_null_fill_policy() {
        let empty = OutputRow {
            domain: "Law".to_string(),
            ..OutputRow::default()
        };
        let cleaned = clean_rows(&[empty]);
        let csv = to_csv(&cleaned, CANONICAL_COLUMNS, NullPolicy::Filled).unwrap();
        let text = String::from_utf8(csv[3..].to_vec()).unwrap();
        let data_line = text.lines().nth(1).unwrap();

        // title..established are text -> NaN; rating and the derived numeric
        // columns -> 0.
        assert_eq!(
            data_line,
            "NaN,0,Law,NaN,NaN,NaN,NaN,0,0,NaN,NaN,NaN,0,NaN"
        );
    }

    #[test]
    fn test_raw_export_leaves_nulls_empty() {
        let empty = OutputRow {
            domain: "Law".to_string(),
            ..OutputRow::default()
        };
        let cleaned = clean_rows(&[empty]);
        let csv = to_csv(&cleaned, RAW_COLUMNS, NullPolicy::Empty).unwrap();
        let text = String::from_utf8(csv[3..].to_vec()).unwrap();
        let data_line = text.lines().nth(1).unwrap();
        assert_eq!(data_line, ",,,,Law,,,,,,,,,,");
    }

    #[test]
    fn test_csv_starts_with_bom() {
        let csv = to_csv(&[], CANONICAL_COLUMNS, NullPolicy::Filled).unwrap();
        assert_eq!(&csv[..3], b"\xef\xbb\xbf");
    }

    #[test]
    fn test_unknown_columns_silently_dropped() {
        let csv = to_csv(&[], &["title", "nonexistent", "domain"], NullPolicy::Empty).unwrap();
        let text = String::from_utf8(csv[3..].to_vec()).unwrap();
        assert_eq!(text.lines().next().unwrap(), "title,domain");
    }

    #[test]
    fn test_ownership_dropped_from_canonical_projection() {
        assert!(!CANONICAL_COLUMNS.contains(&"ownership"));
        assert!(RAW_COLUMNS.contains(&"ownership"));
    }
}
