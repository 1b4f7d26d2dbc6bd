use crate::domain::Course;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static BANNER_TAGS: LazyLock<Selector> = LazyLock::new(|| sel("div.bannerTags"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static HIGHLIGHT_TABLE: LazyLock<Selector> = LazyLock::new(|| sel("div#highlight table.table"));
static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));
static COURSE_BLOCK: LazyLock<Selector> = LazyLock::new(|| sel("div.detail"));
static COURSE_NAME: LazyLock<Selector> = LazyLock::new(|| sel("h4 a"));
static COURSE_DETAIL: LazyLock<Selector> = LazyLock::new(|| sel("div.course_detail"));
static DIV: LazyLock<Selector> = LazyLock::new(|| sel("div"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| sel("span"));

fn sel(s: &str) -> Selector {
    Selector::parse(s).expect("static selector")
}

/// Concatenated text content with each text node trimmed.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// "City, State" from the detail page's banner tag strip, if it carries at
/// least two links.
pub fn location(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let banner = doc.select(&BANNER_TAGS).next()?;
    let mut links = banner.select(&ANCHOR);
    match (links.next(), links.next()) {
        (Some(city), Some(state)) => Some(format!("{}, {}", text_of(city), text_of(state))),
        _ => None,
    }
}

/// The "Established" fact from the highlights table, verbatim. Parsing the
/// year out of it is the cleaner's job.
pub fn established_year(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let table = doc.select(&HIGHLIGHT_TABLE).next()?;
    for row in table.select(&TABLE_ROW) {
        let cells: Vec<ElementRef> = row.select(&TABLE_CELL).collect();
        if cells.len() == 2 && text_of(cells[0]).eq_ignore_ascii_case("established") {
            return Some(text_of(cells[1]));
        }
    }
    None
}

/// All courses listed on a courses page, in document order. A block without
/// a name anchor is skipped; missing fee/duration/seats labels leave those
/// fields empty.
pub fn courses(html: &str) -> Vec<Course> {
    let doc = Html::parse_document(html);
    let mut courses = Vec::new();

    for block in doc.select(&COURSE_BLOCK) {
        let Some(name_link) = block.select(&COURSE_NAME).next() else {
            continue;
        };
        let mut course = Course {
            name: text_of(name_link),
            duration: None,
            fee: None,
            seats: None,
        };

        if let Some(detail) = block.select(&COURSE_DETAIL).next() {
            for field in detail.select(&DIV) {
                let label = text_of(field).to_lowercase();
                let value = field.select(&SPAN).next().map(text_of);
                if label.contains("total fees") {
                    course.fee = value;
                } else if label.contains("duration") {
                    course.duration = value;
                } else if label.contains("seats") {
                    course.seats = value;
                }
            }
        }

        courses.push(course);
    }

    courses
}

/// Courses live under a derived URL, not the detail page itself.
pub fn courses_url(detail_url: &str) -> String {
    format!("{}/courses", detail_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_banner_tags() {
        let html = r#"
            <div class="bannerTags">
                <a href="/city">Mumbai</a>
                <a href="/state">Maharashtra</a>
            </div>"#;
        assert_eq!(location(html), Some("Mumbai, Maharashtra".to_string()));
    }

    #[test]
    fn test_location_needs_two_links() {
        let html = r#"<div class="bannerTags"><a href="/city">Mumbai</a></div>"#;
        assert_eq!(location(html), None);
        assert_eq!(location("<p>no banner here</p>"), None);
    }

    #[test]
    fn test_established_year_from_highlights() {
        let html = r#"
            <div id="highlight"><table class="table">
                <tr><td>Ownership</td><td>Public</td></tr>
                <tr><td>ESTABLISHED</td><td>1958</td></tr>
            </table></div>"#;
        assert_eq!(established_year(html), Some("1958".to_string()));
    }

    #[test]
    fn test_established_year_requires_two_cell_row() {
        let html = r#"
            <div id="highlight"><table class="table">
                <tr><td>Established</td></tr>
            </table></div>"#;
        assert_eq!(established_year(html), None);
    }

    #[test]
    fn test_courses_with_all_fields() {
        let html = r#"
            <div class="detail">
                <h4><a href="/c1">B.Tech CSE</a></h4>
                <div class="course_detail">
                    <div>Total Fees <span>8.5 Lakh</span></div>
                    <div>Duration <span>4 Years</span></div>
                    <div>Seats <span>120</span></div>
                </div>
            </div>"#;
        let found = courses(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "B.Tech CSE");
        assert_eq!(found[0].fee.as_deref(), Some("8.5 Lakh"));
        assert_eq!(found[0].duration.as_deref(), Some("4 Years"));
        assert_eq!(found[0].seats.as_deref(), Some("120"));
    }

    #[test]
    fn test_course_block_without_name_skipped() {
        let html = r#"
            <div class="detail">
                <div class="course_detail"><div>Duration <span>4 Years</span></div></div>
            </div>
            <div class="detail"><h4><a href="/c2">LLB</a></h4></div>"#;
        let found = courses(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "LLB");
        assert_eq!(found[0].duration, None);
    }

    #[test]
    fn test_courses_url_strips_trailing_slash() {
        assert_eq!(
            courses_url("https://example.com/college/"),
            "https://example.com/college/courses"
        );
        assert_eq!(
            courses_url("https://example.com/college"),
            "https://example.com/college/courses"
        );
    }
}
