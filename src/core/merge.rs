use crate::domain::{is_valid_location, split_location, EnrichmentResult, Institution, OutputRow};
use std::collections::HashMap;

/// Joins card-level institutions with their enrichment bundles and expands
/// each institution into per-course rows. Institutions keep their card
/// order; courses keep extraction order.
pub fn merge_rows(
    institutions: Vec<Institution>,
    enrichment: &HashMap<String, EnrichmentResult>,
) -> Vec<OutputRow> {
    let mut rows = Vec::new();

    for institution in institutions {
        let result = institution
            .detail_url
            .as_deref()
            .and_then(|url| enrichment.get(url));

        // Only a valid enriched location populates location/city/state; the
        // card's inline location is never used as a fallback here.
        let (location, city, state) = match result.and_then(|r| r.location.as_deref()) {
            Some(loc) if is_valid_location(loc) => match split_location(loc) {
                Some((city, state)) => (Some(loc.to_string()), Some(city), Some(state)),
                None => (None, None, None),
            },
            _ => (None, None, None),
        };

        let base = OutputRow {
            title: institution.title,
            domain: institution.domain,
            rating: institution.rating,
            ownership: institution.ownership,
            location,
            city,
            state,
            established: result.and_then(|r| r.established.clone()),
            course_name: None,
            course_duration: None,
            course_fee: None,
            course_seats: None,
        };

        match result.map(|r| r.courses.as_slice()) {
            Some(courses) if !courses.is_empty() => {
                for course in courses {
                    let mut row = base.clone();
                    row.course_name = Some(course.name.clone());
                    row.course_duration = course.duration.clone();
                    row.course_fee = course.fee.clone();
                    row.course_seats = course.seats.clone();
                    rows.push(row);
                }
            }
            _ => rows.push(base),
        }
    }

    rows
}
