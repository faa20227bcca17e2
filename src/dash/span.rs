use crate::dash::record::ExpandedRecord;

/// Parse a `"start-end"` span label. Single-year labels and malformed
/// input return `None`.
pub fn parse_span(span: &str) -> Option<(i32, i32)> {
    let (a, b) = span.split_once('-')?;
    let start = a.trim().parse::<i32>().ok()?;
    let end = b.trim().parse::<i32>().ok()?;
    Some((start, end))
}

/// Whether a span/year pair counts as active for `query_year`. A spanned
/// label matches anywhere inside the range; otherwise only an exact year
/// match counts. Never fails: a malformed span falls back to exact-year
/// equality.
pub fn span_is_active(span: &str, year: Option<i32>, query_year: i32) -> bool {
    if let Some((start, end)) = parse_span(span) {
        return start <= query_year && query_year <= end;
    }
    year == Some(query_year)
}

pub fn is_active(record: &ExpandedRecord, query_year: i32) -> bool {
    span_is_active(&record.span, record.year, query_year)
}

#[cfg(test)]
mod tests {
    use super::{parse_span, span_is_active};

    #[test]
    fn spanned_label_matches_inclusive_range() {
        for year in 2020..=2023 {
            assert!(span_is_active("2020-2023", Some(2020), year));
        }
        assert!(!span_is_active("2020-2023", Some(2020), 2019));
        assert!(!span_is_active("2020-2023", Some(2020), 2024));
    }

    #[test]
    fn single_year_label_matches_exact_year_only() {
        assert!(span_is_active("2020", Some(2020), 2020));
        assert!(!span_is_active("2020", Some(2020), 2021));
    }

    #[test]
    fn malformed_span_falls_back_to_exact_year() {
        assert!(span_is_active("garbage-span", Some(2019), 2019));
        assert!(!span_is_active("garbage-span", Some(2019), 2020));
        assert!(!span_is_active("", None, 2019));
    }

    #[test]
    fn parse_span_rejects_partial_numbers() {
        assert_eq!(parse_span("2020-2023"), Some((2020, 2023)));
        assert_eq!(parse_span("2020"), None);
        assert_eq!(parse_span("2020-x"), None);
    }
}
