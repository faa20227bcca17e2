use crate::dash::record::{DisplayRecord, ExpandedRecord};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Which record wins when a project name occurs more than once. Expansion
/// siblings always share `original_year`, so the choice only matters when
/// the upstream dataset reuses a name for genuinely different projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    OriginalYear,
    InsertionOrder,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "original-year" => Ok(Self::OriginalYear),
            "insertion-order" => Ok(Self::InsertionOrder),
            other => Err(format!(
                "unknown sort key `{other}`; use `original-year` or `insertion-order`"
            )),
        }
    }
}

/// Collapse expanded records back to one display row per project name.
///
/// With `SortKey::OriginalYear` the group member with the minimum
/// `original_year` wins (ties by encounter order, records without a year
/// sort last); with `SortKey::InsertionOrder` the first occurrence wins.
/// The display year is the winner's `original_year`, falling back to its
/// expanded year when the source had no expansion.
pub fn deduplicate(records: &[ExpandedRecord], sort_key: SortKey) -> Vec<DisplayRecord> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    if sort_key == SortKey::OriginalYear {
        // Stable sort keeps encounter order within equal years.
        order.sort_by_key(|&i| records[i].original_year.unwrap_or(i32::MAX));
    }

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for i in order {
        let rec = &records[i];
        if !seen.insert(rec.name.as_str()) {
            continue;
        }
        out.push(DisplayRecord {
            name: rec.name.clone(),
            year: rec.original_year.or(rec.year),
            span: rec.span.clone(),
            active: false,
            fields: rec.fields.clone(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SortKey, deduplicate};
    use crate::dash::expand::expand;
    use crate::dash::record::{ExpandedRecord, ProjectRecord};
    use std::collections::BTreeMap;

    fn expanded(name: &str, year: i32, original: i32, span: &str) -> ExpandedRecord {
        ExpandedRecord {
            name: name.to_string(),
            year: Some(year),
            original_year: Some(original),
            span: span.to_string(),
            fields: BTreeMap::new(),
        }
    }

    #[test]
    fn round_trip_restores_the_start_year() {
        let source = ProjectRecord {
            name: "Bridge A".to_string(),
            start_year: Some(2018),
            duration_months: Some(30.0),
            fields: BTreeMap::from([("Country".to_string(), "Colombia".to_string())]),
        };
        let out = deduplicate(&expand(std::slice::from_ref(&source)), SortKey::default());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].year, Some(2018));
        assert_eq!(out[0].span, "2018-2020");
        assert_eq!(out[0].fields, source.fields);
    }

    #[test]
    fn one_display_row_per_distinct_name() {
        let records = vec![
            expanded("A", 2018, 2018, "2018-2019"),
            expanded("A", 2019, 2018, "2018-2019"),
            expanded("B", 2019, 2019, "2019"),
        ];
        let out = deduplicate(&records, SortKey::default());
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn original_year_sort_prefers_the_earlier_project() {
        let records = vec![
            expanded("Reused", 2021, 2021, "2021"),
            expanded("Reused", 2015, 2015, "2015-2016"),
        ];
        let out = deduplicate(&records, SortKey::OriginalYear);
        assert_eq!(out[0].year, Some(2015));
    }

    #[test]
    fn insertion_order_keeps_the_first_occurrence() {
        let records = vec![
            expanded("Reused", 2021, 2021, "2021"),
            expanded("Reused", 2015, 2015, "2015-2016"),
        ];
        let out = deduplicate(&records, SortKey::InsertionOrder);
        assert_eq!(out[0].year, Some(2021));
    }

    #[test]
    fn records_without_a_year_sort_last_but_survive() {
        let undated = ExpandedRecord {
            name: "Undated".to_string(),
            year: None,
            original_year: None,
            span: String::new(),
            fields: BTreeMap::new(),
        };
        let records = vec![undated, expanded("B", 2019, 2019, "2019")];
        let out = deduplicate(&records, SortKey::OriginalYear);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "B");
        assert_eq!(out[1].name, "Undated");
        assert_eq!(out[1].year, None);
    }

    #[test]
    fn sort_key_parses_from_cli_strings() {
        assert_eq!("original-year".parse(), Ok(SortKey::OriginalYear));
        assert_eq!("insertion-order".parse(), Ok(SortKey::InsertionOrder));
        assert!("newest".parse::<SortKey>().is_err());
    }
}
