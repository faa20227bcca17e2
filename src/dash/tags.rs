use crate::dash::colors::{self, Rgb};
use crate::dash::record::ExpandedRecord;
use crate::dash::span;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One distinct label from a comma-separated tag column (skills or
/// software) over the filtered working set.
#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub label: String,
    pub color: Rgb,
    pub color_hex: String,
    pub projects: usize,
    pub active: bool,
}

pub fn collect(filtered: &[ExpandedRecord], column: &str, query_year: i32) -> Vec<TagSummary> {
    let mut carriers: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    let mut active: BTreeSet<String> = BTreeSet::new();

    for rec in filtered {
        let Some(raw) = rec.field(column) else {
            continue;
        };
        let rec_active = span::is_active(rec, query_year);
        for label in split_labels(raw) {
            carriers
                .entry(label.clone())
                .or_default()
                .insert(rec.name.as_str());
            if rec_active {
                active.insert(label);
            }
        }
    }

    carriers
        .into_iter()
        .map(|(label, names)| {
            let color = colors::color_for(&label);
            TagSummary {
                active: active.contains(&label),
                color_hex: color.hex(),
                color,
                projects: names.len(),
                label,
            }
        })
        .collect()
}

fn split_labels(raw: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.to_lowercase()))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{collect, split_labels};
    use crate::dash::record::ExpandedRecord;
    use std::collections::BTreeMap;

    fn rec(name: &str, year: i32, span: &str, skills: &str) -> ExpandedRecord {
        ExpandedRecord {
            name: name.to_string(),
            year: Some(year),
            original_year: Some(year),
            span: span.to_string(),
            fields: BTreeMap::from([("Skills".to_string(), skills.to_string())]),
        }
    }

    #[test]
    fn labels_split_trim_and_dedupe() {
        assert_eq!(
            split_labels(" Hydrology , Revit,, revit "),
            vec!["Hydrology", "Revit"]
        );
    }

    #[test]
    fn tags_count_distinct_projects() {
        let records = vec![
            rec("A", 2018, "2018-2019", "Revit, Hydrology"),
            rec("A", 2019, "2018-2019", "Revit, Hydrology"),
            rec("B", 2020, "2020", "Revit"),
        ];
        let tags = collect(&records, "Skills", 2019);

        let revit = tags.iter().find(|t| t.label == "Revit").expect("revit tag");
        assert_eq!(revit.projects, 2);
        assert!(revit.active);

        let hydro = tags
            .iter()
            .find(|t| t.label == "Hydrology")
            .expect("hydrology tag");
        assert_eq!(hydro.projects, 1);
    }

    #[test]
    fn inactive_year_leaves_tags_unmarked() {
        let records = vec![rec("B", 2020, "2020", "QGIS")];
        let tags = collect(&records, "Skills", 2019);
        assert!(!tags[0].active);
        assert!(tags[0].color_hex.starts_with('#'));
    }

    #[test]
    fn missing_column_yields_no_tags() {
        let records = vec![rec("B", 2020, "2020", "QGIS")];
        assert!(collect(&records, "Software", 2019).is_empty());
    }
}
