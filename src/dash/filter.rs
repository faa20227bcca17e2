use crate::dash::record::ExpandedRecord;
use std::collections::BTreeSet;
use std::str::FromStr;

pub const INDUSTRY_COLUMN: &str = "Industry";
pub const CATEGORY_COLUMN: &str = "Category";
pub const ROLE_COLUMN: &str = "Role";

/// How the timeline year interacts with the sidebar year selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Union the timeline year into the sidebar selection.
    #[default]
    IncludeTimelineYear,
    /// Use the sidebar selection alone.
    SidebarOnly,
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "include-timeline" => Ok(Self::IncludeTimelineYear),
            "sidebar-only" => Ok(Self::SidebarOnly),
            other => Err(format!(
                "unknown filter mode `{other}`; use `include-timeline` or `sidebar-only`"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// `None` means no year constraint at all.
    pub years: Option<BTreeSet<i32>>,
    pub industries: Vec<String>,
    pub categories: Vec<String>,
    pub roles: Vec<String>,
}

/// Every distinct year present in the expanded working set.
pub fn dataset_years(expanded: &[ExpandedRecord]) -> BTreeSet<i32> {
    expanded.iter().filter_map(|r| r.year).collect()
}

/// Resolve the final year set from the sidebar selection plus the timeline
/// year. An empty sidebar selection means "all years".
pub fn resolve_years(
    sidebar: &[i32],
    all_years: &BTreeSet<i32>,
    timeline_year: i32,
    mode: FilterMode,
) -> BTreeSet<i32> {
    let mut out: BTreeSet<i32> = if sidebar.is_empty() {
        all_years.clone()
    } else {
        sidebar.iter().copied().collect()
    };
    if mode == FilterMode::IncludeTimelineYear {
        out.insert(timeline_year);
    }
    out
}

pub fn apply(expanded: &[ExpandedRecord], spec: &FilterSpec) -> Vec<ExpandedRecord> {
    expanded
        .iter()
        .filter(|rec| matches(rec, spec))
        .cloned()
        .collect()
}

fn matches(rec: &ExpandedRecord, spec: &FilterSpec) -> bool {
    if let Some(years) = &spec.years {
        // Records without a usable year never match a year constraint.
        let Some(year) = rec.year else {
            return false;
        };
        if !years.contains(&year) {
            return false;
        }
    }
    field_matches(rec, INDUSTRY_COLUMN, &spec.industries)
        && field_matches(rec, CATEGORY_COLUMN, &spec.categories)
        && field_matches(rec, ROLE_COLUMN, &spec.roles)
}

fn field_matches(rec: &ExpandedRecord, column: &str, selection: &[String]) -> bool {
    if selection.is_empty() {
        return true;
    }
    let Some(value) = rec.field(column) else {
        return false;
    };
    let value = value.trim();
    selection.iter().any(|wanted| wanted.trim() == value)
}
