use crate::dash::record::{ExpandedRecord, ProjectRecord};

const MAX_SPAN_YEARS: i64 = 200;

/// Expand each project into one record per active year.
///
/// A project starting in year `y` with `d` months of duration covers the
/// years `y ..= y + d / 12` (months floored first, then integer division).
/// A missing, non-positive, or unparseable duration degrades to a single
/// year. A record without a usable start year passes through unexpanded
/// with no `original_year`; nothing is ever dropped.
///
/// Pure function: expansions of one source stay contiguous in the output,
/// and every output of one source carries the same `original_year` and
/// `span`.
pub fn expand(records: &[ProjectRecord]) -> Vec<ExpandedRecord> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        expand_one(record, &mut out);
    }
    out
}

fn expand_one(record: &ProjectRecord, out: &mut Vec<ExpandedRecord>) {
    let Some(start) = record.start_year else {
        out.push(passthrough(record));
        return;
    };

    let months = match record.duration_months {
        Some(m) if m.is_finite() && m > 0.0 => m.floor() as i64,
        _ => 0,
    };
    // Cap runaway durations so a corrupt cell cannot explode the expansion.
    let extra_years = (months / 12).min(MAX_SPAN_YEARS) as i32;
    let end = start.saturating_add(extra_years);
    let span = span_label(start, end);

    for year in start..=end {
        out.push(ExpandedRecord {
            name: record.name.clone(),
            year: Some(year),
            original_year: Some(start),
            span: span.clone(),
            fields: record.fields.clone(),
        });
    }
}

fn passthrough(record: &ProjectRecord) -> ExpandedRecord {
    ExpandedRecord {
        name: record.name.clone(),
        year: None,
        original_year: None,
        span: String::new(),
        fields: record.fields.clone(),
    }
}

pub fn span_label(start: i32, end: i32) -> String {
    if end > start {
        format!("{start}-{end}")
    } else {
        start.to_string()
    }
}
