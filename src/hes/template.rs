use super::*;

/// Bumped whenever a catalog entry is added, removed or renamed.
pub const CATALOG_VERSION: u32 = 1;

pub(super) const PRIORITY_FEATURES: [&str; 4] = [
    "Attic insulation",
    "Envelope/Air sealing",
    "Air Conditioner",
    "Water Heater",
];

pub(super) const ADDITIONAL_FEATURES: [&str; 12] = [
    "Basement wall insulation",
    "Cathedral ceiling/roof",
    "Crawlspace insulation",
    "Duct insulation",
    "Duct sealing",
    "Floor insulation",
    "Furnace",
    "Heat pump",
    "Skylights",
    "Solar PV",
    "Wall insulation",
    "Windows",
];

pub(super) fn catalog_for(section: Section) -> &'static [&'static str] {
    match section {
        Section::Priority => &PRIORITY_FEATURES,
        Section::Additional => &ADDITIONAL_FEATURES,
    }
}

/// Every row the output must contain, in catalog order, with placeholder values.
pub fn template_rows() -> Vec<SuggestionRow> {
    [Section::Priority, Section::Additional]
        .into_iter()
        .flat_map(|section| {
            catalog_for(section)
                .iter()
                .map(move |feature| SuggestionRow::placeholder(section, feature))
        })
        .collect()
}

pub(super) fn row_key(section: Section, feature: &str) -> (Section, String) {
    (section, normalize_feature_key(feature))
}

/// Keeps the first row seen for each `(section, feature)` key.
pub(super) fn dedup_rows(rows: Vec<SuggestionRow>) -> Vec<SuggestionRow> {
    let mut seen = HashSet::<(Section, String)>::new();
    rows.into_iter()
        .filter(|row| seen.insert(row_key(row.section, &row.feature)))
        .collect()
}

/// Overlays parsed rows onto the template. The result always has exactly one
/// row per catalog feature; parsed rows for unknown features are dropped.
pub(super) fn merge_with_template(parsed: &[SuggestionRow]) -> Vec<SuggestionRow> {
    let mut by_key = HashMap::<(Section, String), &SuggestionRow>::new();
    for row in parsed {
        by_key.entry(row_key(row.section, &row.feature)).or_insert(row);
    }

    template_rows()
        .into_iter()
        .map(|mut row| {
            if let Some(found) = by_key.get(&row_key(row.section, &row.feature)) {
                if !found.todays_condition.trim().is_empty() {
                    row.todays_condition = found.todays_condition.trim().to_string();
                }
                if !found.recommendation.trim().is_empty() {
                    row.recommendation = found.recommendation.trim().to_string();
                }
            }
            row
        })
        .collect()
}
