use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Priority,
    Additional,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Additional => "additional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRow {
    pub section: Section,
    pub feature: String,
    pub todays_condition: String,
    pub recommendation: String,
}

impl SuggestionRow {
    pub fn placeholder(section: Section, feature: &str) -> Self {
        Self {
            section,
            feature: feature.to_string(),
            todays_condition: NOT_AVAILABLE.to_string(),
            recommendation: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeProfile {
    pub location: Option<String>,
    pub year_built: Option<u32>,
    pub heated_floor_area_sqft: Option<u32>,
    pub bedrooms: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseDebug {
    pub raw_excerpt: String,
    pub normalized_char_count: usize,
    pub line_count: usize,
    pub has_priority: bool,
    pub has_additional: bool,
    pub priority_anchor_count: usize,
    pub additional_anchor_count: usize,
    pub used_priority_fallback: bool,
    pub parsed_row_count: usize,
    pub suggestions_count: usize,
    pub sample_rows: Vec<SuggestionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HesParseOutput {
    pub hes_score: Option<u8>,
    pub annual_energy_cost: Option<f64>,
    pub solar_generation_kwh: Option<f64>,
    pub carbon_footprint_tons: Option<f64>,
    pub location: Option<String>,
    pub year_built: Option<u32>,
    pub heated_floor_area_sqft: Option<u32>,
    pub bedrooms: Option<u32>,
    pub suggestions: Vec<SuggestionRow>,
    pub existing_conditions: Vec<String>,
    pub recommendations: Vec<String>,
    pub debug: ParseDebug,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub report_version: u32,
    pub catalog_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub output: HesParseOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogManifest {
    pub catalog_version: u32,
    pub row_count: usize,
    pub rows: Vec<SuggestionRow>,
}
