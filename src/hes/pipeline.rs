use super::*;

const RAW_EXCERPT_CHARS: usize = 1200;
const SAMPLE_ROW_COUNT: usize = 3;

/// Compiled extraction pipeline. Holds only read-only regexes, so one
/// instance can serve any number of documents.
#[derive(Debug)]
pub struct HesReportParser {
    pub(super) fields: FieldPickers,
    pub(super) profile: ProfilePickers,
    pub(super) locator: SectionLocator,
    pub(super) priority: FeatureAnchorParser,
    pub(super) additional: FeatureAnchorParser,
    pub(super) splitter: RowSplitter,
    pub(super) fallback: FallbackLineParser,
}

impl HesReportParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fields: FieldPickers::new()?,
            profile: ProfilePickers::new()?,
            locator: SectionLocator::new()?,
            priority: FeatureAnchorParser::new(Section::Priority)?,
            additional: FeatureAnchorParser::new(Section::Additional)?,
            splitter: RowSplitter::new()?,
            fallback: FallbackLineParser::new()?,
        })
    }

    /// Parses extracted report text. Fails only when there is no text at all;
    /// every other gap is filled with sentinel values.
    pub fn parse(&self, raw_text: &str, logger: &dyn ParseLogger) -> Result<HesParseOutput> {
        if non_whitespace_char_count(raw_text) == 0 {
            bail!("no text was extracted from the report");
        }

        let normalized = NormalizedText::from_raw(raw_text);
        logger.debug(
            "normalize",
            &format!(
                "{} chars, {} lines after normalization",
                normalized.text.len(),
                normalized.lines.len()
            ),
        );

        let scalars = self.fields.pick_all(&normalized);
        let profile = self.profile.pick(&normalized.lines);

        let mut debug = ParseDebug {
            raw_excerpt: normalized.text.chars().take(RAW_EXCERPT_CHARS).collect(),
            normalized_char_count: normalized.text.chars().count(),
            line_count: normalized.lines.len(),
            ..ParseDebug::default()
        };

        let mut parsed = Vec::<SuggestionRow>::new();

        match self.locator.locate(&normalized.lines, Section::Priority) {
            Some(span) => {
                let rows = self.priority.parse(
                    &span.joined(&normalized.lines),
                    &self.splitter,
                    logger,
                );
                debug.priority_anchor_count = rows.len();

                let rows = if rows.is_empty() {
                    let fallback_rows = self
                        .fallback
                        .parse(span.body_lines(&normalized.lines), &self.locator);
                    logger.debug(
                        "fallback",
                        &format!("no priority anchors; line parser found {}", fallback_rows.len()),
                    );
                    debug.used_priority_fallback = true;
                    fallback_rows
                } else {
                    rows
                };

                debug.has_priority = !rows.is_empty();
                parsed.extend(rows);
            }
            None => logger.debug("sections", "priority section header not found"),
        }

        match self.locator.locate(&normalized.lines, Section::Additional) {
            Some(span) => {
                let rows = self.additional.parse(
                    &span.joined(&normalized.lines),
                    &self.splitter,
                    logger,
                );
                debug.additional_anchor_count = rows.len();
                debug.has_additional = !rows.is_empty();
                parsed.extend(rows);
            }
            None => logger.debug("sections", "additional section header not found"),
        }

        let parsed = dedup_rows(parsed);
        let suggestions = merge_with_template(&parsed);
        logger.debug(
            "merge",
            &format!(
                "{} parsed rows merged into {} template rows",
                parsed.len(),
                suggestions.len()
            ),
        );

        debug.parsed_row_count = parsed.len();
        debug.suggestions_count = suggestions.len();
        debug.sample_rows = parsed.iter().take(SAMPLE_ROW_COUNT).cloned().collect();

        let (existing_conditions, recommendations) = flatten_for_display(&suggestions);

        Ok(HesParseOutput {
            hes_score: scalars.hes_score,
            annual_energy_cost: scalars.annual_energy_cost,
            solar_generation_kwh: scalars.solar_generation_kwh,
            carbon_footprint_tons: scalars.carbon_footprint_tons,
            location: profile.location,
            year_built: profile.year_built,
            heated_floor_area_sqft: profile.heated_floor_area_sqft,
            bedrooms: profile.bedrooms,
            suggestions,
            existing_conditions,
            recommendations,
            debug,
        })
    }
}

fn flatten_for_display(suggestions: &[SuggestionRow]) -> (Vec<String>, Vec<String>) {
    let existing_conditions = suggestions
        .iter()
        .filter(|row| row.todays_condition != NOT_AVAILABLE)
        .map(|row| format!("{}: {}", row.feature, row.todays_condition))
        .collect();
    let recommendations = suggestions
        .iter()
        .filter(|row| !row.recommendation.is_empty())
        .map(|row| format!("{}: {}", row.feature, row.recommendation))
        .collect();

    (existing_conditions, recommendations)
}
