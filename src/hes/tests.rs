use super::*;

const FULL_REPORT: &str = "Home Energy Score
Official Assessment
Location: 123 Main Street
Springfield, OR 97477
Year built: 1965
Heated floor area: 1,850 sq. ft.
Number of bedrooms: 3

This home's score today is 5 out of 10
Estimated energy costs for this home: $2,340 per year
Solar generation estimate: 5,120 kWh per year

This home's carbon footprint
8.5 This Home
12.0 Average Home

Priority Energy Improvements
FEATURE TODAY'S CONDITION RECOMMENDED IMPROVEMENTS
Attic insulation Ceiling insulated to R-11 When replacing roofing, insulate to R-49
Envelope/Air sealing Not professionally sealed Professionally air seal the home
Air Conditioner 8.0 SEER When replacing, install a 16 SEER unit
Water Heater Electric storage 0.90 EF When replacing, install a heat pump water heater
To achieve the estimated savings, complete all priority improvements.

Additional Energy Recommendations
Basement wall insulation Uninsulated Insulate to R-13
Cathedral ceiling/roof Insulated to R-19 Insulate to R-30 when replacing roof
Crawlspace insulation Uninsulated floor Insulate crawlspace walls to R-13
Duct insulation Uninsulated ducts Insulate ducts to R-8
Duct sealing Not professionally sealed Seal ducts professionally
Floor insulation Uninsulated Insulate floor to R-30
Furnace Natural gas 80% AFUE Replace with an ENERGY STAR unit
Heat pump None Install an ENERGY STAR heat pump
Skylights Double pane clear Replace with ENERGY STAR skylights
Solar PV Capacity of 0 kW in DC Install a 5 kW DC system
Wall insulation Uninsulated Insulate walls to R-13
Windows Single pane Replace with ENERGY STAR windows
Today's Condition represents the home as assessed.
";

fn parser() -> HesReportParser {
    HesReportParser::new().expect("parser regexes compile")
}

fn find_row<'a>(rows: &'a [SuggestionRow], section: Section, feature: &str) -> &'a SuggestionRow {
    rows.iter()
        .find(|row| row.section == section && row.feature == feature)
        .unwrap_or_else(|| panic!("missing row {feature}"))
}

#[test]
fn fix_joined_words_repairs_case_and_digit_boundaries() {
    assert_eq!(fix_joined_words("8.0 SEERWhen replacing"), "8.0 SEER When replacing");
    assert_eq!(fix_joined_words("R-30Insulate to R-49"), "R-30 Insulate to R-49");
    assert_eq!(fix_joined_words("insulatedNot sealed"), "insulated Not sealed");
    assert_eq!(fix_joined_words("PVs and DC"), "PVs and DC");
}

#[test]
fn normalize_text_collapses_blank_runs_and_trailing_space() {
    let raw = "  \r\nFirst line   \r\n\r\n\r\n\r\nSecond\rThird\t \n\n";
    assert_eq!(normalize_text(raw), "First line\n\nSecond\nThird");
}

#[test]
fn normalize_text_is_idempotent() {
    let samples = [
        FULL_REPORT,
        "8.0 SEERWhen replacing,install\r\n\r\n\r\nR-30Insulate",
        "ABCDefGHIj 5000kWh\n\n\n\n  trailing   \n",
        "   ",
        "air conditioner      8 SEER      When replacing",
        "Capacity of 3.5kW in DC¹ Solar PV²",
    ];

    for sample in samples {
        let once = normalize_text(sample);
        assert_eq!(normalize_text(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn normalize_feature_key_ignores_case_and_punctuation() {
    assert_eq!(normalize_feature_key("Envelope/Air sealing"), "envelopeair sealing");
    assert_eq!(
        normalize_feature_key("  ENVELOPE/air   Sealing "),
        normalize_feature_key("Envelope/Air sealing")
    );
    assert_eq!(normalize_feature_key("Today's  Condition"), "todays condition");
}

#[test]
fn score_rejects_out_of_range_capture() {
    let pickers = FieldPickers::new().expect("regexes compile");
    assert_eq!(pickers.pick_score("This home scored 57 out of 10"), None);
    assert_eq!(pickers.pick_score("Score: 7 out of 10"), Some(7));
    assert_eq!(pickers.pick_score("Your score today: 4"), Some(4));
    assert_eq!(pickers.pick_score("No score here, 2024"), None);
}

#[test]
fn annual_cost_strips_thousands_separators() {
    let pickers = FieldPickers::new().expect("regexes compile");
    assert_eq!(
        pickers.pick_annual_cost("Estimated energy costs: $1,234 per year"),
        Some(1234.0)
    );
    assert_eq!(
        pickers.pick_annual_cost("Total energy costs per year for this home $3,050.50"),
        Some(3050.5)
    );
    assert_eq!(pickers.pick_annual_cost("Energy is expensive"), None);
}

#[test]
fn solar_generation_requires_plausible_value() {
    let pickers = FieldPickers::new().expect("regexes compile");
    assert_eq!(
        pickers.pick_solar_generation("Solar generation estimate: 5,120 k Wh per year"),
        Some(5120.0)
    );
    assert_eq!(
        pickers.pick_solar_generation("How much solar energy could this home generate? 4200 kWh"),
        Some(4200.0)
    );
    assert_eq!(pickers.pick_solar_generation("Solar generation estimate: 850 kWh"), None);
    assert_eq!(pickers.pick_solar_generation("Solar generation 95 kWh"), None);
}

#[test]
fn carbon_footprint_searches_window_after_anchor() {
    let pickers = FieldPickers::new().expect("regexes compile");
    let lines = ["Intro", "This home's carbon footprint", "Tons per year", "8.5 This Home"]
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<String>>();
    assert_eq!(pickers.pick_carbon_footprint(&lines), Some(8.5));

    let out_of_range = ["This home's carbon footprint", "75 This Home"]
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<String>>();
    assert_eq!(pickers.pick_carbon_footprint(&out_of_range), None);

    let no_anchor = vec!["8.5 This Home".to_string()];
    assert_eq!(pickers.pick_carbon_footprint(&no_anchor), None);
}

#[test]
fn carbon_footprint_ignores_numbers_past_window() {
    let pickers = FieldPickers::new().expect("regexes compile");
    let mut lines = vec!["This home's carbon footprint".to_string()];
    lines.extend((0..70).map(|_| "filler".to_string()));
    lines.push("9.1 This Home".to_string());
    assert_eq!(pickers.pick_carbon_footprint(&lines), None);
}

#[test]
fn home_profile_reads_multi_line_location() {
    let pickers = ProfilePickers::new().expect("regexes compile");
    let normalized = NormalizedText::from_raw(FULL_REPORT);
    let profile = pickers.pick(&normalized.lines);

    assert_eq!(
        profile.location.as_deref(),
        Some("123 Main Street, Springfield, OR 97477")
    );
    assert_eq!(profile.year_built, Some(1965));
    assert_eq!(profile.heated_floor_area_sqft, Some(1850));
    assert_eq!(profile.bedrooms, Some(3));
}

#[test]
fn home_profile_value_on_following_line() {
    let pickers = ProfilePickers::new().expect("regexes compile");
    let lines = ["Year built", "1978", "Bedrooms", "4", "Location"]
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<String>>();
    let profile = pickers.pick(&lines);

    assert_eq!(profile.year_built, Some(1978));
    assert_eq!(profile.bedrooms, Some(4));
    assert_eq!(profile.location, None);
    assert_eq!(profile.heated_floor_area_sqft, None);
}

#[test]
fn section_locator_stops_at_other_header_and_boilerplate() {
    let locator = SectionLocator::new().expect("regexes compile");
    let lines = [
        "Intro",
        "Priority Energy Improvements",
        "Row one",
        "Additional Energy Recommendations",
        "Row two",
        "For more detail on the improvements in this report, visit the website",
        "Trailing",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect::<Vec<String>>();

    let priority = locator
        .locate(&lines, Section::Priority)
        .expect("priority located");
    assert_eq!(priority.header_line, 1);
    assert_eq!(priority.end_line, 3);
    assert_eq!(priority.joined(&lines), "Row one");

    let additional = locator
        .locate(&lines, Section::Additional)
        .expect("additional located");
    assert_eq!(additional.body_lines(&lines), &lines[4..5]);

    let missing = vec!["Nothing relevant".to_string()];
    assert_eq!(locator.locate(&missing, Section::Priority), None);
}

#[test]
fn section_header_tail_is_part_of_span() {
    let locator = SectionLocator::new().expect("regexes compile");
    let lines = vec!["Priority Energy Improvements Air Conditioner 10 SEER".to_string()];
    let span = locator
        .locate(&lines, Section::Priority)
        .expect("priority located");
    assert_eq!(span.joined(&lines), "Air Conditioner 10 SEER");
}

#[test]
fn anchors_are_sorted_by_document_order() {
    let parser = FeatureAnchorParser::new(Section::Priority).expect("regexes compile");
    let span = "Water Heater gas Air Conditioner 10 SEER Attic insulation R-19";
    let anchors = parser.anchors(span);
    let features = anchors
        .segments(span)
        .into_iter()
        .map(|(feature, _)| feature)
        .collect::<Vec<&str>>();

    assert_eq!(features, vec!["Water Heater", "Air Conditioner", "Attic insulation"]);
}

#[test]
fn anchors_tolerate_footnotes_and_spacing() {
    let parser = FeatureAnchorParser::new(Section::Priority).expect("regexes compile");
    let span = "Air   Conditioner 1 10 SEER Envelope / Air sealing² Not sealed";
    let segments = parser.anchors(span).segments(span);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].0, "Air Conditioner");
    assert_eq!(segments[0].1.trim(), "10 SEER");
    assert_eq!(segments[1].0, "Envelope/Air sealing");
    assert_eq!(segments[1].1.trim(), "Not sealed");
}

#[test]
fn nested_feature_name_is_not_a_separate_anchor() {
    let parser = FeatureAnchorParser::new(Section::Additional).expect("regexes compile");
    let span = "BASEMENT WALL INSULATION Uninsulated Insulate to R-13 WALL INSULATION R-0 Insulate walls";
    let anchors = parser.anchors(span);
    let segments = anchors.segments(span);

    assert_eq!(anchors.len(), 2);
    assert_eq!(segments[0].0, "Basement wall insulation");
    assert_eq!(segments[0].1.trim(), "Uninsulated Insulate to R-13");
    assert_eq!(segments[1].0, "Wall insulation");
}

#[test]
fn bleed_guard_truncates_at_other_feature() {
    let parser = FeatureAnchorParser::new(Section::Additional).expect("regexes compile");
    assert_eq!(
        parser.truncate_bleed("Uninsulated Duct sealing leaks badly", "Duct insulation"),
        "Uninsulated"
    );
    assert_eq!(
        parser.truncate_bleed("Uninsulated ducts Insulate ducts to R-8", "Duct insulation"),
        "Uninsulated ducts Insulate ducts to R-8"
    );
}

#[test]
fn bleed_is_prevented_end_to_end() {
    let text = "Additional Energy Recommendations
Duct sealing Not sealed Seal ducts professionally
Duct insulation Uninsulated near Duct sealing Insulate ducts to R-8";
    let output = parser().parse(text, &NoopLogger).expect("parse succeeds");
    let row = find_row(&output.suggestions, Section::Additional, "Duct insulation");

    assert!(!row.todays_condition.contains("Duct sealing"));
    assert_eq!(row.todays_condition, "Uninsulated near");
}

#[test]
fn bleed_guard_ignores_letter_case_of_other_feature() {
    let parser = FeatureAnchorParser::new(Section::Priority).expect("regexes compile");
    assert_eq!(
        parser.truncate_bleed("Ceiling near the water heater is R-11", "Attic insulation"),
        "Ceiling near the"
    );
    assert_eq!(
        parser.truncate_bleed("Electric storage, install a heat pump water heater", "Water Heater"),
        "Electric storage, install a heat pump water heater"
    );
}

#[test]
fn lowercase_neighbour_name_does_not_bleed_into_row() {
    let text = "Priority Energy Improvements
Attic insulation Ceiling near the water heater is R-11 When replacing roofing, insulate to R-49
Water Heater Electric storage When replacing, install a heat pump water heater";
    let output = parser().parse(text, &NoopLogger).expect("parse succeeds");

    let attic = find_row(&output.suggestions, Section::Priority, "Attic insulation");
    assert!(!attic.todays_condition.to_lowercase().contains("water heater"));
    assert_eq!(attic.todays_condition, "Ceiling near the");

    let water = find_row(&output.suggestions, Section::Priority, "Water Heater");
    assert_eq!(water.todays_condition, "Electric storage");
    assert_eq!(
        water.recommendation,
        "When replacing, install a heat pump water heater"
    );
}

#[test]
fn priority_split_on_when_replacing() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(
        Section::Priority,
        "Air Conditioner",
        "8.0 SEER When replacing, install a 16 SEER unit",
    );

    assert_eq!(split.todays_condition, "8.0 SEER");
    assert!(split.recommendation.starts_with("When replacing"));
}

#[test]
fn air_conditioner_prefers_seer_rating_as_condition() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(
        Section::Priority,
        "Air Conditioner",
        "Central air 10 SEER When replacing, install ENERGY STAR",
    );
    assert_eq!(split.todays_condition, "10 SEER");
}

#[test]
fn air_sealing_override_finds_recommendation_and_condition() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(
        Section::Priority,
        "Envelope/Air sealing",
        "Home is Not professionally air sealed Professionally air seal to reduce leakage",
    );

    assert_eq!(split.todays_condition, "Not professionally air sealed");
    assert_eq!(split.recommendation, "Professionally air seal to reduce leakage");
}

#[test]
fn additional_split_on_recommendation_verb() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(
        Section::Additional,
        "Floor insulation",
        "Uninsulated floor Insulate to R-30",
    );
    assert_eq!(split.todays_condition, "Uninsulated floor");
    assert_eq!(split.recommendation, "Insulate to R-30");

    let short = splitter.split(Section::Additional, "Windows", "Single pane Add R-5");
    assert_eq!(short.todays_condition, "Single pane Add R-5");
    assert_eq!(short.recommendation, "");
}

#[test]
fn solar_capacity_override() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(
        Section::Additional,
        "Solar PV",
        "Existing Capacity of 3.5 k W in DC Install additional panels",
    );
    assert_eq!(split.todays_condition, "Capacity of 3.5 kW in DC");
    assert_eq!(split.recommendation, "Install additional panels");
}

#[test]
fn empty_remainder_uses_sentinels() {
    let splitter = RowSplitter::new().expect("regexes compile");
    let split = splitter.split(Section::Priority, "Water Heater", "   ");
    assert_eq!(split.todays_condition, NOT_AVAILABLE);
    assert_eq!(split.recommendation, "");

    let unsplit = splitter.split(Section::Priority, "Water Heater", "Electric storage");
    assert_eq!(unsplit.todays_condition, "Electric storage");
    assert_eq!(unsplit.recommendation, "");
}

#[test]
fn merge_keeps_template_shape_and_order() {
    let parsed = vec![
        SuggestionRow {
            section: Section::Additional,
            feature: "WINDOWS".to_string(),
            todays_condition: "Single pane".to_string(),
            recommendation: String::new(),
        },
        SuggestionRow {
            section: Section::Additional,
            feature: "Hot tub".to_string(),
            todays_condition: "Present".to_string(),
            recommendation: "Remove".to_string(),
        },
    ];

    let merged = merge_with_template(&parsed);
    let template = template_rows();

    assert_eq!(merged.len(), PRIORITY_FEATURES.len() + ADDITIONAL_FEATURES.len());
    assert_eq!(merged.len(), 16);
    for (merged_row, template_row) in merged.iter().zip(template.iter()) {
        assert_eq!(merged_row.section, template_row.section);
        assert_eq!(merged_row.feature, template_row.feature);
    }

    let windows = find_row(&merged, Section::Additional, "Windows");
    assert_eq!(windows.todays_condition, "Single pane");
    assert_eq!(windows.recommendation, "");
    assert!(merged.iter().all(|row| row.feature != "Hot tub"));
}

#[test]
fn dedup_keeps_first_row_per_key() {
    let rows = vec![
        SuggestionRow {
            section: Section::Priority,
            feature: "Air Conditioner".to_string(),
            todays_condition: "10 SEER".to_string(),
            recommendation: String::new(),
        },
        SuggestionRow {
            section: Section::Priority,
            feature: "air conditioner".to_string(),
            todays_condition: "13 SEER".to_string(),
            recommendation: String::new(),
        },
        SuggestionRow::placeholder(Section::Additional, "Air Conditioner"),
    ];

    let deduped = dedup_rows(rows);
    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].todays_condition, "10 SEER");
}

#[test]
fn full_report_parses_every_row() {
    let output = parser().parse(FULL_REPORT, &NoopLogger).expect("parse succeeds");

    assert_eq!(output.hes_score, Some(5));
    assert_eq!(output.annual_energy_cost, Some(2340.0));
    assert_eq!(output.solar_generation_kwh, Some(5120.0));
    assert_eq!(output.carbon_footprint_tons, Some(8.5));
    assert_eq!(output.year_built, Some(1965));

    assert!(output.debug.has_priority);
    assert!(output.debug.has_additional);
    assert!(!output.debug.used_priority_fallback);
    assert_eq!(output.debug.suggestions_count, 16);
    assert_eq!(output.debug.parsed_row_count, 16);
    assert_eq!(output.suggestions.len(), 16);

    for row in &output.suggestions {
        assert_ne!(row.todays_condition, NOT_AVAILABLE, "{} has no condition", row.feature);
        assert!(!row.recommendation.is_empty(), "{} has no recommendation", row.feature);
    }
    assert_eq!(output.existing_conditions.len(), 16);
    assert_eq!(output.recommendations.len(), 16);

    let keys = output
        .suggestions
        .iter()
        .map(|row| row_key(row.section, &row.feature))
        .collect::<HashSet<(Section, String)>>();
    assert_eq!(keys.len(), output.suggestions.len());

    let ac = find_row(&output.suggestions, Section::Priority, "Air Conditioner");
    assert_eq!(ac.todays_condition, "8.0 SEER");
    assert_eq!(ac.recommendation, "When replacing, install a 16 SEER unit");

    let sealing = find_row(&output.suggestions, Section::Priority, "Envelope/Air sealing");
    assert_eq!(sealing.todays_condition, "Not professionally sealed");
    assert_eq!(sealing.recommendation, "Professionally air seal the home");

    let furnace = find_row(&output.suggestions, Section::Additional, "Furnace");
    assert_eq!(furnace.todays_condition, "Natural gas 80% AFUE");
    assert_eq!(furnace.recommendation, "Replace with an ENERGY STAR unit");

    let solar = find_row(&output.suggestions, Section::Additional, "Solar PV");
    assert_eq!(solar.todays_condition, "Capacity of 0 kW in DC");

    let wall = find_row(&output.suggestions, Section::Additional, "Wall insulation");
    assert_eq!(wall.todays_condition, "Uninsulated");
    assert_eq!(wall.recommendation, "Insulate walls to R-13");
}

#[test]
fn unrelated_text_still_yields_full_template() {
    let output = parser()
        .parse("Nothing in this document matches the report layout.", &NoopLogger)
        .expect("parse succeeds");

    assert_eq!(output.suggestions, template_rows());
    assert!(!output.debug.has_priority);
    assert!(!output.debug.has_additional);
    assert_eq!(output.hes_score, None);
    assert!(output.existing_conditions.is_empty());
    assert!(output.recommendations.is_empty());
}

#[test]
fn empty_text_is_an_error() {
    assert!(parser().parse("", &NoopLogger).is_err());
    assert!(parser().parse(" \n\t\r\n ", &NoopLogger).is_err());
}

#[test]
fn fallback_parses_space_columns_when_anchors_fail() {
    let text = "Priority Energy Improvements
feature      today's condition      recommended improvements
air conditioner      8 SEER      When replacing, install a 16 SEER unit
water heater      Electric storage      When replacing, install a heat pump water heater
To achieve the estimated savings, complete all priority improvements.";

    let parser = parser();
    let normalized = NormalizedText::from_raw(text);
    let span = parser
        .locator
        .locate(&normalized.lines, Section::Priority)
        .expect("priority located");
    let anchored = parser.priority.parse(
        &span.joined(&normalized.lines),
        &parser.splitter,
        &NoopLogger,
    );
    assert!(anchored.is_empty());

    let output = parser.parse(text, &NoopLogger).expect("parse succeeds");
    assert!(output.debug.used_priority_fallback);
    assert!(output.debug.has_priority);
    assert_eq!(output.debug.parsed_row_count, 2);

    let ac = find_row(&output.suggestions, Section::Priority, "Air Conditioner");
    assert_eq!(ac.todays_condition, "8 SEER");
    assert_eq!(ac.recommendation, "When replacing, install a 16 SEER unit");
}

#[test]
fn title_case_handles_slashes() {
    assert_eq!(title_case("envelope/air sealing"), "Envelope/Air Sealing");
    assert_eq!(title_case("WATER HEATER"), "Water Heater");
}

#[test]
fn clean_extracted_text_drops_form_feeds_and_nuls() {
    let cleaned = clean_extracted_text("page one\u{0000}\u{000C}page two");
    assert_eq!(cleaned, "page one\n\npage two");
    assert_eq!(non_whitespace_char_count(" \n\t"), 0);
}
