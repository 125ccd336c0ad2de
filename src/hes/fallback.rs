use super::*;

/// Column-based reader for priority tables that were extracted with their
/// layout intact. Only consulted when no feature anchor matched.
#[derive(Debug)]
pub(super) struct FallbackLineParser {
    column_gap: Regex,
    header_line: Regex,
}

impl FallbackLineParser {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            column_gap: Regex::new(r"\s{2,}").context("failed to compile column gap regex")?,
            header_line: Regex::new(
                r"(?i)^(?:feature\b|today['’]?s\s+condition\b|recommended\s+improvements?\b)",
            )
            .context("failed to compile fallback header regex")?,
        })
    }

    pub(super) fn parse(&self, lines: &[String], locator: &SectionLocator) -> Vec<SuggestionRow> {
        lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .filter(|line| !locator.is_boilerplate(line) && !self.header_line.is_match(line))
            .filter_map(|line| {
                let fields = self
                    .column_gap
                    .splitn(line, 3)
                    .map(collapse_whitespace)
                    .collect::<Vec<String>>();
                if fields.len() < 2 || fields[0].is_empty() {
                    return None;
                }

                Some(SuggestionRow {
                    section: Section::Priority,
                    feature: title_case(&fields[0]),
                    todays_condition: fields
                        .get(1)
                        .filter(|value| !value.is_empty())
                        .cloned()
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    recommendation: fields.get(2).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }
}

pub(super) fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for character in input.chars() {
        if at_word_start {
            out.extend(character.to_uppercase());
        } else {
            out.extend(character.to_lowercase());
        }
        at_word_start = character.is_whitespace() || character == '/';
    }
    out
}
