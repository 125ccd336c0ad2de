use super::*;

const FOOTNOTE_SUFFIX: &str = r"(?:\s?[¹²³⁴⁵⁶⁷⁸⁹⁰]+|\s\d(?:\s|$))?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Anchor {
    pub(super) feature: &'static str,
    pub(super) start: usize,
    pub(super) end: usize,
}

/// Anchors in document order. Consecutive anchors delimit each other, so
/// the list is only ever built sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct AnchorList {
    anchors: Vec<Anchor>,
}

impl AnchorList {
    pub(super) fn new(mut anchors: Vec<Anchor>) -> Self {
        anchors.sort_by_key(|anchor| (anchor.start, anchor.feature));
        Self { anchors }
    }

    pub(super) fn len(&self) -> usize {
        self.anchors.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Text following each anchor's name, up to the next anchor's start.
    pub(super) fn segments<'a>(&self, span: &'a str) -> Vec<(&'static str, &'a str)> {
        self.anchors
            .iter()
            .enumerate()
            .map(|(index, anchor)| {
                let end = self
                    .anchors
                    .get(index + 1)
                    .map(|next| next.start)
                    .unwrap_or(span.len());
                let body_start = anchor.end.min(end);
                (anchor.feature, &span[body_start..end])
            })
            .collect()
    }
}

#[derive(Debug)]
pub(super) struct FeatureAnchorParser {
    section: Section,
    patterns: Vec<(&'static str, Regex)>,
    bleed_patterns: Vec<(&'static str, Regex)>,
    header_tokens: Regex,
}

impl FeatureAnchorParser {
    pub(super) fn new(section: Section) -> Result<Self> {
        let patterns = catalog_for(section)
            .iter()
            .map(|feature| -> Result<(&'static str, Regex)> {
                Ok((*feature, feature_regex(feature)?))
            })
            .collect::<Result<Vec<(&'static str, Regex)>>>()?;
        let bleed_patterns = catalog_for(section)
            .iter()
            .map(|feature| -> Result<(&'static str, Regex)> {
                Ok((*feature, bleed_regex(feature)?))
            })
            .collect::<Result<Vec<(&'static str, Regex)>>>()?;

        Ok(Self {
            section,
            patterns,
            bleed_patterns,
            header_tokens: Regex::new(
                r"\bFEATURE\b|(?i:\btoday['’]?s\s+condition\b)|(?i:\brecommended\s+improvements?\b)",
            )
            .context("failed to compile table header token regex")?,
        })
    }

    /// Earliest standalone occurrence of each feature. A match lying inside a
    /// longer feature name ("wall insulation" inside "Basement wall
    /// insulation") does not count as an anchor.
    pub(super) fn anchors(&self, span: &str) -> AnchorList {
        let all_matches = self
            .patterns
            .iter()
            .map(|(feature, pattern)| {
                let ranges = pattern
                    .find_iter(span)
                    .map(|found| (found.start(), found.end()))
                    .collect::<Vec<(usize, usize)>>();
                (*feature, ranges)
            })
            .collect::<Vec<(&'static str, Vec<(usize, usize)>)>>();

        let anchors = all_matches
            .iter()
            .filter_map(|(feature, ranges)| {
                ranges
                    .iter()
                    .find(|(start, end)| {
                        !all_matches.iter().any(|(other, other_ranges)| {
                            other != feature
                                && other_ranges.iter().any(|(other_start, other_end)| {
                                    *other_start <= *start
                                        && *end <= *other_end
                                        && (other_end - other_start) > (end - start)
                                })
                        })
                    })
                    .map(|(start, end)| Anchor {
                        feature: *feature,
                        start: *start,
                        end: *end,
                    })
            })
            .collect();

        AnchorList::new(anchors)
    }

    pub(super) fn parse(
        &self,
        span: &str,
        splitter: &RowSplitter,
        logger: &dyn ParseLogger,
    ) -> Vec<SuggestionRow> {
        let anchors = self.anchors(span);
        logger.debug(
            "anchors",
            &format!("{} anchors in {} section", anchors.len(), self.section.as_str()),
        );
        if anchors.is_empty() {
            return Vec::new();
        }

        anchors
            .segments(span)
            .into_iter()
            .map(|(feature, body)| {
                let stripped = self.header_tokens.replace_all(body, " ");
                let remainder = collapse_whitespace(&stripped);
                let guarded = self.truncate_bleed(&remainder, feature);
                if guarded.len() < remainder.len() {
                    logger.debug(
                        "bleed",
                        &format!("truncated {feature} at byte {}", guarded.len()),
                    );
                }

                let split = splitter.split(self.section, feature, guarded.trim());
                SuggestionRow {
                    section: self.section,
                    feature: feature.to_string(),
                    todays_condition: split.todays_condition,
                    recommendation: split.recommendation,
                }
            })
            .collect()
    }

    /// Cuts `remainder` at the first occurrence of any other feature of the
    /// same catalog, in any letter case.
    pub(super) fn truncate_bleed<'a>(&self, remainder: &'a str, feature: &str) -> &'a str {
        let cut = self
            .bleed_patterns
            .iter()
            .filter(|(other, _)| *other != feature)
            .filter_map(|(_, pattern)| pattern.find(remainder).map(|found| found.start()))
            .min();

        match cut {
            Some(index) => remainder[..index].trim_end(),
            None => remainder,
        }
    }
}

/// Feature words in order with flexible whitespace around spaces and slashes.
fn feature_words(feature: &str) -> String {
    feature
        .split_whitespace()
        .map(|word| {
            word.split('/')
                .map(regex::escape)
                .collect::<Vec<String>>()
                .join(r"\s*/\s*")
        })
        .collect::<Vec<String>>()
        .join(r"\s+")
}

/// Row-start pattern for a feature. The first letter keeps its catalog case
/// so lowercase mentions inside prose ("add wall insulation") are not taken
/// as row starts; the rest is case-insensitive.
pub(super) fn feature_regex(feature: &str) -> Result<Regex> {
    let body = feature_words(feature);
    let mut chars = body.chars();
    let first = chars
        .next()
        .with_context(|| format!("empty feature name: {feature:?}"))?;
    let rest = chars.as_str();

    let pattern = format!(r"\b{first}(?i:{rest})\b{FOOTNOTE_SUFFIX}");
    Regex::new(&pattern).with_context(|| format!("failed to compile feature regex for {feature}"))
}

/// Any mention of a feature name, regardless of case.
pub(super) fn bleed_regex(feature: &str) -> Result<Regex> {
    let pattern = format!(r"(?i)\b{}\b", feature_words(feature));
    Regex::new(&pattern).with_context(|| format!("failed to compile bleed regex for {feature}"))
}
