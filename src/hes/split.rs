use super::*;

const MIN_RECOMMENDATION_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RowSplit {
    pub(super) todays_condition: String,
    pub(super) recommendation: String,
}

impl RowSplit {
    fn unsplit(remainder: &str) -> Self {
        Self {
            todays_condition: condition_or_sentinel(remainder),
            recommendation: String::new(),
        }
    }

    fn at(remainder: &str, index: usize) -> Self {
        Self {
            todays_condition: condition_or_sentinel(&remainder[..index]),
            recommendation: remainder[index..].trim().to_string(),
        }
    }
}

fn condition_or_sentinel(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

/// Feature-specific corrections applied on top of the generic split.
#[derive(Debug)]
enum OverrideRule {
    AirSealing {
        recommendation_start: Regex,
        not_sealed: Regex,
    },
    SeerRating {
        rating: Regex,
    },
    SolarCapacity {
        capacity: Regex,
    },
}

impl OverrideRule {
    fn apply(&self, remainder: &str, generic: RowSplit) -> RowSplit {
        match self {
            Self::AirSealing {
                recommendation_start,
                not_sealed,
            } => {
                let mut split = match recommendation_start.find(remainder) {
                    Some(found) => RowSplit::at(remainder, found.start()),
                    None => generic,
                };
                if let Some(found) = not_sealed.find(&split.todays_condition) {
                    split.todays_condition = collapse_whitespace(found.as_str());
                }
                split
            }
            Self::SeerRating { rating } => {
                let mut split = generic;
                if let Some(value) = rating
                    .captures(&split.todays_condition)
                    .and_then(|captures| captures.get(1))
                {
                    split.todays_condition = format!("{} SEER", value.as_str());
                }
                split
            }
            Self::SolarCapacity { capacity } => {
                let mut split = generic;
                if let Some(value) = capacity
                    .captures(remainder)
                    .and_then(|captures| captures.get(1))
                {
                    split.todays_condition = format!("Capacity of {} kW in DC", value.as_str());
                }
                split
            }
        }
    }
}

#[derive(Debug)]
pub(super) struct RowSplitter {
    when_replacing: Regex,
    recommendation_verb: Regex,
    overrides: HashMap<&'static str, OverrideRule>,
}

impl RowSplitter {
    pub(super) fn new() -> Result<Self> {
        let mut overrides = HashMap::new();
        overrides.insert(
            "Envelope/Air sealing",
            OverrideRule::AirSealing {
                recommendation_start: Regex::new(r"(?i)\bprofessionally\s+air\s+seal(?:ing)?\b")
                    .context("failed to compile air sealing recommendation regex")?,
                not_sealed: Regex::new(r"(?i)\bnot\b[^.]{0,60}?\bsealed\b")
                    .context("failed to compile not-sealed regex")?,
            },
        );
        overrides.insert(
            "Air Conditioner",
            OverrideRule::SeerRating {
                rating: Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*SEER\b")
                    .context("failed to compile SEER rating regex")?,
            },
        );
        overrides.insert(
            "Solar PV",
            OverrideRule::SolarCapacity {
                capacity: Regex::new(
                    r"(?i)\bcapacity\s+of\s+(\d+(?:\.\d+)?)\s*k\s?w\s+in\s+DC\b",
                )
                .context("failed to compile solar capacity regex")?,
            },
        );

        Ok(Self {
            when_replacing: Regex::new(r"(?i)\bwhen\s+replacing\b,?")
                .context("failed to compile when-replacing regex")?,
            recommendation_verb: Regex::new(
                r"(?i)\b(?:insulate|install|replace|upgrade|add|seal|reduce)\b",
            )
            .context("failed to compile recommendation verb regex")?,
            overrides,
        })
    }

    pub(super) fn split(&self, section: Section, feature: &str, remainder: &str) -> RowSplit {
        let remainder = remainder.trim();
        if remainder.is_empty() {
            return RowSplit::unsplit(remainder);
        }

        let generic = match section {
            Section::Priority => self.split_priority(remainder),
            Section::Additional => self.split_additional(remainder),
        };

        match self.overrides.get(feature) {
            Some(rule) => rule.apply(remainder, generic),
            None => generic,
        }
    }

    fn split_priority(&self, remainder: &str) -> RowSplit {
        match self.when_replacing.find(remainder) {
            Some(found) => RowSplit::at(remainder, found.start()),
            None => RowSplit::unsplit(remainder),
        }
    }

    fn split_additional(&self, remainder: &str) -> RowSplit {
        match self.recommendation_verb.find(remainder) {
            Some(found) if remainder[found.start()..].trim().len() >= MIN_RECOMMENDATION_CHARS => {
                RowSplit::at(remainder, found.start())
            }
            _ => RowSplit::unsplit(remainder),
        }
    }
}
