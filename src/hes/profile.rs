use super::*;

const MAX_LOCATION_LINES: usize = 3;

#[derive(Debug)]
pub(super) struct ProfilePickers {
    location_label: Regex,
    year_built_label: Regex,
    floor_area_label: Regex,
    bedrooms_label: Regex,
    stop_label: Regex,
    year_value: Regex,
    integer_value: Regex,
}

impl ProfilePickers {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            location_label: Regex::new(r"(?i)^(?:location|address)\s*:?\s*(.*)$")
                .context("failed to compile location label regex")?,
            year_built_label: Regex::new(r"(?i)^year\s+built\s*:?\s*(.*)$")
                .context("failed to compile year built label regex")?,
            floor_area_label: Regex::new(
                r"(?i)^(?:conditioned|heated)?\s*floor\s+area\s*:?\s*(.*)$",
            )
            .context("failed to compile floor area label regex")?,
            bedrooms_label: Regex::new(r"(?i)^(?:number\s+of\s+)?bedrooms\s*:?\s*(.*)$")
                .context("failed to compile bedrooms label regex")?,
            stop_label: Regex::new(
                r"(?i)^(?:year\s+built|(?:conditioned|heated)?\s*floor\s+area|(?:number\s+of\s+)?bedrooms|assessment|assessor|date|home\s+energy\s+score|score|hes\s+id|building\s+id|official)\b",
            )
            .context("failed to compile profile stop label regex")?,
            year_value: Regex::new(r"\b(1[6-9]\d{2}|20\d{2})\b")
                .context("failed to compile year value regex")?,
            integer_value: Regex::new(r"\b(\d{1,3}(?:,\d{3})+|\d+)\b")
                .context("failed to compile integer value regex")?,
        })
    }

    pub(super) fn pick(&self, lines: &[String]) -> HomeProfile {
        HomeProfile {
            location: self.pick_location(lines),
            year_built: self
                .labelled_value(lines, &self.year_built_label)
                .and_then(|value| self.first_capture(&self.year_value, &value))
                .and_then(|value| value.parse::<u32>().ok()),
            heated_floor_area_sqft: self
                .labelled_value(lines, &self.floor_area_label)
                .and_then(|value| self.first_capture(&self.integer_value, &value))
                .and_then(|value| value.replace(',', "").parse::<u32>().ok())
                .filter(|value| *value > 0),
            bedrooms: self
                .labelled_value(lines, &self.bedrooms_label)
                .and_then(|value| self.first_capture(&self.integer_value, &value))
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|value| *value <= 50),
        }
    }

    fn pick_location(&self, lines: &[String]) -> Option<String> {
        let (index, captures) = lines.iter().enumerate().find_map(|(index, line)| {
            self.location_label
                .captures(line)
                .map(|captures| (index, captures))
        })?;

        let mut parts = Vec::<String>::new();
        let inline = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if !inline.is_empty() {
            parts.push(inline.to_string());
        }

        for line in lines.iter().skip(index + 1) {
            if parts.len() >= MAX_LOCATION_LINES {
                break;
            }
            if line.is_empty() || line.contains(':') || self.stop_label.is_match(line) {
                break;
            }
            parts.push(line.clone());
        }

        let location = collapse_whitespace(&parts.join(", ").replace(",,", ","));
        (!location.is_empty()).then_some(location)
    }

    /// Value after a label, either on the label's own line or on the next
    /// non-empty line.
    fn labelled_value(&self, lines: &[String], label: &Regex) -> Option<String> {
        let (index, captures) = lines
            .iter()
            .enumerate()
            .find_map(|(index, line)| label.captures(line).map(|captures| (index, captures)))?;

        let inline = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if !inline.is_empty() {
            return Some(inline.to_string());
        }

        lines
            .iter()
            .skip(index + 1)
            .find(|line| !line.is_empty())
            .cloned()
    }

    fn first_capture(&self, pattern: &Regex, text: &str) -> Option<String> {
        pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().to_string())
    }
}
