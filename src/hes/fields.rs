use super::*;

const CARBON_WINDOW_LINES: usize = 60;
const MIN_SOLAR_KWH: f64 = 100.0;
const MAX_CARBON_TONS: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct ScalarFields {
    pub(super) hes_score: Option<u8>,
    pub(super) annual_energy_cost: Option<f64>,
    pub(super) solar_generation_kwh: Option<f64>,
    pub(super) carbon_footprint_tons: Option<f64>,
}

#[derive(Debug)]
pub(super) struct FieldPickers {
    score_out_of_ten: Regex,
    score_today: Regex,
    estimated_cost: Regex,
    total_cost: Regex,
    solar_generation: Regex,
    carbon_anchor: Regex,
    carbon_this_home: Regex,
    carbon_after_phrase: Regex,
}

impl FieldPickers {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            score_out_of_ten: Regex::new(r"(?i)\b(\d{1,3})\s*out\s+of\s*10\b")
                .context("failed to compile score out-of-ten regex")?,
            score_today: Regex::new(r"(?i)\bscore\s+today\b\D{0,40}?\b(\d{1,3})\b")
                .context("failed to compile score-today regex")?,
            estimated_cost: Regex::new(
                r"(?i)\bestimated\s+energy\s+costs?\b[^$]{0,120}?\$\s*([\d,]+(?:\.\d+)?)\s*(?:per|/|a)\s*year",
            )
            .context("failed to compile estimated cost regex")?,
            total_cost: Regex::new(
                r"(?i)\btotal\s+energy\s+costs?\s+per\s+year\b[^$]{0,60}?\$\s*([\d,]+(?:\.\d+)?)",
            )
            .context("failed to compile total cost regex")?,
            solar_generation: Regex::new(
                r"(?i)\b(?:solar\s+generation|how\s+much\s+solar\s+energy)\D{0,160}?((?:\d{1,3}(?:,\d{3})+|\d{4,})(?:\.\d+)?)\s*k\s?wh\b",
            )
            .context("failed to compile solar generation regex")?,
            carbon_anchor: Regex::new(r"(?i)\bthis\s+home['’]?s\s+carbon\s+footprint\b")
                .context("failed to compile carbon footprint anchor regex")?,
            carbon_this_home: Regex::new(r"(\d+(?:\.\d+)?)\s*(?:tons?\s*)?This\s+Home\b")
                .context("failed to compile carbon this-home regex")?,
            carbon_after_phrase: Regex::new(
                r"(?i)\bcarbon\s+footprint\b[^\d\n]{0,40}?(\d+(?:\.\d+)?)",
            )
            .context("failed to compile carbon phrase regex")?,
        })
    }

    pub(super) fn pick_all(&self, normalized: &NormalizedText) -> ScalarFields {
        ScalarFields {
            hes_score: self.pick_score(&normalized.text),
            annual_energy_cost: self.pick_annual_cost(&normalized.text),
            solar_generation_kwh: self.pick_solar_generation(&normalized.text),
            carbon_footprint_tons: self.pick_carbon_footprint(&normalized.lines),
        }
    }

    pub(super) fn pick_score(&self, text: &str) -> Option<u8> {
        [&self.score_out_of_ten, &self.score_today]
            .into_iter()
            .find_map(|pattern| {
                let captures = pattern.captures(text)?;
                let value = captures.get(1)?.as_str().parse::<u8>().ok()?;
                (1..=10).contains(&value).then_some(value)
            })
    }

    pub(super) fn pick_annual_cost(&self, text: &str) -> Option<f64> {
        [&self.estimated_cost, &self.total_cost]
            .into_iter()
            .find_map(|pattern| first_number(pattern, text))
    }

    pub(super) fn pick_solar_generation(&self, text: &str) -> Option<f64> {
        first_number(&self.solar_generation, text).filter(|value| *value > MIN_SOLAR_KWH)
    }

    pub(super) fn pick_carbon_footprint(&self, lines: &[String]) -> Option<f64> {
        let anchor = lines
            .iter()
            .position(|line| self.carbon_anchor.is_match(line))?;
        let end = (anchor + CARBON_WINDOW_LINES).min(lines.len());
        let window = lines[anchor..end].join("\n");

        [&self.carbon_this_home, &self.carbon_after_phrase]
            .into_iter()
            .flat_map(|pattern| pattern.captures_iter(&window))
            .filter_map(|captures| captures.get(1).and_then(|m| parse_number(m.as_str())))
            .find(|value| (0.0..=MAX_CARBON_TONS).contains(value))
    }
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| parse_number(value.as_str()))
}
