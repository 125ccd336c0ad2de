use super::*;

/// Line range of one section. `header_tail` holds whatever followed the
/// header phrase on the header line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SectionSpan {
    pub(super) header_line: usize,
    pub(super) end_line: usize,
    pub(super) header_tail: String,
}

impl SectionSpan {
    pub(super) fn body_lines<'a>(&self, lines: &'a [String]) -> &'a [String] {
        let start = (self.header_line + 1).min(self.end_line);
        &lines[start..self.end_line]
    }

    /// The section flattened to a single line of prose for anchor matching.
    pub(super) fn joined(&self, lines: &[String]) -> String {
        let mut parts = Vec::<&str>::new();
        if !self.header_tail.is_empty() {
            parts.push(self.header_tail.as_str());
        }
        parts.extend(
            self.body_lines(lines)
                .iter()
                .map(String::as_str)
                .filter(|line| !line.is_empty()),
        );
        collapse_whitespace(&parts.join(" "))
    }
}

#[derive(Debug)]
pub(super) struct SectionLocator {
    priority_header: Regex,
    additional_header: Regex,
    boilerplate: Vec<Regex>,
}

impl SectionLocator {
    pub(super) fn new() -> Result<Self> {
        let boilerplate = [
            r"(?i)^to\s+achieve\s+the\b",
            r"(?i)^today['’]?s\s+condition\s+represents\b",
            r"(?i)^for\b.*\bin\s+this\s+report\b",
        ]
        .into_iter()
        .map(|pattern| {
            Regex::new(pattern)
                .with_context(|| format!("failed to compile boilerplate regex: {pattern}"))
        })
        .collect::<Result<Vec<Regex>>>()?;

        Ok(Self {
            priority_header: Regex::new(r"(?i)\bpriority\s+energy\s+improvements?\b")
                .context("failed to compile priority header regex")?,
            additional_header: Regex::new(r"(?i)\badditional\s+energy\s+recommendations?\b")
                .context("failed to compile additional header regex")?,
            boilerplate,
        })
    }

    fn header(&self, section: Section) -> &Regex {
        match section {
            Section::Priority => &self.priority_header,
            Section::Additional => &self.additional_header,
        }
    }

    fn other_header(&self, section: Section) -> &Regex {
        match section {
            Section::Priority => &self.additional_header,
            Section::Additional => &self.priority_header,
        }
    }

    pub(super) fn is_boilerplate(&self, line: &str) -> bool {
        self.boilerplate.iter().any(|pattern| pattern.is_match(line))
    }

    pub(super) fn locate(&self, lines: &[String], section: Section) -> Option<SectionSpan> {
        let header = self.header(section);
        let (header_line, header_match_end) = lines
            .iter()
            .enumerate()
            .find_map(|(index, line)| header.find(line).map(|found| (index, found.end())))?;

        let header_tail = lines[header_line][header_match_end..].trim();
        let other = self.other_header(section);
        // The other header on the same line closes the section immediately.
        let (header_tail, closed_inline) = match other.find(header_tail) {
            Some(found) => (header_tail[..found.start()].trim(), true),
            None => (header_tail, false),
        };

        let end_line = if closed_inline {
            header_line + 1
        } else {
            lines
                .iter()
                .enumerate()
                .skip(header_line + 1)
                .find(|(_, line)| other.is_match(line) || self.is_boilerplate(line))
                .map(|(index, _)| index)
                .unwrap_or(lines.len())
        };

        Some(SectionSpan {
            header_line,
            end_line,
            header_tail: header_tail.to_string(),
        })
    }
}
