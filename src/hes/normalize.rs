#[derive(Debug, Clone, Default)]
pub(super) struct NormalizedText {
    pub(super) text: String,
    pub(super) lines: Vec<String>,
}

impl NormalizedText {
    pub(super) fn from_raw(raw: &str) -> Self {
        let text = normalize_text(raw);
        let lines = text.lines().map(|line| line.trim().to_string()).collect();
        Self { text, lines }
    }
}

/// Mechanical cleanup of extracted text. Applying it twice yields the same
/// result as applying it once.
pub(super) fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::<String>::new();
    let mut blank_run = 0usize;
    for line in unified.split('\n') {
        let line = fix_joined_words(line.trim_end());
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            lines.push(String::new());
            continue;
        }

        blank_run = 0;
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

/// Reinserts spaces that lossy text extraction dropped between words:
/// `aB` → `a B`, `SEERWhen` → `SEER When`, `R-30Insulate` → `R-30 Insulate`.
pub(super) fn fix_joined_words(line: &str) -> String {
    let chars = line.chars().collect::<Vec<char>>();
    let mut out = String::with_capacity(line.len() + 8);

    for (index, &current) in chars.iter().enumerate() {
        if index > 0 && needs_break(&chars, index) {
            out.push(' ');
        }
        out.push(current);
    }

    out
}

fn needs_break(chars: &[char], index: usize) -> bool {
    let previous = chars[index - 1];
    let current = chars[index];

    if previous.is_ascii_lowercase() && current.is_ascii_uppercase() {
        return true;
    }

    if previous.is_ascii_uppercase() && current.is_ascii_uppercase() {
        let next_is_lower = chars
            .get(index + 1)
            .map(|next| next.is_ascii_lowercase())
            .unwrap_or(false);
        let caps_run = chars[..index]
            .iter()
            .rev()
            .take_while(|character| character.is_ascii_uppercase())
            .count();
        return next_is_lower && caps_run >= 2;
    }

    (previous.is_ascii_digit() && current.is_ascii_alphabetic())
        || (previous.is_ascii_alphabetic() && current.is_ascii_digit())
}

/// Identity form of a feature name used for merge and dedup keys.
pub(super) fn normalize_feature_key(feature: &str) -> String {
    feature
        .chars()
        .map(|character| {
            if character.is_alphanumeric() {
                character.to_ascii_lowercase()
            } else if character.is_whitespace() {
                ' '
            } else {
                '\0'
            }
        })
        .filter(|character| *character != '\0')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

pub(super) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub(super) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok()
}
