use super::*;

/// Turns a report PDF into one blob of plain text.
pub trait TextExtractor {
    fn extract_text(&self, pdf_path: &Path) -> Result<String>;
}

/// Shells out to poppler's `pdftotext`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdftotextExtractor {
    pub layout: bool,
}

impl TextExtractor for PdftotextExtractor {
    fn extract_text(&self, pdf_path: &Path) -> Result<String> {
        let mut command = Command::new("pdftotext");
        command.arg("-enc").arg("UTF-8");
        if self.layout {
            command.arg("-layout");
        }
        command.arg(pdf_path).arg("-");

        let output = command
            .output()
            .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdftotext returned non-zero exit status for {}: {}",
                pdf_path.display(),
                stderr.trim()
            );
        }

        let text = clean_extracted_text(&String::from_utf8_lossy(&output.stdout));
        if non_whitespace_char_count(&text) == 0 {
            bail!(
                "no text layer found in {} (scanned image PDFs are not supported)",
                pdf_path.display()
            );
        }

        Ok(text)
    }
}

/// Page breaks become blank lines; NUL bytes are dropped.
pub(super) fn clean_extracted_text(raw: &str) -> String {
    raw.split('\u{000C}')
        .map(|page| page.replace('\u{0000}', ""))
        .collect::<Vec<String>>()
        .join("\n\n")
}

pub(super) fn non_whitespace_char_count(text: &str) -> usize {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .count()
}
