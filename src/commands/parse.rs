use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{Level, info, warn};

use crate::cli::ParseArgs;
use crate::hes::{
    CATALOG_VERSION, HesReportParser, NoopLogger, ParseLogger, PdftotextExtractor, TextExtractor,
    TracingLogger,
};
use crate::model::ParseReport;
use crate::util::{now_utc_string, sha256_file, write_json};

const REPORT_VERSION: u32 = 1;

pub fn run(args: ParseArgs) -> Result<()> {
    let (source_path, text) = match (&args.pdf, &args.text) {
        (Some(pdf_path), _) => {
            let extractor = PdftotextExtractor {
                layout: args.layout,
            };
            (pdf_path.as_path(), extractor.extract_text(pdf_path)?)
        }
        (None, Some(text_path)) => (text_path.as_path(), read_text(text_path)?),
        (None, None) => bail!("either --pdf or --text is required"),
    };

    info!(source = %source_path.display(), chars = text.len(), "parsing report text");

    let logger: &dyn ParseLogger = if tracing::enabled!(Level::DEBUG) {
        &TracingLogger
    } else {
        &NoopLogger
    };

    let parser = HesReportParser::new()?;
    let output = parser
        .parse(&text, logger)
        .with_context(|| format!("failed to parse report {}", source_path.display()))?;

    if output.debug.used_priority_fallback {
        warn!("priority table parsed with the line-based fallback");
    }
    info!(
        score = ?output.hes_score,
        parsed_rows = output.debug.parsed_row_count,
        suggestions = output.debug.suggestions_count,
        has_priority = output.debug.has_priority,
        has_additional = output.debug.has_additional,
        "report parsed"
    );

    let report = ParseReport {
        report_version: REPORT_VERSION,
        catalog_version: CATALOG_VERSION,
        generated_at: now_utc_string(),
        source_path: source_path.display().to_string(),
        source_sha256: sha256_file(source_path)?,
        output,
    };

    write_json(args.output.as_deref(), &report, !args.compact)?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote parse report");
    }

    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}
