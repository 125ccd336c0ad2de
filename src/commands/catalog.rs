use anyhow::Result;
use tracing::info;

use crate::cli::CatalogArgs;
use crate::hes::{CATALOG_VERSION, template_rows};
use crate::model::CatalogManifest;
use crate::util::write_json;

pub fn run(args: CatalogArgs) -> Result<()> {
    let rows = template_rows();
    let manifest = CatalogManifest {
        catalog_version: CATALOG_VERSION,
        row_count: rows.len(),
        rows,
    };

    write_json(args.output.as_deref(), &manifest, true)?;
    info!(rows = manifest.row_count, "catalog written");

    Ok(())
}
