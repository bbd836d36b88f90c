//! Export command handler

use anyhow::{bail, Context, Result};
use umdb::{
    build_document, read_artifacts, write_artifacts, ArtifactPaths, DocumentSummary,
    ExportOptions, MasterDb,
};

use crate::cli::Cli;

/// Extract the snapshot and write both artifacts
pub fn run(cli: &Cli) -> Result<DocumentSummary> {
    tracing::info!("Opening master database: {}", cli.db_path.display());
    let db = MasterDb::open(&cli.db_path)
        .with_context(|| format!("Failed to open {}", cli.db_path.display()))?;

    let schema = cli.schema.into();
    let missing = db
        .missing_tables(schema)
        .context("Failed to inspect snapshot schema")?;
    if !missing.is_empty() {
        tracing::warn!("Snapshot is missing tables: {}", missing.join(", "));
    }
    if !cli.icon_dir.is_dir() {
        tracing::warn!(
            "Icon directory {} not found, characters will have no icons",
            cli.icon_dir.display()
        );
    }

    let options = ExportOptions {
        version: cli.version.clone(),
        schema,
        icon_dir: cli.icon_dir.clone(),
    };
    tracing::info!(version = %options.version, schema = %options.schema, "Extracting");
    let doc = build_document(&db, &options).context("Extraction failed")?;

    let summary = DocumentSummary::of(&doc);
    tracing::info!("Loaded {} characters.\n{}", summary.chara, summary);
    if let Some(first) = doc.chara.first() {
        tracing::info!(
            "Sample chara: {}, icon URL length: {}",
            first.name,
            first.icon_url.len()
        );
    }

    let paths = ArtifactPaths::in_dir(&cli.out_dir);
    write_artifacts(&doc, &paths).context("Failed to write artifacts")?;

    if cli.verify {
        let (from_binary, from_json) =
            read_artifacts(&paths).context("Failed to read back artifacts")?;
        if from_binary != doc || from_json != doc {
            bail!("Written artifacts do not decode to the exported document");
        }
        tracing::info!("Verified {} and {}", paths.binary.display(), paths.json.display());
    }

    Ok(summary)
}
