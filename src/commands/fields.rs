use anyhow::{Context, Result};

use crate::cli::FieldsArgs;
use crate::pipeline::CasePipeline;

pub fn run(args: FieldsArgs) -> Result<()> {
    let pipeline = CasePipeline::new()?;
    let document = pipeline.prepare_document(&args.path, args.max_pages)?;

    let json = serde_json::to_string_pretty(&document.record)
        .with_context(|| format!("failed to serialize fields for {}", args.path.display()))?;
    println!("{json}");

    Ok(())
}
