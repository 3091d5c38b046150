use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use crate::ingest;
use crate::model::{PreparedDocument, SourceKind};

mod fields;
mod normalize;
mod reflow;
mod sections;
#[cfg(test)]
mod tests;

use fields::FieldParser;
use normalize::TextNormalizer;
use reflow::reflow;

pub struct CasePipeline {
    normalizer: TextNormalizer,
    parser: FieldParser,
}

impl CasePipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            parser: FieldParser::new()?,
        })
    }

    pub fn prepare_text(&self, raw: &str, kind: SourceKind) -> String {
        let normalized = self.normalizer.normalize(raw);
        match kind {
            SourceKind::Pdf => reflow(&normalized),
            SourceKind::Docx => normalized,
        }
    }

    pub fn prepare_document(
        &self,
        path: &Path,
        max_pages: Option<usize>,
    ) -> Result<PreparedDocument> {
        let Some(kind) = SourceKind::from_path(path) else {
            bail!("unsupported file format: {}", path.display());
        };

        let raw = ingest::read_raw_text(path, kind, max_pages)?;
        let text = self.prepare_text(&raw, kind);
        let record = self.parser.parse(&text);

        info!(
            path = %path.display(),
            kind = kind.as_str(),
            case_number = %record.case_number,
            chars = text.chars().count(),
            "prepared document"
        );

        Ok(PreparedDocument {
            source: path.to_path_buf(),
            kind,
            text,
            record,
        })
    }
}
