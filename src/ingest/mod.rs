use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::model::SourceKind;

pub mod docx;
pub mod pdf;

pub fn read_raw_text(path: &Path, kind: SourceKind, max_pages: Option<usize>) -> Result<String> {
    let raw = match kind {
        SourceKind::Pdf => pdf::read_pdf_text(path, max_pages)?,
        SourceKind::Docx => docx::read_docx_text(path)?,
    };

    debug!(
        path = %path.display(),
        kind = kind.as_str(),
        chars = raw.chars().count(),
        "read raw document text"
    );

    Ok(raw)
}
