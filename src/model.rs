use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Pdf,
    Docx,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        if extension.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub case_number: String,
    pub case_name: String,
    pub case_desc: String,
    pub key_word: String,
    pub case_text: String,
    pub trial_process: String,
    pub trial_abbr: String,
    pub relevant_index: String,
}

#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub source: PathBuf,
    pub kind: SourceKind,
    pub text: String,
    pub record: CaseRecord,
}

#[derive(Debug, Clone)]
pub struct DocumentOutputs {
    pub text_path: PathBuf,
    pub html_path: PathBuf,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchEntryStatus {
    Converted,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub source_path: String,
    pub source_sha256: Option<String>,
    pub kind: Option<SourceKind>,
    pub status: BatchEntryStatus,
    pub case_number: Option<String>,
    pub text_path: Option<String>,
    pub html_path: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub output_dir: String,
    pub processed_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub entries: Vec<BatchEntry>,
}
